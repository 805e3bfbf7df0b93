//! Monotonic game clock.

use tokio::time::Instant;

use bomber_core::Timestamp;

/// Milliseconds elapsed since the round started.
///
/// Backed by tokio's clock so paused-time tests advance it deterministically.
#[derive(Clone, Copy, Debug)]
pub struct GameClock {
    origin: Instant,
}

impl GameClock {
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now(&self) -> Timestamp {
        let elapsed = self.origin.elapsed().as_millis();
        Timestamp::new(u64::try_from(elapsed).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn clock_follows_tokio_time() {
        let clock = GameClock::start();
        assert_eq!(clock.now(), Timestamp::ZERO);

        tokio::time::advance(Duration::from_millis(2_250)).await;
        assert_eq!(clock.now(), Timestamp(2_250));
    }
}
