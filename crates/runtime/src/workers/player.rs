//! Per-player task that asks a provider for intents at the player's pace.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, trace, warn};

use bomber_core::{PlayerId, PlayerStats};

use crate::api::{ActionProvider, RuntimeHandle};

/// Drives one player: snapshot, ask the provider, submit, then sleep for the
/// player's movement cooldown so speed pickups take effect on the next tick.
pub struct PlayerWorker {
    player: PlayerId,
    provider: Arc<dyn ActionProvider>,
    handle: RuntimeHandle,
    shutdown_rx: watch::Receiver<bool>,
}

impl PlayerWorker {
    pub fn new(
        player: PlayerId,
        provider: Arc<dyn ActionProvider>,
        handle: RuntimeHandle,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        Self {
            player,
            provider,
            handle,
            shutdown_rx,
        }
    }

    /// Runs until the player dies, the round ends, or the runtime shuts down.
    pub async fn run(mut self) {
        let player = self.player;

        loop {
            let state = match self.handle.query_state().await {
                Ok(state) => state,
                Err(e) => {
                    debug!(target: "runtime::player", %player, error = %e, "Simulation gone");
                    break;
                }
            };
            if state.outcome().is_finished() || !state.is_alive(player) {
                debug!(target: "runtime::player", %player, "Player loop finished");
                break;
            }

            let tick = state
                .player(player)
                .map(|p| PlayerStats::resolve(&p.state, &state.config).tick_interval_ms())
                .unwrap_or(1);

            match self.provider.provide_intent(player, &state).await {
                Ok(Some(intent)) if intent.player() != player => {
                    warn!(
                        target: "runtime::player",
                        %player,
                        other = %intent.player(),
                        "Provider produced an intent for another player"
                    );
                }
                Ok(Some(intent)) => match self.handle.submit(intent).await {
                    Ok(_) => {}
                    Err(e) if e.is_rejection() => {
                        trace!(target: "runtime::player", %player, error = %e, "Intent rejected");
                    }
                    Err(e) => {
                        warn!(target: "runtime::player", %player, error = %e, "Submit failed");
                    }
                },
                Ok(None) => {}
                Err(e) => {
                    warn!(target: "runtime::player", %player, error = %e, "Provider failed");
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(tick)) => {}
                _ = self.shutdown_rx.changed() => break,
            }
        }
    }
}
