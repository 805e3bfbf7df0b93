//! Power-up drops from destroyed tiles.

use arrayvec::ArrayVec;

use crate::stats::PowerUpKind;

use super::rng::RngOracle;

/// Four kinds plus at most six "nothing" entries.
type DropPool = ArrayVec<Option<PowerUpKind>, 10>;

/// Weighted pool for one destroyed tile: one entry per power-up kind plus
/// `7 - power_up_chance` empty entries. Chance is clamped to `[1, 6]`.
fn drop_pool(power_up_chance: u8) -> DropPool {
    let chance = power_up_chance.clamp(1, 6);
    let mut pool: DropPool = PowerUpKind::ALL.iter().copied().map(Some).collect();
    for _ in 0..(7 - chance) {
        pool.push(None);
    }
    pool
}

/// Rolls whether a destroyed tile leaves a power-up, and which one.
pub fn roll_drop<R: RngOracle>(rng: &R, seed: u64, power_up_chance: u8) -> Option<PowerUpKind> {
    *rng.pick(seed, &drop_pool(power_up_chance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::rng::{PcgRng, RollContext, compute_seed};

    fn drop_rate(chance: u8) -> usize {
        (0..2_000)
            .filter(|nonce| {
                let seed = compute_seed(77, *nonce, 0, RollContext::PowerUpDrop);
                roll_drop(&PcgRng, seed, chance).is_some()
            })
            .count()
    }

    #[test]
    fn pool_shape() {
        assert_eq!(drop_pool(1).len(), 10);
        assert_eq!(drop_pool(6).len(), 5);
        assert_eq!(drop_pool(200).len(), 5);
    }

    #[test]
    fn higher_chance_drops_more() {
        assert!(drop_rate(6) > drop_rate(1));
    }
}
