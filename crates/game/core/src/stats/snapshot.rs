use crate::config::GameConfig;
use crate::state::PlayerState;

use super::{PowerUpKind, effective_value};

/// Effective stats of one player, resolved at a single point in time.
///
/// Callers take a snapshot when they need several values together (the
/// runtime gating a player's next tick, the engine placing a bomb) so all
/// values come from the same state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerStats {
    pub lives: i64,
    pub bomb_count: i64,
    pub bomb_size: i64,
    /// Cooldown between two moves, in milliseconds.
    pub movement_cooldown_ms: i64,
}

impl PlayerStats {
    pub fn resolve(state: &PlayerState, config: &GameConfig) -> Self {
        Self {
            lives: effective_value(state, PowerUpKind::Life, config),
            bomb_count: effective_value(state, PowerUpKind::BombCount, config),
            bomb_size: effective_value(state, PowerUpKind::BombSize, config),
            movement_cooldown_ms: effective_value(state, PowerUpKind::MovementSpeed, config),
        }
    }

    /// Cooldown clamped to at least one millisecond, for scheduling.
    pub fn tick_interval_ms(&self) -> u64 {
        self.movement_cooldown_ms.max(1) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::PowerUps;

    #[test]
    fn snapshot_reflects_pickups() {
        let config = GameConfig::default();
        let mut state = PlayerState::new();
        state.power_ups = PowerUps::new()
            .with(PowerUpKind::BombSize, 2)
            .with(PowerUpKind::MovementSpeed, 1);

        let stats = PlayerStats::resolve(&state, &config);
        assert_eq!(stats.lives, 1);
        assert_eq!(stats.bomb_count, 1);
        assert_eq!(stats.bomb_size, 3);
        assert_eq!(stats.movement_cooldown_ms, 175);
        assert_eq!(stats.tick_interval_ms(), 175);
    }
}
