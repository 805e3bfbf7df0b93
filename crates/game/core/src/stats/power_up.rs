//! Power-up kinds, accumulated counts and the effective-value formula.

use crate::config::{GameConfig, PowerUpRule};
use crate::state::PlayerState;

/// Accumulable stat modifier kinds.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PowerUpKind {
    Life,
    BombCount,
    BombSize,
    MovementSpeed,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Life,
        PowerUpKind::BombCount,
        PowerUpKind::BombSize,
        PowerUpKind::MovementSpeed,
    ];

    /// The configured rule for this kind.
    pub fn rule(self, config: &GameConfig) -> PowerUpRule {
        let table = &config.power_ups;
        match self {
            PowerUpKind::Life => table.life,
            PowerUpKind::BombCount => table.bomb_count,
            PowerUpKind::BombSize => table.bomb_size,
            PowerUpKind::MovementSpeed => table.movement_speed,
        }
    }
}

/// Number of pickups accumulated per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerUps {
    pub life: u32,
    pub bomb_count: u32,
    pub bomb_size: u32,
    pub movement_speed: u32,
}

impl PowerUps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Life => self.life,
            PowerUpKind::BombCount => self.bomb_count,
            PowerUpKind::BombSize => self.bomb_size,
            PowerUpKind::MovementSpeed => self.movement_speed,
        }
    }

    fn count_mut(&mut self, kind: PowerUpKind) -> &mut u32 {
        match kind {
            PowerUpKind::Life => &mut self.life,
            PowerUpKind::BombCount => &mut self.bomb_count,
            PowerUpKind::BombSize => &mut self.bomb_size,
            PowerUpKind::MovementSpeed => &mut self.movement_speed,
        }
    }

    pub fn with(mut self, kind: PowerUpKind, count: u32) -> Self {
        *self.count_mut(kind) = count;
        self
    }

    /// Adds one pickup of `kind` unless the count already sits at
    /// `max_drop_count`. Returns whether the count changed.
    pub fn collect(&mut self, kind: PowerUpKind, config: &GameConfig) -> bool {
        let cap = kind.rule(config).max_drop_count;
        let count = self.count_mut(kind);
        if *count >= cap {
            return false;
        }
        *count += 1;
        true
    }
}

/// `default + count * increase_value` for `kind`.
///
/// The cap is not applied here; it is enforced when a pickup is collected.
pub fn effective_value(state: &PlayerState, kind: PowerUpKind, config: &GameConfig) -> i64 {
    let rule = kind.rule(config);
    let bonus = i64::from(state.power_ups.count(kind)).saturating_mul(rule.increase_value);
    rule.default.saturating_add(bonus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PowerUpRule;

    fn state_with(kind: PowerUpKind, count: u32) -> PlayerState {
        let mut state = PlayerState::new();
        state.power_ups = PowerUps::new().with(kind, count);
        state
    }

    #[test]
    fn base_value_without_pickups() {
        let config = GameConfig::default();
        for kind in PowerUpKind::ALL {
            assert_eq!(
                effective_value(&PlayerState::new(), kind, &config),
                kind.rule(&config).default
            );
        }
    }

    #[test]
    fn monotonic_for_positive_increase() {
        let config = GameConfig::default();
        let mut previous = i64::MIN;
        for count in 0..10 {
            let value = effective_value(
                &state_with(PowerUpKind::BombSize, count),
                PowerUpKind::BombSize,
                &config,
            );
            assert!(value > previous);
            previous = value;
        }
    }

    #[test]
    fn anti_monotonic_for_negative_increase() {
        let mut config = GameConfig::default();
        config.power_ups.movement_speed = PowerUpRule::new(150, -10, 5);
        let mut previous = i64::MAX;
        for count in 0..10 {
            let value = effective_value(
                &state_with(PowerUpKind::MovementSpeed, count),
                PowerUpKind::MovementSpeed,
                &config,
            );
            assert!(value < previous);
            previous = value;
        }
        let boosted = state_with(PowerUpKind::MovementSpeed, 3);
        assert_eq!(
            effective_value(&boosted, PowerUpKind::MovementSpeed, &config),
            120
        );
    }

    #[test]
    fn collect_respects_cap() {
        let config = GameConfig::default();
        let cap = config.power_ups.bomb_count.max_drop_count;
        let mut power_ups = PowerUps::new();
        for _ in 0..cap {
            assert!(power_ups.collect(PowerUpKind::BombCount, &config));
        }
        assert!(!power_ups.collect(PowerUpKind::BombCount, &config));
        assert_eq!(power_ups.count(PowerUpKind::BombCount), cap);
    }

    #[test]
    fn unvalidated_rules_saturate() {
        let mut config = GameConfig::default();
        config.power_ups.bomb_size = PowerUpRule::new(i64::MAX - 1, 1, 5);
        config.power_ups.life = PowerUpRule::new(i64::MIN + 1, i64::MIN, 5);

        let state = state_with(PowerUpKind::BombSize, 3);
        assert_eq!(effective_value(&state, PowerUpKind::BombSize, &config), i64::MAX);
        let state = state_with(PowerUpKind::Life, 3);
        assert_eq!(effective_value(&state, PowerUpKind::Life, &config), i64::MIN);
    }

    #[test]
    fn kind_names() {
        assert_eq!(PowerUpKind::BombSize.to_string(), "bomb_size");
        assert_eq!(
            "movement_speed".parse::<PowerUpKind>(),
            Ok(PowerUpKind::MovementSpeed)
        );
    }
}
