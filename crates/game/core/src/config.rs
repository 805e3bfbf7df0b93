use crate::stats::PowerUpKind;

/// Game configuration constants and tunable parameters.
///
/// One canonical, nested schema: map and movement sizes, tile densities,
/// per power-up rules and bomb timings. Every core operation receives the
/// parts it needs explicitly; there is no global configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Side length of the square map, in cells.
    pub map_size: u32,
    /// Pixel size of one movement step (and of one cell).
    pub movement_size: u32,
    /// Obstacle density in `[1, 10]`; 1 is mostly empty, 10 is dense.
    pub block_chance: u8,
    /// Power-up drop likelihood in `[1, 6]` when a breaking tile is destroyed.
    pub power_up_chance: u8,
    /// Number of occupied player slots (1..=4).
    pub player_count: u8,
    pub power_ups: PowerUpTable,
    pub bomb: BombTimings,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Fixed number of player slots.
    pub const MAX_PLAYERS: usize = 4;
    pub const MIN_MAP_SIZE: u32 = 3;
    pub const MAX_MAP_SIZE: u32 = 255;
    pub const MAX_MOVEMENT_SIZE: u32 = 4_096;
    pub const BLOCK_CHANCE_RANGE: (u8, u8) = (1, 10);
    pub const POWER_UP_CHANCE_RANGE: (u8, u8) = (1, 6);

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAP_SIZE: u32 = 15;
    pub const DEFAULT_MOVEMENT_SIZE: u32 = 40;
    pub const DEFAULT_BLOCK_CHANCE: u8 = 5;
    pub const DEFAULT_POWER_UP_CHANCE: u8 = 3;

    pub fn new() -> Self {
        Self {
            map_size: Self::DEFAULT_MAP_SIZE,
            movement_size: Self::DEFAULT_MOVEMENT_SIZE,
            block_chance: Self::DEFAULT_BLOCK_CHANCE,
            power_up_chance: Self::DEFAULT_POWER_UP_CHANCE,
            player_count: Self::MAX_PLAYERS as u8,
            power_ups: PowerUpTable::default(),
            bomb: BombTimings::default(),
        }
    }

    pub fn with_map_size(mut self, map_size: u32) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn with_movement_size(mut self, movement_size: u32) -> Self {
        self.movement_size = movement_size;
        self
    }

    pub fn with_block_chance(mut self, block_chance: u8) -> Self {
        self.block_chance = block_chance;
        self
    }

    pub fn with_player_count(mut self, player_count: u8) -> Self {
        self.player_count = player_count;
        self
    }

    /// Checks every value against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_size < Self::MIN_MAP_SIZE {
            return Err(ConfigError::MapTooSmall {
                map_size: self.map_size,
            });
        }
        if self.map_size > Self::MAX_MAP_SIZE {
            return Err(ConfigError::MapTooLarge {
                map_size: self.map_size,
            });
        }
        if self.movement_size == 0 {
            return Err(ConfigError::ZeroMovementSize);
        }
        if self.movement_size > Self::MAX_MOVEMENT_SIZE {
            return Err(ConfigError::MovementSizeTooLarge(self.movement_size));
        }
        let (lo, hi) = Self::BLOCK_CHANCE_RANGE;
        if !(lo..=hi).contains(&self.block_chance) {
            return Err(ConfigError::BlockChanceOutOfRange(self.block_chance));
        }
        let (lo, hi) = Self::POWER_UP_CHANCE_RANGE;
        if !(lo..=hi).contains(&self.power_up_chance) {
            return Err(ConfigError::PowerUpChanceOutOfRange(self.power_up_chance));
        }
        if self.player_count == 0 || self.player_count as usize > Self::MAX_PLAYERS {
            return Err(ConfigError::PlayerCountOutOfRange(self.player_count));
        }
        if self.bomb.firing_duration_ms == 0 || self.bomb.exploding_duration_ms == 0 {
            return Err(ConfigError::ZeroBombDuration);
        }
        for kind in PowerUpKind::ALL {
            if !kind.rule(self).is_within_limits() {
                return Err(ConfigError::PowerUpRuleOutOfRange(kind));
            }
        }
        Ok(())
    }
}

// The far edge of the largest map stays addressable in pixels.
const _: () = assert!(
    (GameConfig::MAX_MAP_SIZE as i64 - 1) * GameConfig::MAX_MOVEMENT_SIZE as i64 <= i32::MAX as i64
);

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Base value, per-pickup delta and accumulation cap for one power-up kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerUpRule {
    pub default: i64,
    /// May be negative (movement cooldown shrinks with each pickup).
    pub increase_value: i64,
    pub max_drop_count: u32,
}

impl PowerUpRule {
    /// Bound on `|default|` and `|increase_value|`.
    pub const MAX_MAGNITUDE: i64 = 1_000_000;
    pub const MAX_DROP_COUNT: u32 = 1_000;

    pub const fn new(default: i64, increase_value: i64, max_drop_count: u32) -> Self {
        Self {
            default,
            increase_value,
            max_drop_count,
        }
    }

    pub fn is_within_limits(&self) -> bool {
        let bound = -Self::MAX_MAGNITUDE..=Self::MAX_MAGNITUDE;
        bound.contains(&self.default)
            && bound.contains(&self.increase_value)
            && self.max_drop_count <= Self::MAX_DROP_COUNT
    }
}

/// Rules for all four power-up kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PowerUpTable {
    pub life: PowerUpRule,
    pub bomb_count: PowerUpRule,
    pub bomb_size: PowerUpRule,
    /// Per-move cooldown in milliseconds.
    pub movement_speed: PowerUpRule,
}

impl Default for PowerUpTable {
    fn default() -> Self {
        Self {
            life: PowerUpRule::new(1, 1, 2),
            bomb_count: PowerUpRule::new(1, 1, 4),
            bomb_size: PowerUpRule::new(1, 1, 5),
            movement_speed: PowerUpRule::new(200, -25, 4),
        }
    }
}

/// Two-phase bomb timing: armed for `firing_duration_ms`, then burning for
/// `exploding_duration_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BombTimings {
    pub firing_duration_ms: u64,
    pub exploding_duration_ms: u64,
}

impl Default for BombTimings {
    fn default() -> Self {
        Self {
            firing_duration_ms: 2_000,
            exploding_duration_ms: 800,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    #[error("map size {map_size} is smaller than {min}", min = GameConfig::MIN_MAP_SIZE)]
    MapTooSmall { map_size: u32 },

    #[error("map size {map_size} is larger than {max}", max = GameConfig::MAX_MAP_SIZE)]
    MapTooLarge { map_size: u32 },

    #[error("movement size must be positive")]
    ZeroMovementSize,

    #[error("movement size {0} is larger than {max}", max = GameConfig::MAX_MOVEMENT_SIZE)]
    MovementSizeTooLarge(u32),

    #[error("block chance {0} is outside [1, 10]")]
    BlockChanceOutOfRange(u8),

    #[error("power-up chance {0} is outside [1, 6]")]
    PowerUpChanceOutOfRange(u8),

    #[error("player count {0} is outside [1, 4]")]
    PlayerCountOutOfRange(u8),

    #[error("bomb durations must be positive")]
    ZeroBombDuration,

    #[error("{0} power-up rule is outside the supported range")]
    PowerUpRuleOutOfRange(PowerUpKind),
}

impl crate::error::GameError for ConfigError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MapTooSmall { .. } => "CONFIG_MAP_TOO_SMALL",
            Self::MapTooLarge { .. } => "CONFIG_MAP_TOO_LARGE",
            Self::ZeroMovementSize => "CONFIG_ZERO_MOVEMENT_SIZE",
            Self::MovementSizeTooLarge(_) => "CONFIG_MOVEMENT_SIZE_TOO_LARGE",
            Self::BlockChanceOutOfRange(_) => "CONFIG_BLOCK_CHANCE",
            Self::PowerUpChanceOutOfRange(_) => "CONFIG_POWER_UP_CHANCE",
            Self::PlayerCountOutOfRange(_) => "CONFIG_PLAYER_COUNT",
            Self::ZeroBombDuration => "CONFIG_ZERO_BOMB_DURATION",
            Self::PowerUpRuleOutOfRange(_) => "CONFIG_POWER_UP_RULE",
        }
    }
}
