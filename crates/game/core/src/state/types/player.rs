use std::collections::BTreeSet;

use crate::stats::PowerUps;

use super::{BombId, PixelCoordinate, PlayerId};

/// Keyboard binding for a human-controlled slot. Carried as plain data; the
/// core never reads input devices.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyBinding {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub bomb: String,
}

impl KeyBinding {
    pub fn new(
        up: impl Into<String>,
        down: impl Into<String>,
        left: impl Into<String>,
        right: impl Into<String>,
        bomb: impl Into<String>,
    ) -> Self {
        Self {
            up: up.into(),
            down: down.into(),
            left: left.into(),
            right: right.into(),
            bomb: bomb.into(),
        }
    }
}

/// Mutable per-player progress: deaths, power-ups and fire exposure.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    death_count: u32,
    pub power_ups: PowerUps,
    /// Ignitions (by bomb) that already damaged this player.
    scorched_by: BTreeSet<BombId>,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State that has already died `death_count` times.
    pub fn with_deaths(death_count: u32) -> Self {
        Self {
            death_count,
            ..Self::default()
        }
    }

    pub fn death_count(&self) -> u32 {
        self.death_count
    }

    pub fn was_scorched_by(&self, ignition: BombId) -> bool {
        self.scorched_by.contains(&ignition)
    }

    /// Records one hit from `ignition`. Returns false, without counting a
    /// death, when that ignition already hit this player.
    pub fn record_hit(&mut self, ignition: BombId) -> bool {
        if !self.scorched_by.insert(ignition) {
            return false;
        }
        self.death_count = self.death_count.saturating_add(1);
        true
    }

    /// Drops bookkeeping for an ignition whose fire has cleared.
    pub fn forget_ignition(&mut self, ignition: BombId) {
        self.scorched_by.remove(&ignition);
    }
}

/// One occupied player slot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub position: PixelCoordinate,
    /// `None` marks an NPC (no direct input).
    pub key_binding: Option<KeyBinding>,
    pub state: PlayerState,
}

impl Player {
    pub fn new(id: PlayerId, position: PixelCoordinate) -> Self {
        Self {
            id,
            position,
            key_binding: None,
            state: PlayerState::new(),
        }
    }

    pub fn with_key_binding(mut self, binding: KeyBinding) -> Self {
        self.key_binding = Some(binding);
        self
    }

    pub fn is_npc(&self) -> bool {
        self.key_binding.is_none()
    }
}
