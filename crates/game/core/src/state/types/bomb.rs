use crate::config::BombTimings;
use crate::stats::PowerUpKind;

use super::{BombId, GridCoordinate, PixelCoordinate, PlayerId, Timestamp};

/// Lifecycle of a placed bomb.
///
/// `Armed` until `fires_at`, then it fires (the explosion is computed and
/// stamped) and stays `Exploding` until `clears_at`, after which it is
/// `Cleared` and removed from the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BombPhase {
    Armed,
    Exploding,
    Cleared,
}

/// Fire footprint left by a bomb while it is exploding.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ignition {
    pub cells: Vec<GridCoordinate>,
    /// Power-ups revealed when the fire clears.
    pub drops: Vec<(GridCoordinate, PowerUpKind)>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bomb {
    pub id: BombId,
    pub owner: PlayerId,
    pub position: PixelCoordinate,
    /// Blast radius captured from the owner at placement time.
    pub explosion_size: i64,
    pub fires_at: Timestamp,
    pub clears_at: Timestamp,
    pub phase: BombPhase,
    pub ignition: Option<Ignition>,
}

impl Bomb {
    pub fn new(
        id: BombId,
        owner: PlayerId,
        position: PixelCoordinate,
        explosion_size: i64,
        timings: BombTimings,
    ) -> Self {
        let fires_at = id.placed_at + timings.firing_duration_ms;
        Self {
            id,
            owner,
            position,
            explosion_size,
            fires_at,
            clears_at: fires_at + timings.exploding_duration_ms,
            phase: BombPhase::Armed,
            ignition: None,
        }
    }

    /// Phase the bomb should be in at `now`, judged by its timestamps alone.
    pub fn phase_at(&self, now: Timestamp) -> BombPhase {
        if now >= self.clears_at {
            BombPhase::Cleared
        } else if now >= self.fires_at {
            BombPhase::Exploding
        } else {
            BombPhase::Armed
        }
    }

    /// Armed bomb whose fuse has run out.
    pub fn is_due_to_fire(&self, now: Timestamp) -> bool {
        self.phase == BombPhase::Armed && now >= self.fires_at
    }

    /// Exploding bomb whose fire should be cleared.
    pub fn is_due_to_clear(&self, now: Timestamp) -> bool {
        self.phase == BombPhase::Exploding && now >= self.clears_at
    }

    /// Fires the bomb early, as when caught in another explosion. The fire
    /// then burns for the full exploding duration from `now`.
    pub fn detonate_early(&mut self, now: Timestamp, timings: BombTimings) {
        if now < self.fires_at {
            self.fires_at = now;
            self.clears_at = now + timings.exploding_duration_ms;
        }
    }
}
