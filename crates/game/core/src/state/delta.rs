//! Description of one committed engine step.
//!
//! The engine records every observable change while it applies an intent or
//! advances bombs. Runtime layers forward the delta to subscribers instead of
//! diffing whole states.

use crate::engine::Explosion;
use crate::stats::PowerUpKind;

use super::{BombId, GridCoordinate, PixelCoordinate, PlayerId, Timestamp};

/// A single observable change, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Change {
    PlayerMoved {
        player: PlayerId,
        from: PixelCoordinate,
        to: PixelCoordinate,
    },
    BombPlaced {
        bomb: BombId,
        owner: PlayerId,
        cell: GridCoordinate,
        explosion_size: i64,
    },
    BombFired {
        bomb: BombId,
        explosion: Explosion,
    },
    TileBroken {
        cell: GridCoordinate,
    },
    PlayerDamaged {
        player: PlayerId,
        bomb: BombId,
        death_count: u32,
        /// The hit exhausted the player's lives.
        killed: bool,
    },
    PowerUpDropped {
        cell: GridCoordinate,
        kind: PowerUpKind,
    },
    PowerUpCollected {
        player: PlayerId,
        cell: GridCoordinate,
        kind: PowerUpKind,
        /// False when the player was already at the cap for this kind.
        applied: bool,
    },
    PowerUpBurned {
        cell: GridCoordinate,
        kind: PowerUpKind,
    },
    BombCleared {
        bomb: BombId,
    },
}

/// Ordered changes produced by one engine step at time `now`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateDelta {
    pub now: Timestamp,
    pub changes: Vec<Change>,
}

impl StateDelta {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now,
            changes: Vec::new(),
        }
    }

    pub fn push(&mut self, change: Change) {
        self.changes.push(change);
    }

    /// Returns true if no state changes occurred.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> + '_ {
        self.changes.iter()
    }

    /// Players whose lives ran out in this step.
    pub fn killed_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.changes.iter().filter_map(|change| match change {
            Change::PlayerDamaged {
                player,
                killed: true,
                ..
            } => Some(*player),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn killed_players_only_reports_fatal_hits() {
        let bomb = BombId::new(Timestamp(10), 0);
        let mut delta = StateDelta::new(Timestamp(2_010));
        assert!(delta.is_empty());

        delta.push(Change::PlayerDamaged {
            player: PlayerId::P1,
            bomb,
            death_count: 1,
            killed: false,
        });
        delta.push(Change::PlayerDamaged {
            player: PlayerId::P3,
            bomb,
            death_count: 1,
            killed: true,
        });

        assert_eq!(delta.killed_players().collect::<Vec<_>>(), vec![PlayerId::P3]);
        assert_eq!(delta.iter().count(), 2);
    }
}
