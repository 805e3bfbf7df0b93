//! Player intents and the transitions that apply them.
//!
//! An [`Intent`] is what a player (or an NPC provider) asks for; the engine
//! turns it into the matching [`ActionTransition`] and drives it through the
//! validation pipeline.
mod bomb;
mod movement;
mod transition;

pub use bomb::{DropBombAction, DropBombError, create_bomb};
pub use movement::{Direction, MoveAction, MoveError, can_move, resolve_move};
pub use transition::ActionTransition;

use crate::state::PlayerId;

/// Input accepted by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    Move { player: PlayerId, direction: Direction },
    DropBomb { player: PlayerId },
}

impl Intent {
    pub fn player(&self) -> PlayerId {
        match self {
            Intent::Move { player, .. } | Intent::DropBomb { player } => *player,
        }
    }

    /// Short label for logs and events.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Move { .. } => "move",
            Intent::DropBomb { .. } => "drop_bomb",
        }
    }
}

impl From<MoveAction> for Intent {
    fn from(action: MoveAction) -> Self {
        Intent::Move {
            player: action.player,
            direction: action.direction,
        }
    }
}

impl From<DropBombAction> for Intent {
    fn from(action: DropBombAction) -> Self {
        Intent::DropBomb {
            player: action.player,
        }
    }
}
