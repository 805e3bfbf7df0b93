//! Event types for different topics.

use bomber_core::{
    Intent, PlayerId, RoundOutcome, StateDelta, Timestamp, engine::TransitionPhase,
};
use serde::{Deserialize, Serialize};

/// Events related to game state changes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameStateEvent {
    /// An intent was applied with resulting state changes
    IntentApplied {
        intent: Intent,
        delta: Box<StateDelta>,
        nonce: u64,
    },

    /// The engine refused an intent; nothing changed
    IntentRejected {
        intent: Intent,
        phase: TransitionPhase,
        error: String,
        at: Timestamp,
    },

    /// Bombs fired or cleared during a scheduled advance
    BombsAdvanced { delta: Box<StateDelta>, nonce: u64 },
}

/// Round lifecycle events (lightweight)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RoundEvent {
    Started {
        seed: u64,
        players: Vec<PlayerId>,
    },

    /// A player lost their last life
    PlayerEliminated { player: PlayerId, at: Timestamp },

    Finished {
        outcome: RoundOutcome,
        at: Timestamp,
    },
}
