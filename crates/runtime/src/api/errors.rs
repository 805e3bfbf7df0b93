//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, the engine, and action providers
//! so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use bomber_core::{ExecuteError, ExplosionError, GameError, PlayerId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires an initial game state before building")]
    MissingInitialState,

    #[error("provider registered for {0}, which is not in the game")]
    UnknownPlayer(PlayerId),

    /// The engine refused an intent; the state is unchanged.
    #[error("intent rejected: {0}")]
    IntentRejected(#[source] ExecuteError),

    #[error("bomb scheduling failed")]
    Explosion(#[source] ExplosionError),

    #[error("action provider for {player} failed: {message}")]
    Provider { player: PlayerId, message: String },

    #[error("round did not finish within the time limit")]
    RoundTimedOut,
}

impl RuntimeError {
    /// Rejections of expected-invalid intents, which callers treat as no-ops.
    pub fn is_rejection(&self) -> bool {
        matches!(self, RuntimeError::IntentRejected(error) if !error.severity().is_internal())
    }
}
