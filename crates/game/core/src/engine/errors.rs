//! Error types for the intent execution pipeline.

use crate::action::{ActionTransition, DropBombAction, MoveAction};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an intent through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("move failed: {0}")]
    Move(TransitionPhaseError<<MoveAction as ActionTransition>::Error>),

    #[error("bomb drop failed: {0}")]
    DropBomb(TransitionPhaseError<<DropBombAction as ActionTransition>::Error>),
}

impl ExecuteError {
    pub fn phase(&self) -> TransitionPhase {
        match self {
            ExecuteError::Move(error) => error.phase,
            ExecuteError::DropBomb(error) => error.phase,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        // A failure after validation passed means the transition itself is
        // inconsistent, whatever the inner error says.
        if self.phase() != TransitionPhase::PreValidate {
            return ErrorSeverity::Internal;
        }
        match self {
            ExecuteError::Move(error) => error.error.severity(),
            ExecuteError::DropBomb(error) => error.error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ExecuteError::Move(error) => error.error.error_code(),
            ExecuteError::DropBomb(error) => error.error.error_code(),
        }
    }
}
