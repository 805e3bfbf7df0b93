//! State initialization errors.

use super::CoordinateError;
use crate::config::ConfigError;
use crate::env::MapError;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while assembling an initial [`GameState`](super::GameState).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitializationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("map generation failed: {0}")]
    Map(#[from] MapError),

    #[error("spawn position unavailable: {0}")]
    Spawn(#[from] CoordinateError),

    /// A supplied layout does not match the configured map size.
    #[error("layout is {actual}x{actual} but the configuration expects {expected}x{expected}")]
    LayoutSizeMismatch { expected: u32, actual: u32 },
}

impl GameError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(error) => error.error_code(),
            Self::Map(error) => error.error_code(),
            Self::Spawn(error) => error.error_code(),
            Self::LayoutSizeMismatch { .. } => "INIT_LAYOUT_SIZE_MISMATCH",
        }
    }
}
