//! Common error infrastructure for bomber-core.
//!
//! Domain-specific errors (e.g., `MoveError`, `ExplosionError`) are defined in
//! their respective modules alongside the operations they validate. This
//! module provides the classification shared by all of them.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: expected rejections (blocked move, bomb limit reached);
///   callers treat these as silent no-ops
/// - **Validation**: the intent names something that cannot act (dead or
///   missing player)
/// - **Internal**: a caller broke a precondition (misaligned coordinate,
///   bomb outside the map)
/// - **Fatal**: the configuration itself is unusable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a caller bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all bomber-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
