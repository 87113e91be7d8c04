//! Common error infrastructure for encounter-core.
//!
//! Domain-specific errors (`ActionError`, `TurnError`) are defined next to the
//! code that raises them. This module only holds the shared classification
//! used by the runtime to decide whether to retry, fall back, or abort.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same actor may submit a different action this turn
/// - **Validation**: the action is malformed for this encounter
/// - **Internal**: unexpected state inconsistency, indicates a bug
/// - **Fatal**: the encounter cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with an alternative action.
    ///
    /// Examples: target out of range, no spell slots left
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: actor not found, acting out of turn
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - encounter state corrupted or finished.
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

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all encounter-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable strings suitable for logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
