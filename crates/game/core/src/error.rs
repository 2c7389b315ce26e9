//! Common error infrastructure for tactics-core.
//!
//! Gameplay problems (missing assets, impossible moves, absent targets) are not
//! errors: the executor logs them and the action becomes a no-op. The error
//! types in this crate cover setup and wiring failures only, and each of them
//! implements [`GameError`] for uniform classification.

use crate::state::{EntityId, Position};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may retry with adjusted input
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistency
/// - **Fatal**: the run cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: placement tile occupied, roster over the cap.
    Recoverable,

    /// Examples: unknown character id, placement off the grid.
    Validation,

    /// Examples: arena id with no entity behind it.
    Internal,

    /// Examples: missing actor oracle during setup.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Debugging details captured where an error is raised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    pub actor: Option<EntityId>,
    pub position: Option<Position>,
    /// Turn number when the error occurred (0 during setup).
    pub turn: u32,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(turn: u32) -> Self {
        Self {
            actor: None,
            position: None,
            turn,
        }
    }

    #[must_use]
    pub const fn with_actor(mut self, actor: EntityId) -> Self {
        self.actor = Some(actor);
        self
    }

    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Common trait for all tactics-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Static identifier for this error variant, for logs and tests.
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
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }

    #[test]
    fn context_builder_keeps_fields() {
        let context = ErrorContext::new(3)
            .with_actor(EntityId(2))
            .with_position(Position::new(1, 4));
        assert_eq!(context.turn, 3);
        assert_eq!(context.actor, Some(EntityId(2)));
        assert_eq!(context.position, Some(Position::new(1, 4)));
    }
}
