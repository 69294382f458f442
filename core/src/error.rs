//! Errors raised by the synthetic telemetry subsystem.

use crate::action_type::ActionLabel;
use thiserror::Error;

/// Errors from synthetic telemetry operations.
///
/// All of these are request-scoped: nothing is retried and nothing is fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntheticError {
    /// The submitted event kind is not part of the closed vocabulary.
    #[error("Invalid action type: {0}")]
    InvalidActionType(ActionLabel),
}

/// Result alias for synthetic operations.
pub type Result<T> = std::result::Result<T, SyntheticError>;
