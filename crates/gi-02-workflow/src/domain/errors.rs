//! Workflow engine errors.

use shared_types::Role;
use thiserror::Error;

use super::permissions::Action;
use super::transitions::EntityKind;

/// Workflow engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Status change violates the lifecycle ordering.
    #[error("Invalid {kind} transition: {from} -> {to}")]
    InvalidTransition {
        kind: EntityKind,
        from: String,
        to: String,
    },

    /// Role lacks the authorization for the action.
    #[error("Permission denied: role {role} may not {action}")]
    PermissionDenied { role: Role, action: Action },

    /// Status string outside the closed set.
    #[error("Unknown {kind} status: {value}")]
    UnknownStatus { kind: EntityKind, value: String },
}
