//! Violation store errors.

use gi_02_workflow::{Action, WorkflowError};
use shared_types::{RepositoryError, Role, SessionError};
use thiserror::Error;

use super::value_objects::ViolationId;

/// Violation store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViolationError {
    /// Required field missing or malformed.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// No violation with this id.
    #[error("Violation not found: {id}")]
    NotFound { id: ViolationId },

    /// Caller's role lacks the authorization.
    #[error("Permission denied: role {role} may not {action}")]
    PermissionDenied { role: Role, action: Action },

    /// Prosecution requested without a rationale.
    #[error("Prosecution rationale must not be blank")]
    EmptyRationale,

    /// Prosecution already initiated for this violation.
    #[error("Prosecution already initiated for {id}")]
    AlreadyProsecuting { id: ViolationId },

    /// Status or stage change violates the lifecycle.
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Session token failed verification.
    #[error("Invalid session: {0}")]
    InvalidSession(#[from] SessionError),

    /// Repository backend failure.
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl From<WorkflowError> for ViolationError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::InvalidTransition { from, to, .. } => {
                ViolationError::InvalidTransition { from, to }
            }
            WorkflowError::PermissionDenied { role, action } => {
                ViolationError::PermissionDenied { role, action }
            }
            WorkflowError::UnknownStatus { value, .. } => ViolationError::Validation {
                field: "status",
                reason: format!("unknown status '{}'", value),
            },
        }
    }
}

/// Result type for violation operations.
pub type ViolationResult<T> = Result<T, ViolationError>;
