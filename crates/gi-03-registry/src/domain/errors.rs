//! Registry store errors.

use gi_02_workflow::{Action, WorkflowError};
use shared_types::{RepositoryError, Role, SessionError};
use thiserror::Error;

use super::value_objects::ApplicationId;

/// Registry store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Required field missing or malformed.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// No application with this id.
    #[error("Application not found: {id}")]
    NotFound { id: ApplicationId },

    /// Caller's role lacks the authorization.
    #[error("Permission denied: role {role} may not {action}")]
    PermissionDenied { role: Role, action: Action },

    /// Status change violates the review lifecycle.
    #[error("Invalid transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Reviewer is the applicant.
    #[error("Applicant {handle} cannot review their own application {id}")]
    SelfReview { id: ApplicationId, handle: String },

    /// Session token failed verification.
    #[error("Invalid session: {0}")]
    InvalidSession(#[from] SessionError),

    /// Repository backend failure.
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl From<WorkflowError> for RegistryError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::InvalidTransition { from, to, .. } => {
                RegistryError::InvalidTransition { from, to }
            }
            WorkflowError::PermissionDenied { role, action } => {
                RegistryError::PermissionDenied { role, action }
            }
            WorkflowError::UnknownStatus { value, .. } => RegistryError::Validation {
                field: "status",
                reason: format!("unknown status '{}'", value),
            },
        }
    }
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
