//! Identity store errors.

use gi_02_workflow::WorkflowError;
use shared_types::{RepositoryError, Role, SessionError, UserId};
use thiserror::Error;

/// Identity store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// No account matches the handle and secret.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Credentials matched, but the account is disabled.
    #[error("Account disabled: {handle}")]
    AccountDisabled { handle: String },

    /// Another account already uses this login handle.
    #[error("Login handle already registered: {handle}")]
    DuplicateHandle { handle: String },

    /// Role outside the closed role set.
    #[error("Invalid role: {value}")]
    InvalidRole { value: String },

    /// Required field missing or malformed.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// No account with this id.
    #[error("User not found: {user_id}")]
    NotFound { user_id: UserId },

    /// Caller's role lacks the authorization.
    #[error("Permission denied for role {role}")]
    PermissionDenied { role: Role },

    /// Session token failed verification.
    #[error("Invalid session: {0}")]
    InvalidSession(#[from] SessionError),

    /// Repository backend failure.
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),
}

impl From<WorkflowError> for IdentityError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::PermissionDenied { role, .. } => IdentityError::PermissionDenied { role },
            other => IdentityError::Validation {
                field: "status",
                reason: other.to_string(),
            },
        }
    }
}

/// Result type for identity operations.
pub type IdentityResult<T> = Result<T, IdentityError>;
