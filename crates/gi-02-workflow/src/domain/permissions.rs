//! Role-based authorization.
//!
//! Table-driven: each role maps to the set of actions it may perform.

use serde::{Deserialize, Serialize};
use shared_types::Role;
use std::fmt;

use super::errors::WorkflowError;

/// Commands gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// File a GI application.
    SubmitApplication,
    /// Report a product violation.
    ReportViolation,
    /// See records one filed oneself.
    ViewOwn,
    /// See every record in a store.
    ViewAll,
    /// Change an application's review status.
    ReviewApplication,
    /// Assign investigations and drive prosecutions.
    Prosecute,
    /// Create accounts and change their status.
    ManageUsers,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Action::SubmitApplication => "submit applications",
            Action::ReportViolation => "report violations",
            Action::ViewOwn => "view own records",
            Action::ViewAll => "view all records",
            Action::ReviewApplication => "review applications",
            Action::Prosecute => "prosecute violations",
            Action::ManageUsers => "manage users",
        })
    }
}

const ADMIN_ACTIONS: &[Action] = &[
    Action::SubmitApplication,
    Action::ReportViolation,
    Action::ViewOwn,
    Action::ViewAll,
    Action::ReviewApplication,
    Action::Prosecute,
    Action::ManageUsers,
];

const OFFICER_ACTIONS: &[Action] = &[
    Action::ReviewApplication,
    Action::Prosecute,
    Action::ViewAll,
];

const ASSOCIATION_ACTIONS: &[Action] = &[
    Action::SubmitApplication,
    Action::ReportViolation,
    Action::ViewOwn,
];

/// Actions granted to `role`.
pub fn permitted_actions(role: Role) -> &'static [Action] {
    match role {
        Role::Admin => ADMIN_ACTIONS,
        Role::Officer => OFFICER_ACTIONS,
        Role::Association => ASSOCIATION_ACTIONS,
    }
}

/// Whether `role` may perform `action`.
pub fn authorize(role: Role, action: Action) -> bool {
    permitted_actions(role).contains(&action)
}

/// Like [`authorize`], but returns a typed error on rejection.
pub fn require(role: Role, action: Action) -> Result<(), WorkflowError> {
    if authorize(role, action) {
        Ok(())
    } else {
        Err(WorkflowError::PermissionDenied { role, action })
    }
}

/// Whether `role`, acting as `actor_handle`, may read records owned by `owner_handle`.
pub fn can_view_owned(role: Role, actor_handle: &str, owner_handle: &str) -> bool {
    authorize(role, Action::ViewAll)
        || (actor_handle == owner_handle && authorize(role, Action::ViewOwn))
}
