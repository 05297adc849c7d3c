//! # Dashboard
//!
//! Read-only figures composed from the three stores. The stores never call
//! each other; this is the one place their data meets.
//!
//! | figure | source |
//! |--------|--------|
//! | `total_users` | every account, active or not |
//! | `active_applications` | `submitted` + `under_review` |
//! | `approved_gi_products` | `approved` |
//! | `pending_reviews` | `submitted` |
//! | `violations_reported` | every report |
//! | `prosecutions_active` | `prosecution_initiated` |
//! | `associations_connected` | active association accounts |

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use gi_01_identity::{IdentityApi, IdentityError};
use gi_02_workflow::{require, Action, ApplicationStatus, ViolationStatus, WorkflowError};
use gi_03_registry::{RegistryApi, RegistryError};
use gi_04_violations::{ViolationApi, ViolationError};
use shared_types::{PortalEvent, Principal, Role, Session};

use crate::adapters::ActivityFeed;
use crate::container::{IdentityStore, RegistryStore, StoreContainer, ViolationStore};

/// Dashboard errors.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Dashboard denied: {0}")]
    PermissionDenied(#[from] WorkflowError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Violation(#[from] ViolationError),
}

/// Portal-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: usize,
    pub active_applications: usize,
    pub approved_gi_products: usize,
    pub pending_reviews: usize,
    pub violations_reported: usize,
    pub prosecutions_active: usize,
    pub associations_connected: usize,
}

/// Dashboard queries for admins and officers.
pub struct DashboardService {
    identity: Arc<IdentityStore>,
    registry: Arc<RegistryStore>,
    violations: Arc<ViolationStore>,
    activity: Arc<ActivityFeed>,
}

impl DashboardService {
    pub fn new(container: &StoreContainer) -> Self {
        Self {
            identity: container.identity.clone(),
            registry: container.registry.clone(),
            violations: container.violations.clone(),
            activity: container.activity.clone(),
        }
    }

    /// Current counters.
    pub fn stats(&self, session: &Session) -> Result<DashboardStats, DashboardError> {
        let principal = self.authorize(session)?;

        let applications = self.registry.list_all(session)?;
        let violations = self.violations.list_all(session)?;
        let count_apps = |status: ApplicationStatus| {
            applications.iter().filter(|a| a.status == status).count()
        };

        let stats = DashboardStats {
            total_users: self.identity.count_users()?,
            active_applications: applications.iter().filter(|a| a.status.is_open()).count(),
            approved_gi_products: count_apps(ApplicationStatus::Approved),
            pending_reviews: count_apps(ApplicationStatus::Submitted),
            violations_reported: violations.len(),
            prosecutions_active: violations
                .iter()
                .filter(|v| v.status == ViolationStatus::ProsecutionInitiated)
                .count(),
            associations_connected: self.identity.count_active(Some(Role::Association))?,
        };
        debug!("[dashboard] Stats for {}: {:?}", principal.handle, stats);
        Ok(stats)
    }

    /// Newest events first, at most `limit`.
    pub fn recent_activity(
        &self,
        session: &Session,
        limit: usize,
    ) -> Result<Vec<PortalEvent>, DashboardError> {
        self.authorize(session)?;
        Ok(self.activity.recent(limit))
    }

    fn authorize(&self, session: &Session) -> Result<Principal, DashboardError> {
        let principal = self.identity.verify_session(session)?;
        if let Err(e) = require(principal.role, Action::ViewAll) {
            warn!("[dashboard] {} denied dashboard", principal.handle);
            return Err(e.into());
        }
        Ok(principal)
    }
}
