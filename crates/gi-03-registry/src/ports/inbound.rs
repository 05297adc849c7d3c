//! Driving Ports (API - Inbound)

use crate::domain::{ApplicationId, GiApplication, NewApplication, RegistryResult};
use gi_02_workflow::ApplicationStatus;
use shared_types::Session;

/// Primary registry API.
pub trait RegistryApi: Send + Sync {
    /// Files a new application owned by the session principal.
    ///
    /// # Errors
    /// - `PermissionDenied`: role may not submit
    /// - `Validation`: product name, category or district empty, or
    ///   district outside the closed list
    fn submit(&self, session: &Session, fields: NewApplication) -> RegistryResult<ApplicationId>;

    /// Every application in id order. Admin and officer only.
    fn list_all(&self, session: &Session) -> RegistryResult<Vec<GiApplication>>;

    /// Applications filed under `owner_handle`.
    ///
    /// Allowed for the owner themself and for roles that may view all.
    fn list_owned(&self, session: &Session, owner_handle: &str)
        -> RegistryResult<Vec<GiApplication>>;

    /// Moves an application to `new_status` and records the remarks.
    ///
    /// # Errors (checked in this order)
    /// - `NotFound`
    /// - `PermissionDenied`: role may not review
    /// - `InvalidTransition`: status not reachable from the current one
    /// - `SelfReview`: reviewer is the applicant
    fn review(
        &self,
        session: &Session,
        id: ApplicationId,
        new_status: ApplicationStatus,
        remarks: &str,
    ) -> RegistryResult<()>;

    /// Single application, with the same visibility rules as `list_owned`.
    fn get(&self, session: &Session, id: ApplicationId) -> RegistryResult<GiApplication>;
}
