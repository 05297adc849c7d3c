//! Driving Ports (API - Inbound)

use crate::domain::{NewViolation, Violation, ViolationId, ViolationResult};
use gi_02_workflow::ProsecutionStage;
use shared_types::Session;

/// Primary violation API.
pub trait ViolationApi: Send + Sync {
    /// Files a new report owned by the session principal.
    ///
    /// # Errors
    /// - `PermissionDenied`: role may not report
    /// - `Validation`: product name, violator company or violation type
    ///   empty, or type outside the closed set
    fn report(&self, session: &Session, fields: NewViolation) -> ViolationResult<ViolationId>;

    /// Every report in id order. Admin and officer only.
    fn list_all(&self, session: &Session) -> ViolationResult<Vec<Violation>>;

    /// Reports filed by `reporter_handle`.
    fn list_owned(&self, session: &Session, reporter_handle: &str)
        -> ViolationResult<Vec<Violation>>;

    /// reported → under_investigation.
    ///
    /// # Errors (checked in this order)
    /// - `NotFound`
    /// - `PermissionDenied`
    /// - `InvalidTransition`
    fn assign_investigation(
        &self,
        session: &Session,
        id: ViolationId,
        note: &str,
    ) -> ViolationResult<()>;

    /// Starts legal proceedings.
    ///
    /// # Errors (checked in this order)
    /// - `NotFound`
    /// - `PermissionDenied`
    /// - `EmptyRationale`
    /// - `AlreadyProsecuting`
    /// - `InvalidTransition`: violation already resolved
    fn initiate_prosecution(
        &self,
        session: &Session,
        id: ViolationId,
        rationale: &str,
    ) -> ViolationResult<()>;

    /// Moves an active prosecution one stage forward and returns the new stage.
    fn advance_prosecution(
        &self,
        session: &Session,
        id: ViolationId,
        note: &str,
    ) -> ViolationResult<ProsecutionStage>;

    /// Single report, with the same visibility rules as `list_owned`.
    fn get(&self, session: &Session, id: ViolationId) -> ViolationResult<Violation>;
}
