//! Violation Service - reports and the prosecution workflow

use std::collections::HashSet;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::adapters::InMemoryViolationRepository;
use crate::domain::{NewViolation, Violation, ViolationError, ViolationId, ViolationResult};
use crate::ports::inbound::ViolationApi;
use crate::ports::outbound::{TimeSource, ViolationRepository};
use gi_02_workflow::{can_view_owned, require, Action, ProsecutionStage};
use shared_types::{
    EventKind, EventPublisher, PortalEvent, Principal, RepositoryError, Session, SessionSigner,
};

/// Serializable copy of the violation store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationSnapshot {
    pub violations: Vec<Violation>,
    pub last_sequence: u32,
}

/// Violation store.
pub struct ViolationService<R, T, P>
where
    R: ViolationRepository,
    T: TimeSource,
    P: EventPublisher,
{
    repo: RwLock<R>,
    clock: T,
    signer: SessionSigner,
    publisher: P,
}

impl<R, T, P> ViolationService<R, T, P>
where
    R: ViolationRepository,
    T: TimeSource,
    P: EventPublisher,
{
    pub fn new(repo: R, clock: T, signer: SessionSigner, publisher: P) -> Self {
        Self {
            repo: RwLock::new(repo),
            clock,
            signer,
            publisher,
        }
    }

    /// Inserts pre-built records (demo data, migrations).
    ///
    /// All-or-nothing: every record is checked before the first insert.
    pub fn import(&self, violations: Vec<Violation>) -> ViolationResult<usize> {
        let mut repo = self.repo.write();
        let mut seen = HashSet::with_capacity(violations.len());
        for violation in &violations {
            violation.check_invariants()?;
            if !seen.insert(violation.id) || repo.get(violation.id)?.is_some() {
                warn!("[gi-04] Import rejected: duplicate {}", violation.id);
                return Err(RepositoryError::Conflict(violation.id.to_string()).into());
            }
        }

        let count = violations.len();
        for violation in violations {
            repo.insert(violation)?;
        }
        info!("[gi-04] Imported {} violations", count);
        Ok(count)
    }

    fn principal<'a>(&self, session: &'a Session) -> ViolationResult<&'a Principal> {
        self.signer
            .verify(session, self.clock.now())
            .map_err(|e| {
                warn!("[gi-04] Rejecting session: {}", e);
                ViolationError::from(e)
            })
    }

    fn ensure_visible(&self, principal: &Principal, reporter: &str) -> ViolationResult<()> {
        if can_view_owned(principal.role, &principal.handle, reporter) {
            Ok(())
        } else {
            warn!(
                "[gi-04] {} denied access to reports of {}",
                principal.handle, reporter
            );
            Err(ViolationError::PermissionDenied {
                role: principal.role,
                action: Action::ViewAll,
            })
        }
    }

    /// Runs a prosecution command against one record under the write guard.
    ///
    /// Lookup comes first, then the role check, then `apply`. The record
    /// is written back only when `apply` succeeds.
    fn prosecute<F, O>(&self, principal: &Principal, id: ViolationId, apply: F) -> ViolationResult<O>
    where
        F: FnOnce(&mut Violation) -> ViolationResult<O>,
    {
        let mut repo = self.repo.write();
        let mut violation = repo.get(id)?.ok_or(ViolationError::NotFound { id })?;

        if let Err(e) = require(principal.role, Action::Prosecute) {
            warn!("[gi-04] {} denied prosecution of {}", principal.handle, id);
            return Err(e.into());
        }

        let out = apply(&mut violation).map_err(|e| {
            warn!("[gi-04] Rejected command on {}: {}", id, e);
            e
        })?;
        repo.update(violation)?;
        Ok(out)
    }

    fn publish(&self, kind: EventKind, id: ViolationId, message: String, actor: &str) {
        let event = PortalEvent {
            kind,
            subject_id: id.to_string(),
            message,
            actor: actor.to_string(),
            timestamp: self.clock.now(),
        };
        if let Err(e) = self.publisher.publish(event) {
            warn!("[gi-04] Failed to publish event: {}", e);
        }
    }
}

impl<T, P> ViolationService<InMemoryViolationRepository, T, P>
where
    T: TimeSource,
    P: EventPublisher,
{
    /// Copies every report and the id sequence.
    pub fn snapshot(&self) -> ViolationSnapshot {
        let repo = self.repo.read();
        ViolationSnapshot {
            violations: repo.list().unwrap_or_default(),
            last_sequence: repo.last_sequence(),
        }
    }

    /// Rebuilds the store from a snapshot.
    pub fn restore(
        snapshot: ViolationSnapshot,
        clock: T,
        signer: SessionSigner,
        publisher: P,
    ) -> ViolationResult<Self> {
        for violation in &snapshot.violations {
            violation.check_invariants()?;
        }
        let repo =
            InMemoryViolationRepository::from_parts(snapshot.violations, snapshot.last_sequence)?;
        info!("[gi-04] Restored {} violations", repo.len());
        Ok(Self::new(repo, clock, signer, publisher))
    }
}

impl<R, T, P> ViolationApi for ViolationService<R, T, P>
where
    R: ViolationRepository,
    T: TimeSource,
    P: EventPublisher,
{
    fn report(&self, session: &Session, fields: NewViolation) -> ViolationResult<ViolationId> {
        let principal = self.principal(session)?;
        require(principal.role, Action::ReportViolation)?;
        fields.validate()?;

        let now = self.clock.now();
        let (id, violator) = {
            let mut repo = self.repo.write();
            let id = repo.next_id()?;
            let violation = fields.into_violation(id, principal, now)?;
            let violator = violation.violator_company.clone();
            repo.insert(violation)?;
            (id, violator)
        };

        info!("[gi-04] {} reported {} against {}", principal.handle, id, violator);
        self.publish(
            EventKind::ViolationReported,
            id,
            format!("Violation {} reported against {}", id, violator),
            &principal.handle,
        );
        Ok(id)
    }

    fn list_all(&self, session: &Session) -> ViolationResult<Vec<Violation>> {
        let principal = self.principal(session)?;
        if let Err(e) = require(principal.role, Action::ViewAll) {
            warn!("[gi-04] {} denied full listing", principal.handle);
            return Err(e.into());
        }
        let violations = self.repo.read().list()?;
        debug!("[gi-04] Listing {} violations", violations.len());
        Ok(violations)
    }

    fn list_owned(
        &self,
        session: &Session,
        reporter_handle: &str,
    ) -> ViolationResult<Vec<Violation>> {
        let principal = self.principal(session)?;
        self.ensure_visible(principal, reporter_handle)?;
        let violations = self.repo.read().list_by_reporter(reporter_handle)?;
        debug!(
            "[gi-04] Listing {} violations of {}",
            violations.len(),
            reporter_handle
        );
        Ok(violations)
    }

    fn assign_investigation(
        &self,
        session: &Session,
        id: ViolationId,
        note: &str,
    ) -> ViolationResult<()> {
        let principal = self.principal(session)?;
        self.prosecute(principal, id, |v| v.assign_investigation(note))?;

        info!("[gi-04] {} assigned investigation of {}", principal.handle, id);
        self.publish(
            EventKind::InvestigationAssigned,
            id,
            format!("Investigation assigned for {}", id),
            &principal.handle,
        );
        Ok(())
    }

    fn initiate_prosecution(
        &self,
        session: &Session,
        id: ViolationId,
        rationale: &str,
    ) -> ViolationResult<()> {
        let principal = self.principal(session)?;
        self.prosecute(principal, id, |v| v.initiate_prosecution(rationale))?;

        info!("[gi-04] {} initiated prosecution of {}", principal.handle, id);
        self.publish(
            EventKind::ProsecutionInitiated,
            id,
            format!("Legal notice served for {}", id),
            &principal.handle,
        );
        Ok(())
    }

    fn advance_prosecution(
        &self,
        session: &Session,
        id: ViolationId,
        note: &str,
    ) -> ViolationResult<ProsecutionStage> {
        let principal = self.principal(session)?;
        let stage = self.prosecute(principal, id, |v| v.advance_prosecution(note))?;

        info!("[gi-04] {} advanced {} to {}", principal.handle, id, stage);
        self.publish(
            EventKind::ProsecutionAdvanced,
            id,
            format!("Prosecution of {} at stage: {}", id, stage.label()),
            &principal.handle,
        );
        Ok(stage)
    }

    fn get(&self, session: &Session, id: ViolationId) -> ViolationResult<Violation> {
        let principal = self.principal(session)?;
        let violation = self
            .repo
            .read()
            .get(id)?
            .ok_or(ViolationError::NotFound { id })?;
        self.ensure_visible(principal, &violation.reporter_handle)?;
        Ok(violation)
    }
}
