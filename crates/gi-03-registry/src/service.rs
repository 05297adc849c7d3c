//! Registry Service - GI application filing and review

use std::collections::HashSet;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::adapters::InMemoryApplicationRepository;
use crate::domain::{ApplicationId, GiApplication, NewApplication, RegistryError, RegistryResult};
use crate::ports::inbound::RegistryApi;
use crate::ports::outbound::{ApplicationRepository, TimeSource};
use gi_02_workflow::{can_view_owned, check_transition, require, Action, ApplicationStatus};
use shared_types::{
    EventKind, EventPublisher, PortalEvent, Principal, RepositoryError, Session, SessionSigner,
};

/// Serializable copy of the registry store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub applications: Vec<GiApplication>,
    pub last_sequence: u32,
}

/// Registry store.
///
/// Every mutation runs under one write guard, so id allocation and status
/// transitions are atomic with respect to each other.
pub struct RegistryService<R, T, P>
where
    R: ApplicationRepository,
    T: TimeSource,
    P: EventPublisher,
{
    repo: RwLock<R>,
    clock: T,
    signer: SessionSigner,
    publisher: P,
}

impl<R, T, P> RegistryService<R, T, P>
where
    R: ApplicationRepository,
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
    /// The whole batch is checked first; a rejected batch leaves the store
    /// untouched.
    pub fn import(&self, applications: Vec<GiApplication>) -> RegistryResult<usize> {
        let mut repo = self.repo.write();
        let mut seen = HashSet::with_capacity(applications.len());
        for application in &applications {
            application.check_invariants()?;
            if !seen.insert(application.id) || repo.get(application.id)?.is_some() {
                warn!("[gi-03] Import rejected: duplicate {}", application.id);
                return Err(RepositoryError::Conflict(application.id.to_string()).into());
            }
        }

        let count = applications.len();
        for application in applications {
            repo.insert(application)?;
        }
        info!("[gi-03] Imported {} applications", count);
        Ok(count)
    }

    fn principal<'a>(&self, session: &'a Session) -> RegistryResult<&'a Principal> {
        self.signer
            .verify(session, self.clock.now())
            .map_err(|e| {
                warn!("[gi-03] Rejecting session: {}", e);
                RegistryError::from(e)
            })
    }

    fn ensure_visible(&self, principal: &Principal, owner: &str) -> RegistryResult<()> {
        if can_view_owned(principal.role, &principal.handle, owner) {
            Ok(())
        } else {
            warn!(
                "[gi-03] {} denied access to applications of {}",
                principal.handle, owner
            );
            Err(RegistryError::PermissionDenied {
                role: principal.role,
                action: Action::ViewAll,
            })
        }
    }

    fn publish(&self, event: PortalEvent) {
        if let Err(e) = self.publisher.publish(event) {
            warn!("[gi-03] Failed to publish event: {}", e);
        }
    }
}

impl<T, P> RegistryService<InMemoryApplicationRepository, T, P>
where
    T: TimeSource,
    P: EventPublisher,
{
    /// Copies every application and the id sequence.
    pub fn snapshot(&self) -> RegistrySnapshot {
        let repo = self.repo.read();
        RegistrySnapshot {
            applications: repo.list().unwrap_or_default(),
            last_sequence: repo.last_sequence(),
        }
    }

    /// Rebuilds the store from a snapshot.
    pub fn restore(
        snapshot: RegistrySnapshot,
        clock: T,
        signer: SessionSigner,
        publisher: P,
    ) -> RegistryResult<Self> {
        for application in &snapshot.applications {
            application.check_invariants()?;
        }
        let repo =
            InMemoryApplicationRepository::from_parts(snapshot.applications, snapshot.last_sequence)?;
        info!("[gi-03] Restored {} applications", repo.len());
        Ok(Self::new(repo, clock, signer, publisher))
    }
}

impl<R, T, P> RegistryApi for RegistryService<R, T, P>
where
    R: ApplicationRepository,
    T: TimeSource,
    P: EventPublisher,
{
    fn submit(&self, session: &Session, fields: NewApplication) -> RegistryResult<ApplicationId> {
        let principal = self.principal(session)?;
        require(principal.role, Action::SubmitApplication)?;
        fields.validate()?;

        let now = self.clock.now();
        let (id, product) = {
            let mut repo = self.repo.write();
            let id = repo.next_id()?;
            let application = fields.into_application(id, principal, now)?;
            let product = application.product_name.clone();
            repo.insert(application)?;
            (id, product)
        };

        info!("[gi-03] {} filed {} ({})", principal.handle, id, product);
        self.publish(PortalEvent {
            kind: EventKind::ApplicationSubmitted,
            subject_id: id.to_string(),
            message: format!("GI application {} submitted for {}", id, product),
            actor: principal.handle.clone(),
            timestamp: now,
        });
        Ok(id)
    }

    fn list_all(&self, session: &Session) -> RegistryResult<Vec<GiApplication>> {
        let principal = self.principal(session)?;
        if let Err(e) = require(principal.role, Action::ViewAll) {
            warn!("[gi-03] {} denied full listing", principal.handle);
            return Err(e.into());
        }
        let applications = self.repo.read().list()?;
        debug!("[gi-03] Listing {} applications", applications.len());
        Ok(applications)
    }

    fn list_owned(
        &self,
        session: &Session,
        owner_handle: &str,
    ) -> RegistryResult<Vec<GiApplication>> {
        let principal = self.principal(session)?;
        self.ensure_visible(principal, owner_handle)?;
        let applications = self.repo.read().list_by_owner(owner_handle)?;
        debug!(
            "[gi-03] Listing {} applications of {}",
            applications.len(),
            owner_handle
        );
        Ok(applications)
    }

    fn review(
        &self,
        session: &Session,
        id: ApplicationId,
        new_status: ApplicationStatus,
        remarks: &str,
    ) -> RegistryResult<()> {
        let principal = self.principal(session)?;

        let previous = {
            let mut repo = self.repo.write();
            let mut application = repo.get(id)?.ok_or(RegistryError::NotFound { id })?;

            require(principal.role, Action::ReviewApplication)?;
            check_transition(application.status, new_status)?;
            if application.applicant_handle == principal.handle {
                return Err(RegistryError::SelfReview {
                    id,
                    handle: principal.handle.clone(),
                });
            }

            let previous = application.status;
            application.status = new_status;
            application.remarks = remarks.trim().to_string();
            application.reviewed_by = Some(principal.handle.clone());
            repo.update(application)?;
            previous
        };

        info!(
            "[gi-03] {} moved {} from {} to {}",
            principal.handle, id, previous, new_status
        );
        self.publish(PortalEvent {
            kind: EventKind::ApplicationReviewed,
            subject_id: id.to_string(),
            message: format!("GI application {} marked {}", id, new_status),
            actor: principal.handle.clone(),
            timestamp: self.clock.now(),
        });
        Ok(())
    }

    fn get(&self, session: &Session, id: ApplicationId) -> RegistryResult<GiApplication> {
        let principal = self.principal(session)?;
        let application = self
            .repo
            .read()
            .get(id)?
            .ok_or(RegistryError::NotFound { id })?;
        self.ensure_visible(principal, &application.applicant_handle)?;
        Ok(application)
    }
}
