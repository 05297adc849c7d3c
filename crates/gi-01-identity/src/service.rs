//! Identity Service - account management and session issuance

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::adapters::InMemoryUserRepository;
use crate::domain::{
    CredentialHash, IdentityError, IdentityResult, NewUser, User, UserStatus, UserView,
    DEFAULT_HASH_ROUNDS, SALT_LEN,
};
use crate::ports::inbound::IdentityApi;
use crate::ports::outbound::{TimeSource, UserRepository};
use gi_02_workflow::{require, Action};
use shared_types::{
    EventKind, EventPublisher, PortalEvent, Principal, RepositoryError, Session, SessionError,
    SessionSigner, UserId,
};

/// Identity store configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Credential stretching rounds for new accounts.
    pub hash_rounds: u32,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            hash_rounds: DEFAULT_HASH_ROUNDS,
        }
    }
}

/// Serializable copy of the identity store, credential hashes included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySnapshot {
    pub users: Vec<User>,
    pub last_id: u64,
}

/// Identity store.
pub struct IdentityService<R, T, P>
where
    R: UserRepository,
    T: TimeSource,
    P: EventPublisher,
{
    config: IdentityConfig,
    repo: RwLock<R>,
    clock: T,
    signer: SessionSigner,
    publisher: P,
    /// Verified against on unknown handles so a miss costs the same as a hit.
    decoy: CredentialHash,
}

impl<R, T, P> IdentityService<R, T, P>
where
    R: UserRepository,
    T: TimeSource,
    P: EventPublisher,
{
    pub fn new(
        config: IdentityConfig,
        repo: R,
        clock: T,
        signer: SessionSigner,
        publisher: P,
    ) -> Self {
        let decoy = CredentialHash::with_salt("", [0u8; SALT_LEN], config.hash_rounds);
        Self {
            config,
            repo: RwLock::new(repo),
            clock,
            signer,
            publisher,
            decoy,
        }
    }

    /// Signer shared with the other stores.
    pub fn signer(&self) -> &SessionSigner {
        &self.signer
    }

    /// Creates an account without a session.
    ///
    /// Used to bootstrap the first administrator and demo accounts.
    pub fn seed_user(&self, fields: NewUser) -> IdentityResult<UserId> {
        self.insert_user(&fields, "system")
    }

    /// Number of active accounts holding `role`.
    pub fn count_active(&self, role: Option<shared_types::Role>) -> IdentityResult<usize> {
        let users = self.repo.read().list()?;
        Ok(users
            .iter()
            .filter(|u| u.is_active() && role.map_or(true, |r| u.role == r))
            .count())
    }

    /// Total number of accounts.
    pub fn count_users(&self) -> IdentityResult<usize> {
        Ok(self.repo.read().list()?.len())
    }

    fn insert_user(&self, fields: &NewUser, actor: &str) -> IdentityResult<UserId> {
        let role = fields.validate()?;
        let handle = fields.handle.trim().to_string();

        // Hash outside the write guard.
        let credential = CredentialHash::generate(&fields.secret, self.config.hash_rounds);
        let now = self.clock.now();

        let id = {
            let mut repo = self.repo.write();
            if repo.find_by_handle(&handle)?.is_some() {
                warn!("[gi-01] Rejecting duplicate handle {}", handle);
                return Err(IdentityError::DuplicateHandle { handle });
            }
            let id = repo.next_id()?;
            let user = User {
                id,
                handle: handle.clone(),
                credential,
                role,
                name: fields.name.trim().to_string(),
                organization: fields.organization.trim().to_string(),
                status: UserStatus::Active,
                created_at: now,
            };
            repo.insert(user).map_err(|e| match e {
                RepositoryError::Conflict(_) => IdentityError::DuplicateHandle {
                    handle: handle.clone(),
                },
                other => IdentityError::Storage(other),
            })?;
            id
        };

        info!("[gi-01] Created user {} ({}) as {}", id, handle, role);
        self.publish(PortalEvent {
            kind: EventKind::UserCreated,
            subject_id: id.to_string(),
            message: format!("User {} created with role {}", handle, role),
            actor: actor.to_string(),
            timestamp: now,
        });
        Ok(id)
    }

    fn require_admin(&self, session: &Session) -> IdentityResult<Principal> {
        let principal = self.verify_session(session)?;
        if let Err(e) = require(principal.role, Action::ManageUsers) {
            warn!("[gi-01] {} denied user management", principal.handle);
            return Err(e.into());
        }
        Ok(principal)
    }

    fn publish(&self, event: PortalEvent) {
        if let Err(e) = self.publisher.publish(event) {
            warn!("[gi-01] Failed to publish event: {}", e);
        }
    }
}

impl<T, P> IdentityService<InMemoryUserRepository, T, P>
where
    T: TimeSource,
    P: EventPublisher,
{
    /// Copies every account and the id sequence.
    pub fn snapshot(&self) -> IdentitySnapshot {
        let repo = self.repo.read();
        IdentitySnapshot {
            users: repo.list().unwrap_or_default(),
            last_id: repo.last_id(),
        }
    }

    /// Rebuilds the store from a snapshot.
    pub fn restore(
        config: IdentityConfig,
        snapshot: IdentitySnapshot,
        clock: T,
        signer: SessionSigner,
        publisher: P,
    ) -> IdentityResult<Self> {
        let disabled: Vec<UserId> = snapshot
            .users
            .iter()
            .filter(|user| !user.is_active())
            .map(|user| user.id)
            .collect();
        let repo = InMemoryUserRepository::from_parts(snapshot.users, snapshot.last_id)?;
        for user_id in &disabled {
            signer.revoke(*user_id);
        }
        info!(
            "[gi-01] Restored {} users ({} disabled)",
            repo.len(),
            disabled.len()
        );
        Ok(Self::new(config, repo, clock, signer, publisher))
    }
}

impl<R, T, P> IdentityApi for IdentityService<R, T, P>
where
    R: UserRepository,
    T: TimeSource,
    P: EventPublisher,
{
    fn authenticate(&self, handle: &str, secret: &str) -> IdentityResult<Session> {
        let user = self.repo.read().find_by_handle(handle.trim())?;

        let user = match user {
            Some(user) => user,
            None => {
                let _ = self.decoy.verify(secret);
                warn!("[gi-01] Login failed for unknown handle");
                return Err(IdentityError::InvalidCredentials);
            }
        };

        if !user.credential.verify(secret) {
            warn!("[gi-01] Login failed for {}", user.handle);
            return Err(IdentityError::InvalidCredentials);
        }

        if !user.is_active() {
            warn!("[gi-01] Login refused for disabled account {}", user.handle);
            return Err(IdentityError::AccountDisabled {
                handle: user.handle,
            });
        }

        let session = self.signer.issue(user.principal(), self.clock.now());
        info!("[gi-01] {} signed in as {}", user.handle, user.role);
        Ok(session)
    }

    fn create_user(&self, session: &Session, fields: NewUser) -> IdentityResult<UserId> {
        let admin = self.require_admin(session)?;
        self.insert_user(&fields, &admin.handle)
    }

    fn set_status(
        &self,
        session: &Session,
        user_id: UserId,
        status: UserStatus,
    ) -> IdentityResult<()> {
        let admin = self.require_admin(session)?;

        let handle = {
            let mut repo = self.repo.write();
            let mut user = repo
                .get(user_id)?
                .ok_or(IdentityError::NotFound { user_id })?;
            if user.status == status {
                debug!("[gi-01] User {} already {}", user_id, status);
                return Ok(());
            }
            user.status = status;
            let handle = user.handle.clone();
            repo.update(user)?;
            match status {
                UserStatus::Disabled => self.signer.revoke(user_id),
                UserStatus::Active => self.signer.reinstate(user_id),
            }
            handle
        };

        info!("[gi-01] User {} ({}) is now {}", user_id, handle, status);
        self.publish(PortalEvent {
            kind: EventKind::UserStatusChanged,
            subject_id: user_id.to_string(),
            message: format!("User {} {}", handle, status),
            actor: admin.handle,
            timestamp: self.clock.now(),
        });
        Ok(())
    }

    fn list_users(&self, session: &Session) -> IdentityResult<Vec<UserView>> {
        self.require_admin(session)?;
        let users = self.repo.read().list()?;
        debug!("[gi-01] Listing {} users", users.len());
        Ok(users.iter().map(User::view).collect())
    }

    fn verify_session(&self, session: &Session) -> IdentityResult<Principal> {
        let principal = match self.signer.verify(session, self.clock.now()) {
            Ok(principal) => principal,
            // Tag is already checked; the account record decides below.
            Err(SessionError::Revoked { .. }) => session.principal(),
            Err(e) => return Err(e.into()),
        };

        let user = self
            .repo
            .read()
            .get(principal.user_id)?
            .ok_or(IdentityError::NotFound {
                user_id: principal.user_id,
            })?;
        if !user.is_active() {
            return Err(IdentityError::AccountDisabled {
                handle: user.handle,
            });
        }
        Ok(principal.clone())
    }
}
