//! # Store Container
//!
//! Builds the three stores from a [`PortalConfig`], either empty or from a
//! [`PortalSnapshot`].
//!
//! ## Initialization Order
//!
//! ```text
//! Phase 1: Shared infrastructure (clock, signer, activity feed, uploads)
//! Phase 2: Identity store
//! Phase 3: Registry and violation stores
//! ```

use std::sync::Arc;

use tracing::{info, instrument};

use gi_01_identity::{IdentityConfig, IdentityService, InMemoryUserRepository};
use gi_03_registry::{InMemoryApplicationRepository, RegistryService};
use gi_04_violations::{InMemoryViolationRepository, ViolationService};
use shared_types::{SessionSigner, TimeSource};

use crate::adapters::{ActivityFeed, LocalUploadService};
use crate::container::config::PortalConfig;
use crate::snapshot::{PortalSnapshot, SnapshotError, SNAPSHOT_VERSION};

/// Clock shared by every store.
pub type SharedClock = Arc<dyn TimeSource>;

/// Identity store with the in-memory backend.
pub type IdentityStore = IdentityService<InMemoryUserRepository, SharedClock, Arc<ActivityFeed>>;

/// Registry store with the in-memory backend.
pub type RegistryStore =
    RegistryService<InMemoryApplicationRepository, SharedClock, Arc<ActivityFeed>>;

/// Violation store with the in-memory backend.
pub type ViolationStore =
    ViolationService<InMemoryViolationRepository, SharedClock, Arc<ActivityFeed>>;

/// Central container holding all store instances.
pub struct StoreContainer {
    /// Portal configuration (immutable after initialization).
    pub config: PortalConfig,
    pub clock: SharedClock,
    /// Recent events from every store.
    pub activity: Arc<ActivityFeed>,
    pub uploads: Arc<LocalUploadService>,
    pub identity: Arc<IdentityStore>,
    pub registry: Arc<RegistryStore>,
    pub violations: Arc<ViolationStore>,
}

impl StoreContainer {
    /// Creates empty stores.
    #[instrument(name = "store_init", skip_all)]
    pub fn new(config: PortalConfig, clock: SharedClock) -> Self {
        info!("Initializing GI portal store container");
        let (signer, activity, uploads) = Self::init_shared(&config, &clock);

        let identity = Arc::new(IdentityService::new(
            Self::identity_config(&config),
            InMemoryUserRepository::new(),
            clock.clone(),
            signer.clone(),
            activity.clone(),
        ));
        info!("  [gi-01] Identity store initialized");

        let registry = Arc::new(RegistryService::new(
            InMemoryApplicationRepository::new(),
            clock.clone(),
            signer.clone(),
            activity.clone(),
        ));
        info!("  [gi-03] Registry store initialized");

        let violations = Arc::new(ViolationService::new(
            InMemoryViolationRepository::new(),
            clock.clone(),
            signer,
            activity.clone(),
        ));
        info!("  [gi-04] Violation store initialized");

        Self {
            config,
            clock,
            activity,
            uploads,
            identity,
            registry,
            violations,
        }
    }

    /// Rebuilds every store from a snapshot.
    #[instrument(name = "store_restore", skip_all)]
    pub fn restore(
        config: PortalConfig,
        clock: SharedClock,
        snapshot: PortalSnapshot,
    ) -> Result<Self, SnapshotError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        info!(
            "Restoring GI portal store container from snapshot saved at {}",
            snapshot.saved_at
        );
        let (signer, activity, uploads) = Self::init_shared(&config, &clock);

        let identity = Arc::new(IdentityService::restore(
            Self::identity_config(&config),
            snapshot.identity,
            clock.clone(),
            signer.clone(),
            activity.clone(),
        )?);
        let registry = Arc::new(RegistryService::restore(
            snapshot.registry,
            clock.clone(),
            signer.clone(),
            activity.clone(),
        )?);
        let violations = Arc::new(ViolationService::restore(
            snapshot.violations,
            clock.clone(),
            signer,
            activity.clone(),
        )?);

        Ok(Self {
            config,
            clock,
            activity,
            uploads,
            identity,
            registry,
            violations,
        })
    }

    /// Copies every store into one snapshot.
    pub fn snapshot(&self) -> PortalSnapshot {
        PortalSnapshot {
            version: SNAPSHOT_VERSION,
            saved_at: self.clock.now(),
            identity: self.identity.snapshot(),
            registry: self.registry.snapshot(),
            violations: self.violations.snapshot(),
        }
    }

    fn init_shared(
        config: &PortalConfig,
        clock: &SharedClock,
    ) -> (SessionSigner, Arc<ActivityFeed>, Arc<LocalUploadService>) {
        let signer = SessionSigner::new(
            config.security.session_secret.to_vec(),
            config.security.session_ttl(),
        );
        let activity = Arc::new(ActivityFeed::new(config.activity.capacity));
        let uploads = Arc::new(LocalUploadService::new(
            config.upload_dir(),
            config.storage.max_upload_bytes,
            clock.clone(),
        ));
        info!(
            "  Shared infrastructure ready (session ttl={}s, activity capacity={})",
            config.security.session_ttl_secs, config.activity.capacity
        );
        (signer, activity, uploads)
    }

    fn identity_config(config: &PortalConfig) -> IdentityConfig {
        IdentityConfig {
            hash_rounds: config.security.hash_rounds,
        }
    }
}
