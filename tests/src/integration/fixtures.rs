//! Shared fixtures: a seeded container on a manual clock.

use std::sync::Arc;

use gi_01_identity::IdentityApi;
use portal_runtime::seed::seed_demo;
use portal_runtime::{PortalConfig, StoreContainer};
use shared_types::{ManualTimeSource, Session};

/// Clock start: 2024-10-04T00:00:00Z.
pub const START: u64 = 1_728_000_000_000;

pub const ADMIN: (&str, &str) = ("admin@gi-yatra.com", "admin123");
pub const UDUPI: (&str, &str) = ("udupi@association.com", "udupi123");
pub const MYSORE: (&str, &str) = ("mysore@association.com", "mysore123");
pub const OFFICER: (&str, &str) = ("officer@giboard.gov.in", "officer123");

/// Seeded stores plus a handle on their clock.
pub struct Portal {
    pub stores: StoreContainer,
    pub clock: Arc<ManualTimeSource>,
}

impl Portal {
    pub fn seeded() -> Self {
        let clock = Arc::new(ManualTimeSource::new(START));
        let mut config = PortalConfig::default();
        config.security.hash_rounds = 16;
        config.security.session_secret = [0x42; 32];
        let stores = StoreContainer::new(config, clock.clone());
        seed_demo(&stores).expect("demo seed");
        Self { stores, clock }
    }

    pub fn login(&self, (handle, secret): (&str, &str)) -> Session {
        self.stores
            .identity
            .authenticate(handle, secret)
            .expect("demo credentials")
    }
}
