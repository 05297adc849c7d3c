//! # Portal Runtime
//!
//! Startup and shutdown around the [`StoreContainer`].
//!
//! ## Startup Sequence
//!
//! 1. Load `data_dir/portal.json` if present, otherwise start empty
//! 2. Seed demo data into empty stores (when enabled)
//! 3. Log the dashboard figures
//!
//! ## Shutdown Sequence
//!
//! 1. Snapshot every store (when enabled)
//! 2. Write the snapshot atomically

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::container::{PortalConfig, SharedClock, StoreContainer};
use crate::dashboard::DashboardService;
use crate::seed::seed_demo;
use crate::snapshot::PortalSnapshot;

/// The portal core with its stores wired and loaded.
pub struct PortalRuntime {
    container: Arc<StoreContainer>,
    dashboard: DashboardService,
}

impl PortalRuntime {
    /// Builds the stores, restoring the last snapshot when one exists.
    pub async fn start(config: PortalConfig, clock: SharedClock) -> Result<Self> {
        info!("===========================================");
        info!("  GI Registry Portal Core v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let path = config.snapshot_path();
        let container = match PortalSnapshot::load(&path)
            .await
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?
        {
            Some(snapshot) => {
                info!("Snapshot found at {}", path.display());
                StoreContainer::restore(config, clock, snapshot)
                    .context("Failed to restore stores from snapshot")?
            }
            None => {
                info!("No snapshot found, starting with empty stores");
                StoreContainer::new(config, clock)
            }
        };

        if container.config.seed.load_demo {
            seed_demo(&container).context("Failed to seed demo data")?;
        }

        info!(
            "Stores ready: {} users ({} active associations)",
            container.identity.count_users()?,
            container
                .identity
                .count_active(Some(shared_types::Role::Association))?
        );
        info!("Data Dir: {:?}", container.config.storage.data_dir);

        let dashboard = DashboardService::new(&container);
        Ok(Self {
            container: Arc::new(container),
            dashboard,
        })
    }

    /// Persists the stores if configured to.
    pub async fn shutdown(&self) -> Result<()> {
        info!("Initiating graceful shutdown...");
        if self.container.config.storage.snapshot_on_shutdown {
            let path = self.container.config.snapshot_path();
            self.container
                .snapshot()
                .save(&path)
                .await
                .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
        }
        info!("Shutdown complete");
        Ok(())
    }

    /// Get a reference to the store container.
    pub fn container(&self) -> Arc<StoreContainer> {
        Arc::clone(&self.container)
    }

    pub fn dashboard(&self) -> &DashboardService {
        &self.dashboard
    }
}
