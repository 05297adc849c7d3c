//! # GI Registry Portal Core
//!
//! The main entry point for the portal core.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (from env)
//! 2. Validate session secret is not default
//! 3. Restore the last snapshot or start empty
//! 4. Seed demo data (if enabled and empty)
//! 5. Wait for Ctrl+C, then snapshot and exit

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use portal_runtime::{PortalConfig, PortalRuntime};
use shared_types::SystemTimeSource;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = PortalConfig::from_env()?;
    if let Err(e) = config.validate_for_production() {
        warn!("{}", e);
        warn!("Running with a development session key");
    }

    let runtime = PortalRuntime::start(config, Arc::new(SystemTimeSource)).await?;

    info!("Portal core is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await
}
