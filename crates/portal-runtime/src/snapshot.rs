//! # Portal Snapshot
//!
//! JSON copy of every store, written on graceful shutdown and read back on
//! start. Saving goes through a temporary file and a rename so a crash
//! mid-write never leaves a truncated snapshot behind.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use gi_01_identity::{IdentityError, IdentitySnapshot};
use gi_03_registry::{RegistryError, RegistrySnapshot};
use gi_04_violations::{ViolationError, ViolationSnapshot};
use shared_types::Timestamp;

/// Current snapshot format. Version 2 stores PBKDF2 credential digests.
pub const SNAPSHOT_VERSION: u32 = 2;

/// Serializable copy of the whole portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalSnapshot {
    pub version: u32,
    pub saved_at: Timestamp,
    pub identity: IdentitySnapshot,
    pub registry: RegistrySnapshot,
    pub violations: ViolationSnapshot,
}

/// Snapshot errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Identity restore failed: {0}")]
    Identity(#[from] IdentityError),

    #[error("Registry restore failed: {0}")]
    Registry(#[from] RegistryError),

    #[error("Violation restore failed: {0}")]
    Violation(#[from] ViolationError),
}

impl PortalSnapshot {
    /// Writes the snapshot atomically.
    pub async fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        info!(
            "Saved snapshot to {} ({} users, {} applications, {} violations)",
            path.display(),
            self.identity.users.len(),
            self.registry.applications.len(),
            self.violations.violations.len()
        );
        Ok(())
    }

    /// Reads a snapshot, or `None` when the file does not exist.
    pub async fn load(path: &Path) -> Result<Option<Self>, SnapshotError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No snapshot at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let snapshot: Self = serde_json::from_slice(&bytes)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        Ok(Some(snapshot))
    }
}
