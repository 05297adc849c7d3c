//! # Portal Configuration
//!
//! Unified configuration for the stores and the runtime.
//!
//! ## Security Requirements
//!
//! - `session_secret` MUST NOT be the default zero value in production
//! - Every value has a development default and an environment override

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use gi_01_identity::DEFAULT_HASH_ROUNDS;
use shared_types::DEFAULT_SESSION_TTL;

/// Environment variable holding the hex-encoded 32-byte session key.
pub const ENV_SESSION_SECRET: &str = "GI_SESSION_SECRET";
/// Environment variable holding the session lifetime in seconds.
pub const ENV_SESSION_TTL_SECS: &str = "GI_SESSION_TTL_SECS";
/// Environment variable holding the credential stretching rounds.
pub const ENV_HASH_ROUNDS: &str = "GI_HASH_ROUNDS";
/// Environment variable holding the data directory.
pub const ENV_DATA_DIR: &str = "GI_DATA_DIR";
/// Environment variable toggling the demo seed (`true`/`false`).
pub const ENV_SEED_DEMO: &str = "GI_SEED_DEMO";

/// Complete portal configuration.
#[derive(Debug, Clone, Default)]
pub struct PortalConfig {
    /// Session signing and credential hashing.
    pub security: SecurityConfig,
    /// Snapshot and upload locations.
    pub storage: StorageConfig,
    /// Demo data.
    pub seed: SeedConfig,
    /// Recent-activity feed.
    pub activity: ActivityConfig,
}

impl PortalConfig {
    /// Defaults overridden by the `GI_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `GI_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(secret_hex) = lookup(ENV_SESSION_SECRET) {
            let bytes = hex::decode(secret_hex.trim()).map_err(|e| ConfigError::InvalidValue {
                var: ENV_SESSION_SECRET,
                reason: e.to_string(),
            })?;
            if bytes.len() != 32 {
                return Err(ConfigError::InvalidValue {
                    var: ENV_SESSION_SECRET,
                    reason: format!("expected 32 bytes (64 hex chars), got {}", bytes.len()),
                });
            }
            config.security.session_secret.copy_from_slice(&bytes);
        }

        if let Some(ttl) = lookup(ENV_SESSION_TTL_SECS) {
            config.security.session_ttl_secs = parse(ENV_SESSION_TTL_SECS, &ttl)?;
            if config.security.session_ttl_secs == 0 {
                return Err(ConfigError::InvalidValue {
                    var: ENV_SESSION_TTL_SECS,
                    reason: "must be positive".into(),
                });
            }
        }

        if let Some(rounds) = lookup(ENV_HASH_ROUNDS) {
            config.security.hash_rounds = parse(ENV_HASH_ROUNDS, &rounds)?;
            if config.security.hash_rounds == 0 {
                return Err(ConfigError::InvalidValue {
                    var: ENV_HASH_ROUNDS,
                    reason: "must be positive".into(),
                });
            }
        }

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            config.storage.data_dir = PathBuf::from(dir);
        }

        if let Some(flag) = lookup(ENV_SEED_DEMO) {
            config.seed.load_demo = parse(ENV_SEED_DEMO, &flag)?;
        }

        Ok(config)
    }

    /// Validate configuration for production readiness.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the session secret is the default zero value
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        if self.security.session_secret == [0u8; 32] {
            return Err(ConfigError::InsecureSessionSecret);
        }
        Ok(())
    }

    /// Path of the JSON snapshot.
    pub fn snapshot_path(&self) -> PathBuf {
        self.storage.data_dir.join("portal.json")
    }

    /// Directory receiving uploaded files.
    pub fn upload_dir(&self) -> PathBuf {
        self.storage.data_dir.join("uploads")
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            var,
            reason: e.to_string(),
        })
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Session secret is not set (zero value).
    #[error(
        "SECURITY VIOLATION: session secret is default zero value. \
         Set {} environment variable.",
        ENV_SESSION_SECRET
    )]
    InsecureSessionSecret,

    /// An environment override could not be parsed.
    #[error("Invalid {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

/// Security configuration.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// HMAC key for session tokens (32 bytes).
    /// MUST NOT be default in production.
    pub session_secret: [u8; 32],
    /// Session lifetime in seconds.
    pub session_ttl_secs: u64,
    /// Credential stretching rounds.
    pub hash_rounds: u32,
}

impl SecurityConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            session_secret: [0u8; 32], // MUST be overridden in production
            session_ttl_secs: DEFAULT_SESSION_TTL.as_secs(),
            hash_rounds: DEFAULT_HASH_ROUNDS,
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding `portal.json` and `uploads/`.
    pub data_dir: PathBuf,
    /// Write a snapshot on graceful shutdown.
    pub snapshot_on_shutdown: bool,
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            snapshot_on_shutdown: true,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Demo data configuration.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// Load the demo users, applications and violations into empty stores.
    pub load_demo: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { load_demo: true }
    }
}

/// Activity feed configuration.
#[derive(Debug, Clone)]
pub struct ActivityConfig {
    /// Events kept in memory.
    pub capacity: usize,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self { capacity: 100 }
    }
}
