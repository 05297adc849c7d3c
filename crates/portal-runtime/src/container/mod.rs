//! # Store Container
//!
//! Central container holding the identity, registry and violation stores
//! with their shared clock, session signer and activity feed.
//!
//! ## Wiring
//!
//! - One [`SessionSigner`](shared_types::SessionSigner) is cloned into every
//!   store, so a session minted by identity verifies everywhere
//! - One clock and one activity feed are shared the same way
//! - Stores never call each other; the runtime composes them

pub mod config;
pub mod stores;

pub use config::{ConfigError, PortalConfig};
pub use stores::{IdentityStore, RegistryStore, SharedClock, StoreContainer, ViolationStore};
