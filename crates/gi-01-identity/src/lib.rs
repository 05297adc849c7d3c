//! # gi-01-identity
//!
//! Identity store for the GI registry portal.
//!
//! ## Overview
//!
//! This store provides:
//! - **Accounts**: admin, association and officer users with unique handles
//! - **Credentials**: salted, stretched SHA-256 digests, never plaintext
//! - **Sessions**: HMAC-signed, time-bounded [`Session`](shared_types::Session)
//!   values handed to every other store
//!
//! ## Login Flow
//!
//! ```text
//! authenticate(handle, secret)
//!     │
//!     ├── unknown handle ──→ decoy verify ──→ InvalidCredentials
//!     ├── wrong secret (constant-time) ─────→ InvalidCredentials
//!     ├── account disabled ─────────────────→ AccountDisabled
//!     └── ok ──→ SessionSigner::issue ──→ Session
//! ```
//!
//! ## Authorization
//!
//! | Operation | Caller |
//! |-----------|--------|
//! | `authenticate` | anyone |
//! | `create_user` | admin |
//! | `set_status` | admin |
//! | `list_users` | admin |
//! | `verify_session` | any valid session |
//!
//! ## Example
//!
//! ```rust,ignore
//! use gi_01_identity::{IdentityApi, IdentityConfig, IdentityService, InMemoryUserRepository};
//!
//! let identity = IdentityService::new(
//!     IdentityConfig::default(),
//!     InMemoryUserRepository::new(),
//!     SystemTimeSource,
//!     signer,
//!     NoOpPublisher,
//! );
//! let session = identity.authenticate("admin@gi-yatra.com", "admin123")?;
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryUserRepository;
pub use domain::{
    CredentialHash, IdentityError, IdentityResult, NewUser, User, UserStatus, UserView,
    DEFAULT_HASH_ROUNDS,
};
pub use ports::{IdentityApi, UserRepository};
pub use service::{IdentityConfig, IdentityService, IdentitySnapshot};
