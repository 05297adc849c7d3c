//! # Shared Types Crate
//!
//! This crate contains the identity, session, clock and event types used by
//! every store of the GI registry portal.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Role`, `Principal` and `Session` are defined
//!   once and consumed by the identity, registry and violation stores.
//! - **Explicit Identity**: there is no ambient "current user". Every store
//!   operation receives a `Session` and derives the actor from it after
//!   verifying the token with [`SessionSigner`].
//! - **No Secrets in Sessions**: a `Principal` never carries credential data.

pub mod entities;
pub mod errors;
pub mod events;
pub mod session;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use events::*;
pub use session::*;
pub use time::*;
