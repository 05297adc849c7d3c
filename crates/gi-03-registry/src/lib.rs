//! # gi-03-registry
//!
//! Registry store: GI applications and their review lifecycle.
//!
//! ## Overview
//!
//! - **Filing**: associations (and admins) submit applications; each gets the
//!   next `GI###` id, never reused
//! - **Review**: officers and admins move an application forward along the
//!   lifecycle owned by `gi_02_workflow`
//! - **Visibility**: owners see their own applications, officers and admins
//!   see everything
//!
//! ## Review Checks
//!
//! ```text
//! review(session, id, status, remarks)
//!     │
//!     ├── verify session ──────────→ InvalidSession
//!     ├── lookup id ───────────────→ NotFound
//!     ├── role may review? ────────→ PermissionDenied
//!     ├── legal transition? ───────→ InvalidTransition
//!     ├── reviewer is applicant? ──→ SelfReview
//!     └── set status, remarks, reviewer
//! ```
//!
//! A rejected command leaves the application untouched.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryApplicationRepository;
pub use domain::{
    ApplicationId, District, GiApplication, NewApplication, RegistryError, RegistryResult,
    DEFAULT_REMARKS, KNOWN_CATEGORIES,
};
pub use ports::{ApplicationRepository, RegistryApi};
pub use service::{RegistryService, RegistrySnapshot};
