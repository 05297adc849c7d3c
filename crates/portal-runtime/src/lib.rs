//! # Portal Runtime Library
//!
//! Wires the identity, registry and violation stores into one running
//! portal core. The main entry point is the `main.rs` binary.
//!
//! ## Modular Structure
//!
//! - `container/` - Configuration and the store container
//! - `adapters/` - Activity feed and file-reference service
//! - `seed/` - Demo accounts, applications and violations
//! - `dashboard` - Portal-wide counters and recent activity
//! - `snapshot` - JSON persistence of every store
//! - `runtime` - Startup and shutdown
//!
//! ## Wiring
//!
//! ```text
//!                      SessionSigner (one HMAC key)
//!          ┌──────────────────┼──────────────────┐
//!          ↓                  ↓                  ↓
//!   Identity (gi-01)   Registry (gi-03)   Violations (gi-04)
//!          │                  │                  │
//!          └──── PortalEvent ─┴──── PortalEvent ─┘
//!                             ↓
//!                       ActivityFeed ──→ DashboardService
//! ```

#![allow(clippy::type_complexity)]

pub mod adapters;
pub mod container;
pub mod dashboard;
pub mod runtime;
pub mod seed;
pub mod snapshot;

pub use container::{ConfigError, PortalConfig, StoreContainer};
pub use dashboard::{DashboardError, DashboardService, DashboardStats};
pub use runtime::PortalRuntime;
pub use snapshot::{PortalSnapshot, SnapshotError};
