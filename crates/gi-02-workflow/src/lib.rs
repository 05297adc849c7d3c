//! # Workflow Engine
//!
//! Shared, stateless rules used by the registry and violation stores.
//!
//! ## Purpose
//!
//! Owns the single source of truth for:
//! - which status changes are legal for each record kind, and
//! - which roles may perform which actions.
//!
//! Stores call into the engine *before* mutating anything, so a rejected
//! command always leaves the record untouched.
//!
//! ## Lifecycles
//!
//! ```text
//! Application:  [SUBMITTED] ──→ [UNDER_REVIEW] ──→ [APPROVED] | [REJECTED]
//!                    └──────────────────────────────↗
//!
//! Violation:    [REPORTED] ──→ [UNDER_INVESTIGATION] ──→ [PROSECUTION_INITIATED] ──→ [RESOLVED]
//!
//! Prosecution:  pending → investigation_assigned → evidence_review
//!                     → notice_served → court_proceedings → resolved
//!               (plus the named ServeLegalNotice jump to notice_served)
//! ```
//!
//! ## Permission Matrix
//!
//! | Action | admin | officer | association |
//! |--------|-------|---------|-------------|
//! | `SubmitApplication` | ✓ | | ✓ |
//! | `ReportViolation` | ✓ | | ✓ |
//! | `ViewOwn` | ✓ | | ✓ |
//! | `ViewAll` | ✓ | ✓ | |
//! | `ReviewApplication` | ✓ | ✓ | |
//! | `Prosecute` | ✓ | ✓ | |
//! | `ManageUsers` | ✓ | | |

pub mod domain;

pub use domain::*;
