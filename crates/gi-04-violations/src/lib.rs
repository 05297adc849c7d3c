//! # gi-04-violations
//!
//! Violation store: reports of non-GI products misusing a registered
//! indication, and the legal-action workflow that follows.
//!
//! ## Overview
//!
//! - **Reporting**: associations (and admins) file reports; each gets the
//!   next `NONGI###` id
//! - **Investigation**: officers move a report to `under_investigation`
//! - **Prosecution**: officers start legal proceedings and step the case
//!   through to resolution
//!
//! ## Prosecution Stages
//!
//! ```text
//!  pending ─→ investigation_assigned ─→ evidence_review ─→ notice_served ─→ court_proceedings ─→ resolved
//!     │                                                        ↑
//!     └──────────── initiate_prosecution (ServeLegalNotice) ───┘
//! ```
//!
//! `initiate_prosecution` always lands on `notice_served`; afterwards
//! `advance_prosecution` moves one stage at a time. Reaching `resolved`
//! also resolves the violation.
//!
//! ## Status / Stage Invariant
//!
//! | status | allowed stages |
//! |--------|----------------|
//! | `reported` | `pending` |
//! | `under_investigation` | `pending` |
//! | `prosecution_initiated` | past `pending` |
//! | `resolved` | any |

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryViolationRepository;
pub use domain::{
    NewViolation, Violation, ViolationError, ViolationId, ViolationResult, ViolationType,
    INVESTIGATION_ACTION, PROSECUTION_PREFIX, REPORTED_ACTION,
};
pub use ports::{ViolationApi, ViolationRepository};
pub use service::{ViolationService, ViolationSnapshot};
