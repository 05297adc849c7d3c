//! # Domain Layer - Workflow Engine
//!
//! - `status`: status enums for applications, violations and prosecutions
//! - `transitions`: the `Lifecycle` rules and named prosecution transitions
//! - `permissions`: role/action authorization table
//! - `errors`: `WorkflowError`

pub mod errors;
pub mod permissions;
pub mod status;
pub mod transitions;

pub use errors::*;
pub use permissions::*;
pub use status::*;
pub use transitions::*;
