//! # Domain Layer - Violation Store
//!
//! - `value_objects`: `ViolationId`, `ViolationType`
//! - `entities`: `Violation`, `NewViolation`
//! - `errors`: `ViolationError`

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
