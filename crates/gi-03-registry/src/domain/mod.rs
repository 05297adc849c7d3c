//! # Domain Layer - Registry Store
//!
//! - `value_objects`: `ApplicationId`, `District`, known categories
//! - `entities`: `GiApplication`, `NewApplication`
//! - `errors`: `RegistryError`

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
