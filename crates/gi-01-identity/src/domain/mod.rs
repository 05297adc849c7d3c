//! # Domain Layer - Identity Store
//!
//! - `entities`: `User`, `UserStatus`, `UserView`, `NewUser`
//! - `credentials`: salted, stretched credential hashes
//! - `errors`: `IdentityError`

pub mod credentials;
pub mod entities;
pub mod errors;

pub use credentials::*;
pub use entities::*;
pub use errors::*;
