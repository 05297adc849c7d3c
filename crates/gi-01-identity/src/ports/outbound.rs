//! Driven Ports (SPI - Outbound)
//!
//! The identity store depends on a user repository and a clock.

use crate::domain::User;
use shared_types::{RepositoryError, UserId};

pub use shared_types::TimeSource;

/// User persistence.
///
/// Implementations enforce handle uniqueness on `insert`.
pub trait UserRepository: Send + Sync {
    /// Looks up an account by login handle.
    fn find_by_handle(&self, handle: &str) -> Result<Option<User>, RepositoryError>;

    /// Looks up an account by id.
    fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Stores a new account.
    ///
    /// # Errors
    /// - `Conflict`: id or handle already present
    fn insert(&mut self, user: User) -> Result<(), RepositoryError>;

    /// Replaces an existing account.
    ///
    /// # Errors
    /// - `Missing`: no account with this id
    fn update(&mut self, user: User) -> Result<(), RepositoryError>;

    /// All accounts ordered by id.
    fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Allocates the next user id. Ids are never reused.
    fn next_id(&mut self) -> Result<UserId, RepositoryError>;
}
