//! Driven Ports (SPI - Outbound)

use crate::domain::{ApplicationId, GiApplication};
use shared_types::RepositoryError;

pub use shared_types::TimeSource;

/// Application persistence.
pub trait ApplicationRepository: Send + Sync {
    fn get(&self, id: ApplicationId) -> Result<Option<GiApplication>, RepositoryError>;

    /// Stores a new application. Inserting an id at or beyond the current
    /// sequence advances the sequence past it.
    ///
    /// # Errors
    /// - `Conflict`: id already present
    fn insert(&mut self, application: GiApplication) -> Result<(), RepositoryError>;

    /// Replaces an existing application.
    ///
    /// # Errors
    /// - `Missing`: no application with this id
    fn update(&mut self, application: GiApplication) -> Result<(), RepositoryError>;

    /// All applications ordered by id.
    fn list(&self) -> Result<Vec<GiApplication>, RepositoryError>;

    /// Applications whose applicant handle is `owner`, ordered by id.
    fn list_by_owner(&self, owner: &str) -> Result<Vec<GiApplication>, RepositoryError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|a| a.applicant_handle == owner)
            .collect())
    }

    /// Allocates the next id. Ids are never reused.
    fn next_id(&mut self) -> Result<ApplicationId, RepositoryError>;
}
