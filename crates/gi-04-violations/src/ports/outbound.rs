//! Driven Ports (SPI - Outbound)

use crate::domain::{Violation, ViolationId};
use shared_types::RepositoryError;

pub use shared_types::TimeSource;

/// Violation persistence.
pub trait ViolationRepository: Send + Sync {
    fn get(&self, id: ViolationId) -> Result<Option<Violation>, RepositoryError>;

    /// Stores a new report. Inserting an id at or beyond the current
    /// sequence advances the sequence past it.
    ///
    /// # Errors
    /// - `Conflict`: id already present
    fn insert(&mut self, violation: Violation) -> Result<(), RepositoryError>;

    /// Replaces an existing report.
    ///
    /// # Errors
    /// - `Missing`: no report with this id
    fn update(&mut self, violation: Violation) -> Result<(), RepositoryError>;

    /// All reports ordered by id.
    fn list(&self) -> Result<Vec<Violation>, RepositoryError>;

    /// Reports filed by `reporter`, ordered by id.
    fn list_by_reporter(&self, reporter: &str) -> Result<Vec<Violation>, RepositoryError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|v| v.reporter_handle == reporter)
            .collect())
    }

    /// Allocates the next id. Ids are never reused.
    fn next_id(&mut self) -> Result<ViolationId, RepositoryError>;
}
