//! In-memory application repository.

use std::collections::BTreeMap;

use crate::domain::{ApplicationId, GiApplication};
use crate::ports::outbound::ApplicationRepository;
use shared_types::RepositoryError;

/// `BTreeMap`-backed repository; iteration order is id order.
#[derive(Debug, Default)]
pub struct InMemoryApplicationRepository {
    applications: BTreeMap<ApplicationId, GiApplication>,
    last_sequence: u32,
}

impl InMemoryApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a repository from stored records.
    ///
    /// The sequence resumes after the larger of `last_sequence` and the
    /// highest stored id.
    pub fn from_parts(
        applications: Vec<GiApplication>,
        last_sequence: u32,
    ) -> Result<Self, RepositoryError> {
        let mut repo = Self::new();
        for application in applications {
            repo.insert(application)?;
        }
        repo.last_sequence = repo.last_sequence.max(last_sequence);
        Ok(repo)
    }

    pub fn last_sequence(&self) -> u32 {
        self.last_sequence
    }

    pub fn len(&self) -> usize {
        self.applications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn get(&self, id: ApplicationId) -> Result<Option<GiApplication>, RepositoryError> {
        Ok(self.applications.get(&id).cloned())
    }

    fn insert(&mut self, application: GiApplication) -> Result<(), RepositoryError> {
        if self.applications.contains_key(&application.id) {
            return Err(RepositoryError::Conflict(application.id.to_string()));
        }
        // Imported records must not be handed out again.
        self.last_sequence = self.last_sequence.max(application.id.sequence());
        self.applications.insert(application.id, application);
        Ok(())
    }

    fn update(&mut self, application: GiApplication) -> Result<(), RepositoryError> {
        match self.applications.get_mut(&application.id) {
            Some(existing) => {
                *existing = application;
                Ok(())
            }
            None => Err(RepositoryError::Missing(application.id.to_string())),
        }
    }

    fn list(&self) -> Result<Vec<GiApplication>, RepositoryError> {
        Ok(self.applications.values().cloned().collect())
    }

    fn next_id(&mut self) -> Result<ApplicationId, RepositoryError> {
        let next = self
            .last_sequence
            .checked_add(1)
            .ok_or_else(|| RepositoryError::Backend("application sequence exhausted".into()))?;
        self.last_sequence = next;
        Ok(ApplicationId::new(next))
    }
}
