//! In-memory violation repository.

use std::collections::BTreeMap;

use crate::domain::{Violation, ViolationId};
use crate::ports::outbound::ViolationRepository;
use shared_types::RepositoryError;

#[derive(Debug, Default)]
pub struct InMemoryViolationRepository {
    violations: BTreeMap<ViolationId, Violation>,
    last_sequence: u32,
}

impl InMemoryViolationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a repository from stored records.
    pub fn from_parts(
        violations: Vec<Violation>,
        last_sequence: u32,
    ) -> Result<Self, RepositoryError> {
        let mut repo = Self::new();
        for violation in violations {
            repo.insert(violation)?;
        }
        repo.last_sequence = repo.last_sequence.max(last_sequence);
        Ok(repo)
    }

    pub fn last_sequence(&self) -> u32 {
        self.last_sequence
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl ViolationRepository for InMemoryViolationRepository {
    fn get(&self, id: ViolationId) -> Result<Option<Violation>, RepositoryError> {
        Ok(self.violations.get(&id).cloned())
    }

    fn insert(&mut self, violation: Violation) -> Result<(), RepositoryError> {
        if self.violations.contains_key(&violation.id) {
            return Err(RepositoryError::Conflict(violation.id.to_string()));
        }
        self.last_sequence = self.last_sequence.max(violation.id.sequence());
        self.violations.insert(violation.id, violation);
        Ok(())
    }

    fn update(&mut self, violation: Violation) -> Result<(), RepositoryError> {
        match self.violations.get_mut(&violation.id) {
            Some(existing) => {
                *existing = violation;
                Ok(())
            }
            None => Err(RepositoryError::Missing(violation.id.to_string())),
        }
    }

    fn list(&self) -> Result<Vec<Violation>, RepositoryError> {
        Ok(self.violations.values().cloned().collect())
    }

    fn next_id(&mut self) -> Result<ViolationId, RepositoryError> {
        let next = self
            .last_sequence
            .checked_add(1)
            .ok_or_else(|| RepositoryError::Backend("violation sequence exhausted".into()))?;
        self.last_sequence = next;
        Ok(ViolationId::new(next))
    }
}
