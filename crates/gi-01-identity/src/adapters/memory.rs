//! In-memory user repository.

use std::collections::{BTreeMap, HashMap};

use crate::domain::User;
use crate::ports::outbound::UserRepository;
use shared_types::{RepositoryError, UserId};

/// `BTreeMap`-backed repository with a handle index.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: BTreeMap<UserId, User>,
    by_handle: HashMap<String, UserId>,
    last_id: u64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a repository from a snapshot.
    ///
    /// The id sequence resumes after the largest of `last_id` and any
    /// stored id.
    pub fn from_parts(users: Vec<User>, last_id: u64) -> Result<Self, RepositoryError> {
        let mut repo = Self::new();
        for user in users {
            repo.last_id = repo.last_id.max(user.id.0);
            repo.insert(user)?;
        }
        repo.last_id = repo.last_id.max(last_id);
        Ok(repo)
    }

    /// Last allocated id.
    pub fn last_id(&self) -> u64 {
        self.last_id
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_handle(&self, handle: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .by_handle
            .get(handle)
            .and_then(|id| self.users.get(id))
            .cloned())
    }

    fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.get(&id).cloned())
    }

    fn insert(&mut self, user: User) -> Result<(), RepositoryError> {
        if self.users.contains_key(&user.id) {
            return Err(RepositoryError::Conflict(format!("user id {}", user.id)));
        }
        if self.by_handle.contains_key(&user.handle) {
            return Err(RepositoryError::Conflict(format!("handle {}", user.handle)));
        }
        self.by_handle.insert(user.handle.clone(), user.id);
        self.users.insert(user.id, user);
        Ok(())
    }

    fn update(&mut self, user: User) -> Result<(), RepositoryError> {
        match self.users.get_mut(&user.id) {
            Some(existing) if existing.handle == user.handle => {
                *existing = user;
                Ok(())
            }
            Some(_) => Err(RepositoryError::Conflict(format!(
                "handle of user {} is immutable",
                user.id
            ))),
            None => Err(RepositoryError::Missing(format!("user id {}", user.id))),
        }
    }

    fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.users.values().cloned().collect())
    }

    fn next_id(&mut self) -> Result<UserId, RepositoryError> {
        self.last_id += 1;
        Ok(UserId(self.last_id))
    }
}
