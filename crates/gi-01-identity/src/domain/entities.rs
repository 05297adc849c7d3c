//! Core domain entities for the identity store.

use serde::{Deserialize, Serialize};
use shared_types::{Principal, Role, Timestamp, UserId};
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::credentials::CredentialHash;
use super::errors::IdentityError;

/// Account status. Users are never deleted, only disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Disabled,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Disabled => "disabled",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(UserStatus::Active),
            "disabled" => Ok(UserStatus::Disabled),
            other => Err(IdentityError::Validation {
                field: "status",
                reason: format!("unknown status '{}'", other),
            }),
        }
    }
}

/// A stored user account.
///
/// INVARIANT: `handle` is unique across all users.
/// INVARIANT: `role` never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub handle: String,
    pub credential: CredentialHash,
    pub role: Role,
    pub name: String,
    pub organization: String,
    pub status: UserStatus,
    pub created_at: Timestamp,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Public attributes embedded in sessions.
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.id,
            handle: self.handle.clone(),
            role: self.role,
            name: self.name.clone(),
            organization: self.organization.clone(),
        }
    }

    /// Redacted view returned by listings.
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id,
            handle: self.handle.clone(),
            role: self.role,
            name: self.name.clone(),
            organization: self.organization.clone(),
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// A user account without credential data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: UserId,
    pub handle: String,
    pub role: Role,
    pub name: String,
    pub organization: String,
    pub status: UserStatus,
    pub created_at: Timestamp,
}

/// Raw "create user" form input.
///
/// `role` is the unparsed form value; the store rejects anything outside
/// the closed role set. The secret is wiped from memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct NewUser {
    pub handle: String,
    pub secret: String,
    pub role: String,
    pub name: String,
    pub organization: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("handle", &self.handle)
            .field("secret", &"<redacted>")
            .field("role", &self.role)
            .field("name", &self.name)
            .field("organization", &self.organization)
            .finish()
    }
}

impl NewUser {
    /// Checks required fields and parses the role.
    pub fn validate(&self) -> Result<Role, IdentityError> {
        let handle = self.handle.trim();
        if handle.is_empty() {
            return Err(IdentityError::Validation {
                field: "handle",
                reason: "must not be empty".into(),
            });
        }
        if handle.chars().any(char::is_whitespace) {
            return Err(IdentityError::Validation {
                field: "handle",
                reason: "must not contain whitespace".into(),
            });
        }
        if self.secret.is_empty() {
            return Err(IdentityError::Validation {
                field: "secret",
                reason: "must not be empty".into(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(IdentityError::Validation {
                field: "name",
                reason: "must not be empty".into(),
            });
        }

        self.role
            .parse::<Role>()
            .map_err(|e| IdentityError::InvalidRole { value: e.value })
    }
}
