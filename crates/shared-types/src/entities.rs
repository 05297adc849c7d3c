//! # Core Identity Entities
//!
//! Roles and authenticated principals shared by all portal stores.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParseRoleError;

/// Timestamp in milliseconds since UNIX epoch.
pub type Timestamp = u64;

/// Numeric user identifier, assigned sequentially by the identity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Portal role. Closed set; a user's role never changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access, including user management.
    Admin,
    /// Regional producer body: files applications and reports violations.
    Association,
    /// Registry authority: reviews applications and manages prosecutions.
    Officer,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Association, Role::Officer];

    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Association => "association",
            Role::Officer => "officer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s.trim())
            .ok_or_else(|| ParseRoleError {
                value: s.to_string(),
            })
    }
}

/// The public attributes of an authenticated user.
///
/// Embedded in every [`Session`](crate::Session). Never contains the
/// credential hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// User identifier.
    pub user_id: UserId,
    /// Unique login handle (an email address in practice).
    pub handle: String,
    /// Role of the user.
    pub role: Role,
    /// Display name.
    pub name: String,
    /// Organization the user belongs to.
    pub organization: String,
}

impl Principal {
    /// Returns true if this principal owns records filed under `handle`.
    pub fn owns(&self, handle: &str) -> bool {
        self.handle == handle
    }
}
