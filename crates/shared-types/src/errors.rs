//! # Error Types
//!
//! Defines error types used across stores.

use thiserror::Error;

use crate::entities::UserId;

/// A role string outside the closed role set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown role: {value}")]
pub struct ParseRoleError {
    /// The rejected input.
    pub value: String,
}

/// Errors raised while verifying a session token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Token is malformed or its tag does not match the session contents.
    #[error("Session token rejected")]
    BadToken,

    /// Session is older than the configured time-to-live.
    #[error("Session expired: issued at {issued_at}, now {now}")]
    Expired { issued_at: u64, now: u64 },
    /// The account was disabled; its sessions no longer count.
    #[error("Session revoked: account {user_id} is disabled")]
    Revoked { user_id: UserId },
}

/// Errors raised when publishing portal events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// The sink is full and refuses new events.
    #[error("Event sink full at {capacity} events")]
    SinkFull { capacity: usize },

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors raised by repository backends.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// A record with the same key already exists.
    #[error("Record already exists: {0}")]
    Conflict(String),

    /// A record to update does not exist.
    #[error("Record missing: {0}")]
    Missing(String),

    /// Backend failure.
    #[error("Backend error: {0}")]
    Backend(String),
}
