//! Cross-store integration tests.

pub mod access;
pub mod concurrency;
pub mod fixtures;
pub mod flows;
