//! # Adapters Layer
//!
//! In-memory implementation of the outbound repository port.

mod memory;

pub use memory::InMemoryApplicationRepository;
