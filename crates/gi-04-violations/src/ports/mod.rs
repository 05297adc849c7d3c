//! Ports for the violation store.

pub mod inbound;
pub mod outbound;

pub use inbound::ViolationApi;
pub use outbound::ViolationRepository;
