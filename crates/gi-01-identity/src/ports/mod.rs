//! Ports for the identity store.

pub mod inbound;
pub mod outbound;

pub use inbound::IdentityApi;
pub use outbound::UserRepository;
