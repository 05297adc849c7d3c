//! Ports for the registry store.

pub mod inbound;
pub mod outbound;

pub use inbound::RegistryApi;
pub use outbound::ApplicationRepository;
