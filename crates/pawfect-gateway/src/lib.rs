//! pawfect-gateway: Persistence gateways and identity clients.
//!
//! Implements `PersistenceGateway` and `IdentityProvider` for a hosted
//! REST backend and for local JSON-lines files, plus the TOML
//! configuration that selects between them.

pub mod auth;
pub mod config;
pub mod error;
pub mod local;
#[cfg(test)]
mod memory;
pub mod rest;

pub use config::{
    create_gateway, create_identity_provider, load_config_from, GatewayConfig, PawfectConfig,
};
pub use error::AuthError;
pub use local::{LocalGateway, LocalIdentity};
pub use pawfect_core::error::GatewayError;
pub use rest::RestGateway;
