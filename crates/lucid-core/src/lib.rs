//! LUCID core: identity, credential, and event types, errors, and
//! configuration for the LUCID identity-linking registry.

pub mod config;
pub mod error;
pub mod event;
pub mod types;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use event::RegistryEvent;
pub use types::{
    Account, Address, Credential, Identity, IdentityId, SocialCredential, WALLET_KIND,
};
