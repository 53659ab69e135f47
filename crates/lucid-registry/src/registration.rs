//! Validation and insertion of new credentials as singleton identities.

use lucid_core::{Address, IdentityId, RegistryError, SocialCredential, WALLET_KIND};

use crate::backend::StorageBackend;
use crate::store::IdentityStore;

/// Register a social credential as a new self-rooted identity.
pub fn register_social<B: StorageBackend>(
    store: &mut IdentityStore<B>,
    credential: SocialCredential,
) -> Result<IdentityId, RegistryError> {
    if credential.platform.is_empty() {
        return Err(RegistryError::InvalidCredential("platform is empty".into()));
    }
    if credential.handle.is_empty() {
        return Err(RegistryError::InvalidCredential("handle is empty".into()));
    }
    // Creation events use the platform as their kind.
    if credential.platform == WALLET_KIND {
        return Err(RegistryError::InvalidCredential(format!(
            "platform name '{}' is reserved",
            WALLET_KIND
        )));
    }
    store.create_social(credential)
}

/// Register a wallet address as a new self-rooted identity.
pub fn register_wallet<B: StorageBackend>(
    store: &mut IdentityStore<B>,
    address: Address,
) -> Result<IdentityId, RegistryError> {
    if address.is_zero() {
        return Err(RegistryError::InvalidAddress("zero address".into()));
    }
    store.create_wallet(address)
}
