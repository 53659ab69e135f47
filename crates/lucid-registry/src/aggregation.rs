//! Read side: root resolution, reverse lookups, and merged account views.

use lucid_core::{Account, Address, Credential, IdentityId, RegistryError};

use crate::backend::StorageBackend;
use crate::resolver::Resolver;
use crate::store::IdentityStore;

/// Resolve the current root of `id`.
pub fn resolve_root<B: StorageBackend>(
    store: &mut IdentityStore<B>,
    id: IdentityId,
    compress: bool,
) -> Result<IdentityId, RegistryError> {
    Resolver::new(store, compress).find(id)
}

/// Collect every identity sharing a root with `id`.
///
/// Scans all assigned ids; credentials are reported in ascending id order.
pub fn get_account<B: StorageBackend>(
    store: &mut IdentityStore<B>,
    id: IdentityId,
    compress: bool,
) -> Result<Account, RegistryError> {
    let last = store.last_id()?;
    let (root, members) = {
        let mut resolver = Resolver::new(store, compress);
        let root = resolver.find(id)?;
        let mut members = Vec::new();
        for candidate in (1..=last).map(IdentityId) {
            if resolver.find(candidate)? == root {
                members.push(candidate);
            }
        }
        (root, members)
    };

    let mut account = Account {
        root,
        display_name: String::new(),
        members: Vec::with_capacity(members.len()),
        wallets: Vec::new(),
        socials: Vec::new(),
    };
    for member in members {
        match store.get(member)?.credential {
            Credential::Social(social) => {
                if account.display_name.is_empty() && !social.display_name.is_empty() {
                    account.display_name = social.display_name.clone();
                }
                account.socials.push(social);
            }
            Credential::Wallet(address) => account.wallets.push(address),
        }
        account.members.push(member);
    }

    Ok(account)
}

/// Root of the identity holding a social credential.
pub fn get_user_id_by_social<B: StorageBackend>(
    store: &mut IdentityStore<B>,
    platform: &str,
    handle: &str,
    compress: bool,
) -> Result<IdentityId, RegistryError> {
    let id = store.lookup_social(platform, handle)?.ok_or_else(|| {
        RegistryError::UnknownIdentity(format!("no identity for {}:{}", platform, handle))
    })?;
    resolve_root(store, id, compress)
}

/// Root of the identity holding a wallet address.
pub fn get_user_id_by_wallet<B: StorageBackend>(
    store: &mut IdentityStore<B>,
    address: &Address,
    compress: bool,
) -> Result<IdentityId, RegistryError> {
    let id = store
        .lookup_wallet(address)?
        .ok_or_else(|| RegistryError::UnknownIdentity(format!("no identity for {}", address)))?;
    resolve_root(store, id, compress)
}
