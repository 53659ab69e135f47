//! Merging a sequence of identities into one account.

use lucid_core::{IdentityId, RegistryError, RegistryEvent};

use crate::backend::StorageBackend;
use crate::resolver::Resolver;
use crate::store::IdentityStore;

/// Minimum number of ids accepted by [`link`].
pub const MIN_LINK_OPERANDS: usize = 2;

/// Fold `ids` left to right into one group and return its root.
///
/// Every id is validated before anything is written. Emits
/// `IdentitiesLinked` with the ids exactly as given.
pub fn link<B: StorageBackend>(
    store: &mut IdentityStore<B>,
    ids: &[IdentityId],
    compress: bool,
) -> Result<IdentityId, RegistryError> {
    if ids.len() < MIN_LINK_OPERANDS {
        return Err(RegistryError::InsufficientOperands(ids.len()));
    }
    for &id in ids {
        if !store.contains(id)? {
            return Err(RegistryError::UnknownIdentity(format!("invalid id {}", id)));
        }
    }

    let root = {
        let mut resolver = Resolver::new(store, compress);
        let mut root = ids[0];
        for &next in &ids[1..] {
            // An earlier union may have moved the root of the accumulator.
            let current = resolver.find(root)?;
            root = resolver.union(current, next)?;
        }
        root
    };

    store.emit(RegistryEvent::IdentitiesLinked {
        ids: ids.to_vec(),
        root,
    });
    Ok(root)
}
