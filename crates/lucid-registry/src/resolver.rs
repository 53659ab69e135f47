//! Union-find over the identity store.
//!
//! Roots are always the smallest id of their group: `union` redirects the
//! larger root to the smaller one. A redirected identity therefore never
//! becomes a root again, and parent chains cannot form cycles.

use lucid_core::{IdentityId, RegistryError};

use crate::backend::StorageBackend;
use crate::store::IdentityStore;

/// Root resolution and merging for identities in an [`IdentityStore`].
pub struct Resolver<'a, B: StorageBackend> {
    store: &'a mut IdentityStore<B>,
    compress: bool,
}

impl<'a, B: StorageBackend> Resolver<'a, B> {
    /// Create a resolver. With `compress` set, `find` flattens the paths it
    /// walks.
    pub fn new(store: &'a mut IdentityStore<B>, compress: bool) -> Self {
        Self { store, compress }
    }

    /// Walk parent pointers from `id` to its root without writing.
    ///
    /// Returns the root and every `(node, parent)` pair visited before it.
    fn walk(
        &self,
        id: IdentityId,
    ) -> Result<(IdentityId, Vec<(IdentityId, IdentityId)>), RegistryError> {
        let limit = self.store.last_id()?;
        let mut path = Vec::new();
        let mut current = self.store.get(id)?;

        while !current.is_root() {
            if path.len() as u64 >= limit {
                return Err(RegistryError::Storage(format!(
                    "parent cycle detected while resolving {}",
                    id
                )));
            }
            path.push((current.id, current.parent));
            current = self.store.get(current.parent)?;
        }

        Ok((current.id, path))
    }

    /// Resolve the root of `id` without compressing.
    pub fn peek_root(&self, id: IdentityId) -> Result<IdentityId, RegistryError> {
        self.walk(id).map(|(root, _)| root)
    }

    /// Resolve the root of `id`, pointing every visited node directly at it.
    ///
    /// Only nodes whose parent actually changes are written, so a second
    /// `find` on the same id stages nothing.
    pub fn find(&mut self, id: IdentityId) -> Result<IdentityId, RegistryError> {
        let (root, path) = self.walk(id)?;

        if self.compress {
            let mut rewritten = 0usize;
            for (node, parent) in path {
                if parent != root {
                    self.store.set_parent(node, root)?;
                    rewritten += 1;
                }
            }
            if rewritten > 0 {
                tracing::debug!(%id, %root, rewritten, "path compressed");
            }
        }

        Ok(root)
    }

    /// Merge the groups of `a` and `b`; the smaller root survives.
    ///
    /// Merging ids already in one group is a no-op returning their root.
    pub fn union(&mut self, a: IdentityId, b: IdentityId) -> Result<IdentityId, RegistryError> {
        let root_a = self.find(a)?;
        let root_b = self.find(b)?;
        if root_a == root_b {
            return Ok(root_a);
        }

        let (winner, loser) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.store.set_parent(loser, winner)?;
        tracing::debug!(%winner, %loser, "roots merged");
        Ok(winner)
    }
}
