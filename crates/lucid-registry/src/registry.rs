//! The registry facade: one owned context running each operation as a
//! single all-or-nothing transaction and publishing its events.

use tokio::sync::broadcast;

use lucid_core::{
    Account, Address, Identity, IdentityId, RegistryConfig, RegistryError, RegistryEvent,
    SocialCredential,
};

use crate::aggregation;
use crate::backend::{MemoryBackend, StorageBackend};
use crate::linking;
use crate::registration;
use crate::store::IdentityStore;

/// An identity-linking registry over a storage backend.
///
/// Every method takes `&mut self`: reads compress paths, so callers sharing
/// a registry must serialize all calls through one owner.
pub struct Registry<B: StorageBackend> {
    store: IdentityStore<B>,
    config: RegistryConfig,
    events: broadcast::Sender<RegistryEvent>,
}

impl Registry<MemoryBackend> {
    /// A registry over a fresh in-memory backend with default settings.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new(), RegistryConfig::default())
    }
}

impl<B: StorageBackend> Registry<B> {
    /// Create a registry over `backend`. Existing state in the backend is
    /// picked up as-is.
    pub fn new(backend: B, config: RegistryConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            store: IdentityStore::new(backend),
            config,
            events,
        }
    }

    /// Subscribe to events published after each successful operation.
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Read-only access to the underlying store.
    pub fn store(&self) -> &IdentityStore<B> {
        &self.store
    }

    /// Consume the registry, returning its backend.
    pub fn into_backend(self) -> B {
        self.store.into_backend()
    }

    /// Run `op` as one transaction: commit and publish on success, discard
    /// every staged write on failure.
    fn transact<T>(
        &mut self,
        op: impl FnOnce(&mut IdentityStore<B>, bool) -> Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        let compress = self.config.path_compression;
        let value = match op(&mut self.store, compress) {
            Ok(value) => value,
            Err(e) => {
                self.store.rollback();
                return Err(e);
            }
        };

        for event in self.store.commit()? {
            // No subscribers is not an error.
            let _ = self.events.send(event);
        }
        Ok(value)
    }

    /// Register a social credential. Returns the new identity's id.
    pub fn register_social(
        &mut self,
        platform: &str,
        handle: &str,
        display_name: &str,
        avatar_uri: &str,
    ) -> Result<IdentityId, RegistryError> {
        let credential = SocialCredential::new(platform, handle, display_name, avatar_uri);
        let result = self.transact(|store, _| registration::register_social(store, credential));
        match &result {
            Ok(id) => tracing::info!(%id, platform, handle, "social identity registered"),
            Err(e) => tracing::warn!(platform, handle, error = %e, "social registration rejected"),
        }
        result
    }

    /// Register a wallet address. Returns the new identity's id.
    pub fn register_wallet(&mut self, address: Address) -> Result<IdentityId, RegistryError> {
        let result = self.transact(|store, _| registration::register_wallet(store, address));
        match &result {
            Ok(id) => tracing::info!(%id, %address, "wallet identity registered"),
            Err(e) => tracing::warn!(%address, error = %e, "wallet registration rejected"),
        }
        result
    }

    /// Merge `ids` into one account. Returns the resulting root.
    pub fn link(&mut self, ids: &[IdentityId]) -> Result<IdentityId, RegistryError> {
        let result = self.transact(|store, compress| linking::link(store, ids, compress));
        match &result {
            Ok(root) => tracing::info!(?ids, %root, "identities linked"),
            Err(e) => tracing::warn!(?ids, error = %e, "link rejected"),
        }
        result
    }

    /// Current root of `id`.
    pub fn find_root(&mut self, id: IdentityId) -> Result<IdentityId, RegistryError> {
        self.transact(|store, compress| aggregation::resolve_root(store, id, compress))
    }

    /// The merged account containing `id`.
    pub fn get_account(&mut self, id: IdentityId) -> Result<Account, RegistryError> {
        self.transact(|store, compress| aggregation::get_account(store, id, compress))
    }

    /// Root of the identity holding `(platform, handle)`.
    pub fn get_user_id_by_social(
        &mut self,
        platform: &str,
        handle: &str,
    ) -> Result<IdentityId, RegistryError> {
        self.transact(|store, compress| {
            aggregation::get_user_id_by_social(store, platform, handle, compress)
        })
    }

    /// Root of the identity holding `address`.
    pub fn get_user_id_by_wallet(
        &mut self,
        address: &Address,
    ) -> Result<IdentityId, RegistryError> {
        self.transact(|store, compress| {
            aggregation::get_user_id_by_wallet(store, address, compress)
        })
    }

    /// The raw record for `id`.
    pub fn get_identity(&self, id: IdentityId) -> Result<Identity, RegistryError> {
        self.store.get(id)
    }

    /// Number of identities ever registered.
    pub fn identity_count(&self) -> Result<u64, RegistryError> {
        self.store.last_id()
    }
}
