//! Identity store: id → identity records plus the credential reverse indices.
//!
//! Writes are staged in an overlay that reads within the same operation
//! see, and reach the backend as one atomic batch on [`IdentityStore::commit`].
//! Events emitted while staging are handed back only after the commit
//! succeeds.

use std::collections::BTreeMap;

use lucid_core::{
    Address, Credential, Identity, IdentityId, RegistryError, RegistryEvent, SocialCredential,
};

use crate::backend::{Keyspace, StorageBackend, WriteBatch};

const LAST_ID_KEY: &[u8] = b"last_id";

fn social_key(platform: &str, handle: &str) -> Result<Vec<u8>, RegistryError> {
    Ok(serde_json::to_vec(&(platform, handle))?)
}

fn decode_u64(bytes: &[u8]) -> Result<u64, RegistryError> {
    let raw: [u8; 8] = bytes.try_into().map_err(|_| {
        RegistryError::Serialization(format!("expected 8-byte integer, got {} bytes", bytes.len()))
    })?;
    Ok(u64::from_be_bytes(raw))
}

/// Identity records and reverse indices over a [`StorageBackend`].
pub struct IdentityStore<B: StorageBackend> {
    backend: B,
    /// Writes of the operation in progress, keyed for overlay reads.
    staged: BTreeMap<(Keyspace, Vec<u8>), Vec<u8>>,
    /// Events of the operation in progress.
    pending_events: Vec<RegistryEvent>,
    committed_writes: u64,
}

impl<B: StorageBackend> IdentityStore<B> {
    /// Create a store over the given backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            staged: BTreeMap::new(),
            pending_events: Vec::new(),
            committed_writes: 0,
        }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the store, returning the backend. Staged writes are dropped.
    pub fn into_backend(self) -> B {
        self.backend
    }

    fn read(&self, keyspace: Keyspace, key: &[u8]) -> Result<Option<Vec<u8>>, RegistryError> {
        if let Some(value) = self.staged.get(&(keyspace, key.to_vec())) {
            return Ok(Some(value.clone()));
        }
        self.backend.get(keyspace, key)
    }

    fn stage(&mut self, keyspace: Keyspace, key: Vec<u8>, value: Vec<u8>) {
        self.staged.insert((keyspace, key), value);
    }

    /// Highest id assigned so far (0 when empty).
    pub fn last_id(&self) -> Result<u64, RegistryError> {
        match self.read(Keyspace::Meta, LAST_ID_KEY)? {
            Some(bytes) => decode_u64(&bytes),
            None => Ok(0),
        }
    }

    /// Whether `id` has been assigned.
    pub fn contains(&self, id: IdentityId) -> Result<bool, RegistryError> {
        Ok(id.get() != 0 && id.get() <= self.last_id()?)
    }

    /// Fetch an identity record.
    pub fn get(&self, id: IdentityId) -> Result<Identity, RegistryError> {
        if !self.contains(id)? {
            return Err(RegistryError::UnknownIdentity(format!("invalid id {}", id)));
        }
        let bytes = self
            .read(Keyspace::Identities, &id.to_key())?
            .ok_or_else(|| RegistryError::Storage(format!("record for id {} is missing", id)))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn put_identity(&mut self, identity: &Identity) -> Result<(), RegistryError> {
        let value = serde_json::to_vec(identity)?;
        self.stage(Keyspace::Identities, identity.id.to_key().to_vec(), value);
        Ok(())
    }

    fn insert(&mut self, credential: Credential) -> Result<IdentityId, RegistryError> {
        let next = self
            .last_id()?
            .checked_add(1)
            .ok_or_else(|| RegistryError::Storage("identity id space exhausted".into()))?;
        let id = IdentityId(next);
        let identity = Identity::new_root(id, credential);
        self.put_identity(&identity)?;
        self.stage(Keyspace::Meta, LAST_ID_KEY.to_vec(), next.to_be_bytes().to_vec());
        self.emit(RegistryEvent::identity_created(id, &identity.credential));
        Ok(id)
    }

    /// Insert a self-rooted social identity.
    pub fn create_social(
        &mut self,
        credential: SocialCredential,
    ) -> Result<IdentityId, RegistryError> {
        let key = social_key(&credential.platform, &credential.handle)?;
        if self.read(Keyspace::SocialIndex, &key)?.is_some() {
            return Err(RegistryError::DuplicateCredential(format!(
                "social account {}:{} exists",
                credential.platform, credential.handle
            )));
        }
        let id = self.insert(Credential::Social(credential))?;
        self.stage(Keyspace::SocialIndex, key, id.to_key().to_vec());
        tracing::debug!(%id, "staged social identity");
        Ok(id)
    }

    /// Insert a self-rooted wallet identity.
    pub fn create_wallet(&mut self, address: Address) -> Result<IdentityId, RegistryError> {
        let key = address.as_bytes().to_vec();
        if self.read(Keyspace::WalletIndex, &key)?.is_some() {
            return Err(RegistryError::DuplicateCredential(format!(
                "wallet {} exists",
                address
            )));
        }
        let id = self.insert(Credential::Wallet(address))?;
        self.stage(Keyspace::WalletIndex, key, id.to_key().to_vec());
        tracing::debug!(%id, %address, "staged wallet identity");
        Ok(id)
    }

    /// Point `id` at a new union-find parent. Touches nothing else.
    pub fn set_parent(&mut self, id: IdentityId, parent: IdentityId) -> Result<(), RegistryError> {
        let mut identity = self.get(id)?;
        identity.parent = parent;
        self.put_identity(&identity)
    }

    /// Raw reverse-index lookup for a social credential.
    pub fn lookup_social(
        &self,
        platform: &str,
        handle: &str,
    ) -> Result<Option<IdentityId>, RegistryError> {
        let key = social_key(platform, handle)?;
        self.read(Keyspace::SocialIndex, &key)?
            .map(|bytes| decode_u64(&bytes).map(IdentityId))
            .transpose()
    }

    /// Raw reverse-index lookup for a wallet address.
    pub fn lookup_wallet(&self, address: &Address) -> Result<Option<IdentityId>, RegistryError> {
        self.read(Keyspace::WalletIndex, address.as_bytes())?
            .map(|bytes| decode_u64(&bytes).map(IdentityId))
            .transpose()
    }

    /// Queue an event for publication once the current operation commits.
    pub fn emit(&mut self, event: RegistryEvent) {
        self.pending_events.push(event);
    }

    /// Number of distinct keys staged by the operation in progress.
    pub fn pending_writes(&self) -> usize {
        self.staged.len()
    }

    /// Total keys written to the backend by successful commits.
    pub fn committed_writes(&self) -> u64 {
        self.committed_writes
    }

    /// Write all staged changes as one batch and return the queued events.
    ///
    /// On failure nothing reaches the backend and the staged changes and
    /// events are discarded.
    pub fn commit(&mut self) -> Result<Vec<RegistryEvent>, RegistryError> {
        let staged = std::mem::take(&mut self.staged);
        let events = std::mem::take(&mut self.pending_events);
        if staged.is_empty() {
            return Ok(events);
        }

        let mut batch = WriteBatch::new();
        for ((keyspace, key), value) in staged {
            batch.put(keyspace, key, value);
        }
        let writes = batch.len();
        self.backend.write(batch)?;
        self.committed_writes += writes as u64;
        tracing::debug!(writes, events = events.len(), "store transaction committed");
        Ok(events)
    }

    /// Discard staged changes and queued events.
    pub fn rollback(&mut self) {
        let discarded = self.staged.len();
        self.staged.clear();
        self.pending_events.clear();
        if discarded > 0 {
            tracing::debug!(discarded, "store transaction rolled back");
        }
    }
}
