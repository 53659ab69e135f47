//! Key-value persistence boundary for the identity store.

use dashmap::DashMap;

use lucid_core::RegistryError;

/// Named key-value namespaces used by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Keyspace {
    /// Identity id (big-endian u64) → JSON identity record.
    Identities,
    /// JSON `[platform, handle]` → identity id.
    SocialIndex,
    /// 20 address bytes → identity id.
    WalletIndex,
    /// Registry metadata (highest assigned id).
    Meta,
}

impl Keyspace {
    pub const ALL: [Keyspace; 4] = [
        Keyspace::Identities,
        Keyspace::SocialIndex,
        Keyspace::WalletIndex,
        Keyspace::Meta,
    ];

    /// Stable name, used as the column family name by disk backends.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identities => "identities",
            Self::SocialIndex => "social_index",
            Self::WalletIndex => "wallet_index",
            Self::Meta => "meta",
        }
    }
}

/// An ordered set of puts applied atomically by [`StorageBackend::write`].
#[derive(Debug, Default, Clone)]
pub struct WriteBatch {
    puts: Vec<(Keyspace, Vec<u8>, Vec<u8>)>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a put to the batch.
    pub fn put(&mut self, keyspace: Keyspace, key: Vec<u8>, value: Vec<u8>) {
        self.puts.push((keyspace, key, value));
    }

    pub fn len(&self) -> usize {
        self.puts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Keyspace, Vec<u8>, Vec<u8>)> {
        self.puts.iter()
    }
}

impl IntoIterator for WriteBatch {
    type Item = (Keyspace, Vec<u8>, Vec<u8>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.puts.into_iter()
    }
}

/// Storage consumed by the identity store.
///
/// Implementations must apply a [`WriteBatch`] all-or-nothing.
pub trait StorageBackend: Send + Sync {
    /// Read a value.
    fn get(&self, keyspace: Keyspace, key: &[u8]) -> Result<Option<Vec<u8>>, RegistryError>;

    /// Atomically apply every put in the batch.
    fn write(&self, batch: WriteBatch) -> Result<(), RegistryError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn get(&self, keyspace: Keyspace, key: &[u8]) -> Result<Option<Vec<u8>>, RegistryError> {
        (**self).get(keyspace, key)
    }

    fn write(&self, batch: WriteBatch) -> Result<(), RegistryError> {
        (**self).write(batch)
    }
}

/// In-memory backend using DashMap.
///
/// Entries are keyed by `(keyspace, key)`.
pub struct MemoryBackend {
    entries: DashMap<(Keyspace, Vec<u8>), Vec<u8>>,
}

impl MemoryBackend {
    /// Create a new, empty backend.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Total number of stored entries across all keyspaces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageBackend for MemoryBackend {
    fn get(&self, keyspace: Keyspace, key: &[u8]) -> Result<Option<Vec<u8>>, RegistryError> {
        Ok(self
            .entries
            .get(&(keyspace, key.to_vec()))
            .map(|entry| entry.value().clone()))
    }

    fn write(&self, batch: WriteBatch) -> Result<(), RegistryError> {
        for (keyspace, key, value) in batch {
            self.entries.insert((keyspace, key), value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyspace_names_unique() {
        let mut names: Vec<&str> = Keyspace::ALL.iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Keyspace::ALL.len());
    }

    #[test]
    fn test_memory_put_get() {
        let backend = MemoryBackend::new();
        let mut batch = WriteBatch::new();
        batch.put(Keyspace::Meta, b"last_id".to_vec(), 3u64.to_be_bytes().to_vec());
        assert_eq!(batch.len(), 1);
        backend.write(batch).unwrap();

        let value = backend.get(Keyspace::Meta, b"last_id").unwrap();
        assert_eq!(value, Some(3u64.to_be_bytes().to_vec()));
    }

    #[test]
    fn test_memory_keyspaces_are_disjoint() {
        let backend = MemoryBackend::new();
        let mut batch = WriteBatch::new();
        batch.put(Keyspace::SocialIndex, b"k".to_vec(), b"social".to_vec());
        batch.put(Keyspace::WalletIndex, b"k".to_vec(), b"wallet".to_vec());
        backend.write(batch).unwrap();

        assert_eq!(
            backend.get(Keyspace::SocialIndex, b"k").unwrap(),
            Some(b"social".to_vec())
        );
        assert_eq!(
            backend.get(Keyspace::WalletIndex, b"k").unwrap(),
            Some(b"wallet".to_vec())
        );
        assert!(backend.get(Keyspace::Identities, b"k").unwrap().is_none());
        assert_eq!(backend.len(), 2);
    }

    #[test]
    fn test_later_put_in_batch_wins() {
        let backend = MemoryBackend::new();
        let mut batch = WriteBatch::new();
        batch.put(Keyspace::Meta, b"x".to_vec(), b"1".to_vec());
        batch.put(Keyspace::Meta, b"x".to_vec(), b"2".to_vec());
        backend.write(batch).unwrap();
        assert_eq!(backend.get(Keyspace::Meta, b"x").unwrap(), Some(b"2".to_vec()));
    }

    #[test]
    fn test_boxed_backend() {
        let backend: Box<dyn StorageBackend> = Box::new(MemoryBackend::default());
        assert!(backend.get(Keyspace::Meta, b"missing").unwrap().is_none());
    }
}
