//! RocksDB storage backend for the LUCID node.

use anyhow::Result;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, Options, DB};
use std::path::Path;

use lucid_core::RegistryError;
use lucid_registry::{Keyspace, StorageBackend, WriteBatch};

/// RocksDB-backed storage with one column family per registry keyspace.
pub struct RocksBackend {
    db: DB,
}

impl RocksBackend {
    /// Open or create a RocksDB database at the given path with column families.
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;

        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors = Keyspace::ALL
            .iter()
            .map(|keyspace| ColumnFamilyDescriptor::new(keyspace.name(), Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, cf_descriptors)?;

        Ok(Self { db })
    }

    fn cf(&self, keyspace: Keyspace) -> Result<&ColumnFamily, RegistryError> {
        self.db.cf_handle(keyspace.name()).ok_or_else(|| {
            RegistryError::Storage(format!("column family '{}' not found", keyspace.name()))
        })
    }
}

impl StorageBackend for RocksBackend {
    fn get(&self, keyspace: Keyspace, key: &[u8]) -> Result<Option<Vec<u8>>, RegistryError> {
        let cf = self.cf(keyspace)?;
        self.db
            .get_cf(cf, key)
            .map_err(|e| RegistryError::Storage(e.to_string()))
    }

    fn write(&self, batch: WriteBatch) -> Result<(), RegistryError> {
        let mut rocks_batch = rocksdb::WriteBatch::default();
        for (keyspace, key, value) in batch {
            rocks_batch.put_cf(self.cf(keyspace)?, key, value);
        }
        self.db
            .write(rocks_batch)
            .map_err(|e| RegistryError::Storage(e.to_string()))
    }
}
