//! LUCID Registry
//!
//! The identity-linking registry:
//! - Key-value storage boundary with an in-memory backend
//! - Identity store with credential reverse indices and atomic commits
//! - Union-find resolver (path compression, smallest-id-wins union)
//! - Registration, linking, and aggregation services
//! - `Registry` facade publishing events on a broadcast channel

pub mod aggregation;
pub mod backend;
pub mod linking;
pub mod registration;
pub mod registry;
pub mod resolver;
pub mod store;

pub use backend::{Keyspace, MemoryBackend, StorageBackend, WriteBatch};
pub use registry::Registry;
pub use resolver::Resolver;
pub use store::IdentityStore;
