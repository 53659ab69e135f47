//! Fixtures shared by the cross-crate registry tests.

use lucid_core::{Address, IdentityId};
use lucid_registry::{MemoryBackend, Registry};

/// A distinct, non-zero wallet address derived from `n`.
pub fn wallet(n: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[12..].copy_from_slice(&n.to_be_bytes());
    bytes[0] = 0x1c;
    Address(bytes)
}

/// An in-memory registry holding `count` wallet identities, ids `1..=count`.
pub fn registry_with_wallets(count: u64) -> Registry<MemoryBackend> {
    let mut registry = Registry::in_memory();
    for n in 1..=count {
        registry
            .register_wallet(wallet(n))
            .unwrap_or_else(|e| panic!("fixture wallet {} rejected: {}", n, e));
    }
    registry
}

/// Map raw ids to [`IdentityId`]s.
pub fn ids(raw: &[u64]) -> Vec<IdentityId> {
    raw.iter().copied().map(IdentityId).collect()
}

/// The root of every identity `1..=count`, in id order.
pub fn partition(registry: &mut Registry<MemoryBackend>, count: u64) -> Vec<IdentityId> {
    (1..=count)
        .map(|n| {
            registry
                .find_root(IdentityId(n))
                .unwrap_or_else(|e| panic!("find_root({}) failed: {}", n, e))
        })
        .collect()
}
