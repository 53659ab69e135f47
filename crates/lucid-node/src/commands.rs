//! Commands dispatched from the HTTP API to the node event loop.

use serde::Serialize;
use tokio::sync::oneshot;

use lucid_core::{Account, Address, Identity, IdentityId, RegistryError};

/// Reply channel carrying a registry result back to the HTTP handler.
pub type Reply<T> = oneshot::Sender<Result<T, RegistryError>>;

/// A command sent from the HTTP API to the node's main event loop.
pub enum RegistryCommand {
    /// Register a social credential.
    RegisterSocial {
        platform: String,
        handle: String,
        display_name: String,
        avatar_uri: String,
        reply: Reply<IdResponse>,
    },
    /// Register a wallet address.
    RegisterWallet {
        address: Address,
        reply: Reply<IdResponse>,
    },
    /// Merge identities into one account.
    Link {
        ids: Vec<IdentityId>,
        reply: Reply<LinkResponse>,
    },
    /// Resolve an identity's root.
    FindRoot {
        id: IdentityId,
        reply: Reply<RootResponse>,
    },
    /// Fetch a raw identity record.
    GetIdentity {
        id: IdentityId,
        reply: Reply<Identity>,
    },
    /// Aggregate the account containing an identity.
    GetAccount {
        id: IdentityId,
        reply: Reply<Account>,
    },
    /// Look up the root holding a social credential.
    LookupSocial {
        platform: String,
        handle: String,
        reply: Reply<IdResponse>,
    },
    /// Look up the root holding a wallet address.
    LookupWallet {
        address: Address,
        reply: Reply<IdResponse>,
    },
    /// Registry statistics.
    Stats { reply: Reply<StatsResponse> },
}

/// Response carrying a single identity id.
#[derive(Debug, Clone, Serialize)]
pub struct IdResponse {
    pub id: IdentityId,
}

/// Response after linking.
#[derive(Debug, Clone, Serialize)]
pub struct LinkResponse {
    pub ids: Vec<IdentityId>,
    pub root: IdentityId,
}

/// Response after resolving a root.
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub id: IdentityId,
    pub root: IdentityId,
}

/// Registry statistics.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub identity_count: u64,
    pub path_compression: bool,
}
