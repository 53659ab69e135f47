use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// Kind string reported for wallet identities in registry events.
pub const WALLET_KIND: &str = "wallet";

/// Numeric identifier of a registered identity.
///
/// Ids are assigned from 1 upwards and never reused; 0 is never a valid id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct IdentityId(pub u64);

impl IdentityId {
    /// Get the raw numeric value.
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Big-endian key bytes, so that keys sort in id order.
    pub fn to_key(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }
}

impl From<u64> for IdentityId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 20-byte wallet address.
///
/// Rendered as `0x`-prefixed lowercase hex; parsed from hex with or
/// without the prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address. Never registrable.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Create an address from raw bytes.
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Whether this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl FromStr for Address {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|e| RegistryError::InvalidAddress(format!("{}: {}", s, e)))?;
        let bytes: [u8; 20] = bytes.try_into().map_err(|b: Vec<u8>| {
            RegistryError::InvalidAddress(format!("expected 20 bytes, got {}", b.len()))
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A social-platform account claimed by an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocialCredential {
    /// Platform name (e.g., "twitter", "github").
    pub platform: String,
    /// Handle on that platform. Unique together with `platform`.
    pub handle: String,
    /// Human-readable display name. May be empty.
    pub display_name: String,
    /// Avatar image URI. May be empty.
    pub avatar_uri: String,
}

impl SocialCredential {
    /// Create a new social credential.
    pub fn new(
        platform: impl Into<String>,
        handle: impl Into<String>,
        display_name: impl Into<String>,
        avatar_uri: impl Into<String>,
    ) -> Self {
        Self {
            platform: platform.into(),
            handle: handle.into(),
            display_name: display_name.into(),
            avatar_uri: avatar_uri.into(),
        }
    }
}

/// The single credential carried by an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Credential {
    Social(SocialCredential),
    Wallet(Address),
}

impl Credential {
    /// Kind string: the platform for socials, `"wallet"` for wallets.
    pub fn kind(&self) -> &str {
        match self {
            Self::Social(s) => &s.platform,
            Self::Wallet(_) => WALLET_KIND,
        }
    }

    /// Handle for socials, empty for wallets.
    pub fn handle(&self) -> &str {
        match self {
            Self::Social(s) => &s.handle,
            Self::Wallet(_) => "",
        }
    }

    pub fn as_social(&self) -> Option<&SocialCredential> {
        match self {
            Self::Social(s) => Some(s),
            Self::Wallet(_) => None,
        }
    }

    pub fn as_wallet(&self) -> Option<Address> {
        match self {
            Self::Social(_) => None,
            Self::Wallet(a) => Some(*a),
        }
    }
}

/// One registry entry: an id, its union-find parent, and its credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    /// Union-find parent. Equal to `id` for roots.
    pub parent: IdentityId,
    pub credential: Credential,
}

impl Identity {
    /// Create a self-rooted identity.
    pub fn new_root(id: IdentityId, credential: Credential) -> Self {
        Self {
            id,
            parent: id,
            credential,
        }
    }

    /// Whether this identity is currently the root of its group.
    pub fn is_root(&self) -> bool {
        self.parent == self.id
    }
}

/// A merged account: every identity resolving to `root`, with credentials
/// partitioned by kind in ascending id order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub root: IdentityId,
    /// First non-empty social display name in id order, or empty.
    pub display_name: String,
    pub members: Vec<IdentityId>,
    pub wallets: Vec<Address>,
    pub socials: Vec<SocialCredential>,
}
