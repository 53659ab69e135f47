//! Notifications published by the registry after each successful operation.

use serde::{Deserialize, Serialize};

use crate::types::{Address, Credential, IdentityId};

/// A registry notification.
///
/// Events are published in call order and only for operations that
/// committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// A new identity was registered.
    IdentityCreated {
        id: IdentityId,
        /// Platform name for socials, `"wallet"` for wallets.
        kind: String,
        /// Social handle, empty for wallets.
        handle: String,
        /// Wallet address, absent for socials.
        wallet: Option<Address>,
    },
    /// A set of identities was merged into one root.
    IdentitiesLinked {
        /// The ids exactly as supplied to `link`.
        ids: Vec<IdentityId>,
        root: IdentityId,
    },
}

impl RegistryEvent {
    /// Build the creation event for a freshly registered credential.
    pub fn identity_created(id: IdentityId, credential: &Credential) -> Self {
        Self::IdentityCreated {
            id,
            kind: credential.kind().to_string(),
            handle: credential.handle().to_string(),
            wallet: credential.as_wallet(),
        }
    }

    /// Wallet address carried by a creation event, or the zero address.
    pub fn wallet_or_zero(&self) -> Address {
        match self {
            Self::IdentityCreated {
                wallet: Some(address),
                ..
            } => *address,
            _ => Address::ZERO,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::IdentityCreated { .. } => "identity_created",
            Self::IdentitiesLinked { .. } => "identities_linked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SocialCredential;

    #[test]
    fn test_social_created_event() {
        let credential =
            Credential::Social(SocialCredential::new("twitter", "user123", "Alice", "image.jpg"));
        let event = RegistryEvent::identity_created(IdentityId(1), &credential);
        assert_eq!(
            event,
            RegistryEvent::IdentityCreated {
                id: IdentityId(1),
                kind: "twitter".into(),
                handle: "user123".into(),
                wallet: None,
            }
        );
        assert_eq!(event.wallet_or_zero(), Address::ZERO);
    }

    #[test]
    fn test_wallet_created_event() {
        let address = Address([7u8; 20]);
        let event = RegistryEvent::identity_created(IdentityId(4), &Credential::Wallet(address));
        match &event {
            RegistryEvent::IdentityCreated { kind, handle, .. } => {
                assert_eq!(kind, "wallet");
                assert!(handle.is_empty());
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(event.wallet_or_zero(), address);
    }

    #[test]
    fn test_event_json_tag() {
        let event = RegistryEvent::IdentitiesLinked {
            ids: vec![IdentityId(1), IdentityId(2)],
            root: IdentityId(1),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "identities_linked");
        assert_eq!(json["ids"], serde_json::json!([1, 2]));
        assert_eq!(event.name(), "identities_linked");
    }
}
