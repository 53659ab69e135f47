//! Integration test: registration, linking, lookup and aggregation through
//! the public `Registry` API.

use lucid_core::{Address, IdentityId, RegistryError, RegistryEvent};
use lucid_integration_tests::{ids, registry_with_wallets, wallet};
use lucid_registry::Registry;

// =========================================================================
// Registration
// =========================================================================

#[test]
fn test_register_social_emits_event_and_resolves() {
    let mut registry = Registry::in_memory();
    let mut events = registry.subscribe();

    let id = registry
        .register_social("twitter", "user123", "Alice", "image.jpg")
        .expect("registration should succeed");
    assert_eq!(id, IdentityId(1));

    match events.try_recv().expect("an event should be published") {
        RegistryEvent::IdentityCreated {
            id,
            kind,
            handle,
            wallet,
        } => {
            assert_eq!(id, IdentityId(1));
            assert_eq!(kind, "twitter");
            assert_eq!(handle, "user123");
            assert!(wallet.is_none());
        }
        other => panic!("unexpected event: {:?}", other),
    }

    assert_eq!(
        registry.get_user_id_by_social("twitter", "user123").unwrap(),
        IdentityId(1)
    );
}

#[test]
fn test_register_wallet_then_duplicate_fails() {
    let mut registry = Registry::in_memory();
    let address: Address = "0x1c00000000000000000000000000000000000001".parse().unwrap();

    assert_eq!(registry.register_wallet(address).unwrap(), IdentityId(1));
    let err = registry.register_wallet(address).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateCredential(_)));
    assert_eq!(registry.identity_count().unwrap(), 1);
}

#[test]
fn test_duplicate_social_leaves_store_unchanged() {
    let mut registry = Registry::in_memory();
    registry.register_social("github", "octo", "Octo", "").unwrap();
    let mut events = registry.subscribe();

    let err = registry
        .register_social("github", "octo", "Someone else", "x.png")
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateCredential(_)));
    assert_eq!(registry.identity_count().unwrap(), 1);
    assert!(events.try_recv().is_err());

    let account = registry.get_account(IdentityId(1)).unwrap();
    assert_eq!(account.display_name, "Octo");
}

#[test]
fn test_same_handle_on_different_platforms_is_distinct() {
    let mut registry = Registry::in_memory();
    let a = registry.register_social("twitter", "alice", "", "").unwrap();
    let b = registry.register_social("github", "alice", "", "").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_zero_wallet_rejected() {
    let mut registry = Registry::in_memory();
    let err = registry.register_wallet(Address::ZERO).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidAddress(_)));
    assert_eq!(registry.identity_count().unwrap(), 0);
}

// =========================================================================
// Account linking
// =========================================================================

#[test]
fn test_link_in_two_steps_reaches_smallest_root() {
    let mut registry = Registry::in_memory();
    for handle in ["a", "b", "c"] {
        registry.register_social("twitter", handle, "", "").unwrap();
    }

    registry.link(&ids(&[1, 2])).unwrap();
    registry.link(&ids(&[2, 3])).unwrap();

    assert_eq!(registry.find_root(IdentityId(3)).unwrap(), IdentityId(1));
    assert_eq!(registry.find_root(IdentityId(1)).unwrap(), IdentityId(1));
}

#[test]
fn test_link_publishes_linked_event() {
    let mut registry = registry_with_wallets(3);
    let mut events = registry.subscribe();

    let root = registry.link(&ids(&[3, 2])).unwrap();
    assert_eq!(root, IdentityId(2));

    match events.try_recv().expect("an event should be published") {
        RegistryEvent::IdentitiesLinked { ids: linked, root } => {
            assert_eq!(linked, ids(&[3, 2]));
            assert_eq!(root, IdentityId(2));
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[test]
fn test_link_rejects_single_operand() {
    let mut registry = registry_with_wallets(1);
    let err = registry.link(&ids(&[1])).unwrap_err();
    assert!(matches!(err, RegistryError::InsufficientOperands(1)));
}

#[test]
fn test_link_unknown_ids_on_empty_store() {
    let mut registry = Registry::in_memory();
    let err = registry.link(&ids(&[999, 1000])).unwrap_err();
    assert!(matches!(err, RegistryError::UnknownIdentity(_)));
}

#[test]
fn test_link_with_one_unknown_id_changes_nothing() {
    let mut registry = registry_with_wallets(3);
    let err = registry.link(&ids(&[1, 2, 42])).unwrap_err();
    assert!(matches!(err, RegistryError::UnknownIdentity(_)));
    assert_eq!(registry.find_root(IdentityId(2)).unwrap(), IdentityId(2));
}

// =========================================================================
// Lookup and aggregation
// =========================================================================

#[test]
fn test_account_aggregates_socials_and_wallets() {
    let mut registry = Registry::in_memory();
    registry
        .register_social("twitter", "alice", "", "a.png")
        .unwrap();
    registry
        .register_social("github", "alice-dev", "Alice", "b.png")
        .unwrap();
    registry.register_wallet(wallet(7)).unwrap();
    registry.register_wallet(wallet(8)).unwrap();

    registry.link(&ids(&[1, 2, 3])).unwrap();

    for member in 1..=3 {
        let account = registry.get_account(IdentityId(member)).unwrap();
        assert_eq!(account.root, IdentityId(1));
        assert_eq!(account.socials.len(), 2);
        assert_eq!(account.wallets, vec![wallet(7)]);
        assert_eq!(account.display_name, "Alice");
        assert_eq!(account.members, ids(&[1, 2, 3]));
    }

    let lone = registry.get_account(IdentityId(4)).unwrap();
    assert_eq!(lone.root, IdentityId(4));
    assert!(lone.socials.is_empty());
    assert_eq!(lone.display_name, "");
}

#[test]
fn test_lookups_return_account_root() {
    let mut registry = Registry::in_memory();
    registry.register_wallet(wallet(1)).unwrap();
    registry
        .register_social("discord", "bob#1", "Bob", "")
        .unwrap();
    registry.link(&ids(&[2, 1])).unwrap();

    assert_eq!(
        registry.get_user_id_by_social("discord", "bob#1").unwrap(),
        IdentityId(1)
    );
    assert_eq!(
        registry.get_user_id_by_wallet(&wallet(1)).unwrap(),
        IdentityId(1)
    );
}

#[test]
fn test_lookups_of_unregistered_credentials_fail() {
    let mut registry = registry_with_wallets(1);
    assert!(matches!(
        registry.get_user_id_by_social("twitter", "nobody"),
        Err(RegistryError::UnknownIdentity(_))
    ));
    assert!(matches!(
        registry.get_user_id_by_wallet(&wallet(99)),
        Err(RegistryError::UnknownIdentity(_))
    ));
}

#[test]
fn test_state_survives_backend_handoff() {
    let mut registry = registry_with_wallets(4);
    registry.link(&ids(&[4, 3])).unwrap();
    registry.link(&ids(&[3, 2])).unwrap();

    let backend = registry.into_backend();
    let mut reopened = Registry::new(backend, Default::default());
    assert_eq!(reopened.identity_count().unwrap(), 4);
    assert_eq!(reopened.find_root(IdentityId(4)).unwrap(), IdentityId(2));
    assert_eq!(reopened.register_wallet(wallet(5)).unwrap(), IdentityId(5));
}
