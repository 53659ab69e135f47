//! Property tests for the union-find laws the registry guarantees.

use lucid_core::IdentityId;
use lucid_integration_tests::{ids, partition, registry_with_wallets};
use proptest::prelude::*;

const POOL: u64 = 8;

/// A batch of link calls, each naming 2..=4 ids from the pool.
fn link_batches() -> impl Strategy<Value = Vec<Vec<u64>>> {
    prop::collection::vec(prop::collection::vec(1..=POOL, 2..=4), 0..6)
}

proptest! {
    #[test]
    fn prop_root_is_smallest_member(batches in link_batches()) {
        let mut registry = registry_with_wallets(POOL);
        for batch in &batches {
            registry.link(&ids(batch)).unwrap();
        }
        let roots = partition(&mut registry, POOL);
        for (index, root) in roots.iter().enumerate() {
            let id = IdentityId(index as u64 + 1);
            prop_assert!(*root <= id);
            // A root resolves to itself.
            prop_assert_eq!(roots[root.get() as usize - 1], *root);
        }
    }

    #[test]
    fn prop_linking_is_associative(a in 1..=POOL, b in 1..=POOL, c in 1..=POOL) {
        let mut stepwise = registry_with_wallets(POOL);
        stepwise.link(&ids(&[a, b])).unwrap();
        stepwise.link(&ids(&[b, c])).unwrap();

        let mut at_once = registry_with_wallets(POOL);
        at_once.link(&ids(&[a, b, c])).unwrap();

        prop_assert_eq!(partition(&mut stepwise, POOL), partition(&mut at_once, POOL));
    }

    #[test]
    fn prop_link_order_does_not_matter(batch in prop::collection::vec(1..=POOL, 2..=5)) {
        let mut forward = registry_with_wallets(POOL);
        let root_forward = forward.link(&ids(&batch)).unwrap();

        let mut reversed_batch = batch.clone();
        reversed_batch.reverse();
        let mut backward = registry_with_wallets(POOL);
        let root_backward = backward.link(&ids(&reversed_batch)).unwrap();

        prop_assert_eq!(root_forward, root_backward);
        prop_assert_eq!(root_forward, IdentityId(*batch.iter().min().unwrap()));
        prop_assert_eq!(partition(&mut forward, POOL), partition(&mut backward, POOL));
    }

    #[test]
    fn prop_relinking_is_idempotent(batches in link_batches()) {
        let mut registry = registry_with_wallets(POOL);
        for batch in &batches {
            registry.link(&ids(batch)).unwrap();
        }
        let before = partition(&mut registry, POOL);
        for batch in &batches {
            registry.link(&ids(batch)).unwrap();
        }
        prop_assert_eq!(before, partition(&mut registry, POOL));
    }

    #[test]
    fn prop_find_is_stable(batches in link_batches(), probe in 1..=POOL) {
        let mut registry = registry_with_wallets(POOL);
        for batch in &batches {
            registry.link(&ids(batch)).unwrap();
        }
        let first = registry.find_root(IdentityId(probe)).unwrap();
        let writes = registry.store().committed_writes();
        let second = registry.find_root(IdentityId(probe)).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(registry.store().committed_writes(), writes);
    }

    #[test]
    fn prop_account_members_share_root(batches in link_batches(), probe in 1..=POOL) {
        let mut registry = registry_with_wallets(POOL);
        for batch in &batches {
            registry.link(&ids(batch)).unwrap();
        }
        let account = registry.get_account(IdentityId(probe)).unwrap();
        let roots = partition(&mut registry, POOL);
        let expected: Vec<IdentityId> = (1..=POOL)
            .map(IdentityId)
            .filter(|id| roots[id.get() as usize - 1] == account.root)
            .collect();
        prop_assert_eq!(&account.members, &expected);
        prop_assert_eq!(account.wallets.len(), expected.len());
    }
}
