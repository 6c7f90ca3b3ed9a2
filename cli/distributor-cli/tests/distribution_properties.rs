//! Property tests for tree construction, proof generation and verification.

use std::collections::BTreeMap;

use merkle_distributor::{
    assemble, compute_weekly_rewards, encode_leaf, parse_address, verify_distribution,
    verify_proof, Address, DistributionError, Hash32, MerkleTree, U256,
};
use proptest::prelude::*;

fn arb_entries() -> impl Strategy<Value = Vec<(Address, U256)>> {
    prop::collection::btree_map(any::<[u8; 20]>(), 1u64..u64::MAX, 1..48)
        .prop_map(|map| map.into_iter().map(|(a, v)| (a, U256::from(v))).collect())
}

fn arb_shuffled_pair() -> impl Strategy<Value = (Vec<(Address, U256)>, Vec<(Address, U256)>)> {
    arb_entries().prop_flat_map(|entries| {
        let shuffled = Just(entries.clone()).prop_shuffle();
        (Just(entries), shuffled)
    })
}

proptest! {
    #[test]
    fn assemble_is_order_independent((entries, shuffled) in arb_shuffled_pair()) {
        let a = assemble(entries).unwrap();
        let b = assemble(shuffled).unwrap();
        prop_assert_eq!(a.merkle_root, b.merkle_root);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn every_claim_verifies(entries in arb_entries()) {
        let dist = assemble(entries).unwrap();
        for entry in dist.claims.values() {
            let leaf = encode_leaf(
                U256::from(entry.claim.index),
                &entry.claim.account,
                entry.claim.amount,
            );
            prop_assert!(verify_proof(&leaf, &entry.proof, &dist.merkle_root));
        }
        prop_assert!(verify_distribution(&dist).is_empty());
    }

    #[test]
    fn flipped_proof_byte_is_rejected(
        entries in arb_entries(),
        pick in any::<prop::sample::Index>(),
        node in any::<prop::sample::Index>(),
        byte in 0usize..32,
        mask in 1u8..=255,
    ) {
        let dist = assemble(entries).unwrap();
        let claims: Vec<_> = dist.claims.values().collect();
        let entry = pick.get(&claims);
        prop_assume!(!entry.proof.is_empty());

        let mut proof = entry.proof.clone();
        let i = node.index(proof.len());
        proof[i][byte] ^= mask;
        prop_assert!(!verify_proof(&entry.claim.leaf(), &proof, &dist.merkle_root));
    }

    #[test]
    fn foreign_proof_is_rejected(
        entries in arb_entries(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let dist = assemble(entries).unwrap();
        let claims: Vec<_> = dist.claims.values().collect();
        let first = a.get(&claims);
        let second = b.get(&claims);
        prop_assume!(first.claim.account != second.claim.account);
        prop_assert!(!verify_proof(&first.claim.leaf(), &second.proof, &dist.merkle_root));
    }

    #[test]
    fn tree_shape_and_proofs(leaves in prop::collection::vec(any::<[u8; 32]>(), 1..80)) {
        let tree = MerkleTree::new(leaves.clone()).unwrap();
        let mut distinct = leaves.clone();
        distinct.sort();
        distinct.dedup();
        prop_assert_eq!(tree.leaves(), distinct.as_slice());

        // depth == ceil(log2(n))
        let mut n = distinct.len();
        let mut depth = 0;
        while n > 1 {
            n = n.div_ceil(2);
            depth += 1;
        }
        prop_assert_eq!(tree.depth(), depth);

        for leaf in &leaves {
            let proof = tree.proof(leaf).unwrap();
            prop_assert!(proof.len() <= tree.depth());
            prop_assert!(verify_proof(leaf, &proof, &tree.root()));
        }
    }

    #[test]
    fn rebuilding_reversed_leaves_is_identical(
        leaves in prop::collection::vec(any::<[u8; 32]>(), 1..40),
    ) {
        let forward = MerkleTree::new(leaves.clone()).unwrap();
        let mut reversed = leaves;
        reversed.reverse();
        prop_assert_eq!(forward, MerkleTree::new(reversed).unwrap());
    }

    #[test]
    fn zero_balances_never_rewarded(
        balances in prop::collection::btree_map(any::<[u8; 20]>(), 0u64..1_000_000, 1..32),
        rate in 1u64..u64::MAX,
    ) {
        let balances: BTreeMap<Address, U256> =
            balances.into_iter().map(|(a, v)| (a, U256::from(v))).collect();
        let rewards = compute_weekly_rewards(&balances, U256::from(rate)).unwrap();
        for (holder, balance) in &balances {
            let expected = *balance * U256::from(rate) / U256::exp10(18);
            match rewards.get(holder) {
                Some(reward) => {
                    prop_assert!(!reward.is_zero());
                    prop_assert_eq!(*reward, expected);
                }
                None => prop_assert!(expected.is_zero()),
            }
        }
    }
}

#[test]
fn two_account_scenario() {
    let a = parse_address("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa1").unwrap();
    let b = parse_address("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb2").unwrap();
    let dist = assemble(vec![(a, U256::from(100u64)), (b, U256::from(200u64))]).unwrap();

    assert_eq!(dist.len(), 2);
    let leaf_a = encode_leaf(U256::zero(), &a, U256::from(100u64));
    let leaf_b = encode_leaf(U256::one(), &b, U256::from(200u64));
    assert_eq!(dist.claim(&a).unwrap().proof, vec![leaf_b]);
    assert_eq!(dist.claim(&b).unwrap().proof, vec![leaf_a]);
    assert!(verify_proof(&leaf_a, &[leaf_b], &dist.merkle_root));
    assert!(verify_proof(&leaf_b, &[leaf_a], &dist.merkle_root));
}

#[test]
fn single_claim_root_is_leaf() {
    let a = [0x5au8; 20];
    let dist = assemble(vec![(a, U256::from(9u64))]).unwrap();
    let entry = dist.claim(&a).unwrap();
    assert!(entry.proof.is_empty());
    assert_eq!(dist.merkle_root, encode_leaf(U256::zero(), &a, U256::from(9u64)));
}

#[test]
fn duplicate_account_rejected() {
    let a = [0xaau8; 20];
    let err = assemble(vec![(a, U256::from(5u64)), (a, U256::from(7u64))]).unwrap_err();
    assert!(matches!(err, DistributionError::DuplicateAccount(_)));
}

#[test]
fn hash_colliding_leaves_collapse_silently() {
    let leaf: Hash32 = [0x33; 32];
    let tree = MerkleTree::new(vec![leaf, leaf, leaf]).unwrap();
    assert_eq!(tree.leaf_count(), 1);
    assert_eq!(tree.root(), leaf);
}
