//! Distribution assembly: balances in, root plus per-account proofs out.

use primitive_types::U256;
use std::collections::BTreeMap;
use tracing::info;

use crate::common::{hex_encode, Address, Hash32};
use crate::error::{DistributionError, Result};
use crate::leaf::encode_leaf;
use crate::tree::MerkleTree;

/// One account's entitlement within a distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    /// Position of the account in ascending address order.
    pub index: u64,
    pub account: Address,
    pub amount: U256,
}

impl Claim {
    pub fn leaf(&self) -> Hash32 {
        encode_leaf(U256::from(self.index), &self.account, self.amount)
    }
}

/// A claim together with its inclusion proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimWithProof {
    pub claim: Claim,
    pub proof: Vec<Hash32>,
}

/// A finished distribution round. Never modified after assembly; a new round
/// is a new `Distribution` with a new root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub merkle_root: Hash32,
    /// Sum of all claim amounts.
    pub token_total: U256,
    pub claims: BTreeMap<Address, ClaimWithProof>,
}

impl Distribution {
    pub fn claim(&self, account: &Address) -> Option<&ClaimWithProof> {
        self.claims.get(account)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

/// Builds a distribution from `(account, amount)` pairs in any order.
///
/// Indices follow ascending account order, so the result depends only on the
/// set of pairs. Nothing is produced unless every pair is accepted.
///
/// # Errors
/// - `DuplicateAccount` if an account appears twice
/// - `InvalidInput` if the total overflows 256 bits
/// - `EmptyTree` for an empty input
pub fn assemble<I>(entries: I) -> Result<Distribution>
where
    I: IntoIterator<Item = (Address, U256)>,
{
    let mut balances = BTreeMap::new();
    for (account, amount) in entries {
        if balances.insert(account, amount).is_some() {
            return Err(DistributionError::DuplicateAccount(hex_encode(account)));
        }
    }
    assemble_balance_map(&balances)
}

/// Builds a distribution from an account → amount map.
pub fn assemble_balance_map(balances: &BTreeMap<Address, U256>) -> Result<Distribution> {
    if balances.is_empty() {
        return Err(DistributionError::EmptyTree);
    }

    let mut token_total = U256::zero();
    let mut claims = Vec::with_capacity(balances.len());
    for (index, (account, amount)) in balances.iter().enumerate() {
        token_total = token_total
            .checked_add(*amount)
            .ok_or_else(|| DistributionError::invalid("token total overflows uint256"))?;
        claims.push(Claim {
            index: index as u64,
            account: *account,
            amount: *amount,
        });
    }

    let leaves: Vec<Hash32> = claims.iter().map(Claim::leaf).collect();
    let tree = MerkleTree::new(leaves.clone())?;

    let mut with_proofs = BTreeMap::new();
    for (claim, leaf) in claims.into_iter().zip(&leaves) {
        let proof = tree.proof(leaf)?;
        with_proofs.insert(claim.account, ClaimWithProof { claim, proof });
    }

    let merkle_root = tree.root();
    info!(
        claims = with_proofs.len(),
        depth = tree.depth(),
        root = %hex_encode(merkle_root),
        total = %token_total,
        "assembled distribution"
    );

    Ok(Distribution {
        merkle_root,
        token_total,
        claims: with_proofs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::verify_proof;

    fn account(tag: u8, last: u8) -> Address {
        let mut a = [tag; 20];
        a[19] = last;
        a
    }

    #[test]
    fn test_two_claim_scenario() {
        let a = account(0xaa, 1);
        let b = account(0xbb, 2);
        let dist = assemble(vec![(b, U256::from(200u64)), (a, U256::from(100u64))]).unwrap();

        assert_eq!(dist.len(), 2);
        assert_eq!(dist.token_total, U256::from(300u64));

        let ca = dist.claim(&a).unwrap();
        let cb = dist.claim(&b).unwrap();
        assert_eq!(ca.claim.index, 0);
        assert_eq!(cb.claim.index, 1);
        assert_eq!(ca.proof, vec![cb.claim.leaf()]);
        assert_eq!(cb.proof, vec![ca.claim.leaf()]);
        assert!(verify_proof(&ca.claim.leaf(), &ca.proof, &dist.merkle_root));
        assert!(verify_proof(&cb.claim.leaf(), &cb.proof, &dist.merkle_root));
    }

    #[test]
    fn test_single_claim() {
        let a = account(0x01, 1);
        let dist = assemble(vec![(a, U256::from(5u64))]).unwrap();
        let claim = dist.claim(&a).unwrap();
        assert!(claim.proof.is_empty());
        assert_eq!(
            dist.merkle_root,
            encode_leaf(U256::zero(), &a, U256::from(5u64))
        );
    }

    #[test]
    fn test_duplicate_account() {
        let a = account(0xaa, 1);
        let result = assemble(vec![(a, U256::from(5u64)), (a, U256::from(7u64))]);
        assert!(matches!(result, Err(DistributionError::DuplicateAccount(_))));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            assemble(Vec::<(Address, U256)>::new()),
            Err(DistributionError::EmptyTree)
        );
    }

    #[test]
    fn test_zero_amount_is_an_ordinary_claim() {
        let holder = account(2, 2);
        let dist = assemble(vec![
            (account(1, 1), U256::from(5u64)),
            (holder, U256::zero()),
        ])
        .unwrap();

        assert_eq!(dist.len(), 2);
        assert_eq!(dist.token_total, U256::from(5u64));
        let entry = dist.claim(&holder).unwrap();
        assert_eq!(entry.claim.amount, U256::zero());
        assert_eq!(entry.claim.index, 1);
        assert!(verify_proof(&entry.claim.leaf(), &entry.proof, &dist.merkle_root));
    }

    #[test]
    fn test_total_overflow() {
        let result = assemble(vec![(account(1, 1), U256::MAX), (account(2, 2), U256::one())]);
        assert!(matches!(result, Err(DistributionError::InvalidInput(_))));
    }

    #[test]
    fn test_indices_follow_account_order() {
        let entries: Vec<_> = [9u8, 3, 7, 1]
            .iter()
            .map(|&b| (account(b, b), U256::from(b as u64)))
            .collect();
        let dist = assemble(entries).unwrap();
        let indices: Vec<u64> = dist.claims.values().map(|c| c.claim.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(dist.claim(&account(1, 1)).unwrap().claim.index, 0);
        assert_eq!(dist.claim(&account(9, 9)).unwrap().claim.index, 3);
    }
}
