//! Stand-alone proof verification.
//!
//! Mirrors the on-chain verifier: it only sees `(leaf, proof, root)` and never
//! the leaf set, so nothing here depends on [`crate::tree::MerkleTree`].

use crate::common::{parse_hash, Hash32};
use crate::error::Result;
use crate::tree::hash_pair;

/// Folds `proof` onto `leaf` with the sorted-pair rule and returns the root it
/// implies.
pub fn compute_root(leaf: &Hash32, proof: &[Hash32]) -> Hash32 {
    proof
        .iter()
        .fold(*leaf, |computed, sibling| hash_pair(&computed, sibling))
}

/// Returns true iff `proof` links `leaf` to `root`.
///
/// An empty proof is valid only for a single-leaf tree, where the leaf is the
/// root.
pub fn verify_proof(leaf: &Hash32, proof: &[Hash32], root: &Hash32) -> bool {
    compute_root(leaf, proof) == *root
}

/// Hex-string variant of [`verify_proof`].
///
/// # Errors
/// `InvalidInput` if any argument is not a 32-byte hex string. A well-formed
/// proof that does not match returns `Ok(false)`.
pub fn verify_proof_hex<S: AsRef<str>>(leaf: &str, proof: &[S], root: &str) -> Result<bool> {
    let leaf = parse_hash(leaf)?;
    let root = parse_hash(root)?;
    let proof = proof
        .iter()
        .map(|entry| parse_hash(entry.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    Ok(verify_proof(&leaf, &proof, &root))
}
