//! Sorted-pair binary Merkle tree.
//!
//! Layer 0 holds the leaves sorted by unsigned byte order with duplicates
//! removed. Internal nodes are `keccak256(min(a, b) || max(a, b))`, so a proof
//! is just a list of siblings with no left/right flags. The last node of an
//! odd-length layer is carried up unchanged.

use sha3::{Digest, Keccak256};
use tracing::debug;

use crate::common::{hex_encode, Hash32};
use crate::error::{DistributionError, Result};

/// Computes a Keccak256 hash of two nodes after ordering them by byte value.
pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Keccak256::new()
        .chain_update(lo)
        .chain_update(hi)
        .finalize()
        .into()
}

/// A built Merkle tree. Construction is the only way to get one; the layers
/// are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// `layers[0]` = sorted leaves, last layer = `[root]`.
    layers: Vec<Vec<Hash32>>,
}

impl MerkleTree {
    /// Builds a tree over `leaves`, in any order.
    ///
    /// # Errors
    /// `EmptyTree` if `leaves` is empty.
    pub fn new(mut leaves: Vec<Hash32>) -> Result<Self> {
        if leaves.is_empty() {
            return Err(DistributionError::EmptyTree);
        }

        leaves.sort_unstable();
        let before = leaves.len();
        leaves.dedup();
        if leaves.len() != before {
            debug!(
                dropped = before - leaves.len(),
                "collapsed duplicate leaves"
            );
        }

        let mut layers = vec![leaves];
        while let Some(level) = layers.last().filter(|level| level.len() > 1) {
            let next_level: Vec<Hash32> = level
                .chunks(2)
                .map(|chunk| match chunk {
                    [left, right] => hash_pair(left, right),
                    [odd] => *odd,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();
            layers.push(next_level);
        }

        debug!(
            leaves = layers[0].len(),
            depth = layers.len() - 1,
            "built merkle tree"
        );
        Ok(Self { layers })
    }

    /// The Merkle root.
    pub fn root(&self) -> Hash32 {
        // Construction guarantees at least one non-empty layer.
        self.layers[self.layers.len() - 1][0]
    }

    /// Number of distinct leaves.
    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Number of layers above the leaves.
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    /// Sorted, deduplicated leaf layer.
    pub fn leaves(&self) -> &[Hash32] {
        &self.layers[0]
    }

    /// Generates the sibling list proving `leaf` is part of the tree.
    ///
    /// Levels where the node has no partner contribute nothing, so the proof
    /// may be shorter than `depth()`.
    ///
    /// # Errors
    /// `LeafNotFound` if `leaf` was never included.
    pub fn proof(&self, leaf: &Hash32) -> Result<Vec<Hash32>> {
        let mut index = self.layers[0]
            .binary_search(leaf)
            .map_err(|_| DistributionError::LeafNotFound(hex_encode(leaf)))?;

        let mut proof = Vec::with_capacity(self.depth());
        for level in &self.layers[..self.layers.len() - 1] {
            let sibling_index = index ^ 1;
            if let Some(sibling) = level.get(sibling_index) {
                proof.push(*sibling);
            }
            index /= 2;
        }

        Ok(proof)
    }
}
