//! Claim leaf encoding.
//!
//! Leaf formula: `keccak256(uint256 index || address account || uint256 amount)`,
//! i.e. Solidity's `abi.encodePacked(index, account, amount)`: two 32-byte
//! big-endian words around the raw 20-byte address, 84 bytes in total.

use primitive_types::U256;
use sha3::{Digest, Keccak256};

use crate::common::{Address, Hash32};

/// Length of the packed `(uint256, address, uint256)` preimage.
pub const PACKED_LEAF_LEN: usize = 32 + 20 + 32;

/// Packs a claim exactly as `abi.encodePacked(uint256, address, uint256)`.
pub fn pack_leaf(index: U256, account: &Address, amount: U256) -> [u8; PACKED_LEAF_LEN] {
    let mut packed = [0u8; PACKED_LEAF_LEN];
    index.to_big_endian(&mut packed[0..32]);
    packed[32..52].copy_from_slice(account);
    amount.to_big_endian(&mut packed[52..84]);
    packed
}

/// Computes the Merkle leaf for a claim.
///
/// This MUST match the hash the on-chain distributor recomputes from the
/// same three values; any change here invalidates every published proof.
pub fn encode_leaf(index: U256, account: &Address, amount: U256) -> Hash32 {
    Keccak256::digest(pack_leaf(index, account, amount)).into()
}
