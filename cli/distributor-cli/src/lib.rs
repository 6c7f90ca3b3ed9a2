//! Deterministic Merkle distributions.
//!
//! Leaves are `keccak256(abi.encodePacked(uint256 index, address account,
//! uint256 amount))`; internal nodes hash each pair in sorted byte order. The
//! same scheme is what an on-chain distributor recomputes when a claim is
//! submitted, so proofs produced here verify there unchanged.

pub mod artifact;
pub mod common;
pub mod distribution;
pub mod error;
pub mod leaf;
pub mod logging;
pub mod rewards;
pub mod snapshot;
pub mod tree;
pub mod verify;

pub use artifact::{verified_claim, verify_distribution, DistributionArtifact, VerifyFailure};
pub use common::{
    hex_encode, parse_address, parse_amount, parse_hash, write_file_atomic, Address, Hash32,
};
pub use distribution::{assemble, assemble_balance_map, Claim, ClaimWithProof, Distribution};
pub use error::{DistributionError, Result};
pub use leaf::encode_leaf;
pub use rewards::{compute_weekly_rewards, reward_per_token, weekly_distribution, SCALE_DECIMALS};
pub use snapshot::parse_balance_snapshot;
pub use tree::{hash_pair, MerkleTree};
pub use verify::{compute_root, verify_proof, verify_proof_hex};

pub use primitive_types::U256;
