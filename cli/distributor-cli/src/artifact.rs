//! Persisted JSON form of a distribution and whole-artifact verification.
//!
//! ```json
//! {
//!   "merkleRoot": "0x…64 hex…",
//!   "tokenTotal": "300",
//!   "claims": {
//!     "0x…40 hex…": { "index": 0, "account": "0x…", "amount": "100", "proof": ["0x…"] }
//!   }
//! }
//! ```

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::common::{hex_encode, parse_address, parse_amount, parse_hash, Address, Hash32};
use crate::distribution::{Claim, ClaimWithProof, Distribution};
use crate::error::{DistributionError, Result};
use crate::tree::MerkleTree;
use crate::verify::verify_proof;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimArtifact {
    pub index: u64,
    pub account: String,
    /// Decimal digits.
    pub amount: String,
    pub proof: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionArtifact {
    pub merkle_root: String,
    /// Decimal digits.
    pub token_total: String,
    pub claims: BTreeMap<String, ClaimArtifact>,
}

impl From<&ClaimWithProof> for ClaimArtifact {
    fn from(entry: &ClaimWithProof) -> Self {
        Self {
            index: entry.claim.index,
            account: hex_encode(entry.claim.account),
            amount: entry.claim.amount.to_string(),
            proof: entry.proof.iter().map(hex_encode).collect(),
        }
    }
}

impl From<&Distribution> for DistributionArtifact {
    fn from(dist: &Distribution) -> Self {
        Self {
            merkle_root: hex_encode(dist.merkle_root),
            token_total: dist.token_total.to_string(),
            claims: dist
                .claims
                .values()
                .map(|entry| (hex_encode(entry.claim.account), ClaimArtifact::from(entry)))
                .collect(),
        }
    }
}

impl TryFrom<&ClaimArtifact> for ClaimWithProof {
    type Error = DistributionError;

    fn try_from(raw: &ClaimArtifact) -> Result<Self> {
        Ok(Self {
            claim: Claim {
                index: raw.index,
                account: parse_address(&raw.account)?,
                amount: parse_amount(&raw.amount)?,
            },
            proof: raw
                .proof
                .iter()
                .map(|entry| parse_hash(entry))
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

impl TryFrom<&DistributionArtifact> for Distribution {
    type Error = DistributionError;

    /// Decodes every field. Structural checks only; use [`verify_distribution`]
    /// to check the proofs.
    fn try_from(raw: &DistributionArtifact) -> Result<Self> {
        let merkle_root = parse_hash(&raw.merkle_root)?;
        let token_total = parse_amount(&raw.token_total)?;
        let mut claims = BTreeMap::new();
        for (key, raw_claim) in &raw.claims {
            let key_account = parse_address(key)?;
            let entry = ClaimWithProof::try_from(raw_claim)?;
            if entry.claim.account != key_account {
                return Err(DistributionError::invalid(format!(
                    "claim keyed by {} names account {}",
                    key, raw_claim.account
                )));
            }
            if claims.insert(key_account, entry).is_some() {
                return Err(DistributionError::DuplicateAccount(hex_encode(key_account)));
            }
        }
        Ok(Self {
            merkle_root,
            token_total,
            claims,
        })
    }
}

impl DistributionArtifact {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| DistributionError::invalid(format!("malformed artifact JSON: {}", e)))
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A reason a decoded distribution does not hold together.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyFailure {
    #[error("proof for {account} does not reach the root")]
    InvalidProof { account: String },

    #[error("claim indices are not a permutation of 0..{count}")]
    BadIndices { count: usize },

    #[error("claims rebuild root {computed}, artifact says {published}")]
    RootMismatch { published: String, computed: String },

    #[error("claims sum to {computed}, artifact says {published}")]
    TokenTotalMismatch { published: String, computed: String },

    #[error("distribution has no claims")]
    Empty,
}

/// Checks every claim's proof, the index set, the token total, and that the
/// claims rebuild the published root. Returns every failure found; an empty
/// list means the distribution is consistent.
pub fn verify_distribution(dist: &Distribution) -> Vec<VerifyFailure> {
    if dist.claims.is_empty() {
        return vec![VerifyFailure::Empty];
    }

    let mut failures = Vec::new();
    let mut leaves: Vec<Hash32> = Vec::with_capacity(dist.claims.len());
    let mut indices = BTreeSet::new();
    let mut total = Some(U256::zero());

    for entry in dist.claims.values() {
        let leaf = entry.claim.leaf();
        if !verify_proof(&leaf, &entry.proof, &dist.merkle_root) {
            failures.push(VerifyFailure::InvalidProof {
                account: hex_encode(entry.claim.account),
            });
        }
        leaves.push(leaf);
        indices.insert(entry.claim.index);
        total = total.and_then(|t| t.checked_add(entry.claim.amount));
    }

    let count = dist.claims.len();
    let indices_ok = indices.len() == count
        && indices.iter().enumerate().all(|(i, &index)| i as u64 == index);
    if !indices_ok {
        failures.push(VerifyFailure::BadIndices { count });
    }

    match total {
        Some(total) if total == dist.token_total => {}
        other => failures.push(VerifyFailure::TokenTotalMismatch {
            published: dist.token_total.to_string(),
            computed: other.map_or_else(|| "overflow".to_string(), |t| t.to_string()),
        }),
    }

    // Non-empty claims always yield a tree.
    if let Ok(tree) = MerkleTree::new(leaves) {
        if tree.root() != dist.merkle_root {
            failures.push(VerifyFailure::RootMismatch {
                published: hex_encode(dist.merkle_root),
                computed: hex_encode(tree.root()),
            });
        }
    }

    failures
}

/// Looks up one account's claim and returns it only if its proof verifies.
pub fn verified_claim<'a>(
    dist: &'a Distribution,
    account: &Address,
) -> Option<&'a ClaimWithProof> {
    dist.claim(account)
        .filter(|entry| verify_proof(&entry.claim.leaf(), &entry.proof, &dist.merkle_root))
}
