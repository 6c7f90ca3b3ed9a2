use primitive_types::U256;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{DistributionError, Result};

/// A 20-byte Ethereum account address.
pub type Address = [u8; 20];

/// A 32-byte Keccak256 digest (leaf, internal node or root).
pub type Hash32 = [u8; 32];

/// Parses an Ethereum address from a hex string.
///
/// # Arguments
/// * `addr_str` - The address string, with or without "0x" prefix
///
/// # Returns
/// A 20-byte array representing the address
///
/// # Errors
/// Returns `InvalidInput` if the address is not 40 hex chars or contains invalid
/// hex
pub fn parse_address(addr_str: &str) -> Result<Address> {
    let cleaned = strip_hex_prefix(addr_str.trim());
    if cleaned.len() != 40 {
        return Err(DistributionError::invalid(format!(
            "invalid address length: expected 40 hex chars, got {}",
            cleaned.len()
        )));
    }
    let mut address = [0u8; 20];
    hex::decode_to_slice(cleaned, &mut address)
        .map_err(|e| DistributionError::invalid(format!("invalid address hex: {}", e)))?;
    Ok(address)
}

/// Parses a 32-byte hash from a hex string (with or without "0x").
pub fn parse_hash(hash_str: &str) -> Result<Hash32> {
    let cleaned = strip_hex_prefix(hash_str.trim());
    if cleaned.len() != 64 {
        return Err(DistributionError::invalid(format!(
            "invalid hash length: expected 64 hex chars, got {}",
            cleaned.len()
        )));
    }
    let mut hash = [0u8; 32];
    hex::decode_to_slice(cleaned, &mut hash)
        .map_err(|e| DistributionError::invalid(format!("invalid hash hex: {}", e)))?;
    Ok(hash)
}

/// Parses a non-negative decimal integer that must fit in 256 bits.
///
/// Signs, whitespace inside the number, and the empty string are rejected.
pub fn parse_amount(amount_str: &str) -> Result<U256> {
    let trimmed = amount_str.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DistributionError::invalid(format!(
            "invalid amount '{}': expected decimal digits",
            amount_str
        )));
    }
    U256::from_dec_str(trimmed).map_err(|_| {
        DistributionError::invalid(format!("amount '{}' does not fit in 256 bits", trimmed))
    })
}

/// Lowercase `0x`-prefixed hex encoding.
pub fn hex_encode(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Writes `contents` to `path` through a temporary sibling file and a rename,
/// so readers never observe a half-written file.
pub fn write_file_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    std::fs::rename(&temp_path, path)
}
