//! Balance snapshot input: a JSON object of `address -> balance`.
//!
//! Balances may be decimal strings or unsigned JSON integers. Keys are
//! normalised to raw addresses, so `0xAB…` and `0xab…` are the same holder
//! and appearing twice is an error rather than a silent overwrite.

use primitive_types::U256;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::common::{hex_encode, parse_address, parse_amount, Address};
use crate::error::{DistributionError, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBalance {
    Text(String),
    Number(u64),
}

/// Keeps every entry, including repeated keys, in document order.
struct RawSnapshot(Vec<(String, RawBalance)>);

impl<'de> Deserialize<'de> for RawSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawSnapshot;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping addresses to balances")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, RawBalance>()? {
                    entries.push(entry);
                }
                Ok(RawSnapshot(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Parses a balance snapshot.
///
/// # Errors
/// - `InvalidInput` for malformed JSON, addresses or balances
/// - `DuplicateAccount` if two keys name the same address
pub fn parse_balance_snapshot(json: &str) -> Result<BTreeMap<Address, U256>> {
    let RawSnapshot(entries) = serde_json::from_str(json)
        .map_err(|e| DistributionError::invalid(format!("malformed balance snapshot: {}", e)))?;

    let mut balances = BTreeMap::new();
    for (key, raw) in entries {
        let account = parse_address(&key)?;
        let balance = match raw {
            RawBalance::Text(text) => parse_amount(&text)?,
            RawBalance::Number(n) => U256::from(n),
        };
        if balances.insert(account, balance).is_some() {
            return Err(DistributionError::DuplicateAccount(hex_encode(account)));
        }
    }
    Ok(balances)
}
