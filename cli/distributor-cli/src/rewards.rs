//! Weekly reward computation.
//!
//! Rates are fixed-point with [`SCALE_DECIMALS`] decimals, matching the
//! token's native unit. All arithmetic is integer; products are taken in
//! 512 bits so `balance * rate` never overflows before the division.

use primitive_types::{U256, U512};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::common::{hex_encode, Address};
use crate::distribution::{assemble_balance_map, Distribution};
use crate::error::{DistributionError, Result};

/// Decimals of a reward-per-token rate (`SCALE = 10^18`).
pub const SCALE_DECIMALS: usize = 18;

/// The fixed-point scale, `10^SCALE_DECIMALS`.
pub fn scale() -> U256 {
    U256::exp10(SCALE_DECIMALS)
}

fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256> {
    let quotient = a.full_mul(b) / U512::from(denominator);
    U256::try_from(quotient)
        .map_err(|_| DistributionError::invalid("reward does not fit in uint256"))
}

/// Computes `floor(balance * reward_per_token / SCALE)` for every holder.
///
/// Holders whose reward rounds down to zero are left out of the result.
pub fn compute_weekly_rewards(
    balances: &BTreeMap<Address, U256>,
    reward_per_token: U256,
) -> Result<BTreeMap<Address, U256>> {
    let scale = scale();
    let mut rewards = BTreeMap::new();
    for (holder, balance) in balances {
        let reward = mul_div(*balance, reward_per_token, scale)?;
        if reward.is_zero() {
            debug!(holder = %hex_encode(holder), "skipping zero reward");
            continue;
        }
        rewards.insert(*holder, reward);
    }
    info!(
        holders = balances.len(),
        rewarded = rewards.len(),
        "computed weekly rewards"
    );
    Ok(rewards)
}

/// Derives the rate that spreads `total_reward` over `total_supply` tokens:
/// `floor(total_reward * SCALE / total_supply)`.
///
/// # Errors
/// `InvalidInput` if `total_supply` is zero.
pub fn reward_per_token(total_reward: U256, total_supply: U256) -> Result<U256> {
    if total_supply.is_zero() {
        return Err(DistributionError::invalid("total supply is zero"));
    }
    mul_div(total_reward, scale(), total_supply)
}

/// Sums a balance snapshot with checked 256-bit addition.
pub fn total_supply(balances: &BTreeMap<Address, U256>) -> Result<U256> {
    balances.values().try_fold(U256::zero(), |acc, balance| {
        acc.checked_add(*balance)
            .ok_or_else(|| DistributionError::invalid("total supply overflows uint256"))
    })
}

/// Computes rewards and assembles them into a distribution.
///
/// # Errors
/// `EmptyTree` if no holder earns a non-zero reward.
pub fn weekly_distribution(
    balances: &BTreeMap<Address, U256>,
    reward_per_token: U256,
) -> Result<Distribution> {
    let rewards = compute_weekly_rewards(balances, reward_per_token)?;
    assemble_balance_map(&rewards)
}
