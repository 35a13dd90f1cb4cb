//! Scaled fixed-point math behind the per-pool reward accumulator.
//!
//! `acc_reward_per_share` is stored multiplied by [`SCALE`]. Every division
//! floors (operands are never negative) and every multiplication is checked,
//! surfacing overflow as [`ContractError::ArithmeticOverflow`] instead of a
//! host trap.

use crate::ContractError;

/// Fixed-point scale of `acc_reward_per_share` and `reward_debt`.
pub const SCALE: i128 = 1_000_000_000_000;

/// Number of rewardable blocks between `from` and `to`, clipped to the
/// `[start_block, end_block]` emission window.
pub fn multiplier(from: u32, to: u32, start_block: u32, end_block: u32) -> u32 {
    let from = from.max(start_block);
    let to = to.min(end_block);
    to.saturating_sub(from)
}

/// Share of the global emission owed to one pool for `blocks` blocks.
///
/// Returns zero when no weight is registered at all.
pub fn pool_reward(
    blocks: u32,
    reward_per_block: i128,
    pool_weight: u64,
    total_pool_weight: u64,
) -> Result<i128, ContractError> {
    if blocks == 0 || total_pool_weight == 0 {
        return Ok(0);
    }
    i128::from(blocks)
        .checked_mul(reward_per_block)
        .and_then(|r| r.checked_mul(i128::from(pool_weight)))
        .and_then(|r| r.checked_div(i128::from(total_pool_weight)))
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Fold `reward` into the accumulator, spread over `total_staked` units.
pub fn advance_acc(acc: i128, reward: i128, total_staked: i128) -> Result<i128, ContractError> {
    if total_staked <= 0 {
        return Ok(acc);
    }
    reward
        .checked_mul(SCALE)
        .and_then(|r| r.checked_div(total_staked))
        .and_then(|delta| acc.checked_add(delta))
        .ok_or(ContractError::ArithmeticOverflow)
}

/// `staked * acc / SCALE`, floored.
pub fn accrued(staked: i128, acc: i128) -> Result<i128, ContractError> {
    staked
        .checked_mul(acc)
        .map(|v| v / SCALE)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Reward earned since the last settlement.
pub fn pending(staked: i128, acc: i128, reward_debt: i128) -> Result<i128, ContractError> {
    let owed = accrued(staked, acc)?
        .checked_sub(reward_debt)
        .ok_or(ContractError::ArithmeticOverflow)?;
    Ok(owed.max(0))
}
