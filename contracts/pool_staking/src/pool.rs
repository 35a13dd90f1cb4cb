use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{
    access::AdminGrant,
    config::{GlobalConfig, TTL_EXTEND_TO, TTL_THRESHOLD},
    rewards, ContractError,
};

// ── Storage keys ─────────────────────────────────────────────────────────────

const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");

// Persistent storage uses tuple keys: (POOL, index)
const POOL: Symbol = symbol_short!("POOL");

// ── Types ────────────────────────────────────────────────────────────────────

/// Asset a pool accepts as stake.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PoolAsset {
    /// The ledger's native currency. Only allowed for pool 0.
    Native,
    Token(Address),
}

impl PoolAsset {
    /// Token contract that moves this asset.
    pub fn contract_address(&self, native_asset: &Address) -> Address {
        match self {
            PoolAsset::Native => native_asset.clone(),
            PoolAsset::Token(address) => address.clone(),
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub asset: PoolAsset,
    pub pool_weight: u64,
    pub last_reward_block: u32,
    /// Cumulative reward per staked unit, scaled by [`rewards::SCALE`].
    pub acc_reward_per_share: i128,
    pub total_staked: i128,
    pub min_deposit_amount: i128,
    pub unstake_locked_blocks: u32,
}

impl Pool {
    /// Advance the accumulator up to `now`, never past `end_block`.
    ///
    /// Returns `true` when the pool changed and must be written back.
    pub fn accrue(&mut self, config: &GlobalConfig, now: u32) -> Result<bool, ContractError> {
        if now <= self.last_reward_block {
            return Ok(false);
        }
        let effective = now.min(config.end_block);
        if effective <= self.last_reward_block {
            return Ok(false);
        }

        if self.total_staked > 0 {
            let blocks = rewards::multiplier(
                self.last_reward_block,
                effective,
                config.start_block,
                config.end_block,
            );
            let reward = rewards::pool_reward(
                blocks,
                config.reward_per_block,
                self.pool_weight,
                config.total_pool_weight,
            )?;
            self.acc_reward_per_share =
                rewards::advance_acc(self.acc_reward_per_share, reward, self.total_staked)?;
        }

        self.last_reward_block = effective;
        Ok(true)
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

/// The native currency may only be staked through `PoolAsset::Native`, and
/// that pool may only ever occupy index 0.
pub fn validate_asset(
    index: u32,
    asset: &PoolAsset,
    native_asset: &Address,
) -> Result<(), ContractError> {
    match asset {
        PoolAsset::Native if index != 0 => Err(ContractError::InvalidAsset),
        PoolAsset::Token(address) if address == native_asset => Err(ContractError::InvalidAsset),
        _ => Ok(()),
    }
}

pub fn validate_lock_period(unstake_locked_blocks: u32) -> Result<(), ContractError> {
    if unstake_locked_blocks == 0 {
        return Err(ContractError::InvalidLockPeriod);
    }
    Ok(())
}

// ── Registry storage ─────────────────────────────────────────────────────────

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn load_pool(env: &Env, index: u32) -> Result<Pool, ContractError> {
    let key = (POOL, index);
    let pool: Pool = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::PoolNotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(pool)
}

pub(crate) fn save_pool(env: &Env, index: u32, pool: &Pool) {
    let key = (POOL, index);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Append `pool` to the registry and return its index.
pub(crate) fn push_pool(env: &Env, _grant: &AdminGrant, pool: &Pool) -> Result<u32, ContractError> {
    let index = pool_count(env);
    let next = index.checked_add(1).ok_or(ContractError::ArithmeticOverflow)?;
    save_pool(env, index, pool);
    env.storage().instance().set(&POOL_COUNT, &next);
    Ok(index)
}
