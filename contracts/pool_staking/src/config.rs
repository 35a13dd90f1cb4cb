use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::{access::AdminGrant, ContractError};

// ── Storage keys ─────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const TTL_EXTEND_TO: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const TTL_THRESHOLD: u32 = TTL_EXTEND_TO - DAY_IN_LEDGERS;

// ── Types ────────────────────────────────────────────────────────────────────

/// Contract-wide parameters. Written by `initialize` and admin setters only.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlobalConfig {
    pub reward_asset: Address,
    /// Stellar Asset Contract of the ledger's native currency, used by the
    /// `PoolAsset::Native` pool.
    pub native_asset: Address,
    pub start_block: u32,
    pub end_block: u32,
    pub reward_per_block: i128,
    pub withdraw_paused: bool,
    pub claim_paused: bool,
    pub total_pool_weight: u64,
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load(env: &Env) -> Result<GlobalConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

/// First write of the configuration, performed by `initialize`.
pub(crate) fn init(env: &Env, config: &GlobalConfig) {
    env.storage().instance().set(&CONFIG, config);
    extend_instance_ttl(env);
}

/// Persist an admin-modified configuration.
pub(crate) fn update(env: &Env, _grant: &AdminGrant, config: &GlobalConfig) {
    env.storage().instance().set(&CONFIG, config);
    extend_instance_ttl(env);
}

pub(crate) fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Validation ───────────────────────────────────────────────────────────────

pub fn validate_block_range(start_block: u32, end_block: u32) -> Result<(), ContractError> {
    if start_block > end_block {
        return Err(ContractError::InvalidBlockRange);
    }
    Ok(())
}

pub fn validate_reward_per_block(reward_per_block: i128) -> Result<(), ContractError> {
    if reward_per_block <= 0 {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}
