#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::pool::PoolAsset;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_asset: Address,
    pub start_block: u32,
    pub end_block: u32,
    pub reward_per_block: i128,
    pub block: u32,
}

/// Fired when a pool is appended to the registry.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddPoolEvent {
    pub asset: PoolAsset,
    pub pool_weight: u64,
    pub last_reward_block: u32,
    pub min_deposit_amount: i128,
    pub unstake_locked_blocks: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolWeightSetEvent {
    pub pool: u32,
    pub pool_weight: u64,
    pub total_pool_weight: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfigSetEvent {
    pub pool: u32,
    pub min_deposit_amount: i128,
    pub unstake_locked_blocks: u32,
}

/// Fired when a participant adds stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub pool: u32,
    pub participant: Address,
    pub amount: i128,
}

/// Fired when stake moves into the withdrawal queue.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestWithdrawEvent {
    pub pool: u32,
    pub participant: Address,
    pub amount: i128,
    pub unlock_block: u32,
}

/// Fired when matured withdrawal requests are paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub pool: u32,
    pub participant: Address,
    pub amount: i128,
}

/// Fired when reward is paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimEvent {
    pub pool: u32,
    pub participant: Address,
    pub amount: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferEvent {
    pub from: Address,
    pub to: Address,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    reward_asset: Address,
    start_block: u32,
    end_block: u32,
    reward_per_block: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_asset,
            start_block,
            end_block,
            reward_per_block,
            block: env.ledger().sequence(),
        },
    );
}

pub fn publish_add_pool(
    env: &Env,
    index: u32,
    asset: PoolAsset,
    pool_weight: u64,
    last_reward_block: u32,
    min_deposit_amount: i128,
    unstake_locked_blocks: u32,
) {
    env.events().publish(
        (symbol_short!("ADD_POOL"), index),
        AddPoolEvent {
            asset,
            pool_weight,
            last_reward_block,
            min_deposit_amount,
            unstake_locked_blocks,
        },
    );
}

pub fn publish_pool_weight_set(env: &Env, pool: u32, pool_weight: u64, total_pool_weight: u64) {
    env.events().publish(
        (symbol_short!("POOL_WGT"), pool),
        PoolWeightSetEvent {
            pool,
            pool_weight,
            total_pool_weight,
        },
    );
}

pub fn publish_pool_config_set(
    env: &Env,
    pool: u32,
    min_deposit_amount: i128,
    unstake_locked_blocks: u32,
) {
    env.events().publish(
        (symbol_short!("POOL_CFG"), pool),
        PoolConfigSetEvent {
            pool,
            min_deposit_amount,
            unstake_locked_blocks,
        },
    );
}

pub fn publish_deposit(env: &Env, pool: u32, participant: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), participant.clone()),
        DepositEvent {
            pool,
            participant,
            amount,
        },
    );
}

pub fn publish_request_withdraw(
    env: &Env,
    pool: u32,
    participant: Address,
    amount: i128,
    unlock_block: u32,
) {
    env.events().publish(
        (symbol_short!("REQ_WDRAW"), participant.clone()),
        RequestWithdrawEvent {
            pool,
            participant,
            amount,
            unlock_block,
        },
    );
}

pub fn publish_withdraw(env: &Env, pool: u32, participant: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), participant.clone()),
        WithdrawEvent {
            pool,
            participant,
            amount,
        },
    );
}

pub fn publish_claim(env: &Env, pool: u32, participant: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLAIM"), participant.clone()),
        ClaimEvent {
            pool,
            participant,
            amount,
        },
    );
}

pub fn publish_reward_asset_set(env: &Env, reward_asset: Address) {
    env.events()
        .publish((symbol_short!("RWD_ASSET"),), reward_asset);
}

pub fn publish_start_block_set(env: &Env, start_block: u32) {
    env.events()
        .publish((symbol_short!("START_BLK"),), start_block);
}

pub fn publish_end_block_set(env: &Env, end_block: u32) {
    env.events().publish((symbol_short!("END_BLK"),), end_block);
}

pub fn publish_reward_per_block_set(env: &Env, reward_per_block: i128) {
    env.events()
        .publish((symbol_short!("RWD_RATE"),), reward_per_block);
}

pub fn publish_withdraw_paused(env: &Env, paused: bool) {
    env.events().publish((symbol_short!("WD_PAUSE"),), paused);
}

pub fn publish_claim_paused(env: &Env, paused: bool) {
    env.events().publish((symbol_short!("CL_PAUSE"),), paused);
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferEvent {
            from: current_admin,
            to: proposed_admin,
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferEvent {
            from: old_admin,
            to: new_admin,
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferEvent {
            from: admin,
            to: cancelled_proposed,
        },
    );
}
