#![no_std]

pub mod access;
pub mod config;
pub mod events;
pub mod ledger;
pub mod pool;
pub mod rewards;
pub mod timelock;

use soroban_sdk::{contract, contracterror, contractimpl, log, token, Address, Env};

pub use access::AdminGrant;
pub use config::GlobalConfig;
pub use ledger::UserStake;
pub use pool::{Pool, PoolAsset};
pub use timelock::WithdrawRequest;

// ── Contract errors ──────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAsset = 4,
    InvalidLockPeriod = 5,
    AlreadyEnded = 6,
    WithdrawPaused = 7,
    ClaimPaused = 8,
    InsufficientStake = 9,
    BelowMinimum = 10,
    InvalidAmount = 11,
    InvalidBlockRange = 12,
    InvalidInput = 13,
    PoolNotFound = 14,
    ArithmeticOverflow = 15,
    InsufficientRewardBalance = 16,
    NoPendingAdmin = 17,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct PoolStakingContract;

#[contractimpl]
impl PoolStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `native_asset`     – SAC address of the ledger's native currency,
    ///                        moved by the `PoolAsset::Native` pool.
    /// * `reward_asset`     – SAC address of the token paid out by `claim`.
    /// * `start_block`      – first ledger sequence that earns reward.
    /// * `end_block`        – last ledger sequence that earns reward.
    /// * `reward_per_block` – reward emitted per ledger across all pools.
    pub fn initialize(
        env: Env,
        admin: Address,
        native_asset: Address,
        reward_asset: Address,
        start_block: u32,
        end_block: u32,
        reward_per_block: i128,
    ) -> Result<(), ContractError> {
        if config::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        config::validate_block_range(start_block, end_block)?;
        config::validate_reward_per_block(reward_per_block)?;

        access::set_admin(&env, &admin);
        config::init(
            &env,
            &GlobalConfig {
                reward_asset: reward_asset.clone(),
                native_asset,
                start_block,
                end_block,
                reward_per_block,
                withdraw_paused: false,
                claim_paused: false,
                total_pool_weight: 0,
            },
        );

        events::publish_initialized(
            &env,
            admin,
            reward_asset,
            start_block,
            end_block,
            reward_per_block,
        );

        Ok(())
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Append a new pool and return its index.
    ///
    /// With `with_update` set, every existing pool is advanced under the old
    /// weight distribution before the new weight joins the total.
    pub fn add_pool(
        env: Env,
        caller: Address,
        asset: PoolAsset,
        pool_weight: u64,
        min_deposit_amount: i128,
        unstake_locked_blocks: u32,
        with_update: bool,
    ) -> Result<u32, ContractError> {
        caller.require_auth();
        let grant = access::require_admin(&env, &caller)?;

        let mut cfg = config::load(&env)?;
        pool::validate_asset(pool::pool_count(&env), &asset, &cfg.native_asset)?;
        pool::validate_lock_period(unstake_locked_blocks)?;
        if min_deposit_amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let now = env.ledger().sequence();
        if now > cfg.end_block {
            return Err(ContractError::AlreadyEnded);
        }

        if with_update {
            Self::update_all(&env, &cfg)?;
        }

        let last_reward_block = now.max(cfg.start_block);
        cfg.total_pool_weight = cfg
            .total_pool_weight
            .checked_add(pool_weight)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let index = pool::push_pool(
            &env,
            &grant,
            &Pool {
                asset: asset.clone(),
                pool_weight,
                last_reward_block,
                acc_reward_per_share: 0,
                total_staked: 0,
                min_deposit_amount,
                unstake_locked_blocks,
            },
        )?;
        config::update(&env, &grant, &cfg);

        events::publish_add_pool(
            &env,
            index,
            asset,
            pool_weight,
            last_reward_block,
            min_deposit_amount,
            unstake_locked_blocks,
        );

        Ok(index)
    }

    /// Change a pool's weight, keeping `total_pool_weight` in sync.
    pub fn set_pool_weight(
        env: Env,
        caller: Address,
        pool_id: u32,
        pool_weight: u64,
        with_update: bool,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let grant = access::require_admin(&env, &caller)?;

        let mut cfg = config::load(&env)?;
        if with_update {
            Self::update_all(&env, &cfg)?;
        }

        let mut target = pool::load_pool(&env, pool_id)?;
        cfg.total_pool_weight = cfg
            .total_pool_weight
            .checked_sub(target.pool_weight)
            .and_then(|w| w.checked_add(pool_weight))
            .ok_or(ContractError::ArithmeticOverflow)?;
        target.pool_weight = pool_weight;

        pool::save_pool(&env, pool_id, &target);
        config::update(&env, &grant, &cfg);

        events::publish_pool_weight_set(&env, pool_id, pool_weight, cfg.total_pool_weight);

        Ok(())
    }

    /// Update a pool's minimum deposit and lock period.
    ///
    /// Requests already queued keep their original unlock block.
    pub fn update_pool_config(
        env: Env,
        caller: Address,
        pool_id: u32,
        min_deposit_amount: i128,
        unstake_locked_blocks: u32,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let _grant = access::require_admin(&env, &caller)?;

        pool::validate_lock_period(unstake_locked_blocks)?;
        if min_deposit_amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut target = pool::load_pool(&env, pool_id)?;
        target.min_deposit_amount = min_deposit_amount;
        target.unstake_locked_blocks = unstake_locked_blocks;
        pool::save_pool(&env, pool_id, &target);

        events::publish_pool_config_set(&env, pool_id, min_deposit_amount, unstake_locked_blocks);

        Ok(())
    }

    /// Advance one pool's reward accumulator to the current ledger.
    pub fn update_pool(env: Env, pool_id: u32) -> Result<(), ContractError> {
        let cfg = config::load(&env)?;
        let mut target = pool::load_pool(&env, pool_id)?;
        Self::sync_pool(&env, &cfg, pool_id, &mut target)
    }

    /// Advance every pool's accumulator, in index order.
    pub fn mass_update_pools(env: Env) -> Result<(), ContractError> {
        let cfg = config::load(&env)?;
        Self::update_all(&env, &cfg)
    }

    // ── Global parameters ───────────────────────────────────────────────────

    pub fn set_reward_asset(
        env: Env,
        caller: Address,
        reward_asset: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let grant = access::require_admin(&env, &caller)?;

        let mut cfg = config::load(&env)?;
        cfg.reward_asset = reward_asset.clone();
        config::update(&env, &grant, &cfg);

        events::publish_reward_asset_set(&env, reward_asset);
        Ok(())
    }

    /// Move the start of the emission window.
    ///
    /// Pools are flushed under the old window first, so only future accrual
    /// is affected.
    pub fn set_start_block(env: Env, caller: Address, start_block: u32) -> Result<(), ContractError> {
        caller.require_auth();
        let grant = access::require_admin(&env, &caller)?;

        let mut cfg = config::load(&env)?;
        config::validate_block_range(start_block, cfg.end_block)?;
        Self::update_all(&env, &cfg)?;
        cfg.start_block = start_block;
        config::update(&env, &grant, &cfg);

        events::publish_start_block_set(&env, start_block);
        Ok(())
    }

    /// Move the end of the emission window.
    ///
    /// Pools are flushed under the old window first; reward already earned
    /// for elapsed blocks is kept even when the window shrinks below them.
    pub fn set_end_block(env: Env, caller: Address, end_block: u32) -> Result<(), ContractError> {
        caller.require_auth();
        let grant = access::require_admin(&env, &caller)?;

        let mut cfg = config::load(&env)?;
        config::validate_block_range(cfg.start_block, end_block)?;
        Self::update_all(&env, &cfg)?;
        cfg.end_block = end_block;
        config::update(&env, &grant, &cfg);

        events::publish_end_block_set(&env, end_block);
        Ok(())
    }

    /// Change the per-block emission.
    ///
    /// Every pool is flushed at the old rate first, so blocks that already
    /// elapsed keep the reward they were emitted with.
    pub fn set_reward_per_block(
        env: Env,
        caller: Address,
        reward_per_block: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let grant = access::require_admin(&env, &caller)?;
        config::validate_reward_per_block(reward_per_block)?;

        let mut cfg = config::load(&env)?;
        Self::update_all(&env, &cfg)?;
        cfg.reward_per_block = reward_per_block;
        config::update(&env, &grant, &cfg);

        events::publish_reward_per_block_set(&env, reward_per_block);
        Ok(())
    }

    pub fn pause_withdraw(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_withdraw_paused(&env, &caller, true)
    }

    pub fn unpause_withdraw(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_withdraw_paused(&env, &caller, false)
    }

    pub fn pause_claim(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_claim_paused(&env, &caller, true)
    }

    pub fn unpause_claim(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::set_claim_paused(&env, &caller, false)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of the pool's asset.
    ///
    /// Reward accrued on the existing stake is settled into the participant's
    /// pending balance before the stake grows. The native pool takes an
    /// explicit amount like every other pool.
    pub fn deposit(
        env: Env,
        participant: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        participant.require_auth();

        let cfg = config::load(&env)?;
        let mut target = pool::load_pool(&env, pool_id)?;
        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }
        if amount < target.min_deposit_amount {
            return Err(ContractError::BelowMinimum);
        }

        // 1. Flush the pool accumulator, then settle this participant.
        Self::sync_pool(&env, &cfg, pool_id, &mut target)?;
        let mut stake = ledger::load(&env, pool_id, &participant);
        stake.settle(target.acc_reward_per_share)?;

        // 2. Grow the stake and the pool total.
        stake.staked_amount = stake
            .staked_amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        target.total_staked = target
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        stake.sync_debt(target.acc_reward_per_share)?;

        pool::save_pool(&env, pool_id, &target);
        ledger::save(&env, pool_id, &participant, &stake);
        config::extend_instance_ttl(&env);

        // 3. Pull tokens only after all state is written.
        if amount > 0 {
            let asset = target.asset.contract_address(&cfg.native_asset);
            token::Client::new(&env, &asset).transfer(
                &participant,
                &env.current_contract_address(),
                &amount,
            );
        }

        events::publish_deposit(&env, pool_id, participant, amount);

        Ok(())
    }

    /// Move `amount` of stake into the withdrawal queue and return the block
    /// at which it unlocks.
    ///
    /// The stake stops earning immediately; tokens leave the contract only
    /// through `withdraw` once the lock has elapsed.
    pub fn request_withdraw(
        env: Env,
        participant: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<u32, ContractError> {
        participant.require_auth();

        let cfg = config::load(&env)?;
        let mut target = pool::load_pool(&env, pool_id)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let mut stake = ledger::load(&env, pool_id, &participant);
        if amount > stake.staked_amount {
            return Err(ContractError::InsufficientStake);
        }

        Self::sync_pool(&env, &cfg, pool_id, &mut target)?;
        stake.settle(target.acc_reward_per_share)?;

        stake.staked_amount = stake
            .staked_amount
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        target.total_staked = target
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        stake.sync_debt(target.acc_reward_per_share)?;

        let now = env.ledger().sequence();
        let unlock_block = timelock::unlock_block(now, target.unstake_locked_blocks)?;
        stake.requests.push_back(WithdrawRequest {
            amount,
            unlock_block,
        });

        pool::save_pool(&env, pool_id, &target);
        ledger::save(&env, pool_id, &participant, &stake);
        config::extend_instance_ttl(&env);

        events::publish_request_withdraw(&env, pool_id, participant, amount, unlock_block);

        Ok(unlock_block)
    }

    /// Pay out every matured withdrawal request and return the total.
    ///
    /// Returns `0` without touching state when nothing has unlocked yet.
    pub fn withdraw(env: Env, participant: Address, pool_id: u32) -> Result<i128, ContractError> {
        participant.require_auth();

        let cfg = config::load(&env)?;
        if cfg.withdraw_paused {
            return Err(ContractError::WithdrawPaused);
        }
        let target = pool::load_pool(&env, pool_id)?;

        let mut stake = ledger::load(&env, pool_id, &participant);
        let now = env.ledger().sequence();
        let (amount, remaining) = timelock::drain_matured(&env, &stake.requests, now)?;
        if amount == 0 {
            log!(&env, "withdraw: nothing unlocked", pool_id, now);
            return Ok(0);
        }

        // Drop the paid requests before the transfer (checks-effects-interactions).
        stake.requests = remaining;
        ledger::save(&env, pool_id, &participant, &stake);
        config::extend_instance_ttl(&env);

        let asset = target.asset.contract_address(&cfg.native_asset);
        token::Client::new(&env, &asset).transfer(
            &env.current_contract_address(),
            &participant,
            &amount,
        );

        events::publish_withdraw(&env, pool_id, participant, amount);

        Ok(amount)
    }

    /// Pay out all reward owed to `participant` in `pool_id`.
    ///
    /// Returns `0` without a transfer or event when nothing is owed.
    pub fn claim(env: Env, participant: Address, pool_id: u32) -> Result<i128, ContractError> {
        participant.require_auth();

        let cfg = config::load(&env)?;
        if cfg.claim_paused {
            return Err(ContractError::ClaimPaused);
        }
        let mut target = pool::load_pool(&env, pool_id)?;

        // 1. Sync the accumulator.
        Self::sync_pool(&env, &cfg, pool_id, &mut target)?;

        // 2. Read and reset everything owed.
        let mut stake = ledger::load(&env, pool_id, &participant);
        let owed = stake.claimable(target.acc_reward_per_share)?;
        if owed == 0 {
            log!(&env, "claim: nothing owed", pool_id);
            return Ok(0);
        }

        let reward_token = token::Client::new(&env, &cfg.reward_asset);
        if reward_token.balance(&env.current_contract_address()) < owed {
            return Err(ContractError::InsufficientRewardBalance);
        }

        stake.pending_reward = 0;
        stake.sync_debt(target.acc_reward_per_share)?;
        ledger::save(&env, pool_id, &participant, &stake);
        config::extend_instance_ttl(&env);

        // 3. Transfer reward tokens to the participant.
        reward_token.transfer(&env.current_contract_address(), &participant, &owed);

        events::publish_claim(&env, pool_id, participant, owed);

        Ok(owed)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn pool_length(env: Env) -> u32 {
        pool::pool_count(&env)
    }

    pub fn pool(env: Env, index: u32) -> Result<Pool, ContractError> {
        pool::load_pool(&env, index)
    }

    pub fn reward_asset(env: Env) -> Result<Address, ContractError> {
        Ok(config::load(&env)?.reward_asset)
    }

    pub fn native_asset(env: Env) -> Result<Address, ContractError> {
        Ok(config::load(&env)?.native_asset)
    }

    pub fn start_block(env: Env) -> Result<u32, ContractError> {
        Ok(config::load(&env)?.start_block)
    }

    pub fn end_block(env: Env) -> Result<u32, ContractError> {
        Ok(config::load(&env)?.end_block)
    }

    pub fn reward_per_block(env: Env) -> Result<i128, ContractError> {
        Ok(config::load(&env)?.reward_per_block)
    }

    pub fn withdraw_paused(env: Env) -> Result<bool, ContractError> {
        Ok(config::load(&env)?.withdraw_paused)
    }

    pub fn claim_paused(env: Env) -> Result<bool, ContractError> {
        Ok(config::load(&env)?.claim_paused)
    }

    pub fn total_pool_weight(env: Env) -> Result<u64, ContractError> {
        Ok(config::load(&env)?.total_pool_weight)
    }

    /// Rewardable blocks between `from` and `to` inside the emission window.
    pub fn multiplier(env: Env, from: u32, to: u32) -> Result<u32, ContractError> {
        if from > to {
            return Err(ContractError::InvalidBlockRange);
        }
        let cfg = config::load(&env)?;
        Ok(rewards::multiplier(from, to, cfg.start_block, cfg.end_block))
    }

    /// Return the participant's full position in `pool_id`.
    pub fn stake_info(env: Env, pool_id: u32, participant: Address) -> Result<UserStake, ContractError> {
        pool::load_pool(&env, pool_id)?;
        Ok(ledger::load(&env, pool_id, &participant))
    }

    pub fn staking_balance(env: Env, pool_id: u32, participant: Address) -> Result<i128, ContractError> {
        pool::load_pool(&env, pool_id)?;
        Ok(ledger::load(&env, pool_id, &participant).staked_amount)
    }

    /// Real-time claimable reward, accruing up to the current ledger without
    /// writing anything.
    pub fn pending_reward(env: Env, pool_id: u32, participant: Address) -> Result<i128, ContractError> {
        let cfg = config::load(&env)?;
        let mut target = pool::load_pool(&env, pool_id)?;
        target.accrue(&cfg, env.ledger().sequence())?;
        ledger::load(&env, pool_id, &participant).claimable(target.acc_reward_per_share)
    }

    /// `(requested, unlocked)` totals of the participant's withdrawal queue.
    pub fn withdraw_amount(
        env: Env,
        pool_id: u32,
        participant: Address,
    ) -> Result<(i128, i128), ContractError> {
        pool::load_pool(&env, pool_id)?;
        let stake = ledger::load(&env, pool_id, &participant);
        timelock::totals(&stake.requests, env.ledger().sequence())
    }

    pub fn is_initialized(env: Env) -> bool {
        config::is_initialized(&env)
    }

    pub fn admin(env: Env) -> Result<Address, ContractError> {
        access::get_admin(&env)
    }

    pub fn pending_admin(env: Env) -> Option<Address> {
        access::pending_admin(&env)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin. The proposed address completes the hand-over
    /// with `accept_admin`.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        current_admin.require_auth();
        let grant = access::require_admin(&env, &current_admin)?;

        access::propose(&env, &grant, &new_admin);

        events::publish_admin_transfer_proposed(&env, grant.admin().clone(), new_admin);
        Ok(())
    }

    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        new_admin.require_auth();

        let old_admin = access::accept(&env, &new_admin)?;

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);
        Ok(())
    }

    pub fn cancel_admin_transfer(env: Env, current_admin: Address) -> Result<(), ContractError> {
        current_admin.require_auth();
        let grant = access::require_admin(&env, &current_admin)?;

        let cancelled = access::cancel(&env, &grant)?;

        events::publish_admin_transfer_cancelled(&env, current_admin, cancelled);
        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Accrue `target` up to the current ledger and persist it if it moved.
    fn sync_pool(
        env: &Env,
        cfg: &GlobalConfig,
        pool_id: u32,
        target: &mut Pool,
    ) -> Result<(), ContractError> {
        let had_stake = target.total_staked > 0;
        if target.accrue(cfg, env.ledger().sequence())? {
            pool::save_pool(env, pool_id, target);
            if had_stake {
                log!(
                    env,
                    "pool accrued",
                    pool_id,
                    target.acc_reward_per_share,
                    target.last_reward_block
                );
            } else {
                log!(env, "pool empty, skipped reward", pool_id, target.last_reward_block);
            }
        }
        Ok(())
    }

    fn update_all(env: &Env, cfg: &GlobalConfig) -> Result<(), ContractError> {
        for pool_id in 0..pool::pool_count(env) {
            let mut target = pool::load_pool(env, pool_id)?;
            Self::sync_pool(env, cfg, pool_id, &mut target)?;
        }
        Ok(())
    }

    fn set_withdraw_paused(env: &Env, caller: &Address, paused: bool) -> Result<(), ContractError> {
        caller.require_auth();
        let grant = access::require_admin(env, caller)?;

        let mut cfg = config::load(env)?;
        if cfg.withdraw_paused == paused {
            return Ok(());
        }
        cfg.withdraw_paused = paused;
        config::update(env, &grant, &cfg);

        events::publish_withdraw_paused(env, paused);
        Ok(())
    }

    fn set_claim_paused(env: &Env, caller: &Address, paused: bool) -> Result<(), ContractError> {
        caller.require_auth();
        let grant = access::require_admin(env, caller)?;

        let mut cfg = config::load(env)?;
        if cfg.claim_paused == paused {
            return Ok(());
        }
        cfg.claim_paused = paused;
        config::update(env, &grant, &cfg);

        events::publish_claim_paused(env, paused);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_accrual;
