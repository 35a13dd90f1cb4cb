use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::{
    config::{TTL_EXTEND_TO, TTL_THRESHOLD},
    rewards,
    timelock::WithdrawRequest,
    ContractError,
};

// Persistent storage uses tuple keys: (USER_STAKE, pool_index, participant)
const USER_STAKE: Symbol = symbol_short!("USER_STK");

/// A participant's position in one pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserStake {
    pub staked_amount: i128,
    /// `staked_amount * acc_reward_per_share / SCALE` at the last settlement.
    pub reward_debt: i128,
    /// Settled reward waiting for `claim`.
    pub pending_reward: i128,
    pub requests: Vec<WithdrawRequest>,
}

impl UserStake {
    pub fn new(env: &Env) -> Self {
        Self {
            staked_amount: 0,
            reward_debt: 0,
            pending_reward: 0,
            requests: Vec::new(env),
        }
    }

    /// Move everything earned since the last settlement into `pending_reward`.
    pub fn settle(&mut self, acc_reward_per_share: i128) -> Result<(), ContractError> {
        let earned = rewards::pending(self.staked_amount, acc_reward_per_share, self.reward_debt)?;
        self.pending_reward = self
            .pending_reward
            .checked_add(earned)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Re-anchor the debt after `staked_amount` changed.
    pub fn sync_debt(&mut self, acc_reward_per_share: i128) -> Result<(), ContractError> {
        self.reward_debt = rewards::accrued(self.staked_amount, acc_reward_per_share)?;
        Ok(())
    }

    /// Total reward owed as of `acc_reward_per_share`, without mutating.
    pub fn claimable(&self, acc_reward_per_share: i128) -> Result<i128, ContractError> {
        rewards::pending(self.staked_amount, acc_reward_per_share, self.reward_debt)?
            .checked_add(self.pending_reward)
            .ok_or(ContractError::ArithmeticOverflow)
    }
}

fn stake_key(pool: u32, participant: &Address) -> (Symbol, u32, Address) {
    (USER_STAKE, pool, participant.clone())
}

/// Load a participant's stake, or an empty one if they never touched `pool`.
pub fn load(env: &Env, pool: u32, participant: &Address) -> UserStake {
    env.storage()
        .persistent()
        .get(&stake_key(pool, participant))
        .unwrap_or_else(|| UserStake::new(env))
}

pub(crate) fn save(env: &Env, pool: u32, participant: &Address, stake: &UserStake) {
    let key = stake_key(pool, participant);
    env.storage().persistent().set(&key, stake);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
