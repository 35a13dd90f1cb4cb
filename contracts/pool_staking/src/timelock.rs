//! Locked withdrawal queue kept inside each [`crate::ledger::UserStake`].

use soroban_sdk::{contracttype, Env, Vec};

use crate::ContractError;

/// Stake removed from a pool that becomes withdrawable at `unlock_block`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawRequest {
    pub amount: i128,
    pub unlock_block: u32,
}

pub fn unlock_block(now: u32, unstake_locked_blocks: u32) -> Result<u32, ContractError> {
    now.checked_add(unstake_locked_blocks)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Split `requests` into the total of matured entries and the entries that
/// are still locked, preserving queue order.
pub fn drain_matured(
    env: &Env,
    requests: &Vec<WithdrawRequest>,
    now: u32,
) -> Result<(i128, Vec<WithdrawRequest>), ContractError> {
    let mut matured: i128 = 0;
    let mut remaining = Vec::new(env);
    for request in requests.iter() {
        if request.unlock_block <= now {
            matured = matured
                .checked_add(request.amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
        } else {
            remaining.push_back(request);
        }
    }
    Ok((matured, remaining))
}

/// `(requested, unlocked)`: the queued total and the part of it that has
/// matured by `now`.
pub fn totals(requests: &Vec<WithdrawRequest>, now: u32) -> Result<(i128, i128), ContractError> {
    let mut requested: i128 = 0;
    let mut unlocked: i128 = 0;
    for request in requests.iter() {
        requested = requested
            .checked_add(request.amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if request.unlock_block <= now {
            unlocked = unlocked
                .checked_add(request.amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
    }
    Ok((requested, unlocked))
}
