//! Single-role access control.
//!
//! Admin entry points call [`require_admin`] right after `require_auth` and
//! hand the returned [`AdminGrant`] to the storage writers that need it, so a
//! configuration write cannot be expressed without a passed check.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::ContractError;

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");

/// Proof that the current invocation's caller holds the admin role.
#[derive(Clone, Debug)]
pub struct AdminGrant {
    admin: Address,
}

impl AdminGrant {
    pub fn admin(&self) -> &Address {
        &self.admin
    }
}

pub(crate) fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN, admin);
}

pub fn get_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

/// Guard: fails with `Unauthorized` unless `caller` is the stored admin.
pub fn require_admin(env: &Env, caller: &Address) -> Result<AdminGrant, ContractError> {
    let admin = get_admin(env)?;
    if *caller != admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(AdminGrant { admin })
}

// ── Two-step hand-over ───────────────────────────────────────────────────────

pub fn pending_admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_ADMIN)
}

pub(crate) fn propose(env: &Env, _grant: &AdminGrant, new_admin: &Address) {
    env.storage().instance().set(&PENDING_ADMIN, new_admin);
}

/// Promote the pending admin. Returns the replaced admin.
pub(crate) fn accept(env: &Env, new_admin: &Address) -> Result<Address, ContractError> {
    let pending = pending_admin(env).ok_or(ContractError::NoPendingAdmin)?;
    if *new_admin != pending {
        return Err(ContractError::Unauthorized);
    }
    let old_admin = get_admin(env)?;
    set_admin(env, new_admin);
    env.storage().instance().remove(&PENDING_ADMIN);
    Ok(old_admin)
}

/// Drop the pending proposal. Returns the address that was proposed.
pub(crate) fn cancel(env: &Env, _grant: &AdminGrant) -> Result<Address, ContractError> {
    let pending = pending_admin(env).ok_or(ContractError::NoPendingAdmin)?;
    env.storage().instance().remove(&PENDING_ADMIN);
    Ok(pending)
}
