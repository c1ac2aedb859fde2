//! Ledger configuration held in instance storage.
//!
//! Callers are responsible for enforcing admin authorization before invoking
//! the setters here.

use soroban_sdk::{symbol_short, Env, Symbol};

use crate::types::ExpiryPolicy;
use crate::ContractError;

const INITIALIZED: Symbol = symbol_short!("INIT");
const PAUSED: Symbol = symbol_short!("PAUSED");
const EXPIRY_POLICY: Symbol = symbol_short!("EXP_POL");

// ~30 days at 5s/ledger
const INSTANCE_TTL_THRESHOLD: u32 = 518_400;
const INSTANCE_TTL_EXTEND_TO: u32 = 1_036_800;

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub(crate) fn mark_initialized(env: &Env) {
    env.storage().instance().set(&INITIALIZED, &true);
}

pub fn require_initialized(env: &Env) -> Result<(), ContractError> {
    if !is_initialized(env) {
        return Err(ContractError::NotInitialized);
    }
    Ok(())
}

/// Keeps the contract instance (configuration and counters) alive.
pub(crate) fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

pub(crate) fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
}

/// Guard placed at the top of every token mutation. Queries never call it.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

pub fn expiry_policy(env: &Env) -> ExpiryPolicy {
    env.storage()
        .instance()
        .get(&EXPIRY_POLICY)
        .unwrap_or(ExpiryPolicy::Ignore)
}

pub(crate) fn set_expiry_policy(env: &Env, policy: ExpiryPolicy) {
    env.storage().instance().set(&EXPIRY_POLICY, &policy);
}
