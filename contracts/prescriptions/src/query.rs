//! Read-only views over the prescription store.

use soroban_sdk::{Address, Env, Vec};

use crate::types::Prescription;
use crate::{store, ContractError};

/// Largest page the paginated listings return in one call.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Tokens held by `owner`, most recently issued first.
pub fn list_by_owner(env: &Env, owner: &Address) -> Vec<Prescription> {
    let mut out = Vec::new(env);
    store::for_each_by_owner(env, owner, |rx| out.push_back(rx));
    out
}

/// Tokens issued by `issuer` that have not been canceled, most recently
/// issued first.
pub fn list_by_issuer(env: &Env, issuer: &Address) -> Vec<Prescription> {
    let mut out = Vec::new(env);
    store::for_each_by_issuer(env, issuer, |rx| out.push_back(rx));
    out
}

/// One page of the tokens held by `owner`, newest first, skipping the
/// `start` newest. `limit` is capped at [`MAX_PAGE_SIZE`].
pub fn list_by_owner_page(
    env: &Env,
    owner: &Address,
    start: u32,
    limit: u32,
) -> Result<Vec<Prescription>, ContractError> {
    let limit = page_limit(limit)?;
    let mut out = Vec::new(env);
    store::for_each_page_by_owner(env, owner, start, limit, |rx| out.push_back(rx));
    Ok(out)
}

/// One page of the live tokens issued by `issuer`, newest first.
pub fn list_by_issuer_page(
    env: &Env,
    issuer: &Address,
    start: u32,
    limit: u32,
) -> Result<Vec<Prescription>, ContractError> {
    let limit = page_limit(limit)?;
    let mut out = Vec::new(env);
    store::for_each_page_by_issuer(env, issuer, start, limit, |rx| out.push_back(rx));
    Ok(out)
}

fn page_limit(limit: u32) -> Result<u32, ContractError> {
    if limit == 0 {
        return Err(ContractError::InvalidInput);
    }
    Ok(limit.min(MAX_PAGE_SIZE))
}

pub fn by_id(env: &Env, token_id: u64) -> Option<Prescription> {
    store::get(env, token_id)
}

pub fn balance_of(env: &Env, owner: &Address) -> u32 {
    store::owner_tokens(env, owner).len()
}

/// Whether ledger time has reached the token's `expires_at`.
pub fn is_expired(env: &Env, token_id: u64) -> Result<bool, ContractError> {
    let rx = store::get(env, token_id).ok_or(ContractError::NotFound)?;
    Ok(rx.is_expired_at(env.ledger().timestamp()))
}
