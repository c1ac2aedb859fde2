//! Prescription store: the canonical token records plus the per-owner and
//! per-issuer index buckets.
//!
//! Only the ledger engine writes through this module. Each index bucket is an
//! ascending set of token ids, so reading it back to front yields the most
//! recently issued token first. Writes always go record → owner index →
//! issuer index → counters.
//!
//! ## Storage Keys
//!
//! - `DataKey::Prescription(id)` → `Prescription`
//! - `DataKey::OwnerTokens(owner)` → `Vec<u64>`
//! - `DataKey::IssuerTokens(issuer)` → `Vec<u64>`
//! - `"NEXT_ID"` (instance) → last allocated token id
//! - `"SUPPLY"` (instance) → number of extant tokens

use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::types::{DataKey, Prescription};

const NEXT_ID: Symbol = symbol_short!("NEXT_ID");
const SUPPLY: Symbol = symbol_short!("SUPPLY");

// TTL: ~60 days at 5s/ledger
const TTL_THRESHOLD: u32 = 1_036_800;
const TTL_EXTEND_TO: u32 = 2_073_600;

fn extend_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Id allocation ────────────────────────────────────────────────────────────

/// Allocates the next token id. Ids start at 1 and the counter is never
/// decremented, so a canceled id is never handed out again.
pub(crate) fn next_id(env: &Env) -> u64 {
    let id: u64 = last_id(env).saturating_add(1);
    env.storage().instance().set(&NEXT_ID, &id);
    id
}

/// Highest id allocated so far (0 when nothing was ever issued).
pub fn last_id(env: &Env) -> u64 {
    env.storage().instance().get(&NEXT_ID).unwrap_or(0)
}

/// Number of tokens currently in the store (issued minus canceled).
pub fn total_supply(env: &Env) -> u64 {
    env.storage().instance().get(&SUPPLY).unwrap_or(0)
}

fn set_total_supply(env: &Env, supply: u64) {
    env.storage().instance().set(&SUPPLY, &supply);
}

// ── Records ──────────────────────────────────────────────────────────────────

/// Inserts a new record and registers it in its owner and issuer buckets.
///
/// The id must be fresh; uniqueness is guaranteed by [`next_id`].
pub(crate) fn insert(env: &Env, rx: &Prescription) {
    put_record(env, rx);
    index_insert(env, &DataKey::OwnerTokens(rx.owner.clone()), rx.id);
    index_insert(env, &DataKey::IssuerTokens(rx.issuer.clone()), rx.id);
    set_total_supply(env, total_supply(env).saturating_add(1));
}

pub fn get(env: &Env, id: u64) -> Option<Prescription> {
    env.storage().persistent().get(&DataKey::Prescription(id))
}

pub fn contains(env: &Env, id: u64) -> bool {
    env.storage().persistent().has(&DataKey::Prescription(id))
}

/// Persists an updated record whose owner changed from `previous_owner`,
/// moving the id between owner buckets. Issuer membership is untouched.
pub(crate) fn reassign(env: &Env, rx: &Prescription, previous_owner: &Address) {
    put_record(env, rx);
    if *previous_owner != rx.owner {
        index_remove(env, &DataKey::OwnerTokens(previous_owner.clone()), rx.id);
        index_insert(env, &DataKey::OwnerTokens(rx.owner.clone()), rx.id);
    }
}

/// Deletes a record together with both of its index entries.
pub(crate) fn remove(env: &Env, rx: &Prescription) {
    env.storage()
        .persistent()
        .remove(&DataKey::Prescription(rx.id));
    index_remove(env, &DataKey::OwnerTokens(rx.owner.clone()), rx.id);
    index_remove(env, &DataKey::IssuerTokens(rx.issuer.clone()), rx.id);
    set_total_supply(env, total_supply(env).saturating_sub(1));
}

fn put_record(env: &Env, rx: &Prescription) {
    let key = DataKey::Prescription(rx.id);
    env.storage().persistent().set(&key, rx);
    extend_ttl(env, &key);
}

// ── Indexes ──────────────────────────────────────────────────────────────────

/// Ids held by `owner`, ascending.
pub fn owner_tokens(env: &Env, owner: &Address) -> Vec<u64> {
    load_index(env, &DataKey::OwnerTokens(owner.clone()))
}

/// Ids issued by `issuer` that still exist, ascending.
pub fn issuer_tokens(env: &Env, issuer: &Address) -> Vec<u64> {
    load_index(env, &DataKey::IssuerTokens(issuer.clone()))
}

/// Visits the records held by `owner`, newest first.
pub fn for_each_by_owner<F>(env: &Env, owner: &Address, f: F)
where
    F: FnMut(Prescription),
{
    for_each_in_page(env, &owner_tokens(env, owner), 0, u32::MAX, f);
}

/// Visits at most `limit` records held by `owner`, newest first, after
/// skipping the `skip` newest. Only the records in the page are loaded.
pub fn for_each_page_by_owner<F>(env: &Env, owner: &Address, skip: u32, limit: u32, f: F)
where
    F: FnMut(Prescription),
{
    for_each_in_page(env, &owner_tokens(env, owner), skip, limit, f);
}

/// Visits the records issued by `issuer`, newest first.
pub fn for_each_by_issuer<F>(env: &Env, issuer: &Address, f: F)
where
    F: FnMut(Prescription),
{
    for_each_in_page(env, &issuer_tokens(env, issuer), 0, u32::MAX, f);
}

/// Visits at most `limit` records issued by `issuer`, newest first, after
/// skipping the `skip` newest.
pub fn for_each_page_by_issuer<F>(env: &Env, issuer: &Address, skip: u32, limit: u32, f: F)
where
    F: FnMut(Prescription),
{
    for_each_in_page(env, &issuer_tokens(env, issuer), skip, limit, f);
}

// Buckets are ascending, so the newest id sits at the back.
fn for_each_in_page<F>(env: &Env, ids: &Vec<u64>, skip: u32, limit: u32, mut f: F)
where
    F: FnMut(Prescription),
{
    let end = ids.len().saturating_sub(skip);
    let start = end.saturating_sub(limit);
    for i in (start..end).rev() {
        if let Some(rx) = ids.get(i).and_then(|id| get(env, id)) {
            f(rx);
        }
    }
}

fn load_index(env: &Env, key: &DataKey) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(key)
        .unwrap_or(Vec::new(env))
}

fn index_insert(env: &Env, key: &DataKey, id: u64) {
    let mut ids = load_index(env, key);
    if let Err(pos) = ids.binary_search(id) {
        ids.insert(pos, id);
    }
    env.storage().persistent().set(key, &ids);
    extend_ttl(env, key);
}

fn index_remove(env: &Env, key: &DataKey, id: u64) {
    let mut ids = load_index(env, key);
    if let Ok(pos) = ids.binary_search(id) {
        ids.remove(pos);
    }
    if ids.is_empty() {
        env.storage().persistent().remove(key);
    } else {
        env.storage().persistent().set(key, &ids);
        extend_ttl(env, key);
    }
}
