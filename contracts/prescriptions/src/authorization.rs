//! Identity and authorization: the administrative principal and the doctor
//! registry.
//!
//! Principals are Soroban `Address`es authenticated by the host through
//! `require_auth`; this module only decides *what* an authenticated principal
//! may do. Entry points in `lib.rs` call `require_auth` before consulting it.
//!
//! ## Storage Keys
//!
//! - `"ADMIN"` (instance) → `Address`
//! - `DataKey::Doctor(address)` → `Doctor`

use soroban_sdk::{symbol_short, Address, Env, String, Symbol};

use crate::types::{DataKey, Doctor};
use crate::validation;
use crate::ContractError;

const ADMIN: Symbol = symbol_short!("ADMIN");

// Doctor records outlive any single prescription; ~300 days at 5s/ledger.
const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

// ── Admin ────────────────────────────────────────────────────────────────────

pub fn admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

pub(crate) fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&ADMIN, admin);
}

/// Fails with `Unauthorized` unless `caller` is the stored admin.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if *caller != admin(env)? {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

// ── Doctor registry ──────────────────────────────────────────────────────────

pub fn get_doctor(env: &Env, doctor: &Address) -> Option<Doctor> {
    let key = DataKey::Doctor(doctor.clone());
    env.storage().persistent().get(&key)
}

/// True iff a doctor record exists for `doctor` with its approval flag set.
pub fn is_approved(env: &Env, doctor: &Address) -> bool {
    get_doctor(env, doctor).is_some_and(|d| d.approved)
}

/// Stored display name, whether or not the doctor is currently approved.
pub fn name_of(env: &Env, doctor: &Address) -> Option<String> {
    get_doctor(env, doctor).map(|d| d.name)
}

/// Creates or updates a doctor record with the approval flag set.
///
/// Re-approving an approved doctor only refreshes the name.
pub(crate) fn approve(env: &Env, doctor: &Address, name: String) -> Result<Doctor, ContractError> {
    validation::validate_name(&name)?;

    let now = env.ledger().timestamp();
    let record = match get_doctor(env, doctor) {
        Some(existing) if existing.approved => Doctor { name, ..existing },
        _ => Doctor {
            address: doctor.clone(),
            name,
            approved: true,
            approved_at: now,
            revoked_at: None,
        },
    };

    store_doctor(env, &record);
    Ok(record)
}

/// Clears the approval flag on an existing record. The flag in the result is
/// false when the doctor was already revoked and nothing was written.
///
/// Already issued prescriptions are not touched.
pub(crate) fn revoke(env: &Env, doctor: &Address) -> Result<(Doctor, bool), ContractError> {
    let mut record = get_doctor(env, doctor).ok_or(ContractError::NotFound)?;
    if !record.approved {
        return Ok((record, false));
    }
    record.approved = false;
    record.revoked_at = Some(env.ledger().timestamp());
    store_doctor(env, &record);
    Ok((record, true))
}

fn store_doctor(env: &Env, record: &Doctor) {
    let key = DataKey::Doctor(record.address.clone());
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
