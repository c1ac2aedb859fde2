//! Ledger engine: the issue / fill / cancel state machine.
//!
//! ```text
//! prescribe ──► Issued ──fill──► Filled    (terminal, record retained)
//!                  │
//!                  └───cancel──► Canceled  (terminal, record deleted)
//! ```
//!
//! Every transition checks all of its preconditions before the first storage
//! write, so a rejected call leaves records, indexes and counters untouched.
//! Soroban additionally rolls back the whole invocation on `Err`.

use soroban_sdk::{Address, Env};

use crate::types::{ExpiryPolicy, Prescription, PrescriptionPayload};
use crate::{authorization, config, events, store, validation, ContractError};

/// Issues a new token to `patient`. Only approved doctors may issue.
///
/// Precondition order: `NotInitialized`, `Paused`, `Unauthorized`,
/// `InvalidPrincipal`, `InvalidInterval`, `InvalidInput`.
pub(crate) fn issue(
    env: &Env,
    issuer: &Address,
    patient: &Address,
    payload: PrescriptionPayload,
    issued_at: u64,
    expires_at: u64,
) -> Result<u64, ContractError> {
    config::require_initialized(env)?;
    config::require_not_paused(env)?;

    let doctor = authorization::get_doctor(env, issuer)
        .filter(|d| d.approved)
        .ok_or(ContractError::Unauthorized)?;
    validation::validate_holder(env, patient)?;
    validation::validate_interval(issued_at, expires_at)?;
    validation::validate_payload(&payload)?;

    let id = store::next_id(env);
    let rx = Prescription {
        id,
        issuer: issuer.clone(),
        issuer_name: doctor.name,
        patient: patient.clone(),
        owner: patient.clone(),
        drug_code: payload.drug_code,
        medication_name: payload.medication_name,
        dosage_quantity: payload.dosage_quantity,
        dosage_unit: payload.dosage_unit,
        issued_at,
        expires_at,
        filled: false,
        filled_at: None,
    };

    store::insert(env, &rx);
    events::publish_prescription_issued(env, &rx);

    Ok(id)
}

/// Transfers an unfilled token from its holder to `pharmacy` and marks it
/// filled. Irrevocable.
///
/// A filled token is immutable, so any further fill attempt reports
/// `AlreadyFilled` regardless of who makes it.
pub(crate) fn fill(
    env: &Env,
    caller: &Address,
    pharmacy: &Address,
    token_id: u64,
) -> Result<Prescription, ContractError> {
    config::require_initialized(env)?;
    config::require_not_paused(env)?;

    let mut rx = store::get(env, token_id).ok_or(ContractError::NotFound)?;
    if rx.filled {
        return Err(ContractError::AlreadyFilled);
    }
    if *caller != rx.owner {
        return Err(ContractError::Unauthorized);
    }
    validation::validate_holder(env, pharmacy)?;
    if pharmacy == caller {
        return Err(ContractError::InvalidPrincipal);
    }

    let now = env.ledger().timestamp();
    if config::expiry_policy(env) == ExpiryPolicy::RejectExpired && rx.is_expired_at(now) {
        return Err(ContractError::Expired);
    }

    let previous_owner = core::mem::replace(&mut rx.owner, pharmacy.clone());
    rx.filled = true;
    rx.filled_at = Some(now);

    store::reassign(env, &rx, &previous_owner);
    events::publish_prescription_filled(env, token_id, previous_owner, pharmacy.clone());

    Ok(rx)
}

/// Deletes an unfilled token. Only the original issuer may cancel, whoever
/// holds the token and whatever the issuer's current approval state.
pub(crate) fn cancel(
    env: &Env,
    caller: &Address,
    token_id: u64,
) -> Result<Prescription, ContractError> {
    config::require_initialized(env)?;
    config::require_not_paused(env)?;

    let rx = store::get(env, token_id).ok_or(ContractError::NotFound)?;
    if *caller != rx.issuer {
        return Err(ContractError::Unauthorized);
    }
    if rx.filled {
        return Err(ContractError::AlreadyFilled);
    }

    store::remove(env, &rx);
    events::publish_prescription_canceled(env, &rx);

    Ok(rx)
}
