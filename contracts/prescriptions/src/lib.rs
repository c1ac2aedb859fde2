#![no_std]

//! # Prescription Ledger
//!
//! Tracks medical prescriptions as uniquely owned, transferable tokens shared
//! by three mutually distrusting roles:
//!
//! - **Doctors** issue tokens. Only doctors approved by the admin may issue,
//!   and only the issuing doctor may cancel an unfilled token.
//! - **Patients** hold the tokens issued to them and fill them at a pharmacy
//!   of their choice.
//! - **Pharmacies** receive filled tokens; a filled token is final.
//!
//! | Module          | Responsibility                                      |
//! |-----------------|-----------------------------------------------------|
//! | `authorization` | admin principal, doctor approval registry           |
//! | `store`         | token records, owner/issuer indexes, id allocation  |
//! | `ledger`        | issue / fill / cancel transitions                   |
//! | `query`         | read-only views                                     |
//! | `config`        | pause flag, expiry policy                           |
//! | `events`        | structured events for every state change            |

pub mod authorization;
pub mod config;
pub mod events;
pub mod ledger;
pub mod query;
pub mod store;
pub mod types;
pub mod validation;

use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

pub use types::{Doctor, ExpiryPolicy, Prescription, PrescriptionPayload};

/// Contract errors
#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Caller lacks the role or ownership the operation requires.
    Unauthorized = 3,
    /// Token id (including a canceled one) or doctor record does not exist.
    NotFound = 4,
    /// The token was already filled and can no longer change.
    AlreadyFilled = 5,
    /// `expires_at` is not after `issued_at`.
    InvalidInterval = 6,
    /// The principal cannot take part in the operation.
    InvalidPrincipal = 7,
    InvalidInput = 8,
    /// Fill rejected because the token expired under `ExpiryPolicy::RejectExpired`.
    Expired = 9,
    Paused = 10,
}

#[contract]
pub struct PrescriptionLedgerContract;

#[contractimpl]
impl PrescriptionLedgerContract {
    // ── Lifecycle & configuration ───────────────────────────────────────────

    /// Initialize the ledger with its administrative principal.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if config::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        authorization::set_admin(&env, &admin);
        config::mark_initialized(&env);
        config::bump_instance(&env);

        events::publish_initialized(&env, admin);

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        config::is_initialized(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        authorization::admin(&env)
    }

    /// Hand the admin role to `new_admin`. Both parties must sign.
    pub fn transfer_admin(
        env: Env,
        caller: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        authorization::require_admin(&env, &caller)?;
        new_admin.require_auth();

        authorization::set_admin(&env, &new_admin);
        config::bump_instance(&env);
        events::publish_admin_transferred(&env, caller, new_admin);

        Ok(())
    }

    /// Stop all token mutations. Queries keep working.
    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        authorization::require_admin(&env, &caller)?;
        config::set_paused(&env, true);
        events::publish_paused(&env, caller, true);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        authorization::require_admin(&env, &caller)?;
        config::set_paused(&env, false);
        events::publish_paused(&env, caller, false);
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        config::is_paused(&env)
    }

    /// Decide whether expired tokens may still be filled.
    pub fn set_expiry_policy(
        env: Env,
        caller: Address,
        policy: ExpiryPolicy,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        authorization::require_admin(&env, &caller)?;
        config::set_expiry_policy(&env, policy);
        events::publish_expiry_policy_changed(&env, policy);
        Ok(())
    }

    pub fn get_expiry_policy(env: Env) -> ExpiryPolicy {
        config::expiry_policy(&env)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    // ── Doctor registry ─────────────────────────────────────────────────────

    /// Approve `doctor` to issue prescriptions under the display name `name`.
    /// Approving an already approved doctor updates the name.
    pub fn approve_doctor(
        env: Env,
        caller: Address,
        doctor: Address,
        name: String,
    ) -> Result<Doctor, ContractError> {
        caller.require_auth();
        authorization::require_admin(&env, &caller)?;

        let record = authorization::approve(&env, &doctor, name)?;
        events::publish_doctor_approved(&env, doctor, record.name.clone());

        Ok(record)
    }

    /// Withdraw a doctor's approval. Their earlier prescriptions stay valid.
    /// Revoking a doctor who is already revoked is a no-op and emits nothing.
    pub fn revoke_doctor(
        env: Env,
        caller: Address,
        doctor: Address,
    ) -> Result<Doctor, ContractError> {
        caller.require_auth();
        authorization::require_admin(&env, &caller)?;

        let (record, changed) = authorization::revoke(&env, &doctor)?;
        if changed {
            events::publish_doctor_revoked(&env, doctor);
        }

        Ok(record)
    }

    pub fn is_approved(env: Env, doctor: Address) -> bool {
        authorization::is_approved(&env, &doctor)
    }

    pub fn get_doctor(env: Env, doctor: Address) -> Option<Doctor> {
        authorization::get_doctor(&env, &doctor)
    }

    /// Display name of a doctor, approved or not.
    pub fn doctor_name(env: Env, doctor: Address) -> Option<String> {
        authorization::name_of(&env, &doctor)
    }

    // ── Token lifecycle ─────────────────────────────────────────────────────

    /// Issue a prescription token to `patient`. Returns the new token id.
    pub fn prescribe(
        env: Env,
        issuer: Address,
        patient: Address,
        payload: PrescriptionPayload,
        issued_at: u64,
        expires_at: u64,
    ) -> Result<u64, ContractError> {
        issuer.require_auth();
        let id = ledger::issue(&env, &issuer, &patient, payload, issued_at, expires_at)?;
        config::bump_instance(&env);
        Ok(id)
    }

    /// Fill `token_id` by handing it to `pharmacy`. Only the holding patient
    /// may fill. Returns the filled record.
    pub fn fill_prescription(
        env: Env,
        caller: Address,
        pharmacy: Address,
        token_id: u64,
    ) -> Result<Prescription, ContractError> {
        caller.require_auth();
        ledger::fill(&env, &caller, &pharmacy, token_id)
    }

    /// Cancel an unfilled token. Only its issuer may cancel. Returns the
    /// deleted record.
    pub fn cancel_prescription(
        env: Env,
        caller: Address,
        token_id: u64,
    ) -> Result<Prescription, ContractError> {
        caller.require_auth();
        ledger::cancel(&env, &caller, token_id)
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn get_prescription(env: Env, token_id: u64) -> Option<Prescription> {
        query::by_id(&env, token_id)
    }

    /// Records held by `owner`, newest first.
    pub fn list_by_owner(env: Env, owner: Address) -> Vec<Prescription> {
        query::list_by_owner(&env, &owner)
    }

    /// Live records issued by `issuer`, newest first.
    pub fn list_by_issuer(env: Env, issuer: Address) -> Vec<Prescription> {
        query::list_by_issuer(&env, &issuer)
    }

    /// Page through the records held by `owner`, newest first. `start`
    /// counts records to skip from the newest; `limit` is capped at
    /// `query::MAX_PAGE_SIZE` and must be non-zero.
    pub fn list_by_owner_page(
        env: Env,
        owner: Address,
        start: u32,
        limit: u32,
    ) -> Result<Vec<Prescription>, ContractError> {
        query::list_by_owner_page(&env, &owner, start, limit)
    }

    /// Page through the live records issued by `issuer`, newest first.
    pub fn list_by_issuer_page(
        env: Env,
        issuer: Address,
        start: u32,
        limit: u32,
    ) -> Result<Vec<Prescription>, ContractError> {
        query::list_by_issuer_page(&env, &issuer, start, limit)
    }

    /// Token ids held by `owner`, ascending.
    pub fn tokens_of(env: Env, owner: Address) -> Vec<u64> {
        store::owner_tokens(&env, &owner)
    }

    /// Live token ids issued by `issuer`, ascending.
    pub fn tokens_issued(env: Env, issuer: Address) -> Vec<u64> {
        store::issuer_tokens(&env, &issuer)
    }

    pub fn balance_of(env: Env, owner: Address) -> u32 {
        query::balance_of(&env, &owner)
    }

    pub fn total_supply(env: Env) -> u64 {
        store::total_supply(&env)
    }

    /// Highest token id ever allocated, canceled ones included.
    pub fn last_token_id(env: Env) -> u64 {
        store::last_id(&env)
    }

    pub fn is_expired(env: Env, token_id: u64) -> Result<bool, ContractError> {
        query::is_expired(&env, token_id)
    }
}
