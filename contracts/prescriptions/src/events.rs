//! Structured event publishing for the prescription ledger.
//!
//! Every state change publishes one event. Topics carry the principals
//! involved so that portals and indexers can subscribe per doctor, patient,
//! or pharmacy and refresh their own views.

#![allow(deprecated)] // events().publish migration to #[contractevent] tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::types::{ExpiryPolicy, Prescription};

/// Event published when the contract is initialized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when the admin role moves to a new address.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferredEvent {
    pub previous: Address,
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when a doctor is approved (or re-approved).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorApprovedEvent {
    pub doctor: Address,
    pub name: String,
    pub timestamp: u64,
}

/// Event published when a doctor's approval is revoked.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorRevokedEvent {
    pub doctor: Address,
    pub timestamp: u64,
}

/// Event published when a prescription token is issued.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrescriptionIssuedEvent {
    pub token_id: u64,
    pub issuer: Address,
    pub patient: Address,
    pub drug_code: String,
    pub expires_at: u64,
    pub timestamp: u64,
}

/// Event published when a patient fills a prescription at a pharmacy.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrescriptionFilledEvent {
    pub token_id: u64,
    pub patient: Address,
    pub pharmacy: Address,
    pub timestamp: u64,
}

/// Event published when the issuer cancels an unfilled prescription.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrescriptionCanceledEvent {
    pub token_id: u64,
    pub issuer: Address,
    pub holder: Address,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_admin_transferred(env: &Env, previous: Address, admin: Address) {
    let topics = (symbol_short!("ADM_XFER"), admin.clone());
    let data = AdminTransferredEvent {
        previous,
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_doctor_approved(env: &Env, doctor: Address, name: String) {
    let topics = (symbol_short!("DOC_APPR"), doctor.clone());
    let data = DoctorApprovedEvent {
        doctor,
        name,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_doctor_revoked(env: &Env, doctor: Address) {
    let topics = (symbol_short!("DOC_REVK"), doctor.clone());
    let data = DoctorRevokedEvent {
        doctor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a new token is issued.
/// Topics: `("RX_ISSUE", issuer, patient)`.
pub fn publish_prescription_issued(env: &Env, rx: &Prescription) {
    let topics = (
        symbol_short!("RX_ISSUE"),
        rx.issuer.clone(),
        rx.owner.clone(),
    );
    let data = PrescriptionIssuedEvent {
        token_id: rx.id,
        issuer: rx.issuer.clone(),
        patient: rx.owner.clone(),
        drug_code: rx.drug_code.clone(),
        expires_at: rx.expires_at,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a token moves from a patient to a pharmacy.
/// Topics: `("RX_FILL", patient, pharmacy)`.
pub fn publish_prescription_filled(env: &Env, token_id: u64, patient: Address, pharmacy: Address) {
    let topics = (symbol_short!("RX_FILL"), patient.clone(), pharmacy.clone());
    let data = PrescriptionFilledEvent {
        token_id,
        patient,
        pharmacy,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a token is canceled and deleted.
/// Topics: `("RX_CANCL", issuer, holder)`.
pub fn publish_prescription_canceled(env: &Env, rx: &Prescription) {
    let topics = (
        symbol_short!("RX_CANCL"),
        rx.issuer.clone(),
        rx.owner.clone(),
    );
    let data = PrescriptionCanceledEvent {
        token_id: rx.id,
        issuer: rx.issuer.clone(),
        holder: rx.owner.clone(),
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_paused(env: &Env, caller: Address, paused: bool) {
    let name = if paused {
        symbol_short!("PAUSED")
    } else {
        symbol_short!("UNPAUSED")
    };
    env.events().publish((name, caller), paused);
}

pub fn publish_expiry_policy_changed(env: &Env, policy: ExpiryPolicy) {
    env.events().publish((symbol_short!("EXP_POL"),), policy);
}
