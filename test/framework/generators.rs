//! # Property-Based Test Generators
//!
//! Composable `proptest` strategies for generating valid and adversarial
//! inputs for the prescription ledger.
//!
//! ## Design Decisions
//!
//! - Generators produce *semantic* values (payloads, validity windows, action
//!   sequences), not raw bytes, so tests exercise real code paths rather than
//!   stopping at input validation.
//! - Principals are referenced by index into role pools owned by the explorer.
//!   Indexes wrap modulo the pool size, so any `usize` is a valid pick.
//! - Token ids are drawn from a small range so that fills and cancels land on
//!   live tokens often enough to matter.

extern crate std;

use proptest::prelude::*;
use std::string::String;
use std::vec::Vec;

// ── Payload Generators ───────────────────────────────────────────────────────

/// Plain-Rust mirror of `PrescriptionPayload`, converted to the on-chain type
/// by `LedgerTestHarness::payload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSpec {
    pub drug_code: String,
    pub medication_name: String,
    pub dosage_quantity: u32,
    pub dosage_unit: String,
}

impl Default for PayloadSpec {
    fn default() -> Self {
        Self {
            drug_code: "12345678".into(),
            medication_name: "Aspirin Complex".into(),
            dosage_quantity: 23,
            dosage_unit: "ml".into(),
        }
    }
}

/// Strategy for payloads the ledger accepts.
pub fn payload_strategy() -> impl Strategy<Value = PayloadSpec> {
    (
        "[0-9]{6,12}",
        "[A-Z][a-z]{2,20}( [A-Z][a-z]{2,12})?",
        dosage_quantity_strategy(),
        prop_oneof![Just("ml"), Just("mg"), Just("tablets"), Just("IU")],
    )
        .prop_map(|(drug_code, medication_name, dosage_quantity, unit)| PayloadSpec {
            drug_code,
            medication_name,
            dosage_quantity,
            dosage_unit: unit.into(),
        })
}

/// Strategy for dosage quantities, biased toward the boundaries.
pub fn dosage_quantity_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => Just(1u32),
        1 => Just(u32::MAX),
        8 => 1u32..=1_000u32,
    ]
}

/// Strategy for payloads the ledger must reject with `InvalidInput`.
pub fn invalid_payload_strategy() -> impl Strategy<Value = PayloadSpec> {
    prop_oneof![
        Just(PayloadSpec { dosage_quantity: 0, ..PayloadSpec::default() }),
        Just(PayloadSpec { drug_code: String::new(), ..PayloadSpec::default() }),
        Just(PayloadSpec { medication_name: String::new(), ..PayloadSpec::default() }),
        Just(PayloadSpec { dosage_unit: String::new(), ..PayloadSpec::default() }),
        "[0-9]{33,40}".prop_map(|drug_code| PayloadSpec { drug_code, ..PayloadSpec::default() }),
        "[a-z]{129,140}".prop_map(|medication_name| PayloadSpec {
            medication_name,
            ..PayloadSpec::default()
        }),
    ]
}

/// Strategy for doctor display names the registry accepts.
pub fn doctor_name_strategy() -> impl Strategy<Value = String> {
    "Dr\\. [A-ZÀ-Ý][a-zß-ÿ' -]{1,60}"
}

// ── Time Generators ──────────────────────────────────────────────────────────

/// Strategy for time advances in seconds.
pub fn duration_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        1 => Just(0u64),
        1 => Just(1u64),
        3 => 1u64..=3_600u64,         // up to 1 hour
        3 => 1u64..=86_400u64,        // up to 1 day
        2 => 1u64..=604_800u64,       // up to 1 week
    ]
}

/// Strategy for validity windows (`expires_at - issued_at`). Zero is an
/// invalid window and is generated on purpose.
pub fn lifetime_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        1 => Just(0u64),
        1 => Just(1u64),
        6 => 1u64..=2_592_000u64,     // up to 30 days
    ]
}

/// Strategy for issuance timestamps.
pub fn timestamp_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        1 => Just(0u64),
        8 => 0u64..=31_536_000u64,    // up to 1 year of seconds
        1 => Just(u64::MAX / 2),
    ]
}

// ── Action Generators ────────────────────────────────────────────────────────

/// Every ledger action the state explorer can drive.
///
/// Principals are picked by index into the explorer's doctor, patient and
/// pharmacy pools. Fill callers are picked from patients and pharmacies
/// combined, so both legitimate and unauthorized fills are generated.
#[derive(Debug, Clone)]
pub enum LedgerAction {
    /// Admin approves (or renames) a doctor.
    ApproveDoctor { doctor: usize },
    /// Admin revokes a doctor.
    RevokeDoctor { doctor: usize },
    /// Doctor issues a token to a patient.
    Issue { doctor: usize, patient: usize, lifetime: u64 },
    /// Holder fills a token at a pharmacy.
    Fill { caller: usize, pharmacy: usize, token_id: u64 },
    /// Doctor cancels a token.
    Cancel { doctor: usize, token_id: u64 },
    AdvanceTime { delta: u64 },
    /// Admin toggles the expiry policy.
    SetRejectExpired { reject: bool },
    Pause,
    Unpause,
}

/// Strategy for individual ledger actions.
///
/// Issue and fill dominate; admin operations are rare.
pub fn ledger_action_strategy(max_token_id: u64) -> impl Strategy<Value = LedgerAction> {
    let pick = 0usize..16;
    let token = 1u64..=max_token_id.max(1);

    prop_oneof![
        30 => (pick.clone(), pick.clone(), lifetime_strategy())
            .prop_map(|(doctor, patient, lifetime)| LedgerAction::Issue { doctor, patient, lifetime }),
        25 => (pick.clone(), pick.clone(), token.clone())
            .prop_map(|(caller, pharmacy, token_id)| LedgerAction::Fill { caller, pharmacy, token_id }),
        15 => (pick.clone(), token)
            .prop_map(|(doctor, token_id)| LedgerAction::Cancel { doctor, token_id }),
        12 => duration_strategy().prop_map(|delta| LedgerAction::AdvanceTime { delta }),
        8 => pick.clone().prop_map(|doctor| LedgerAction::ApproveDoctor { doctor }),
        4 => pick.prop_map(|doctor| LedgerAction::RevokeDoctor { doctor }),
        2 => any::<bool>().prop_map(|reject| LedgerAction::SetRejectExpired { reject }),
        2 => Just(LedgerAction::Pause),
        2 => Just(LedgerAction::Unpause),
    ]
}

/// Strategy for a sequence of 1 to `max_len` ledger actions.
pub fn ledger_action_sequence(
    max_token_id: u64,
    max_len: usize,
) -> impl Strategy<Value = Vec<LedgerAction>> {
    prop::collection::vec(ledger_action_strategy(max_token_id), 1..=max_len)
}

// ── Mutation Testing Support ─────────────────────────────────────────────────

/// A well-formed issuance request that mutations are applied to.
#[derive(Debug, Clone)]
pub struct IssueRequest {
    pub payload: PayloadSpec,
    pub issued_at: u64,
    pub expires_at: u64,
}

impl IssueRequest {
    pub fn valid_at(now: u64) -> Self {
        Self {
            payload: PayloadSpec::default(),
            issued_at: now,
            expires_at: now + 86_400,
        }
    }
}

/// A single semantic mutation of an issuance request. The test suite is
/// expected to catch every one of them.
#[derive(Debug, Clone)]
pub enum Mutation {
    ZeroQuantity,
    EmptyDrugCode,
    EmptyMedicationName,
    /// `expires_at == issued_at`.
    CollapseWindow,
    /// `expires_at` before `issued_at`.
    InvertWindow,
}

pub fn mutation_strategy() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        Just(Mutation::ZeroQuantity),
        Just(Mutation::EmptyDrugCode),
        Just(Mutation::EmptyMedicationName),
        Just(Mutation::CollapseWindow),
        Just(Mutation::InvertWindow),
    ]
}

/// Apply a mutation to an issuance request.
pub fn mutate_request(mut request: IssueRequest, mutation: &Mutation) -> IssueRequest {
    match mutation {
        Mutation::ZeroQuantity => request.payload.dosage_quantity = 0,
        Mutation::EmptyDrugCode => request.payload.drug_code.clear(),
        Mutation::EmptyMedicationName => request.payload.medication_name.clear(),
        Mutation::CollapseWindow => request.expires_at = request.issued_at,
        Mutation::InvertWindow => {
            core::mem::swap(&mut request.issued_at, &mut request.expires_at)
        }
    }
    request
}

// ── Historical Pattern Generators ────────────────────────────────────────────

/// Common real-world prescription flows, replayed through the explorer.
#[derive(Debug, Clone)]
pub enum TransactionPattern {
    /// Doctor issues, patient fills at a pharmacy.
    IssueAndFill,
    /// Doctor issues, then withdraws the token.
    IssueAndCancel,
    /// Doctor is revoked with tokens outstanding; they are still filled
    /// and canceled afterwards.
    RevokeWithOutstandingTokens,
    /// Patient tries to fill the same token at two pharmacies.
    DoubleFill,
    /// Tokens expire under the reject policy before being filled.
    ExpiryRace,
}

/// Concrete action sequence for a pattern. Token ids assume a fresh ledger.
pub fn pattern_to_actions(pattern: &TransactionPattern) -> Vec<LedgerAction> {
    match pattern {
        TransactionPattern::IssueAndFill => std::vec![
            LedgerAction::ApproveDoctor { doctor: 0 },
            LedgerAction::Issue { doctor: 0, patient: 0, lifetime: 86_400 },
            LedgerAction::AdvanceTime { delta: 3_600 },
            LedgerAction::Fill { caller: 0, pharmacy: 0, token_id: 1 },
        ],
        TransactionPattern::IssueAndCancel => std::vec![
            LedgerAction::ApproveDoctor { doctor: 0 },
            LedgerAction::Issue { doctor: 0, patient: 0, lifetime: 86_400 },
            LedgerAction::Issue { doctor: 0, patient: 1, lifetime: 86_400 },
            LedgerAction::Cancel { doctor: 0, token_id: 2 },
            LedgerAction::Issue { doctor: 0, patient: 1, lifetime: 86_400 },
        ],
        TransactionPattern::RevokeWithOutstandingTokens => std::vec![
            LedgerAction::ApproveDoctor { doctor: 0 },
            LedgerAction::Issue { doctor: 0, patient: 0, lifetime: 86_400 },
            LedgerAction::Issue { doctor: 0, patient: 1, lifetime: 86_400 },
            LedgerAction::RevokeDoctor { doctor: 0 },
            LedgerAction::Issue { doctor: 0, patient: 0, lifetime: 86_400 },
            LedgerAction::Fill { caller: 0, pharmacy: 0, token_id: 1 },
            LedgerAction::Cancel { doctor: 0, token_id: 2 },
        ],
        TransactionPattern::DoubleFill => std::vec![
            LedgerAction::ApproveDoctor { doctor: 0 },
            LedgerAction::Issue { doctor: 0, patient: 0, lifetime: 86_400 },
            LedgerAction::Fill { caller: 0, pharmacy: 0, token_id: 1 },
            LedgerAction::Fill { caller: 0, pharmacy: 1, token_id: 1 },
            LedgerAction::Cancel { doctor: 0, token_id: 1 },
        ],
        TransactionPattern::ExpiryRace => std::vec![
            LedgerAction::ApproveDoctor { doctor: 0 },
            LedgerAction::SetRejectExpired { reject: true },
            LedgerAction::Issue { doctor: 0, patient: 0, lifetime: 60 },
            LedgerAction::Issue { doctor: 0, patient: 0, lifetime: 86_400 },
            LedgerAction::AdvanceTime { delta: 120 },
            LedgerAction::Fill { caller: 0, pharmacy: 0, token_id: 1 },
            LedgerAction::Fill { caller: 0, pharmacy: 0, token_id: 2 },
            LedgerAction::Cancel { doctor: 0, token_id: 1 },
        ],
    }
}

pub fn transaction_pattern_strategy() -> impl Strategy<Value = TransactionPattern> {
    prop_oneof![
        Just(TransactionPattern::IssueAndFill),
        Just(TransactionPattern::IssueAndCancel),
        Just(TransactionPattern::RevokeWithOutstandingTokens),
        Just(TransactionPattern::DoubleFill),
        Just(TransactionPattern::ExpiryRace),
    ]
}
