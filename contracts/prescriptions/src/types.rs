use soroban_sdk::{contracttype, Address, String};

/// Persistent storage keys.
///
/// Configuration and counters live in instance storage under short symbols
/// (see `lib.rs` and `store.rs`); everything keyed by a principal or a token
/// id lives in persistent storage under these variants.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Doctor(Address),
    Prescription(u64),
    OwnerTokens(Address),
    IssuerTokens(Address),
}

/// Registry entry for a doctor. Revocation clears `approved` but keeps the
/// record so historical attribution still resolves.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Doctor {
    pub address: Address,
    pub name: String,
    pub approved: bool,
    pub approved_at: u64,
    pub revoked_at: Option<u64>,
}

/// Descriptive part of a prescription, supplied by the issuing doctor.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrescriptionPayload {
    /// External catalog identifier (PZN, NDC, ...). Opaque to the ledger.
    pub drug_code: String,
    pub medication_name: String,
    pub dosage_quantity: u32,
    pub dosage_unit: String,
}

/// A prescription token.
///
/// Lifecycle:
///
/// ```text
/// Issued (owner = patient, filled = false)
///   ├── fill   ──► Filled   (owner = pharmacy, filled = true; retained)
///   └── cancel ──► Canceled (record deleted; id retired)
/// ```
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Prescription {
    pub id: u64,
    pub issuer: Address,
    /// Issuer's display name at issuance time.
    pub issuer_name: String,
    /// Patient the prescription was written for; unchanged by fill.
    pub patient: Address,
    /// Current holder: the patient until filled, then the pharmacy.
    pub owner: Address,
    pub drug_code: String,
    pub medication_name: String,
    pub dosage_quantity: u32,
    pub dosage_unit: String,
    pub issued_at: u64,
    pub expires_at: u64,
    pub filled: bool,
    pub filled_at: Option<u64>,
}

impl Prescription {
    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.expires_at
    }
}

/// Whether `fill` rejects tokens whose `expires_at` has passed.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExpiryPolicy {
    /// Expiry is informational only; expired tokens can still be filled.
    Ignore,
    /// `fill` fails with `Expired` once ledger time reaches `expires_at`.
    RejectExpired,
}
