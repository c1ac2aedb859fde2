use soroban_sdk::{Address, Env, String};

use crate::types::PrescriptionPayload;
use crate::ContractError;

const MAX_NAME_LEN: u32 = 256;

const MAX_DRUG_CODE_LEN: u32 = 32;
const MAX_MEDICATION_NAME_LEN: u32 = 128;
const MAX_DOSAGE_UNIT_LEN: u32 = 16;

/// Validate a doctor's display name.
/// Names are non-empty UTF-8 of at most MAX_NAME_LEN bytes with no control
/// characters.
pub fn validate_name(name: &String) -> Result<(), ContractError> {
    let len = name.len();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(ContractError::InvalidInput);
    }

    let mut buf = [0u8; MAX_NAME_LEN as usize];
    name.copy_into_slice(&mut buf[..len as usize]);

    // Multi-byte UTF-8 sequences never contain bytes below 0x80, so a
    // byte-wise scan only ever matches ASCII controls.
    if buf[..len as usize].iter().any(|b| *b < 0x20 || *b == 0x7f) {
        return Err(ContractError::InvalidInput);
    }

    Ok(())
}

/// Validate the descriptive payload of a new prescription.
///
/// Text fields must be non-empty and bounded; the quantity must be positive.
pub fn validate_payload(payload: &PrescriptionPayload) -> Result<(), ContractError> {
    validate_text(&payload.drug_code, MAX_DRUG_CODE_LEN)?;
    validate_text(&payload.medication_name, MAX_MEDICATION_NAME_LEN)?;
    validate_text(&payload.dosage_unit, MAX_DOSAGE_UNIT_LEN)?;
    if payload.dosage_quantity == 0 {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}

/// Validate a prescription's validity window.
pub fn validate_interval(issued_at: u64, expires_at: u64) -> Result<(), ContractError> {
    if expires_at <= issued_at {
        return Err(ContractError::InvalidInterval);
    }
    Ok(())
}

/// Validate that `holder` can receive a token.
///
/// The ledger contract's own address never holds prescriptions.
pub fn validate_holder(env: &Env, holder: &Address) -> Result<(), ContractError> {
    if *holder == env.current_contract_address() {
        return Err(ContractError::InvalidPrincipal);
    }
    Ok(())
}

fn validate_text(value: &String, max_len: u32) -> Result<(), ContractError> {
    let len = value.len();
    if len == 0 || len > max_len {
        return Err(ContractError::InvalidInput);
    }
    Ok(())
}
