#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use prescriptions::{
    ExpiryPolicy, PrescriptionLedgerContract, PrescriptionLedgerContractClient,
    PrescriptionPayload,
};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Env, String,
};

/// Actions covering every mutating ledger entry point.
///
/// Principals are selected by index into fixed pools; text fields are short
/// byte strings so that both valid and malformed payloads are reached.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Approve { doctor: u8 },
    Revoke { doctor: u8 },
    Issue {
        doctor: u8,
        patient: u8,
        issued_back: u16,
        lifetime: u32,
        quantity: u8,
        code: [u8; 4],
    },
    Fill { caller: u8, pharmacy: u8, token: u8 },
    Cancel { doctor: u8, token: u8 },
    RejectExpired(bool),
    Pause,
    Unpause,
    AdvanceTime { delta: u16 },
}

const DOCTORS: usize = 3;
const HOLDERS: usize = 5;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let contract_id = env.register(PrescriptionLedgerContract, ());
    let client = PrescriptionLedgerContractClient::new(&env, &contract_id);

    if client.try_initialize(&admin).is_err() {
        return;
    }

    let doctors: Vec<Address> = (0..DOCTORS).map(|_| Address::generate(&env)).collect();
    let holders: Vec<Address> = (0..HOLDERS).map(|_| Address::generate(&env)).collect();
    let everyone: Vec<&Address> = doctors.iter().chain(holders.iter()).collect();

    for action in actions {
        let supply_before = client.total_supply();
        let last_before = client.last_token_id();

        match action {
            FuzzAction::Approve { doctor } => {
                let d = &doctors[doctor as usize % DOCTORS];
                let _ = client.try_approve_doctor(&admin, d, &String::from_str(&env, "Dr. Fuzz"));
            }
            FuzzAction::Revoke { doctor } => {
                let _ = client.try_revoke_doctor(&admin, &doctors[doctor as usize % DOCTORS]);
            }
            FuzzAction::Issue {
                doctor,
                patient,
                issued_back,
                lifetime,
                quantity,
                code,
            } => {
                let code: std::string::String =
                    code.iter().map(|b| char::from(b'0' + b % 10)).collect();
                let payload = PrescriptionPayload {
                    drug_code: String::from_str(&env, &code),
                    medication_name: String::from_str(&env, "Aspirin Complex"),
                    dosage_quantity: quantity as u32,
                    dosage_unit: String::from_str(&env, "ml"),
                };
                let issued_at = env.ledger().timestamp().saturating_sub(issued_back as u64);
                let expires_at = issued_at.saturating_add(lifetime as u64);
                let _ = client.try_prescribe(
                    &doctors[doctor as usize % DOCTORS],
                    &holders[patient as usize % HOLDERS],
                    &payload,
                    &issued_at,
                    &expires_at,
                );
            }
            FuzzAction::Fill {
                caller,
                pharmacy,
                token,
            } => {
                let _ = client.try_fill_prescription(
                    &holders[caller as usize % HOLDERS],
                    &holders[pharmacy as usize % HOLDERS],
                    &(token as u64),
                );
            }
            FuzzAction::Cancel { doctor, token } => {
                let _ = client
                    .try_cancel_prescription(&doctors[doctor as usize % DOCTORS], &(token as u64));
            }
            FuzzAction::RejectExpired(reject) => {
                let policy = if reject {
                    ExpiryPolicy::RejectExpired
                } else {
                    ExpiryPolicy::Ignore
                };
                let _ = client.try_set_expiry_policy(&admin, &policy);
            }
            FuzzAction::Pause => {
                let _ = client.try_pause(&admin);
            }
            FuzzAction::Unpause => {
                let _ = client.try_unpause(&admin);
            }
            FuzzAction::AdvanceTime { delta } => {
                let ts = env.ledger().timestamp().saturating_add(delta as u64);
                env.ledger().set_timestamp(ts);
            }
        }

        // ── Post-action invariant checks ──
        let supply = client.total_supply();
        let last = client.last_token_id();
        assert!(last >= last_before, "INVARIANT VIOLATION: id counter went backwards");
        assert!(
            supply.abs_diff(supply_before) <= 1,
            "INVARIANT VIOLATION: supply jumped {} -> {}",
            supply_before,
            supply
        );

        let mut live = 0u64;
        for id in 1..=last {
            let Some(rx) = client.get_prescription(&id) else {
                continue;
            };
            live += 1;
            assert!(rx.expires_at > rx.issued_at, "INVARIANT VIOLATION: empty window");
            assert_eq!(rx.filled, rx.owner != rx.patient, "INVARIANT VIOLATION: fill shape");
            assert!(
                client.tokens_of(&rx.owner).contains(id),
                "INVARIANT VIOLATION: token {} missing from owner bucket",
                id
            );
            assert!(
                client.tokens_issued(&rx.issuer).contains(id),
                "INVARIANT VIOLATION: token {} missing from issuer bucket",
                id
            );
        }
        assert_eq!(live, supply, "INVARIANT VIOLATION: supply != live records");

        // Every bucket entry must point back at a live record for that principal.
        for p in &everyone {
            for id in client.tokens_of(p).iter() {
                let rx = client.get_prescription(&id);
                assert!(rx.is_some_and(|rx| rx.owner == **p), "INVARIANT VIOLATION: stale owner entry");
            }
            for id in client.tokens_issued(p).iter() {
                let rx = client.get_prescription(&id);
                assert!(rx.is_some_and(|rx| rx.issuer == **p), "INVARIANT VIOLATION: stale issuer entry");
            }
        }
    }
});
