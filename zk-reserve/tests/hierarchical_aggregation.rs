//! End-to-end Groth16 pipeline for the hierarchical path: one proof per
//! account commitment, then a rollup proof over the published commitments.

use ark_bls12_381::Fr;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use zk_reserve::circuit::{AccountCommitmentCircuit, CommitmentRollupCircuit};
use zk_reserve::errors::ZkError;
use zk_reserve::groth16;
use zk_reserve::identity::derive_account_identity;
use zk_reserve::types::AccountRecord;
use zk_reserve::witness::Relation;

fn demo_records(accounts: usize) -> Vec<AccountRecord> {
    (0..accounts)
        .map(|i| AccountRecord {
            balance: 1_000 + i as i128,
            blinding: 1 + i as u128,
            address: format!("0x{:040x}", 7 * i + 1),
        })
        .collect()
}

#[test]
fn record_commitment_matches_derived_identity() {
    let record = &demo_records(1)[0];
    let circuit = AccountCommitmentCircuit::from_record(record).unwrap();

    let identity = derive_account_identity(&record.address).unwrap();
    assert_eq!(circuit.account_identity, identity);
    assert_eq!(
        circuit.commitment,
        Fr::from(record.balance) * Fr::from(record.blinding) + identity
    );
    circuit.check().unwrap();
}

#[test]
fn account_proofs_and_rollup_verification() {
    let mut rng = ChaCha20Rng::seed_from_u64(11);
    let records = demo_records(4);

    let circuits: Vec<AccountCommitmentCircuit> = records
        .iter()
        .map(|r| AccountCommitmentCircuit::from_record(r).unwrap())
        .collect();

    // One keypair covers every account: the shape is arity-independent.
    let (pk, vk) = groth16::setup(AccountCommitmentCircuit::blank(), &mut rng).unwrap();
    for circuit in &circuits {
        let proof = groth16::prove(circuit.clone(), &pk, &mut rng).unwrap();
        let public = circuit.to_assignment().public_witness();
        groth16::verify(&vk, &proof, &public.values).unwrap();
    }

    // Roll the published commitments up into one aggregate statement.
    let commitments: Vec<Fr> = circuits.iter().map(|c| c.commitment).collect();
    let rollup = CommitmentRollupCircuit::new(commitments);
    rollup.check().unwrap();

    let (pk, vk) = groth16::setup(CommitmentRollupCircuit::blank(4), &mut rng).unwrap();
    let proof = groth16::prove(rollup.clone(), &pk, &mut rng).unwrap();
    let public = rollup.to_assignment().public_witness();
    groth16::verify(&vk, &proof, &public.values).unwrap();

    // Claiming a different aggregate must not verify.
    let mut tampered = public.values.clone();
    let last = tampered.len() - 1;
    tampered[last] += Fr::from(1u64);
    assert!(matches!(
        groth16::verify(&vk, &proof, &tampered),
        Err(ZkError::VerificationFailed)
    ));
}

#[test]
fn account_proof_rejects_wrong_commitment() {
    let mut rng = ChaCha20Rng::seed_from_u64(17);
    let circuit = AccountCommitmentCircuit::from_record(&demo_records(1)[0]).unwrap();

    let (pk, vk) = groth16::setup(AccountCommitmentCircuit::blank(), &mut rng).unwrap();
    let proof = groth16::prove(circuit.clone(), &pk, &mut rng).unwrap();

    assert!(matches!(
        groth16::verify(&vk, &proof, &[circuit.commitment + Fr::from(1u64)]),
        Err(ZkError::VerificationFailed)
    ));
}

#[test]
fn empty_rollup_proves_zero_total() {
    let mut rng = ChaCha20Rng::seed_from_u64(19);

    let rollup = CommitmentRollupCircuit::new(Vec::new());
    let (pk, vk) = groth16::setup(CommitmentRollupCircuit::blank(0), &mut rng).unwrap();
    let proof = groth16::prove(rollup.clone(), &pk, &mut rng).unwrap();

    let public = rollup.to_assignment().public_witness();
    assert_eq!(public.values, vec![Fr::from(0u64)]);
    groth16::verify(&vk, &proof, &public.values).unwrap();

    assert!(matches!(
        groth16::verify(&vk, &proof, &[Fr::from(1u64)]),
        Err(ZkError::VerificationFailed)
    ));
}
