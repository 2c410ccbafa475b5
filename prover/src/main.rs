//! Proof-of-reserves driver.
//!
//! Generates a synthetic account book and runs the full pipeline
//! (compile -> setup -> witness -> prove -> verify) for both proving paths,
//! reporting per-phase timings:
//! - flat summation over raw balances, sized by `RESERVE_ACCOUNTS`;
//! - per-account commitment proofs rolled up into an aggregate, sized by
//!   `RESERVE_ROLLUP_ACCOUNTS`.

use std::time::Instant;

use ark_bls12_381::Fr;
use base64::Engine;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zk_reserve::circuit::{AccountCommitmentCircuit, BalanceSumCircuit, CommitmentRollupCircuit};
use zk_reserve::errors::ZkError;
use zk_reserve::groth16;
use zk_reserve::types::{AccountRecord, FrHex};
use zk_reserve::witness::Relation;

/// Fixed data seed so repeated runs prove the same synthetic book.
/// Proof randomness still comes from the OS.
const DATA_SEED: u64 = 0x5245_5345_5256_45;

fn env_count(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn log_elapsed(phase: &str, start: Instant) {
    info!(phase, elapsed_s = start.elapsed().as_secs_f64(), "phase complete");
}

fn run_flat_sum(accounts: usize) -> Result<(), ZkError> {
    info!(accounts, "flat summation pipeline");

    let mut data_rng = ChaCha20Rng::seed_from_u64(DATA_SEED);
    let balances: Vec<Fr> = (0..accounts).map(|_| Fr::from(data_rng.next_u64())).collect();

    let t = Instant::now();
    let cs = groth16::compile(BalanceSumCircuit::blank(accounts))?;
    info!(
        constraints = cs.num_constraints(),
        elapsed_s = t.elapsed().as_secs_f64(),
        "circuit compiled"
    );

    let t = Instant::now();
    let mut proof_rng = rand::rngs::OsRng;
    let (pk, vk) = groth16::setup(BalanceSumCircuit::blank(accounts), &mut proof_rng)?;
    log_elapsed("setup", t);

    let t = Instant::now();
    let circuit = BalanceSumCircuit::new(balances);
    circuit.check()?;
    let public = circuit.to_assignment().public_witness();
    log_elapsed("witness", t);
    info!(total_sum = %FrHex::from_fr(&circuit.total_sum).hex, "declared total");

    let t = Instant::now();
    let proof = groth16::prove(circuit, &pk, &mut proof_rng)?;
    log_elapsed("prove", t);

    let b64 = base64::engine::general_purpose::STANDARD;
    info!(proof = %b64.encode(groth16::serialize_proof(&proof)?), "proof generated");

    let t = Instant::now();
    groth16::verify(&vk, &proof, &public.values)?;
    log_elapsed("verify", t);

    Ok(())
}

fn synthetic_record(rng: &mut ChaCha20Rng) -> AccountRecord {
    AccountRecord {
        balance: i128::from(rng.next_u64()),
        blinding: u128::from(rng.next_u64() | 1),
        address: format!("0x{:040x}", rng.next_u64()),
    }
}

fn run_rollup(accounts: usize) -> Result<(), ZkError> {
    info!(accounts, "hierarchical commitment pipeline");

    let mut data_rng = ChaCha20Rng::seed_from_u64(DATA_SEED);
    let mut proof_rng = rand::rngs::OsRng;

    let t = Instant::now();
    let (pk, vk) = groth16::setup(AccountCommitmentCircuit::blank(), &mut proof_rng)?;
    log_elapsed("account setup", t);

    let t = Instant::now();
    let mut commitments = Vec::with_capacity(accounts);
    for _ in 0..accounts {
        let record = synthetic_record(&mut data_rng);
        let circuit = AccountCommitmentCircuit::from_record(&record)?;
        circuit.check()?;

        let proof = groth16::prove(circuit.clone(), &pk, &mut proof_rng)?;
        let public = circuit.to_assignment().public_witness();
        groth16::verify(&vk, &proof, &public.values)?;

        commitments.push(circuit.commitment);
    }
    log_elapsed("account proofs", t);

    let t = Instant::now();
    let rollup = CommitmentRollupCircuit::new(commitments);
    rollup.check()?;
    let (pk, vk) = groth16::setup(CommitmentRollupCircuit::blank(accounts), &mut proof_rng)?;
    let proof = groth16::prove(rollup.clone(), &pk, &mut proof_rng)?;
    let public = rollup.to_assignment().public_witness();
    groth16::verify(&vk, &proof, &public.values)?;
    log_elapsed("rollup", t);
    info!(total_commitment = %FrHex::from_fr(&rollup.total_commitment).hex, "aggregate proved");

    Ok(())
}

fn main() -> Result<(), ZkError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init();

    let accounts = env_count("RESERVE_ACCOUNTS", 4096);
    run_flat_sum(accounts)?;

    let rollup_accounts = env_count("RESERVE_ROLLUP_ACCOUNTS", 8);
    run_rollup(rollup_accounts)?;

    info!("all proofs verified");
    Ok(())
}
