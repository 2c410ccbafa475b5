//! Groth16 prover/verifier orchestration for the reserve relations.
//!
//! SECURITY NOTE (prototype): Groth16 requires a trusted setup that produces a
//! proving key (PK) and verifying key (VK). This prototype generates keys
//! locally. In production, an MPC ceremony (or a transparent system) should be
//! used.

use crate::errors::ZkError;
use ark_bls12_381::{Bls12_381, Fr};
use ark_groth16::{Groth16, Proof, ProvingKey, VerifyingKey, prepare_verifying_key};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem, ConstraintSystemRef};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::RngCore;

/// Synthesize a relation into a finalized R1CS instance.
///
/// Useful for constraint counting and for checking satisfiability of a fully
/// assigned instance without touching key material.
pub fn compile<C: ConstraintSynthesizer<Fr>>(circuit: C) -> Result<ConstraintSystemRef<Fr>, ZkError> {
    let cs = ConstraintSystem::<Fr>::new_ref();
    circuit
        .generate_constraints(cs.clone())
        .map_err(|e| ZkError::Ark(format!("{e}")))?;
    cs.finalize();
    Ok(cs)
}

/// Generate a Groth16 keypair for one relation shape.
///
/// Keys are bound to the shape, including vector slot arities: a keypair
/// generated for n accounts only covers instances with n accounts. Any
/// instance of the right arity works here; values are ignored.
pub fn setup<C: ConstraintSynthesizer<Fr>>(
    shape_circuit: C,
    rng: &mut impl RngCore,
) -> Result<(ProvingKey<Bls12_381>, VerifyingKey<Bls12_381>), ZkError> {
    let pk = Groth16::<Bls12_381>::generate_random_parameters_with_reduction(shape_circuit, rng)
        .map_err(|e| ZkError::Ark(format!("{e}")))?;

    let vk = pk.vk.clone();
    Ok((pk, vk))
}

/// Prove a fully assigned relation instance.
pub fn prove<C: ConstraintSynthesizer<Fr>>(
    circuit: C,
    pk: &ProvingKey<Bls12_381>,
    rng: &mut impl RngCore,
) -> Result<Proof<Bls12_381>, ZkError> {
    Groth16::<Bls12_381>::create_random_proof_with_reduction(circuit, pk, rng)
        .map_err(|e| ZkError::Ark(format!("{e}")))
}

/// Verify a proof against public inputs in declaration order.
///
/// A well-formed but non-verifying proof is its own error condition,
/// distinct from backend faults.
pub fn verify(
    vk: &VerifyingKey<Bls12_381>,
    proof: &Proof<Bls12_381>,
    public_inputs: &[Fr],
) -> Result<(), ZkError> {
    let pvk = prepare_verifying_key(vk);
    let ok = Groth16::<Bls12_381>::verify_proof(&pvk, proof, public_inputs)
        .map_err(|e| ZkError::Ark(format!("{e}")))?;
    if !ok {
        return Err(ZkError::VerificationFailed);
    }
    Ok(())
}

/// Serialize a proving key to bytes.
pub fn serialize_pk(pk: &ProvingKey<Bls12_381>) -> Result<Vec<u8>, ZkError> {
    let mut out = Vec::new();
    pk.serialize_compressed(&mut out)
        .map_err(|e| ZkError::Serialization(format!("{e}")))?;
    Ok(out)
}

pub fn deserialize_pk(bytes: &[u8]) -> Result<ProvingKey<Bls12_381>, ZkError> {
    ProvingKey::<Bls12_381>::deserialize_compressed(bytes)
        .map_err(|e| ZkError::Serialization(format!("{e}")))
}

pub fn serialize_vk(vk: &VerifyingKey<Bls12_381>) -> Result<Vec<u8>, ZkError> {
    let mut out = Vec::new();
    vk.serialize_compressed(&mut out)
        .map_err(|e| ZkError::Serialization(format!("{e}")))?;
    Ok(out)
}

pub fn deserialize_vk(bytes: &[u8]) -> Result<VerifyingKey<Bls12_381>, ZkError> {
    VerifyingKey::<Bls12_381>::deserialize_compressed(bytes)
        .map_err(|e| ZkError::Serialization(format!("{e}")))
}

pub fn serialize_proof(proof: &Proof<Bls12_381>) -> Result<Vec<u8>, ZkError> {
    let mut out = Vec::new();
    proof
        .serialize_compressed(&mut out)
        .map_err(|e| ZkError::Serialization(format!("{e}")))?;
    Ok(out)
}

pub fn deserialize_proof(bytes: &[u8]) -> Result<Proof<Bls12_381>, ZkError> {
    Proof::<Bls12_381>::deserialize_compressed(bytes)
        .map_err(|e| ZkError::Serialization(format!("{e}")))
}
