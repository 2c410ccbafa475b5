//! ZK layer for the proof-of-reserves system.
//!
//! This crate contains:
//! - SNARK relations for per-account balance commitments, commitment rollups,
//!   and flat balance summation.
//! - The witness lifecycle: serialization, public projection, vector
//!   flattening, and positional fill.
//! - Account identity derivation from external addresses.
//! - Prover + verifier orchestration over Groth16.

pub mod circuit;
pub mod errors;
pub mod groth16;
pub mod identity;
pub mod types;
pub mod witness;
