//! Account identity derivation.
//!
//! External addresses never enter a relation directly; they are mapped to a
//! field element first so the per-account commitment can bind to them.

use crate::errors::ZkError;
use ark_bls12_381::Fr;
use ark_ff::PrimeField;
use sha3::{Digest, Keccak256};

/// Derive the in-circuit account identity from an external address string.
///
/// The address is hex decoded (an optional `0x`/`0X` prefix is ignored),
/// hashed with Keccak-256, and the 32-byte digest is interpreted as a
/// big-endian unsigned integer reduced into the scalar field. Deterministic:
/// prefix-normalized inputs always map to the same element.
pub fn derive_account_identity(address: &str) -> Result<Fr, ZkError> {
    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);

    let bytes = hex::decode(digits).map_err(|e| ZkError::AddressFormat {
        address: address.to_string(),
        reason: e.to_string(),
    })?;

    let mut hasher = Keccak256::new();
    hasher.update(&bytes);
    let digest = hasher.finalize();
    Ok(Fr::from_be_bytes_mod_order(digest.as_slice()))
}
