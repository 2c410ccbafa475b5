//! Types shared between the relations and the host-side prover/verifier.

use crate::errors::ZkError;
use ark_bls12_381::Fr;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::{Deserialize, Serialize};

/// Raw data for one account, as supplied by the reserve operator.
///
/// Records exist only as input to witness construction and are never
/// persisted by this crate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Account balance. Signed; reduced into the scalar field.
    pub balance: i128,
    /// Blinding factor. Nonzero by convention.
    pub blinding: u128,
    /// External address, hex encoded with an optional `0x` prefix.
    pub address: String,
}

/// The closed set of representations a witness value may arrive in.
///
/// Conversion is total per variant; anything outside this set cannot be
/// constructed, so no conversion path aborts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Already a canonical field element.
    Field(Fr),
    /// Signed machine integer. Negatives map to the additive inverse.
    Int(i128),
    /// Base-10 integer string of arbitrary length, optionally negative.
    Decimal(String),
}

impl Value {
    /// Reduce this value into the scalar field.
    pub fn to_field(&self) -> Result<Fr, ZkError> {
        match self {
            Value::Field(x) => Ok(*x),
            Value::Int(i) => Ok(Fr::from(*i)),
            Value::Decimal(s) => parse_decimal(s),
        }
    }
}

impl From<Fr> for Value {
    fn from(x: Fr) -> Self {
        Value::Field(x)
    }
}

impl From<i128> for Value {
    fn from(i: i128) -> Self {
        Value::Int(i)
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        Value::Int(i128::from(i))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Decimal(s.to_string())
    }
}

/// Parse a base-10 integer string (optional leading `-`) into the field.
///
/// Digits are folded in modularly, so strings longer than the modulus are
/// reduced rather than rejected.
fn parse_decimal(s: &str) -> Result<Fr, ZkError> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ZkError::Conversion {
            repr: "decimal string",
            reason: format!("{s:?} is not a base-10 integer"),
        });
    }

    let ten = Fr::from(10u64);
    let mut acc = Fr::from(0u64);
    for b in digits.bytes() {
        acc = acc * ten + Fr::from(u64::from(b - b'0'));
    }

    Ok(if negative { -acc } else { acc })
}

/// JSON-friendly representation of a field element.
///
/// Field values cross serialization boundaries as hex strings of the
/// canonical compressed encoding so all components agree byte for byte.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrHex {
    pub hex: String,
}

impl FrHex {
    pub fn from_fr(x: &Fr) -> Self {
        let mut bytes = Vec::new();
        x.serialize_compressed(&mut bytes)
            .expect("in-memory serialization");
        Self {
            hex: hex::encode(bytes),
        }
    }

    pub fn to_fr(&self) -> Result<Fr, ZkError> {
        let bytes = hex::decode(&self.hex)
            .map_err(|e| ZkError::Serialization(format!("invalid hex: {e}")))?;
        Fr::deserialize_compressed(&bytes[..])
            .map_err(|e| ZkError::Serialization(format!("invalid field bytes: {e}")))
    }
}
