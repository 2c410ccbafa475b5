//! Error taxonomy shared by the relation, witness, and backend layers.
//!
//! Structural problems (arity, exhaustion, conversion, address format) are
//! detected before any backend call. `Unsatisfied` is a legitimate negative
//! result of the validation predicate, not a fault, and stays distinguishable
//! from the structural variants.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZkError {
    #[error(
        "arity mismatch for {relation}: declared {declared_public} public / {declared_secret} secret, shape has {actual_public} public / {actual_secret} secret"
    )]
    ArityMismatch {
        relation: &'static str,
        declared_public: usize,
        declared_secret: usize,
        actual_public: usize,
        actual_secret: usize,
    },

    #[error("value sequence exhausted while filling {slot}[{index}]")]
    SequenceExhausted { slot: &'static str, index: usize },

    #[error("cannot convert {repr} value to a field element: {reason}")]
    Conversion { repr: &'static str, reason: String },

    #[error("relation {relation} unsatisfied: {detail}")]
    Unsatisfied {
        relation: &'static str,
        detail: String,
    },

    #[error("malformed address {address:?}: {reason}")]
    AddressFormat { address: String, reason: String },

    #[error("assignment does not fit {relation}: {detail}")]
    ShapeMismatch {
        relation: &'static str,
        detail: String,
    },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("proof verification failed")]
    VerificationFailed,

    #[error("arkworks error: {0}")]
    Ark(String),
}
