//! Relation definitions for the proof-of-reserves statements.
//!
//! Three relations cover the two proving paths: per-account commitments
//! rolled up into an aggregate commitment, or one flat summation over raw
//! balances. Each relation is an arkworks `ConstraintSynthesizer` over the
//! BLS12-381 scalar field and also implements the witness lifecycle through
//! [`crate::witness::Relation`].

mod account;
mod rollup;
mod sum;

pub use account::{AccountCommitmentCircuit, commitment_for};
pub use rollup::CommitmentRollupCircuit;
pub use sum::BalanceSumCircuit;
