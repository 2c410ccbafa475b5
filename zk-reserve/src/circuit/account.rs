//! Per-account commitment relation.
//!
//! Proves knowledge of (balance, blinding, identity) opening a public
//! commitment under `commitment == balance * blinding + account_identity`.
//!
//! SECURITY NOTE (prototype): the commitment rule is a linear stand-in, not a
//! hiding or binding commitment. A production scheme would commit with scalar
//! multiplications of independent curve generators; the linear rule is the
//! contract this relation ships and tests.

use crate::errors::ZkError;
use crate::identity::derive_account_identity;
use crate::types::AccountRecord;
use crate::witness::{Assignment, Relation, RelationShape, SlotDecl, Visibility};
use ark_bls12_381::Fr;
use ark_r1cs_std::alloc::AllocVar;
use ark_r1cs_std::eq::EqGadget;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

const RELATION: &str = "account_commitment";

/// Host-side commitment rule.
///
/// This MUST match the in-circuit computation.
pub fn commitment_for(balance: Fr, blinding: Fr, account_identity: Fr) -> Fr {
    balance * blinding + account_identity
}

#[derive(Clone, Debug)]
pub struct AccountCommitmentCircuit {
    /// Secret account balance.
    pub balance: Fr,
    /// Secret blinding factor. Nonzero by convention.
    pub blinding: Fr,
    /// Secret account identity derived from the external address.
    pub account_identity: Fr,
    /// Public commitment the secrets must open.
    pub commitment: Fr,
}

impl AccountCommitmentCircuit {
    /// Populate an instance whose commitment is computed from the secrets.
    pub fn new(balance: Fr, blinding: Fr, account_identity: Fr) -> Self {
        Self {
            balance,
            blinding,
            account_identity,
            commitment: commitment_for(balance, blinding, account_identity),
        }
    }

    /// Build a populated instance from raw account data.
    pub fn from_record(record: &AccountRecord) -> Result<Self, ZkError> {
        let account_identity = derive_account_identity(&record.address)?;
        Ok(Self::new(
            Fr::from(record.balance),
            Fr::from(record.blinding),
            account_identity,
        ))
    }

    /// All-zero instance describing the relation's shape to the compiler.
    pub fn blank() -> Self {
        Self {
            balance: Fr::from(0u64),
            blinding: Fr::from(0u64),
            account_identity: Fr::from(0u64),
            commitment: Fr::from(0u64),
        }
    }

    pub fn shape_decl() -> RelationShape {
        RelationShape {
            relation: RELATION,
            slots: vec![
                SlotDecl::scalar("balance", Visibility::Secret),
                SlotDecl::scalar("blinding", Visibility::Secret),
                SlotDecl::scalar("account_identity", Visibility::Secret),
                SlotDecl::scalar("commitment", Visibility::Public),
            ],
        }
    }
}

impl Relation for AccountCommitmentCircuit {
    fn shape(&self) -> RelationShape {
        Self::shape_decl()
    }

    fn to_assignment(&self) -> Assignment {
        Assignment::from_columns(
            &Self::shape_decl(),
            vec![
                vec![self.balance],
                vec![self.blinding],
                vec![self.account_identity],
                vec![self.commitment],
            ],
        )
        .expect("columns match shape")
    }

    fn from_assignment(assignment: &Assignment) -> Result<Self, ZkError> {
        Ok(Self {
            balance: assignment.scalar("balance")?,
            blinding: assignment.scalar("blinding")?,
            account_identity: assignment.scalar("account_identity")?,
            commitment: assignment.scalar("commitment")?,
        })
    }

    fn check(&self) -> Result<(), ZkError> {
        let computed = commitment_for(self.balance, self.blinding, self.account_identity);
        if computed != self.commitment {
            return Err(ZkError::Unsatisfied {
                relation: RELATION,
                detail: "commitment does not open to the supplied secrets".to_string(),
            });
        }
        Ok(())
    }
}

impl ConstraintSynthesizer<Fr> for AccountCommitmentCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        // Public input first; the verifier presents [commitment].
        let commitment = FpVar::<Fr>::new_input(cs.clone(), || Ok(self.commitment))?;

        let balance = FpVar::<Fr>::new_witness(cs.clone(), || Ok(self.balance))?;
        let blinding = FpVar::<Fr>::new_witness(cs.clone(), || Ok(self.blinding))?;
        let account_identity = FpVar::<Fr>::new_witness(cs.clone(), || Ok(self.account_identity))?;

        let computed = &balance * &blinding + &account_identity;
        computed.enforce_equal(&commitment)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_opens_iff_equation_holds() {
        let circuit =
            AccountCommitmentCircuit::new(Fr::from(42u64), Fr::from(7u64), Fr::from(11u64));
        assert_eq!(circuit.commitment, Fr::from(42u64 * 7 + 11));
        circuit.check().unwrap();
    }

    #[test]
    fn tampering_any_secret_unsatisfies() {
        let base = AccountCommitmentCircuit::new(Fr::from(42u64), Fr::from(7u64), Fr::from(11u64));

        for tampered in [
            AccountCommitmentCircuit {
                balance: base.balance + Fr::from(1u64),
                ..base.clone()
            },
            AccountCommitmentCircuit {
                blinding: base.blinding + Fr::from(1u64),
                ..base.clone()
            },
            AccountCommitmentCircuit {
                account_identity: base.account_identity + Fr::from(1u64),
                ..base.clone()
            },
        ] {
            assert!(matches!(
                tampered.check(),
                Err(ZkError::Unsatisfied { .. })
            ));
        }
    }
}
