//! Hierarchical commitment rollup relation.
//!
//! Proves that a public aggregate commitment equals the sum of already
//! published per-account commitments. There are no secret inputs: this is
//! the composition layer over many per-account proofs, not a proof of
//! balance knowledge.

use crate::errors::ZkError;
use crate::witness::{Assignment, Relation, RelationShape, SlotDecl, Visibility};
use ark_bls12_381::Fr;
use ark_r1cs_std::alloc::AllocVar;
use ark_r1cs_std::eq::EqGadget;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

const RELATION: &str = "commitment_rollup";

#[derive(Clone, Debug)]
pub struct CommitmentRollupCircuit {
    /// Public per-account commitments.
    pub commitments: Vec<Fr>,
    /// Public aggregate commitment.
    pub total_commitment: Fr,
}

impl CommitmentRollupCircuit {
    /// Populate an instance whose total is the left-to-right sum.
    pub fn new(commitments: Vec<Fr>) -> Self {
        let mut total_commitment = Fr::from(0u64);
        for commitment in &commitments {
            total_commitment += commitment;
        }
        Self {
            commitments,
            total_commitment,
        }
    }

    /// All-zero instance for `accounts` commitments, for compilation and
    /// setup. With zero accounts the relation degenerates to `total == 0`.
    pub fn blank(accounts: usize) -> Self {
        Self {
            commitments: vec![Fr::from(0u64); accounts],
            total_commitment: Fr::from(0u64),
        }
    }

    pub fn shape_decl(accounts: usize) -> RelationShape {
        RelationShape {
            relation: RELATION,
            slots: vec![
                SlotDecl::vector("commitments", Visibility::Public, accounts),
                SlotDecl::scalar("total_commitment", Visibility::Public),
            ],
        }
    }
}

impl Relation for CommitmentRollupCircuit {
    fn shape(&self) -> RelationShape {
        Self::shape_decl(self.commitments.len())
    }

    fn to_assignment(&self) -> Assignment {
        Assignment::from_columns(
            &Self::shape_decl(self.commitments.len()),
            vec![self.commitments.clone(), vec![self.total_commitment]],
        )
        .expect("columns match shape")
    }

    fn from_assignment(assignment: &Assignment) -> Result<Self, ZkError> {
        Ok(Self {
            commitments: assignment.column("commitments")?.to_vec(),
            total_commitment: assignment.scalar("total_commitment")?,
        })
    }

    fn check(&self) -> Result<(), ZkError> {
        let mut acc = Fr::from(0u64);
        for commitment in &self.commitments {
            acc += commitment;
        }
        if acc != self.total_commitment {
            return Err(ZkError::Unsatisfied {
                relation: RELATION,
                detail: "commitments do not sum to the declared total".to_string(),
            });
        }
        Ok(())
    }
}

impl ConstraintSynthesizer<Fr> for CommitmentRollupCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        // All inputs are public; allocation order matches declaration order,
        // so the verifier presents [commitments[0..k), total_commitment].
        let mut acc = FpVar::<Fr>::constant(Fr::from(0u64));
        for commitment in &self.commitments {
            let commitment = FpVar::<Fr>::new_input(cs.clone(), || Ok(*commitment))?;
            acc += commitment;
        }
        let total_commitment = FpVar::<Fr>::new_input(cs.clone(), || Ok(self.total_commitment))?;

        acc.enforce_equal(&total_commitment)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satisfiable_iff_total_matches() {
        let commitments = vec![Fr::from(5u64), Fr::from(6u64), Fr::from(7u64)];

        let good = CommitmentRollupCircuit::new(commitments.clone());
        assert_eq!(good.total_commitment, Fr::from(18u64));
        good.check().unwrap();

        let bad = CommitmentRollupCircuit {
            commitments,
            total_commitment: Fr::from(19u64),
        };
        assert!(matches!(bad.check(), Err(ZkError::Unsatisfied { .. })));
    }

    #[test]
    fn empty_rollup_requires_zero_total() {
        CommitmentRollupCircuit::new(Vec::new()).check().unwrap();

        let bad = CommitmentRollupCircuit {
            commitments: Vec::new(),
            total_commitment: Fr::from(1u64),
        };
        assert!(matches!(bad.check(), Err(ZkError::Unsatisfied { .. })));
    }
}
