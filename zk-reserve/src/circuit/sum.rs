//! Flat balance summation relation.
//!
//! Proves that a public total equals the sum of secret per-account balances,
//! without the per-account commitment layer. The relation definition is one
//! allocation plus one addition per balance, so very large account counts
//! stay linear.

use crate::errors::ZkError;
use crate::witness::{Assignment, Relation, RelationShape, SlotDecl, Visibility};
use ark_bls12_381::Fr;
use ark_r1cs_std::alloc::AllocVar;
use ark_r1cs_std::eq::EqGadget;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

const RELATION: &str = "balance_sum";

#[derive(Clone, Debug)]
pub struct BalanceSumCircuit {
    /// Public aggregate the balances must sum to.
    pub total_sum: Fr,
    /// Secret per-account balances.
    pub balances: Vec<Fr>,
}

impl BalanceSumCircuit {
    /// Populate an instance whose total is the left-to-right sum.
    pub fn new(balances: Vec<Fr>) -> Self {
        let mut total_sum = Fr::from(0u64);
        for balance in &balances {
            total_sum += balance;
        }
        Self {
            total_sum,
            balances,
        }
    }

    /// All-zero instance for `accounts` balances, for compilation and setup.
    pub fn blank(accounts: usize) -> Self {
        Self {
            total_sum: Fr::from(0u64),
            balances: vec![Fr::from(0u64); accounts],
        }
    }

    pub fn shape_decl(accounts: usize) -> RelationShape {
        RelationShape {
            relation: RELATION,
            slots: vec![
                SlotDecl::scalar("total_sum", Visibility::Public),
                SlotDecl::vector("balances", Visibility::Secret, accounts),
            ],
        }
    }
}

impl Relation for BalanceSumCircuit {
    fn shape(&self) -> RelationShape {
        Self::shape_decl(self.balances.len())
    }

    fn to_assignment(&self) -> Assignment {
        Assignment::from_columns(
            &Self::shape_decl(self.balances.len()),
            vec![vec![self.total_sum], self.balances.clone()],
        )
        .expect("columns match shape")
    }

    fn from_assignment(assignment: &Assignment) -> Result<Self, ZkError> {
        Ok(Self {
            total_sum: assignment.scalar("total_sum")?,
            balances: assignment.column("balances")?.to_vec(),
        })
    }

    fn check(&self) -> Result<(), ZkError> {
        let mut acc = Fr::from(0u64);
        for balance in &self.balances {
            acc += balance;
        }
        if acc != self.total_sum {
            return Err(ZkError::Unsatisfied {
                relation: RELATION,
                detail: "balances do not sum to the declared total".to_string(),
            });
        }
        Ok(())
    }
}

impl ConstraintSynthesizer<Fr> for BalanceSumCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let total_sum = FpVar::<Fr>::new_input(cs.clone(), || Ok(self.total_sum))?;

        // Left-to-right accumulation from the additive identity.
        let mut acc = FpVar::<Fr>::constant(Fr::from(0u64));
        for balance in &self.balances {
            let balance = FpVar::<Fr>::new_witness(cs.clone(), || Ok(*balance))?;
            acc += balance;
        }

        acc.enforce_equal(&total_sum)?;
        Ok(())
    }
}
