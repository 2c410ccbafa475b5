//! Witness lifecycle behavior shared by all three relations: round-trip
//! serialization, public projection, flattening order, and positional fill.

use ark_bls12_381::Fr;
use zk_reserve::circuit::{AccountCommitmentCircuit, BalanceSumCircuit, CommitmentRollupCircuit};
use zk_reserve::errors::ZkError;
use zk_reserve::types::Value;
use zk_reserve::witness::{Assignment, Relation};

fn sample_account() -> AccountCommitmentCircuit {
    AccountCommitmentCircuit::new(Fr::from(42u64), Fr::from(7u64), Fr::from(11u64))
}

#[test]
fn serialize_round_trips_exactly() {
    let account = sample_account();
    let sum = BalanceSumCircuit::new(vec![Fr::from(100u64), Fr::from(200u64), Fr::from(300u64)]);
    let rollup = CommitmentRollupCircuit::new(vec![Fr::from(9u64), Fr::from(10u64)]);

    let cases: Vec<(Assignment, _)> = vec![
        (account.to_assignment(), AccountCommitmentCircuit::shape_decl()),
        (sum.to_assignment(), BalanceSumCircuit::shape_decl(3)),
        (rollup.to_assignment(), CommitmentRollupCircuit::shape_decl(2)),
    ];

    for (assignment, shape) in cases {
        let bytes = assignment.serialize().unwrap();
        let back = Assignment::deserialize(&shape, &bytes).unwrap();
        assert_eq!(back.flatten(), assignment.flatten());
        assert_eq!(back, assignment);
    }
}

#[test]
fn deserialize_rejects_foreign_relation() {
    let bytes = sample_account().to_assignment().serialize().unwrap();
    let err = Assignment::deserialize(&BalanceSumCircuit::shape_decl(3), &bytes).unwrap_err();
    assert!(matches!(err, ZkError::ShapeMismatch { .. }));
}

#[test]
fn public_projection_contains_only_public_slots() {
    let account = sample_account();
    let projection = account.to_assignment().public_projection();

    let names: Vec<&str> = projection.slots().iter().map(|s| s.name).collect();
    assert_eq!(names, ["commitment"]);
    assert_eq!(projection.flatten(), vec![account.commitment]);
}

#[test]
fn public_projection_ignores_secret_changes() {
    let base = sample_account();
    // Different secrets, same public commitment slot.
    let altered = AccountCommitmentCircuit {
        balance: base.balance + Fr::from(1u64),
        blinding: base.blinding + Fr::from(2u64),
        account_identity: base.account_identity + Fr::from(3u64),
        commitment: base.commitment,
    };

    assert_eq!(
        base.to_assignment().public_projection(),
        altered.to_assignment().public_projection()
    );
}

#[test]
fn public_witness_is_projection_of_full_witness() {
    let sum = BalanceSumCircuit::new(vec![Fr::from(1u64), Fr::from(2u64)]);
    let assignment = sum.to_assignment();

    let full = assignment.full_witness();
    let public = assignment.public_witness();

    assert!(!full.public_only);
    assert!(public.public_only);
    // Declaration order puts total_sum first in both vectors.
    assert_eq!(full.values.len(), 3);
    assert_eq!(public.values, vec![full.values[0]]);
}

#[test]
fn flattening_follows_declaration_order() {
    let rollup = CommitmentRollupCircuit::new(vec![Fr::from(5u64), Fr::from(6u64)]);
    assert_eq!(
        rollup.to_assignment().flatten(),
        vec![Fr::from(5u64), Fr::from(6u64), Fr::from(11u64)]
    );

    let account = sample_account();
    assert_eq!(
        account.to_assignment().flatten(),
        vec![
            account.balance,
            account.blinding,
            account.account_identity,
            account.commitment
        ]
    );
}

#[test]
fn fill_consumes_values_positionally() {
    let shape = AccountCommitmentCircuit::shape_decl();
    let values = [
        Value::Int(42),
        Value::Int(7),
        Value::Int(11),
        Value::Decimal("305".into()),
    ];

    let assignment = Assignment::fill_from_sequence(&shape, 1, 3, &values).unwrap();
    let circuit = AccountCommitmentCircuit::from_assignment(&assignment).unwrap();
    circuit.check().unwrap();
}

#[test]
fn fill_checks_arity_before_consuming() {
    // True shape of a two-account summation: 1 public, 2 secret.
    let shape = BalanceSumCircuit::shape_decl(2);
    let err = Assignment::fill_from_sequence(&shape, 1, 3, &[]).unwrap_err();

    match err {
        ZkError::ArityMismatch {
            declared_public,
            declared_secret,
            actual_public,
            actual_secret,
            ..
        } => {
            assert_eq!((declared_public, declared_secret), (1, 3));
            assert_eq!((actual_public, actual_secret), (1, 2));
        }
        other => panic!("expected arity mismatch, got {other:?}"),
    }
}

#[test]
fn fill_reports_exhausted_slot_and_index() {
    let shape = BalanceSumCircuit::shape_decl(3);
    // total_sum plus only one of three balances.
    let values = [Value::Int(600), Value::Int(100)];

    let err = Assignment::fill_from_sequence(&shape, 1, 3, &values).unwrap_err();
    match err {
        ZkError::SequenceExhausted { slot, index } => {
            assert_eq!(slot, "balances");
            assert_eq!(index, 1);
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
}

#[test]
fn fill_surfaces_conversion_errors() {
    let shape = BalanceSumCircuit::shape_decl(1);
    let values = [Value::Int(600), Value::Decimal("12x3".into())];

    let err = Assignment::fill_from_sequence(&shape, 1, 1, &values).unwrap_err();
    assert!(matches!(err, ZkError::Conversion { .. }));
}

#[test]
fn fill_round_trips_through_relation() {
    let shape = CommitmentRollupCircuit::shape_decl(2);
    let values = [Value::Int(5), Value::Int(6), Value::Int(11)];

    let assignment = Assignment::fill_from_sequence(&shape, 3, 0, &values).unwrap();
    let rollup = CommitmentRollupCircuit::from_assignment(&assignment).unwrap();
    rollup.check().unwrap();
    assert_eq!(rollup.to_assignment(), assignment);
}
