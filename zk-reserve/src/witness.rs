//! Witness lifecycle: shapes, assignments, and the operations every relation
//! variant supports.
//!
//! A [`RelationShape`] is the immutable declaration of a relation's variables
//! (name, visibility, width). An [`Assignment`] binds that declaration to
//! concrete field values in declaration order. Witness vectors, serialization,
//! public projection, and positional fill are all pure functions of the two;
//! nothing here mutates an assignment after construction.
//!
//! Declaration order is load-bearing: it is the canonical flattened layout,
//! and the verifier consumes public values in exactly this order.

use crate::errors::ZkError;
use crate::types::{FrHex, Value};
use ark_bls12_381::Fr;
use serde::{Deserialize, Serialize};

/// Whether a slot belongs to the verifier-visible statement or to the
/// prover's secret input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Secret,
}

/// One declared variable slot.
///
/// `width` is the number of field elements the slot occupies in the flattened
/// vector: 1 for scalars, n for vector slots such as a balance list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotDecl {
    pub name: &'static str,
    pub visibility: Visibility,
    pub width: usize,
}

impl SlotDecl {
    pub fn scalar(name: &'static str, visibility: Visibility) -> Self {
        Self {
            name,
            visibility,
            width: 1,
        }
    }

    pub fn vector(name: &'static str, visibility: Visibility, width: usize) -> Self {
        Self {
            name,
            visibility,
            width,
        }
    }
}

/// Ordered slot declarations for one relation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationShape {
    pub relation: &'static str,
    pub slots: Vec<SlotDecl>,
}

impl RelationShape {
    /// Total flattened width of the public slots.
    pub fn public_len(&self) -> usize {
        self.visible_len(Visibility::Public)
    }

    /// Total flattened width of the secret slots.
    pub fn secret_len(&self) -> usize {
        self.visible_len(Visibility::Secret)
    }

    pub fn total_len(&self) -> usize {
        self.slots.iter().map(|s| s.width).sum()
    }

    fn visible_len(&self, visibility: Visibility) -> usize {
        self.slots
            .iter()
            .filter(|s| s.visibility == visibility)
            .map(|s| s.width)
            .sum()
    }

    /// The shape of this relation's public projection: public slots only,
    /// declaration order preserved.
    pub fn public_projection(&self) -> RelationShape {
        RelationShape {
            relation: self.relation,
            slots: self
                .slots
                .iter()
                .filter(|s| s.visibility == Visibility::Public)
                .cloned()
                .collect(),
        }
    }
}

/// One slot's concrete values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssignedSlot {
    pub name: &'static str,
    pub visibility: Visibility,
    pub values: Vec<Fr>,
}

/// Concrete values for every slot of a shape, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub relation: &'static str,
    slots: Vec<AssignedSlot>,
}

/// A flattened witness vector derived from one assignment.
///
/// `public_only` records which projection produced it: verifiers consume
/// public-only witnesses, provers full ones. Derived once, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witness {
    pub values: Vec<Fr>,
    pub public_only: bool,
}

impl Assignment {
    /// Pair a shape with per-slot value columns.
    ///
    /// Column count and widths must match the shape exactly.
    pub fn from_columns(shape: &RelationShape, columns: Vec<Vec<Fr>>) -> Result<Self, ZkError> {
        if columns.len() != shape.slots.len() {
            return Err(ZkError::ShapeMismatch {
                relation: shape.relation,
                detail: format!(
                    "expected {} slot columns, got {}",
                    shape.slots.len(),
                    columns.len()
                ),
            });
        }

        let mut slots = Vec::with_capacity(columns.len());
        for (decl, values) in shape.slots.iter().zip(columns) {
            if values.len() != decl.width {
                return Err(ZkError::ShapeMismatch {
                    relation: shape.relation,
                    detail: format!(
                        "slot {} expects {} values, got {}",
                        decl.name,
                        decl.width,
                        values.len()
                    ),
                });
            }
            slots.push(AssignedSlot {
                name: decl.name,
                visibility: decl.visibility,
                values,
            });
        }

        Ok(Self {
            relation: shape.relation,
            slots,
        })
    }

    pub fn slots(&self) -> &[AssignedSlot] {
        &self.slots
    }

    /// Single value of a scalar slot.
    pub fn scalar(&self, name: &str) -> Result<Fr, ZkError> {
        let slot = self.slot(name)?;
        match slot.values[..] {
            [value] => Ok(value),
            _ => Err(ZkError::ShapeMismatch {
                relation: self.relation,
                detail: format!("slot {name} is not scalar"),
            }),
        }
    }

    /// All values of a (possibly vector) slot.
    pub fn column(&self, name: &str) -> Result<&[Fr], ZkError> {
        Ok(&self.slot(name)?.values)
    }

    fn slot(&self, name: &str) -> Result<&AssignedSlot, ZkError> {
        self.slots
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ZkError::ShapeMismatch {
                relation: self.relation,
                detail: format!("no slot named {name}"),
            })
    }

    /// The ordered field-element vector in declaration order.
    pub fn flatten(&self) -> Vec<Fr> {
        self.slots.iter().flat_map(|s| s.values.clone()).collect()
    }

    /// A new assignment holding only the public slots, values copied.
    ///
    /// The result never references secret values, so it can be handed to a
    /// verifier-side component wholesale.
    pub fn public_projection(&self) -> Assignment {
        Assignment {
            relation: self.relation,
            slots: self
                .slots
                .iter()
                .filter(|s| s.visibility == Visibility::Public)
                .cloned()
                .collect(),
        }
    }

    /// Full witness: every slot's values, declaration order.
    pub fn full_witness(&self) -> Witness {
        Witness {
            values: self.flatten(),
            public_only: false,
        }
    }

    /// Public witness: the tag-filtered projection of the full witness.
    pub fn public_witness(&self) -> Witness {
        Witness {
            values: self.public_projection().flatten(),
            public_only: true,
        }
    }

    /// Self-describing key-value encoding of every slot.
    pub fn serialize(&self) -> Result<Vec<u8>, ZkError> {
        let encoded = EncodedWitness {
            relation: self.relation.to_string(),
            slots: self
                .slots
                .iter()
                .map(|s| EncodedSlot {
                    name: s.name.to_string(),
                    visibility: s.visibility,
                    values: s.values.iter().map(|v| FrHex::from_fr(v).hex).collect(),
                })
                .collect(),
        };
        serde_json::to_vec(&encoded).map_err(|e| ZkError::Serialization(e.to_string()))
    }

    /// Exact inverse of [`Assignment::serialize`], validated against `shape`.
    pub fn deserialize(shape: &RelationShape, bytes: &[u8]) -> Result<Assignment, ZkError> {
        let encoded: EncodedWitness =
            serde_json::from_slice(bytes).map_err(|e| ZkError::Serialization(e.to_string()))?;

        if encoded.relation != shape.relation {
            return Err(ZkError::ShapeMismatch {
                relation: shape.relation,
                detail: format!("encoded witness is for relation {}", encoded.relation),
            });
        }
        if encoded.slots.len() != shape.slots.len() {
            return Err(ZkError::ShapeMismatch {
                relation: shape.relation,
                detail: format!(
                    "expected {} slots, got {}",
                    shape.slots.len(),
                    encoded.slots.len()
                ),
            });
        }

        let mut columns = Vec::with_capacity(encoded.slots.len());
        for (decl, slot) in shape.slots.iter().zip(&encoded.slots) {
            if slot.name != decl.name || slot.visibility != decl.visibility {
                return Err(ZkError::ShapeMismatch {
                    relation: shape.relation,
                    detail: format!("slot {} does not match declaration {}", slot.name, decl.name),
                });
            }
            let mut values = Vec::with_capacity(slot.values.len());
            for hex in &slot.values {
                values.push(FrHex { hex: hex.clone() }.to_fr()?);
            }
            columns.push(values);
        }

        Assignment::from_columns(shape, columns)
    }

    /// Consume `values` positionally, slot by slot in declaration order.
    ///
    /// The declared public/secret counts are checked against the shape's true
    /// arities before any value is consumed. Running out of values reports
    /// the slot name and the index within that slot that could not be filled.
    pub fn fill_from_sequence(
        shape: &RelationShape,
        declared_public: usize,
        declared_secret: usize,
        values: &[Value],
    ) -> Result<Assignment, ZkError> {
        let actual_public = shape.public_len();
        let actual_secret = shape.secret_len();
        if declared_public != actual_public || declared_secret != actual_secret {
            return Err(ZkError::ArityMismatch {
                relation: shape.relation,
                declared_public,
                declared_secret,
                actual_public,
                actual_secret,
            });
        }

        let mut cursor = 0usize;
        let mut columns = Vec::with_capacity(shape.slots.len());
        for decl in &shape.slots {
            let mut column = Vec::with_capacity(decl.width);
            for index in 0..decl.width {
                let value = values.get(cursor).ok_or(ZkError::SequenceExhausted {
                    slot: decl.name,
                    index,
                })?;
                column.push(value.to_field()?);
                cursor += 1;
            }
            columns.push(column);
        }

        Assignment::from_columns(shape, columns)
    }
}

/// Conversions between a populated relation instance and its shape/assignment
/// pair, plus the backend-independent validation predicate.
pub trait Relation: Sized {
    /// Slot declarations in canonical vector order.
    fn shape(&self) -> RelationShape;

    /// Values of every declared slot, in declaration order.
    fn to_assignment(&self) -> Assignment;

    /// Rebuild the instance from an assignment of the matching shape.
    fn from_assignment(assignment: &Assignment) -> Result<Self, ZkError>;

    /// Evaluate the relation's equation directly against the assigned values.
    ///
    /// Cheap local sanity check before paying for proving; an `Unsatisfied`
    /// result is a legitimate negative outcome, not a fault.
    fn check(&self) -> Result<(), ZkError>;
}

#[derive(Serialize, Deserialize)]
struct EncodedWitness {
    relation: String,
    slots: Vec<EncodedSlot>,
}

#[derive(Serialize, Deserialize)]
struct EncodedSlot {
    name: String,
    visibility: Visibility,
    values: Vec<String>,
}
