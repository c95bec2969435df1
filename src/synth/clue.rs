//! The clue constraint vocabulary.
//!
//! `Clue` is a closed sum type: the encoder dispatches exhaustively over
//! it, so adding a clue shape without teaching the encoder about it is a
//! compile error.

use crate::{oracle::Assignment, synth::builder::Planted};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

/// One candidate clue, in terms of value indices.
///
/// `Pair` ties two values to one person (positive) or keeps them apart
/// (negative). `Order` relates the ordinal positions of the holders of two
/// values; the realized offset (immediately adjacent, or merely somewhere
/// left/right) is derived from the planted solution when the clue is
/// encoded, and the same derivation is used when re-checking truth here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clue {
    Pair {
        dim_a: usize,
        value_a: usize,
        dim_b: usize,
        value_b: usize,
        sign: Sign,
    },
    Order {
        dim_a: usize,
        value_a: usize,
        dim_b: usize,
        value_b: usize,
        ordinal_dim: usize,
    },
}

impl Clue {
    /// Whether the clue is true of `assignment`. `planted` and `weights`
    /// fix the meaning of an `Order` clue the same way the encoder does.
    pub fn holds_in(&self, assignment: &Assignment, planted: &Planted, weights: &[i64]) -> bool {
        match *self {
            Clue::Pair {
                dim_a,
                value_a,
                dim_b,
                value_b,
                sign,
            } => {
                let same = assignment.holder(dim_a, value_a) == assignment.holder(dim_b, value_b);
                match sign {
                    Sign::Positive => same,
                    Sign::Negative => !same,
                }
            }
            Clue::Order {
                dim_a,
                value_a,
                dim_b,
                value_b,
                ..
            } => {
                let delta = weights[planted.holder_of(dim_a, value_a)]
                    - weights[planted.holder_of(dim_b, value_b)];
                let pos_a = weights[assignment.holder(dim_a, value_a)];
                let pos_b = weights[assignment.holder(dim_b, value_b)];
                match delta {
                    -1 => pos_b - pos_a == 1,
                    1 => pos_a - pos_b == 1,
                    d if d < -1 => pos_a < pos_b,
                    d if d > 1 => pos_a > pos_b,
                    _ => false,
                }
            }
        }
    }
}
