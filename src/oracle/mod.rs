//! The satisfiability oracle and the model it checks.
//!
//! The synthesis core talks to a solving backend only through the
//! [`Oracle`] trait: hand it a [`PuzzleModel`] and get back whether the
//! accumulated constraint set is infeasible, uniquely solvable, or still
//! admits several assignments. Any backend honouring that contract can be
//! substituted; the crate ships [`counting::CountingOracle`], a
//! deterministic backtracking solution counter.
//!
//! A [`PuzzleModel`] is an immutable baseline (the bijection structure of
//! the puzzle plus the pinned Name and ordinal dimensions) and a
//! persistent log of accepted clause groups. Tentatively adding a clue is
//! [`PuzzleModel::add`]; rolling it back is [`PuzzleModel::retract`] of the
//! newest handle. There is no hidden solver-side state to revert.

pub mod counting;
pub mod linear;

use im::Vector;

use crate::{
    error::{GenerateError, Result},
    oracle::linear::{LinearConstraint, VarId},
};

/// What a satisfiability check reports. Backends count solutions only far
/// enough to distinguish "none", "exactly one", and "more than one", and
/// must be deterministic for identical constraint sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Infeasible,
    Unique(Assignment),
    Multiple,
}

/// A complete assignment: `values[d][p]` is the value index held by person
/// `p` in dimension `d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub values: Vec<Vec<usize>>,
}

impl Assignment {
    /// Whether the assignment sets the decision variable "person `p` holds
    /// value `v` in dimension `d`".
    pub fn sets(&self, person: usize, dim: usize, value: usize) -> bool {
        self.values[dim][person] == value
    }

    /// The person holding `value` in `dim`. Dimensions are bijections, so
    /// exactly one person qualifies.
    pub fn holder(&self, dim: usize, value: usize) -> usize {
        self.values[dim]
            .iter()
            .position(|&v| v == value)
            .unwrap()
    }
}

/// Opaque handle to one accepted clause group, in acceptance order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintHandle(usize);

/// Decision-variable space and baseline constraints for one puzzle, plus
/// the log of accepted clause groups.
///
/// The baseline is structural rather than materialized as rows: each
/// dimension is a person↔value bijection, dimension 0 (Name) and the
/// ordinal dimension are pinned to the identity. Backends enforce it by
/// construction, which keeps the searched space at (N!)^(M-2).
#[derive(Debug, Clone)]
pub struct PuzzleModel {
    num_persons: usize,
    num_dimensions: usize,
    ordinal_dim: usize,
    ordinal_weights: Vec<i64>,
    clauses: Vector<Vec<LinearConstraint>>,
}

impl PuzzleModel {
    /// Builds the baseline model. `ordinal_weights[p]` is the ordinal value
    /// sitting at position `p`; the list must be strictly increasing.
    pub fn new(
        num_persons: usize,
        num_dimensions: usize,
        ordinal_dim: usize,
        ordinal_weights: Vec<i64>,
    ) -> Result<Self> {
        if num_persons < 2 {
            return Err(GenerateError::InvalidConfig(format!(
                "need at least 2 persons, got {num_persons}"
            ))
            .into());
        }
        if num_dimensions < 2 {
            return Err(GenerateError::InvalidConfig(format!(
                "need at least 2 dimensions, got {num_dimensions}"
            ))
            .into());
        }
        if ordinal_dim == 0 || ordinal_dim >= num_dimensions {
            return Err(GenerateError::InvalidConfig(format!(
                "ordinal dimension {ordinal_dim} out of range for {num_dimensions} dimensions"
            ))
            .into());
        }
        if ordinal_weights.len() != num_persons {
            return Err(GenerateError::InvalidConfig(format!(
                "{} ordinal values for {} persons",
                ordinal_weights.len(),
                num_persons
            ))
            .into());
        }
        if ordinal_weights.windows(2).any(|w| w[0] >= w[1]) {
            return Err(GenerateError::InvalidConfig(
                "ordinal values must be strictly increasing".to_string(),
            )
            .into());
        }
        Ok(Self {
            num_persons,
            num_dimensions,
            ordinal_dim,
            ordinal_weights,
            clauses: Vector::new(),
        })
    }

    pub fn num_persons(&self) -> usize {
        self.num_persons
    }

    pub fn num_dimensions(&self) -> usize {
        self.num_dimensions
    }

    pub fn ordinal_dim(&self) -> usize {
        self.ordinal_dim
    }

    pub fn ordinal_weights(&self) -> &[i64] {
        &self.ordinal_weights
    }

    /// Dimensions pinned to the identity by the baseline.
    pub fn is_pinned(&self, dim: usize) -> bool {
        dim == 0 || dim == self.ordinal_dim
    }

    /// Total count of decision variables.
    pub fn num_vars(&self) -> usize {
        self.num_dimensions * self.num_persons * self.num_persons
    }

    /// The decision variable for "person `p` holds value `v` in dimension
    /// `d`".
    pub fn var(&self, person: usize, dim: usize, value: usize) -> VarId {
        debug_assert!(person < self.num_persons);
        debug_assert!(dim < self.num_dimensions);
        debug_assert!(value < self.num_persons);
        ((dim * self.num_persons + person) * self.num_persons + value) as VarId
    }

    /// Inverse of [`PuzzleModel::var`]: `(person, dim, value)`.
    pub fn decode(&self, var: VarId) -> (usize, usize, usize) {
        let var = var as usize;
        let value = var % self.num_persons;
        let rest = var / self.num_persons;
        (rest % self.num_persons, rest / self.num_persons, value)
    }

    /// Appends one clause group (the rows of a single encoded clue) to the
    /// log and returns its handle.
    pub fn add(&mut self, rows: Vec<LinearConstraint>) -> ConstraintHandle {
        self.clauses.push_back(rows);
        ConstraintHandle(self.clauses.len() - 1)
    }

    /// Removes a clause group. Only the most recently added handle can be
    /// retracted; the log otherwise only grows.
    pub fn retract(&mut self, handle: ConstraintHandle) -> Result<()> {
        if handle.0 + 1 != self.clauses.len() {
            return Err(GenerateError::ModelEdit(format!(
                "cannot retract handle {} with {} clause groups in the log",
                handle.0,
                self.clauses.len()
            ))
            .into());
        }
        self.clauses.pop_back();
        Ok(())
    }

    /// Count of accepted clause groups.
    pub fn accepted(&self) -> usize {
        self.clauses.len()
    }

    /// All rows currently in force, in acceptance order.
    pub fn rows(&self) -> impl Iterator<Item = &LinearConstraint> {
        self.clauses.iter().flatten()
    }
}

/// The external solving contract. Implementations must be deterministic:
/// checking the same constraint set twice must report the same outcome.
pub trait Oracle {
    fn check(&self, model: &PuzzleModel) -> Result<SolveOutcome>;
}
