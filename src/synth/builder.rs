//! Puzzle shape and planted solution.
//!
//! A puzzle is described by its dimensions; dimension 0 is always "Name"
//! and dimension 1 carries the ordinal values used by positional clues.
//! Both are pinned to the identity, so the planted solution only shuffles
//! the remaining dimensions.

use rand::{seq::SliceRandom, Rng};

use crate::{
    error::{GenerateError, Result},
    oracle::{Assignment, PuzzleModel},
};

pub const NAME_DIM: usize = 0;
pub const ORDINAL_DIM: usize = 1;

/// One categorical attribute: a name and one label per person. The ordinal
/// dimension additionally carries the numeric values behind its labels,
/// sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub labels: Vec<String>,
    pub ordinal: Option<Vec<i64>>,
}

impl Dimension {
    pub fn categorical(
        name: impl Into<String>,
        labels: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            labels: labels.into_iter().map(Into::into).collect(),
            ordinal: None,
        }
    }

    pub fn ordinal(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            labels: values.iter().map(i64::to_string).collect(),
            ordinal: Some(values),
        }
    }
}

/// The hidden assignment every clue is read off: one permutation per
/// dimension, `perms[d][p]` being the value index person `p` holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planted {
    perms: Vec<Vec<usize>>,
}

impl Planted {
    /// Plants a solution: identity for the Name and ordinal dimensions,
    /// uniform shuffles for the rest.
    pub fn plant<R: Rng>(rng: &mut R, num_dimensions: usize, num_persons: usize) -> Self {
        let mut perms = Vec::with_capacity(num_dimensions);
        for dim in 0..num_dimensions {
            let mut perm: Vec<usize> = (0..num_persons).collect();
            if dim != NAME_DIM && dim != ORDINAL_DIM {
                perm.shuffle(rng);
            }
            perms.push(perm);
        }
        Self { perms }
    }

    /// The all-identity assignment; handy for hand-built scenarios.
    pub fn identity(num_dimensions: usize, num_persons: usize) -> Self {
        Self {
            perms: vec![(0..num_persons).collect(); num_dimensions],
        }
    }

    pub fn num_dimensions(&self) -> usize {
        self.perms.len()
    }

    pub fn num_persons(&self) -> usize {
        self.perms[0].len()
    }

    /// Value index held by `person` in `dim`.
    pub fn value_of(&self, dim: usize, person: usize) -> usize {
        self.perms[dim][person]
    }

    /// The person holding `value` in `dim`.
    pub fn holder_of(&self, dim: usize, value: usize) -> usize {
        self.perms[dim].iter().position(|&v| v == value).unwrap()
    }

    pub fn as_assignment(&self) -> Assignment {
        Assignment {
            values: self.perms.clone(),
        }
    }
}

/// Builds the baseline model for a dimension list: validates the shape and
/// derives the ordinal weights from dimension 1.
pub fn build_model(dims: &[Dimension]) -> Result<PuzzleModel> {
    if dims.len() < 2 {
        return Err(GenerateError::InvalidConfig(format!(
            "need at least 2 dimensions, got {}",
            dims.len()
        ))
        .into());
    }
    let num_persons = dims[NAME_DIM].labels.len();
    for dim in dims {
        if dim.labels.len() != num_persons {
            return Err(GenerateError::InvalidConfig(format!(
                "dimension {:?} has {} labels, expected {}",
                dim.name,
                dim.labels.len(),
                num_persons
            ))
            .into());
        }
    }
    for (i, dim) in dims.iter().enumerate() {
        let expect_ordinal = i == ORDINAL_DIM;
        if dim.ordinal.is_some() != expect_ordinal {
            return Err(GenerateError::InvalidConfig(format!(
                "dimension {:?} at index {i}: ordinal values belong to dimension {ORDINAL_DIM} only",
                dim.name
            ))
            .into());
        }
    }
    let weights = dims[ORDINAL_DIM].ordinal.clone().unwrap();
    PuzzleModel::new(num_persons, dims.len(), ORDINAL_DIM, weights)
}
