//! The incremental constraint-synthesis core.
//!
//! One generation attempt plants a hidden solution, then feeds sampled
//! clue constraints through the encoder into the model one at a time,
//! asking the oracle after each addition whether the puzzle is infeasible
//! (roll the clue back), still ambiguous (keep it and continue), or pinned
//! to a single solution (done). See [`controller`] for the state machine.

pub mod builder;
pub mod clue;
pub mod controller;
pub mod encoder;
pub mod extractor;
pub mod sampler;

use crate::error::{GenerateError, Result};

/// Tunables for one generation attempt. Defaults: 3 or 4 persons, 2 to 4
/// attribute dimensions on top of Name and the ordinal dimension, a
/// candidate budget of N³, and a 95/5 pair/order split with one pair clue
/// in five negative.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub min_persons: usize,
    pub max_persons: usize,
    pub min_extra_dimensions: usize,
    pub max_extra_dimensions: usize,
    /// Candidates tried per attempt; `None` means `num_persons³`.
    pub candidate_budget: Option<usize>,
    /// Abort the attempt once this many candidates in a row are rejected
    /// as infeasible. Sampled clues are true of the planted solution by
    /// construction, so a streak this long means the encoder is suspect.
    pub max_consecutive_rejections: usize,
    pub order_clue_weight: f64,
    pub negative_clue_weight: f64,
    pub oracle_node_limit: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_persons: 3,
            max_persons: 4,
            min_extra_dimensions: 2,
            max_extra_dimensions: 4,
            candidate_budget: None,
            max_consecutive_rejections: 16,
            order_clue_weight: 0.05,
            negative_clue_weight: 0.2,
            oracle_node_limit: crate::oracle::counting::DEFAULT_NODE_LIMIT,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_persons < 2 {
            return Err(GenerateError::InvalidConfig(format!(
                "need at least 2 persons, got {}",
                self.min_persons
            ))
            .into());
        }
        if self.min_persons > self.max_persons {
            return Err(GenerateError::InvalidConfig(format!(
                "person range {}..={} is empty",
                self.min_persons, self.max_persons
            ))
            .into());
        }
        if self.min_extra_dimensions > self.max_extra_dimensions {
            return Err(GenerateError::InvalidConfig(format!(
                "extra-dimension range {}..={} is empty",
                self.min_extra_dimensions, self.max_extra_dimensions
            ))
            .into());
        }
        if self.max_consecutive_rejections == 0 {
            return Err(GenerateError::InvalidConfig(
                "max_consecutive_rejections must be positive".to_string(),
            )
            .into());
        }
        for (name, weight) in [
            ("order_clue_weight", self.order_clue_weight),
            ("negative_clue_weight", self.negative_clue_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(GenerateError::InvalidConfig(format!(
                    "{name} {weight} is not a probability"
                ))
                .into());
            }
        }
        Ok(())
    }
}
