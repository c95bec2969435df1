//! The externally visible puzzle artifact.

use serde::{Deserialize, Serialize};

use crate::synth::builder::Dimension;

/// One generation attempt's result, successful or not. This is the schema
/// consumed by rendering, export, and benchmarking collaborators; field
/// names are part of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub puzzle_id: u64,
    pub num_persons: usize,
    /// Dimension names; index 0 is the Name dimension.
    pub dimensions: Vec<String>,
    /// Per-dimension candidate labels, parallel to `dimensions`.
    pub entities: Vec<Vec<String>>,
    pub num_clues: usize,
    /// Rendered clue texts in acceptance order.
    pub clues: Vec<String>,
    /// Per-dimension labels indexed by person position.
    pub solution: Vec<Vec<String>>,
    pub generation_success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reason: Option<String>,
}

impl PuzzleRecord {
    pub fn success(
        puzzle_id: u64,
        dims: &[Dimension],
        clues: Vec<String>,
        solution: Vec<Vec<String>>,
    ) -> Self {
        Self {
            puzzle_id,
            num_persons: dims[0].labels.len(),
            dimensions: dims.iter().map(|d| d.name.clone()).collect(),
            entities: dims.iter().map(|d| d.labels.clone()).collect(),
            num_clues: clues.len(),
            clues,
            solution,
            generation_success: true,
            reason: None,
        }
    }

    pub fn failure(puzzle_id: u64, dims: &[Dimension], reason: String) -> Self {
        Self {
            puzzle_id,
            num_persons: dims[0].labels.len(),
            dimensions: dims.iter().map(|d| d.name.clone()).collect(),
            entities: dims.iter().map(|d| d.labels.clone()).collect(),
            num_clues: 0,
            clues: Vec::new(),
            solution: Vec::new(),
            generation_success: false,
            reason: Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn dims() -> Vec<Dimension> {
        vec![
            Dimension::categorical("Name", ["Ada", "Bo"]),
            Dimension::ordinal("Position", vec![1, 2]),
        ]
    }

    #[test]
    fn serialized_records_use_the_contract_field_names() {
        let record = PuzzleRecord::success(
            7,
            &dims(),
            vec!["A clue.".to_string()],
            vec![
                vec!["Ada".to_string(), "Bo".to_string()],
                vec!["1".to_string(), "2".to_string()],
            ],
        );
        let json = serde_json::to_value(&record).unwrap();
        for field in [
            "puzzle_id",
            "num_persons",
            "dimensions",
            "entities",
            "num_clues",
            "clues",
            "solution",
            "generation_success",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
        // Successful records carry no reason at all.
        assert!(json.get("reason").is_none());
        assert_eq!(json["num_clues"], 1);

        let back: PuzzleRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn failures_keep_the_drawn_shape_and_a_reason() {
        let record = PuzzleRecord::failure(9, &dims(), "no unique solution found".to_string());
        assert!(!record.generation_success);
        assert_eq!(record.num_persons, 2);
        assert!(record.clues.is_empty());
        assert!(record.solution.is_empty());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["reason"], "no unique solution found");
    }
}
