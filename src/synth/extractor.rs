//! Reads the unique assignment back out as label rows.

use crate::{oracle::Assignment, synth::builder::Dimension};

/// For each dimension, the label sequence indexed by person. Dimension 0
/// resolves to the human-readable names.
pub fn extract_solution(dims: &[Dimension], assignment: &Assignment) -> Vec<Vec<String>> {
    dims.iter()
        .enumerate()
        .map(|(d, dim)| {
            assignment.values[d]
                .iter()
                .map(|&value| dim.labels[value].clone())
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::synth::builder::Dimension;

    #[test]
    fn labels_follow_the_assignment() {
        let dims = vec![
            Dimension::categorical("Name", ["Ada", "Bo", "Cy"]),
            Dimension::ordinal("Position", vec![1, 2, 3]),
            Dimension::categorical("Color", ["Blue", "Red", "Green"]),
        ];
        let assignment = Assignment {
            values: vec![vec![0, 1, 2], vec![0, 1, 2], vec![2, 0, 1]],
        };
        assert_eq!(
            extract_solution(&dims, &assignment),
            vec![
                vec!["Ada", "Bo", "Cy"],
                vec!["1", "2", "3"],
                vec!["Green", "Blue", "Red"],
            ]
        );
    }
}
