//! Clueforge generates "zebra" logic puzzles: N persons described by M
//! categorical dimensions, where every dimension is a person↔value
//! bijection, together with a clue set that admits exactly one solution.
//!
//! The heart of the crate is an incremental constraint-synthesis loop. A
//! hidden solution is planted first; candidate clues are then read off it
//! (so each is true by construction), encoded to linear rows over 0/1
//! decision variables, and pushed into the model one at a time. After
//! every addition a satisfiability oracle reports whether the model is
//! infeasible (the clue is rolled back), still ambiguous (the clue is
//! kept), or uniquely solvable (generation succeeded).
//!
//! # Core Concepts
//!
//! - **[`synth::builder`]**: the puzzle shape (dimensions, planted
//!   solution) and the baseline assignment model.
//! - **[`synth::clue::Clue`]**: the closed vocabulary of clue constraints.
//! - **[`oracle::Oracle`]**: the behavioral contract of the solving
//!   backend, fulfilled by [`oracle::counting::CountingOracle`].
//! - **[`synth::controller`]**: the add/check/accept-or-reject state
//!   machine and the per-seed [`synth::controller::generate_puzzle`].
//!
//! # Example: narrowing three houses down by hand
//!
//! The same machinery the generator drives automatically can be driven
//! manually. With three persons, positions 1–3, and three colours, tying
//! two colours to positions leaves exactly one assignment:
//!
//! ```
//! use clueforge::oracle::{counting::CountingOracle, Oracle, SolveOutcome};
//! use clueforge::synth::builder::{build_model, Dimension, Planted};
//! use clueforge::synth::clue::{Clue, Sign};
//! use clueforge::synth::encoder::encode;
//!
//! let dims = vec![
//!     Dimension::categorical("Name", ["Ada", "Bo", "Cy"]),
//!     Dimension::ordinal("Position", vec![1, 2, 3]),
//!     Dimension::categorical("Color", ["Blue", "Red", "Green"]),
//! ];
//! let planted = Planted::identity(dims.len(), 3);
//! let mut model = build_model(&dims).unwrap();
//! let oracle = CountingOracle::default();
//!
//! // "The person with Color Blue also has Position 1."
//! let clue = Clue::Pair { dim_a: 2, value_a: 0, dim_b: 1, value_b: 0, sign: Sign::Positive };
//! model.add(encode(&clue, &dims, &planted, &model).rows);
//! assert!(matches!(oracle.check(&model).unwrap(), SolveOutcome::Multiple));
//!
//! // "The person with Color Red also has Position 2." Now unique.
//! let clue = Clue::Pair { dim_a: 2, value_a: 1, dim_b: 1, value_b: 1, sign: Sign::Positive };
//! model.add(encode(&clue, &dims, &planted, &model).rows);
//! match oracle.check(&model).unwrap() {
//!     SolveOutcome::Unique(assignment) => assert_eq!(assignment.values[2], vec![0, 1, 2]),
//!     other => panic!("expected a unique solution, got {other:?}"),
//! }
//! ```
//!
//! End-to-end generation goes through
//! [`synth::controller::generate_puzzle`] (one seed) or
//! [`batch::run_batch`] (a run of seeds).

pub mod batch;
pub mod error;
pub mod oracle;
pub mod record;
pub mod store;
pub mod synth;
