//! The synthesis state machine and attempt orchestration.
//!
//! `Building` is the only non-terminal state: one candidate clue is
//! encoded and tentatively added per step, then the oracle is consulted.
//! `Infeasible` rolls the candidate back, `Multiple` keeps it, `Unique`
//! keeps it and halts with success. Running out of candidates ends the
//! attempt in `Exhausted`. Candidates are tried strictly in sampled order
//! with no lookahead, and the accepted set is never minimized afterwards.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use tracing::{debug, info, warn};

use crate::{
    error::{GenerateError, Result},
    oracle::{counting::CountingOracle, Assignment, Oracle, PuzzleModel, SolveOutcome},
    record::PuzzleRecord,
    store::EntityStore,
    synth::{
        builder::{build_model, Dimension, Planted},
        clue::Clue,
        encoder::encode,
        extractor::extract_solution,
        sampler::ClueSampler,
        GeneratorConfig,
    },
};

/// A clue the controller kept, with its rendered text.
#[derive(Debug, Clone)]
pub struct AcceptedClue {
    pub clue: Clue,
    pub text: String,
}

/// Outcome of a successful synthesis run. The accepted rows stay in the
/// model that was passed in, so re-checking the final constraint set needs
/// no replay.
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub clues: Vec<AcceptedClue>,
    pub assignment: Assignment,
    pub candidates_tried: usize,
    pub rejected: usize,
}

/// Runs the add/check/accept-or-reject loop until the constraint set pins
/// down one assignment or a terminal failure is reached.
pub fn synthesize<R: Rng, O: Oracle>(
    rng: &mut R,
    oracle: &O,
    model: &mut PuzzleModel,
    dims: &[Dimension],
    planted: &Planted,
    config: &GeneratorConfig,
) -> Result<Synthesis> {
    // A baseline that is not satisfiable can only mean broken
    // construction; it must not be papered over by the rejection path.
    match oracle.check(model)? {
        SolveOutcome::Infeasible => {
            return Err(GenerateError::StructuralInfeasibility(format!(
                "{} persons, {} dimensions",
                model.num_persons(),
                model.num_dimensions()
            ))
            .into());
        }
        SolveOutcome::Unique(assignment) => {
            // Possible only for degenerate shapes (no free dimensions).
            return Ok(Synthesis {
                clues: Vec::new(),
                assignment,
                candidates_tried: 0,
                rejected: 0,
            });
        }
        SolveOutcome::Multiple => {}
    }

    let budget = config
        .candidate_budget
        .unwrap_or_else(|| model.num_persons().pow(3));
    let sampler = ClueSampler::new(config.order_clue_weight, config.negative_clue_weight);

    let mut clues: Vec<AcceptedClue> = Vec::new();
    let mut rejected = 0usize;
    let mut rejection_streak = 0usize;

    for candidate in 0..budget {
        let clue = sampler.sample(rng, planted);
        let encoded = encode(&clue, dims, planted, model);
        let handle = model.add(encoded.rows);

        match oracle.check(model)? {
            SolveOutcome::Infeasible => {
                model.retract(handle)?;
                rejected += 1;
                rejection_streak += 1;
                // Candidates are true of the planted solution, so an
                // infeasible addition points at the encoding.
                warn!(
                    candidate,
                    accepted = clues.len(),
                    clue = %encoded.text,
                    "rejected infeasible candidate"
                );
                if rejection_streak >= config.max_consecutive_rejections {
                    return Err(GenerateError::RejectionStorm {
                        streak: rejection_streak,
                        accepted: clues.len(),
                    }
                    .into());
                }
            }
            SolveOutcome::Unique(assignment) => {
                debug!(candidate, clue = %encoded.text, "accepted final clue");
                clues.push(AcceptedClue {
                    clue,
                    text: encoded.text,
                });
                info!(
                    clues = clues.len(),
                    rejected,
                    candidates = candidate + 1,
                    "synthesis reached a unique solution"
                );
                return Ok(Synthesis {
                    clues,
                    assignment,
                    candidates_tried: candidate + 1,
                    rejected,
                });
            }
            SolveOutcome::Multiple => {
                rejection_streak = 0;
                debug!(candidate, clue = %encoded.text, "accepted candidate");
                clues.push(AcceptedClue {
                    clue,
                    text: encoded.text,
                });
            }
        }
    }

    Err(GenerateError::SynthesisExhausted {
        budget,
        accepted: clues.len(),
    }
    .into())
}

/// One full generation attempt: draw a shape from the store, plant a
/// solution, synthesize a clue set, and package the result.
///
/// Attempt-level failures (budget exhausted, rejection storm, oracle
/// trouble) come back as an unsuccessful [`PuzzleRecord`] carrying the
/// reason; only configuration and store problems are returned as errors.
pub fn generate_puzzle(
    store: &EntityStore,
    config: &GeneratorConfig,
    puzzle_id: u64,
) -> Result<PuzzleRecord> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(puzzle_id);

    let num_persons = rng.gen_range(config.min_persons..=config.max_persons);
    let extra_dimensions =
        rng.gen_range(config.min_extra_dimensions..=config.max_extra_dimensions);
    let dims = store.draw_dimensions(&mut rng, num_persons, extra_dimensions)?;
    let planted = Planted::plant(&mut rng, dims.len(), num_persons);
    let mut model = build_model(&dims)?;
    let oracle = CountingOracle::new(config.oracle_node_limit);

    match synthesize(&mut rng, &oracle, &mut model, &dims, &planted, config) {
        Ok(synthesis) => {
            let solution = extract_solution(&dims, &synthesis.assignment);
            let texts = synthesis.clues.into_iter().map(|c| c.text).collect();
            Ok(PuzzleRecord::success(puzzle_id, &dims, texts, solution))
        }
        Err(err) if !err.is_fatal() => {
            warn!(puzzle_id, reason = %err.kind(), "generation attempt failed");
            Ok(PuzzleRecord::failure(
                puzzle_id,
                &dims,
                err.kind().to_string(),
            ))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::VecDeque};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::synth::{
        clue::{Clue, Sign},
        encoder::encode,
    };

    fn dims() -> Vec<Dimension> {
        vec![
            Dimension::categorical("Name", ["Ada", "Bo", "Cy"]),
            Dimension::ordinal("Position", vec![1, 2, 3]),
            Dimension::categorical("Color", ["Blue", "Red", "Green"]),
            Dimension::categorical("Pet", ["Dog", "Cat", "Fish"]),
        ]
    }

    /// Replays queued outcomes, then keeps returning the fallback.
    struct ScriptedOracle {
        script: RefCell<VecDeque<SolveOutcome>>,
        fallback: SolveOutcome,
    }

    impl ScriptedOracle {
        fn new(script: Vec<SolveOutcome>, fallback: SolveOutcome) -> Self {
            Self {
                script: RefCell::new(script.into()),
                fallback,
            }
        }
    }

    impl Oracle for ScriptedOracle {
        fn check(&self, _model: &PuzzleModel) -> Result<SolveOutcome> {
            Ok(self
                .script
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone()))
        }
    }

    fn run_scripted(oracle: &ScriptedOracle, config: &GeneratorConfig) -> Result<Synthesis> {
        let dims = dims();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let planted = Planted::plant(&mut rng, dims.len(), 3);
        let mut model = build_model(&dims).unwrap();
        synthesize(&mut rng, oracle, &mut model, &dims, &planted, config)
    }

    #[test]
    fn infeasible_baseline_is_fatal() {
        let oracle = ScriptedOracle::new(vec![SolveOutcome::Infeasible], SolveOutcome::Multiple);
        let err = run_scripted(&oracle, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(
            err.kind(),
            GenerateError::StructuralInfeasibility(_)
        ));
    }

    #[test]
    fn consecutive_rejections_abort_the_attempt() {
        let oracle = ScriptedOracle::new(vec![SolveOutcome::Multiple], SolveOutcome::Infeasible);
        let config = GeneratorConfig {
            max_consecutive_rejections: 5,
            candidate_budget: Some(100),
            ..GeneratorConfig::default()
        };
        let err = run_scripted(&oracle, &config).unwrap_err();
        match err.kind() {
            GenerateError::RejectionStorm { streak, accepted } => {
                assert_eq!(*streak, 5);
                assert_eq!(*accepted, 0);
            }
            other => panic!("expected a rejection storm, got {other}"),
        }
    }

    #[test]
    fn exhausted_budget_fails_the_attempt() {
        let oracle = ScriptedOracle::new(Vec::new(), SolveOutcome::Multiple);
        let config = GeneratorConfig {
            candidate_budget: Some(7),
            ..GeneratorConfig::default()
        };
        let err = run_scripted(&oracle, &config).unwrap_err();
        match err.kind() {
            GenerateError::SynthesisExhausted { budget, accepted } => {
                assert_eq!(*budget, 7);
                assert_eq!(*accepted, 7);
            }
            other => panic!("expected exhaustion, got {other}"),
        }
    }

    #[test]
    fn contradicting_clue_is_rolled_back_without_narrowing() {
        let dims = dims();
        let planted = Planted::identity(dims.len(), 3);
        let mut model = build_model(&dims).unwrap();
        let oracle = CountingOracle::default();

        // Accept "the person with Color Blue also has Position 1".
        let positive = Clue::Pair {
            dim_a: 2,
            value_a: 0,
            dim_b: 1,
            value_b: 0,
            sign: Sign::Positive,
        };
        model.add(encode(&positive, &dims, &planted, &model).rows);
        let (before, _) = oracle.count_solutions(&model, 1_000).unwrap();
        assert!(before > 1);

        // A negative clue over the same two values contradicts it.
        let negative = Clue::Pair {
            dim_a: 2,
            value_a: 0,
            dim_b: 1,
            value_b: 0,
            sign: Sign::Negative,
        };
        let handle = model.add(encode(&negative, &dims, &planted, &model).rows);
        assert_eq!(oracle.check(&model).unwrap(), SolveOutcome::Infeasible);

        model.retract(handle).unwrap();
        let (after, _) = oracle.count_solutions(&model, 1_000).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn synthesis_result_matches_a_recheck_of_the_final_model() {
        let config = GeneratorConfig::default();
        let oracle = CountingOracle::default();
        let dims = dims();

        let mut reached_unique = 0;
        for seed in 0..10u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let planted = Planted::plant(&mut rng, dims.len(), 3);
            let mut model = build_model(&dims).unwrap();
            let Ok(synthesis) =
                synthesize(&mut rng, &oracle, &mut model, &dims, &planted, &config)
            else {
                continue;
            };
            reached_unique += 1;

            // The accepted set alone admits exactly the reported solution.
            match oracle.check(&model).unwrap() {
                SolveOutcome::Unique(assignment) => assert_eq!(assignment, synthesis.assignment),
                other => panic!("final model is not uniquely solvable: {other:?}"),
            }

            // Every accepted clue is true of the reported solution.
            for accepted in &synthesis.clues {
                assert!(
                    accepted
                        .clue
                        .holds_in(&synthesis.assignment, &planted, model.ordinal_weights()),
                    "accepted clue is false of the solution: {}",
                    accepted.text
                );
            }
        }
        assert!(
            reached_unique > 0,
            "no seed out of ten synthesized a unique puzzle"
        );
    }

    #[test]
    fn solution_count_never_increases_along_the_accepted_set() {
        let dims = dims();
        let oracle = CountingOracle::default();
        let sampler = ClueSampler::new(0.05, 0.2);

        let mut observed_full_run = false;
        for seed in 0..10u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let planted = Planted::plant(&mut rng, dims.len(), 3);
            let mut model = build_model(&dims).unwrap();
            let (mut last, _) = oracle.count_solutions(&model, 1_000).unwrap();

            for _ in 0..54 {
                let clue = sampler.sample(&mut rng, &planted);
                let handle = model.add(encode(&clue, &dims, &planted, &model).rows);
                let (count, _) = oracle.count_solutions(&model, 1_000).unwrap();
                if count == 0 {
                    model.retract(handle).unwrap();
                    let (restored, _) = oracle.count_solutions(&model, 1_000).unwrap();
                    assert_eq!(restored, last);
                    continue;
                }
                assert!(count <= last, "accepting a clue grew the solution count");
                last = count;
                if count == 1 {
                    observed_full_run = true;
                    break;
                }
            }
        }
        assert!(observed_full_run, "no run narrowed down to one solution");
    }

    #[test]
    fn generated_records_keep_the_name_dimension_identity() {
        let store = EntityStore::builtin();
        let config = GeneratorConfig::default();

        let mut successes = 0;
        for seed in 0..12u64 {
            let record = generate_puzzle(&store, &config, seed).unwrap();
            assert_eq!(record.puzzle_id, seed);
            if !record.generation_success {
                assert!(record.reason.is_some());
                continue;
            }
            successes += 1;
            assert_eq!(record.num_clues, record.clues.len());
            assert_eq!(record.dimensions.len(), record.entities.len());
            assert_eq!(record.dimensions[0], "Name");
            // Dimension 0 is the identity bijection: the solution row
            // equals the entity list in person order.
            assert_eq!(record.solution[0], record.entities[0]);
            assert_eq!(record.solution[1], record.entities[1]);
        }
        assert!(successes > 0, "no seed out of twelve generated a puzzle");
    }

    #[test]
    fn generation_is_reproducible_per_seed() {
        let store = EntityStore::builtin();
        let config = GeneratorConfig::default();
        let first = generate_puzzle(&store, &config, 42).unwrap();
        let second = generate_puzzle(&store, &config, 42).unwrap();
        assert_eq!(first, second);
    }
}
