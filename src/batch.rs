//! Batch generation over a run of seeds.
//!
//! One failed attempt never sinks the batch: exhausted or oracle-limited
//! attempts land in the report as unsuccessful records and generation
//! moves on to the next seed. Only configuration-level errors propagate.
//!
//! Attempts are fully independent (each owns its model and its seeded
//! rng), so callers wanting parallelism can split the seed range across
//! threads and merge the reports.

use prettytable::{Cell, Row, Table};
use tracing::info;

use crate::{
    error::Result,
    record::PuzzleRecord,
    store::EntityStore,
    synth::{controller::generate_puzzle, GeneratorConfig},
};

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub puzzles: Vec<PuzzleRecord>,
    pub successes: usize,
    pub failures: usize,
}

/// Attempts seeds `start_seed..start_seed + count`. `on_checkpoint` fires
/// after every `checkpoint_every` attempts (0 disables it) so callers can
/// persist partial progress; the report passed to it is the running state.
pub fn run_batch(
    store: &EntityStore,
    config: &GeneratorConfig,
    start_seed: u64,
    count: u64,
    checkpoint_every: usize,
    mut on_checkpoint: impl FnMut(&BatchReport),
) -> Result<BatchReport> {
    let mut report = BatchReport::default();
    for seed in start_seed..start_seed + count {
        let record = generate_puzzle(store, config, seed)?;
        if record.generation_success {
            report.successes += 1;
            info!(
                puzzle_id = seed,
                persons = record.num_persons,
                clues = record.num_clues,
                "puzzle generated"
            );
        } else {
            report.failures += 1;
        }
        report.puzzles.push(record);

        if checkpoint_every > 0 && report.puzzles.len() % checkpoint_every == 0 {
            on_checkpoint(&report);
        }
    }
    Ok(report)
}

/// Renders a per-puzzle summary table.
pub fn render_batch_table(report: &BatchReport) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Puzzle"),
        Cell::new("Persons"),
        Cell::new("Dimensions"),
        Cell::new("Clues"),
        Cell::new("Result"),
    ]));

    for record in &report.puzzles {
        let result = if record.generation_success {
            "ok".to_string()
        } else {
            record
                .reason
                .clone()
                .unwrap_or_else(|| "failed".to_string())
        };
        table.add_row(Row::new(vec![
            Cell::new(&record.puzzle_id.to_string()),
            Cell::new(&record.num_persons.to_string()),
            Cell::new(&record.dimensions.len().to_string()),
            Cell::new(&record.num_clues.to_string()),
            Cell::new(&result),
        ]));
    }

    table.to_string()
}
