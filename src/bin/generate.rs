use std::{fs, path::PathBuf};

use clap::Parser;
use clueforge::{
    batch::{render_batch_table, run_batch, BatchReport},
    store::EntityStore,
    synth::GeneratorConfig,
};

/// Generate a batch of zebra puzzles and write them as JSON.
#[derive(Parser, Debug)]
#[command(name = "generate", version, about)]
struct Args {
    /// How many puzzles to attempt.
    #[arg(long, default_value_t = 100)]
    count: u64,

    /// Seed of the first attempt; attempt i uses start_seed + i.
    #[arg(long, default_value_t = 0)]
    start_seed: u64,

    /// Write the puzzle records to this JSON file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// attribute_entity.json to use instead of the built-in data.
    #[arg(long, requires = "numbered")]
    attributes: Option<PathBuf>,

    /// numbered_entity.json to use instead of the built-in data.
    #[arg(long, requires = "attributes")]
    numbered: Option<PathBuf>,

    /// Save progress every this many puzzles (0 disables checkpoints).
    #[arg(long, default_value_t = 10)]
    checkpoint_every: usize,

    #[arg(long, default_value_t = 3)]
    min_persons: usize,

    #[arg(long, default_value_t = 4)]
    max_persons: usize,
}

fn main() {
    let _ = tracing_subscriber::fmt::try_init();
    let args = Args::parse();

    let store = match (&args.attributes, &args.numbered) {
        (Some(attributes), Some(numbered)) => {
            let attributes = fs::read_to_string(attributes).expect("read attribute entities");
            let numbered = fs::read_to_string(numbered).expect("read numbered entities");
            EntityStore::from_json(&attributes, &numbered).expect("parse entity files")
        }
        _ => EntityStore::builtin(),
    };

    let config = GeneratorConfig {
        min_persons: args.min_persons,
        max_persons: args.max_persons,
        ..GeneratorConfig::default()
    };

    let write = |report: &BatchReport| {
        if let Some(path) = &args.output {
            let json = serde_json::to_string_pretty(&report.puzzles).expect("serialize puzzles");
            fs::write(path, json).expect("write puzzle file");
        }
    };

    let report = run_batch(
        &store,
        &config,
        args.start_seed,
        args.count,
        args.checkpoint_every,
        |partial| write(partial),
    )
    .expect("batch generation failed");
    write(&report);

    println!("{}", render_batch_table(&report));
    println!(
        "{} generated, {} failed, {} attempted",
        report.successes,
        report.failures,
        report.puzzles.len()
    );
    if let Some(path) = &args.output {
        println!("Output saved to {}", path.display());
    }
}
