//! Command-line runner for the Markov cohort simulator
//!
//! Loads a configuration (JSON file or built-in preset), simulates one
//! cohort and prints the outcome summary as JSON on stdout.
//!
//! ```text
//! markov-cohort --preset temp-stroke
//! markov-cohort --config cohort.json --pop-size 500 --pretty
//! RUST_LOG=markov_cohort_core_rs=debug markov-cohort --preset basic
//! ```

use clap::{Parser, ValueEnum};
use markov_cohort_core_rs::{CohortConfig, CohortError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// Three-state matrix: Well, PostStroke, Dead
    Basic,
    /// Four-state matrix with a transient Stroke state
    TempStroke,
}

#[derive(Debug, Parser)]
#[command(name = "markov-cohort")]
#[command(about = "Simulate a stroke cohort and print the outcome summary as JSON")]
#[command(version)]
struct Args {
    /// JSON cohort configuration
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Built-in configuration (default: temp-stroke)
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Override the cohort id (seeds every patient)
    #[arg(long)]
    cohort_id: Option<u64>,

    /// Override the population size
    #[arg(long)]
    pop_size: Option<usize>,

    /// Override the number of annual cycles
    #[arg(long)]
    horizon: Option<usize>,

    /// Pretty-print the summary
    #[arg(long)]
    pretty: bool,
}

fn load_config(args: &Args) -> Result<CohortConfig, CohortError> {
    let mut config = match (&args.config, args.preset) {
        (Some(path), _) => CohortConfig::from_json_file(path)?,
        (None, None | Some(Preset::TempStroke)) => CohortConfig::temp_stroke_preset(),
        (None, Some(Preset::Basic)) => CohortConfig::basic_preset(),
    };

    if let Some(id) = args.cohort_id {
        config.cohort_id = id;
    }
    if let Some(pop_size) = args.pop_size {
        config.pop_size = pop_size;
    }
    if let Some(horizon) = args.horizon {
        config.horizon = horizon;
    }

    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<String, CohortError> {
    let config = load_config(args)?;
    let summary = config.summarize()?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&summary)
    } else {
        serde_json::to_string(&summary)
    };
    rendered.map_err(|e| CohortError::InvalidConfig(format!("summary serialization failed: {}", e)))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "cohort run failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
