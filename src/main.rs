mod analysis;
mod common;
mod parsing;

use argh::FromArgs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Import analysis functions
use analysis::{
    generate_attempt_plots, generate_attempt_summary, write_bucket_dump, AttemptAggregate,
};

// Import parsing functionality
use parsing::parse_probe_files;

/// Box-plot analysis of timestamp addition attempts per TTL hop count
#[derive(FromArgs, Debug)]
pub struct Args {
    /// input files containing "ttl_delta overflow" integer pairs, one per line
    #[argh(positional)]
    inputs: Vec<PathBuf>,
}

/// Errors that can occur during analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Parsing error: {0}")]
    Parsing(#[from] parsing::ParsingError),

    #[error("Attempt analysis error: {0}")]
    Attempts(#[from] analysis::attempts::AttemptsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type Result<T> = core::result::Result<T, AnalysisError>;

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    // Argument check
    if args.inputs.is_empty() {
        eprintln!("Error: give at least one input file as argument");
        std::process::exit(1);
    }

    // Parse the measurement files in argument order
    let records = parse_probe_files(&args.inputs)?;

    // Bucket attempt counts by hop count and rebuild the dense 1..=max range
    let aggregate = AttemptAggregate::from_records(&records);
    let buckets = aggregate.dense_buckets()?;

    // Dump the per-hop buckets before plotting
    let stdout = std::io::stdout();
    write_bucket_dump(&mut stdout.lock(), &buckets)?;

    // Outputs land in the working directory under fixed names
    let output_dir = Path::new(".");
    generate_attempt_summary(&buckets, output_dir)?;
    generate_attempt_plots(&buckets, output_dir)?;

    Ok(())
}
