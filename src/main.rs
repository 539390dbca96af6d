use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

mod classifier;
mod config;
mod dognames;
mod evaluation;
mod labels;
mod models;
mod output;
mod runner;

use crate::config::Config;
use crate::output::OutputFormat;
use crate::runner::Runner;

/// Pet Classifier Evaluation CLI - Classify pet images and score the
/// predictions against labels derived from the file names
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML run file
    run_file: PathBuf,

    /// Output format: plain or json
    #[arg(short, long, default_value = "plain")]
    output: OutputFormat,

    /// Verbose output - show progress for each run
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let start_time = Instant::now();
    let args = Args::parse();

    let config = Config::from_file(&args.run_file)?;
    let runner = Runner::new(config.clone(), args.verbose);

    let results = runner.run_all().await?;

    output::print_results(&results, &config.runs, args.output);

    println!(
        "\n** Total Elapsed Runtime: {}",
        output::format_elapsed(start_time.elapsed())
    );

    Ok(())
}
