//! Console driver for the heap benchmark.
//!
//! Run with:
//!   cargo run --release --bin heap_bench -- --sizes 100 1000 10000 --output results.csv
//!
//! Without `--sizes` the sizes and output path are read interactively from
//! stdin. Result lines go to stdout; logs go to stderr (`RUST_LOG=info`).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nexus_heap::MetricsCollector;
use nexus_heap::runner::{self, DEFAULT_SEED};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "heap_bench", about = "Instrumented min-heap benchmark", version)]
struct Cli {
    /// Input sizes to run. Prompted for when omitted.
    ///
    /// Tokens that are not sizes (including negatives) are skipped.
    #[arg(long, num_args = 1.., allow_hyphen_values = true)]
    sizes: Option<Vec<String>>,

    /// CSV file to append results to.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Seed for input generation.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Print the CSV column names before the results.
    #[arg(long)]
    header: bool,
}

fn prompt(stdin: &mut impl BufRead, stdout: &mut impl Write, message: &str) -> Result<String> {
    writeln!(stdout, "{message}")?;
    stdout.flush()?;
    let mut line = String::new();
    stdin.read_line(&mut line).context("failed to read stdin")?;
    Ok(line.trim().to_owned())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let (sizes, output) = match cli.sizes {
        Some(sizes) => (sizes, cli.output),
        None => {
            let mut input = io::stdin().lock();
            let sizes = prompt(
                &mut input,
                &mut out,
                "Enter sizes separated by spaces (e.g. 100 1000 10000):",
            )?;
            let output = match cli.output {
                Some(path) => Some(path),
                None => {
                    let path = prompt(
                        &mut input,
                        &mut out,
                        "Enter output CSV file path or leave empty:",
                    )?;
                    (!path.is_empty()).then(|| PathBuf::from(path))
                }
            };
            (vec![sizes], output)
        }
    };

    if cli.header {
        writeln!(out, "# n elapsed(us) metrics={}", MetricsCollector::CSV_HEADER)?;
    }

    runner::run(&sizes, output.as_deref(), cli.seed, &mut out)
        .context("failed to write results")?;
    Ok(())
}
