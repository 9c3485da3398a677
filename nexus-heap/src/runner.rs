//! Benchmark driver: bulk-build, insert, drain, report.
//!
//! One run for size `n`:
//!
//! ```text
//! generate n values in [0, max(10, n))     (seeded, reproducible)
//! build_heap(values)                       (untimed)
//! insert 0..max(1, n / 10)                 (timed)
//! extract_min until empty                  (timed)
//! ```
//!
//! Results go to a writer as one summary line per size, and optionally to
//! a CSV file in append mode.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use crate::{MetricsSnapshot, MinHeap};

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Generates `n` values uniformly in `[0, max(10, n))`.
pub fn generate_input(n: usize, seed: u64) -> Vec<i64> {
    let bound = n.max(10) as i64;
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n).map(|_| rng.random_range(0..bound)).collect()
}

/// Outcome of a single sized run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    /// Input size.
    pub size: usize,
    /// Wall time of the insert + drain phase.
    pub elapsed: Duration,
    /// Counters accumulated by the heap over the whole run, build included.
    pub metrics: MetricsSnapshot,
}

impl RunResult {
    /// Column names matching [`csv_row`](Self::csv_row).
    pub const CSV_HEADER: &'static str =
        "size,elapsedMicros,comparisons,swaps,arrayAccesses,allocations,recursiveCalls";

    /// Elapsed time in whole microseconds.
    pub fn elapsed_micros(&self) -> u128 {
        self.elapsed.as_micros()
    }

    /// `n=<size> elapsed(us)=<micros> metrics=<row>`
    pub fn summary_line(&self) -> String {
        format!(
            "n={} elapsed(us)={} metrics={}",
            self.size,
            self.elapsed_micros(),
            self.metrics
        )
    }

    /// `<size>,<micros>,<metrics row>`
    pub fn csv_row(&self) -> String {
        format!("{},{},{}", self.size, self.elapsed_micros(), self.metrics)
    }
}

/// Runs the build / insert / drain cycle for one size.
pub fn run_once(n: usize, seed: u64) -> RunResult {
    let mut heap = MinHeap::build_heap(generate_input(n, seed));

    let extra = (n / 10).max(1) as i64;
    let start = Instant::now();
    for i in 0..extra {
        heap.insert(i);
    }
    while heap.extract_min().is_ok() {}
    let elapsed = start.elapsed();

    RunResult {
        size: n,
        elapsed,
        metrics: heap.metrics().snapshot(),
    }
}

/// One whitespace-separated token of a sizes line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeToken {
    /// Parsed as a size.
    Valid(usize),
    /// Not a non-negative integer; carries the original text.
    Invalid(String),
}

/// Splits a sizes line on whitespace and parses each token.
pub fn parse_sizes<S: AsRef<str>>(tokens: &[S]) -> Vec<SizeToken> {
    tokens
        .iter()
        .flat_map(|t| t.as_ref().split_whitespace())
        .map(|t| match t.parse::<usize>() {
            Ok(n) => SizeToken::Valid(n),
            Err(_) => SizeToken::Invalid(t.to_owned()),
        })
        .collect()
}

/// Appends `result` to the CSV at `path`, creating it if needed.
///
/// The header row is written first when the file is empty.
pub fn append_csv(path: &Path, result: &RunResult) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if file.metadata()?.len() == 0 {
        writeln!(file, "{}", RunResult::CSV_HEADER)?;
    }
    writeln!(file, "{}", result.csv_row())
}

/// Runs every valid size in `tokens`, printing one summary line per run to
/// `out` and appending rows to `csv` when set.
///
/// Invalid tokens and CSV failures are logged and skipped. Only a failure
/// to write to `out` aborts.
pub fn run<S, W>(
    tokens: &[S],
    csv: Option<&Path>,
    seed: u64,
    out: &mut W,
) -> io::Result<Vec<RunResult>>
where
    S: AsRef<str>,
    W: Write,
{
    let mut results = Vec::new();

    for token in parse_sizes(tokens) {
        let n = match token {
            SizeToken::Valid(n) => n,
            SizeToken::Invalid(text) => {
                warn!(token = %text, "skipping invalid number");
                continue;
            }
        };

        let result = run_once(n, seed);
        info!(
            size = n,
            elapsed_us = result.elapsed.as_micros() as u64,
            comparisons = result.metrics.comparisons,
            swaps = result.metrics.swaps,
            "run complete"
        );
        writeln!(out, "{}", result.summary_line())?;

        if let Some(path) = csv {
            if let Err(err) = append_csv(path, &result) {
                warn!(path = %path.display(), error = %err, "failed to write csv");
            }
        }

        results.push(result);
    }

    Ok(results)
}
