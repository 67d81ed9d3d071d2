//! Repeated timing runs and thread-scaling tables.
//!
//! Every run's solution count is checked: repeated runs of one
//! configuration must agree, and every thread count must match the
//! single-worker baseline.

use crate::error::{QueensError, Result};
use crate::search::config::SearchConfig;
use crate::search::parallel::run_parallel_search;
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of repeating one configuration.
#[derive(Debug, Clone)]
pub struct TrialSummary {
    pub workers: usize,
    pub runs: usize,
    /// Solutions found; identical across every run
    pub solutions: u64,
    pub median: Duration,
}

/// One row of a scaling table.
#[derive(Debug, Clone)]
pub struct SpeedupRow {
    pub workers: usize,
    /// Solutions found; matches the baseline row
    pub solutions: u64,
    pub median: Duration,
    /// Single-worker median divided by this row's median
    pub speedup: f64,
}

/// Upper median of `times`, or zero if empty.
pub fn median(times: &mut [Duration]) -> Duration {
    if times.is_empty() {
        return Duration::ZERO;
    }
    times.sort_unstable();
    times[times.len() / 2]
}

fn check_count(workers: usize, expected: u64, actual: u64) -> Result<()> {
    if expected != actual {
        warn!(workers, expected, actual, "solution count mismatch");
        return Err(QueensError::CountMismatch {
            workers,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Run `config` `runs` times and report the median.
///
/// Fails with [`QueensError::CountMismatch`] if two runs disagree.
pub fn run_trials(config: &SearchConfig, runs: usize) -> Result<TrialSummary> {
    if runs == 0 {
        return Err(QueensError::InvalidRunCount(runs));
    }
    let mut times = Vec::with_capacity(runs);
    let mut solutions = None;

    for run in 0..runs {
        let result = run_parallel_search(config)?;
        debug!(run, workers = config.workers, elapsed = ?result.elapsed_time, "trial finished");
        match solutions {
            Some(expected) => check_count(config.workers, expected, result.solutions)?,
            None => solutions = Some(result.solutions),
        }
        times.push(result.elapsed_time);
    }

    Ok(TrialSummary {
        workers: config.workers,
        runs,
        solutions: solutions.unwrap_or(0),
        median: median(&mut times),
    })
}

/// Time 1..=`max_workers` workers against the single-worker baseline.
///
/// Fails with [`QueensError::CountMismatch`] if any thread count finds a
/// different number of solutions than the baseline.
pub fn speedup_table(
    config: &SearchConfig,
    max_workers: usize,
    runs: usize,
) -> Result<Vec<SpeedupRow>> {
    if max_workers == 0 {
        return Err(QueensError::InvalidWorkerCount(max_workers));
    }
    let baseline = run_trials(&config.clone().with_workers(1), runs)?;
    let base_secs = baseline.median.as_secs_f64();

    let mut rows = Vec::with_capacity(max_workers);
    rows.push(SpeedupRow {
        workers: 1,
        solutions: baseline.solutions,
        median: baseline.median,
        speedup: 1.0,
    });

    for workers in 2..=max_workers {
        let summary = run_trials(&config.clone().with_workers(workers), runs)?;
        check_count(workers, baseline.solutions, summary.solutions)?;
        let secs = summary.median.as_secs_f64();
        rows.push(SpeedupRow {
            workers,
            solutions: summary.solutions,
            median: summary.median,
            speedup: if secs > 0.0 { base_secs / secs } else { 0.0 },
        });
    }

    Ok(rows)
}
