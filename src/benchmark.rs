//! # Benchmark — The Trial Loop and the PFF Metric
//!
//! Runs N timed factorization trials of one algorithm over freshly generated
//! composites of a fixed bit size, then reduces the successful durations to
//! timing statistics and the PFF score (factorizations per year).
//!
//! Trials execute strictly sequentially: the metric is defined in terms of
//! wall-clock duration per trial, and interleaving would corrupt the timing.
//! A single trial's failure degrades the success rate and is excluded from
//! the statistics; it never aborts the run. Zero successes abort the run —
//! a PFF over no data would be meaningless.

use std::collections::BTreeMap;
use std::time::Instant;

use rand::RngCore;
use tracing::{debug, info};

use crate::algorithm::Factorizer;
use crate::error::{Error, Result};
use crate::events::{BenchmarkEvent, ProgressObserver};
use crate::numbers::generate_random_composite;
use crate::result::{BenchmarkResult, TrialOutcome};

/// 365 days, in seconds — the PFF normalization constant.
pub const SECONDS_PER_YEAR: f64 = 31_536_000.0;

/// Prime Factorization Frequency: factorizations per year implied by a mean
/// time-to-solution. Fails with [`Error::InvalidDuration`] for non-positive
/// (or NaN) input.
pub fn calculate_pff(time_per_run: f64) -> Result<f64> {
    if !(time_per_run > 0.0) {
        return Err(Error::InvalidDuration {
            seconds: time_per_run,
        });
    }
    Ok(SECONDS_PER_YEAR / time_per_run)
}

/// Run `trials` factorization trials at bit size `size` and aggregate them.
///
/// Per trial: generate a composite (semiprime or general), time the
/// algorithm's factor() call, re-verify the factors engine-side, and record
/// the outcome. Only verified successes enter the timing sample. Generation
/// failures abort the run — there is no composite to attribute an outcome to.
pub fn run_benchmark(
    size: u32,
    algorithm: &dyn Factorizer,
    trials: u32,
    semiprime: bool,
    rng: &mut dyn RngCore,
    observer: Option<&dyn ProgressObserver>,
) -> Result<BenchmarkResult> {
    if size < 2 {
        return Err(Error::Config(format!("size must be >= 2 bits, got {size}")));
    }
    if trials < 1 {
        return Err(Error::Config(format!("trials must be >= 1, got {trials}")));
    }

    info!(
        size,
        algorithm = algorithm.name(),
        backend = %algorithm.config().backend,
        trials,
        semiprime,
        "starting benchmark"
    );

    let mut outcomes = Vec::with_capacity(trials as usize);

    for trial in 1..=trials {
        let n = generate_random_composite(size, semiprime, rng)?;

        if let Some(obs) = observer {
            obs.observe(&BenchmarkEvent::TrialStarted { trial, n });
        }

        let started = Instant::now();
        let factored = algorithm.factor(n, rng, observer);
        let elapsed = started.elapsed();

        let mut metadata = BTreeMap::new();
        metadata.insert("trial".to_string(), serde_json::json!(trial));

        let outcome = match factored {
            Ok(factors) => {
                if algorithm.verify_factors(n, &factors) {
                    TrialOutcome::succeeded(n, factors, elapsed, metadata)
                } else {
                    // The algorithm claimed success but the factors don't
                    // check out — recorded as a failure, factors retained
                    // for diagnosis.
                    TrialOutcome {
                        n,
                        factors,
                        elapsed,
                        success: false,
                        error: Some("factor verification failed".to_string()),
                        metadata,
                    }
                }
            }
            Err(e) => TrialOutcome::failed(n, elapsed, e.to_string(), metadata),
        };

        if let Some(obs) = observer {
            obs.observe(&BenchmarkEvent::TrialFinished {
                trial,
                n,
                success: outcome.success,
                elapsed,
            });
        }
        debug!(trial, trials, n, success = outcome.success, "trial finished");

        outcomes.push(outcome);
    }

    let mut metadata = BTreeMap::new();
    metadata.insert("semiprime".to_string(), serde_json::json!(semiprime));
    metadata.insert(
        "algorithm_info".to_string(),
        serde_json::to_value(algorithm.info()).unwrap_or(serde_json::Value::Null),
    );

    let result = BenchmarkResult::from_outcomes(
        size,
        algorithm.name(),
        algorithm.config().backend.clone(),
        outcomes,
        metadata,
    )?;

    info!(
        size,
        successful = result.successful_trials,
        trials = result.trials,
        avg_time = result.stats.mean,
        pff = result.pff,
        "benchmark complete"
    );

    Ok(result)
}

/// Quick PFF estimate from a small classical sample.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PffEstimate {
    pub size: u32,
    pub time_per_run: f64,
    pub pff: f64,
}

/// Estimate the PFF at `size` bits from a short classical benchmark —
/// useful for rapid sanity checks without a full run.
pub fn quick_pff_estimate(size: u32, sample_size: u32, rng: &mut dyn RngCore) -> Result<PffEstimate> {
    let algorithm = crate::classical::ClassicalFactorizer::new();
    let result = run_benchmark(size, &algorithm, sample_size, true, rng, None)?;
    Ok(PffEstimate {
        size,
        time_per_run: result.stats.mean,
        pff: result.pff,
    })
}
