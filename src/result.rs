//! # Result — Benchmark Outcome Data Model and Canonical Export
//!
//! Value types produced by the benchmark engine and scaling coordinator.
//! [`BenchmarkResult`] owns its trial outcomes exclusively and
//! [`ScalingResult`] owns its per-size result map — nothing here is shared
//! or mutated after construction.
//!
//! Each result type has a canonical structured serialization (`export`) with
//! a stable field set consumed by the HTTP layer and dashboards, and a
//! human-readable `summary` rendering.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::benchmark::calculate_pff;
use crate::error::{Error, Result};

/// Outcome of a single factorization trial. Immutable after creation.
#[derive(Clone, Debug, Serialize)]
pub struct TrialOutcome {
    /// The composite that was handed to the algorithm.
    pub n: u64,
    /// Prime factors found (empty on failure).
    pub factors: Vec<u64>,
    /// Wall-clock duration of the factor() call.
    pub elapsed: Duration,
    pub success: bool,
    /// Error description for failed trials.
    pub error: Option<String>,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl TrialOutcome {
    pub fn succeeded(
        n: u64,
        factors: Vec<u64>,
        elapsed: Duration,
        metadata: BTreeMap<String, serde_json::Value>,
    ) -> Self {
        TrialOutcome {
            n,
            factors,
            elapsed,
            success: true,
            error: None,
            metadata,
        }
    }

    pub fn failed(
        n: u64,
        elapsed: Duration,
        error: String,
        metadata: BTreeMap<String, serde_json::Value>,
    ) -> Self {
        TrialOutcome {
            n,
            factors: Vec::new(),
            elapsed,
            success: false,
            error: Some(error),
            metadata,
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Timing statistics over the successful trials of a benchmark run,
/// in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TimingStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation; 0.0 with exactly one sample.
    pub std_dev: f64,
    pub median: f64,
}

impl TimingStats {
    /// Compute statistics over a non-empty sample. Returns None when the
    /// sample is empty — there is no meaningful timing for zero successes.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let std_dev = if samples.len() > 1 {
            let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        } else {
            0.0
        };

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(TimingStats {
            mean,
            min,
            max,
            std_dev,
            median,
        })
    }
}

/// Result of one benchmark run at a fixed bit size.
#[derive(Clone, Debug, Serialize)]
pub struct BenchmarkResult {
    /// Bit size of the factored composites.
    pub size: u32,
    /// Algorithm display name.
    pub algorithm: String,
    pub backend: String,
    pub trials: u32,
    pub successful_trials: u32,
    pub stats: TimingStats,
    /// Factorizations per year implied by the mean time-to-solution.
    pub pff: f64,
    pub timestamp: DateTime<Utc>,
    pub outcomes: Vec<TrialOutcome>,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl BenchmarkResult {
    /// Assemble a result from recorded trial outcomes, computing statistics
    /// and the PFF metric over the successful trials.
    ///
    /// Fails with [`Error::NoSuccessfulTrials`] when every trial failed —
    /// timing statistics are undefined in that case.
    pub fn from_outcomes(
        size: u32,
        algorithm: impl Into<String>,
        backend: impl Into<String>,
        outcomes: Vec<TrialOutcome>,
        metadata: BTreeMap<String, serde_json::Value>,
    ) -> Result<Self> {
        let trials = outcomes.len() as u32;
        let samples: Vec<f64> = outcomes
            .iter()
            .filter(|o| o.success)
            .map(TrialOutcome::elapsed_secs)
            .collect();
        let successful_trials = samples.len() as u32;

        let stats = TimingStats::from_samples(&samples)
            .ok_or(Error::NoSuccessfulTrials { trials })?;
        let pff = calculate_pff(stats.mean)?;

        Ok(BenchmarkResult {
            size,
            algorithm: algorithm.into(),
            backend: backend.into(),
            trials,
            successful_trials,
            stats,
            pff,
            timestamp: Utc::now(),
            outcomes,
            metadata,
        })
    }

    /// Fraction of trials that succeeded.
    pub fn success_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.successful_trials as f64 / self.trials as f64
        }
    }

    /// Canonical structured serialization.
    pub fn export(&self) -> serde_json::Value {
        serde_json::json!({
            "s": self.size,
            "algorithm": self.algorithm,
            "trials": self.trials,
            "successful_trials": self.successful_trials,
            "avg_time": self.stats.mean,
            "min_time": self.stats.min,
            "max_time": self.stats.max,
            "std_time": self.stats.std_dev,
            "median_time": self.stats.median,
            "pff": self.pff,
            "timestamp": self.timestamp.to_rfc3339(),
            "backend": self.backend,
            "metadata": self.metadata,
            "success_rate": self.success_rate(),
        })
    }

    /// Human-readable run summary.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Benchmark: {} bits, {}", self.size, self.algorithm);
        let _ = writeln!(out, "Backend:              {}", self.backend);
        let _ = writeln!(
            out,
            "Successful trials:    {}/{} ({:.1}%)",
            self.successful_trials,
            self.trials,
            self.success_rate() * 100.0
        );
        let _ = writeln!(out, "Average time:         {:.6} s", self.stats.mean);
        let _ = writeln!(out, "Min / max time:       {:.6} / {:.6} s", self.stats.min, self.stats.max);
        let _ = writeln!(out, "Median time:          {:.6} s", self.stats.median);
        let _ = writeln!(out, "Std deviation:        {:.6} s", self.stats.std_dev);
        let _ = write!(out, "PFF({} bits) = {:.0} factorizations/year", self.size, self.pff);
        out
    }
}

/// Results of a scaling analysis across multiple bit sizes.
///
/// Invariant (held by construction in [`crate::scaling`]): the key set of
/// `results` equals the value set of `sizes`.
#[derive(Clone, Debug, Serialize)]
pub struct ScalingResult {
    pub algorithm: String,
    pub sizes: Vec<u32>,
    pub results: BTreeMap<u32, BenchmarkResult>,
    pub timestamp: DateTime<Utc>,
}

impl ScalingResult {
    /// PFF value per tested size.
    pub fn pff_series(&self) -> BTreeMap<u32, f64> {
        self.results.iter().map(|(&s, r)| (s, r.pff)).collect()
    }

    /// Mean time-to-solution per tested size.
    pub fn timing_series(&self) -> BTreeMap<u32, f64> {
        self.results.iter().map(|(&s, r)| (s, r.stats.mean)).collect()
    }

    /// Canonical structured serialization.
    pub fn export(&self) -> serde_json::Value {
        serde_json::json!({
            "algorithm": self.algorithm,
            "sizes": self.sizes,
            "pff_series": self.pff_series(),
            "timing_series": self.timing_series(),
            "timestamp": self.timestamp.to_rfc3339(),
        })
    }

    /// Human-readable scaling table in size order.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Scaling analysis: {}", self.algorithm);
        let _ = writeln!(out, "Size (bits) | Avg time (s) | PFF (per year)");
        for &size in &self.sizes {
            if let Some(result) = self.results.get(&size) {
                let _ = writeln!(
                    out,
                    "{:>11} | {:>12.6} | {:>14.0}",
                    size, result.stats.mean, result.pff
                );
            }
        }
        out
    }
}
