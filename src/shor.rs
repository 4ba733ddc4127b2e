//! # Shor — Classical Control Logic Around Quantum Period Finding
//!
//! Implements the classical half of Shor's algorithm: coprime base selection,
//! the perfect-power pre-check, and period-to-factor extraction. The quantum
//! half — producing a period candidate for (a, n) — is delegated entirely to
//! a [`PeriodOracle`], so this module runs unchanged against a simulator, real
//! hardware, or the classical reference oracle.
//!
//! Per `factor(n)` call:
//!
//! 1. Validate; even n returns `[2, n/2]` immediately.
//! 2. Perfect-power check: n = a^b returns `[a, n/a]`.
//! 3. Up to `max_iterations` attempts: pick random a coprime to n, ask the
//!    oracle for the period r of a^x mod n, discard odd/absent periods, and
//!    try to split n via gcd(a^(r/2) ± 1, n).
//! 4. All attempts spent → [`Error::FactorizationExhausted`] — an expected,
//!    reportable outcome, not a crash.
//!
//! Oracle timeouts are attempt-local misses; any other oracle failure aborts
//! the call (see [`crate::oracle`] for the two severities).

use std::collections::BTreeMap;

use rand::{Rng, RngCore};
use tracing::{debug, warn};

use crate::algorithm::{AlgorithmKind, Factorizer};
use crate::config::AlgorithmConfig;
use crate::error::{Error, Result};
use crate::events::{BenchmarkEvent, ProgressObserver};
use crate::numbers::{bit_length, gcd, pow_mod};
use crate::oracle::{OracleError, PeriodOracle};

/// Attempt budget when the config leaves `max_iterations` unset.
const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Rejection-sampling budget for coprime base selection.
const COPRIME_SAMPLE_TRIES: u32 = 100;

/// Shor's algorithm with a pluggable period oracle.
pub struct ShorFactorizer {
    config: AlgorithmConfig,
    oracle: Box<dyn PeriodOracle + Send + Sync>,
}

impl ShorFactorizer {
    pub fn new(oracle: Box<dyn PeriodOracle + Send + Sync>) -> Self {
        Self::with_config(AlgorithmConfig::default(), oracle)
    }

    pub fn with_config(config: AlgorithmConfig, oracle: Box<dyn PeriodOracle + Send + Sync>) -> Self {
        ShorFactorizer { config, oracle }
    }

    fn max_attempts(&self) -> u32 {
        self.config.max_iterations.unwrap_or(DEFAULT_MAX_ATTEMPTS)
    }

    /// One attempt of the period-finding loop. `Ok(None)` means the attempt
    /// produced nothing usable and the loop should continue.
    fn attempt(&self, n: u64, rng: &mut dyn RngCore) -> Result<Option<Vec<u64>>> {
        let a = choose_coprime(n, rng)?;

        // Kept from the textbook flow: a base sharing a factor with n splits
        // it classically. Unreachable after coprime sampling, but the check
        // documents the invariant the rest of the attempt relies on.
        let d = gcd(a, n);
        if d > 1 {
            return Ok(Some(vec![d, n / d]));
        }

        let period = match self.oracle.find_period(a, n, self.config.shots) {
            Ok(period) => period,
            Err(OracleError::Timeout(elapsed)) => {
                warn!(n, a, ?elapsed, "period oracle timed out, treating as no signal");
                None
            }
            Err(e) => return Err(Error::Oracle(e.to_string())),
        };

        let Some(r) = period else {
            debug!(n, a, "no period this attempt");
            return Ok(None);
        };
        if r % 2 != 0 {
            debug!(n, a, r, "odd period, retrying");
            return Ok(None);
        }

        let x = pow_mod(a, r / 2, n);
        // x is a unit mod n (a is coprime), so x >= 1 and x - 1 is safe.
        // Existing policy: the first candidate in (1, n) wins, x-1 before
        // x+1, even when the other might have split n.
        let candidate = [gcd(x - 1, n), gcd(x + 1, n)]
            .into_iter()
            .find(|&c| c > 1 && c < n);

        if let Some(c) = candidate {
            let mut factors = vec![c, n / c];
            if self.verify_factors(n, &factors) {
                factors.sort_unstable();
                return Ok(Some(factors));
            }
        }
        Ok(None)
    }
}

/// Random a in (1, n) with gcd(a, n) = 1, by rejection sampling.
fn choose_coprime(n: u64, rng: &mut dyn RngCore) -> Result<u64> {
    for _ in 0..COPRIME_SAMPLE_TRIES {
        let a = rng.random_range(2..n);
        if gcd(a, n) == 1 {
            return Ok(a);
        }
    }
    Err(Error::NoCoprimeFound {
        n,
        tries: COPRIME_SAMPLE_TRIES,
    })
}

/// Smallest a with a^b = n for some b > 1, or None when n is not a perfect
/// power. Searches exponents 2..=⌊log₂n⌋ with an exact integer check around
/// the floating-point root estimate.
fn perfect_power(n: u64) -> Option<u64> {
    if n < 4 {
        return None;
    }
    let max_exp = bit_length(n) - 1;
    for b in 2..=max_exp {
        let root = (n as f64).powf(1.0 / b as f64).round() as u64;
        for a in root.saturating_sub(1)..=root + 1 {
            if a >= 2 && pow_equals(a, b, n) {
                return Some(a);
            }
        }
    }
    None
}

/// Exact check a^b == n without overflow.
fn pow_equals(a: u64, b: u32, n: u64) -> bool {
    let target = n as u128;
    let mut acc = 1u128;
    for _ in 0..b {
        acc *= a as u128;
        if acc > target {
            return false;
        }
    }
    acc == target
}

impl Factorizer for ShorFactorizer {
    fn name(&self) -> &str {
        "Shor's Algorithm"
    }

    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Quantum
    }

    fn config(&self) -> &AlgorithmConfig {
        &self.config
    }

    fn factor(
        &self,
        n: u64,
        rng: &mut dyn RngCore,
        observer: Option<&dyn ProgressObserver>,
    ) -> Result<Vec<u64>> {
        self.validate_input(n)?;

        if n % 2 == 0 {
            return Ok(vec![2, n / 2]);
        }

        if let Some(a) = perfect_power(n) {
            debug!(n, base = a, "perfect power, no period finding needed");
            return Ok(vec![a, n / a]);
        }

        let max_attempts = self.max_attempts();
        for attempt in 1..=max_attempts {
            if let Some(obs) = observer {
                obs.observe(&BenchmarkEvent::AttemptStarted {
                    n,
                    attempt,
                    max_attempts,
                });
            }

            let outcome = self.attempt(n, rng)?;

            if let Some(obs) = observer {
                obs.observe(&BenchmarkEvent::AttemptFinished {
                    n,
                    attempt,
                    factors_found: outcome.is_some(),
                });
            }
            if let Some(factors) = outcome {
                return Ok(factors);
            }
        }

        Err(Error::FactorizationExhausted {
            n,
            attempts: max_attempts,
        })
    }

    fn extra_parameters(&self) -> BTreeMap<String, serde_json::Value> {
        let mut parameters = BTreeMap::new();
        parameters.insert("max_attempts".into(), serde_json::json!(self.max_attempts()));
        parameters
    }
}
