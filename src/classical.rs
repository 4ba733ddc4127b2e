//! # Classical — Trial Division and Pollard's Rho Baseline
//!
//! The classical reference strategy every quantum-assisted run is compared
//! against. Small composites go through straight trial division; larger ones
//! through Pollard's rho with Floyd cycle detection, recursing on both
//! cofactors until everything is prime.

use std::collections::BTreeMap;

use rand::RngCore;
use tracing::debug;

use crate::algorithm::{AlgorithmKind, Factorizer};
use crate::config::AlgorithmConfig;
use crate::error::{Error, Result};
use crate::events::ProgressObserver;
use crate::numbers::{gcd, is_prime, mul_mod};

/// Below this, trial division wins; above it, Pollard's rho.
const TRIAL_DIVISION_CUTOFF: u64 = 1_000_000;

/// Classical factorization via trial division and Pollard's rho.
pub struct ClassicalFactorizer {
    config: AlgorithmConfig,
}

impl ClassicalFactorizer {
    pub fn new() -> Self {
        Self::with_config(AlgorithmConfig::with_backend("cpu"))
    }

    pub fn with_config(config: AlgorithmConfig) -> Self {
        ClassicalFactorizer { config }
    }
}

impl Default for ClassicalFactorizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete factorization by trial division: strip 2s, then odd divisors
/// while divisor² ≤ remainder; whatever survives the loop is prime.
fn trial_division(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    while n % 2 == 0 {
        factors.push(2);
        n /= 2;
    }
    let mut i = 3u64;
    while i * i <= n {
        while n % i == 0 {
            factors.push(i);
            n /= i;
        }
        i += 2;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

/// Pollard's rho iteration function g(x) = x² + 1 (mod n).
fn g(x: u64, n: u64) -> u64 {
    (mul_mod(x, x, n) + 1) % n
}

/// Complete factorization by Pollard's rho with recursive cofactor splitting.
///
/// Primes return immediately, even inputs strip a factor of 2 and recurse.
/// A degenerate cycle (d == n) falls back to trial division.
fn pollard_rho(n: u64) -> Vec<u64> {
    if n <= 1 {
        return Vec::new();
    }
    if is_prime(n) {
        return vec![n];
    }
    if n % 2 == 0 {
        let mut factors = vec![2];
        factors.extend(pollard_rho(n / 2));
        return factors;
    }

    let mut x = 2u64;
    let mut y = 2u64;
    let mut d = 1u64;
    while d == 1 {
        x = g(x, n);
        y = g(g(y, n), n);
        d = gcd(x.abs_diff(y), n);
    }

    if d == n {
        // Cycle degenerated without exposing a factor
        debug!(n, "pollard rho cycle degenerated, falling back to trial division");
        return trial_division(n);
    }

    let mut factors = Vec::new();
    for part in [d, n / d] {
        factors.extend(pollard_rho(part));
    }
    factors
}

impl Factorizer for ClassicalFactorizer {
    fn name(&self) -> &str {
        "Classical Factorization"
    }

    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Classical
    }

    fn config(&self) -> &AlgorithmConfig {
        &self.config
    }

    fn factor(
        &self,
        n: u64,
        _rng: &mut dyn RngCore,
        _observer: Option<&dyn ProgressObserver>,
    ) -> Result<Vec<u64>> {
        self.validate_input(n)?;

        let mut factors = if n < TRIAL_DIVISION_CUTOFF {
            trial_division(n)
        } else {
            pollard_rho(n)
        };

        if !self.verify_factors(n, &factors) {
            return Err(Error::FactorizationFailed { n, factors });
        }

        factors.sort_unstable();
        Ok(factors)
    }

    fn extra_parameters(&self) -> BTreeMap<String, serde_json::Value> {
        let mut parameters = BTreeMap::new();
        parameters.insert(
            "method".into(),
            serde_json::json!("trial_division/pollard_rho"),
        );
        parameters
    }
}
