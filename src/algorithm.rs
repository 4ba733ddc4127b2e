//! # Algorithm — The Capability Contract for Factorization Strategies
//!
//! Every factorization strategy (classical or quantum-assisted) implements
//! [`Factorizer`]: input validation, factoring, factor verification, and a
//! reporting snapshot. The trait is object-safe so engines hold
//! `&dyn Factorizer` and new strategies can be added without touching callers.
//!
//! Randomness is always passed in by the caller — algorithm instances hold no
//! mutable state beyond their fixed configuration, so independent benchmark
//! runs may share an instance across threads.

use std::collections::BTreeMap;

use rand::RngCore;
use serde::Serialize;

use crate::config::AlgorithmConfig;
use crate::error::{Error, Result};
use crate::events::ProgressObserver;
use crate::numbers::is_prime;

/// Broad class of a factorization strategy, for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    Classical,
    Quantum,
}

impl AlgorithmKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classical => "classical",
            Self::Quantum => "quantum",
        }
    }
}

/// Reporting snapshot of an algorithm instance. Never used for control flow.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AlgorithmInfo {
    pub name: String,
    pub kind: AlgorithmKind,
    pub backend: String,
    pub version: String,
    pub parameters: BTreeMap<String, serde_json::Value>,
}

/// A pluggable factorization strategy.
pub trait Factorizer {
    /// Display name for reports.
    fn name(&self) -> &str;

    /// Classical or quantum, for reporting.
    fn kind(&self) -> AlgorithmKind;

    /// The instance's fixed configuration.
    fn config(&self) -> &AlgorithmConfig;

    /// Factor a composite n into an ordered sequence of prime factors.
    ///
    /// Precondition: [`Factorizer::validate_input`] holds for n.
    /// Postcondition: [`Factorizer::verify_factors`] is true for the result;
    /// implementations fail with [`Error::FactorizationFailed`] otherwise.
    fn factor(
        &self,
        n: u64,
        rng: &mut dyn RngCore,
        observer: Option<&dyn ProgressObserver>,
    ) -> Result<Vec<u64>>;

    /// Strategy-specific additions to the [`AlgorithmInfo`] parameter map.
    fn extra_parameters(&self) -> BTreeMap<String, serde_json::Value> {
        BTreeMap::new()
    }

    /// Reject inputs that cannot be factored: n < 2, n == 2, or n prime.
    /// Must run before any factoring work.
    fn validate_input(&self, n: u64) -> Result<()> {
        if n < 2 {
            return Err(Error::InvalidInput {
                n,
                reason: "must be >= 2".to_string(),
            });
        }
        if n == 2 {
            return Err(Error::InvalidInput {
                n,
                reason: "2 is prime, cannot factor".to_string(),
            });
        }
        if is_prime(n) {
            return Err(Error::InvalidInput {
                n,
                reason: "prime, cannot factor".to_string(),
            });
        }
        Ok(())
    }

    /// True when `factors` is non-empty, its product is n, and every member
    /// is prime. Pure — never fails.
    fn verify_factors(&self, n: u64, factors: &[u64]) -> bool {
        if factors.is_empty() {
            return false;
        }
        let mut product: u128 = 1;
        for &f in factors {
            product = product.saturating_mul(f as u128);
        }
        if product != n as u128 {
            return false;
        }
        factors.iter().all(|&f| is_prime(f))
    }

    /// Reporting snapshot: name, kind, backend, crate version, and the full
    /// configuration parameter map. Idempotent for a fixed instance.
    fn info(&self) -> AlgorithmInfo {
        let config = self.config();
        let mut parameters: BTreeMap<String, serde_json::Value> = BTreeMap::new();
        parameters.insert("backend".into(), serde_json::json!(config.backend));
        parameters.insert("shots".into(), serde_json::json!(config.shots));
        parameters.insert(
            "optimization_level".into(),
            serde_json::json!(config.optimization_level),
        );
        if let Some(max_iterations) = config.max_iterations {
            parameters.insert("max_iterations".into(), serde_json::json!(max_iterations));
        }
        for (key, value) in &config.extra {
            parameters.insert(key.clone(), value.clone());
        }
        parameters.extend(self.extra_parameters());

        AlgorithmInfo {
            name: self.name().to_string(),
            kind: self.kind(),
            backend: config.backend.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal strategy for exercising the provided trait methods.
    struct FixedFactorizer {
        config: AlgorithmConfig,
    }

    impl Factorizer for FixedFactorizer {
        fn name(&self) -> &str {
            "Fixed"
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
            Ok(vec![n])
        }
    }

    fn fixed() -> FixedFactorizer {
        FixedFactorizer {
            config: AlgorithmConfig::default(),
        }
    }

    #[test]
    fn validate_input_rejects_small_and_prime() {
        let alg = fixed();
        for n in [0u64, 1, 2, 3, 5, 7, 101, 1009] {
            assert!(
                matches!(alg.validate_input(n), Err(Error::InvalidInput { .. })),
                "n={} should be rejected",
                n
            );
        }
    }

    #[test]
    fn validate_input_accepts_composites() {
        let alg = fixed();
        for n in [4u64, 6, 9, 15, 21, 35, 1001] {
            assert!(alg.validate_input(n).is_ok(), "n={} should be accepted", n);
        }
    }

    #[test]
    fn verify_factors_rejects_empty() {
        assert!(!fixed().verify_factors(15, &[]));
    }

    #[test]
    fn verify_factors_rejects_product_mismatch() {
        assert!(!fixed().verify_factors(15, &[3, 7]));
        assert!(!fixed().verify_factors(15, &[15]));
    }

    #[test]
    fn verify_factors_rejects_composite_members() {
        // 4 * 4 = 16 but 4 is not prime
        assert!(!fixed().verify_factors(16, &[4, 4]));
    }

    #[test]
    fn verify_factors_accepts_valid() {
        let alg = fixed();
        assert!(alg.verify_factors(15, &[3, 5]));
        assert!(alg.verify_factors(12, &[2, 2, 3]));
        assert!(alg.verify_factors(4, &[2, 2]));
    }

    #[test]
    fn verify_factors_handles_overflowing_products() {
        // Large factor lists must not panic on multiplication
        let factors = vec![u64::MAX - 82; 4]; // prime-ish magnitude, product >> u128? no — saturates
        assert!(!fixed().verify_factors(100, &factors));
    }

    #[test]
    fn info_is_idempotent() {
        let alg = fixed();
        assert_eq!(alg.info(), alg.info());
    }

    #[test]
    fn info_reflects_config() {
        let mut alg = fixed();
        alg.config.max_iterations = Some(7);
        alg.config
            .extra
            .insert("noise".into(), serde_json::json!("ideal"));
        let info = alg.info();
        assert_eq!(info.name, "Fixed");
        assert_eq!(info.kind, AlgorithmKind::Classical);
        assert_eq!(info.backend, "simulator");
        assert_eq!(info.parameters["max_iterations"], serde_json::json!(7));
        assert_eq!(info.parameters["noise"], serde_json::json!("ideal"));
    }

    #[test]
    fn kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(AlgorithmKind::Classical).unwrap(),
            serde_json::json!("classical")
        );
        assert_eq!(AlgorithmKind::Quantum.as_str(), "quantum");
    }
}
