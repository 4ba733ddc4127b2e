//! # Scaling — Benchmarks Across a Sweep of Bit Sizes
//!
//! Repeats the benchmark engine over an ordered list of sizes and collates
//! the per-size results into a [`ScalingResult`]. Fail-fast by design: a
//! scaling curve with gaps is not meaningful, so any single size's failure
//! aborts the whole run with no partial result.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use chrono::Utc;
use rand::RngCore;
use tracing::info;

use crate::algorithm::Factorizer;
use crate::benchmark::run_benchmark;
use crate::error::{Error, Result};
use crate::events::ProgressObserver;
use crate::result::ScalingResult;

/// Benchmark `algorithm` at each size in order and assemble the size-indexed
/// result set.
///
/// Sizes must be distinct: the result is keyed by size, and silently
/// overwriting an earlier run would skew the series. Duplicates are rejected
/// up front with [`Error::DuplicateSize`], before any benchmark starts.
pub fn run_scaling(
    algorithm: &dyn Factorizer,
    sizes: &[u32],
    trials: u32,
    semiprime: bool,
    rng: &mut dyn RngCore,
    observer: Option<&dyn ProgressObserver>,
) -> Result<ScalingResult> {
    if sizes.is_empty() {
        return Err(Error::Config("scaling run needs at least one size".to_string()));
    }
    let mut seen = BTreeSet::new();
    for &size in sizes {
        if !seen.insert(size) {
            return Err(Error::DuplicateSize { size });
        }
    }

    info!(
        algorithm = algorithm.name(),
        ?sizes,
        trials,
        semiprime,
        "starting scaling analysis"
    );

    let mut results = BTreeMap::new();
    for (step, &size) in sizes.iter().enumerate() {
        info!(step = step + 1, total = sizes.len(), size, "scaling step");
        let result = run_benchmark(size, algorithm, trials, semiprime, rng, observer)?;
        results.insert(size, result);
    }

    Ok(ScalingResult {
        algorithm: algorithm.name().to_string(),
        sizes: sizes.to_vec(),
        results,
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::AlgorithmKind;
    use crate::classical::ClassicalFactorizer;
    use crate::config::AlgorithmConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn duplicate_sizes_are_rejected() {
        let alg = ClassicalFactorizer::new();
        match run_scaling(&alg, &[4, 6, 6], 5, true, &mut rng(0), None) {
            Err(Error::DuplicateSize { size }) => assert_eq!(size, 6),
            other => panic!("expected DuplicateSize, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn empty_size_list_is_rejected() {
        let alg = ClassicalFactorizer::new();
        assert!(matches!(
            run_scaling(&alg, &[], 5, true, &mut rng(1), None),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn result_keys_match_sizes() {
        let alg = ClassicalFactorizer::new();
        let scaling = run_scaling(&alg, &[4, 5, 6], 3, true, &mut rng(2), None).unwrap();
        assert_eq!(scaling.sizes, vec![4, 5, 6]);
        let keys: Vec<u32> = scaling.results.keys().copied().collect();
        assert_eq!(keys, vec![4, 5, 6]);
        for (&size, result) in &scaling.results {
            assert_eq!(result.size, size);
            assert_eq!(result.trials, 3);
        }
    }

    #[test]
    fn one_failing_size_aborts_the_run() {
        /// Fails for everything except 4-bit composites.
        struct FourBitOnly {
            inner: ClassicalFactorizer,
            config: AlgorithmConfig,
        }
        impl Factorizer for FourBitOnly {
            fn name(&self) -> &str {
                "FourBitOnly"
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
                rng: &mut dyn RngCore,
                observer: Option<&dyn crate::events::ProgressObserver>,
            ) -> Result<Vec<u64>> {
                if n >= 16 {
                    return Err(Error::FactorizationExhausted { n, attempts: 1 });
                }
                self.inner.factor(n, rng, observer)
            }
        }

        let alg = FourBitOnly {
            inner: ClassicalFactorizer::new(),
            config: AlgorithmConfig::default(),
        };
        // Size 5 produces only failures, which fails that benchmark and must
        // abort the whole scaling run
        assert!(matches!(
            run_scaling(&alg, &[4, 5], 3, true, &mut rng(3), None),
            Err(Error::NoSuccessfulTrials { .. })
        ));
    }

    #[test]
    fn unsorted_size_order_is_preserved() {
        let alg = ClassicalFactorizer::new();
        let scaling = run_scaling(&alg, &[6, 4], 2, true, &mut rng(4), None).unwrap();
        assert_eq!(scaling.sizes, vec![6, 4]);
        assert!(scaling.results.contains_key(&4));
        assert!(scaling.results.contains_key(&6));
    }
}
