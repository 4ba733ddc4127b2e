//! End-to-end benchmark and scaling runs with seeded RNGs.
//!
//! These tests drive the full pipeline — composite generation, factorization,
//! engine-side verification, statistics, export — the way an embedding
//! service would, using `ChaCha8Rng` seeds so every run is reproducible.
//!
//! # How to run
//!
//! ```bash
//! cargo test --test benchmark_integration
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use factorbench::{
    quick_pff_estimate, run_benchmark, run_scaling, AlgorithmConfig, BenchmarkEvent,
    ClassicalFactorizer, ClassicalPeriodOracle, EventLog, Factorizer, ShorFactorizer,
    SECONDS_PER_YEAR,
};

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn shor() -> ShorFactorizer {
    // Generous attempt budget keeps seeded runs deterministic without ever
    // hitting exhaustion on these sizes
    let config = AlgorithmConfig {
        max_iterations: Some(50),
        ..Default::default()
    };
    ShorFactorizer::with_config(config, Box::new(ClassicalPeriodOracle))
}

// ── Classical End-to-End ───────────────────────────────────────────

#[test]
fn classical_benchmark_never_fails_on_semiprimes() {
    let alg = ClassicalFactorizer::new();
    let result = run_benchmark(6, &alg, 20, true, &mut rng(11), None).unwrap();
    assert_eq!(result.successful_trials, 20);
    assert!(result.stats.mean > 0.0);
    assert_eq!(result.pff, SECONDS_PER_YEAR / result.stats.mean);
    for outcome in &result.outcomes {
        assert!(outcome.success);
        assert!(alg.verify_factors(outcome.n, &outcome.factors));
    }
}

#[test]
fn classical_benchmark_general_composites() {
    let alg = ClassicalFactorizer::new();
    let result = run_benchmark(10, &alg, 15, false, &mut rng(12), None).unwrap();
    assert_eq!(result.successful_trials, 15);
    // General composites may have more than two prime factors
    assert!(result.outcomes.iter().any(|o| o.factors.len() >= 2));
}

#[test]
fn generated_composites_are_reproducible_across_runs() {
    let alg = ClassicalFactorizer::new();
    let a = run_benchmark(8, &alg, 10, true, &mut rng(13), None).unwrap();
    let b = run_benchmark(8, &alg, 10, true, &mut rng(13), None).unwrap();
    let ns_a: Vec<u64> = a.outcomes.iter().map(|o| o.n).collect();
    let ns_b: Vec<u64> = b.outcomes.iter().map(|o| o.n).collect();
    assert_eq!(ns_a, ns_b);
}

// ── Quantum Control Path End-to-End ────────────────────────────────

#[test]
fn shor_benchmark_with_classical_oracle() {
    let alg = shor();
    let result = run_benchmark(5, &alg, 10, true, &mut rng(14), None).unwrap();
    assert_eq!(result.trials, 10);
    // Success on every trial is expected at this size with 50 attempts
    assert_eq!(result.successful_trials, 10);
    for outcome in &result.outcomes {
        assert!(alg.verify_factors(outcome.n, &outcome.factors));
    }
}

#[test]
fn shor_benchmark_emits_attempt_events() {
    let alg = shor();
    let log = EventLog::new();
    run_benchmark(5, &alg, 5, true, &mut rng(15), Some(&log)).unwrap();

    let events = log.events();
    let trials_started = events
        .iter()
        .filter(|e| matches!(e, BenchmarkEvent::TrialStarted { .. }))
        .count();
    let attempts_started = events
        .iter()
        .filter(|e| matches!(e, BenchmarkEvent::AttemptStarted { .. }))
        .count();
    assert_eq!(trials_started, 5);
    // Even composites and perfect powers skip the attempt loop, so attempts
    // may be fewer than trials — but never interleave outside a trial
    assert!(attempts_started <= events.len());
}

// ── Scaling End-to-End ─────────────────────────────────────────────

#[test]
fn scaling_covers_every_size_in_order() {
    let alg = ClassicalFactorizer::new();
    let scaling = run_scaling(&alg, &[4, 6, 8], 5, true, &mut rng(16), None).unwrap();
    assert_eq!(scaling.sizes, vec![4, 6, 8]);
    assert_eq!(scaling.results.len(), 3);
    let pff = scaling.pff_series();
    let timing = scaling.timing_series();
    for &size in &scaling.sizes {
        assert!(pff[&size] > 0.0);
        assert!(timing[&size] > 0.0);
        assert_eq!(pff[&size], SECONDS_PER_YEAR / timing[&size]);
    }
}

#[test]
fn scaling_export_is_size_indexed() {
    let alg = ClassicalFactorizer::new();
    let scaling = run_scaling(&alg, &[4, 5], 3, true, &mut rng(17), None).unwrap();
    let json = scaling.export();
    assert_eq!(json["algorithm"], "Classical Factorization");
    assert_eq!(json["sizes"], serde_json::json!([4, 5]));
    assert!(json["pff_series"]["4"].is_number());
    assert!(json["pff_series"]["5"].is_number());
    assert!(json["timestamp"].is_string());
}

// ── Export and Reporting ───────────────────────────────────────────

#[test]
fn benchmark_export_matches_run() {
    let alg = ClassicalFactorizer::new();
    let result = run_benchmark(6, &alg, 8, true, &mut rng(18), None).unwrap();
    let json = result.export();
    assert_eq!(json["s"], 6);
    assert_eq!(json["trials"], 8);
    assert_eq!(json["successful_trials"], 8);
    assert_eq!(json["success_rate"], 1.0);
    assert_eq!(json["backend"], "cpu");
    assert_eq!(
        json["pff"].as_f64().unwrap(),
        SECONDS_PER_YEAR / json["avg_time"].as_f64().unwrap()
    );
}

#[test]
fn algorithm_info_is_stable_across_calls() {
    let classical = ClassicalFactorizer::new();
    assert_eq!(classical.info(), classical.info());
    let quantum = shor();
    assert_eq!(quantum.info(), quantum.info());
}

#[test]
fn quick_estimate_runs_a_real_sample() {
    let estimate = quick_pff_estimate(6, 5, &mut rng(19)).unwrap();
    assert_eq!(estimate.size, 6);
    assert!(estimate.pff > 0.0);
    assert_eq!(estimate.pff, SECONDS_PER_YEAR / estimate.time_per_run);
}
