//! # factorbench — Integer-Factorization Benchmarking
//!
//! Benchmarks factorization algorithms (classical and quantum-assisted) and
//! reduces their measured performance to a single throughput metric: **PFF**,
//! the number of factorizations per year implied by the mean time-to-solution.
//!
//! ## Layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`numbers`] | Primality, modular arithmetic, random semiprime/composite generation |
//! | [`algorithm`] | The [`Factorizer`] capability contract all strategies implement |
//! | [`classical`] | Trial division + Pollard's rho baseline |
//! | [`oracle`] | The quantum period-finding boundary and phase→period conversion |
//! | [`shor`] | Classical control logic of Shor's algorithm around a [`PeriodOracle`] |
//! | [`benchmark`] | The timed trial loop, statistics, and the PFF metric |
//! | [`scaling`] | Multi-size scaling analysis |
//! | [`result`] | Result data model and canonical export |
//! | [`events`] | Injected progress observer |
//! | [`config`] / [`error`] | Shared configuration and the error taxonomy |
//!
//! ## Example
//!
//! ```
//! use factorbench::{run_benchmark, ClassicalFactorizer};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let algorithm = ClassicalFactorizer::new();
//! let result = run_benchmark(8, &algorithm, 10, true, &mut rng, None).unwrap();
//! assert_eq!(result.successful_trials, 10);
//! println!("{}", result.summary());
//! ```
//!
//! Everything gate-level — circuits, transpilation, hardware job submission —
//! lives behind the [`PeriodOracle`] trait; this crate never constructs a
//! quantum circuit.

pub mod algorithm;
pub mod benchmark;
pub mod classical;
pub mod config;
pub mod error;
pub mod events;
pub mod numbers;
pub mod oracle;
pub mod result;
pub mod scaling;
pub mod shor;

pub use algorithm::{AlgorithmInfo, AlgorithmKind, Factorizer};
pub use benchmark::{calculate_pff, quick_pff_estimate, run_benchmark, PffEstimate, SECONDS_PER_YEAR};
pub use classical::ClassicalFactorizer;
pub use config::AlgorithmConfig;
pub use error::{Error, Result};
pub use events::{BenchmarkEvent, EventLog, ProgressObserver};
pub use numbers::{generate_random_composite, generate_semiprime, Semiprime};
pub use oracle::{ClassicalPeriodOracle, OracleError, PeriodOracle};
pub use result::{BenchmarkResult, ScalingResult, TimingStats, TrialOutcome};
pub use scaling::run_scaling;
pub use shor::ShorFactorizer;
