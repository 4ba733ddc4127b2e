//! Error types for factorbench.
//!
//! One variant per failure class, with the offending composite and parameters
//! attached so a failed trial can be reported without re-deriving context.
//! Validation and generation errors are recoverable by retrying with fresh
//! random input; post-condition violations and exhausted budgets always
//! surface to the caller.

use thiserror::Error;

/// Main error type for factorization and benchmarking operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not a factorable composite (n < 2, n == 2, or n prime).
    /// Caller error — never retried.
    #[error("invalid input n={n}: {reason}")]
    InvalidInput { n: u64, reason: String },

    /// Random generation failed within its attempt budget. Retryable with a
    /// fresh call; indicates bad luck, not a bug.
    #[error("could not generate {bits}-bit {what} after {attempts} attempts")]
    GenerationExhausted {
        what: &'static str,
        bits: u32,
        attempts: u32,
    },

    /// Coprime selection for n exhausted its rejection-sampling budget.
    #[error("no a coprime to n={n} found in {tries} tries")]
    NoCoprimeFound { n: u64, tries: u32 },

    /// A factor() call produced factors that fail verification. Treated as an
    /// algorithm-implementation defect and always surfaced.
    #[error("factorization of n={n} produced invalid factors {factors:?}")]
    FactorizationFailed { n: u64, factors: Vec<u64> },

    /// The period-finding attempt loop used all iterations without producing
    /// factors. An expected-probability outcome, recorded as a failed trial.
    #[error("failed to factor n={n} after {attempts} attempts")]
    FactorizationExhausted { n: u64, attempts: u32 },

    /// Every trial in a benchmark failed. Fatal to that benchmark run.
    #[error("no successful factorizations in {trials} trials")]
    NoSuccessfulTrials { trials: u32 },

    /// Non-positive duration passed to the PFF calculation. Programmer error.
    #[error("time per run must be positive, got {seconds}")]
    InvalidDuration { seconds: f64 },

    /// A scaling run was given the same size twice.
    #[error("duplicate size {size} in scaling run")]
    DuplicateSize { size: u32 },

    /// The period oracle failed hard (backend, network, auth). Distinct from
    /// "no period found", which is not an error.
    #[error("period oracle failure: {0}")]
    Oracle(String),

    /// Invalid algorithm configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for factorbench operations.
pub type Result<T> = std::result::Result<T, Error>;
