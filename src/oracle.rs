//! # Oracle — The Quantum Period-Finding Boundary
//!
//! Everything gate-level (circuit construction, transpilation, job submission,
//! measurement) lives behind [`PeriodOracle`]. The control logic in
//! [`crate::shor`] only ever sees a candidate period for (a, n), or the
//! absence of one. Oracle failures come in two severities:
//!
//! - [`OracleError::Timeout`] — the measurement round expired. Soft: the
//!   caller treats it as "no period found this attempt" and keeps going.
//! - [`OracleError::Backend`] — network/auth/hardware failure. Hard: surfaced
//!   to the caller, never silently treated as an empty measurement.
//!
//! [`phase_to_period`] is the classical half of the measurement pipeline:
//! oracle adapters convert a raw measured phase into a period candidate with
//! a continued-fraction rational approximation before handing it back.

use std::time::Duration;

use thiserror::Error;

use crate::numbers::{gcd, mul_mod, pow_mod};

/// Failures of a period oracle, distinguishable from "no signal".
#[derive(Debug, Error)]
pub enum OracleError {
    /// The measurement round did not complete in time. Treated by callers as
    /// an attempt-local miss, not a fatal error.
    #[error("period measurement timed out after {0:?}")]
    Timeout(Duration),

    /// The backend failed hard (network, auth, hardware). Always surfaced.
    #[error("backend failure: {0}")]
    Backend(String),
}

/// Supplies a candidate period r for f(x) = a^x mod n from one probabilistic
/// measurement round.
///
/// `Ok(None)` means the measurement distribution was empty or unusable —
/// an expected outcome, not an error. Implementations may block for an
/// externally-determined time (remote hardware queues); they are expected to
/// enforce their own deadline and return [`OracleError::Timeout`] on expiry.
pub trait PeriodOracle {
    fn find_period(&self, a: u64, n: u64, shots: u32) -> std::result::Result<Option<u64>, OracleError>;
}

fn gcd_u128(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Convert a measured phase into a period candidate.
///
/// The measured integer `phase` estimates r·2^n_count/period for an unknown
/// period. The best rational approximation of phase/2^n_count with
/// denominator at most `n` is computed by continued fractions (including the
/// final semiconvergent, so this matches `Fraction.limit_denominator`
/// semantics exactly); its denominator is the candidate period. The candidate
/// is accepted only when a^r ≡ 1 (mod n) — anything else means the
/// measurement carried no usable signal.
pub fn phase_to_period(phase: u64, n_count: u32, n: u64, a: u64) -> Option<u64> {
    if phase == 0 || n < 2 || n_count == 0 || n_count > 127 {
        return None;
    }

    let mut num = phase as u128;
    let mut den = 1u128 << n_count;
    let g = gcd_u128(num, den);
    num /= g;
    den /= g;

    let bound = n as u128;
    let r = if den <= bound {
        den
    } else {
        // Convergents p/q of the continued fraction of num/den, stopping
        // before the denominator exceeds the bound.
        let (mut p0, mut q0, mut p1, mut q1) = (0u128, 1u128, 1u128, 0u128);
        let (mut nn, mut dd) = (num, den);
        loop {
            let ai = nn / dd;
            let q2 = q0 + ai * q1;
            if q2 > bound {
                break;
            }
            let p2 = p0 + ai * p1;
            p0 = p1;
            q0 = q1;
            p1 = p2;
            q1 = q2;
            let rem = nn - ai * dd;
            nn = dd;
            dd = rem;
            // dd cannot reach 0 here: the exact fraction's denominator is
            // den > bound, so the break above fires first.
        }
        // The best approximation is either the last convergent or the
        // furthest semiconvergent under the bound, whichever is closer.
        let k = (bound - q0) / q1;
        if 2 * dd * (q0 + k * q1) <= den {
            q1
        } else {
            q0 + k * q1
        }
    };

    let r = u64::try_from(r).ok()?;
    if r > 0 && pow_mod(a, r, n) == 1 {
        Some(r)
    } else {
        None
    }
}

/// Oracle that finds the period by direct classical iteration: the smallest
/// r > 0 with a^r ≡ 1 (mod n).
///
/// O(r) per call, so only viable for small n — which is exactly the regime
/// this benchmark targets. Useful as a drop-in oracle when no quantum
/// substrate is available, and as the reference implementation oracles are
/// tested against.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassicalPeriodOracle;

impl PeriodOracle for ClassicalPeriodOracle {
    fn find_period(&self, a: u64, n: u64, _shots: u32) -> std::result::Result<Option<u64>, OracleError> {
        if n < 2 || gcd(a, n) != 1 {
            return Ok(None);
        }
        let mut current = a % n;
        // The period divides φ(n) < n, so n iterations always suffice
        for r in 1..=n {
            if current == 1 {
                return Ok(Some(r));
            }
            current = mul_mod(current, a, n);
        }
        Ok(None)
    }
}
