//! # Numbers — Primality, Modular Arithmetic, and Random Composite Generation
//!
//! Core number-theoretic infrastructure used by every other module. Provides:
//!
//! 1. **Deterministic primality testing** via trial division. O(√n), which is
//!    the right trade-off here: the benchmark targets small composites (the
//!    service policy caps sizes at 20 bits), where trial division beats the
//!    setup cost of anything fancier.
//! 2. **Modular exponentiation** (`pow_mod`) and **modular multiplication**
//!    (`mul_mod`) using u128 intermediates, safe for operands up to ~2^63.
//! 3. **Random prime / semiprime / composite generation** with exact bit-length
//!    guarantees, driven by an explicit caller-supplied RNG so trial sequences
//!    are reproducible under a fixed seed.
//!
//! Generation is rejection sampling with a bounded attempt budget; exhausting
//! the budget yields [`Error::GenerationExhausted`], which callers may retry.

use rand::{Rng, RngCore};
use tracing::trace;

use crate::error::{Error, Result};

/// Attempt budget for [`generate_prime`]. Generous because the prime density
/// near 2^k is ~1/(k ln 2); at 16 bits roughly one candidate in 11 is prime,
/// so 10,000 attempts makes failure astronomically unlikely.
pub const MAX_PRIME_ATTEMPTS: u32 = 10_000;

/// Attempt budget for [`generate_semiprime`] and the non-semiprime composite
/// sampler. Each attempt already contains a full prime generation, so this
/// budget is smaller.
pub const MAX_COMPOSITE_ATTEMPTS: u32 = 1_000;

/// A semiprime n = p·q with p, q prime and p ≠ q.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Semiprime {
    pub n: u64,
    pub p: u64,
    pub q: u64,
}

/// Deterministic primality test by trial division up to √n.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3u64;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Number of bits needed to represent n (0 for n = 0).
pub fn bit_length(n: u64) -> u32 {
    64 - n.leading_zeros()
}

/// Greatest common divisor.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Modular multiplication: a·b mod modulus, via u128 intermediate.
pub fn mul_mod(a: u64, b: u64, modulus: u64) -> u64 {
    (a as u128 * b as u128 % modulus as u128) as u64
}

/// Modular exponentiation: base^exp mod modulus.
/// Uses u128 intermediates to avoid overflow for moduli up to ~2^63.
pub fn pow_mod(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let mut result: u64 = 1;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, modulus);
        }
        exp >>= 1;
        base = mul_mod(base, base, modulus);
    }
    result
}

/// Generate a random prime with exactly `bits` bits.
///
/// Rejection-samples odd integers in [2^(bits−1), 2^bits − 1] until one passes
/// [`is_prime`], up to [`MAX_PRIME_ATTEMPTS`] candidates. Requires
/// 2 ≤ bits ≤ 63.
pub fn generate_prime(bits: u32, rng: &mut dyn RngCore) -> Result<u64> {
    if !(2..=63).contains(&bits) {
        return Err(Error::Config(format!(
            "prime bit length must be in [2, 63], got {bits}"
        )));
    }
    let min = 1u64 << (bits - 1);
    let max = (1u64 << bits) - 1;

    for _ in 0..MAX_PRIME_ATTEMPTS {
        let mut candidate = rng.random_range(min..=max);
        // Even candidates can never be prime here (min >= 2^1); nudging up
        // keeps the candidate in range because max is odd.
        if candidate % 2 == 0 {
            candidate += 1;
        }
        if is_prime(candidate) {
            return Ok(candidate);
        }
    }

    Err(Error::GenerationExhausted {
        what: "prime",
        bits,
        attempts: MAX_PRIME_ATTEMPTS,
    })
}

/// Generate a random semiprime n = p·q with exactly `s` bits.
///
/// Picks p with ⌊s/2⌋ bits, then tries q at width s−⌊s/2⌋ or one more, keeping
/// the pair only when p ≠ q and the product lands on exactly `s` bits.
/// Requires 4 ≤ s ≤ 63 (below 4 bits there is no semiprime with two distinct
/// prime factors of roughly equal size).
pub fn generate_semiprime(s: u32, rng: &mut dyn RngCore) -> Result<Semiprime> {
    if !(4..=63).contains(&s) {
        return Err(Error::Config(format!(
            "semiprime size must be in [4, 63] bits, got {s}"
        )));
    }

    let bits_p = s / 2;

    for attempt in 0..MAX_COMPOSITE_ATTEMPTS {
        let p = generate_prime(bits_p, rng)?;

        // Both widths can produce an s-bit product depending on where p and q
        // fall in their ranges; picking one at random covers the whole range.
        let mut options = [s - bits_p, 0];
        let mut n_options = 1usize;
        if s - bits_p + 1 < s {
            options[1] = s - bits_p + 1;
            n_options = 2;
        }
        let bits_q = options[rng.random_range(0..n_options)];

        let q = match generate_prime(bits_q, rng) {
            Ok(q) => q,
            Err(Error::GenerationExhausted { .. }) => continue,
            Err(e) => return Err(e),
        };

        if q == p {
            continue;
        }

        let product = p as u128 * q as u128;
        if product >> 64 != 0 {
            continue;
        }
        let n = product as u64;

        if bit_length(n) == s {
            return Ok(Semiprime { n, p, q });
        }
        trace!(attempt, p, q, n, "semiprime candidate missed target bit length");
    }

    Err(Error::GenerationExhausted {
        what: "semiprime",
        bits: s,
        attempts: MAX_COMPOSITE_ATTEMPTS,
    })
}

/// Generate a random composite integer with exactly `s` bits.
///
/// With `semiprime` set, delegates to [`generate_semiprime`] (s ≥ 4 required).
/// Otherwise rejection-samples any non-prime in [2^(s−1), 2^s − 1]. Note that
/// for s = 2 the range {2, 3} contains only primes, so the non-semiprime
/// sampler always exhausts its budget there.
pub fn generate_random_composite(s: u32, semiprime: bool, rng: &mut dyn RngCore) -> Result<u64> {
    if semiprime {
        return Ok(generate_semiprime(s, rng)?.n);
    }

    if !(2..=63).contains(&s) {
        return Err(Error::Config(format!(
            "composite size must be in [2, 63] bits, got {s}"
        )));
    }
    let min = 1u64 << (s - 1);
    let max = (1u64 << s) - 1;

    for _ in 0..MAX_COMPOSITE_ATTEMPTS {
        let n = rng.random_range(min..=max);
        if !is_prime(n) {
            return Ok(n);
        }
    }

    Err(Error::GenerationExhausted {
        what: "composite",
        bits: s,
        attempts: MAX_COMPOSITE_ATTEMPTS,
    })
}

/// Check that n = p·q and both factors are prime. Pure and total.
pub fn verify_semiprime(n: u64, p: u64, q: u64) -> bool {
    if p as u128 * q as u128 != n as u128 {
        return false;
    }
    is_prime(p) && is_prime(q)
}
