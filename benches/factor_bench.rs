use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use factorbench::numbers::{generate_semiprime, is_prime, pow_mod};
use factorbench::{ClassicalFactorizer, Factorizer};

fn bench_trial_division_semiprime(c: &mut Criterion) {
    // 499 * 997 — both factors found by trial division
    let alg = ClassicalFactorizer::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    c.bench_function("classical_factor(499*997)", |b| {
        b.iter(|| alg.factor(black_box(499 * 997), &mut rng, None).unwrap());
    });
}

fn bench_pollard_rho_semiprime(c: &mut Criterion) {
    // Two ~20-bit primes — forces the Pollard's rho path
    let alg = ClassicalFactorizer::new();
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let n = 1_000_003u64 * 1_000_033;
    c.bench_function("classical_factor(1000003*1000033)", |b| {
        b.iter(|| alg.factor(black_box(n), &mut rng, None).unwrap());
    });
}

fn bench_is_prime_large(c: &mut Criterion) {
    c.bench_function("is_prime(1000003)", |b| {
        b.iter(|| is_prime(black_box(1_000_003)));
    });
}

fn bench_pow_mod(c: &mut Criterion) {
    let p = (1u64 << 62) - 57;
    c.bench_function("pow_mod(3, p-1, p)", |b| {
        b.iter(|| pow_mod(black_box(3), black_box(p - 1), black_box(p)));
    });
}

fn bench_generate_semiprime_16bit(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    c.bench_function("generate_semiprime(16)", |b| {
        b.iter(|| generate_semiprime(black_box(16), &mut rng).unwrap());
    });
}

criterion_group!(
    benches,
    bench_trial_division_semiprime,
    bench_pollard_rho_semiprime,
    bench_is_prime_large,
    bench_pow_mod,
    bench_generate_semiprime_16bit,
);
criterion_main!(benches);
