//! Benchmarks for factorization and exact rational arithmetic.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use surd::prelude::*;

/// Rationals with denominators that share some primes and not others.
fn sample_rationals(count: i64) -> Vec<RationalNumber> {
    (1..=count)
        .map(|i| RationalNumber::new((i * 7919) % 1000 - 500, i * 6 + 1).unwrap())
        .collect()
}

fn bench_factorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("factorize");

    let inputs: [(&str, u64); 4] = [
        ("smooth", 2 * 2 * 3 * 5 * 7 * 11 * 13 * 17 * 19 * 23),
        ("table_prime", 65_521),
        ("beyond_table", 1_000_003 * 2),
        ("semiprime", 1_000_003 * 999_983),
    ];
    for (name, n) in inputs {
        group.bench_with_input(BenchmarkId::new("default", name), &n, |b, &n| {
            b.iter(|| black_box(surd::integers::factorize_u64(n).unwrap()));
        });
    }

    group.finish();
}

fn bench_rational_arith(c: &mut Criterion) {
    let mut group = c.benchmark_group("rational");

    for size in [8, 32, 128] {
        let values = sample_rationals(size);

        group.bench_with_input(BenchmarkId::new("sum", size), &values, |b, values| {
            b.iter(|| black_box(RationalNumber::checked_sum(values).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("product", size), &values, |b, values| {
            b.iter(|| {
                let product = values
                    .iter()
                    .filter(|v| !v.is_zero())
                    .try_fold(RationalNumber::one(), |acc, v| acc.checked_mul(v))
                    .unwrap();
                black_box(product)
            });
        });
    }

    group.finish();
}

fn bench_radicals(c: &mut Criterion) {
    let mut group = c.benchmark_group("radical");

    let a: RealValue = "2^(1/2) + 3^(1/3) + 5".parse().unwrap();
    group.bench_function("square_three_terms", |b| {
        b.iter(|| black_box(a.pow_int(2).unwrap()));
    });

    let term: RadicalTerm = "6*2^(1/2)*3^(2/3)".parse().unwrap();
    let exponent = RationalNumber::new(3, 5).unwrap();
    group.bench_function("pow_rational", |b| {
        b.iter(|| black_box(term.pow_rational(&exponent).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_factorize, bench_rational_arith, bench_radicals);
criterion_main!(benches);
