//! Benchmarks for balancing and controlled rounding

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use zonalfit::{
    balance_array, balance_matrix, discretize, ArrayBalanceOptions, ClosureCriteria,
    ControlledRoundingOptions, MatrixBalanceOptions, NdArray, ZoneMatrix, ZoneVector,
};

fn random_matrix(n: usize, seed: u64) -> ZoneMatrix<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|_| (0..n).map(|_| 0.1 + rng.random::<f64>()).collect())
        .collect();
    ZoneMatrix::from_vec2d(rows).unwrap()
}

fn random_array(shape: &[usize], scale: f64, seed: u64) -> NdArray<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let len: usize = shape.iter().product();
    let data = (0..len).map(|_| scale * rng.random::<f64>()).collect();
    NdArray::from_vec(shape, data).unwrap()
}

fn bench_matrix_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("balance_matrix");
    let options = MatrixBalanceOptions {
        closure: ClosureCriteria::new(100, 1e-6),
        ..Default::default()
    };

    for n in [50, 200, 500] {
        let targets: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || {
                    (
                        random_matrix(n, 42),
                        ZoneVector::sequential(targets.clone()),
                        ZoneVector::sequential(targets.iter().rev().copied().collect()),
                    )
                },
                |(seed, rows, cols)| balance_matrix(seed, rows, cols, &options).unwrap(),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_array_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("balance_array");
    let options = ArrayBalanceOptions::default();

    for shape in [vec![20, 20, 20], vec![10, 10, 10, 10], vec![50, 50, 8]] {
        let targets: Vec<Vec<f64>> = shape
            .iter()
            .map(|&n| (0..n).map(|i| 1000.0 / n as f64 + i as f64).collect())
            .collect();
        let label = format!("{shape:?}");
        group.bench_with_input(BenchmarkId::from_parameter(label), &shape, |b, shape| {
            b.iter_batched(
                || (random_array(shape, 1.0, 7), targets.clone()),
                |(seed, targets)| balance_array(seed, targets, &options).unwrap(),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_discretize(c: &mut Criterion) {
    let mut group = c.benchmark_group("discretize");
    let options = ControlledRoundingOptions::default();

    for shape in [vec![30, 30], vec![15, 15, 15]] {
        let label = format!("{shape:?}");
        group.bench_with_input(BenchmarkId::from_parameter(label), &shape, |b, shape| {
            b.iter_batched(
                || random_array(shape, 5.0, 11),
                |array| discretize(black_box(array), &options).unwrap(),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_matrix_balance,
    bench_array_balance,
    bench_discretize
);
criterion_main!(benches);
