use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smosvm::{
    Kernel, LinearKernel, PolynomialKernel, RBFKernel, SMOConfig, SVMOptimizer, TrainingSet,
};

/// Two noisy clusters centred at +offset and -offset in every dimension
fn generate_dataset(n_per_class: usize, n_features: usize, rng: &mut impl Rng) -> TrainingSet {
    let offset = 1.5;
    let mut features: Vec<Vec<f64>> = Vec::with_capacity(2 * n_per_class);
    let mut labels = Vec::with_capacity(2 * n_per_class);

    for _ in 0..n_per_class {
        for (sign, label) in [(1.0, 1.0), (-1.0, -1.0)] {
            features.push(
                (0..n_features)
                    .map(|_| sign * offset + rng.gen_range(-1.0..1.0))
                    .collect(),
            );
            labels.push(label);
        }
    }

    TrainingSet::new(features, labels).expect("generated dataset is valid")
}

fn fit_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("smo_fit");
    let mut rng = SmallRng::seed_from_u64(40);
    let config = SMOConfig {
        c: 1.0,
        tolerance: 1e-3,
        max_passes: 5,
        seed: Some(42),
    };

    for n_per_class in [10, 50, 100] {
        let dataset = generate_dataset(n_per_class, 4, &mut rng);

        group.bench_with_input(
            BenchmarkId::new("linear", 2 * n_per_class),
            &dataset,
            |bencher, dataset| {
                let optimizer = SVMOptimizer::new(LinearKernel::new(), config.clone());
                bencher.iter(|| black_box(optimizer.fit(dataset).expect("fit succeeds")));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("rbf", 2 * n_per_class),
            &dataset,
            |bencher, dataset| {
                let optimizer = SVMOptimizer::new(RBFKernel::new(0.25), config.clone());
                bencher.iter(|| black_box(optimizer.fit(dataset).expect("fit succeeds")));
            },
        );
    }

    group.finish();
}

fn kernel_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel_compute");
    let mut rng = SmallRng::seed_from_u64(7);

    for dim in [2, 32, 512] {
        let x: Vec<f64> = (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let y: Vec<f64> = (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect();

        let linear = LinearKernel::new();
        let poly = PolynomialKernel::new(3, 1.0 / dim as f64, 1.0);
        let rbf = RBFKernel::with_auto_gamma(dim);

        group.bench_with_input(BenchmarkId::new("linear", dim), &dim, |b, _| {
            b.iter(|| linear.compute(black_box(&x), black_box(&y)))
        });
        group.bench_with_input(BenchmarkId::new("polynomial", dim), &dim, |b, _| {
            b.iter(|| poly.compute(black_box(&x), black_box(&y)))
        });
        group.bench_with_input(BenchmarkId::new("rbf", dim), &dim, |b, _| {
            b.iter(|| rbf.compute(black_box(&x), black_box(&y)))
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = fit_bench, kernel_bench
}
criterion_main!(benches);
