//! Criterion benchmarks for the chord driver on synthetic convex frontiers.
//! Frontier sizes: n in {10, 100, 1000}.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use pareto_chord::prelude::*;

/// Minimizes `w . x` over candidate points on the convex curve y = 1 / x;
/// every candidate is a supported Pareto point.
struct CurveOracle {
    points: Vec<Vec<f64>>,
}

impl WeightedSumOracle for CurveOracle {
    type Solution = usize;

    fn comb(&mut self, weights: &[f64]) -> pareto_chord::Result<PointAndSolution<usize>> {
        let mut best = 0;
        let mut best_value = f64::INFINITY;
        for (i, candidate) in self.points.iter().enumerate() {
            let value: f64 = weights.iter().zip(candidate).map(|(w, x)| w * x).sum();
            if value < best_value {
                best = i;
                best_value = value;
            }
        }
        Ok(PointAndSolution::new(
            Point::new(self.points[best].clone()),
            best,
            weights.to_vec(),
        ))
    }
}

fn curve_points(n: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let t = rng.gen_range(0.1..10.0);
            vec![t, 1.0 / t]
        })
        .collect()
}

fn bench_chord(c: &mut Criterion) {
    let mut group = c.benchmark_group("chord");
    for &n in &[10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::new("approximate", n), &n, |b, &n| {
            b.iter_batched(
                || CurveOracle {
                    points: curve_points(n, 17),
                },
                |mut oracle| {
                    let _res = approximate(&mut oracle, 2, 1e-3).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chord);
criterion_main!(benches);
