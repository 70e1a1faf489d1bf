//! Benchmarks for XP curve inversion and drop resolution.
//!
//! Run with: cargo bench --package pixelcraft-catalog --bench progression_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pixelcraft_catalog::{DropEntry, DropRoller, ProgressionConfig, ProgressionCurve};

fn curve(max_level: u32) -> ProgressionCurve {
    ProgressionCurve::new(ProgressionConfig {
        max_level,
        ..ProgressionConfig::default()
    })
    .expect("valid curve")
}

fn benchmark_level_from_exp(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_from_exp");

    for max_level in [100u32, 1_000, 10_000] {
        let curve = curve(max_level);
        let top = curve.total_exp_for_level(max_level);
        let samples: Vec<u64> = (0..1_000u64).map(|i| top / 1_000 * i).collect();
        group.throughput(Throughput::Elements(samples.len() as u64));

        group.bench_with_input(BenchmarkId::new("binary", max_level), &samples, |b, samples| {
            b.iter(|| {
                for &exp in samples {
                    black_box(curve.level_from_exp(black_box(exp)));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("linear", max_level), &samples, |b, samples| {
            b.iter(|| {
                for &exp in samples {
                    black_box(curve.level_from_exp_linear(black_box(exp)));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_curve_build(c: &mut Criterion) {
    c.bench_function("curve_build_1000", |b| {
        b.iter(|| black_box(curve(black_box(1_000))));
    });
}

fn benchmark_drop_roll(c: &mut Criterion) {
    let table = vec![
        DropEntry::new("stone", 70).amount(1, 3),
        DropEntry::new("flint", 20),
        DropEntry::new("iron_ore", 8),
        DropEntry::new("gem", 2),
    ];
    let mut roller = DropRoller::with_seed(42);

    c.bench_function("single_drop_roll", |b| {
        b.iter(|| black_box(roller.roll(black_box(&table))));
    });
}

criterion_group!(
    benches,
    benchmark_level_from_exp,
    benchmark_curve_build,
    benchmark_drop_roll
);
criterion_main!(benches);
