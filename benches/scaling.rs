//! Benchmarks for pixel-bar scaling and card pinning

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use propdash::pixel::pixel_columns;
use propdash::{DataPoint, Dataset, PinSet, PixelScaler, Series};
use std::hint::black_box;

const STACKED: [Series; 2] = [Series::Sales, Series::Rentals];

fn synthetic_dataset(len: u32) -> Dataset {
    let points = (0..len)
        .map(|idx| {
            let day = f64::from(idx);
            DataPoint::new(
                &format!("Day {idx}"),
                0.001 + (day % 7.0) * 0.0005,
                60.0 + (day * 13.0) % 190.0,
                40.0 + (day * 7.0) % 110.0,
                0.1 + (day % 10.0) * 0.015,
            )
        })
        .collect();
    Dataset::new(points).expect("synthetic dataset is valid")
}

fn bench_pixel_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("pixel_columns");

    for len in [7_u32, 365, 10_000] {
        let dataset = synthetic_dataset(len);
        let scaler = PixelScaler::for_series(&dataset, &STACKED, 20).expect("scalable");
        group.throughput(Throughput::Elements(u64::from(len)));
        group.bench_with_input(BenchmarkId::new("build", len), &dataset, |b, dataset| {
            b.iter(|| pixel_columns(black_box(dataset), &STACKED, &scaler))
        });
    }

    group.finish();
}

fn bench_scaler(c: &mut Criterion) {
    let dataset = synthetic_dataset(365);
    c.bench_function("scaler_for_series", |b| {
        b.iter(|| PixelScaler::for_series(black_box(&dataset), &STACKED, 20))
    });
    c.bench_function("axis_ticks", |b| {
        let scaler = PixelScaler::new(250.0, 20).expect("valid scaler");
        b.iter(|| black_box(scaler).axis_ticks())
    });
}

fn bench_pin_ordering(c: &mut Criterion) {
    let cards: Vec<usize> = (0..64).collect();
    let mut pins = PinSet::new();
    pins.extend([3, 17, 42, 63, 8]);

    c.bench_function("pinned_first_64", |b| {
        b.iter(|| black_box(&pins).pinned_first(black_box(&cards)))
    });
}

criterion_group!(benches, bench_pixel_columns, bench_scaler, bench_pin_ordering);
criterion_main!(benches);
