//! Throughput of the labeling, enrichment and parsing hot paths.
//!
//! Run with: `cargo bench --package shiftlabel-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use shiftlabel_bench::{synthetic_bars, synthetic_csv, synthetic_table};
use shiftlabel_lib::prelude::*;
use shiftlabel_lib::propagate;
use std::hint::black_box;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn label_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("label");

    for size in SIZES {
        let bars = synthetic_bars(size, 42);
        group.throughput(Throughput::Elements(size as u64));

        for shift_hours in [4, 24] {
            let labeler = Labeler::new(LabelConfig::new(1.0, shift_hours).unwrap());
            group.bench_with_input(
                BenchmarkId::new(format!("shift_{shift_hours}"), size),
                &bars,
                |b, bars| b.iter(|| labeler.label(black_box(bars))),
            );
        }
    }

    group.finish();
}

fn propagate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagate");

    // Alternating anomalies give every bar the maximum number of candidates.
    let size = 100_000;
    let labels: Vec<Label> = (0..size)
        .map(|i| match i % 3 {
            0 => Label::UpwardAnomaly,
            1 => Label::Stable,
            _ => Label::DownwardAnomaly,
        })
        .collect();
    group.throughput(Throughput::Elements(size as u64));

    for shift_hours in [4, 48] {
        group.bench_with_input(
            BenchmarkId::new("dense", shift_hours),
            &labels,
            |b, labels| b.iter(|| propagate(black_box(labels), shift_hours)),
        );
    }

    group.finish();
}

fn enrich_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("enrich");
    group.sample_size(20);

    let config = IndicatorConfig::default();
    for size in [1_000, 10_000] {
        let table = synthetic_table(size, 7);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("default", size), &table, |b, table| {
            b.iter(|| enrich(black_box(table), &config).unwrap());
        });
    }

    group.finish();
}

fn read_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_bars");

    let csv = synthetic_csv(10_000, 3);
    group.throughput(Throughput::Bytes(csv.len() as u64));
    group.bench_function("10k", |b| {
        b.iter(|| read_bars(black_box(csv.as_bytes())).unwrap());
    });

    group.finish();
}

criterion_group!(
    benches,
    label_benchmark,
    propagate_benchmark,
    enrich_benchmark,
    read_benchmark
);
criterion_main!(benches);
