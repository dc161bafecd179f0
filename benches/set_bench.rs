//! Set construction and query benchmarks.
//!
//! Compares batch construction with element-by-element insertion for the
//! insertion-ordered and sorted variants, and measures lookups on records.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use structural_sets::prelude::*;

const SIZES: [i64; 3] = [100, 1000, 5000];

/// Half of the generated values are duplicates.
fn generate_values(size: i64) -> Vec<Value> {
    (0..size).map(|index| Value::from(index / 2)).collect()
}

fn generate_records(size: i64) -> Vec<Value> {
    (0..size)
        .map(|index| {
            Value::from(
                Record::new()
                    .with("id", index)
                    .with("name", format!("record {index}"))
                    .with("tags", ["a", "b"]),
            )
        })
        .collect()
}

fn batch_size_for(size: i64) -> BatchSize {
    if size < 1000 {
        BatchSize::SmallInput
    } else {
        BatchSize::LargeInput
    }
}

fn benchmark_set_construction(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("set_construction");

    for size in SIZES {
        let base = generate_values(size);
        group.bench_with_input(BenchmarkId::new("add_all", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || base.clone(),
                |values| black_box(Set::from_values(black_box(values))),
                batch_size_for(size),
            );
        });
        group.bench_with_input(BenchmarkId::new("add", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || base.clone(),
                |values| {
                    let mut set = Set::new();
                    for value in values {
                        let _ = set.add(value);
                    }
                    black_box(set)
                },
                batch_size_for(size),
            );
        });
    }

    group.finish();
}

fn benchmark_sorted_construction(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("sorted_set_construction");

    for size in &SIZES[..2] {
        let size = *size;
        let mut base = generate_values(size);
        base.reverse();
        group.bench_with_input(BenchmarkId::new("add_all", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || base.clone(),
                |values| black_box(SortedSet::from_values(black_box(values))),
                batch_size_for(size),
            );
        });
        group.bench_with_input(BenchmarkId::new("add", size), &size, |bencher, &size| {
            bencher.iter_batched(
                || base.clone(),
                |values| {
                    let mut set = SortedSet::new();
                    for value in values {
                        let _ = set.add(value);
                    }
                    black_box(set)
                },
                batch_size_for(size),
            );
        });
    }

    group.finish();
}

fn benchmark_record_queries(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("record_queries");

    for size in SIZES {
        let records = generate_records(size);
        let set = Set::from_values(records.iter().cloned()).unwrap_or_default();
        let needle = records[records.len() / 2].clone();

        group.bench_with_input(BenchmarkId::new("contains", size), &size, |bencher, _| {
            bencher.iter(|| black_box(set.contains(black_box(&needle))));
        });
        group.bench_with_input(BenchmarkId::new("index_of_scalar", size), &size, |bencher, _| {
            let scalars = Set::from_values(generate_values(size)).unwrap_or_default();
            let target = Value::from(size / 4);
            bencher.iter(|| black_box(scalars.index_of(black_box(&target))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_set_construction,
    benchmark_sorted_construction,
    benchmark_record_queries
);

criterion_main!(benches);
