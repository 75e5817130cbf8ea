//! Performance benchmarks for genomic-regions
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use genomic_regions::{Region, RegionCollection};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random regions over `chroms` chromosomes of 10 Mb each
fn random_regions(n: usize, chroms: u32, seed: u64) -> RegionCollection {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let chrom = rng.gen_range(0..chroms);
            let start = rng.gen_range(0..10_000_000);
            let len = rng.gen_range(0..2_000);
            Region::new(chrom, start, start + len).unwrap()
        })
        .collect()
}

/// Benchmark index construction
fn bench_build_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_index");

    for size in [1_000usize, 10_000, 100_000].iter() {
        let regions = random_regions(*size, 24, 1);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &regions, |b, regions| {
            b.iter(|| {
                let mut copy = regions.clone();
                copy.build_index();
                black_box(copy)
            })
        });
    }

    group.finish();
}

/// Benchmark single-region overlap counting
fn bench_find_overlapping(c: &mut Criterion) {
    let mut subject = random_regions(100_000, 24, 2);
    subject.build_index();
    let query = Region::new(3, 5_000_000, 5_010_000).unwrap();

    c.bench_function("find_overlapping", |b| {
        b.iter(|| black_box(subject.find_overlapping(black_box(&query)).unwrap()))
    });
}

/// Benchmark collection-against-collection joins
fn bench_find_overlaps(c: &mut Criterion) {
    let mut subject = random_regions(100_000, 24, 3);
    subject.build_index();

    let mut group = c.benchmark_group("find_overlaps");
    for size in [100usize, 1_000, 10_000].iter() {
        let queries = random_regions(*size, 24, 4);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &queries, |b, queries| {
            b.iter(|| black_box(queries.find_overlaps(&subject, true).unwrap()))
        });
    }
    group.finish();
}

/// Benchmark merging
fn bench_merge(c: &mut Criterion) {
    let regions = random_regions(100_000, 24, 5);

    c.bench_function("merge_overlapping_intervals", |b| {
        b.iter(|| {
            let mut copy = regions.clone();
            copy.merge_overlapping_intervals();
            black_box(copy)
        })
    });
}

criterion_group!(
    benches,
    bench_build_index,
    bench_find_overlapping,
    bench_find_overlaps,
    bench_merge,
);
criterion_main!(benches);
