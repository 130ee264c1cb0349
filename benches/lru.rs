use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use evictsim::prelude::*;

/// Bench: hits only, every key stays resident
fn bench_hits(c: &mut Criterion) {
    let mut group = c.benchmark_group("LRU Hits");
    for &size in &[100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut lru = LruPolicy::new(size).unwrap();
            for i in 0..size as u64 {
                lru.access(i);
            }
            b.iter(|| {
                for i in 0..size as u64 {
                    let _ = lru.access(i);
                }
                lru.len()
            })
        });
    }
    group.finish();
}

/// Bench: misses only, each access evicts the least recent key
fn bench_eviction(c: &mut Criterion) {
    let mut group = c.benchmark_group("LRU Eviction");
    for &(capacity, data_size) in &[(100usize, 1_000u64), (1_000, 10_000), (10_000, 100_000)] {
        group.bench_with_input(
            BenchmarkId::new("sequential", format!("cap{capacity}_data{data_size}")),
            &(capacity, data_size),
            |b, &(capacity, data_size)| {
                b.iter(|| {
                    let mut lru = LruPolicy::new(capacity).unwrap();
                    for key in 1..=data_size {
                        let _ = lru.access(key);
                    }
                    lru.len()
                })
            },
        );
    }
    group.finish();
}

/// Bench: hot working set interleaved with cold keys
fn bench_working_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("LRU Working Set");
    let capacity = 200;
    let data_size = 10_000u64;
    let hot_keys = 150;

    group.bench_function("hot_150_of_200", |b| {
        b.iter(|| {
            let mut lru = LruPolicy::new(capacity).unwrap();
            for i in 0..data_size {
                let key = if i % 5 < 4 { i % hot_keys } else { i };
                let _ = lru.access(key);
            }
            lru.len()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_hits, bench_eviction, bench_working_set);
criterion_main!(benches);
