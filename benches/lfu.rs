use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use evictsim::prelude::*;

/// Eviction scans every resident key, so cost grows with capacity.
fn bench_lfu_eviction_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_eviction");
    for &capacity in &[10usize, 100, 1_000] {
        group.bench_with_input(
            BenchmarkId::new("sequential", format!("cap{capacity}")),
            &capacity,
            |b, &capacity| {
                b.iter(|| {
                    let mut lfu = LfuPolicy::new(capacity).unwrap();
                    for key in 1..=10_000u64 {
                        let _ = lfu.access(key);
                    }
                    lfu.len()
                })
            },
        );
    }
    group.finish();
}

fn bench_lfu_access_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("lfu_patterns");
    let cache_size = 100;
    let data_size = 10_000u64;

    group.bench_function("hits_only", |b| {
        b.iter(|| {
            let mut lfu = LfuPolicy::new(cache_size).unwrap();
            for i in 0..data_size {
                let _ = lfu.access(i % cache_size as u64);
            }
            lfu.len()
        })
    });

    group.bench_function("working_set", |b| {
        let hot_keys = data_size / 100;
        b.iter(|| {
            let mut lfu = LfuPolicy::new(cache_size).unwrap();
            for i in 0..data_size {
                let key = if i % 5 < 4 { i % hot_keys } else { i };
                let _ = lfu.access(key);
            }
            lfu.len()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_lfu_eviction_scan, bench_lfu_access_patterns);
criterion_main!(benches);
