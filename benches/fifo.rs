use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use evictsim::prelude::*;

/// Benchmarks FIFO on streaming data, its best case: no reuse, constant eviction
fn bench_fifo_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("FIFO Streaming");
    for &capacity in &[50usize, 500, 5_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                b.iter(|| {
                    let mut fifo = FifoPolicy::new(capacity).unwrap();
                    for key in 1..=100_000u64 {
                        let _ = fifo.access(key);
                    }
                    fifo.len()
                })
            },
        );
    }
    group.finish();
}

/// Benchmarks FIFO with different access patterns
fn bench_fifo_access_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("FIFO Access Patterns");
    let cache_size = 200;
    let data_size = 10_000u64;

    group.bench_function("cyclic", |b| {
        b.iter(|| {
            let mut fifo = FifoPolicy::new(cache_size).unwrap();
            for i in 0..data_size {
                let _ = fifo.access(i % 250);
            }
            fifo.len()
        })
    });

    group.bench_function("strided", |b| {
        b.iter(|| {
            let mut fifo = FifoPolicy::new(cache_size).unwrap();
            for i in 0..data_size {
                let _ = fifo.access((i * 17) % (data_size / 10));
            }
            fifo.len()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_fifo_streaming, bench_fifo_access_patterns);
criterion_main!(benches);
