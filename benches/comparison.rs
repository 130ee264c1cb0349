//! All three policies over the reference workloads, through the simulator.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use evictsim::prelude::*;

fn workloads() -> Vec<(&'static str, usize, TraceSpec)> {
    vec![
        ("sequential", 50, TraceSpec::new(TraceKind::Sequential, 100_000)),
        ("hotspot", 100, TraceSpec::new(TraceKind::default(), 100_000)),
        (
            "cyclic",
            100,
            TraceSpec::new(TraceKind::Cyclic { working_set: 100 }, 100_000),
        ),
    ]
}

fn bench_policies_by_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("Policy Comparison");
    for (name, capacity, spec) in workloads() {
        let trace = spec.generate().unwrap();
        for &policy_type in PolicyType::all() {
            group.bench_with_input(
                BenchmarkId::new(policy_type.name(), name),
                &trace,
                |b, trace| {
                    b.iter(|| {
                        let mut policy = create_policy::<u64>(policy_type, capacity).unwrap();
                        Simulator::run_policy(policy.as_mut(), &trace[..]).stats
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_policies_by_workload);
criterion_main!(benches);
