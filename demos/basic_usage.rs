use evictsim::prelude::*;

fn main() {
    println!("=== evictsim Demo ===\n");

    // Demo 1: The same short trace against each policy
    demo_policy_differences();

    // Demo 2: The reference workloads through the simulator
    demo_reference_workloads();
}

/// Shows where FIFO, LRU and LFU pick different victims
fn demo_policy_differences() {
    println!("1. Policy Differences (capacity 2)");
    println!("----------------------------------");

    let trace = ["A", "B", "A", "A", "C", "B"];
    println!("Trace: {trace:?}");

    for &policy_type in PolicyType::all() {
        let mut policy = create_policy::<&str>(policy_type, 2).expect("capacity is non-zero");
        let results: Vec<&str> = trace
            .iter()
            .map(|&key| if policy.access(key).is_hit() { "hit" } else { "miss" })
            .collect();
        println!("  {:<4} {:?}", policy_type.name(), results);
    }

    println!();
}

/// Runs the three reference workloads and prints hits, misses and time
fn demo_reference_workloads() {
    println!("2. Reference Workloads");
    println!("----------------------");

    let workloads = [
        (50, TraceSpec::new(TraceKind::Sequential, 1_000_000)),
        (100, TraceSpec::new(TraceKind::default(), 1_000_000)),
        (100, TraceSpec::new(TraceKind::Cyclic { working_set: 100 }, 1_000_000)),
    ];

    for (capacity, trace) in workloads {
        let config = evictsim::config::SimulationConfig {
            capacity,
            trace,
            policies: PolicyType::all().to_vec(),
        };
        match Simulator::new(config).and_then(|sim| sim.run()) {
            Ok(report) => println!("{report}"),
            Err(e) => eprintln!("simulation failed: {e}"),
        }
    }
}
