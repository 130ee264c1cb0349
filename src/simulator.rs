//! Drives policies over a trace and tallies the outcome.
//!
//! The simulator only uses the public [`ReplacementPolicy`] interface: one
//! `access` call per trace entry, hits and misses counted as they come back.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::policies::{PolicyType, create_policy};
use crate::trace::TraceSpec;
use crate::{AccessStats, ReplacementPolicy, Result};

/// Outcome of running one policy over one trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyResult {
    pub policy: PolicyType,
    pub capacity: usize,
    #[serde(flatten)]
    pub stats: AccessStats,
    /// Wall-clock time spent in `access` calls, in seconds
    pub elapsed_secs: f64,
}

impl PolicyResult {
    pub fn hits(&self) -> u64 {
        self.stats.hits
    }

    pub fn misses(&self) -> u64 {
        self.stats.misses
    }

    pub fn hit_ratio(&self) -> f64 {
        self.stats.hit_ratio()
    }
}

impl fmt::Display for PolicyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<4}: Hits = {}, Misses = {}, Time = {:.6} seconds",
            self.policy.name(),
            self.stats.hits,
            self.stats.misses,
            self.elapsed_secs
        )
    }
}

/// Results of every configured policy over the same trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub trace: TraceSpec,
    pub capacity: usize,
    pub results: Vec<PolicyResult>,
}

impl SimulationReport {
    /// Result for `policy`, if it was part of the run
    pub fn result(&self, policy: PolicyType) -> Option<&PolicyResult> {
        self.results.iter().find(|r| r.policy == policy)
    }

    /// Policy with the highest hit ratio; earlier entries win ties.
    pub fn best(&self) -> Option<&PolicyResult> {
        self.results.iter().reduce(|best, r| {
            if r.hit_ratio() > best.hit_ratio() { r } else { best }
        })
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trace: {}, capacity {}", self.trace, self.capacity)?;
        for result in &self.results {
            writeln!(f, "{result}")?;
        }
        Ok(())
    }
}

/// Runs the policies named in a [`SimulationConfig`].
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    /// Validates the configuration up front so `run` only fails on trace generation.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Feed `trace` to `policy` and count hits and misses.
    pub fn run_policy<K, P>(policy: &mut P, trace: &[K]) -> PolicyResult
    where
        K: Clone,
        P: ReplacementPolicy<K> + ?Sized,
    {
        let mut stats = AccessStats::default();
        let start = Instant::now();
        for key in trace {
            stats.record(policy.access(key.clone()));
        }
        let elapsed = start.elapsed();

        debug!(
            policy = policy.policy_type().name(),
            hits = stats.hits,
            misses = stats.misses,
            elapsed_us = elapsed.as_micros() as u64,
            "policy run finished"
        );
        PolicyResult {
            policy: policy.policy_type(),
            capacity: policy.capacity(),
            stats,
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }

    /// Generate the trace once and run each policy on a fresh instance.
    pub fn run(&self) -> Result<SimulationReport> {
        let trace = self.config.trace.generate()?;
        info!(
            trace = %self.config.trace,
            capacity = self.config.capacity,
            policies = self.config.policies.len(),
            "starting simulation"
        );
        self.run_trace(&trace)
    }

    /// Run each configured policy over an existing trace.
    pub fn run_trace(&self, trace: &[u64]) -> Result<SimulationReport> {
        let mut results = Vec::with_capacity(self.config.policies.len());
        for &policy_type in &self.config.policies {
            let mut policy = create_policy::<u64>(policy_type, self.config.capacity)?;
            results.push(Self::run_policy(policy.as_mut(), trace));
        }
        Ok(SimulationReport {
            trace: self.config.trace,
            capacity: self.config.capacity,
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::{FifoPolicy, LruPolicy};
    use crate::trace::TraceKind;

    fn config(capacity: usize, trace: TraceSpec) -> SimulationConfig {
        SimulationConfig {
            capacity,
            trace,
            policies: PolicyType::all().to_vec(),
        }
    }

    #[test]
    fn test_run_policy_counts() {
        let mut fifo = FifoPolicy::<i32>::new(2).unwrap();
        let result = Simulator::run_policy(&mut fifo, &[1, 2, 3, 1]);
        assert_eq!(result.policy, PolicyType::Fifo);
        assert_eq!(result.hits(), 0);
        assert_eq!(result.misses(), 4);
        assert!(result.elapsed_secs >= 0.0);
    }

    #[test]
    fn test_run_policy_empty_trace() {
        let mut lru = LruPolicy::<u64>::new(4).unwrap();
        let result = Simulator::run_policy(&mut lru, &[]);
        assert_eq!(result.stats.total(), 0);
        assert_eq!(result.hit_ratio(), 0.0);
    }

    #[test]
    fn test_sequential_trace_never_hits() {
        let sim = Simulator::new(config(50, TraceSpec::new(TraceKind::Sequential, 10_000))).unwrap();
        let report = sim.run().unwrap();
        assert_eq!(report.results.len(), 3);
        for result in &report.results {
            assert_eq!(result.hits(), 0);
            assert_eq!(result.misses(), 10_000);
        }
    }

    #[test]
    fn test_cyclic_trace_fits_in_cache() {
        // Working set equals capacity: only the first pass misses.
        let trace = TraceSpec::new(TraceKind::Cyclic { working_set: 100 }, 10_000);
        let report = Simulator::new(config(100, trace)).unwrap().run().unwrap();
        for result in &report.results {
            assert_eq!(result.misses(), 100);
            assert_eq!(result.hits(), 9_900);
        }
    }

    #[test]
    fn test_cyclic_trace_thrashes_fifo_and_lru() {
        // One page more than capacity defeats FIFO and LRU completely.
        let trace = TraceSpec::new(TraceKind::Cyclic { working_set: 11 }, 1_100);
        let report = Simulator::new(config(10, trace)).unwrap().run().unwrap();
        assert_eq!(report.result(PolicyType::Fifo).unwrap().hits(), 0);
        assert_eq!(report.result(PolicyType::Lru).unwrap().hits(), 0);
    }

    #[test]
    fn test_report_is_deterministic() {
        let sim = Simulator::new(config(20, TraceSpec::new(TraceKind::default(), 5_000))).unwrap();
        let first = sim.run().unwrap();
        let second = sim.run().unwrap();
        for (a, b) in first.results.iter().zip(&second.results) {
            assert_eq!(a.stats, b.stats);
        }
    }

    #[test]
    fn test_report_display_and_json() {
        let sim = Simulator::new(config(2, TraceSpec::new(TraceKind::Sequential, 4))).unwrap();
        let report = sim.run().unwrap();

        let text = report.to_string();
        assert!(text.contains("FIFO: Hits = 0, Misses = 4"));
        assert!(text.contains("LFU : Hits = 0, Misses = 4"));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"policy\":\"lru\""));
        assert!(json.contains("\"misses\":4"));
    }

    #[test]
    fn test_best_policy() {
        let trace = TraceSpec::new(TraceKind::default(), 20_000);
        let report = Simulator::new(config(10, trace)).unwrap().run().unwrap();
        let best = report.best().unwrap();
        assert!(report.results.iter().all(|r| r.hit_ratio() <= best.hit_ratio()));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut cfg = SimulationConfig::default();
        cfg.capacity = 0;
        assert!(Simulator::new(cfg).is_err());
    }
}
