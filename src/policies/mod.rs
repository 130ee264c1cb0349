//! Replacement policy implementations
//!
//! This module contains the eviction policies that implement the
//! `ReplacementPolicy` trait. Each policy keeps only the bookkeeping it needs
//! to pick a victim; none of them store values.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PolicyError, ReplacementPolicy, Result};

pub mod fifo;
pub mod lfu;
pub mod lru;

// Re-export all policy implementations
pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;

/// Enumeration of available policy types
///
/// Allows runtime selection of a policy, which is what the simulator and the
/// command line use to run the same trace against several strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyType {
    /// First In, First Out - evicts keys in the order they were admitted
    Fifo,
    /// Least Recently Used - evicts the key accessed longest ago
    Lru,
    /// Least Frequently Used - evicts the key with the lowest access count
    Lfu,
}

impl PolicyType {
    /// Returns a human-readable name for the policy
    pub fn name(&self) -> &'static str {
        match self {
            PolicyType::Fifo => "FIFO",
            PolicyType::Lru => "LRU",
            PolicyType::Lfu => "LFU",
        }
    }

    /// Returns a description of the policy's behavior
    pub fn description(&self) -> &'static str {
        match self {
            PolicyType::Fifo => "Evicts items in first-in-first-out order",
            PolicyType::Lru => "Evicts the least recently used item",
            PolicyType::Lfu => "Evicts the least frequently used item, oldest first on ties",
        }
    }

    /// Returns all available policy types
    pub fn all() -> &'static [PolicyType] {
        &[PolicyType::Fifo, PolicyType::Lru, PolicyType::Lfu]
    }

    /// Returns performance characteristics of this policy
    pub fn characteristics(&self) -> PolicyCharacteristics {
        match self {
            PolicyType::Fifo => PolicyCharacteristics {
                hit_complexity: "O(1)",
                miss_complexity: "O(1)",
                temporal_locality: false,
                frequency_aware: false,
            },
            PolicyType::Lru => PolicyCharacteristics {
                hit_complexity: "O(1)",
                miss_complexity: "O(1)",
                temporal_locality: true,
                frequency_aware: false,
            },
            PolicyType::Lfu => PolicyCharacteristics {
                hit_complexity: "O(1)",
                miss_complexity: "O(capacity)",
                temporal_locality: false,
                frequency_aware: true,
            },
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyType {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(PolicyType::Fifo),
            "lru" => Ok(PolicyType::Lru),
            "lfu" => Ok(PolicyType::Lfu),
            other => Err(PolicyError::invalid(
                "policy",
                format!("unknown policy '{other}' (expected fifo, lru or lfu)"),
            )),
        }
    }
}

/// Factory function to create policies dynamically
///
/// Fails with `InvalidConfiguration` when `capacity` is 0.
pub fn create_policy<K>(
    policy_type: PolicyType,
    capacity: usize,
) -> Result<Box<dyn ReplacementPolicy<K>>>
where
    K: Hash + Eq + Clone + 'static,
{
    Ok(match policy_type {
        PolicyType::Fifo => Box::new(FifoPolicy::new(capacity)?),
        PolicyType::Lru => Box::new(LruPolicy::new(capacity)?),
        PolicyType::Lfu => Box::new(LfuPolicy::new(capacity)?),
    })
}

/// Performance characteristics of a policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyCharacteristics {
    pub hit_complexity: &'static str,
    pub miss_complexity: &'static str,
    pub temporal_locality: bool,
    pub frequency_aware: bool,
}
