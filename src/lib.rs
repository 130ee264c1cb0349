//! evictsim - a simulation harness for page-replacement policies.
//!
//! A fixed-capacity cache is modelled by one of three eviction policies
//! (FIFO, LRU, LFU). Feed it page ids with [`ReplacementPolicy::access`] and
//! it answers [`Access::Hit`] or [`Access::Miss`]; the [`simulator`] does that
//! over generated [`trace`]s and reports hit/miss counts and elapsed time.
//!
//! # Quick Start
//! ```
//! use evictsim::prelude::*;
//!
//! let mut lru = LruPolicy::new(2).unwrap();
//! assert_eq!(lru.access("a"), Access::Miss);
//! assert_eq!(lru.access("b"), Access::Miss);
//! assert_eq!(lru.access("a"), Access::Hit);
//! lru.access("c"); // evicts "b"
//! assert!(!lru.contains(&"b"));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// Exported modules of the crate
pub mod config;
pub mod error;
pub mod policies;
pub mod simulator;
pub mod trace;

pub use error::{PolicyError, Result};

/// Outcome of a single access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Access {
    /// The key was already resident.
    Hit,
    /// The key was absent and has been admitted, possibly evicting another.
    Miss,
}

impl Access {
    pub fn is_hit(self) -> bool {
        self == Access::Hit
    }

    pub fn is_miss(self) -> bool {
        self == Access::Miss
    }
}

/// Core trait defining replacement policy behaviour.
///
/// Implementations track which keys are resident in a cache of fixed
/// capacity and decide which one to evict when a new key must be admitted.
/// The trait is object safe so a driver can hold `Box<dyn ReplacementPolicy<K>>`.
pub trait ReplacementPolicy<K> {
    /// Access `key`, admitting it on a miss. Never fails.
    fn access(&mut self, key: K) -> Access;

    /// Whether `key` is currently resident. Does not touch policy metadata.
    fn contains(&self, key: &K) -> bool;

    /// Number of resident keys
    fn len(&self) -> usize;

    /// Check if no key is resident
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of simultaneously resident keys
    fn capacity(&self) -> usize;

    /// The key the next miss would evict if the cache were full.
    fn victim(&self) -> Option<&K>;

    /// Drop every resident key, keeping the capacity.
    fn clear(&mut self);

    /// Which policy this is
    fn policy_type(&self) -> policies::PolicyType;
}

/// Hit/miss counters for a run of accesses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessStats {
    pub hits: u64,
    pub misses: u64,
}

impl AccessStats {
    /// Count one access outcome
    pub fn record(&mut self, access: Access) {
        match access {
            Access::Hit => self.hits += 1,
            Access::Miss => self.misses += 1,
        }
    }

    /// Total number of recorded accesses
    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }

    /// Ratio of hits to total accesses (0.0 when nothing was recorded)
    pub fn hit_ratio(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.hits as f64 / self.total() as f64
        }
    }

    /// Reset all counters to zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for AccessStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hits = {}, Misses = {}, Hit ratio = {:.2}%",
            self.hits,
            self.misses,
            self.hit_ratio() * 100.0
        )
    }
}

// Convenient re-exports for common types and modules
pub mod prelude {
    pub use super::policies::{FifoPolicy, LfuPolicy, LruPolicy, PolicyType, create_policy};
    pub use super::simulator::{PolicyResult, SimulationReport, Simulator};
    pub use super::trace::{TraceKind, TraceSpec};
    pub use super::{Access, AccessStats, PolicyError, ReplacementPolicy};
}
