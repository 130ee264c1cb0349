use std::collections::HashMap;
use std::hash::Hash;

use tracing::trace;

use super::PolicyType;
use crate::error::check_capacity;
use crate::{Access, PolicyError, ReplacementPolicy, Result};

/// Per-key bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LfuEntry {
    /// Accesses since admission, including the admitting one
    frequency: u64,
    /// Admission order; breaks frequency ties
    sequence: u64,
}

impl LfuEntry {
    /// Eviction rank: lowest frequency first, then earliest admitted.
    fn rank(&self) -> (u64, u64) {
        (self.frequency, self.sequence)
    }
}

/// A Least Frequently Used (LFU) replacement policy
///
/// Hits bump a per-key counter in O(1). A miss at capacity scans all resident
/// keys for the lowest counter, so eviction is O(capacity).
///
/// Ties on frequency go to the key admitted earliest. Every admission takes a
/// fresh sequence number, so the choice never depends on hash-map iteration
/// order and replays are deterministic.
#[derive(Debug, Clone)]
pub struct LfuPolicy<K>
where
    K: Hash + Eq + Clone,
{
    entries: HashMap<K, LfuEntry>,
    capacity: usize,
    next_sequence: u64,
}

impl<K> LfuPolicy<K>
where
    K: Hash + Eq + Clone,
{
    /// Creates a new LFU policy
    ///
    /// # Errors
    /// `InvalidConfiguration` if capacity is 0
    pub fn new(capacity: usize) -> Result<Self> {
        check_capacity(capacity)?;
        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            capacity,
            next_sequence: 0,
        })
    }

    /// Access count of a resident key
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.entries.get(key).map(|e| e.frequency)
    }

    /// Smallest frequency among resident keys
    pub fn min_frequency(&self) -> Option<u64> {
        self.entries.values().map(|e| e.frequency).min()
    }

    fn select_victim(&self) -> Option<&K> {
        self.entries
            .iter()
            .min_by_key(|(_, entry)| entry.rank())
            .map(|(key, _)| key)
    }

    /// Evicts the key with the lowest frequency, oldest admission on ties
    fn evict(&mut self) {
        let Some(key) = self.select_victim().cloned() else {
            return;
        };
        if let Some(entry) = self.entries.remove(&key) {
            trace!(
                capacity = self.capacity,
                frequency = entry.frequency,
                "lfu evicted least frequent entry"
            );
        }
    }

    /// Check that every counter is positive and sequence numbers are unique.
    pub fn check_invariants(&self) -> Result<()> {
        if self.entries.len() > self.capacity {
            return Err(PolicyError::InvariantViolation(format!(
                "{} resident keys exceed capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }
        if self.entries.values().any(|e| e.frequency == 0) {
            return Err(PolicyError::InvariantViolation(
                "resident key with zero frequency".into(),
            ));
        }
        let mut sequences: Vec<u64> = self.entries.values().map(|e| e.sequence).collect();
        sequences.sort_unstable();
        sequences.dedup();
        if sequences.len() != self.entries.len() {
            return Err(PolicyError::InvariantViolation(
                "two resident keys share an admission sequence".into(),
            ));
        }
        if sequences.last().is_some_and(|&s| s >= self.next_sequence) {
            return Err(PolicyError::InvariantViolation(
                "admission sequence ahead of the counter".into(),
            ));
        }
        Ok(())
    }
}

impl<K> ReplacementPolicy<K> for LfuPolicy<K>
where
    K: Hash + Eq + Clone,
{
    fn access(&mut self, key: K) -> Access {
        if let Some(entry) = self.entries.get_mut(&key) {
            entry.frequency += 1;
            return Access::Hit;
        }

        if self.entries.len() == self.capacity {
            self.evict();
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.insert(
            key,
            LfuEntry {
                frequency: 1,
                sequence,
            },
        );
        Access::Miss
    }

    fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn victim(&self) -> Option<&K> {
        self.select_victim()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn policy_type(&self) -> PolicyType {
        PolicyType::Lfu
    }
}
