use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use tracing::trace;

use super::PolicyType;
use crate::error::check_capacity;
use crate::{Access, PolicyError, ReplacementPolicy, Result};

/// A First-In-First-Out (FIFO) replacement policy.
///
/// # Overview
/// - Evicts the oldest admitted key when a new key arrives at capacity.
/// - Hits never reorder the queue; that is what separates it from LRU.
/// - O(1) amortized per access: a `VecDeque` keeps admission order and a
///   `HashSet` answers membership.
#[derive(Debug, Clone)]
pub struct FifoPolicy<K>
where
    K: Hash + Eq + Clone,
{
    /// Admission order (front = oldest)
    order: VecDeque<K>,

    /// Set for O(1) membership check
    resident: HashSet<K>,

    /// Maximum number of resident keys
    capacity: usize,
}

impl<K> FifoPolicy<K>
where
    K: Hash + Eq + Clone,
{
    /// Create a new FIFO policy holding at most `capacity` keys.
    ///
    /// # Errors
    /// `InvalidConfiguration` if capacity is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        check_capacity(capacity)?;
        Ok(Self {
            order: VecDeque::with_capacity(capacity),
            resident: HashSet::with_capacity(capacity),
            capacity,
        })
    }

    /// Resident keys from oldest to newest
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    /// Evict the **oldest** key (front of the queue)
    fn evict_oldest(&mut self) {
        if let Some(oldest) = self.order.pop_front() {
            self.resident.remove(&oldest);
            trace!(capacity = self.capacity, "fifo evicted oldest entry");
        }
    }

    /// Verify the queue and the membership set describe the same resident set.
    pub fn check_invariants(&self) -> Result<()> {
        if self.order.len() != self.resident.len() {
            return Err(PolicyError::InvariantViolation(format!(
                "queue has {} entries, set has {}",
                self.order.len(),
                self.resident.len()
            )));
        }
        if self.order.len() > self.capacity {
            return Err(PolicyError::InvariantViolation(format!(
                "{} resident keys exceed capacity {}",
                self.order.len(),
                self.capacity
            )));
        }
        // Equal lengths plus full containment rules out duplicates in the queue.
        if !self.order.iter().all(|k| self.resident.contains(k)) {
            return Err(PolicyError::InvariantViolation(
                "queue holds a key missing from the membership set".into(),
            ));
        }
        Ok(())
    }
}

impl<K> ReplacementPolicy<K> for FifoPolicy<K>
where
    K: Hash + Eq + Clone,
{
    fn access(&mut self, key: K) -> Access {
        if self.resident.contains(&key) {
            return Access::Hit;
        }

        if self.order.len() == self.capacity {
            self.evict_oldest();
        }
        self.resident.insert(key.clone());
        self.order.push_back(key);
        Access::Miss
    }

    fn contains(&self, key: &K) -> bool {
        self.resident.contains(key)
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn victim(&self) -> Option<&K> {
        self.order.front()
    }

    fn clear(&mut self) {
        self.order.clear();
        self.resident.clear();
    }

    fn policy_type(&self) -> PolicyType {
        PolicyType::Fifo
    }
}
