use std::collections::HashMap;
use std::hash::Hash;

use tracing::trace;

use super::PolicyType;
use crate::error::check_capacity;
use crate::{Access, PolicyError, ReplacementPolicy, Result};

/// Arena index of the head sentinel (least recently used side).
const HEAD: usize = 0;
/// Arena index of the tail sentinel (most recently used side).
const TAIL: usize = 1;

/// Internal node of the doubly-linked recency list
#[derive(Debug, Clone)]
struct Node<K> {
    /// `None` for the two sentinels and for free slots
    key: Option<K>,
    prev: usize,
    next: usize,
}

impl<K> Node<K> {
    fn sentinel() -> Self {
        Self {
            key: None,
            prev: HEAD,
            next: TAIL,
        }
    }
}

/// A Least Recently Used (LRU) replacement policy
///
/// Keys are kept in a doubly-linked list ordered from least to most recently
/// used. The list lives in an arena (`Vec<Node>`) addressed by stable
/// indices, and the lookup map stores indices only, so the arena is the sole
/// owner of every node. Head and tail sentinels mean linking and unlinking
/// never special-case an empty list or a boundary node.
///
/// Both hits and misses are O(1).
#[derive(Debug, Clone)]
pub struct LruPolicy<K>
where
    K: Hash + Eq + Clone,
{
    /// Node storage; slots 0 and 1 are the sentinels
    nodes: Vec<Node<K>>,
    /// Recycled slots from evicted nodes
    free: Vec<usize>,
    /// Key -> arena index
    map: HashMap<K, usize>,
    /// Maximum capacity
    capacity: usize,
}

impl<K> LruPolicy<K>
where
    K: Hash + Eq + Clone,
{
    /// Creates a new LRU policy with the specified capacity
    ///
    /// # Errors
    /// `InvalidConfiguration` if capacity is 0
    pub fn new(capacity: usize) -> Result<Self> {
        check_capacity(capacity)?;

        let mut nodes = Vec::with_capacity(capacity + 2);
        nodes.push(Node::sentinel());
        nodes.push(Node::sentinel());
        Ok(Self {
            nodes,
            free: Vec::new(),
            map: HashMap::with_capacity(capacity),
            capacity,
        })
    }

    /// Resident keys from least to most recently used
    pub fn keys_by_recency(&self) -> Vec<&K> {
        let mut keys = Vec::with_capacity(self.map.len());
        let mut idx = self.nodes[HEAD].next;
        while idx != TAIL {
            if let Some(key) = self.nodes[idx].key.as_ref() {
                keys.push(key);
            }
            idx = self.nodes[idx].next;
        }
        keys
    }

    /// Detach a node from its neighbours
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
    }

    /// Attach a node just before the tail sentinel (most recent position)
    fn push_back(&mut self, idx: usize) {
        let last = self.nodes[TAIL].prev;
        self.nodes[last].next = idx;
        self.nodes[idx].prev = last;
        self.nodes[idx].next = TAIL;
        self.nodes[TAIL].prev = idx;
    }

    /// Store `key` in a free or new slot and return its index
    fn allocate(&mut self, key: K) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx].key = Some(key);
                idx
            }
            None => {
                self.nodes.push(Node {
                    key: Some(key),
                    prev: HEAD,
                    next: TAIL,
                });
                self.nodes.len() - 1
            }
        }
    }

    /// Removes the least recently used node (right after the head sentinel)
    fn evict_lru(&mut self) {
        let idx = self.nodes[HEAD].next;
        if idx == TAIL {
            return;
        }
        self.unlink(idx);
        if let Some(key) = self.nodes[idx].key.take() {
            self.map.remove(&key);
        }
        self.free.push(idx);
        trace!(capacity = self.capacity, slot = idx, "lru evicted least recent entry");
    }

    /// Walk the list and check it against the index map and the arena.
    pub fn check_invariants(&self) -> Result<()> {
        let violation = |msg: String| Err(PolicyError::InvariantViolation(msg));

        let mut count = 0;
        let mut prev = HEAD;
        let mut idx = self.nodes[HEAD].next;
        while idx != TAIL {
            if count > self.nodes.len() {
                return violation("recency list contains a cycle".into());
            }
            let node = &self.nodes[idx];
            if node.prev != prev {
                return violation(format!("node {idx} has prev {} but follows {prev}", node.prev));
            }
            match node.key.as_ref().and_then(|k| self.map.get(k)) {
                Some(&mapped) if mapped == idx => {}
                _ => return violation(format!("node {idx} is not indexed by its key")),
            }
            count += 1;
            prev = idx;
            idx = node.next;
        }
        if self.nodes[TAIL].prev != prev {
            return violation("tail sentinel does not point at the last node".into());
        }
        if count != self.map.len() {
            return violation(format!("list has {count} nodes, map has {}", self.map.len()));
        }
        if count + self.free.len() + 2 != self.nodes.len() {
            return violation("arena slots leaked".into());
        }
        if count > self.capacity {
            return violation(format!("{count} resident keys exceed capacity {}", self.capacity));
        }
        Ok(())
    }
}

impl<K> ReplacementPolicy<K> for LruPolicy<K>
where
    K: Hash + Eq + Clone,
{
    fn access(&mut self, key: K) -> Access {
        if let Some(&idx) = self.map.get(&key) {
            self.unlink(idx);
            self.push_back(idx);
            return Access::Hit;
        }

        if self.map.len() == self.capacity {
            self.evict_lru();
        }
        let idx = self.allocate(key.clone());
        self.map.insert(key, idx);
        self.push_back(idx);
        Access::Miss
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn victim(&self) -> Option<&K> {
        // The tail sentinel has no key, so an empty list yields None.
        self.nodes[self.nodes[HEAD].next].key.as_ref()
    }

    fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD] = Node::sentinel();
        self.nodes[TAIL] = Node::sentinel();
        self.free.clear();
        self.map.clear();
    }

    fn policy_type(&self) -> PolicyType {
        PolicyType::Lru
    }
}
