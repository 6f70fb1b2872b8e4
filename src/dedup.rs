//! Deduplication of output records
//!
//! The seen-set of a single sanitizer run. A fresh deduplicator is built for
//! every run, so no membership survives between runs.

use ahash::RandomState;
use hashbrown::HashSet;

/// Trait for deduplication implementations
pub trait Deduplicator {
    /// Record `item` if it was not seen before
    /// Returns true if the item is unique (not seen before)
    fn offer(&mut self, item: &str) -> bool;

    /// Number of distinct items recorded so far
    fn seen(&self) -> usize;
}

/// In-memory HashSet-based deduplicator
pub struct MemoryDeduplicator {
    set: HashSet<String, RandomState>,
}

impl MemoryDeduplicator {
    pub fn new() -> Self {
        Self {
            set: HashSet::with_hasher(RandomState::new()),
        }
    }
}

impl Default for MemoryDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Deduplicator for MemoryDeduplicator {
    fn offer(&mut self, item: &str) -> bool {
        if self.set.contains(item) {
            return false;
        }
        self.set.insert(item.to_string())
    }

    fn seen(&self) -> usize {
        self.set.len()
    }
}
