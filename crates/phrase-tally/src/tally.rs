use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;

/// Shared phrase → count table.
///
/// Cloning is cheap and every clone points at the same table, so each source
/// pipeline holds its own handle. Counts only ever grow; nothing is evicted.
#[derive(Clone, Debug, Default)]
pub struct PhraseTally {
    counts: Arc<DashMap<String, u64>>,
}

impl PhraseTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `phrase`, creating it at 1 if absent.
    pub fn increment(&self, phrase: String) {
        *self.counts.entry(phrase).or_insert(0) += 1;
    }

    pub fn get(&self, phrase: &str) -> Option<u64> {
        self.counts.get(phrase).map(|count| *count)
    }

    /// Number of distinct phrases.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|entry| *entry.value()).sum()
    }

    /// Copy out the current table. Intended for after all pipelines finish.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
