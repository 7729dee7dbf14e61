//! In-memory cache of query results.
//!
//! Keyed by the normalised search term. When full, the least recently used
//! entry is evicted. Nothing is persisted.

use crate::record::QueryResult;
use std::collections::HashMap;

struct CacheEntry {
    result: QueryResult,
    /// Logical clock value of the last insert or hit
    last_used: u64,
}

/// Bounded term → result cache with LRU eviction.
pub struct ResultCache {
    entries: HashMap<String, CacheEntry>,
    capacity: usize,
    clock: u64,
}

impl ResultCache {
    /// A capacity of zero disables caching entirely.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
            clock: 0,
        }
    }

    /// `" Example.COM "` and `"example.com"` share an entry.
    #[must_use]
    pub fn normalize(term: &str) -> String {
        term.trim().to_lowercase()
    }

    pub fn get(&mut self, term: &str) -> Option<QueryResult> {
        let tick = self.tick();
        let entry = self.entries.get_mut(&Self::normalize(term))?;
        entry.last_used = tick;
        Some(entry.result.clone())
    }

    pub fn insert(&mut self, term: &str, result: QueryResult) {
        if self.capacity == 0 {
            return;
        }

        let key = Self::normalize(term);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_least_recent();
        }

        let last_used = self.tick();
        self.entries.insert(key, CacheEntry { result, last_used });
    }

    /// Drop the entry for `term`, returning whether one existed.
    pub fn invalidate(&mut self, term: &str) -> bool {
        self.entries.remove(&Self::normalize(term)).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            tracing::debug!("Evicting cached result for '{}'", key);
            self.entries.remove(&key);
        }
    }
}
