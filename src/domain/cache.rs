/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Bounded read-through cache with least-recently-used eviction

use std::collections::HashMap;
use std::hash::Hash;

/// Default number of entries kept by the resolver cache
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

#[derive(Debug)]
struct Entry<V> {
    value: V,
    last_used: u64,
}

/// Size-bounded cache; when full, the least recently used entry is evicted
///
/// A capacity of zero disables caching: every lookup computes.
#[derive(Debug)]
pub struct ResolutionCache<K, V> {
    capacity: usize,
    entries: HashMap<K, Entry<V>>,
    tick: u64,
    hits: u64,
    misses: u64,
}

impl<K, V> ResolutionCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            tick: 0,
            hits: 0,
            misses: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Return the cached value for `key`, computing and storing it on a miss
    pub fn get_or_insert_with<F>(&mut self, key: &K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.tick += 1;
        if let Some(entry) = self.entries.get_mut(key) {
            entry.last_used = self.tick;
            self.hits += 1;
            return entry.value.clone();
        }

        self.misses += 1;
        let value = compute();
        if self.capacity == 0 {
            return value;
        }
        if self.entries.len() >= self.capacity {
            self.evict_least_recently_used();
        }
        self.entries.insert(
            key.clone(),
            Entry {
                value: value.clone(),
                last_used: self.tick,
            },
        );
        value
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn evict_least_recently_used(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_through() {
        let mut cache: ResolutionCache<String, usize> = ResolutionCache::new(4);
        let mut calls = 0;
        let key = "a".to_string();

        let first = cache.get_or_insert_with(&key, || {
            calls += 1;
            7
        });
        let second = cache.get_or_insert_with(&key, || {
            calls += 1;
            8
        });

        assert_eq!(first, 7);
        assert_eq!(second, 7);
        assert_eq!(calls, 1);
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache: ResolutionCache<u32, u32> = ResolutionCache::new(2);
        cache.get_or_insert_with(&1, || 10);
        cache.get_or_insert_with(&2, || 20);
        // Touch 1 so that 2 becomes the oldest
        cache.get_or_insert_with(&1, || 0);
        cache.get_or_insert_with(&3, || 30);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&1));
        assert!(!cache.contains(&2));
        assert!(cache.contains(&3));
    }

    #[test]
    fn test_zero_capacity_disables_caching() {
        let mut cache: ResolutionCache<u32, u32> = ResolutionCache::new(0);
        assert_eq!(cache.get_or_insert_with(&1, || 10), 10);
        assert_eq!(cache.get_or_insert_with(&1, || 11), 11);
        assert!(cache.is_empty());
    }
}
