//! Bounded first-page result cache
//!
//! Keyed by the normalized filter combination. Eviction is pure insertion
//! order: when capacity is exceeded the oldest-inserted key goes, regardless
//! of how recently it was read, and re-inserting a live key does not refresh
//! its position in line. Only first pages are cached; "load more" pages are
//! session-scoped and unbounded, so they never enter here.

use std::collections::{HashMap, VecDeque};

use crate::model::ResultPage;

/// Reference capacity from the original client.
pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug)]
pub struct ResultCache {
    capacity: usize,
    entries: HashMap<String, ResultPage>,
    order: VecDeque<String>,
}

impl ResultCache {
    /// Create a cache bounded to `capacity` entries.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "cache capacity must be positive");
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ResultPage> {
        self.entries.get(key)
    }

    /// Insert a first page. A key already present keeps its insertion slot;
    /// only its page is replaced.
    pub fn put(&mut self, key: impl Into<String>, page: ResultPage) {
        let key = key.into();
        if self.entries.insert(key.clone(), page).is_none() {
            self.order.push_back(key);
            if self.order.len() > self.capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.entries.remove(&oldest);
                    tracing::debug!("evicted cached first page for {oldest:?}");
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(marker: &str) -> ResultPage {
        ResultPage {
            artworks: vec![crate::model::Artwork {
                object_number: marker.to_string(),
                ..crate::model::Artwork::default()
            }],
            end_of_results: false,
        }
    }

    #[test]
    fn exceeding_capacity_evicts_exactly_the_oldest_key() {
        let mut cache = ResultCache::new(3);
        cache.put("a", page("a"));
        cache.put("b", page("b"));
        cache.put("c", page("c"));
        cache.put("d", page("d"));

        assert_eq!(cache.len(), 3);
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
        assert!(cache.get("d").is_some());
    }

    #[test]
    fn reads_do_not_refresh_eviction_order() {
        let mut cache = ResultCache::new(2);
        cache.put("a", page("a"));
        cache.put("b", page("b"));

        // Heavy use of "a" must not save it: FIFO, not LRU.
        for _ in 0..10 {
            assert!(cache.get("a").is_some());
        }
        cache.put("c", page("c"));

        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn reinserting_a_live_key_keeps_its_insertion_slot() {
        let mut cache = ResultCache::new(2);
        cache.put("a", page("old"));
        cache.put("b", page("b"));
        cache.put("a", page("new"));
        cache.put("c", page("c"));

        // "a" was oldest despite the re-put, so it is the one evicted.
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert_eq!(cache.get("c").unwrap().artworks[0].object_number, "c");
    }

    #[test]
    fn reinserting_replaces_the_stored_page() {
        let mut cache = ResultCache::new(2);
        cache.put("a", page("old"));
        cache.put("a", page("new"));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("a").unwrap().artworks[0].object_number, "new");
    }
}
