//! Bookkeeping for the hover-preview image cache.
//!
//! The actual fetch (Scryfall) lives outside this crate; callers ask
//! [`ImageCache::begin_fetch`] whether a fetch is worth starting, do their
//! async work, and report back with [`ImageCache::finish_fetch`].
//! Last write wins, and a name already cached or already in flight is
//! never fetched twice. Keys are identity keys, so casing differences in
//! the decklists share one cache slot.

use std::collections::{HashMap, HashSet};

use crate::deck::identity_key;

#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    images: HashMap<String, String>,
    in_flight: HashSet<String>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached image URL for a card, if any.
    pub fn url(&self, name: &str) -> Option<&str> {
        self.images.get(&identity_key(name)).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(&identity_key(name))
    }

    /// Marks a fetch as started. Returns false when the card is already
    /// cached or a fetch for it is already in flight, in which case the
    /// caller should not fetch.
    pub fn begin_fetch(&mut self, name: &str) -> bool {
        let key = identity_key(name);
        if self.images.contains_key(&key) {
            return false;
        }
        self.in_flight.insert(key)
    }

    /// Records a fetch result and clears the in-flight mark. A `None`
    /// result just clears the mark, so the card can be retried later.
    pub fn finish_fetch(&mut self, name: &str, url: Option<String>) {
        let key = identity_key(name);
        self.in_flight.remove(&key);
        if let Some(url) = url {
            self.images.insert(key, url);
        }
    }

    /// Drops cache entries for cards no longer part of the comparison.
    pub fn retain_names<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        let keep: HashSet<String> = names.into_iter().map(identity_key).collect();
        self.images.retain(|key, _| keep.contains(key));
        self.in_flight.retain(|key| keep.contains(key));
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_fetches_are_suppressed() {
        let mut cache = ImageCache::new();
        assert!(cache.begin_fetch("Sol Ring"));
        assert!(!cache.begin_fetch("Sol Ring"));
        assert!(!cache.begin_fetch("sol ring"));

        cache.finish_fetch("Sol Ring", Some("https://img/sol-ring".to_string()));
        assert_eq!(cache.url("sol ring"), Some("https://img/sol-ring"));
        assert!(!cache.begin_fetch("Sol Ring"));
    }

    #[test]
    fn failed_fetch_can_be_retried() {
        let mut cache = ImageCache::new();
        assert!(cache.begin_fetch("Opt"));
        cache.finish_fetch("Opt", None);
        assert!(!cache.contains("Opt"));
        assert!(cache.begin_fetch("Opt"));
    }

    #[test]
    fn last_write_wins() {
        let mut cache = ImageCache::new();
        cache.finish_fetch("Opt", Some("first".to_string()));
        cache.finish_fetch("Opt", Some("second".to_string()));
        assert_eq!(cache.url("Opt"), Some("second"));
    }

    #[test]
    fn retain_prunes_stale_cards() {
        let mut cache = ImageCache::new();
        cache.finish_fetch("Opt", Some("a".to_string()));
        cache.finish_fetch("Ponder", Some("b".to_string()));
        cache.retain_names(["Opt"]);
        assert!(cache.contains("Opt"));
        assert!(!cache.contains("Ponder"));
        assert_eq!(cache.len(), 1);
    }
}
