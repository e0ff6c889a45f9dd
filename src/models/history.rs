use lru::LruCache;
use std::num::NonZeroUsize;

use super::Snippet;

/// Number of snippets kept in history
pub const DEFAULT_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("History index {index} out of range (length {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Bounded most-recently-used snippet history
///
/// Backed by an LRU cache keyed on the snippet itself, which gives us all three
/// invariants for free:
/// - re-inserting an existing snippet moves it to the front instead of duplicating it
/// - inserting past capacity evicts the least recently used (last) snippet
/// - iteration order is most recent first
pub struct HistoryStore {
    entries: LruCache<Snippet, ()>,
}

impl HistoryStore {
    /// Create an empty history with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty history holding at most `capacity` snippets (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        HistoryStore {
            entries: LruCache::new(capacity),
        }
    }

    /// Record a snippet as the most recently used entry
    ///
    /// Empty snippets are ignored. Returns true if the history changed.
    pub fn record(&mut self, snippet: Snippet) -> bool {
        if snippet.is_empty() {
            return false;
        }

        if let Some((evicted, _)) = self.entries.push(snippet, ()) {
            // push hands back the old pair on a key update too, only log real evictions
            if !self.entries.contains(&evicted) {
                log::debug!("History full, evicted {} bytes", evicted.as_str().len());
            }
        }

        true
    }

    /// Owned copy of the history, most recent first
    pub fn snapshot(&self) -> Vec<Snippet> {
        self.entries.iter().map(|(snippet, _)| snippet.clone()).collect()
    }

    /// Get the snippet at `index` (0 = most recent)
    pub fn get(&self, index: usize) -> Result<&Snippet, HistoryError> {
        self.entries
            .iter()
            .nth(index)
            .map(|(snippet, _)| snippet)
            .ok_or(HistoryError::OutOfRange {
                index,
                len: self.entries.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(history: &HistoryStore) -> Vec<String> {
        history
            .snapshot()
            .iter()
            .map(|s| s.as_str().to_string())
            .collect()
    }

    fn record_all(history: &mut HistoryStore, values: &[&str]) {
        for value in values {
            history.record(Snippet::from(*value));
        }
    }

    #[test]
    fn test_record_orders_most_recent_first() {
        let mut history = HistoryStore::new();
        record_all(&mut history, &["a", "b", "c"]);
        assert_eq!(texts(&history), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_rerecord_promotes_to_front() {
        let mut history = HistoryStore::new();
        record_all(&mut history, &["a", "b", "c", "a"]);
        assert_eq!(texts(&history), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_record_same_value_twice_keeps_length() {
        let mut history = HistoryStore::new();
        record_all(&mut history, &["a", "x"]);
        history.record(Snippet::from("x"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0).unwrap().as_str(), "x");
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = HistoryStore::with_capacity(3);
        record_all(&mut history, &["a", "b", "c", "d"]);
        assert_eq!(texts(&history), vec!["d", "c", "b"]);
    }

    #[test]
    fn test_default_capacity_keeps_ten_most_recent() {
        let mut history = HistoryStore::new();
        for i in 0..=DEFAULT_CAPACITY {
            history.record(Snippet::new(format!("clip {}", i)));
        }

        assert_eq!(history.len(), DEFAULT_CAPACITY);
        assert_eq!(history.get(0).unwrap().as_str(), "clip 10");
        assert_eq!(history.get(DEFAULT_CAPACITY - 1).unwrap().as_str(), "clip 1");
        assert!(!history.snapshot().contains(&Snippet::from("clip 0")));
    }

    #[test]
    fn test_record_empty_is_noop() {
        let mut history = HistoryStore::new();
        assert!(!history.record(Snippet::from("")));
        assert!(history.is_empty());

        record_all(&mut history, &["a", "b"]);
        assert!(!history.record(Snippet::from("")));
        assert_eq!(texts(&history), vec!["b", "a"]);
    }

    #[test]
    fn test_never_exceeds_capacity_or_duplicates() {
        let mut history = HistoryStore::with_capacity(4);
        let sequence = ["a", "b", "a", "c", "d", "e", "b", "b", "f", "a", "", "c"];

        for value in sequence {
            history.record(Snippet::from(value));
            let snapshot = history.snapshot();
            assert!(snapshot.len() <= 4);

            let mut deduped = snapshot.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), snapshot.len());
        }

        assert_eq!(texts(&history), vec!["c", "a", "f", "b"]);
    }

    #[test]
    fn test_get_out_of_range() {
        let mut history = HistoryStore::new();
        assert_eq!(
            history.get(0),
            Err(HistoryError::OutOfRange { index: 0, len: 0 })
        );

        record_all(&mut history, &["a"]);
        assert!(history.get(0).is_ok());
        assert_eq!(
            history.get(1),
            Err(HistoryError::OutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_snapshot_is_detached_copy() {
        let mut history = HistoryStore::new();
        record_all(&mut history, &["a"]);
        let snapshot = history.snapshot();
        history.record(Snippet::from("b"));
        assert_eq!(snapshot, vec![Snippet::from("a")]);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut history = HistoryStore::with_capacity(0);
        record_all(&mut history, &["a", "b"]);
        assert_eq!(history.capacity(), 1);
        assert_eq!(texts(&history), vec!["b"]);
    }
}
