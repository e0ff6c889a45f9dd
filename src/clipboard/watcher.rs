use super::backend::ClipboardBackend;
use crate::models::{HistoryStore, Snippet};

/// Polling clipboard change detector
///
/// Each call to `poll` is one tick of the watcher. The suppression flag lets
/// the paste path mark its own clipboard write so the next tick ignores it.
///
/// Only one injection may be in flight at a time: the flag is a single bit,
/// so a second `suppress_next` before the next tick is absorbed into the first.
#[derive(Debug, Default)]
pub struct ClipboardWatcher {
    /// Clipboard text seen on the last successful read
    last_seen: Option<String>,
    /// Skip detection on the next tick
    suppressed: bool,
}

impl ClipboardWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one tick
    ///
    /// Returns true when a new clipboard value was recorded into `history`.
    pub fn poll(
        &mut self,
        backend: &mut dyn ClipboardBackend,
        history: &mut HistoryStore,
    ) -> bool {
        if self.suppressed {
            self.suppressed = false;
            log::debug!("Skipping clipboard poll after own write");
            return false;
        }

        let current = match backend.read_text() {
            Ok(Some(text)) => text,
            Ok(None) => return false,
            Err(e) => {
                log::debug!("Clipboard unreadable via {}: {:#}", backend.name(), e);
                return false;
            }
        };

        if self.last_seen.as_deref() == Some(current.as_str()) {
            return false;
        }

        log::debug!("Clipboard changed ({} bytes)", current.len());
        self.last_seen = Some(current.clone());
        history.record(Snippet::from(current))
    }

    /// Ignore the next tick, called right before writing to the clipboard
    pub fn suppress_next(&mut self) {
        self.suppressed = true;
    }

    /// Record a completed write of our own as the last seen clipboard value
    ///
    /// Without this the tick after the suppressed one would see our text as a change.
    pub fn note_own_write(&mut self, text: &str) {
        self.last_seen = Some(text.to_string());
    }

    /// Drop a pending suppression (the write it was guarding failed)
    pub fn clear_suppression(&mut self) {
        self.suppressed = false;
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn last_seen(&self) -> Option<&str> {
        self.last_seen.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::MemoryClipboard;

    #[test]
    fn test_poll_records_new_value() {
        let mut watcher = ClipboardWatcher::new();
        let mut history = HistoryStore::new();
        let mut clipboard = MemoryClipboard::with_text("hello");

        assert!(watcher.poll(&mut clipboard, &mut history));
        assert_eq!(history.snapshot(), vec![Snippet::from("hello")]);
        assert_eq!(watcher.last_seen(), Some("hello"));
    }

    #[test]
    fn test_poll_unchanged_value_is_ignored() {
        let mut watcher = ClipboardWatcher::new();
        let mut history = HistoryStore::new();
        let mut clipboard = MemoryClipboard::with_text("hello");

        watcher.poll(&mut clipboard, &mut history);
        assert!(!watcher.poll(&mut clipboard, &mut history));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_poll_absent_or_unreadable_is_no_change() {
        let mut watcher = ClipboardWatcher::new();
        let mut history = HistoryStore::new();

        let mut empty = MemoryClipboard::default();
        assert!(!watcher.poll(&mut empty, &mut history));

        let mut broken = MemoryClipboard::with_text("x");
        broken.fail_reads = true;
        assert!(!watcher.poll(&mut broken, &mut history));

        assert!(history.is_empty());
        assert_eq!(watcher.last_seen(), None);
    }

    #[test]
    fn test_suppressed_tick_clears_flag_without_recording() {
        let mut watcher = ClipboardWatcher::new();
        let mut history = HistoryStore::new();
        let mut clipboard = MemoryClipboard::with_text("first");
        watcher.poll(&mut clipboard, &mut history);

        watcher.suppress_next();
        clipboard.text = Some("different".to_string());

        assert!(!watcher.poll(&mut clipboard, &mut history));
        assert!(!watcher.is_suppressed());
        assert_eq!(history.snapshot(), vec![Snippet::from("first")]);
        assert_eq!(clipboard.reads, 1);
    }

    #[test]
    fn test_own_write_not_recaptured_after_suppressed_tick() {
        let mut watcher = ClipboardWatcher::new();
        let mut history = HistoryStore::new();
        let mut clipboard = MemoryClipboard::with_text("first");
        watcher.poll(&mut clipboard, &mut history);

        watcher.suppress_next();
        clipboard.text = Some("ours".to_string());
        watcher.note_own_write("ours");

        assert!(!watcher.poll(&mut clipboard, &mut history));
        assert!(!watcher.poll(&mut clipboard, &mut history));
        assert_eq!(history.snapshot(), vec![Snippet::from("first")]);
    }

    #[test]
    fn test_external_copy_of_empty_text_updates_snapshot_only() {
        let mut watcher = ClipboardWatcher::new();
        let mut history = HistoryStore::new();
        let mut clipboard = MemoryClipboard::with_text("");

        assert!(!watcher.poll(&mut clipboard, &mut history));
        assert_eq!(watcher.last_seen(), Some(""));
        assert!(history.is_empty());
    }
}
