use ratatui::crossterm::event::KeyCode;

use super::Snippet;

/// What the selector did with a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorOutcome {
    /// Cursor navigation, key consumed
    Moved,
    /// Enter on a non-empty list, key consumed
    Confirm(Snippet),
    /// Escape, or Enter on an empty list, key consumed
    Close,
    /// Key not handled by the selector
    PassThrough,
}

/// Keyboard-driven selection over a frozen history snapshot
///
/// The cursor always points at a valid item when the list is non-empty,
/// and stays at 0 (with no item under it) when the list is empty.
#[derive(Debug, Clone)]
pub struct Selector {
    items: Vec<Snippet>,
    cursor: usize,
}

impl Selector {
    pub fn new(items: Vec<Snippet>) -> Self {
        Selector { items, cursor: 0 }
    }

    pub fn items(&self) -> &[Snippet] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Item under the cursor, None for an empty list
    pub fn current(&self) -> Option<&Snippet> {
        self.items.get(self.cursor)
    }

    pub fn move_down(&mut self) {
        if !self.items.is_empty() {
            self.cursor = (self.cursor + 1).min(self.items.len() - 1);
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Handle one key press
    pub fn handle_key(&mut self, code: KeyCode) -> SelectorOutcome {
        match code {
            KeyCode::Down => {
                self.move_down();
                SelectorOutcome::Moved
            }
            KeyCode::Up => {
                self.move_up();
                SelectorOutcome::Moved
            }
            KeyCode::Enter => match self.current() {
                Some(snippet) => SelectorOutcome::Confirm(snippet.clone()),
                None => SelectorOutcome::Close,
            },
            KeyCode::Esc => SelectorOutcome::Close,
            _ => SelectorOutcome::PassThrough,
        }
    }
}
