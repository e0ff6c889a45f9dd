pub mod history;
pub mod selector;
pub mod snippet;

pub use history::{HistoryError, HistoryStore, DEFAULT_CAPACITY};
pub use selector::{Selector, SelectorOutcome};
pub use snippet::Snippet;
