use std::fmt;

/// Marker appended to labels that were cut short
pub const ELLIPSIS: &str = "…";

/// A single text value captured from the clipboard
///
/// Snippets are plain values: two snippets are the same snippet when their
/// text is byte-for-byte equal. No trimming or whitespace normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Snippet(String);

impl Snippet {
    pub fn new(text: impl Into<String>) -> Self {
        Snippet(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get a display label truncated to `max_chars` characters
    ///
    /// Counts characters, not bytes, so multi-byte text is never split mid-codepoint.
    pub fn label(&self, max_chars: usize) -> String {
        match self.0.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}{}", &self.0[..cut], ELLIPSIS),
            None => self.0.clone(),
        }
    }

    /// Single-line variant of `label` for list rows
    pub fn one_line_label(&self, max_chars: usize) -> String {
        let flattened: String = self
            .0
            .chars()
            .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
            .collect();
        Snippet(flattened).label(max_chars)
    }
}

impl From<String> for Snippet {
    fn from(text: String) -> Self {
        Snippet(text)
    }
}

impl From<&str> for Snippet {
    fn from(text: &str) -> Self {
        Snippet(text.to_string())
    }
}

impl AsRef<str> for Snippet {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
