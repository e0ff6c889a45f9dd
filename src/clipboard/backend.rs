use anyhow::Result;

/// Trait for clipboard backend abstraction
/// Supports different clipboard systems (Wayland tools, arboard for X11/macOS/Windows)
pub trait ClipboardBackend: Send {
    /// Read the current clipboard text
    /// Returns Ok(None) when the clipboard is empty or holds no text
    fn read_text(&mut self) -> Result<Option<String>>;

    /// Replace the clipboard contents with `text`
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// Get the backend name (for logging/debugging)
    fn name(&self) -> &'static str;
}
