use anyhow::{Context, Result};
use arboard::Clipboard;

use super::backend::ClipboardBackend;

/// Cross-platform clipboard backend built on arboard
/// Used on X11, macOS and Windows, or on Wayland when the wl-clipboard tools are missing
pub struct ArboardBackend {
    clipboard: Clipboard,
}

impl ArboardBackend {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to open system clipboard")?;
        log::debug!("ArboardBackend initialized successfully");
        Ok(ArboardBackend { clipboard })
    }
}

impl ClipboardBackend for ArboardBackend {
    fn read_text(&mut self) -> Result<Option<String>> {
        match self.clipboard.get_text() {
            Ok(text) => Ok(Some(text)),
            // Empty clipboard or a non-text payload
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(e).context("Failed to read clipboard text"),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.clipboard
            .set_text(text)
            .context("Failed to write clipboard text")?;
        log::debug!("Wrote {} bytes text to clipboard", text.len());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "arboard"
    }
}
