use crate::models::Snippet;

use super::menu::menu_labels;

/// Widest label kept for a selector row before rendering fits it to the popup
pub const OVERLAY_LABEL_CHARS: usize = 200;

/// Something that shows the current history as a menu
pub trait MenuSurface {
    /// History changed; `snapshot` is most recent first
    fn on_history_changed(&mut self, snapshot: &[Snippet]);
}

/// Something that can show the selector overlay
pub trait OverlayHost {
    /// Show the selector over `items` with the first row highlighted
    fn open(&mut self, items: &[Snippet]);

    /// Move the highlight
    fn set_cursor(&mut self, cursor: usize);

    /// Hide the selector, safe to call when hidden
    fn close(&mut self);
}

/// Selector state as the terminal draws it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    pub items: Vec<String>,
    pub cursor: usize,
}

/// Menu and overlay drawn into the terminal on each frame
#[derive(Debug, Default)]
pub struct TerminalSurface {
    labels: Vec<String>,
    overlay: Option<OverlayView>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn overlay(&self) -> Option<&OverlayView> {
        self.overlay.as_ref()
    }
}

impl MenuSurface for TerminalSurface {
    fn on_history_changed(&mut self, snapshot: &[Snippet]) {
        self.labels = menu_labels(snapshot);
    }
}

impl OverlayHost for TerminalSurface {
    fn open(&mut self, items: &[Snippet]) {
        self.overlay = Some(OverlayView {
            items: items
                .iter()
                .map(|s| s.one_line_label(OVERLAY_LABEL_CHARS))
                .collect(),
            cursor: 0,
        });
    }

    fn set_cursor(&mut self, cursor: usize) {
        if let Some(view) = self.overlay.as_mut() {
            view.cursor = cursor;
        }
    }

    fn close(&mut self) {
        self.overlay = None;
    }
}
