pub mod error_modal;
pub mod layout;
pub mod menu;
pub mod overlay;
pub mod status;
pub mod surface;
pub mod theme;

use ratatui::prelude::*;
use ratatui::widgets::Block;

use crate::app::App;

pub use error_modal::render_error_modal;
pub use layout::{centered_rect, create_main_layout};
pub use menu::render_menu;
pub use overlay::render_selector;
pub use status::{StatusContext, render_status_bar};
pub use surface::{MenuSurface, OverlayHost, OverlayView, TerminalSurface};
pub use theme::Theme;

/// Draw one frame of the daemon UI
pub fn draw(frame: &mut Frame, app: &App<TerminalSurface>, theme: &Theme) {
    let size = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.default_bg).fg(theme.default_fg)),
        size,
    );

    let [menu_area, status_area] = create_main_layout(size);
    let surface = app.surface();

    render_menu(frame, menu_area, surface.labels(), theme);

    let ctx = StatusContext {
        overlay_open: surface.overlay().is_some(),
        paste_pending: app.paste_pending(),
        hotkey_enabled: app.hotkey_enabled(),
        clipboard_name: app.clipboard_name(),
        flash: app.flash_messages.last(),
    };
    render_status_bar(frame, status_area, &ctx, theme);

    if let Some(view) = surface.overlay() {
        render_selector(frame, size, &view.items, view.cursor, theme);
    }

    // Startup error modal takes precedence over other overlays
    if let Some(ref error_msg) = app.startup_error {
        render_error_modal(frame, size, error_msg, theme);
    }
}
