use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::Theme;
use crate::hotkey::TRIGGER_LABEL;
use crate::logging::FlashMessage;

const MENU_HINTS: &[(&[&str], &str)] = &[
    (&["1-9", "0"], "paste"),
    (&["v"], "selector"),
    (&["q"], "quit"),
];

const SELECTOR_HINTS: &[(&[&str], &str)] = &[
    (&["↑", "↓"], "move"),
    (&["Enter"], "paste"),
    (&["Esc"], "close"),
];

/// What the status bar needs to know about the running app
pub struct StatusContext<'a> {
    pub overlay_open: bool,
    pub paste_pending: bool,
    pub hotkey_enabled: bool,
    pub clipboard_name: &'a str,
    pub flash: Option<&'a FlashMessage>,
}

fn hint_spans(
    hint_data: &'static [(&'static [&'static str], &'static str)],
    theme: &Theme,
) -> Vec<Span<'static>> {
    let mut hints = Vec::new();

    for (keys, description) in hint_data {
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                hints.push(Span::styled("/", theme.status_desc.add_modifier(Modifier::DIM)));
            }
            hints.push(Span::styled(*key, theme.status_key));
        }

        hints.push(Span::raw(" "));
        hints.push(Span::styled(*description, theme.status_desc));
        hints.push(Span::raw("  "));
    }
    hints
}

/// Render the status bar: flash message or key hints on the left, shortcut
/// state on the right
pub fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &StatusContext, theme: &Theme) {
    let left = match ctx.flash {
        Some(flash) => Line::from(Span::styled(
            flash.message.clone(),
            theme.flash_style(flash.level),
        )),
        None if ctx.paste_pending => Line::from(Span::styled(
            "Copied. Switch to the target window to paste",
            theme.flash_info,
        )),
        None if ctx.overlay_open => Line::from(hint_spans(SELECTOR_HINTS, theme)),
        None => Line::from(hint_spans(MENU_HINTS, theme)),
    };

    let shortcut = if ctx.hotkey_enabled {
        Span::styled(TRIGGER_LABEL, theme.status_ok)
    } else {
        Span::styled(format!("{} off", TRIGGER_LABEL), theme.status_off)
    };
    let right = Line::from(vec![
        Span::styled(format!("{}  ", ctx.clipboard_name), theme.status_desc),
        shortcut,
    ])
    .right_aligned();

    let [left_area, right_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(right.width() as u16),
    ])
    .areas(area);

    let style = theme.status_desc.bg(theme.status_bar_bg);
    frame.render_widget(Paragraph::new(left).style(style), left_area);
    frame.render_widget(Paragraph::new(right).style(style), right_area);
}
