use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use super::Theme;
use crate::models::Snippet;

/// Most entries the menu shows, one per digit key
pub const MENU_MAX_ENTRIES: usize = 10;

/// Characters of a snippet shown before it's cut off with an ellipsis
pub const MENU_LABEL_CHARS: usize = 40;

/// Placeholder row shown when history is empty
pub const EMPTY_MENU_LABEL: &str = "No history yet";

/// Build the menu rows for a history snapshot
///
/// Rows are in history order (most recent first), capped at ten.
pub fn menu_labels(snapshot: &[Snippet]) -> Vec<String> {
    snapshot
        .iter()
        .take(MENU_MAX_ENTRIES)
        .map(|snippet| snippet.one_line_label(MENU_LABEL_CHARS))
        .collect()
}

/// Menu row selected by a digit key: 1-9 pick rows 1-9, 0 picks row 10
pub fn index_for_key(c: char) -> Option<usize> {
    match c.to_digit(10)? {
        0 => Some(9),
        d => Some(d as usize - 1),
    }
}

/// Render the numbered history menu
pub fn render_menu(frame: &mut Frame, area: Rect, labels: &[String], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.status_desc)
        .title(Span::styled(" clipstack ", theme.menu_title))
        .style(Style::default().bg(theme.default_bg));

    let lines: Vec<Line> = if labels.is_empty() {
        vec![Line::from(Span::styled(EMPTY_MENU_LABEL, theme.empty_text))]
    } else {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                Line::from(vec![
                    Span::styled(format!("{:>2}. ", i + 1), theme.entry_number),
                    Span::styled(label.as_str(), theme.entry_text),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
