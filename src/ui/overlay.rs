use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::Theme;
use super::layout::centered_rect;
use crate::models::snippet::ELLIPSIS;

const HIGHLIGHT_SYMBOL: &str = "► ";

/// Cut `text` to at most `width` terminal columns, marking the cut with an ellipsis
pub fn fit_width(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    // One column goes to the ellipsis
    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}

/// Render the selector popup over `area`
pub fn render_selector(
    frame: &mut Frame,
    area: Rect,
    items: &[String],
    cursor: usize,
    theme: &Theme,
) {
    let overlay_area = centered_rect(70, 60, area);

    // Clear background
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.overlay_border)
        .title(Span::styled(" Paste from history ", theme.overlay_title))
        .title_bottom(Line::from(" ↑/↓ move  Enter paste  Esc close ").centered())
        .style(Style::default().bg(theme.modal_bg).fg(theme.default_fg));

    if items.is_empty() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            super::menu::EMPTY_MENU_LABEL,
            theme.empty_text,
        )))
        .block(block);
        frame.render_widget(paragraph, overlay_area);
        return;
    }

    let row_width = (overlay_area.width as usize)
        .saturating_sub(2)
        .saturating_sub(HIGHLIGHT_SYMBOL.chars().count());

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| ListItem::new(fit_width(item, row_width)))
        .collect();

    let list = List::new(list_items)
        .block(block)
        .highlight_symbol(HIGHLIGHT_SYMBOL)
        .highlight_style(theme.entry_selected)
        .style(theme.entry_text);

    let mut list_state = ListState::default();
    list_state.select(Some(cursor));

    frame.render_stateful_widget(list, overlay_area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_width_short_text_unchanged() {
        assert_eq!(fit_width("hello", 10), "hello");
        assert_eq!(fit_width("hello", 5), "hello");
    }

    #[test]
    fn test_fit_width_truncates_with_ellipsis() {
        assert_eq!(fit_width("hello world", 6), "hello…");
    }

    #[test]
    fn test_fit_width_counts_wide_chars() {
        // Each CJK character takes two columns
        assert_eq!(fit_width("日本語テキスト", 7), "日本語…");
    }

    #[test]
    fn test_fit_width_zero() {
        assert_eq!(fit_width("abc", 0), "");
    }
}
