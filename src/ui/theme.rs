use log::Level;
use ratatui::prelude::*;

/// Runtime theme with direct field access for all UI elements
#[derive(Debug, Clone)]
pub struct Theme {
    // === Default Colors ===
    pub default_fg: Color,
    pub default_bg: Color,

    // === Backgrounds ===
    pub modal_bg: Color,
    pub error_modal_bg: Color,
    pub status_bar_bg: Color,

    // === Menu ===
    pub menu_title: Style,
    pub entry_number: Style,
    pub entry_text: Style,
    pub empty_text: Style,

    // === Selector Overlay ===
    pub overlay_border: Style,
    pub overlay_title: Style,
    pub entry_selected: Style,

    // === Status Bar ===
    pub status_key: Style,
    pub status_desc: Style,
    pub status_ok: Style,
    pub status_off: Style,

    // === Flash Messages ===
    pub flash_error: Style,
    pub flash_warn: Style,
    pub flash_info: Style,

    // === Error Modal ===
    pub error_text: Style,
    pub error_border: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::catppuccin_mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (dark)
    pub fn catppuccin_mocha() -> Self {
        let fg = Color::Rgb(205, 214, 244);
        let bg = Color::Rgb(30, 30, 46);
        let subtext = Color::Rgb(166, 173, 200);
        let blue = Color::Rgb(137, 180, 250);
        let red = Color::Rgb(243, 139, 168);
        let yellow = Color::Rgb(249, 226, 175);

        Theme {
            default_fg: fg,
            default_bg: bg,

            modal_bg: Color::Rgb(24, 24, 37),
            error_modal_bg: Color::Rgb(24, 24, 37),
            status_bar_bg: Color::Rgb(49, 50, 68),

            menu_title: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            entry_number: Style::default()
                .fg(Color::Rgb(245, 194, 231))
                .add_modifier(Modifier::BOLD),
            entry_text: Style::default().fg(fg),
            empty_text: Style::default().fg(subtext).add_modifier(Modifier::ITALIC),

            overlay_border: Style::default().fg(blue),
            overlay_title: Style::default().fg(blue).add_modifier(Modifier::BOLD),
            entry_selected: Style::default().fg(blue).add_modifier(Modifier::BOLD),

            status_key: Style::default().fg(fg).add_modifier(Modifier::BOLD),
            status_desc: Style::default().fg(subtext),
            status_ok: Style::default().fg(Color::Rgb(166, 227, 161)),
            status_off: Style::default().fg(red),

            flash_error: Style::default().fg(red).add_modifier(Modifier::BOLD),
            flash_warn: Style::default().fg(yellow),
            flash_info: Style::default().fg(fg),

            error_text: Style::default().fg(fg),
            error_border: Style::default().fg(red),
        }
    }

    /// Style for a flash message of the given level
    pub fn flash_style(&self, level: Level) -> Style {
        match level {
            Level::Error => self.flash_error,
            Level::Warn => self.flash_warn,
            _ => self.flash_info,
        }
    }
}
