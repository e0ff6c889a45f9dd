//! Linux input event key codes (see linux/input-event-codes.h)

pub const KEY_ESC: u16 = 1;
pub const KEY_ENTER: u16 = 28;
pub const KEY_LEFTCTRL: u16 = 29;
pub const KEY_LEFTSHIFT: u16 = 42;
pub const KEY_V: u16 = 47;
pub const KEY_RIGHTSHIFT: u16 = 54;
pub const KEY_LEFTALT: u16 = 56;
pub const KEY_RIGHTCTRL: u16 = 97;
pub const KEY_RIGHTALT: u16 = 100;
pub const KEY_UP: u16 = 103;
pub const KEY_DOWN: u16 = 108;
pub const KEY_LEFTMETA: u16 = 125;
pub const KEY_RIGHTMETA: u16 = 126;

use ratatui::crossterm::event::KeyModifiers;

/// Modifier flag for a modifier key code, None for ordinary keys
pub fn modifier_for(code: u16) -> Option<KeyModifiers> {
    match code {
        KEY_LEFTCTRL | KEY_RIGHTCTRL => Some(KeyModifiers::CONTROL),
        KEY_LEFTSHIFT | KEY_RIGHTSHIFT => Some(KeyModifiers::SHIFT),
        KEY_LEFTALT | KEY_RIGHTALT => Some(KeyModifiers::ALT),
        KEY_LEFTMETA | KEY_RIGHTMETA => Some(KeyModifiers::SUPER),
        _ => None,
    }
}

/// Key name understood by wtype and xdotool
pub fn key_name(code: u16) -> Option<&'static str> {
    match code {
        KEY_LEFTCTRL | KEY_RIGHTCTRL => Some("ctrl"),
        KEY_LEFTSHIFT | KEY_RIGHTSHIFT => Some("shift"),
        KEY_LEFTALT | KEY_RIGHTALT => Some("alt"),
        KEY_LEFTMETA | KEY_RIGHTMETA => Some("super"),
        KEY_V => Some("v"),
        KEY_ENTER => Some("Return"),
        KEY_ESC => Some("Escape"),
        KEY_UP => Some("Up"),
        KEY_DOWN => Some("Down"),
        _ => None,
    }
}
