use ratatui::crossterm::event::KeyModifiers;
use std::fs::{self, File};
use std::io::{self, Read};
use std::mem::size_of;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use super::{KeyTap, TapCallback, TapError};
use crate::input::keycodes;

const BY_PATH_DIR: &str = "/dev/input/by-path";

/// EV_KEY from linux/input-event-codes.h
const EV_KEY: u16 = 0x01;

/// Width of one timestamp field of the kernel's struct input_event
///
/// The kernel writes the timestamp as two `__kernel_ulong_t` fields, whatever
/// `time_t` userspace was built with: one native word, except on x32 where
/// the kernel side stays 64-bit.
#[cfg(all(target_arch = "x86_64", target_pointer_width = "32"))]
const TIME_FIELD_SIZE: usize = 8;
#[cfg(not(all(target_arch = "x86_64", target_pointer_width = "32")))]
const TIME_FIELD_SIZE: usize = size_of::<usize>();

/// struct input_event: two timestamp fields followed by type, code, value
const INPUT_EVENT_SIZE: usize = 2 * TIME_FIELD_SIZE + 8;

/// Decoded input_event record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InputEvent {
    kind: u16,
    code: u16,
    value: i32,
}

impl InputEvent {
    fn parse(buf: &[u8; INPUT_EVENT_SIZE]) -> Self {
        let off = 2 * TIME_FIELD_SIZE;
        InputEvent {
            kind: u16::from_ne_bytes([buf[off], buf[off + 1]]),
            code: u16::from_ne_bytes([buf[off + 2], buf[off + 3]]),
            value: i32::from_ne_bytes([buf[off + 4], buf[off + 5], buf[off + 6], buf[off + 7]]),
        }
    }
}

/// Tracks held modifier keys across events
#[derive(Debug, Default)]
struct ModifierState {
    held: Vec<u16>,
}

impl ModifierState {
    fn modifiers(&self) -> KeyModifiers {
        self.held
            .iter()
            .filter_map(|&code| keycodes::modifier_for(code))
            .fold(KeyModifiers::NONE, |acc, m| acc | m)
    }

    /// Apply one event, returning (modifiers, code) for key-down events
    ///
    /// Value 1 is press, 0 release, 2 autorepeat (ignored).
    fn feed(&mut self, event: InputEvent) -> Option<(KeyModifiers, u16)> {
        if event.kind != EV_KEY {
            return None;
        }

        let is_modifier = keycodes::modifier_for(event.code).is_some();
        match event.value {
            1 => {
                let reported = (self.modifiers(), event.code);
                if is_modifier && !self.held.contains(&event.code) {
                    self.held.push(event.code);
                }
                Some(reported)
            }
            0 => {
                if is_modifier {
                    self.held.retain(|&c| c != event.code);
                }
                None
            }
            _ => None,
        }
    }
}

/// Global key tap reading a Linux evdev keyboard device
///
/// The device is read without EVIOCGRAB, so every event still reaches the
/// focused application: the tap can observe but never swallow input, and a
/// `Consume` answer from the callback has no effect.
pub struct EvdevTap {
    device: Option<PathBuf>,
    stop: Arc<AtomicBool>,
    installed: bool,
}

impl EvdevTap {
    /// Tap `device`, or the first keyboard under /dev/input/by-path when None
    pub fn new(device: Option<PathBuf>) -> Self {
        EvdevTap {
            device,
            stop: Arc::new(AtomicBool::new(false)),
            installed: false,
        }
    }

    fn resolve_device(&self) -> Result<PathBuf, TapError> {
        match &self.device {
            Some(path) => Ok(path.clone()),
            None => find_keyboard(Path::new(BY_PATH_DIR)),
        }
    }
}

/// First `*-event-kbd` entry in `dir`, in name order
fn find_keyboard(dir: &Path) -> Result<PathBuf, TapError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(TapError::NoKeyboard),
        Err(e) => return Err(e.into()),
    };

    let mut keyboards: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with("-event-kbd"))
        })
        .collect();
    keyboards.sort();

    keyboards.into_iter().next().ok_or(TapError::NoKeyboard)
}

fn open_device(path: &Path) -> Result<File, TapError> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::PermissionDenied => TapError::PermissionDenied(path.to_path_buf()),
        io::ErrorKind::NotFound => TapError::NoKeyboard,
        _ => TapError::Io(e),
    })
}

fn read_loop(mut device: File, stop: Arc<AtomicBool>, mut callback: TapCallback) {
    let mut state = ModifierState::default();
    let mut buf = [0u8; INPUT_EVENT_SIZE];

    while !stop.load(Ordering::Relaxed) {
        if let Err(e) = device.read_exact(&mut buf) {
            log::warn!("Keyboard device read failed, global shortcut disabled: {}", e);
            return;
        }
        if stop.load(Ordering::Relaxed) {
            break;
        }
        if let Some((modifiers, code)) = state.feed(InputEvent::parse(&buf)) {
            let _ = callback(modifiers, code);
        }
    }
    log::debug!("Key tap thread exiting");
}

impl KeyTap for EvdevTap {
    fn install(&mut self, callback: TapCallback) -> Result<(), TapError> {
        if self.installed {
            return Err(TapError::AlreadyInstalled);
        }

        let path = self.resolve_device()?;
        let device = open_device(&path)?;
        log::info!("Reading key events from {:?}", path);

        // Fresh flag per install so a stopped thread can't be revived
        self.stop = Arc::new(AtomicBool::new(false));
        let stop = Arc::clone(&self.stop);

        thread::Builder::new()
            .name("key-tap".to_string())
            .spawn(move || read_loop(device, stop, callback))?;

        self.installed = true;
        Ok(())
    }

    fn uninstall(&mut self) {
        // The reader is blocked in read(); it notices the flag on its next event
        // and never calls the callback again.
        self.stop.store(true, Ordering::Relaxed);
        self.installed = false;
    }

    fn name(&self) -> &'static str {
        "evdev"
    }
}

impl Drop for EvdevTap {
    fn drop(&mut self) {
        self.uninstall();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotkey::TapAction;
    use crate::input::keycodes::{KEY_LEFTALT, KEY_LEFTMETA, KEY_RIGHTALT, KEY_V};

    fn key(code: u16, value: i32) -> InputEvent {
        InputEvent {
            kind: EV_KEY,
            code,
            value,
        }
    }

    fn encode(event: InputEvent) -> [u8; INPUT_EVENT_SIZE] {
        let mut buf = [0u8; INPUT_EVENT_SIZE];
        let off = 2 * TIME_FIELD_SIZE;
        buf[off..off + 2].copy_from_slice(&event.kind.to_ne_bytes());
        buf[off + 2..off + 4].copy_from_slice(&event.code.to_ne_bytes());
        buf[off + 4..off + 8].copy_from_slice(&event.value.to_ne_bytes());
        buf
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_input_event_size_on_64_bit() {
        assert_eq!(INPUT_EVENT_SIZE, 24);
    }

    #[test]
    #[cfg(all(target_pointer_width = "32", not(target_arch = "x86_64")))]
    fn test_input_event_size_on_32_bit() {
        assert_eq!(INPUT_EVENT_SIZE, 16);
    }

    #[test]
    fn test_parse_input_event() {
        let event = key(KEY_V, 1);
        assert_eq!(InputEvent::parse(&encode(event)), event);
    }

    #[test]
    fn test_modifiers_tracked_across_events() {
        let mut state = ModifierState::default();
        assert_eq!(
            state.feed(key(KEY_LEFTMETA, 1)),
            Some((KeyModifiers::NONE, KEY_LEFTMETA))
        );
        state.feed(key(KEY_LEFTALT, 1));

        assert_eq!(
            state.feed(key(KEY_V, 1)),
            Some((KeyModifiers::SUPER | KeyModifiers::ALT, KEY_V))
        );
        assert_eq!(state.feed(key(KEY_V, 0)), None);

        state.feed(key(KEY_LEFTALT, 0));
        assert_eq!(state.feed(key(KEY_V, 1)), Some((KeyModifiers::SUPER, KEY_V)));
    }

    #[test]
    fn test_left_and_right_modifier_release_independently() {
        let mut state = ModifierState::default();
        state.feed(key(KEY_LEFTALT, 1));
        state.feed(key(KEY_RIGHTALT, 1));
        state.feed(key(KEY_LEFTALT, 0));
        assert_eq!(state.modifiers(), KeyModifiers::ALT);
        state.feed(key(KEY_RIGHTALT, 0));
        assert_eq!(state.modifiers(), KeyModifiers::NONE);
    }

    #[test]
    fn test_repeat_and_non_key_events_ignored() {
        let mut state = ModifierState::default();
        assert_eq!(state.feed(key(KEY_V, 2)), None);
        let sync = InputEvent {
            kind: 0,
            code: 0,
            value: 0,
        };
        assert_eq!(state.feed(sync), None);
    }

    #[test]
    fn test_find_keyboard_missing_dir() {
        let dir = std::env::temp_dir().join(format!("clipstack-no-such-dir-{}", std::process::id()));
        assert!(matches!(find_keyboard(&dir), Err(TapError::NoKeyboard)));
    }

    #[test]
    fn test_find_keyboard_picks_first_kbd() {
        let dir = std::env::temp_dir().join(format!("clipstack-by-path-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        for name in [
            "pci-0000:00:14.0-usb-0:2:1.0-event-mouse",
            "platform-i8042-serio-0-event-kbd",
            "pci-0000:00:14.0-usb-0:1:1.0-event-kbd",
        ] {
            File::create(dir.join(name)).unwrap();
        }

        let found = find_keyboard(&dir).unwrap();
        assert_eq!(
            found.file_name().unwrap().to_str().unwrap(),
            "pci-0000:00:14.0-usb-0:1:1.0-event-kbd"
        );

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_install_reports_missing_device() {
        let mut tap = EvdevTap::new(Some(PathBuf::from("/nonexistent/clipstack/event99")));
        let result = tap.install(Box::new(|_, _| TapAction::PassThrough));
        assert!(matches!(result, Err(TapError::NoKeyboard)));
    }
}
