pub mod evdev;

use ratatui::crossterm::event::KeyModifiers;
use std::path::PathBuf;
use std::time::Duration;

use crate::event::{AppEvent, LoopHandle};
use crate::input::keycodes::KEY_V;

pub use evdev::EvdevTap;

/// Modifiers that must be held for the recall shortcut (Super+Alt)
pub const TRIGGER_MODIFIERS: KeyModifiers = KeyModifiers::SUPER.union(KeyModifiers::ALT);

/// Key that completes the recall shortcut
pub const TRIGGER_KEY: u16 = KEY_V;

/// Human-readable form of the shortcut for the status bar
pub const TRIGGER_LABEL: &str = "Super+Alt+V";

/// What a global tap callback wants done with the event it saw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    Consume,
    PassThrough,
}

/// Callback invoked by a key tap for every key-down: (held modifiers, key code)
pub type TapCallback = Box<dyn FnMut(KeyModifiers, u16) -> TapAction + Send + 'static>;

#[derive(Debug, thiserror::Error)]
pub enum TapError {
    #[error("Permission denied reading {0:?} (add your user to the `input` group)")]
    PermissionDenied(PathBuf),

    #[error("No keyboard device found")]
    NoKeyboard,

    #[error("Key tap already installed")]
    AlreadyInstalled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A system-wide source of key events
pub trait KeyTap: Send {
    /// Start delivering key-down events to `callback`
    fn install(&mut self, callback: TapCallback) -> Result<(), TapError>;

    /// Stop delivering events, safe to call when not installed
    fn uninstall(&mut self);

    /// Get the tap name (for logging/debugging)
    fn name(&self) -> &'static str;
}

/// True when `modifiers` and `code` form the recall shortcut
///
/// Extra held modifiers don't prevent a match.
pub fn is_trigger(modifiers: KeyModifiers, code: u16) -> bool {
    code == TRIGGER_KEY && modifiers.contains(TRIGGER_MODIFIERS)
}

/// Body of the global tap callback
///
/// Runs on the tap's thread, so it only posts a request to the event loop.
/// Every event is passed through, matched or not.
pub fn on_key_down(
    modifiers: KeyModifiers,
    code: u16,
    handle: &LoopHandle,
    delay: Duration,
) -> TapAction {
    if is_trigger(modifiers, code) {
        log::debug!("{} detected", TRIGGER_LABEL);
        handle.post_after(delay, AppEvent::OpenOverlay);
    }
    TapAction::PassThrough
}

/// Watches for the recall shortcut anywhere in the system
pub struct HotkeyListener {
    tap: Box<dyn KeyTap>,
    enabled: bool,
}

impl HotkeyListener {
    pub fn new(tap: Box<dyn KeyTap>) -> Self {
        HotkeyListener {
            tap,
            enabled: false,
        }
    }

    /// Install the tap
    ///
    /// On failure the shortcut stays disabled for the session; the caller only
    /// needs to report the error.
    pub fn start(&mut self, handle: LoopHandle, delay: Duration) -> Result<(), TapError> {
        if self.enabled {
            return Err(TapError::AlreadyInstalled);
        }

        self.tap.install(Box::new(move |modifiers, code| {
            on_key_down(modifiers, code, &handle, delay)
        }))?;

        self.enabled = true;
        log::info!("Listening for {} via {}", TRIGGER_LABEL, self.tap.name());
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.enabled {
            self.tap.uninstall();
            self.enabled = false;
            log::debug!("Global shortcut listener stopped");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Drop for HotkeyListener {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Tap that hands its callback to the test instead of reading a device
    #[derive(Clone, Default)]
    struct ManualTap {
        callback: Arc<Mutex<Option<TapCallback>>>,
        deny: bool,
        uninstalls: Arc<Mutex<usize>>,
    }

    impl ManualTap {
        fn press(&self, modifiers: KeyModifiers, code: u16) -> Option<TapAction> {
            let mut guard = self.callback.lock().unwrap();
            guard.as_mut().map(|cb| cb(modifiers, code))
        }
    }

    impl KeyTap for ManualTap {
        fn install(&mut self, callback: TapCallback) -> Result<(), TapError> {
            if self.deny {
                return Err(TapError::PermissionDenied(PathBuf::from("/dev/input/event0")));
            }
            *self.callback.lock().unwrap() = Some(callback);
            Ok(())
        }

        fn uninstall(&mut self) {
            *self.callback.lock().unwrap() = None;
            *self.uninstalls.lock().unwrap() += 1;
        }

        fn name(&self) -> &'static str {
            "manual"
        }
    }

    #[test]
    fn test_is_trigger() {
        assert!(is_trigger(TRIGGER_MODIFIERS, KEY_V));
        assert!(is_trigger(TRIGGER_MODIFIERS | KeyModifiers::SHIFT, KEY_V));
        assert!(!is_trigger(KeyModifiers::SUPER, KEY_V));
        assert!(!is_trigger(KeyModifiers::ALT, KEY_V));
        assert!(!is_trigger(KeyModifiers::CONTROL, KEY_V));
        assert!(!is_trigger(TRIGGER_MODIFIERS, KEY_V + 1));
    }

    #[test]
    fn test_trigger_posts_open_and_passes_through() {
        let (handle, rx) = LoopHandle::channel();
        let action = on_key_down(TRIGGER_MODIFIERS, KEY_V, &handle, Duration::ZERO);
        assert_eq!(action, TapAction::PassThrough);
        assert_eq!(rx.try_recv().unwrap(), AppEvent::OpenOverlay);
    }

    #[test]
    fn test_other_keys_pass_through_silently() {
        let (handle, rx) = LoopHandle::channel();
        let action = on_key_down(KeyModifiers::CONTROL, KEY_V, &handle, Duration::ZERO);
        assert_eq!(action, TapAction::PassThrough);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_listener_wires_callback() {
        let (handle, rx) = LoopHandle::channel();
        let tap = ManualTap::default();
        let mut listener = HotkeyListener::new(Box::new(tap.clone()));

        listener.start(handle, Duration::ZERO).unwrap();
        assert!(listener.is_enabled());

        assert_eq!(tap.press(KeyModifiers::NONE, KEY_V), Some(TapAction::PassThrough));
        assert!(rx.try_recv().is_err());

        assert_eq!(tap.press(TRIGGER_MODIFIERS, KEY_V), Some(TapAction::PassThrough));
        assert_eq!(rx.try_recv().unwrap(), AppEvent::OpenOverlay);
    }

    #[test]
    fn test_permission_denied_leaves_listener_disabled() {
        let (handle, _rx) = LoopHandle::channel();
        let tap = ManualTap {
            deny: true,
            ..Default::default()
        };
        let mut listener = HotkeyListener::new(Box::new(tap));

        let err = listener.start(handle, Duration::ZERO).unwrap_err();
        assert!(matches!(err, TapError::PermissionDenied(_)));
        assert!(!listener.is_enabled());
    }

    #[test]
    fn test_start_twice_is_rejected() {
        let (handle, _rx) = LoopHandle::channel();
        let mut listener = HotkeyListener::new(Box::new(ManualTap::default()));
        listener.start(handle.clone(), Duration::ZERO).unwrap();
        assert!(matches!(
            listener.start(handle, Duration::ZERO),
            Err(TapError::AlreadyInstalled)
        ));
    }

    #[test]
    fn test_drop_uninstalls_tap() {
        let (handle, _rx) = LoopHandle::channel();
        let tap = ManualTap::default();
        let mut listener = HotkeyListener::new(Box::new(tap.clone()));
        listener.start(handle, Duration::ZERO).unwrap();

        drop(listener);
        assert_eq!(*tap.uninstalls.lock().unwrap(), 1);
        assert_eq!(tap.press(TRIGGER_MODIFIERS, KEY_V), None);
    }
}
