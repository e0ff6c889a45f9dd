use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crate::clipboard::{ClipboardBackend, ClipboardWatcher, PasteInjector};
use crate::event::{AppEvent, LoopHandle};
use crate::input::{CaptureHandle, KeyRouter};
use crate::logging::FlashMessage;
use crate::models::{HistoryStore, Selector, SelectorOutcome, Snippet};
use crate::ui::{MenuSurface, OverlayHost, menu};

/// One open selector overlay
///
/// Owns the key monitor it installed; the monitor is removed when the
/// session is closed, never by anyone else.
pub struct OverlaySession {
    selector: Selector,
    capture: CaptureHandle,
}

impl OverlaySession {
    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

/// Main application state
///
/// Everything here is touched only from the event loop thread, one event at
/// a time, so the coordination flags are plain fields.
pub struct App<S> {
    /// Clipboard history, most recent first
    history: HistoryStore,

    /// Change detector with the self-write suppression flag
    watcher: ClipboardWatcher,

    /// System clipboard access
    clipboard: Box<dyn ClipboardBackend>,

    /// Clipboard write + synthetic paste
    injector: PasteInjector,

    /// Local key monitors for the terminal surface
    router: KeyRouter,

    /// The selector overlay, at most one
    overlay: Option<OverlaySession>,

    /// Menu and overlay rendering
    surface: S,

    /// For scheduling delayed work on the loop
    handle: LoopHandle,

    /// Whether the global shortcut tap is running
    hotkey_enabled: bool,

    /// Hold the paste keystroke until the surface loses focus
    defer_paste: bool,

    /// A snippet is on the clipboard waiting for focus to leave the surface
    paste_pending: bool,

    /// Startup error message (shown in modal, dismissible with any key)
    pub startup_error: Option<String>,

    /// Flag to request application exit
    pub should_quit: bool,

    /// Flash messages displayed in the status bar
    pub flash_messages: Vec<FlashMessage>,

    /// Receiver for flash messages from logger
    flash_rx: Option<Receiver<FlashMessage>>,

    /// How long a flash message stays visible
    flash_duration: Duration,
}

impl<S: MenuSurface + OverlayHost> App<S> {
    pub fn new(
        clipboard: Box<dyn ClipboardBackend>,
        injector: PasteInjector,
        mut surface: S,
        handle: LoopHandle,
    ) -> Self {
        let history = HistoryStore::new();
        surface.on_history_changed(&history.snapshot());

        App {
            history,
            watcher: ClipboardWatcher::new(),
            clipboard,
            injector,
            router: KeyRouter::new(),
            overlay: None,
            surface,
            handle,
            hotkey_enabled: false,
            defer_paste: false,
            paste_pending: false,
            startup_error: None,
            should_quit: false,
            flash_messages: Vec::new(),
            flash_rx: None,
            flash_duration: Duration::from_secs(4),
        }
    }

    /// Attach the logger's flash message channel
    pub fn with_flash_messages(mut self, rx: Receiver<FlashMessage>, duration: Duration) -> Self {
        self.flash_rx = Some(rx);
        self.flash_duration = duration;
        self
    }

    /// Send the paste keystroke on focus loss instead of after the delay
    ///
    /// For surfaces that take keyboard focus to make a selection: pasting
    /// straight away would land in the surface itself.
    pub fn with_deferred_paste(mut self) -> Self {
        self.defer_paste = true;
        self
    }

    pub fn paste_pending(&self) -> bool {
        self.paste_pending
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn overlay(&self) -> Option<&OverlaySession> {
        self.overlay.as_ref()
    }

    pub fn is_overlay_open(&self) -> bool {
        self.overlay.is_some()
    }

    /// Number of installed local key monitors
    pub fn capture_count(&self) -> usize {
        self.router.monitor_count()
    }

    pub fn hotkey_enabled(&self) -> bool {
        self.hotkey_enabled
    }

    pub fn set_hotkey_enabled(&mut self, enabled: bool) {
        self.hotkey_enabled = enabled;
    }

    pub fn clipboard_name(&self) -> &'static str {
        self.clipboard.name()
    }

    /// Dispatch one event from the loop
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.poll_clipboard(),
            AppEvent::OpenOverlay => self.open_overlay(),
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::FocusLost => {
                if self.is_overlay_open() {
                    log::debug!("Selector lost visibility, closing");
                    self.close_overlay();
                }
                if self.paste_pending {
                    self.paste_pending = false;
                    self.injector.schedule_paste(&self.handle);
                }
            }
            AppEvent::EmitPaste => self.injector.emit_paste(),
            AppEvent::Redraw => {}
            AppEvent::Quit => self.quit(),
        }
    }

    /// One clipboard watcher tick
    pub fn poll_clipboard(&mut self) {
        if self
            .watcher
            .poll(self.clipboard.as_mut(), &mut self.history)
        {
            log::info!("Recorded new clip ({} in history)", self.history.len());
            self.notify_history_changed();
        }
    }

    fn notify_history_changed(&mut self) {
        self.surface.on_history_changed(&self.history.snapshot());
    }

    /// Open the selector over the current history
    ///
    /// No-op while a selector is already open.
    pub fn open_overlay(&mut self) {
        if self.overlay.is_some() {
            log::debug!("Selector already open");
            return;
        }

        let selector = Selector::new(self.history.snapshot());
        self.surface.open(selector.items());
        let capture = self.router.add_monitor();

        log::debug!("Opened selector with {} items", selector.items().len());
        self.overlay = Some(OverlaySession { selector, capture });
    }

    /// Close the selector and release its key monitor
    pub fn close_overlay(&mut self) {
        if let Some(session) = self.overlay.take() {
            self.router.remove_monitor(session.capture);
            self.surface.close();
            log::debug!("Closed selector");
        }
    }

    /// Paste `snippet` and promote it to the front of history
    ///
    /// History is left alone when the clipboard write fails.
    pub fn paste(&mut self, snippet: Snippet) {
        let result = if self.defer_paste {
            self.injector
                .write_clipboard(&snippet, &mut self.watcher, self.clipboard.as_mut())
        } else {
            self.injector.inject(
                &snippet,
                &mut self.watcher,
                self.clipboard.as_mut(),
                &self.handle,
            )
        };

        if let Err(e) = result {
            log::warn!("Paste failed: {:#}", e);
            return;
        }

        if self.defer_paste {
            self.paste_pending = true;
            log::info!("Snippet copied, pasting when focus returns to the target window");
        }
        if self.history.record(snippet) {
            self.notify_history_changed();
        }
    }

    /// Menu path: paste the history entry at `index`
    pub fn select(&mut self, index: usize) {
        match self.history.get(index) {
            Ok(snippet) => {
                let snippet = snippet.clone();
                self.paste(snippet);
            }
            Err(e) => log::debug!("Ignoring menu selection: {}", e),
        }
    }

    pub fn quit(&mut self) {
        self.close_overlay();
        self.should_quit = true;
    }

    /// Handle a key from the terminal surface
    ///
    /// The selector's monitor sees the key first; anything it passes through
    /// goes to the menu key handling.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let outcome = match self.overlay.as_mut() {
            Some(session) if self.router.active() == Some(session.capture.id()) => {
                let outcome = session.selector.handle_key(key.code);
                if outcome == SelectorOutcome::Moved {
                    self.surface.set_cursor(session.selector.cursor());
                }
                outcome
            }
            _ => SelectorOutcome::PassThrough,
        };

        match outcome {
            SelectorOutcome::Moved => {}
            SelectorOutcome::Confirm(snippet) => {
                self.paste(snippet);
                self.close_overlay();
            }
            SelectorOutcome::Close => self.close_overlay(),
            SelectorOutcome::PassThrough => self.handle_menu_key(key),
        }
    }

    /// Keys for the menu surface
    fn handle_menu_key(&mut self, key: KeyEvent) {
        // If there's a startup error modal, any key dismisses it
        if self.startup_error.is_some() {
            self.startup_error = None;
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Char('q') if key.modifiers.is_empty() => self.quit(),
            KeyCode::Char('v') if key.modifiers.is_empty() => self.open_overlay(),
            KeyCode::Char(c) if key.modifiers.is_empty() => {
                if let Some(index) = menu::index_for_key(c) {
                    self.select(index);
                }
            }
            _ => {}
        }
    }

    /// Poll flash message receiver and add to queue
    pub fn poll_flash_messages(&mut self) {
        if let Some(rx) = &self.flash_rx {
            while let Ok(msg) = rx.try_recv() {
                self.flash_messages.push(msg);
            }
        }
    }

    /// Remove expired flash messages
    pub fn prune_flash_messages(&mut self) {
        if self.flash_messages.is_empty() {
            return;
        }

        let now = Instant::now();
        let duration = self.flash_duration;
        self.flash_messages
            .retain(|msg| now.duration_since(msg.timestamp) < duration);
    }
}
