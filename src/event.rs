use ratatui::crossterm::event::KeyEvent;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Work items processed by the main event loop
///
/// Every source (poll timer, global key tap, terminal input, delayed paste)
/// only ever posts one of these; the state they touch is owned by the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Poll the clipboard
    Tick,
    /// Global shortcut fired, open the selector if it isn't open
    OpenOverlay,
    /// Key pressed while the terminal surface has focus
    Key(KeyEvent),
    /// The terminal lost focus: the overlay is no longer visible and the
    /// user is back in the target application
    FocusLost,
    /// Paste delay elapsed, send the synthetic paste keystrokes
    EmitPaste,
    /// Terminal resized or otherwise needs a repaint
    Redraw,
    /// Stop the loop
    Quit,
}

/// Cloneable sender side of the event loop
#[derive(Debug, Clone)]
pub struct LoopHandle {
    tx: Sender<AppEvent>,
}

impl LoopHandle {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        LoopHandle { tx }
    }

    /// Create a handle together with the receiving end of the loop
    pub fn channel() -> (Self, Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel();
        (LoopHandle::new(tx), rx)
    }

    /// Post an event, returns false once the loop has shut down
    pub fn post(&self, event: AppEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Post an event after `delay`
    ///
    /// Fire-and-forget: once scheduled the event is delivered even if the
    /// state that requested it has changed.
    pub fn post_after(&self, delay: Duration, event: AppEvent) {
        if delay.is_zero() {
            self.post(event);
            return;
        }

        let tx = self.tx.clone();
        thread::spawn(move || {
            thread::sleep(delay);
            let _ = tx.send(event);
        });
    }

    /// Post `AppEvent::Tick` every `period` until the loop goes away
    pub fn spawn_ticker(&self, period: Duration) -> JoinHandle<()> {
        let tx = self.tx.clone();
        thread::spawn(move || {
            log::debug!("Clipboard poll timer started ({:?})", period);
            loop {
                thread::sleep(period);
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            log::debug!("Clipboard poll timer exiting");
        })
    }
}
