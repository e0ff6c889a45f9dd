use anyhow::{Context, Result, anyhow};
use ratatui::crossterm::event::KeyModifiers;
use std::process::{Command, Stdio};
use std::time::Duration;

use super::backend::ClipboardBackend;
use super::watcher::ClipboardWatcher;
use crate::event::{AppEvent, LoopHandle};
use crate::input::keycodes::{self, KEY_LEFTCTRL, KEY_V};
use crate::models::Snippet;

/// Time between the clipboard write and the synthetic paste
///
/// Gives the focused application a chance to see the new clipboard contents
/// before the keystroke arrives. Found by trial; slow targets may need more.
pub const DEFAULT_PASTE_DELAY: Duration = Duration::from_millis(250);

/// One synthetic key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticKey {
    pub code: u16,
    pub is_down: bool,
    pub modifiers: KeyModifiers,
}

impl SyntheticKey {
    pub fn down(code: u16, modifiers: KeyModifiers) -> Self {
        SyntheticKey {
            code,
            is_down: true,
            modifiers,
        }
    }

    pub fn up(code: u16, modifiers: KeyModifiers) -> Self {
        SyntheticKey {
            code,
            is_down: false,
            modifiers,
        }
    }
}

/// Ctrl-V as four key transitions: ctrl down, v down, v up, ctrl up
pub fn paste_sequence() -> [SyntheticKey; 4] {
    [
        SyntheticKey::down(KEY_LEFTCTRL, KeyModifiers::CONTROL),
        SyntheticKey::down(KEY_V, KeyModifiers::CONTROL),
        SyntheticKey::up(KEY_V, KeyModifiers::CONTROL),
        SyntheticKey::up(KEY_LEFTCTRL, KeyModifiers::NONE),
    ]
}

/// Trait for synthetic keyboard input
pub trait KeySynth: Send {
    /// Send key transitions to the focused application, in order
    fn post_key_events(&self, events: &[SyntheticKey]) -> Result<()>;

    /// Get the synthesizer name (for logging/debugging)
    fn name(&self) -> &'static str;
}

fn key_name(code: u16) -> Result<&'static str> {
    keycodes::key_name(code).ok_or_else(|| anyhow!("No key name for key code {}", code))
}

fn run_tool(program: &str, args: &[String]) -> Result<()> {
    let status = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("Failed to spawn {}. Make sure it is installed.", program))?;

    if !status.success() {
        return Err(anyhow!("{} failed with status: {}", program, status));
    }
    Ok(())
}

/// Wayland key synthesizer using wtype
///
/// The whole sequence goes into one wtype invocation because each wtype
/// process owns its own virtual keyboard and modifier state.
pub struct WtypeSynth;

impl WtypeSynth {
    fn args(events: &[SyntheticKey]) -> Result<Vec<String>> {
        let mut args = Vec::with_capacity(events.len() * 2);
        for event in events {
            let name = key_name(event.code)?;
            let flag = match (keycodes::modifier_for(event.code).is_some(), event.is_down) {
                (true, true) => "-M",
                (true, false) => "-m",
                (false, true) => "-P",
                (false, false) => "-p",
            };
            args.push(flag.to_string());
            args.push(name.to_string());
        }
        Ok(args)
    }
}

impl KeySynth for WtypeSynth {
    fn post_key_events(&self, events: &[SyntheticKey]) -> Result<()> {
        run_tool("wtype", &Self::args(events)?)
    }

    fn name(&self) -> &'static str {
        "wtype"
    }
}

/// X11 key synthesizer using xdotool
pub struct XdotoolSynth;

impl XdotoolSynth {
    fn args(events: &[SyntheticKey]) -> Result<Vec<String>> {
        let mut args = Vec::with_capacity(events.len() * 2);
        for event in events {
            let action = if event.is_down { "keydown" } else { "keyup" };
            args.push(action.to_string());
            args.push(key_name(event.code)?.to_string());
        }
        Ok(args)
    }
}

impl KeySynth for XdotoolSynth {
    fn post_key_events(&self, events: &[SyntheticKey]) -> Result<()> {
        run_tool("xdotool", &Self::args(events)?)
    }

    fn name(&self) -> &'static str {
        "xdotool"
    }
}

/// Writes snippets to the clipboard and pastes them into the focused application
pub struct PasteInjector {
    synth: Box<dyn KeySynth>,
    delay: Duration,
}

impl PasteInjector {
    pub fn new(synth: Box<dyn KeySynth>, delay: Duration) -> Self {
        PasteInjector { synth, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Put `snippet` on the clipboard and schedule the paste keystrokes
    ///
    /// The watcher is told to skip its next tick before the write happens.
    /// On a failed write nothing is scheduled and the suppression is withdrawn.
    pub fn inject(
        &self,
        snippet: &Snippet,
        watcher: &mut ClipboardWatcher,
        backend: &mut dyn ClipboardBackend,
        handle: &LoopHandle,
    ) -> Result<()> {
        self.write_clipboard(snippet, watcher, backend)?;
        self.schedule_paste(handle);
        Ok(())
    }

    /// Put `snippet` on the clipboard without sending any keystrokes
    pub fn write_clipboard(
        &self,
        snippet: &Snippet,
        watcher: &mut ClipboardWatcher,
        backend: &mut dyn ClipboardBackend,
    ) -> Result<()> {
        watcher.suppress_next();

        if let Err(e) = backend.write_text(snippet.as_str()) {
            watcher.clear_suppression();
            return Err(e).context("Failed to put snippet on the clipboard");
        }
        watcher.note_own_write(snippet.as_str());

        log::debug!("Wrote {} bytes to the clipboard", snippet.as_str().len());
        Ok(())
    }

    /// Post `EmitPaste` after the paste delay
    pub fn schedule_paste(&self, handle: &LoopHandle) {
        handle.post_after(self.delay, AppEvent::EmitPaste);
        log::debug!(
            "Scheduled paste via {} after {:?}",
            self.synth.name(),
            self.delay
        );
    }

    /// Send the paste keystrokes now
    ///
    /// Best effort: a rejected injection is logged and dropped.
    pub fn emit_paste(&self) {
        if let Err(e) = self.synth.post_key_events(&paste_sequence()) {
            log::warn!("Synthetic paste via {} failed: {:#}", self.synth.name(), e);
        }
    }
}
