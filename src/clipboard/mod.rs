pub mod arboard_backend;
pub mod backend;
pub mod paste;
pub mod wayland;
pub mod watcher;

#[cfg(test)]
pub mod testing;

use anyhow::{Context, Result};
use std::env;

use crate::storage::{ClipboardBackendKind, PasteToolKind};

pub use arboard_backend::ArboardBackend;
pub use backend::ClipboardBackend;
pub use paste::{DEFAULT_PASTE_DELAY, KeySynth, PasteInjector, SyntheticKey, WtypeSynth, XdotoolSynth};
pub use wayland::WaylandBackend;
pub use watcher::ClipboardWatcher;

fn is_wayland() -> bool {
    env::var("WAYLAND_DISPLAY").is_ok()
}

/// Create a clipboard backend
/// `Auto` prefers the wl-clipboard tools under Wayland (detected via WAYLAND_DISPLAY)
/// and falls back to arboard everywhere else or when they are missing
pub fn create_backend(kind: ClipboardBackendKind) -> Result<Box<dyn ClipboardBackend>> {
    match kind {
        ClipboardBackendKind::Wayland => Ok(Box::new(WaylandBackend::new()?)),
        ClipboardBackendKind::Arboard => Ok(Box::new(ArboardBackend::new()?)),
        ClipboardBackendKind::Auto => {
            if is_wayland() {
                log::info!("Detected Wayland display server");
                match WaylandBackend::new() {
                    Ok(backend) => return Ok(Box::new(backend)),
                    Err(e) => log::warn!("{:#}, falling back to arboard", e),
                }
            }
            let backend = ArboardBackend::new().context("No usable clipboard backend")?;
            Ok(Box::new(backend))
        }
    }
}

/// Create the key synthesizer used for the paste keystroke
/// `Auto` picks wtype under Wayland and xdotool otherwise
pub fn create_synth(kind: PasteToolKind) -> Box<dyn KeySynth> {
    match kind {
        PasteToolKind::Wtype => Box::new(WtypeSynth),
        PasteToolKind::Xdotool => Box::new(XdotoolSynth),
        PasteToolKind::Auto if is_wayland() => Box::new(WtypeSynth),
        PasteToolKind::Auto => Box::new(XdotoolSynth),
    }
}
