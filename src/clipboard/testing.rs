//! In-memory fakes for clipboard and key synthesis, shared by unit tests

use anyhow::{Result, anyhow};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use super::backend::ClipboardBackend;
use super::paste::{KeySynth, SyntheticKey};

#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub text: Option<String>,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub reads: usize,
    pub writes: Vec<String>,
}

impl MemoryClipboard {
    pub fn with_text(text: &str) -> Self {
        MemoryClipboard {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn read_text(&mut self) -> Result<Option<String>> {
        self.reads += 1;
        if self.fail_reads {
            return Err(anyhow!("clipboard busy"));
        }
        Ok(self.text.clone())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.fail_writes {
            return Err(anyhow!("clipboard locked"));
        }
        self.text = Some(text.to_string());
        self.writes.push(text.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// Clipboard whose state stays observable after being boxed
#[derive(Debug, Clone, Default)]
pub struct SharedClipboard(pub Arc<Mutex<MemoryClipboard>>);

impl SharedClipboard {
    pub fn with_text(text: &str) -> Self {
        SharedClipboard(Arc::new(Mutex::new(MemoryClipboard::with_text(text))))
    }

    pub fn set_text(&self, text: &str) {
        self.0.lock().unwrap().text = Some(text.to_string());
    }

    pub fn text(&self) -> Option<String> {
        self.0.lock().unwrap().text.clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.0.lock().unwrap().writes.clone()
    }
}

impl ClipboardBackend for SharedClipboard {
    fn read_text(&mut self) -> Result<Option<String>> {
        self.0.lock().unwrap().read_text()
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.0.lock().unwrap().write_text(text)
    }

    fn name(&self) -> &'static str {
        "shared-memory"
    }
}

/// Key synthesizer that remembers what it was asked to send
#[derive(Debug, Clone, Default)]
pub struct RecordingSynth {
    posted: Arc<Mutex<Vec<SyntheticKey>>>,
    rejecting: Arc<AtomicBool>,
}

impl RecordingSynth {
    pub fn posted(&self) -> Vec<SyntheticKey> {
        self.posted.lock().unwrap().clone()
    }

    pub fn reject(&self) {
        self.rejecting.store(true, Ordering::SeqCst);
    }
}

impl KeySynth for RecordingSynth {
    fn post_key_events(&self, events: &[SyntheticKey]) -> Result<()> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(anyhow!("no focused window"));
        }
        self.posted.lock().unwrap().extend_from_slice(events);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
