//! clipstack - clipboard history with a global recall shortcut
//!
//! This library exports the core modules for testing and potential reuse.

pub mod app;
pub mod clipboard;
pub mod event;
pub mod hotkey;
pub mod input;
pub mod logging;
pub mod models;
pub mod storage;
pub mod ui;
