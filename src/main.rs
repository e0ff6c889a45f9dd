use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::event::{
    self, DisableFocusChange, EnableFocusChange, Event, KeyEventKind,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use clipstack::app::App;
use clipstack::clipboard::{self, ClipboardWatcher, PasteInjector};
use clipstack::event::{AppEvent, LoopHandle};
use clipstack::hotkey::{EvdevTap, HotkeyListener};
use clipstack::logging;
use clipstack::models::{HistoryStore, Snippet};
use clipstack::storage::{Config, ConfigStorage, TomlConfigStorage, ensure_directories};
use clipstack::ui::{self, TerminalSurface, Theme};
use clipstack::ui::menu::MENU_LABEL_CHARS;

const CONFIG_FILE_NAME: &str = "clipstack.toml";

/// Longest the loop waits for an event before redrawing (flash expiry)
const FRAME_TIMEOUT: Duration = Duration::from_millis(250);

#[derive(Parser)]
#[command(name = "clipstack")]
#[command(about = "Clipboard history with a global recall shortcut", version, long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/clipstack/clipstack.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the daemon with its terminal menu (default)
    Run,

    /// Print new clipboard text as it is copied, without the menu
    Watch,

    /// Put TEXT on the clipboard and paste it into the focused window
    Paste {
        /// Text to paste
        text: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cmd_run(cli.config),
        Commands::Watch => {
            env_logger::init();
            cmd_watch(cli.config)
        }
        Commands::Paste { text } => {
            env_logger::init();
            cmd_paste(cli.config, text)
        }
    }
}

/// Load the config file, falling back to defaults with a message when it's unusable
fn load_config(path: Option<PathBuf>, config_dir: &Path) -> (Config, Option<String>) {
    let path = path.unwrap_or_else(|| config_dir.join(CONFIG_FILE_NAME));
    let storage = TomlConfigStorage::new(path);

    match storage.load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(format!("{:#}", e))),
    }
}

/// Run the daemon: poll timer, global shortcut and terminal menu on one loop
fn cmd_run(config_path: Option<PathBuf>) -> Result<()> {
    let (config_dir, state_dir) = ensure_directories()?;
    let (config, startup_error) = load_config(config_path, &config_dir);

    let (flash_tx, flash_rx) = mpsc::channel();
    logging::init_logger(
        &state_dir,
        Some(flash_tx),
        &config.logging.file_level,
        &config.logging.flash_level,
    )?;
    if let Some(e) = &startup_error {
        log::info!("Using default configuration: {}", e);
    }

    let backend = clipboard::create_backend(config.general.clipboard_backend)?;
    let synth = clipboard::create_synth(config.general.paste_tool);
    log::info!("Clipboard via {}, paste via {}", backend.name(), synth.name());
    let injector = PasteInjector::new(synth, config.general.paste_delay());

    let (handle, events) = LoopHandle::channel();

    let mut listener = HotkeyListener::new(Box::new(EvdevTap::new(
        config.general.keyboard_device.clone(),
    )));
    if let Err(e) = listener.start(handle.clone(), config.general.hotkey_delay()) {
        log::warn!("Global shortcut disabled: {}", e);
    }

    // Selections are made in this terminal, so the paste waits until the user
    // switches back to the target window
    let mut app = App::new(backend, injector, TerminalSurface::new(), handle.clone())
        .with_deferred_paste()
        .with_flash_messages(
            flash_rx,
            Duration::from_millis(config.logging.flash_message_duration_ms),
        );
    app.startup_error = startup_error;
    app.set_hotkey_enabled(listener.is_enabled());

    handle.spawn_ticker(config.general.poll_interval());
    spawn_terminal_reader(handle);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_loop(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    listener.stop();
    log::info!("Exiting");
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<TerminalSurface>,
    events: &Receiver<AppEvent>,
) -> Result<()> {
    let theme = Theme::default();

    while !app.should_quit {
        app.poll_flash_messages();
        app.prune_flash_messages();
        terminal.draw(|frame| ui::draw(frame, app, &theme))?;

        match events.recv_timeout(FRAME_TIMEOUT) {
            Ok(event) => {
                app.handle_event(event);
                // Handle anything else already queued before redrawing
                while let Ok(event) = events.try_recv() {
                    app.handle_event(event);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Forward terminal input to the loop
fn spawn_terminal_reader(handle: LoopHandle) {
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    log::error!("Terminal input failed: {}", e);
                    handle.post(AppEvent::Quit);
                    break;
                }
            };

            let app_event = match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Event::FocusLost => AppEvent::FocusLost,
                Event::FocusGained | Event::Resize(..) => AppEvent::Redraw,
                _ => continue,
            };

            if !handle.post(app_event) {
                break;
            }
        }
    });
}

/// Poll the clipboard and print each new snippet
fn cmd_watch(config_path: Option<PathBuf>) -> Result<()> {
    let (config_dir, _) = ensure_directories()?;
    let (config, error) = load_config(config_path, &config_dir);
    if let Some(e) = error {
        log::warn!("{}; using defaults", e);
    }

    let mut backend = clipboard::create_backend(config.general.clipboard_backend)?;
    let mut watcher = ClipboardWatcher::new();
    let mut history = HistoryStore::new();

    let (handle, events) = LoopHandle::channel();
    handle.spawn_ticker(config.general.poll_interval());
    println!("Watching the {} clipboard, Ctrl-C to stop", backend.name());

    for event in events.iter() {
        if event != AppEvent::Tick {
            continue;
        }
        if watcher.poll(backend.as_mut(), &mut history) {
            if let Ok(latest) = history.get(0) {
                println!("{}", latest.one_line_label(MENU_LABEL_CHARS));
            }
        }
    }

    Ok(())
}

/// Inject one snippet the same way the selector does
fn cmd_paste(config_path: Option<PathBuf>, text: String) -> Result<()> {
    let snippet = Snippet::new(text);
    if snippet.is_empty() {
        bail!("Nothing to paste");
    }

    let (config_dir, _) = ensure_directories()?;
    let (config, error) = load_config(config_path, &config_dir);
    if let Some(e) = error {
        log::warn!("{}; using defaults", e);
    }

    let mut backend = clipboard::create_backend(config.general.clipboard_backend)?;
    let injector = PasteInjector::new(
        clipboard::create_synth(config.general.paste_tool),
        config.general.paste_delay(),
    );
    let mut watcher = ClipboardWatcher::new();

    let (handle, events) = LoopHandle::channel();
    injector.inject(&snippet, &mut watcher, backend.as_mut(), &handle)?;

    let event = events.recv().context("Paste was never scheduled")?;
    if event == AppEvent::EmitPaste {
        injector.emit_paste();
    }

    Ok(())
}
