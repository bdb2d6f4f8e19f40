use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use indoc::indoc;
use tracing::Level;

use term_desk::desktop::Desktop;
use term_desk::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use term_desk::links::{LinkOpener, RecordingOpener, SystemBrowser};
use term_desk::runner::run_desktop;
use term_desk::store::SettingsStore;
use term_desk::theme::ThemeMode;

const APP_DIR: &str = "term-desk";

const LONG_ABOUT: &str = indoc! {"
    A simulated desktop in the terminal.

    Open the music player, project list, portfolio viewer or the game from
    the desktop icons or the taskbar. Drag windows by their header row,
    double-click a header to maximize, and use the x button to close.

    Ctrl+T toggles the light and dark themes. Ctrl+Q quits.
"};

#[derive(Parser, Debug)]
#[command(
    name = "term-desk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simulated desktop with stackable, draggable windows",
    long_about = LONG_ABOUT
)]
struct Cli {
    /// Theme to start with when no preference has been saved yet.
    #[arg(long, value_enum, value_name = "MODE")]
    theme: Option<ThemeMode>,

    /// Where settings.json lives. Defaults to the platform data directory.
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Keep settings in memory only.
    #[arg(long, conflicts_with = "data_dir")]
    no_persist: bool,

    /// Log link requests instead of launching the system browser.
    #[arg(long)]
    no_browser: bool,

    /// Append logs to this file. Without it, logs are discarded.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: Level,

    /// Milliseconds between idle redraws.
    #[arg(long, value_name = "MS", default_value_t = 33)]
    tick_ms: u64,
}

struct DesktopConfig {
    theme: ThemeMode,
    data_dir: Option<PathBuf>,
    open_browser: bool,
    log_file: Option<PathBuf>,
    log_level: Level,
    tick: Duration,
}

impl TryFrom<&Cli> for DesktopConfig {
    type Error = String;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if !(10..=1000).contains(&cli.tick_ms) {
            return Err("tick-ms must be between 10 and 1000".to_string());
        }
        let data_dir = if cli.no_persist {
            None
        } else {
            match &cli.data_dir {
                Some(dir) => Some(dir.clone()),
                None => Some(
                    dirs::data_dir()
                        .ok_or("no platform data directory; pass --data-dir or --no-persist")?
                        .join(APP_DIR),
                ),
            }
        };
        if let Some(path) = &cli.log_file
            && path.is_dir()
        {
            return Err(format!("log file {} is a directory", path.display()));
        }
        Ok(Self {
            theme: cli.theme.unwrap_or_default(),
            data_dir,
            open_browser: !cli.no_browser,
            log_file: cli.log_file.clone(),
            log_level: cli.log_level,
            tick: Duration::from_millis(cli.tick_ms),
        })
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = DesktopConfig::try_from(&cli)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    term_desk::tracing_sub::init(config.log_level, config.log_file.as_deref())?;

    let store = match &config.data_dir {
        Some(dir) => SettingsStore::open_or_default(dir),
        None => SettingsStore::in_memory(),
    };
    tracing::info!(path = ?store.path(), "settings loaded");

    let links: Rc<dyn LinkOpener> = if config.open_browser {
        Rc::new(SystemBrowser)
    } else {
        Rc::new(RecordingOpener::new())
    };
    let mut desktop = Desktop::new(config.theme, Rc::new(RefCell::new(store)), links);

    let mut output = ConsoleOutputDriver::new()?;
    run_desktop(
        ConsoleInputDriver::new(),
        &mut output,
        &mut desktop,
        config.tick,
    )
}
