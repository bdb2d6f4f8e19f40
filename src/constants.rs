//! Shared crate-wide constants.

use std::time::Duration;

/// Minimum number of columns of a dragged window that must stay inside the
/// viewport so the user can grab its header again.
pub const MIN_VISIBLE_WIDTH: u16 = 12;

/// Minimum number of rows of a dragged window that must stay inside the
/// viewport. Two rows keep the header row itself on screen.
pub const MIN_VISIBLE_HEIGHT: u16 = 2;

/// Two header presses on the same window within this window toggle
/// maximize/restore.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// Stacking value the counter starts from. The first window opened gets
/// `INITIAL_STACKING + 1`.
pub const INITIAL_STACKING: u64 = 1;

/// Rows reserved at the bottom of the screen for the taskbar.
pub const TASKBAR_HEIGHT: u16 = 1;

/// File name of the settings document inside the data directory.
pub const SETTINGS_FILE: &str = "settings.json";
