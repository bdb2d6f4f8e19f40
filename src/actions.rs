use std::fmt;

/// Desktop-level commands reachable from the keyboard. Everything else a key
/// can do belongs to the active window's panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    ToggleTheme,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::ToggleTheme => "Toggle light/dark theme",
        };
        write!(f, "{}", s)
    }
}
