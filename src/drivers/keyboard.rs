use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};

/// Smooths over platform differences in what the terminal reports.
///
/// Release events never reach the desktop. Windows consoles also report key
/// repeats, and a held Esc would otherwise close a menu and then keep firing
/// into the panel underneath.
#[derive(Debug, Default)]
pub struct KeyboardNormalizer {
    esc_held: bool,
}

impl KeyboardNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&mut self, event: Event) -> Option<Event> {
        let Event::Key(mut key) = event else {
            return Some(event);
        };
        match key.kind {
            KeyEventKind::Release => {
                if key.code == KeyCode::Esc {
                    self.esc_held = false;
                }
                return None;
            }
            KeyEventKind::Repeat if cfg!(windows) => return None,
            KeyEventKind::Repeat | KeyEventKind::Press => {}
        }
        if key.code == KeyCode::Esc {
            if self.esc_held {
                return None;
            }
            self.esc_held = cfg!(windows);
        }
        // Some terminals report uppercase letters with SHIFT set, others
        // without. Bindings are matched on the bare character.
        if let KeyCode::Char(c) = key.code
            && c.is_ascii_uppercase()
        {
            key.modifiers.remove(KeyModifiers::SHIFT);
        }
        Some(Event::Key(key))
    }
}
