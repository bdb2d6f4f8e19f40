use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::geometry::rect_contains;
use crate::theme::Palette;
use crate::ui::UiFrame;
use crate::window::{WindowKind, WindowRegistry};

const ICON_WIDTH: u16 = 14;
const ICON_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopIcon {
    pub kind: WindowKind,
    pub glyph: &'static str,
    pub label: &'static str,
}

pub const DESKTOP_ICONS: [DesktopIcon; 4] = [
    DesktopIcon {
        kind: WindowKind::Music,
        glyph: "♫",
        label: "Music Player",
    },
    DesktopIcon {
        kind: WindowKind::Projects,
        glyph: "▤",
        label: "My Projects",
    },
    DesktopIcon {
        kind: WindowKind::Portfolio,
        glyph: "◉",
        label: "Portfolio",
    },
    DesktopIcon {
        kind: WindowKind::Game,
        glyph: "◆",
        label: "Simple Game",
    },
];

/// Column of launch icons in the top-left corner of the desktop.
#[derive(Debug, Clone)]
pub struct DesktopIcons {
    origin: (u16, u16),
    icons: &'static [DesktopIcon],
}

impl Default for DesktopIcons {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopIcons {
    pub fn new() -> Self {
        Self {
            origin: (1, 1),
            icons: &DESKTOP_ICONS,
        }
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        self.icons
    }

    pub fn icon_rect(&self, index: usize) -> Rect {
        Rect::new(
            self.origin.0,
            self.origin.1 + index as u16 * (ICON_HEIGHT + 1),
            ICON_WIDTH,
            ICON_HEIGHT,
        )
    }

    pub fn icon_at(&self, column: u16, row: u16) -> Option<&DesktopIcon> {
        self.icons
            .iter()
            .enumerate()
            .find(|(idx, _)| rect_contains(self.icon_rect(*idx), column, row))
            .map(|(_, icon)| icon)
    }

    /// Open the window for the icon under the pointer. Returns whether an
    /// icon was hit.
    pub fn handle_click(&self, registry: &mut WindowRegistry, column: u16, row: u16) -> bool {
        let Some(icon) = self.icon_at(column, row) else {
            return false;
        };
        registry.open_window(icon.kind);
        true
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, palette: &Palette) {
        let style = palette.desktop();
        for (idx, icon) in self.icons.iter().enumerate() {
            let rect = self.icon_rect(idx);
            let glyph = format!("[ {} ]", icon.glyph);
            let glyph_x = rect.x + (rect.width.saturating_sub(5)) / 2;
            frame.set_string(
                glyph_x,
                rect.y,
                &glyph,
                style.fg(palette.accent).add_modifier(Modifier::BOLD),
            );
            let label_x = rect.x + rect.width.saturating_sub(icon.label.chars().count() as u16) / 2;
            frame.set_string(label_x, rect.y + 1, icon.label, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_on_icon_opens_its_kind() {
        let icons = DesktopIcons::new();
        let mut reg = WindowRegistry::new();
        let rect = icons.icon_rect(3);
        assert!(icons.handle_click(&mut reg, rect.x + 2, rect.y + 1));
        let game = reg.open_window_of_kind(WindowKind::Game).unwrap();
        assert_eq!(reg.active_window_id(), Some(game.id));
    }

    #[test]
    fn click_between_icons_does_nothing() {
        let icons = DesktopIcons::new();
        let mut reg = WindowRegistry::new();
        let gap_row = icons.icon_rect(0).y + ICON_HEIGHT;
        assert!(!icons.handle_click(&mut reg, 3, gap_row));
        assert!(reg.windows().is_empty());
    }

    #[test]
    fn repeated_clicks_keep_one_window() {
        let icons = DesktopIcons::new();
        let mut reg = WindowRegistry::new();
        let rect = icons.icon_rect(0);
        icons.handle_click(&mut reg, rect.x, rect.y);
        icons.handle_click(&mut reg, rect.x, rect.y);
        assert_eq!(reg.windows().len(), 1);
    }
}
