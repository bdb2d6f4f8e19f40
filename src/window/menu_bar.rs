//! Per-window menu bar.
//!
//! Every window carries `File`, `Edit`, a menu specific to its kind and
//! `Help`. Most entries are decorative; the wired ones produce a
//! `MenuCommand` the desktop forwards to the hosted panel.

use ratatui::layout::Rect;

use super::WindowKind;
use crate::geometry::rect_contains;
use crate::theme::Palette;
use crate::ui::{UiFrame, fill_rect, safe_set_string};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    PlayPause,
    NextTrack,
    PreviousTrack,
    Refresh,
    OpenExternal,
    NewGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Item {
        label: &'static str,
        shortcut: Option<&'static str>,
        command: Option<MenuCommand>,
    },
    Separator,
}

const fn item(label: &'static str) -> MenuEntry {
    MenuEntry::Item {
        label,
        shortcut: None,
        command: None,
    }
}

const fn hinted(label: &'static str, shortcut: &'static str) -> MenuEntry {
    MenuEntry::Item {
        label,
        shortcut: Some(shortcut),
        command: None,
    }
}

const fn wired(label: &'static str, command: MenuCommand) -> MenuEntry {
    MenuEntry::Item {
        label,
        shortcut: None,
        command: Some(command),
    }
}

const FILE_MENU: &[MenuEntry] = &[
    hinted("New", "Ctrl+N"),
    hinted("Open", "Ctrl+O"),
    MenuEntry::Separator,
    hinted("Save", "Ctrl+S"),
    MenuEntry::Separator,
    item("Exit"),
];

const EDIT_MENU: &[MenuEntry] = &[
    hinted("Undo", "Ctrl+Z"),
    hinted("Redo", "Ctrl+Y"),
    MenuEntry::Separator,
    hinted("Cut", "Ctrl+X"),
    hinted("Copy", "Ctrl+C"),
    hinted("Paste", "Ctrl+V"),
];

const PLAYBACK_MENU: &[MenuEntry] = &[
    wired("Play/Pause", MenuCommand::PlayPause),
    wired("Next Track", MenuCommand::NextTrack),
    wired("Previous Track", MenuCommand::PreviousTrack),
    MenuEntry::Separator,
    item("Volume"),
];

const VIEW_MENU: &[MenuEntry] = &[
    item("Details"),
    item("Icons"),
    item("List"),
    MenuEntry::Separator,
    wired("Refresh", MenuCommand::Refresh),
];

const OPTIONS_MENU: &[MenuEntry] = &[
    wired("Refresh", MenuCommand::Refresh),
    item("Print"),
    MenuEntry::Separator,
    wired("Open in New Tab", MenuCommand::OpenExternal),
];

const GAME_MENU: &[MenuEntry] = &[wired("New Game", MenuCommand::NewGame)];

const HELP_MENU: &[MenuEntry] = &[item("About"), item("Support")];

#[derive(Debug, Clone, Copy)]
pub struct Menu {
    pub title: &'static str,
    pub entries: &'static [MenuEntry],
}

/// Result of offering a pointer press to the menu bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuClick {
    /// Not on the bar or an open dropdown; route the press onward.
    Ignored,
    Consumed,
    Command(MenuCommand),
}

#[derive(Debug, Clone)]
pub struct MenuBar {
    menus: Vec<Menu>,
    open: Option<usize>,
}

impl MenuBar {
    pub fn for_kind(kind: WindowKind) -> Self {
        let specific = match kind {
            WindowKind::Music => Menu {
                title: "Playback",
                entries: PLAYBACK_MENU,
            },
            WindowKind::Projects => Menu {
                title: "View",
                entries: VIEW_MENU,
            },
            WindowKind::Portfolio => Menu {
                title: "Options",
                entries: OPTIONS_MENU,
            },
            WindowKind::Game => Menu {
                title: "Game",
                entries: GAME_MENU,
            },
        };
        Self {
            menus: vec![
                Menu {
                    title: "File",
                    entries: FILE_MENU,
                },
                Menu {
                    title: "Edit",
                    entries: EDIT_MENU,
                },
                specific,
                Menu {
                    title: "Help",
                    entries: HELP_MENU,
                },
            ],
            open: None,
        }
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn open_menu(&self) -> Option<&'static str> {
        self.open.map(|idx| self.menus[idx].title)
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    fn title_rects(&self, bar: Rect) -> Vec<Rect> {
        let mut x = bar.x;
        let right = bar.x.saturating_add(bar.width);
        self.menus
            .iter()
            .map(|menu| {
                let width = menu.title.chars().count() as u16 + 2;
                let rect = Rect::new(x, bar.y, width.min(right.saturating_sub(x)), 1);
                x = x.saturating_add(width);
                rect
            })
            .collect()
    }

    fn dropdown_rect(&self, bar: Rect, idx: usize) -> Rect {
        let Some(title) = self.title_rects(bar).get(idx).copied() else {
            return Rect::default();
        };
        let entries = self.menus[idx].entries;
        let inner = entries
            .iter()
            .map(|entry| match entry {
                MenuEntry::Item {
                    label, shortcut, ..
                } => {
                    label.chars().count()
                        + shortcut.map(|s| s.chars().count() + 2).unwrap_or(0)
                }
                MenuEntry::Separator => 0,
            })
            .max()
            .unwrap_or(0) as u16;
        Rect::new(
            title.x,
            bar.y.saturating_add(1),
            inner + 4,
            entries.len() as u16 + 2,
        )
    }

    /// Handle a press. `bar` is the visible menu bar row of the window.
    pub fn handle_click(&mut self, bar: Rect, column: u16, row: u16) -> MenuClick {
        if let Some(open) = self.open {
            let dropdown = self.dropdown_rect(bar, open);
            if rect_contains(dropdown, column, row) {
                let line = row.saturating_sub(dropdown.y);
                if line == 0 || line + 1 >= dropdown.height {
                    return MenuClick::Consumed;
                }
                return match self.menus[open].entries.get(line as usize - 1) {
                    Some(MenuEntry::Item { command, label, .. }) => {
                        self.open = None;
                        tracing::debug!(menu = self.menus[open].title, item = label, "menu item chosen");
                        match command {
                            Some(cmd) => MenuClick::Command(*cmd),
                            None => MenuClick::Consumed,
                        }
                    }
                    _ => MenuClick::Consumed,
                };
            }
        }

        if rect_contains(bar, column, row) {
            let hit = self
                .title_rects(bar)
                .iter()
                .position(|r| rect_contains(*r, column, row));
            self.open = match hit {
                Some(idx) if self.open != Some(idx) => Some(idx),
                _ => None,
            };
            return MenuClick::Consumed;
        }

        self.open = None;
        MenuClick::Ignored
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, bar: Rect, palette: &Palette) {
        if bar.width == 0 || bar.height == 0 {
            return;
        }
        frame.fill(bar, palette.menu());
        let bounds = bar.intersection(frame.area());
        for (idx, (menu, rect)) in self.menus.iter().zip(self.title_rects(bar)).enumerate() {
            let style = if self.open == Some(idx) {
                palette.selected()
            } else {
                palette.menu()
            };
            let label = format!(" {} ", menu.title);
            safe_set_string(frame.buffer_mut(), bounds, rect.x, rect.y, &label, style);
        }
    }

    /// Paint the open dropdown, if any. Called after the hosted panel so the
    /// dropdown sits on top of it.
    pub fn render_dropdown(&self, frame: &mut UiFrame<'_>, bar: Rect, palette: &Palette) {
        let Some(open) = self.open else {
            return;
        };
        let rect = self.dropdown_rect(bar, open);
        let bounds = frame.area().intersection(frame.buffer_mut().area);
        let rect = rect.intersection(bounds);
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let style = palette.menu();
        let buffer = frame.buffer_mut();
        fill_rect(buffer, rect, style);
        let inner = rect.width.saturating_sub(2) as usize;
        let bottom = rect.y + rect.height - 1;
        safe_set_string(buffer, bounds, rect.x, rect.y, &format!("┌{}┐", "─".repeat(inner)), style);
        safe_set_string(buffer, bounds, rect.x, bottom, &format!("└{}┘", "─".repeat(inner)), style);
        for (line, entry) in self.menus[open].entries.iter().enumerate() {
            let y = rect.y + 1 + line as u16;
            if y >= bottom {
                break;
            }
            let text = match entry {
                MenuEntry::Separator => format!("├{}┤", "─".repeat(inner)),
                MenuEntry::Item {
                    label, shortcut, ..
                } => {
                    let hint = shortcut.unwrap_or("");
                    let pad = inner.saturating_sub(label.chars().count() + hint.chars().count() + 2);
                    format!("│ {label}{}{hint} │", " ".repeat(pad))
                }
            };
            safe_set_string(buffer, bounds, rect.x, y, &text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR: Rect = Rect {
        x: 10,
        y: 5,
        width: 40,
        height: 1,
    };

    #[test]
    fn kind_specific_menu_sits_third() {
        let titles: Vec<&str> = MenuBar::for_kind(WindowKind::Music)
            .menus()
            .iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["File", "Edit", "Playback", "Help"]);
        assert_eq!(MenuBar::for_kind(WindowKind::Projects).menus()[2].title, "View");
        assert_eq!(MenuBar::for_kind(WindowKind::Portfolio).menus()[2].title, "Options");
        assert_eq!(MenuBar::for_kind(WindowKind::Game).menus()[2].title, "Game");
    }

    #[test]
    fn clicking_title_toggles_dropdown() {
        let mut bar = MenuBar::for_kind(WindowKind::Music);
        // " File " spans 10..16
        assert_eq!(bar.handle_click(BAR, 11, 5), MenuClick::Consumed);
        assert_eq!(bar.open_menu(), Some("File"));
        assert_eq!(bar.handle_click(BAR, 11, 5), MenuClick::Consumed);
        assert_eq!(bar.open_menu(), None);
    }

    #[test]
    fn choosing_wired_item_yields_command_and_closes() {
        let mut bar = MenuBar::for_kind(WindowKind::Music);
        // " File " + " Edit " = 12 cells, so " Playback " starts at 22
        bar.handle_click(BAR, 23, 5);
        assert_eq!(bar.open_menu(), Some("Playback"));
        // dropdown border at row 6, first item at row 7, second at row 8
        assert_eq!(
            bar.handle_click(BAR, 24, 8),
            MenuClick::Command(MenuCommand::NextTrack)
        );
        assert!(!bar.is_open());
    }

    #[test]
    fn inert_items_and_separators_are_consumed() {
        let mut bar = MenuBar::for_kind(WindowKind::Projects);
        bar.handle_click(BAR, 11, 5);
        // "Open" (row 8) is decorative
        assert_eq!(bar.handle_click(BAR, 12, 8), MenuClick::Consumed);
        assert!(!bar.is_open());

        bar.handle_click(BAR, 11, 5);
        // separator row keeps the menu open
        assert_eq!(bar.handle_click(BAR, 12, 9), MenuClick::Consumed);
        assert!(bar.is_open());
    }

    #[test]
    fn click_elsewhere_closes_and_passes_through() {
        let mut bar = MenuBar::for_kind(WindowKind::Game);
        bar.handle_click(BAR, 11, 5);
        assert_eq!(bar.handle_click(BAR, 45, 20), MenuClick::Ignored);
        assert!(!bar.is_open());
    }

    #[test]
    fn render_highlights_open_title() {
        use crate::theme::ThemeMode;
        use ratatui::buffer::Buffer;

        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let palette = ThemeMode::Dark.palette();
        let mut bar = MenuBar::for_kind(WindowKind::Portfolio);
        bar.handle_click(BAR, 23, 5);
        {
            let mut frame = UiFrame::from_parts(area, &mut buf);
            bar.render(&mut frame, BAR, &palette);
            bar.render_dropdown(&mut frame, BAR, &palette);
        }
        assert_eq!(buf.cell((23, 5)).unwrap().symbol(), "O");
        assert_eq!(buf.cell((23, 5)).unwrap().bg, palette.selected_bg);
        assert_eq!(buf.cell((22, 6)).unwrap().symbol(), "┌");
        let row: String = (22..40)
            .map(|x| buf.cell((x, 7)).unwrap().symbol().to_string())
            .collect();
        assert!(row.contains("Refresh"));
    }
}
