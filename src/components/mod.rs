use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::links::LinkOpener;
use crate::store::SettingsStore;
use crate::ui::UiFrame;
use crate::window::WindowKind;
use crate::window::menu_bar::MenuCommand;

pub mod game;
pub mod music_player;
pub mod portfolio;
pub mod project_list;

pub use game::SimpleGame;
pub use music_player::MusicPlayer;
pub use portfolio::PortfolioViewer;
pub use project_list::ProjectList;

pub use crate::component_context::ComponentContext;

/// Content hosted inside a window. Panels know nothing about the window
/// manager; they get a content area, input routed by the desktop, and time.
pub trait Component: std::fmt::Debug {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }

    /// Advance time-driven state (simulated playback, loading delays).
    fn tick(&mut self, _elapsed: Duration) {}

    /// Handle a command chosen from the window's menu bar.
    fn menu_command(&mut self, _command: MenuCommand) -> bool {
        false
    }
}

/// Services shared by every panel the factory creates.
#[derive(Debug, Clone)]
pub struct PanelContext {
    pub store: Rc<RefCell<SettingsStore>>,
    pub links: Rc<dyn LinkOpener>,
}

pub fn create_panel(kind: WindowKind, ctx: &PanelContext) -> Box<dyn Component> {
    match kind {
        WindowKind::Music => Box::new(MusicPlayer::new()),
        WindowKind::Projects => Box::new(ProjectList::new(Rc::clone(&ctx.links))),
        WindowKind::Portfolio => Box::new(PortfolioViewer::new(Rc::clone(&ctx.links))),
        WindowKind::Game => Box::new(SimpleGame::new(Rc::clone(&ctx.store))),
    }
}

pub(crate) fn key_press(event: &Event) -> Option<&KeyEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(key),
        _ => None,
    }
}

pub(crate) fn left_click(event: &Event) -> Option<&MouseEvent> {
    match event {
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some(mouse)
        }
        _ => None,
    }
}

/// Column where `text` starts when centered in `area`.
pub(crate) fn centered_x(area: Rect, text: &str) -> u16 {
    let len = text.chars().count() as u16;
    area.x + area.width.saturating_sub(len) / 2
}

#[cfg(test)]
pub(crate) mod test_support {
    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };

    pub fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    pub fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }
}
