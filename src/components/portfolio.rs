use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{Event, KeyCode};
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::widgets::{Paragraph, Wrap};

use super::{Component, ComponentContext, centered_x, key_press, left_click};
use crate::geometry::rect_contains;
use crate::links::{LinkOpener, open_logged};
use crate::ui::UiFrame;
use crate::window::menu_bar::MenuCommand;

pub const PORTFOLIO_URL: &str = "https://aobir-banerjee.github.io/my-portfolio/";
pub const LOADING_DELAY: Duration = Duration::from_secs(1);

const OPEN_LABEL: &str = "[ Open in new tab ]";
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Shows the portfolio address after a short loading phase and hands the
/// page itself to the system browser.
#[derive(Debug)]
pub struct PortfolioViewer {
    url: &'static str,
    since_mount: Duration,
    links: Rc<dyn LinkOpener>,
}

impl PortfolioViewer {
    pub fn new(links: Rc<dyn LinkOpener>) -> Self {
        Self {
            url: PORTFOLIO_URL,
            since_mount: Duration::ZERO,
            links,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.since_mount < LOADING_DELAY
    }

    pub fn open_external(&self) {
        open_logged(self.links.as_ref(), self.url);
    }

    fn open_button(area: Rect) -> Rect {
        let x = (area.x + area.width).saturating_sub(OPEN_LABEL.len() as u16 + 1);
        Rect::new(x.max(area.x), area.y, OPEN_LABEL.len() as u16, 1)
    }
}

impl Component for PortfolioViewer {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        let palette = ctx.palette();
        frame.fill(area, palette.window());
        if area.height < 3 {
            return;
        }
        frame.set_string(area.x + 1, area.y, self.url, palette.muted());
        let button = Self::open_button(area);
        frame.set_string(button.x, button.y, OPEN_LABEL, palette.selected());

        let body = Rect::new(area.x, area.y + 2, area.width, area.height - 2);
        if self.is_loading() {
            let frame_idx = (self.since_mount.as_millis() / 125) as usize % SPINNER.len();
            let text = format!("{} Loading portfolio...", SPINNER[frame_idx]);
            frame.set_string(
                centered_x(body, &text),
                body.y + body.height / 2,
                &text,
                palette.accent(),
            );
            return;
        }
        let heading = "Portfolio";
        frame.set_string(
            centered_x(body, heading),
            body.y + 1,
            heading,
            palette.window().add_modifier(Modifier::BOLD),
        );
        let text = format!(
            "The portfolio is a web page and opens in your browser. \
             Press Enter or click the button above to view {}",
            self.url
        );
        frame.render_widget(
            Paragraph::new(text)
                .style(palette.window())
                .wrap(Wrap { trim: true }),
            Rect::new(
                body.x + 2,
                body.y + 3,
                body.width.saturating_sub(4),
                body.height.saturating_sub(3),
            ),
        );
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        if let Some(mouse) = left_click(event) {
            if rect_contains(Self::open_button(ctx.area()), mouse.column, mouse.row) {
                self.open_external();
                return true;
            }
            return false;
        }
        match key_press(event).map(|k| k.code) {
            Some(KeyCode::Enter) | Some(KeyCode::Char('o')) => {
                self.open_external();
                true
            }
            _ => false,
        }
    }

    fn tick(&mut self, elapsed: Duration) {
        self.since_mount = self.since_mount.saturating_add(elapsed);
    }

    fn menu_command(&mut self, command: MenuCommand) -> bool {
        match command {
            MenuCommand::Refresh => {
                self.since_mount = Duration::ZERO;
                true
            }
            MenuCommand::OpenExternal => {
                self.open_external();
                true
            }
            _ => false,
        }
    }
}
