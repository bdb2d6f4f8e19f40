use std::rc::Rc;

use crossterm::event::{Event, KeyCode};
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Wrap};

use super::{Component, ComponentContext, key_press, left_click};
use crate::geometry::rect_contains;
use crate::links::{LinkOpener, open_logged};
use crate::ui::UiFrame;
use crate::window::menu_bar::MenuCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub image_url: &'static str,
    pub demo_url: Option<&'static str>,
    pub repo_url: Option<&'static str>,
}

pub const PROJECTS: [Project; 3] = [
    Project {
        title: "Music Visualizer",
        description: "An interactive music visualizer created with Three.js and Web Audio API",
        tags: &["Three.js", "Web Audio", "JavaScript"],
        image_url: "https://images.unsplash.com/photo-1616424625127-cda59ecef870?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3",
        demo_url: Some("https://example.com/demo"),
        repo_url: Some("https://github.com/yourusername/visualizer"),
    },
    Project {
        title: "Beat Maker App",
        description: "A browser-based application for creating drum patterns and beats",
        tags: &["React", "Web Audio", "CSS"],
        image_url: "https://images.unsplash.com/photo-1493225277624-f3f94c036a1e?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3",
        demo_url: Some("https://example.com/beatmaker"),
        repo_url: Some("https://github.com/yourusername/beatmaker"),
    },
    Project {
        title: "Audio Processing Tool",
        description: "A tool for basic audio processing with effects like reverb, delay, and EQ",
        tags: &["Web Audio", "JavaScript", "DSP"],
        image_url: "https://images.unsplash.com/photo-1470225620780-dba8ba36b745?w=500&auto=format&fit=crop&q=60&ixlib=rb-4.0.3",
        demo_url: Some("https://example.com/audioprocessor"),
        repo_url: Some("https://github.com/yourusername/audio-processor"),
    },
];

const LIST_WIDTH: u16 = 24;
const DEMO_LABEL: &str = "[ Live Demo ]";
const REPO_LABEL: &str = "[ Repository ]";

#[derive(Debug)]
struct Panes {
    list: Rect,
    details: Rect,
    demo: Rect,
    repo: Rect,
}

impl Panes {
    fn compute(area: Rect) -> Self {
        let list_width = LIST_WIDTH.min(area.width / 2);
        let list = Rect::new(area.x, area.y, list_width, area.height);
        let details = Rect::new(
            area.x + list_width + 1,
            area.y,
            area.width.saturating_sub(list_width + 1),
            area.height,
        );
        let buttons_y = (details.y + details.height).saturating_sub(1);
        let demo = Rect::new(details.x, buttons_y, DEMO_LABEL.len() as u16, 1);
        let repo = Rect::new(
            details.x + demo.width + 2,
            buttons_y,
            REPO_LABEL.len() as u16,
            1,
        );
        Self {
            list,
            details,
            demo,
            repo,
        }
    }
}

#[derive(Debug)]
pub struct ProjectList {
    projects: &'static [Project],
    selected: usize,
    offset: usize,
    links: Rc<dyn LinkOpener>,
}

impl ProjectList {
    pub fn new(links: Rc<dyn LinkOpener>) -> Self {
        Self {
            projects: &PROJECTS,
            selected: 0,
            offset: 0,
            links,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_project(&self) -> &Project {
        &self.projects[self.selected]
    }

    fn bump_selection(&mut self, delta: isize) {
        if delta.is_negative() {
            self.selected = self.selected.saturating_sub(delta.unsigned_abs());
        } else {
            self.selected = (self.selected + delta as usize).min(self.projects.len() - 1);
        }
    }

    fn keep_selected_in_view(&mut self, view: usize) {
        if view == 0 {
            self.offset = 0;
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + view {
            self.offset = self.selected + 1 - view;
        }
    }

    pub fn open_demo(&self) -> bool {
        match self.selected_project().demo_url {
            Some(url) => {
                open_logged(self.links.as_ref(), url);
                true
            }
            None => false,
        }
    }

    pub fn open_repo(&self) -> bool {
        match self.selected_project().repo_url {
            Some(url) => {
                open_logged(self.links.as_ref(), url);
                true
            }
            None => false,
        }
    }
}

impl Component for ProjectList {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        let palette = ctx.palette();
        frame.fill(area, palette.window());
        if area.width < 8 || area.height == 0 {
            return;
        }
        let panes = Panes::compute(area);
        let view = panes.list.height as usize;
        self.keep_selected_in_view(view);

        let items = self
            .projects
            .iter()
            .skip(self.offset)
            .take(view)
            .map(|p| ListItem::new(format!("▸ {}", p.title)))
            .collect::<Vec<_>>();
        let mut state = ListState::default();
        state.select(Some(self.selected - self.offset));
        let list = List::new(items)
            .style(palette.window())
            .highlight_style(palette.selected());
        let clip = frame.area();
        let list_area = panes.list.intersection(clip);
        if list_area.width > 0 && list_area.height > 0 {
            StatefulWidget::render(list, list_area, frame.buffer_mut(), &mut state);
        }

        for y in panes.list.y..panes.list.y + panes.list.height {
            frame.set_string(panes.list.x + panes.list.width, y, "│", palette.border());
        }

        let project = *self.selected_project();
        let details = panes.details;
        if details.width == 0 {
            return;
        }
        frame.set_string(
            details.x,
            details.y,
            project.title,
            palette.window().add_modifier(Modifier::BOLD),
        );
        let tags = project
            .tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        frame.set_string(details.x, details.y + 1, &tags, palette.accent());
        let body = Rect::new(
            details.x,
            details.y + 3,
            details.width,
            details.height.saturating_sub(5),
        );
        frame.render_widget(
            Paragraph::new(project.description)
                .style(palette.window())
                .wrap(Wrap { trim: true }),
            body,
        );
        if project.demo_url.is_some() {
            frame.set_string(panes.demo.x, panes.demo.y, DEMO_LABEL, palette.selected());
        }
        if project.repo_url.is_some() {
            frame.set_string(panes.repo.x, panes.repo.y, REPO_LABEL, palette.selected());
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        if let Some(mouse) = left_click(event) {
            let panes = Panes::compute(ctx.area());
            let (column, row) = (mouse.column, mouse.row);
            if rect_contains(panes.list, column, row) {
                let index = self.offset + (row - panes.list.y) as usize;
                if index < self.projects.len() {
                    self.selected = index;
                    return true;
                }
                return false;
            }
            if rect_contains(panes.demo, column, row) {
                return self.open_demo();
            }
            if rect_contains(panes.repo, column, row) {
                return self.open_repo();
            }
            return false;
        }
        let Some(key) = key_press(event) else {
            return false;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.bump_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.bump_selection(1),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.projects.len() - 1,
            KeyCode::Enter | KeyCode::Char('d') => return self.open_demo(),
            KeyCode::Char('r') => return self.open_repo(),
            _ => return false,
        }
        true
    }

    fn menu_command(&mut self, command: MenuCommand) -> bool {
        match command {
            MenuCommand::Refresh => {
                self.selected = 0;
                self.offset = 0;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::{click, key};
    use crate::links::RecordingOpener;
    use crate::theme::ThemeMode;
    use ratatui::buffer::Buffer;

    const AREA: Rect = Rect {
        x: 23,
        y: 5,
        width: 60,
        height: 13,
    };

    fn setup() -> (ProjectList, Rc<RecordingOpener>) {
        let rec = Rc::new(RecordingOpener::new());
        (ProjectList::new(rec.clone()), rec)
    }

    fn ctx() -> ComponentContext {
        ComponentContext::new(true, AREA, ThemeMode::Light.palette())
    }

    #[test]
    fn selection_moves_with_keys_and_stops_at_edges() {
        let (mut list, _) = setup();
        list.handle_event(&key(KeyCode::Down), &ctx());
        assert_eq!(list.selected(), 1);
        list.handle_event(&key(KeyCode::Char('j')), &ctx());
        list.handle_event(&key(KeyCode::Char('j')), &ctx());
        assert_eq!(list.selected(), 2);
        list.handle_event(&key(KeyCode::Home), &ctx());
        assert_eq!(list.selected(), 0);
        list.handle_event(&key(KeyCode::Up), &ctx());
        assert_eq!(list.selected(), 0);
        list.handle_event(&key(KeyCode::End), &ctx());
        assert_eq!(list.selected(), 2);
    }

    #[test]
    fn enter_and_r_open_links_for_selection() {
        let (mut list, rec) = setup();
        list.handle_event(&key(KeyCode::Down), &ctx());
        assert!(list.handle_event(&key(KeyCode::Enter), &ctx()));
        assert!(list.handle_event(&key(KeyCode::Char('r')), &ctx()));
        assert_eq!(
            rec.opened(),
            vec![
                "https://example.com/beatmaker",
                "https://github.com/yourusername/beatmaker"
            ]
        );
    }

    #[test]
    fn clicking_rows_and_buttons() {
        let (mut list, rec) = setup();
        let panes = Panes::compute(AREA);
        assert!(list.handle_event(&click(panes.list.x + 1, panes.list.y + 2), &ctx()));
        assert_eq!(list.selected(), 2);
        // below the last project
        assert!(!list.handle_event(&click(panes.list.x + 1, panes.list.y + 5), &ctx()));
        list.handle_event(&click(panes.repo.x, panes.repo.y), &ctx());
        assert_eq!(rec.opened(), vec!["https://github.com/yourusername/audio-processor"]);
    }

    #[test]
    fn refresh_resets_selection() {
        let (mut list, _) = setup();
        list.handle_event(&key(KeyCode::End), &ctx());
        assert!(list.menu_command(MenuCommand::Refresh));
        assert_eq!(list.selected(), 0);
        assert!(!list.menu_command(MenuCommand::NewGame));
    }

    #[test]
    fn render_shows_list_and_details() {
        let screen = Rect::new(0, 0, 90, 20);
        let mut buf = Buffer::empty(screen);
        let (mut list, _) = setup();
        {
            let mut frame = UiFrame::from_parts(screen, &mut buf);
            list.render(&mut frame, AREA, &ctx());
        }
        let row = |y: u16| -> String {
            (0..90)
                .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                .collect()
        };
        assert!(row(AREA.y).contains("Music Visualizer"));
        assert!(row(AREA.y + 2).contains("Audio Processing Tool"));
        assert!(row(AREA.y + 1).contains("#Three.js"));
        assert!(row(AREA.y + AREA.height - 1).contains("Live Demo"));
    }
}
