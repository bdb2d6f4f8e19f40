use ratatui::layout::Rect;

use crate::geometry::rect_contains;
use crate::theme::{Palette, ThemeMode};
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};
use crate::window::{WindowId, WindowKind, WindowRegistry};

const START_LABEL: &str = " ⌂ Start ";
const QUICK_LAUNCH: [(WindowKind, &str); 3] = [
    (WindowKind::Music, " ♫ "),
    (WindowKind::Projects, " ▤ "),
    (WindowKind::Portfolio, " ◉ "),
];
const WINDOW_BUTTON_WIDTH: usize = 16;

/// Something on the taskbar that reacts to a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarTarget {
    Start,
    Launch(WindowKind),
    Window(WindowId),
    ThemeToggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarClick {
    Ignored,
    Handled,
    ToggleTheme,
}

#[derive(Debug, Clone, Copy)]
struct TaskbarHit {
    target: TaskbarTarget,
    rect: Rect,
}

/// Bottom row of the desktop. Hit regions are recorded while rendering, so a
/// click always maps to what was last drawn.
#[derive(Debug, Default)]
pub struct Taskbar {
    area: Rect,
    hits: Vec<TaskbarHit>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    pub fn begin_frame(&mut self) {
        self.hits.clear();
    }

    pub fn target_at(&self, column: u16, row: u16) -> Option<TaskbarTarget> {
        self.hits
            .iter()
            .find(|hit| rect_contains(hit.rect, column, row))
            .map(|hit| hit.target)
    }

    /// Apply a click. Launch and window buttons go straight to the registry;
    /// the theme toggle is reported back to the caller.
    pub fn handle_click(
        &self,
        registry: &mut WindowRegistry,
        column: u16,
        row: u16,
    ) -> TaskbarClick {
        if !rect_contains(self.area, column, row) {
            return TaskbarClick::Ignored;
        }
        match self.target_at(column, row) {
            Some(TaskbarTarget::Launch(kind)) => {
                registry.open_window(kind);
            }
            Some(TaskbarTarget::Window(id)) => registry.focus_window(id),
            Some(TaskbarTarget::ThemeToggle) => return TaskbarClick::ToggleTheme,
            Some(TaskbarTarget::Start) | None => {}
        }
        TaskbarClick::Handled
    }

    fn push(&mut self, target: TaskbarTarget, rect: Rect) {
        self.hits.push(TaskbarHit { target, rect });
    }

    pub fn render(
        &mut self,
        frame: &mut UiFrame<'_>,
        registry: &WindowRegistry,
        theme: ThemeMode,
        clock: &str,
        palette: &Palette,
    ) {
        self.begin_frame();
        let area = self.area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        frame.fill(area, palette.taskbar());
        let bounds = area.intersection(frame.area());
        let buffer = frame.buffer_mut();
        let y = area.y;
        let right = area.x.saturating_add(area.width);

        // Tray, right aligned: theme toggle then clock.
        let clock_label = format!(" {clock} ");
        let toggle_label = format!(" {} ", theme.toggle_glyph());
        let clock_x = right.saturating_sub(clock_label.chars().count() as u16);
        let toggle_x = clock_x.saturating_sub(toggle_label.chars().count() as u16);
        safe_set_string(buffer, bounds, clock_x, y, &clock_label, palette.taskbar());
        safe_set_string(buffer, bounds, toggle_x, y, &toggle_label, palette.taskbar());
        self.push(
            TaskbarTarget::ThemeToggle,
            Rect::new(toggle_x, y, toggle_label.chars().count() as u16, 1),
        );

        let mut x = area.x;
        let start_width = START_LABEL.chars().count() as u16;
        safe_set_string(buffer, bounds, x, y, START_LABEL, palette.selected());
        self.push(TaskbarTarget::Start, Rect::new(x, y, start_width, 1));
        x = x.saturating_add(start_width + 1);

        for (kind, glyph) in QUICK_LAUNCH {
            let width = glyph.chars().count() as u16;
            safe_set_string(buffer, bounds, x, y, glyph, palette.taskbar());
            self.push(TaskbarTarget::Launch(kind), Rect::new(x, y, width, 1));
            x = x.saturating_add(width);
        }
        safe_set_string(buffer, bounds, x, y, "│", palette.taskbar());
        x = x.saturating_add(2);

        let active = registry.active_window_id();
        for window in registry.open_windows() {
            let label = format!(
                " {} ",
                truncate_to_width(window.title, WINDOW_BUTTON_WIDTH - 2)
            );
            let width = label.chars().count() as u16;
            if x.saturating_add(width) > toggle_x {
                break;
            }
            let style = if Some(window.id) == active {
                palette.selected()
            } else {
                palette.taskbar()
            };
            safe_set_string(buffer, bounds, x, y, &label, style);
            self.push(TaskbarTarget::Window(window.id), Rect::new(x, y, width, 1));
            x = x.saturating_add(width + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    const AREA: Rect = Rect {
        x: 0,
        y: 23,
        width: 80,
        height: 1,
    };

    fn render(taskbar: &mut Taskbar, registry: &WindowRegistry) -> Buffer {
        let screen = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(screen);
        let mut frame = UiFrame::from_parts(screen, &mut buf);
        taskbar.set_area(AREA);
        taskbar.render(
            &mut frame,
            registry,
            ThemeMode::Dark,
            "09:41",
            &ThemeMode::Dark.palette(),
        );
        buf
    }

    fn find(taskbar: &Taskbar, target: TaskbarTarget) -> Rect {
        taskbar
            .hits
            .iter()
            .find(|h| h.target == target)
            .map(|h| h.rect)
            .unwrap()
    }

    #[test]
    fn quick_launch_opens_windows() {
        let mut reg = WindowRegistry::new();
        let mut bar = Taskbar::new();
        render(&mut bar, &reg);
        let music = find(&bar, TaskbarTarget::Launch(WindowKind::Music));
        assert_eq!(bar.handle_click(&mut reg, music.x, music.y), TaskbarClick::Handled);
        assert!(reg.open_window_of_kind(WindowKind::Music).is_some());
    }

    #[test]
    fn window_buttons_follow_creation_order_and_focus() {
        let mut reg = WindowRegistry::new();
        let a = reg.open_window(WindowKind::Music);
        let b = reg.open_window(WindowKind::Game);
        reg.focus_window(a);
        let mut bar = Taskbar::new();
        let buf = render(&mut bar, &reg);

        let ra = find(&bar, TaskbarTarget::Window(a));
        let rb = find(&bar, TaskbarTarget::Window(b));
        assert!(ra.x < rb.x);
        let palette = ThemeMode::Dark.palette();
        assert_eq!(buf.cell((ra.x + 1, 23)).unwrap().bg, palette.selected_bg);
        assert_eq!(buf.cell((rb.x + 1, 23)).unwrap().bg, palette.taskbar_bg);

        bar.handle_click(&mut reg, rb.x + 1, rb.y);
        assert_eq!(reg.active_window_id(), Some(b));
    }

    #[test]
    fn start_is_inert_and_toggle_is_reported() {
        let mut reg = WindowRegistry::new();
        let mut bar = Taskbar::new();
        render(&mut bar, &reg);
        let start = find(&bar, TaskbarTarget::Start);
        assert_eq!(bar.handle_click(&mut reg, start.x, start.y), TaskbarClick::Handled);
        assert!(reg.windows().is_empty());
        let toggle = find(&bar, TaskbarTarget::ThemeToggle);
        assert_eq!(
            bar.handle_click(&mut reg, toggle.x, toggle.y),
            TaskbarClick::ToggleTheme
        );
        assert_eq!(bar.handle_click(&mut reg, 5, 5), TaskbarClick::Ignored);
    }

    #[test]
    fn clock_is_drawn_at_right_edge() {
        let reg = WindowRegistry::new();
        let mut bar = Taskbar::new();
        let buf = render(&mut bar, &reg);
        let tail: String = (73..80)
            .map(|x| buf.cell((x, 23)).unwrap().symbol().to_string())
            .collect();
        assert_eq!(tail, " 09:41 ");
    }
}
