//! The desktop: owns the window registry and everything hosted around it.
//!
//! Input is routed in a fixed order. A drag in progress owns pointer moves
//! and releases. A press goes to the taskbar, then to windows topmost-first,
//! then to the desktop icons. Keys go to the desktop bindings, then to the
//! active window's panel. After every event the registry's change events are
//! drained to create or drop window hosts.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::actions::Action;
use crate::components::{Component, ComponentContext, PanelContext, create_panel};
use crate::constants::TASKBAR_HEIGHT;
use crate::event_loop::ControlFlow;
use crate::geometry::{Geometry, Viewport, rect_contains};
use crate::icons::DesktopIcons;
use crate::keybindings::KeyBindings;
use crate::links::LinkOpener;
use crate::store::SettingsStore;
use crate::taskbar::{Taskbar, TaskbarClick};
use crate::theme::ThemeMode;
use crate::ui::UiFrame;
use crate::window::decorator::{ClassicDecorator, WindowDecorator};
use crate::window::menu_bar::{MenuBar, MenuClick};
use crate::window::{
    PointerCapture, RegistryEvent, ShellResponse, WindowId, WindowKind, WindowRecord,
    WindowRegistry, WindowShell,
};

/// Chrome, menu bar and panel for one open window.
#[derive(Debug)]
struct WindowHost {
    shell: WindowShell,
    menu: MenuBar,
    panel: Box<dyn Component>,
}

#[derive(Debug)]
pub struct Desktop {
    registry: WindowRegistry,
    hosts: HashMap<WindowId, WindowHost>,
    capture: PointerCapture,
    decorator: Arc<dyn WindowDecorator>,
    panels: PanelContext,
    theme: ThemeMode,
    keybindings: KeyBindings,
    icons: DesktopIcons,
    taskbar: Taskbar,
    screen: Rect,
    viewport: Viewport,
}

impl Desktop {
    /// `fallback_theme` applies only when the settings store has no saved
    /// preference.
    pub fn new(
        fallback_theme: ThemeMode,
        store: Rc<RefCell<SettingsStore>>,
        links: Rc<dyn LinkOpener>,
    ) -> Self {
        let theme = store.borrow().theme().unwrap_or(fallback_theme);
        Self {
            registry: WindowRegistry::new(),
            hosts: HashMap::new(),
            capture: PointerCapture::new(),
            decorator: Arc::new(ClassicDecorator),
            panels: PanelContext { store, links },
            theme,
            keybindings: KeyBindings::default(),
            icons: DesktopIcons::new(),
            taskbar: Taskbar::new(),
            screen: Rect::default(),
            viewport: Viewport::default(),
        }
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn capture_owner(&self) -> Option<WindowId> {
        self.capture.owner()
    }

    pub fn is_maximized(&self, id: WindowId) -> bool {
        self.hosts.get(&id).is_some_and(|h| h.shell.is_maximized())
    }

    pub fn has_host(&self, id: WindowId) -> bool {
        self.hosts.contains_key(&id)
    }

    pub fn open_menu(&self, id: WindowId) -> Option<&'static str> {
        self.hosts.get(&id).and_then(|h| h.menu.open_menu())
    }

    /// Geometry the window is drawn at, honoring maximize.
    pub fn window_geometry(&self, id: WindowId) -> Option<Geometry> {
        let record = self.registry.get(id)?;
        let host = self.hosts.get(&id)?;
        Some(host.shell.effective_geometry(record, self.viewport))
    }

    pub fn content_area(&self, id: WindowId) -> Option<Rect> {
        self.window_geometry(id)
            .map(|g| self.decorator.content_area(g, self.viewport.rect()))
    }

    pub fn menu_bar_area(&self, id: WindowId) -> Option<Rect> {
        self.window_geometry(id)
            .map(|g| self.decorator.menu_bar_area(g, self.viewport.rect()))
    }

    pub fn open_window(&mut self, kind: WindowKind) -> WindowId {
        let id = self.registry.open_window(kind);
        self.sync_hosts();
        id
    }

    pub fn close_window(&mut self, id: WindowId) {
        self.registry.close_window(id);
        self.sync_hosts();
    }

    pub fn focus_window(&mut self, id: WindowId) {
        self.registry.focus_window(id);
        self.sync_hosts();
    }

    /// Adopt a new terminal size. The bottom rows belong to the taskbar.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = Rect::new(0, 0, width, height);
        let bar_height = TASKBAR_HEIGHT.min(height);
        self.viewport = Viewport::new(width, height - bar_height);
        self.taskbar
            .set_area(Rect::new(0, height - bar_height, width, bar_height));
        for host in self.hosts.values() {
            host.shell.reclamp(&mut self.registry, self.viewport);
        }
        self.sync_hosts();
        tracing::debug!(width, height, viewport = ?self.viewport, "desktop resized");
    }

    /// Resize only when `area` differs from the last known screen.
    pub fn fit_to(&mut self, area: Rect) {
        if area != self.screen {
            self.resize(area.width, area.height);
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::debug!(theme = ?self.theme, "theme toggled");
        if let Err(err) = self.panels.store.borrow_mut().set_theme(self.theme) {
            tracing::warn!(error = %err, "could not save theme preference");
        }
    }

    pub fn tick(&mut self, elapsed: Duration) {
        for host in self.hosts.values_mut() {
            host.panel.tick(elapsed);
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        self.handle_event_at(event, Instant::now())
    }

    /// Like `handle_event`, with an explicit timestamp for double-click
    /// detection.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> ControlFlow {
        let flow = match event {
            Event::Mouse(mouse) => {
                self.handle_mouse(event, mouse, now);
                ControlFlow::Continue
            }
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                match self.keybindings.action_for_key(key) {
                    Some(Action::Quit) => ControlFlow::Quit,
                    Some(Action::ToggleTheme) => {
                        self.toggle_theme();
                        ControlFlow::Continue
                    }
                    None => {
                        if key.code == KeyCode::Esc && self.close_menus(None) {
                            return ControlFlow::Continue;
                        }
                        self.route_to_active(event);
                        ControlFlow::Continue
                    }
                }
            }
            Event::Resize(width, height) => {
                self.resize(*width, *height);
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        };
        self.sync_hosts();
        flow
    }

    fn panel_context(&self, id: WindowId, area: Rect) -> ComponentContext {
        let focused = self.registry.active_window_id() == Some(id);
        ComponentContext::new(focused, area, self.theme.palette())
    }

    fn route_to_active(&mut self, event: &Event) -> bool {
        let Some(id) = self.registry.active_window_id() else {
            return false;
        };
        let Some(area) = self.content_area(id) else {
            return false;
        };
        let ctx = self.panel_context(id, area);
        match self.hosts.get_mut(&id) {
            Some(host) => host.panel.handle_event(event, &ctx),
            None => false,
        }
    }

    /// Close every open dropdown except the one on `keep`. Returns whether
    /// anything was closed.
    fn close_menus(&mut self, keep: Option<WindowId>) -> bool {
        let mut closed = false;
        for (id, host) in self.hosts.iter_mut() {
            if Some(*id) != keep && host.menu.is_open() {
                host.menu.close();
                closed = true;
            }
        }
        closed
    }

    fn handle_mouse(&mut self, event: &Event, mouse: &MouseEvent, now: Instant) {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let target = self.pointer_down(event, column, row, now);
                self.close_menus(target);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(id) = self.capture.owner()
                    && let Some(host) = self.hosts.get_mut(&id)
                {
                    host.shell.pointer_move(
                        &mut self.registry,
                        self.viewport,
                        column as i32,
                        row as i32,
                    );
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(id) = self.capture.owner()
                    && let Some(host) = self.hosts.get_mut(&id)
                {
                    host.shell.pointer_up();
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                if let Some(id) = self.window_at(column, row)
                    && let Some(area) = self.content_area(id)
                    && rect_contains(area, column, row)
                {
                    let ctx = self.panel_context(id, area);
                    if let Some(host) = self.hosts.get_mut(&id) {
                        host.panel.handle_event(event, &ctx);
                    }
                }
            }
            _ => {}
        }
    }

    /// Topmost open window whose drawn geometry contains the cell.
    pub fn window_at(&self, column: u16, row: u16) -> Option<WindowId> {
        self.registry
            .paint_order()
            .iter()
            .rev()
            .find(|record| {
                self.hosts.get(&record.id).is_some_and(|host| {
                    host.shell
                        .contains(record, self.viewport, column, row)
                })
            })
            .map(|record| record.id)
    }

    /// Returns the window that took the press, if any.
    fn pointer_down(&mut self, event: &Event, column: u16, row: u16, now: Instant) -> Option<WindowId> {
        if rect_contains(self.taskbar.area(), column, row) {
            if self.taskbar.handle_click(&mut self.registry, column, row) == TaskbarClick::ToggleTheme
            {
                self.toggle_theme();
            }
            return None;
        }

        let bounds = self.viewport.rect();
        let order: Vec<WindowRecord> = self.registry.paint_order().into_iter().cloned().collect();
        for record in order.iter().rev() {
            let id = record.id;
            let Some(host) = self.hosts.get_mut(&id) else {
                continue;
            };
            let geometry = host.shell.effective_geometry(record, self.viewport);
            let bar = self.decorator.menu_bar_area(geometry, bounds);

            if host.menu.is_open() {
                match host.menu.handle_click(bar, column, row) {
                    MenuClick::Ignored => {}
                    MenuClick::Consumed => {
                        self.registry.focus_window(id);
                        return Some(id);
                    }
                    MenuClick::Command(command) => {
                        self.registry.focus_window(id);
                        tracing::debug!(window_id = %id, ?command, "menu command");
                        host.panel.menu_command(command);
                        return Some(id);
                    }
                }
            }

            match host
                .shell
                .pointer_down(&mut self.registry, self.viewport, column, row, now)
            {
                ShellResponse::Ignored => continue,
                ShellResponse::Handled | ShellResponse::Closed => return Some(id),
                ShellResponse::Body => {
                    if rect_contains(bar, column, row) {
                        host.menu.handle_click(bar, column, row);
                        return Some(id);
                    }
                    let area = self.decorator.content_area(geometry, bounds);
                    if rect_contains(area, column, row) {
                        let ctx = ComponentContext::new(true, area, self.theme.palette());
                        host.panel.handle_event(event, &ctx);
                    }
                    return Some(id);
                }
            }
        }

        self.icons.handle_click(&mut self.registry, column, row);
        None
    }

    /// Bring hosts in line with the registry: a host per open window, none
    /// for closed ones.
    fn sync_hosts(&mut self) {
        for event in self.registry.take_events() {
            match event {
                RegistryEvent::Opened { id, kind } => {
                    let host = self.new_host(id, kind);
                    self.place(&host);
                    self.hosts.insert(id, host);
                    tracing::debug!(window_id = %id, ?kind, "window host created");
                }
                RegistryEvent::Focused { id, reopened: true } => {
                    if !self.hosts.contains_key(&id)
                        && let Some(kind) = self.registry.get(id).map(|r| r.kind)
                    {
                        let host = self.new_host(id, kind);
                        self.place(&host);
                        self.hosts.insert(id, host);
                        tracing::debug!(window_id = %id, ?kind, "window host restored");
                    }
                }
                RegistryEvent::Closed { id } => {
                    if self.hosts.remove(&id).is_some() {
                        tracing::debug!(window_id = %id, "window host dropped");
                    }
                }
                RegistryEvent::Focused { .. } | RegistryEvent::Moved { .. } => {}
            }
        }
    }

    /// Keep a newly hosted window's header inside the viewport. Before the
    /// first resize there is no screen yet, and the next resize clamps.
    fn place(&mut self, host: &WindowHost) {
        if !self.screen.is_empty() {
            host.shell.reclamp(&mut self.registry, self.viewport);
        }
    }

    fn new_host(&self, id: WindowId, kind: WindowKind) -> WindowHost {
        WindowHost {
            shell: WindowShell::new(id, self.capture.clone(), Arc::clone(&self.decorator)),
            menu: MenuBar::for_kind(kind),
            panel: create_panel(kind, &self.panels),
        }
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let palette = self.theme.palette();
        let bounds = self.viewport.rect().intersection(frame.area());
        frame.fill(bounds, palette.desktop());
        self.icons.render(frame, &palette);

        let active = self.registry.active_window_id();
        for record in self.registry.paint_order() {
            let Some(host) = self.hosts.get_mut(&record.id) else {
                continue;
            };
            let focused = active == Some(record.id);
            let geometry = host.shell.effective_geometry(record, self.viewport);
            self.decorator
                .render_window(frame, geometry, bounds, record.title, focused, &palette);

            let bar = self.decorator.menu_bar_area(geometry, bounds);
            host.menu.render(frame, bar, &palette);

            let content = self.decorator.content_area(geometry, bounds);
            if content.width > 0 && content.height > 0 {
                let ctx = ComponentContext::new(focused, content, palette);
                let mut clipped = UiFrame::from_parts(content, frame.buffer_mut());
                host.panel.render(&mut clipped, content, &ctx);
            }

            let mut clipped = UiFrame::from_parts(bounds, frame.buffer_mut());
            host.menu.render_dropdown(&mut clipped, bar, &palette);
        }

        let clock = chrono::Local::now().format("%H:%M").to_string();
        self.taskbar
            .render(frame, &self.registry, self.theme, &clock, &palette);
    }
}
