//! Per-window interaction state machine.
//!
//! A `WindowShell` turns pointer gestures on one window's chrome into
//! registry commands:
//!
//! ```text
//! Closed -> Open(normal) <-> Open(maximized) -> Closed
//!               |    ^
//!        press  v    | release
//!           Open(normal, dragging)
//! ```
//!
//! While dragging, the shell holds a `CaptureGuard` so the desktop routes
//! every pointer move and release to it regardless of where the pointer is.
//! The guard lives inside the drag state, so ending the drag or dropping the
//! shell (window closed mid-drag) always releases the capture.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use super::decorator::{HeaderAction, WindowDecorator};
use super::{WindowId, WindowRecord, WindowRegistry};
use crate::constants::DOUBLE_CLICK_WINDOW;
use crate::geometry::{Geometry, Position, Viewport, clamp_drag_position};

/// Which window, if any, currently owns pointer moves and releases.
#[derive(Debug, Clone, Default)]
pub struct PointerCapture {
    owner: Rc<Cell<Option<WindowId>>>,
}

impl PointerCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(&self) -> Option<WindowId> {
        self.owner.get()
    }

    pub fn acquire(&self, id: WindowId) -> CaptureGuard {
        self.owner.set(Some(id));
        CaptureGuard {
            owner: Rc::clone(&self.owner),
            id,
        }
    }
}

/// Releases the pointer capture on drop, unless another window has taken it
/// since.
#[derive(Debug)]
pub struct CaptureGuard {
    owner: Rc<Cell<Option<WindowId>>>,
    id: WindowId,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if self.owner.get() == Some(self.id) {
            self.owner.set(None);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellMode {
    Normal,
    Maximized { restore: Geometry },
}

#[derive(Debug)]
struct DragState {
    offset: Position,
    _capture: CaptureGuard,
}

/// Outcome of a pointer press routed to a shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellResponse {
    /// The press was outside this window.
    Ignored,
    /// Chrome consumed the press.
    Handled,
    /// The close control was pressed; the window is now closed.
    Closed,
    /// The press landed below the header; the window was focused and the
    /// event belongs to the menu bar or the hosted panel.
    Body,
}

#[derive(Debug)]
pub struct WindowShell {
    id: WindowId,
    mode: ShellMode,
    drag: Option<DragState>,
    last_header_press: Option<Instant>,
    capture: PointerCapture,
    decorator: Arc<dyn WindowDecorator>,
}

impl WindowShell {
    pub fn new(id: WindowId, capture: PointerCapture, decorator: Arc<dyn WindowDecorator>) -> Self {
        Self {
            id,
            mode: ShellMode::Normal,
            drag: None,
            last_header_press: None,
            capture,
            decorator,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn is_maximized(&self) -> bool {
        matches!(self.mode, ShellMode::Maximized { .. })
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Geometry to render at: the full viewport while maximized, the
    /// registry's geometry otherwise.
    pub fn effective_geometry(&self, record: &WindowRecord, viewport: Viewport) -> Geometry {
        match self.mode {
            ShellMode::Normal => record.geometry(),
            ShellMode::Maximized { .. } => viewport.full_geometry(),
        }
    }

    pub fn contains(&self, record: &WindowRecord, viewport: Viewport, column: u16, row: u16) -> bool {
        let geometry = self.effective_geometry(record, viewport);
        let (column, row) = (column as i32, row as i32);
        column >= geometry.position.x
            && column < geometry.position.x + geometry.size.width as i32
            && row >= geometry.position.y
            && row < geometry.position.y + geometry.size.height as i32
    }

    pub fn pointer_down(
        &mut self,
        registry: &mut WindowRegistry,
        viewport: Viewport,
        column: u16,
        row: u16,
        now: Instant,
    ) -> ShellResponse {
        let Some(record) = registry.get(self.id) else {
            return ShellResponse::Ignored;
        };
        if !self.contains(record, viewport, column, row) {
            return ShellResponse::Ignored;
        }
        let geometry = self.effective_geometry(record, viewport);
        let pointer = Position::new(column as i32, row as i32);
        match self.decorator.hit_test(geometry, pointer.x, pointer.y) {
            HeaderAction::Close => {
                self.drag = None;
                registry.close_window(self.id);
                ShellResponse::Closed
            }
            HeaderAction::Minimize => {
                tracing::trace!(window_id = %self.id, "minimize is not supported");
                ShellResponse::Handled
            }
            HeaderAction::Maximize => {
                registry.focus_window(self.id);
                self.toggle_maximize(registry, viewport);
                self.last_header_press = None;
                ShellResponse::Handled
            }
            HeaderAction::Drag => {
                registry.focus_window(self.id);
                if let Some(prev) = self.last_header_press
                    && now.saturating_duration_since(prev) <= DOUBLE_CLICK_WINDOW
                {
                    self.last_header_press = None;
                    self.toggle_maximize(registry, viewport);
                    return ShellResponse::Handled;
                }
                self.last_header_press = Some(now);
                if !self.is_maximized() {
                    self.drag = Some(DragState {
                        offset: pointer.offset_from(geometry.position),
                        _capture: self.capture.acquire(self.id),
                    });
                }
                ShellResponse::Handled
            }
            HeaderAction::None => {
                registry.focus_window(self.id);
                ShellResponse::Body
            }
        }
    }

    /// Apply a pointer move while dragging. Returns `false` when no drag is
    /// in progress.
    pub fn pointer_move(
        &mut self,
        registry: &mut WindowRegistry,
        viewport: Viewport,
        column: i32,
        row: i32,
    ) -> bool {
        let Some(drag) = self.drag.as_ref() else {
            return false;
        };
        let candidate = Position::new(column, row).offset_from(drag.offset);
        registry.update_window_position(self.id, clamp_drag_position(candidate, viewport));
        true
    }

    pub fn pointer_up(&mut self) -> bool {
        self.drag.take().is_some()
    }

    pub fn toggle_maximize(&mut self, registry: &mut WindowRegistry, viewport: Viewport) {
        match self.mode {
            ShellMode::Normal => {
                let Some(record) = registry.get(self.id) else {
                    return;
                };
                self.drag = None;
                self.mode = ShellMode::Maximized {
                    restore: record.geometry(),
                };
                tracing::debug!(window_id = %self.id, ?viewport, "maximized window");
            }
            ShellMode::Maximized { restore } => {
                // The viewport may have shrunk while maximized.
                let position = clamp_drag_position(restore.position, viewport);
                registry.update_window_position(self.id, position);
                self.mode = ShellMode::Normal;
                tracing::debug!(window_id = %self.id, ?position, "restored window");
            }
        }
    }

    /// Pull a normal window back inside the drag bounds after the viewport
    /// shrank. Maximized windows follow the viewport on their own.
    pub fn reclamp(&self, registry: &mut WindowRegistry, viewport: Viewport) {
        if self.is_maximized() {
            return;
        }
        let Some(record) = registry.get(self.id) else {
            return;
        };
        let clamped = clamp_drag_position(record.position, viewport);
        if clamped != record.position {
            registry.update_window_position(self.id, clamped);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MIN_VISIBLE_HEIGHT, MIN_VISIBLE_WIDTH};
    use crate::geometry::Size;
    use crate::window::WindowKind;
    use crate::window::decorator::ClassicDecorator;
    use std::time::Duration;

    const VIEWPORT: Viewport = Viewport::new(120, 40);

    fn setup(kind: WindowKind) -> (WindowRegistry, WindowShell, PointerCapture) {
        let mut reg = WindowRegistry::new();
        let id = reg.open_window(kind);
        let capture = PointerCapture::new();
        let shell = WindowShell::new(id, capture.clone(), Arc::new(ClassicDecorator));
        (reg, shell, capture)
    }

    fn header_point(reg: &WindowRegistry, shell: &WindowShell) -> (u16, u16) {
        let pos = reg.get(shell.id()).unwrap().position;
        ((pos.x + 10) as u16, pos.y as u16)
    }

    #[test]
    fn header_press_focuses_and_starts_drag() {
        let (mut reg, mut shell, capture) = setup(WindowKind::Music);
        let other = reg.open_window(WindowKind::Projects);
        assert_eq!(reg.active_window_id(), Some(other));

        let (col, row) = header_point(&reg, &shell);
        let resp = shell.pointer_down(&mut reg, VIEWPORT, col, row, Instant::now());
        assert_eq!(resp, ShellResponse::Handled);
        assert_eq!(reg.active_window_id(), Some(shell.id()));
        assert!(shell.is_dragging());
        assert_eq!(capture.owner(), Some(shell.id()));
    }

    #[test]
    fn drag_keeps_pointer_offset() {
        let (mut reg, mut shell, _) = setup(WindowKind::Music);
        let start = reg.get(shell.id()).unwrap().position;
        let (col, row) = header_point(&reg, &shell);
        shell.pointer_down(&mut reg, VIEWPORT, col, row, Instant::now());
        shell.pointer_move(&mut reg, VIEWPORT, col as i32 + 5, row as i32 + 3);
        assert_eq!(
            reg.get(shell.id()).unwrap().position,
            Position::new(start.x + 5, start.y + 3)
        );
    }

    #[test]
    fn drag_clamps_far_outside_viewport() {
        let (mut reg, mut shell, _) = setup(WindowKind::Portfolio);
        let (col, row) = header_point(&reg, &shell);
        shell.pointer_down(&mut reg, VIEWPORT, col, row, Instant::now());

        shell.pointer_move(&mut reg, VIEWPORT, -10_000, -10_000);
        assert_eq!(reg.get(shell.id()).unwrap().position, Position::ORIGIN);

        shell.pointer_move(&mut reg, VIEWPORT, 10_000, 10_000);
        assert_eq!(
            reg.get(shell.id()).unwrap().position,
            Position::new(
                VIEWPORT.width as i32 - MIN_VISIBLE_WIDTH as i32,
                VIEWPORT.height as i32 - MIN_VISIBLE_HEIGHT as i32
            )
        );
    }

    #[test]
    fn release_ends_drag_and_capture() {
        let (mut reg, mut shell, capture) = setup(WindowKind::Music);
        let (col, row) = header_point(&reg, &shell);
        shell.pointer_down(&mut reg, VIEWPORT, col, row, Instant::now());
        assert!(shell.pointer_up());
        assert!(!shell.is_dragging());
        assert_eq!(capture.owner(), None);
        let before = reg.get(shell.id()).unwrap().position;
        assert!(!shell.pointer_move(&mut reg, VIEWPORT, 1, 1));
        assert_eq!(reg.get(shell.id()).unwrap().position, before);
    }

    #[test]
    fn dropping_shell_mid_drag_releases_capture() {
        let (mut reg, mut shell, capture) = setup(WindowKind::Music);
        let (col, row) = header_point(&reg, &shell);
        shell.pointer_down(&mut reg, VIEWPORT, col, row, Instant::now());
        assert!(capture.owner().is_some());
        drop(shell);
        assert_eq!(capture.owner(), None);
    }

    #[test]
    fn maximize_then_restore_round_trips_geometry() {
        let (mut reg, mut shell, _) = setup(WindowKind::Music);
        reg.update_window_position(shell.id(), Position::new(14, 16));
        let before = reg.get(shell.id()).unwrap().geometry();

        shell.toggle_maximize(&mut reg, VIEWPORT);
        assert!(shell.is_maximized());
        let record = reg.get(shell.id()).unwrap().clone();
        assert_eq!(
            shell.effective_geometry(&record, VIEWPORT),
            Geometry::new(Position::ORIGIN, Size::new(VIEWPORT.width, VIEWPORT.height))
        );
        // registry keeps the pre-maximize layout
        assert_eq!(record.geometry(), before);

        shell.toggle_maximize(&mut reg, VIEWPORT);
        assert!(!shell.is_maximized());
        let record = reg.get(shell.id()).unwrap();
        assert_eq!(shell.effective_geometry(record, VIEWPORT), before);
    }

    #[test]
    fn header_press_while_maximized_does_not_drag() {
        let (mut reg, mut shell, capture) = setup(WindowKind::Music);
        shell.toggle_maximize(&mut reg, VIEWPORT);
        let resp = shell.pointer_down(&mut reg, VIEWPORT, 30, 0, Instant::now());
        assert_eq!(resp, ShellResponse::Handled);
        assert!(!shell.is_dragging());
        assert_eq!(capture.owner(), None);
    }

    #[test]
    fn double_click_header_toggles_maximize() {
        let (mut reg, mut shell, _) = setup(WindowKind::Music);
        let (col, row) = header_point(&reg, &shell);
        let t0 = Instant::now();
        shell.pointer_down(&mut reg, VIEWPORT, col, row, t0);
        shell.pointer_up();
        shell.pointer_down(&mut reg, VIEWPORT, col, row, t0 + Duration::from_millis(200));
        assert!(shell.is_maximized());

        // slow second press does not count
        let (mut reg, mut shell, _) = setup(WindowKind::Music);
        shell.pointer_down(&mut reg, VIEWPORT, col, row, t0);
        shell.pointer_up();
        shell.pointer_down(&mut reg, VIEWPORT, col, row, t0 + Duration::from_secs(2));
        assert!(!shell.is_maximized());
    }

    #[test]
    fn maximize_control_toggles() {
        let (mut reg, mut shell, _) = setup(WindowKind::Music);
        let pos = reg.get(shell.id()).unwrap().position;
        let resp = shell.pointer_down(
            &mut reg,
            VIEWPORT,
            (pos.x + 5) as u16,
            pos.y as u16,
            Instant::now(),
        );
        assert_eq!(resp, ShellResponse::Handled);
        assert!(shell.is_maximized());
    }

    #[test]
    fn close_control_closes_without_focusing() {
        let (mut reg, mut shell, _) = setup(WindowKind::Music);
        let other = reg.open_window(WindowKind::Projects);
        let highest = reg.highest_stacking();
        let pos = reg.get(shell.id()).unwrap().position;
        let resp = shell.pointer_down(
            &mut reg,
            VIEWPORT,
            (pos.x + 1) as u16,
            pos.y as u16,
            Instant::now(),
        );
        assert_eq!(resp, ShellResponse::Closed);
        assert!(!reg.get(shell.id()).unwrap().is_open);
        assert_eq!(reg.highest_stacking(), highest);
        assert_eq!(reg.active_window_id(), Some(other));
    }

    #[test]
    fn minimize_control_changes_nothing() {
        let (mut reg, mut shell, _) = setup(WindowKind::Music);
        let before = reg.windows().to_vec();
        let pos = before[0].position;
        let resp = shell.pointer_down(
            &mut reg,
            VIEWPORT,
            (pos.x + 3) as u16,
            pos.y as u16,
            Instant::now(),
        );
        assert_eq!(resp, ShellResponse::Handled);
        assert_eq!(reg.windows(), before.as_slice());
        assert!(!shell.is_maximized());
    }

    #[test]
    fn body_click_focuses() {
        let (mut reg, mut shell, _) = setup(WindowKind::Music);
        reg.open_window(WindowKind::Projects);
        let pos = reg.get(shell.id()).unwrap().position;
        let resp = shell.pointer_down(
            &mut reg,
            VIEWPORT,
            (pos.x + 2) as u16,
            (pos.y + 4) as u16,
            Instant::now(),
        );
        assert_eq!(resp, ShellResponse::Body);
        assert_eq!(reg.active_window_id(), Some(shell.id()));
        assert!(!shell.is_dragging());
    }

    #[test]
    fn press_outside_is_ignored() {
        let (mut reg, mut shell, _) = setup(WindowKind::Music);
        let highest = reg.highest_stacking();
        let resp = shell.pointer_down(&mut reg, VIEWPORT, 0, 39, Instant::now());
        assert_eq!(resp, ShellResponse::Ignored);
        assert_eq!(reg.highest_stacking(), highest);
    }

    #[test]
    fn restore_into_smaller_viewport_is_clamped() {
        let (mut reg, mut shell, _) = setup(WindowKind::Music);
        reg.update_window_position(shell.id(), Position::new(100, 30));
        shell.toggle_maximize(&mut reg, VIEWPORT);
        let small = Viewport::new(60, 19);
        shell.toggle_maximize(&mut reg, small);
        assert!(!shell.is_maximized());
        assert_eq!(
            reg.get(shell.id()).unwrap().position,
            Position::new(small.max_drag_x(), small.max_drag_y())
        );
    }

    #[test]
    fn reclamp_after_viewport_shrinks() {
        let (mut reg, shell, _) = setup(WindowKind::Portfolio);
        reg.update_window_position(shell.id(), Position::new(100, 30));
        let small = Viewport::new(40, 12);
        shell.reclamp(&mut reg, small);
        assert_eq!(
            reg.get(shell.id()).unwrap().position,
            Position::new(small.max_drag_x(), small.max_drag_y())
        );
    }
}
