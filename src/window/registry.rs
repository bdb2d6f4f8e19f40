//! The authoritative collection of window records.
//!
//! `WindowRegistry` is the only thing that mutates window state. Launch
//! surfaces and shells hold `&mut` to it for the duration of one input event
//! and issue commands; everything else reads snapshots. Commands never fail:
//! an unknown id leaves the registry untouched. Every applied mutation bumps
//! `revision()` and queues a `RegistryEvent` that the owner drains with
//! `take_events()`.

use super::stacking::{StackingCounter, elect_active};
use super::{WindowId, WindowKind, WindowRecord};
use crate::geometry::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A window of `kind` became open, either freshly created or a retained
    /// record brought back by `open_window`.
    Opened { id: WindowId, kind: WindowKind },
    /// A window was raised. `reopened` is set when the focus flipped a closed
    /// record back open.
    Focused { id: WindowId, reopened: bool },
    Closed { id: WindowId },
    Moved { id: WindowId, position: Position },
}

#[derive(Debug, Clone)]
pub struct WindowRegistry {
    windows: Vec<WindowRecord>,
    active: Option<WindowId>,
    stacking: StackingCounter,
    next_id: u64,
    revision: u64,
    events: Vec<RegistryEvent>,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self {
            windows: Vec::new(),
            active: None,
            stacking: StackingCounter::new(),
            next_id: 1,
            revision: 0,
            events: Vec::new(),
        }
    }

    /// All records, open and closed, in creation order.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn open_windows(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter().filter(|w| w.is_open)
    }

    /// Open records sorted bottom-to-top, i.e. paint order.
    pub fn paint_order(&self) -> Vec<&WindowRecord> {
        let mut open: Vec<&WindowRecord> = self.open_windows().collect();
        open.sort_by_key(|w| w.z_index);
        open
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn open_window_of_kind(&self, kind: WindowKind) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.kind == kind && w.is_open)
    }

    pub fn active_window_id(&self) -> Option<WindowId> {
        self.active
    }

    pub fn highest_stacking(&self) -> u64 {
        self.stacking.highest()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn take_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    fn index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id == id)
    }

    fn record(&mut self, event: RegistryEvent) {
        self.revision = self.revision.wrapping_add(1);
        self.events.push(event);
    }

    /// Open a window of `kind`, or raise the one already open. Returns the id
    /// of the window that ends up active.
    pub fn open_window(&mut self, kind: WindowKind) -> WindowId {
        if let Some(existing) = self.open_window_of_kind(kind).map(|w| w.id) {
            self.focus_window(existing);
            return existing;
        }

        let z_index = self.stacking.allocate();
        let id = match self.windows.iter_mut().find(|w| w.kind == kind) {
            // Closed record of this kind: keep its identity, reset to defaults.
            Some(retained) => {
                let id = retained.id;
                *retained = WindowRecord::new(id, kind, z_index);
                id
            }
            None => {
                let id = WindowId::from_raw(self.next_id);
                self.next_id += 1;
                self.windows.push(WindowRecord::new(id, kind, z_index));
                id
            }
        };
        self.active = Some(id);
        tracing::debug!(window_id = %id, ?kind, z_index, "opened window");
        self.record(RegistryEvent::Opened { id, kind });
        id
    }

    pub fn close_window(&mut self, id: WindowId) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        self.windows[idx].is_open = false;
        if self.active == Some(id) {
            self.active = elect_active(&self.windows);
        }
        tracing::debug!(window_id = %id, active = ?self.active, "closed window");
        self.record(RegistryEvent::Closed { id });
    }

    pub fn focus_window(&mut self, id: WindowId) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        let z_index = self.stacking.allocate();
        let window = &mut self.windows[idx];
        let reopened = !window.is_open;
        window.z_index = z_index;
        window.is_open = true;
        self.active = Some(id);
        tracing::debug!(window_id = %id, z_index, reopened, "focused window");
        self.record(RegistryEvent::Focused { id, reopened });
    }

    /// Overwrite a window's position. Callers clamp beforehand.
    pub fn update_window_position(&mut self, id: WindowId, position: Position) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        self.windows[idx].position = position;
        self.record(RegistryEvent::Moved { id, position });
    }
}
