//! Shared component rendering context
//!
//! `ComponentContext` carries what a hosted panel may need from its window
//! while rendering and handling input: whether the window is focused, where
//! its content area sits on screen, and the active palette.

use ratatui::layout::Rect;

use crate::theme::{Palette, ThemeMode};

#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    focused: bool,
    area: Rect,
    palette: Palette,
}

impl ComponentContext {
    pub fn new(focused: bool, area: Rect, palette: Palette) -> Self {
        Self {
            focused,
            area,
            palette,
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    /// Content area of the hosting window, in screen cells.
    pub const fn area(&self) -> Rect {
        self.area
    }

    pub const fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl Default for ComponentContext {
    fn default() -> Self {
        Self::new(false, Rect::default(), ThemeMode::default().palette())
    }
}
