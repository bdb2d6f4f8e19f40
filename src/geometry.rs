//! Cell-space geometry shared by the registry, the window shell and the
//! renderer.
//!
//! Window origins are signed so pointer math can go negative before clamping;
//! sizes are unsigned cell counts, mirroring `ratatui::layout::Rect`.

use ratatui::layout::Rect;

use crate::constants::{MIN_VISIBLE_HEIGHT, MIN_VISIBLE_WIDTH};

/// Top-left corner of a window in viewport cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference, used for the pointer-to-corner drag offset.
    pub const fn offset_from(self, other: Position) -> Position {
        Position {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Position plus size; what the shell caches before maximizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub position: Position,
    pub size: Size,
}

impl Geometry {
    pub const fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    /// The part of this geometry that lands inside `bounds`, as a `Rect`.
    /// Returns an empty rect when nothing is visible.
    pub fn visible_rect(&self, bounds: Rect) -> Rect {
        let left = self.position.x.max(bounds.x as i32);
        let top = self.position.y.max(bounds.y as i32);
        let right = (self.position.x + self.size.width as i32)
            .min(bounds.x as i32 + bounds.width as i32);
        let bottom = (self.position.y + self.size.height as i32)
            .min(bounds.y as i32 + bounds.height as i32);
        if right <= left || bottom <= top {
            return Rect::default();
        }
        Rect {
            x: left as u16,
            y: top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        }
    }
}

/// Desktop area available to windows, in cells. Read from the terminal on
/// every resize; never configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.width,
            height: self.height,
        }
    }

    /// Largest `x` a dragged window may take while keeping its header
    /// reachable. Never below zero.
    pub fn max_drag_x(&self) -> i32 {
        (self.width as i32 - MIN_VISIBLE_WIDTH as i32).max(0)
    }

    pub fn max_drag_y(&self) -> i32 {
        (self.height as i32 - MIN_VISIBLE_HEIGHT as i32).max(0)
    }

    /// Geometry that fills the whole viewport; used while maximized.
    pub fn full_geometry(&self) -> Geometry {
        Geometry::new(Position::ORIGIN, Size::new(self.width, self.height))
    }
}

/// Clamp a candidate window origin so at least `MIN_VISIBLE_WIDTH` columns
/// and `MIN_VISIBLE_HEIGHT` rows of the header stay on screen.
pub fn clamp_drag_position(candidate: Position, viewport: Viewport) -> Position {
    Position {
        x: candidate.x.clamp(0, viewport.max_drag_x()),
        y: candidate.y.clamp(0, viewport.max_drag_y()),
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_in_bounds_values() {
        let vp = Viewport::new(80, 24);
        let pos = clamp_drag_position(Position::new(10, 5), vp);
        assert_eq!(pos, Position::new(10, 5));
    }

    #[test]
    fn clamp_pulls_far_coordinates_back() {
        let vp = Viewport::new(80, 24);
        let max_x = 80 - MIN_VISIBLE_WIDTH as i32;
        let max_y = 24 - MIN_VISIBLE_HEIGHT as i32;
        assert_eq!(
            clamp_drag_position(Position::new(-500, -3), vp),
            Position::ORIGIN
        );
        assert_eq!(
            clamp_drag_position(Position::new(10_000, 10_000), vp),
            Position::new(max_x, max_y)
        );
    }

    #[test]
    fn clamp_on_tiny_viewport_pins_to_origin() {
        let vp = Viewport::new(3, 1);
        assert_eq!(
            clamp_drag_position(Position::new(2, 2), vp),
            Position::ORIGIN
        );
    }

    #[test]
    fn visible_rect_clips_negative_and_overflowing_origins() {
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };
        let geo = Geometry::new(Position::new(-5, 20), Size::new(20, 10));
        let visible = geo.visible_rect(bounds);
        assert_eq!(visible.x, 0);
        assert_eq!(visible.y, 20);
        assert_eq!(visible.width, 15);
        assert_eq!(visible.height, 4);

        let gone = Geometry::new(Position::new(90, 0), Size::new(5, 5));
        assert_eq!(gone.visible_rect(bounds), Rect::default());
    }

    #[test]
    fn rect_contains_edges() {
        let r = Rect {
            x: 2,
            y: 2,
            width: 3,
            height: 2,
        };
        assert!(rect_contains(r, 2, 2));
        assert!(rect_contains(r, 4, 3));
        assert!(!rect_contains(r, 5, 3));
        assert!(!rect_contains(r, 4, 4));
    }
}
