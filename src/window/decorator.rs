use ratatui::layout::Rect;

use crate::geometry::{Geometry, Size};
use crate::theme::Palette;
use crate::ui::{UiFrame, fill_rect, set_string_signed};

/// What a press on a window's header row means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Close,
    Minimize,
    Maximize,
    Drag,
    None,
}

/// Window chrome: paints the frame around a hosted panel and tells the shell
/// which header control sits under the pointer.
pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        geometry: Geometry,
        bounds: Rect,
        title: &str,
        focused: bool,
        palette: &Palette,
    );

    fn hit_test(&self, geometry: Geometry, column: i32, row: i32) -> HeaderAction;

    /// Row under the header reserved for the window's menu bar.
    fn menu_bar_area(&self, geometry: Geometry, bounds: Rect) -> Rect;

    /// Where the hosted panel draws.
    fn content_area(&self, geometry: Geometry, bounds: Rect) -> Rect;
}

// Header layout, in columns from the window's left edge:
// ` x - + ` then the centered title, then ` ✕ ` at the right edge.
const CLOSE_COL: i32 = 1;
const MINIMIZE_COL: i32 = 3;
const MAXIMIZE_COL: i32 = 5;
const CONTROLS_END: i32 = 7;

#[derive(Debug, Default)]
pub struct ClassicDecorator;

impl WindowDecorator for ClassicDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        geometry: Geometry,
        bounds: Rect,
        title: &str,
        focused: bool,
        palette: &Palette,
    ) {
        let visible = geometry.visible_rect(bounds);
        if visible.width == 0 || visible.height == 0 {
            return;
        }
        let buffer = frame.buffer_mut();
        let bounds = bounds.intersection(buffer.area);
        fill_rect(buffer, visible, palette.window());

        let left = geometry.position.x;
        let top = geometry.position.y;
        let width = geometry.size.width as i32;
        let height = geometry.size.height as i32;
        let right = left + width - 1;
        let bottom = top + height - 1;

        // Header row
        let header = palette.header(focused);
        let header_row = Geometry::new(
            geometry.position,
            Size::new(geometry.size.width, 1),
        )
        .visible_rect(bounds);
        fill_rect(buffer, header_row, header);
        set_string_signed(buffer, bounds, left + CLOSE_COL, top, "x", header);
        set_string_signed(buffer, bounds, left + MINIMIZE_COL, top, "-", header);
        set_string_signed(buffer, bounds, left + MAXIMIZE_COL, top, "+", header);
        if width > 3 {
            set_string_signed(buffer, bounds, right - 1, top, "✕", header);
        }
        let title_room = (width - CONTROLS_END - 3).max(0) as usize;
        let shown: String = title.chars().take(title_room).collect();
        let shown_len = shown.chars().count() as i32;
        if shown_len > 0 {
            let start = (left + (width - shown_len) / 2).max(left + CONTROLS_END);
            set_string_signed(buffer, bounds, start, top, &shown, header);
        }

        // Side and bottom borders
        let border = palette.border();
        for y in (top + 1)..bottom {
            set_string_signed(buffer, bounds, left, y, "│", border);
            if right > left {
                set_string_signed(buffer, bounds, right, y, "│", border);
            }
        }
        if bottom > top {
            let inner = (width - 2).max(0) as usize;
            let line = format!("└{}┘", "─".repeat(inner));
            set_string_signed(buffer, bounds, left, bottom, &line, border);
        }
    }

    fn hit_test(&self, geometry: Geometry, column: i32, row: i32) -> HeaderAction {
        let left = geometry.position.x;
        let width = geometry.size.width as i32;
        if row != geometry.position.y || column < left || column >= left + width {
            return HeaderAction::None;
        }
        let local = column - left;
        match local {
            CLOSE_COL => HeaderAction::Close,
            MINIMIZE_COL => HeaderAction::Minimize,
            MAXIMIZE_COL => HeaderAction::Maximize,
            _ if width > 3 && local == width - 2 => HeaderAction::Close,
            _ => HeaderAction::Drag,
        }
    }

    fn menu_bar_area(&self, geometry: Geometry, bounds: Rect) -> Rect {
        if geometry.size.height < 3 || geometry.size.width < 3 {
            return Rect::default();
        }
        let mut row = geometry;
        row.position.x += 1;
        row.position.y += 1;
        row.size = Size::new(geometry.size.width - 2, 1);
        row.visible_rect(bounds)
    }

    fn content_area(&self, geometry: Geometry, bounds: Rect) -> Rect {
        if geometry.size.height < 4 || geometry.size.width < 3 {
            return Rect::default();
        }
        let mut body = geometry;
        body.position.x += 1;
        body.position.y += 2;
        body.size = Size::new(geometry.size.width - 2, geometry.size.height - 3);
        body.visible_rect(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;
    use crate::theme::ThemeMode;
    use ratatui::buffer::Buffer;

    fn geo() -> Geometry {
        Geometry::new(Position::new(4, 2), Size::new(20, 8))
    }

    #[test]
    fn hit_test_maps_header_controls() {
        let d = ClassicDecorator;
        let g = geo();
        assert_eq!(d.hit_test(g, 5, 2), HeaderAction::Close);
        assert_eq!(d.hit_test(g, 7, 2), HeaderAction::Minimize);
        assert_eq!(d.hit_test(g, 9, 2), HeaderAction::Maximize);
        assert_eq!(d.hit_test(g, 4 + 20 - 2, 2), HeaderAction::Close);
        assert_eq!(d.hit_test(g, 14, 2), HeaderAction::Drag);
        assert_eq!(d.hit_test(g, 14, 3), HeaderAction::None);
        assert_eq!(d.hit_test(g, 24, 2), HeaderAction::None);
    }

    #[test]
    fn content_sits_below_header_and_menu() {
        let d = ClassicDecorator;
        let bounds = Rect::new(0, 0, 80, 24);
        let body = d.content_area(geo(), bounds);
        assert_eq!(body, Rect::new(5, 4, 18, 5));
        let menu = d.menu_bar_area(geo(), bounds);
        assert_eq!(menu, Rect::new(5, 3, 18, 1));
    }

    #[test]
    fn render_draws_title_and_borders() {
        let area = Rect::new(0, 0, 30, 12);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let palette = ThemeMode::Dark.palette();
        ClassicDecorator.render_window(&mut frame, geo(), area, "Tune", true, &palette);
        let header: String = (4..24)
            .map(|x| buf.cell((x, 2)).unwrap().symbol().to_string())
            .collect();
        assert!(header.contains("Tune"));
        assert_eq!(buf.cell((4, 5)).unwrap().symbol(), "│");
        assert_eq!(buf.cell((4, 9)).unwrap().symbol(), "└");
        assert_eq!(buf.cell((23, 9)).unwrap().symbol(), "┘");
    }
}
