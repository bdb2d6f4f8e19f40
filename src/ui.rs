//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to the
//! visible area.
//!
//! Windows can be dragged partially past the right and bottom edges of the
//! terminal, and maximized windows are sized from the viewport rather than the
//! buffer. Everything that paints goes through `UiFrame` or the free helpers
//! below so a rectangle that drifts outside the buffer is clipped instead of
//! panicking inside `Buffer`.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer. Used by tests
    /// that render into a bare `Buffer`.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Paint every cell of `rect` (clipped) blank with `style`.
    pub fn fill(&mut self, rect: Rect, style: Style) {
        let Some(clipped) = self.clip_rect(rect) else {
            return;
        };
        fill_rect(self.buffer, clipped, style);
    }

    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style) {
        let bounds = self.area.intersection(self.buffer.area);
        safe_set_string(self.buffer, bounds, x, y, text, style);
    }
}

pub(crate) fn fill_rect(buffer: &mut Buffer, rect: Rect, style: Style) {
    let rect = rect.intersection(buffer.area);
    for y in rect.y..rect.y.saturating_add(rect.height) {
        for x in rect.x..rect.x.saturating_add(rect.width) {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.reset();
                cell.set_symbol(" ");
                cell.set_style(style);
            }
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

/// Like `safe_set_string` but accepts a signed origin; characters left of
/// `bounds` are dropped one by one.
pub(crate) fn set_string_signed(
    buffer: &mut Buffer,
    bounds: Rect,
    x: i32,
    y: i32,
    text: &str,
    style: Style,
) {
    if y < bounds.y as i32 || y >= bounds.y as i32 + bounds.height as i32 {
        return;
    }
    let skip = (bounds.x as i32 - x).max(0) as usize;
    let start = x.max(bounds.x as i32);
    if start >= bounds.x as i32 + bounds.width as i32 {
        return;
    }
    let visible: String = text.chars().skip(skip).collect();
    safe_set_string(buffer, bounds, start as u16, y as u16, &visible, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}
