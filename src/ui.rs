//! `UiFrame`: a clipping wrapper around the terminal frame.
//!
//! Window fragments routinely extend past the desktop edge while being
//! dragged or resized; writing those cells into the underlying buffer
//! would panic. All drawing goes through this wrapper so every rect is
//! clipped to the visible area first.

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

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        (clipped.width > 0 && clipped.height > 0).then_some(clipped)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Write a string starting at (x, y), truncated at the clip edge.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style) {
        let Some(bounds) = self.clip_rect(Rect {
            x,
            y,
            width: self.area.width.saturating_sub(x.saturating_sub(self.area.x)),
            height: 1,
        }) else {
            return;
        };
        let max = bounds.width as usize;
        let truncated: String = text.chars().take(max).collect();
        self.buffer.set_string(bounds.x, bounds.y, truncated, style);
    }

    /// Apply a style to every cell in `rect` (clipped), keeping symbols.
    pub fn fill_style(&mut self, rect: Rect, style: Style) {
        let Some(bounds) = self.clip_rect(rect) else {
            return;
        };
        for y in bounds.y..bounds.y.saturating_add(bounds.height) {
            for x in bounds.x..bounds.x.saturating_add(bounds.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_style(style);
                }
            }
        }
    }

    /// Fill `rect` (clipped) with a repeated symbol and style.
    pub fn fill(&mut self, rect: Rect, symbol: &str, style: Style) {
        let Some(bounds) = self.clip_rect(rect) else {
            return;
        };
        for y in bounds.y..bounds.y.saturating_add(bounds.height) {
            for x in bounds.x..bounds.x.saturating_add(bounds.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(symbol);
                    cell.set_style(style);
                }
            }
        }
    }

    /// Set a single cell if it falls inside the clip area.
    pub fn put(&mut self, x: u16, y: u16, symbol: &str, style: Style) {
        if rect_cell_visible(self.area, x, y)
            && let Some(cell) = self.buffer.cell_mut((x, y))
        {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }
}

fn rect_cell_visible(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x
        && x < area.x.saturating_add(area.width)
        && y >= area.y
        && y < area.y.saturating_add(area.height)
}
