//! Pure window geometry in virtual pixel space.
//!
//! Everything here is total integer arithmetic: malformed or extreme
//! deltas saturate instead of panicking, and the size floors are enforced
//! with origin compensation so the corner opposite a resize grip never
//! drifts.

use ratatui::prelude::Rect;
use serde::{Deserialize, Serialize};

use crate::constants::{
    CASCADE_BASE_LEFT, CASCADE_BASE_TOP, CASCADE_STEP, CELL_PX_H, CELL_PX_W, MIN_WINDOW_HEIGHT,
    MIN_WINDOW_WIDTH,
};

/// Window origin in pixels, relative to the desktop viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub top: i32,
    pub left: i32,
}

impl Position {
    pub const fn new(top: i32, left: i32) -> Self {
        Self { top, left }
    }
}

/// Window extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Clamp both axes up to the resizable floor.
    pub fn floored(self) -> Self {
        Self {
            width: self.width.max(MIN_WINDOW_WIDTH),
            height: self.height.max(MIN_WINDOW_HEIGHT),
        }
    }
}

/// A positioned extent; the unit the manager stores per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub position: Position,
    pub size: Size,
}

impl PixelRect {
    pub const fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    pub fn right(&self) -> i64 {
        self.position.left as i64 + self.size.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.position.top as i64 + self.size.height as i64
    }
}

/// The eight resize affordances around a window border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    pub fn includes_left(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    pub fn includes_right(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    pub fn includes_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    pub fn includes_bottom(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }
}

/// Clamp a window origin so its title bar stays reachable: fully inside
/// the viewport when it fits, pinned to the origin when it doesn't.
pub fn clamp_to_viewport(position: Position, size: Size, viewport: Size) -> Position {
    let max_left = (viewport.width as i64 - size.width as i64).max(0) as i32;
    let max_top = (viewport.height as i64 - size.height as i64).max(0) as i32;
    Position {
        left: position.left.clamp(0, max_left),
        top: position.top.clamp(0, max_top),
    }
}

/// Clip a rect to the viewport edge by edge. Unlike [`clamp_to_viewport`]
/// this never relocates an edge that already fits, so a resize grown past
/// the desktop boundary loses the overflow without yanking the fixed
/// opposite edge. The size floor still wins near the boundary.
pub fn clip_to_viewport(rect: PixelRect, viewport: Size) -> PixelRect {
    let left = rect.position.left.max(0);
    let top = rect.position.top.max(0);
    let right = rect.right().min(viewport.width as i64);
    let bottom = rect.bottom().min(viewport.height as i64);
    let width = (right - left as i64).max(0) as u32;
    let height = (bottom - top as i64).max(0) as u32;
    PixelRect::new(Position::new(top, left), Size::new(width, height).floored())
}

/// Move a window by a pointer delta, keeping it inside the viewport.
pub fn apply_drag(start: Position, dx: i32, dy: i32, size: Size, viewport: Size) -> Position {
    let moved = Position {
        left: start.left.saturating_add(dx),
        top: start.top.saturating_add(dy),
    };
    clamp_to_viewport(moved, size, viewport)
}

/// Resize a window from one of its eight grips.
///
/// West/north grips shift the origin while shrinking the extent so the
/// opposite corner stays fixed; when the size floor bites, the origin is
/// compensated so that corner still does not move.
pub fn apply_resize(start: PixelRect, edge: ResizeEdge, dx: i32, dy: i32) -> PixelRect {
    let mut left = start.position.left as i64;
    let mut top = start.position.top as i64;
    let mut width = start.size.width as i64;
    let mut height = start.size.height as i64;
    let dx = dx as i64;
    let dy = dy as i64;

    if edge.includes_left() {
        left += dx;
        width -= dx;
    }
    if edge.includes_right() {
        width += dx;
    }
    if edge.includes_top() {
        top += dy;
        height -= dy;
    }
    if edge.includes_bottom() {
        height += dy;
    }

    let min_w = MIN_WINDOW_WIDTH as i64;
    let min_h = MIN_WINDOW_HEIGHT as i64;
    if width < min_w {
        if edge.includes_left() {
            left -= min_w - width;
        }
        width = min_w;
    }
    if height < min_h {
        if edge.includes_top() {
            top -= min_h - height;
        }
        height = min_h;
    }

    let max_extent = u32::MAX as i64;
    PixelRect {
        position: Position {
            left: left.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            top: top.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        },
        size: Size {
            width: width.min(max_extent) as u32,
            height: height.min(max_extent) as u32,
        },
    }
}

/// Initial placement for the n-th open window: diagonal cascade from the
/// base origin, wrapping back to the base once the offset would push the
/// window's bottom/right corner off-screen.
pub fn cascade_position(open_count: usize, size: Size, viewport: Size) -> Position {
    let steps_for = |span: u32, base: i32, extent: u32| -> usize {
        let room = span as i64 - base as i64 - extent as i64;
        if room <= 0 {
            1
        } else {
            (room / CASCADE_STEP as i64) as usize + 1
        }
    };
    let steps = steps_for(viewport.width, CASCADE_BASE_LEFT, size.width)
        .min(steps_for(viewport.height, CASCADE_BASE_TOP, size.height))
        .max(1);
    let n = (open_count % steps) as i32;
    Position {
        left: CASCADE_BASE_LEFT + n * CASCADE_STEP,
        top: CASCADE_BASE_TOP + n * CASCADE_STEP,
    }
}

/// Pixel position of a pointer event, taken at the cell's center so a
/// one-cell mouse move maps to one cell's worth of pixels.
pub fn pointer_px(column: u16, row: u16) -> (i32, i32) {
    (
        column as i32 * CELL_PX_W as i32 + (CELL_PX_W / 2) as i32,
        row as i32 * CELL_PX_H as i32 + (CELL_PX_H / 2) as i32,
    )
}

/// Project a pixel rect onto terminal cells, clipping at the origin.
/// The right/bottom edges round outward so a window never loses its
/// border to truncation.
pub fn px_rect_to_cells(rect: PixelRect) -> Rect {
    let left = rect.position.left.max(0) as u32;
    let top = rect.position.top.max(0) as u32;
    let right = rect.right().max(0) as u64;
    let bottom = rect.bottom().max(0) as u64;
    let x = left / CELL_PX_W;
    let y = top / CELL_PX_H;
    let x1 = right.div_ceil(CELL_PX_W as u64);
    let y1 = bottom.div_ceil(CELL_PX_H as u64);
    Rect {
        x: x.min(u16::MAX as u32) as u16,
        y: y.min(u16::MAX as u32) as u16,
        width: x1.saturating_sub(x as u64).min(u16::MAX as u64) as u16,
        height: y1.saturating_sub(y as u64).min(u16::MAX as u64) as u16,
    }
}

/// Viewport size in pixels for a cell area.
pub fn cells_to_px_size(area: Rect) -> Size {
    Size {
        width: area.width as u32 * CELL_PX_W,
        height: area.height as u32 * CELL_PX_H,
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

    const VIEWPORT: Size = Size::new(1920, 1080);

    #[test]
    fn drag_round_trip_returns_to_origin() {
        let size = Size::new(400, 300);
        let start = Position::new(200, 250);
        let moved = apply_drag(start, 37, -53, size, VIEWPORT);
        let back = apply_drag(moved, -37, 53, size, VIEWPORT);
        assert_eq!(back, start);
    }

    #[test]
    fn drag_clamps_to_viewport() {
        let size = Size::new(400, 300);
        let pos = apply_drag(Position::new(10, 10), -5000, -5000, size, VIEWPORT);
        assert_eq!(pos, Position::new(0, 0));
        let pos = apply_drag(Position::new(10, 10), 50_000, 50_000, size, VIEWPORT);
        assert_eq!(pos, Position::new(780, 1520));
    }

    #[test]
    fn oversized_window_pins_to_origin() {
        let size = Size::new(4000, 3000);
        let pos = apply_drag(Position::new(50, 50), 100, 100, size, VIEWPORT);
        assert_eq!(pos, Position::new(0, 0));
    }

    #[test]
    fn resize_nw_keeps_bottom_right_fixed() {
        let start = PixelRect::new(Position::new(100, 100), Size::new(500, 400));
        let before_right = start.right();
        let before_bottom = start.bottom();
        let resized = apply_resize(start, ResizeEdge::TopLeft, 60, -40);
        assert_eq!(resized.position.left, 160);
        assert_eq!(resized.position.top, 60);
        assert_eq!(resized.size, Size::new(440, 440));
        assert_eq!(resized.right(), before_right);
        assert_eq!(resized.bottom(), before_bottom);
    }

    #[test]
    fn resize_floor_holds_under_huge_negative_delta() {
        let start = PixelRect::new(Position::new(0, 0), Size::new(800, 600));
        let resized = apply_resize(start, ResizeEdge::BottomRight, -100_000, -100_000);
        assert_eq!(resized.size, Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
        // south-east grip: origin untouched
        assert_eq!(resized.position, Position::new(0, 0));
    }

    #[test]
    fn resize_floor_via_west_grip_keeps_right_edge_fixed() {
        let start = PixelRect::new(Position::new(0, 100), Size::new(500, 400));
        let resized = apply_resize(start, ResizeEdge::Left, 100_000, 0);
        assert_eq!(resized.size.width, MIN_WINDOW_WIDTH);
        assert_eq!(resized.right(), start.right());
    }

    #[test]
    fn cascade_steps_diagonally_then_wraps() {
        let size = Size::new(800, 600);
        let p0 = cascade_position(0, size, VIEWPORT);
        let p1 = cascade_position(1, size, VIEWPORT);
        assert_eq!(p0, Position::new(100, 100));
        assert_eq!(p1, Position::new(140, 140));
        // 1080 - 100 - 600 = 380 px of room -> 10 diagonal steps fit
        let wrapped = cascade_position(10, size, VIEWPORT);
        assert_eq!(wrapped, p0);
    }

    #[test]
    fn cascade_with_no_room_stays_at_base() {
        let size = Size::new(4000, 3000);
        for n in 0..4 {
            assert_eq!(
                cascade_position(n, size, VIEWPORT),
                Position::new(CASCADE_BASE_TOP, CASCADE_BASE_LEFT)
            );
        }
    }

    #[test]
    fn clip_trims_overflow_without_moving_fixed_edges() {
        // Grown far past the right edge: the left edge stays put and the
        // width loses only the overflow.
        let rect = PixelRect::new(Position::new(100, 1500), Size::new(900, 300));
        let clipped = clip_to_viewport(rect, VIEWPORT);
        assert_eq!(clipped.position, Position::new(100, 1500));
        assert_eq!(clipped.size, Size::new(420, 300));

        // Grown past the top-left corner: the bottom-right corner of the
        // clipped rect matches the visible part of the original.
        let rect = PixelRect::new(Position::new(-60, -40), Size::new(500, 400));
        let clipped = clip_to_viewport(rect, VIEWPORT);
        assert_eq!(clipped.position, Position::new(0, 0));
        assert_eq!(clipped.size, Size::new(460, 340));
    }

    #[test]
    fn px_rect_projection_rounds_outward() {
        let rect = PixelRect::new(Position::new(15, 25), Size::new(305, 201));
        let cells = px_rect_to_cells(rect);
        assert_eq!(cells.x, 2);
        assert_eq!(cells.y, 0);
        // right edge at 330 px -> column 33; bottom at 216 px -> row 11
        assert_eq!(cells.width, 31);
        assert_eq!(cells.height, 11);
    }

    #[test]
    fn negative_origin_clips_to_zero() {
        let rect = PixelRect::new(Position::new(-50, -30), Size::new(400, 300));
        let cells = px_rect_to_cells(rect);
        assert_eq!((cells.x, cells.y), (0, 0));
    }
}
