//! Window chrome: border, header row, and the button strip, all in cell
//! space.
//!
//! Frame layout, for a frame rect of width `w` and height `h`:
//! row 0 is the top border, row 1 the header (title left, buttons
//! right), rows 2..h-1 the content body, row h-1 the bottom border.
//! Every border cell doubles as a resize grip for resizable windows.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::geometry::ResizeEdge;
use crate::theme;
use crate::ui::UiFrame;

/// Each header button occupies three cells, e.g. `[×]`.
const BUTTON_WIDTH: u16 = 3;

/// Smallest cell frame the decorator can draw: borders, a header row,
/// and one content row.
pub const MIN_FRAME_WIDTH: u16 = 12;
pub const MIN_FRAME_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Drag,
    Minimize,
    Maximize,
    Close,
}

/// Content body inside the chrome.
pub fn inner_rect(frame: Rect) -> Rect {
    Rect {
        x: frame.x + 1,
        y: frame.y + 2,
        width: frame.width.saturating_sub(2),
        height: frame.height.saturating_sub(3),
    }
}

#[derive(Debug, Clone, Copy)]
struct ButtonSlots {
    close: u16,
    maximize: Option<u16>,
    minimize: u16,
}

fn button_slots(frame: Rect, maximizable: bool) -> ButtonSlots {
    let close = frame.x + frame.width - 1 - BUTTON_WIDTH;
    if maximizable {
        ButtonSlots {
            close,
            maximize: Some(close - BUTTON_WIDTH),
            minimize: close - 2 * BUTTON_WIDTH,
        }
    } else {
        ButtonSlots {
            close,
            maximize: None,
            minimize: close - BUTTON_WIDTH,
        }
    }
}

/// Classify a pointer position inside the header row.
pub fn header_action_at(
    frame: Rect,
    maximizable: bool,
    column: u16,
    row: u16,
) -> Option<HeaderAction> {
    if row != frame.y + 1 || frame.width < MIN_FRAME_WIDTH {
        return None;
    }
    if column <= frame.x || column >= frame.x + frame.width - 1 {
        return None;
    }
    let slots = button_slots(frame, maximizable);
    let in_button = |x: u16| column >= x && column < x + BUTTON_WIDTH;
    if in_button(slots.close) {
        return Some(HeaderAction::Close);
    }
    if let Some(max_x) = slots.maximize
        && in_button(max_x)
    {
        return Some(HeaderAction::Maximize);
    }
    if in_button(slots.minimize) {
        return Some(HeaderAction::Minimize);
    }
    Some(HeaderAction::Drag)
}

/// Map a border cell to the resize grip it carries. Corner cells win
/// over edges. Returns None for cells inside the frame.
pub fn resize_edge_at(frame: Rect, column: u16, row: u16) -> Option<ResizeEdge> {
    if frame.width < 2 || frame.height < 2 {
        return None;
    }
    let left = column == frame.x;
    let right = column == frame.x + frame.width - 1;
    let top = row == frame.y;
    let bottom = row == frame.y + frame.height - 1;
    if !(column >= frame.x && column < frame.x + frame.width) {
        return None;
    }
    if !(row >= frame.y && row < frame.y + frame.height) {
        return None;
    }
    match (left, right, top, bottom) {
        (true, _, true, _) => Some(ResizeEdge::TopLeft),
        (_, true, true, _) => Some(ResizeEdge::TopRight),
        (true, _, _, true) => Some(ResizeEdge::BottomLeft),
        (_, true, _, true) => Some(ResizeEdge::BottomRight),
        (true, _, _, _) => Some(ResizeEdge::Left),
        (_, true, _, _) => Some(ResizeEdge::Right),
        (_, _, true, _) => Some(ResizeEdge::Top),
        (_, _, _, true) => Some(ResizeEdge::Bottom),
        _ => None,
    }
}

/// Draw the border, header, and content background. The caller renders
/// the view into `inner_rect(frame)` afterwards.
pub fn render_frame(
    ui: &mut UiFrame<'_>,
    frame: Rect,
    title: &str,
    focused: bool,
    maximizable: bool,
    faded: bool,
) {
    if frame.width < 2 || frame.height < 2 {
        return;
    }
    let mut border_style = Style::default().fg(if focused {
        theme::accent()
    } else {
        theme::window_border()
    });
    let mut body_style = Style::default().bg(theme::window_bg());
    if faded {
        border_style = border_style.add_modifier(Modifier::DIM);
        body_style = body_style.add_modifier(Modifier::DIM);
    }

    ui.fill(
        Rect {
            x: frame.x + 1,
            y: frame.y + 1,
            width: frame.width.saturating_sub(2),
            height: frame.height.saturating_sub(2),
        },
        " ",
        body_style,
    );

    let right = frame.x + frame.width - 1;
    let bottom = frame.y + frame.height - 1;
    for x in frame.x + 1..right {
        ui.put(x, frame.y, "─", border_style);
        ui.put(x, bottom, "─", border_style);
    }
    for y in frame.y + 1..bottom {
        ui.put(frame.x, y, "│", border_style);
        ui.put(right, y, "│", border_style);
    }
    ui.put(frame.x, frame.y, "┌", border_style);
    ui.put(right, frame.y, "┐", border_style);
    ui.put(frame.x, bottom, "└", border_style);
    ui.put(right, bottom, "┘", border_style);

    // Header row: background, title, buttons.
    let (header_bg, header_fg) = if focused {
        (theme::header_focused_bg(), theme::header_focused_fg())
    } else {
        (theme::header_bg(), theme::header_fg())
    };
    let mut header_style = Style::default().bg(header_bg).fg(header_fg);
    if faded {
        header_style = header_style.add_modifier(Modifier::DIM);
    }
    ui.fill(
        Rect {
            x: frame.x + 1,
            y: frame.y + 1,
            width: frame.width.saturating_sub(2),
            height: 1,
        },
        " ",
        header_style,
    );
    if frame.width >= MIN_FRAME_WIDTH {
        let slots = button_slots(frame, maximizable);
        let title_width = (slots.minimize.saturating_sub(frame.x + 2)) as usize;
        let shown: String = title.chars().take(title_width).collect();
        ui.set_string(frame.x + 2, frame.y + 1, &shown, header_style);

        ui.set_string(slots.minimize, frame.y + 1, "[‒]", header_style);
        if let Some(max_x) = slots.maximize {
            ui.set_string(max_x, frame.y + 1, "[□]", header_style);
        }
        ui.set_string(
            slots.close,
            frame.y + 1,
            "[×]",
            header_style.fg(theme::close_button_fg()),
        );
    }
}
