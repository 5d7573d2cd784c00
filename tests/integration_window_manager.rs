//! End-to-end window manager scenarios driven by synthetic mouse input.
//!
//! The desktop area is 100x39 cells, which projects to a 1000x780 pixel
//! viewport at the 10x20 px/cell scale.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use term_desk::geometry::{Position, Size};
use term_desk::persist::ConfigStore;
use term_desk::window::{ContentKind, Visibility, WindowManager};

const DESKTOP: Rect = Rect {
    x: 0,
    y: 0,
    width: 100,
    height: 39,
};

fn manager_with_store() -> (WindowManager, Rc<RefCell<ConfigStore>>) {
    let store = Rc::new(RefCell::new(ConfigStore::in_memory()));
    let mut wm = WindowManager::new(Size::new(1000, 780), Rc::clone(&store));
    wm.layout(DESKTOP);
    (wm, store)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn down(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

fn drag(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Drag(MouseButton::Left), column, row)
}

fn up(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Up(MouseButton::Left), column, row)
}

#[test]
fn header_drag_moves_window_and_persists() {
    let (mut wm, store) = manager_with_store();
    let id = wm.open(ContentKind::Resume);
    wm.layout(DESKTOP);

    // Cascade puts the first window at (100, 100) px: cells (10, 5),
    // 80x30. The header row is row 6.
    let frame = wm.window(id).unwrap().cell_frame.unwrap();
    assert_eq!(frame, Rect::new(10, 5, 80, 30));

    assert!(wm.handle_mouse(&down(50, 6)));
    assert!(wm.session().is_some());
    // Cell centers: (50,6) is px (505,130), (60,10) is px (605,210).
    assert!(wm.handle_mouse(&drag(60, 10)));
    assert!(wm.handle_mouse(&up(60, 10)));
    assert!(wm.session().is_none());

    let record = wm.window(id).unwrap();
    assert_eq!(record.position, Position::new(180, 200));
    let persisted = store.borrow().window_config("Resume").unwrap();
    assert_eq!(persisted.position, Position::new(180, 200));
    assert_eq!(persisted.size, Size::new(800, 600));
}

#[test]
fn drag_cannot_push_window_off_screen() {
    let (mut wm, _store) = manager_with_store();
    let id = wm.open(ContentKind::Resume);
    wm.layout(DESKTOP);

    wm.handle_mouse(&down(50, 6));
    // Far beyond the bottom-right corner of the viewport.
    wm.handle_mouse(&drag(99, 38));
    let record = wm.window(id).unwrap();
    // 1000x780 viewport, 800x600 window: left <= 200, top <= 180.
    assert_eq!(record.position, Position::new(180, 200));
    wm.handle_mouse(&up(99, 38));
}

#[test]
fn corner_resize_keeps_opposite_corner_fixed() {
    let (mut wm, _store) = manager_with_store();
    let id = wm.open(ContentKind::Resume);
    wm.layout(DESKTOP);

    // Top-left corner cell of the frame.
    assert!(wm.handle_mouse(&down(10, 5)));
    assert!(wm.session().is_some());
    // (10,5) center is px (105,110); (8,4) center is px (85,90).
    wm.handle_mouse(&drag(8, 4));
    wm.handle_mouse(&up(8, 4));

    let record = wm.window(id).unwrap();
    assert_eq!(record.position, Position::new(80, 80));
    assert_eq!(record.size, Size::new(820, 620));
    // Bottom-right corner stayed at (900, 700).
    assert_eq!(record.rect().right(), 900);
    assert_eq!(record.rect().bottom(), 700);
}

#[test]
fn resize_respects_minimum_size() {
    let (mut wm, _store) = manager_with_store();
    let id = wm.open(ContentKind::Resume);
    wm.layout(DESKTOP);

    // Grab the bottom-right corner and push it way past the top-left.
    let frame = wm.window(id).unwrap().cell_frame.unwrap();
    let corner = (frame.x + frame.width - 1, frame.y + frame.height - 1);
    wm.handle_mouse(&down(corner.0, corner.1));
    wm.handle_mouse(&drag(0, 0));
    wm.handle_mouse(&up(0, 0));

    let record = wm.window(id).unwrap();
    assert_eq!(record.size, Size::new(300, 200));
    // The anchored top-left corner did not move.
    assert_eq!(record.position, Position::new(100, 100));
}

#[test]
fn overgrown_resize_clips_instead_of_moving_the_window() {
    let (mut wm, _store) = manager_with_store();
    let id = wm.open(ContentKind::Resume);
    wm.layout(DESKTOP);

    // Bottom edge, mid-span. Dragging onto the taskbar row puts the
    // pointer below the 780 px desktop.
    assert!(wm.handle_mouse(&down(50, 34)));
    wm.handle_mouse(&drag(50, 39));
    wm.handle_mouse(&up(50, 39));

    let record = wm.window(id).unwrap();
    // The top edge never moved; the overflow was trimmed at the desktop
    // boundary instead.
    assert_eq!(record.position, Position::new(100, 100));
    assert_eq!(record.size, Size::new(800, 680));
    assert_eq!(record.rect().bottom(), 780);
}

#[test]
fn header_buttons_close_minimize_maximize() {
    let (mut wm, _store) = manager_with_store();
    let id = wm.open(ContentKind::Resume);
    wm.layout(DESKTOP);
    let frame = wm.window(id).unwrap().cell_frame.unwrap();
    let header = frame.y + 1;
    let close_x = frame.x + frame.width - 4;
    let maximize_x = close_x - 3;
    let minimize_x = close_x - 6;

    wm.handle_mouse(&down(minimize_x, header));
    assert!(wm.window(id).unwrap().visibility.is_minimized());
    wm.focus_window(id);
    wm.layout(DESKTOP);

    wm.handle_mouse(&down(maximize_x, header));
    assert_eq!(wm.window(id).unwrap().visibility, Visibility::Maximized);
    wm.layout(DESKTOP);
    // Maximized frame covers the whole desktop area.
    assert_eq!(wm.window(id).unwrap().cell_frame, Some(DESKTOP));

    // Header drags are inert while maximized.
    wm.handle_mouse(&down(50, 1));
    assert!(wm.session().is_none());
    wm.handle_mouse(&up(50, 1));

    let close_x = DESKTOP.width - 4;
    wm.handle_mouse(&down(close_x, 1));
    assert!(wm.window(id).is_none());
    assert!(wm.windows().is_empty());
}

#[test]
fn clicking_a_lower_window_raises_it() {
    let (mut wm, _store) = manager_with_store();
    let a = wm.open(ContentKind::Resume);
    let b = wm.open(ContentKind::About);
    wm.layout(DESKTOP);
    assert_eq!(wm.focused_id(), Some(b));

    // Window A's header is exposed to the upper-left of B (cascade
    // offset is 40 px, i.e. 4 columns / 2 rows).
    wm.handle_mouse(&down(12, 6));
    assert_eq!(wm.focused_id(), Some(a));
    wm.handle_mouse(&up(12, 6));
}

#[test]
fn pointer_release_outside_desktop_ends_session() {
    let (mut wm, _store) = manager_with_store();
    wm.open(ContentKind::Resume);
    wm.layout(DESKTOP);

    wm.handle_mouse(&down(50, 6));
    assert!(wm.session().is_some());
    assert!(wm.handle_mouse(&up(0, 0)));
    assert!(wm.session().is_none());
}

#[test]
fn fixed_size_window_has_no_resize_grips() {
    let (mut wm, _store) = manager_with_store();
    let id = wm.open(ContentKind::Calculator);
    wm.layout(DESKTOP);

    // 240x320 px projects to 24x16 cells.
    let frame = wm.window(id).unwrap().cell_frame.unwrap();
    assert_eq!((frame.width, frame.height), (24, 16));

    // Grabbing the border does nothing.
    wm.handle_mouse(&down(frame.x, frame.y));
    assert!(wm.session().is_none());
    wm.handle_mouse(&up(frame.x, frame.y));
    assert_eq!(wm.window(id).unwrap().size, Size::new(240, 320));
}

#[test]
fn taskbar_click_toggles_minimize_for_focused_window() {
    let (mut wm, _store) = manager_with_store();
    let a = wm.open(ContentKind::Resume);
    let b = wm.open(ContentKind::About);

    // Clicking the unfocused window's button focuses it.
    wm.taskbar_click(a);
    assert_eq!(wm.focused_id(), Some(a));
    // Clicking the focused one minimizes it.
    wm.taskbar_click(a);
    assert!(wm.window(a).unwrap().visibility.is_minimized());
    assert_eq!(wm.focused_id(), Some(b));
    // And clicking again restores and refocuses.
    wm.taskbar_click(a);
    assert!(!wm.window(a).unwrap().visibility.is_minimized());
    assert_eq!(wm.focused_id(), Some(a));
}

#[test]
fn cascade_walks_diagonally_per_open_window() {
    let (mut wm, _store) = manager_with_store();
    let a = wm.open(ContentKind::Resume);
    let b = wm.open(ContentKind::About);
    let c = wm.open(ContentKind::Projects);
    assert_eq!(wm.window(a).unwrap().position, Position::new(100, 100));
    assert_eq!(wm.window(b).unwrap().position, Position::new(140, 140));
    assert_eq!(wm.window(c).unwrap().position, Position::new(180, 180));
}

#[test]
fn minimized_windows_are_skipped_by_hit_testing() {
    let (mut wm, _store) = manager_with_store();
    let id = wm.open(ContentKind::Resume);
    wm.minimize(id);
    wm.layout(DESKTOP);
    assert_eq!(wm.window(id).unwrap().cell_frame, None);
    assert!(!wm.handle_mouse(&down(50, 10)));
}
