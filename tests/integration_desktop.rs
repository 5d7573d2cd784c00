//! Full-shell scenarios rendered into a test backend: lock screen,
//! icons, menus, taskbar, and window chrome working together.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use term_desk::desktop::Desktop;
use term_desk::persist::ConfigStore;
use term_desk::state::LockState;
use term_desk::ui::UiFrame;
use term_desk::window::ContentKind;

struct Harness {
    desktop: Desktop,
    terminal: Terminal<TestBackend>,
    now: Instant,
}

impl Harness {
    fn new(locked: bool) -> Self {
        let store = Rc::new(RefCell::new(ConfigStore::in_memory()));
        Self {
            desktop: Desktop::new(store, locked),
            terminal: Terminal::new(TestBackend::new(100, 40)).expect("terminal"),
            now: Instant::now(),
        }
    }

    fn draw(&mut self) {
        let desktop = &mut self.desktop;
        let now = self.now;
        self.terminal
            .draw(|frame| {
                let mut ui = UiFrame::new(frame);
                desktop.render(&mut ui, now);
            })
            .expect("draw");
    }

    fn screen(&self) -> String {
        let buffer = self.terminal.backend().buffer();
        let area = *buffer.area();
        let mut out = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                if let Some(cell) = buffer.cell((x, y)) {
                    out.push_str(cell.symbol());
                }
            }
            out.push('\n');
        }
        out
    }

    fn click(&mut self, column: u16, row: u16) {
        self.event(MouseEventKind::Down(MouseButton::Left), column, row);
        self.event(MouseEventKind::Up(MouseButton::Left), column, row);
    }

    fn event(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        let me = MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        self.desktop.handle_event(&Event::Mouse(me), self.now);
    }

    fn advance(&mut self, ms: u64) {
        self.now += Duration::from_millis(ms);
        self.desktop.tick(self.now);
    }
}

#[test]
fn lock_screen_swallows_only_the_first_interaction() {
    let mut h = Harness::new(true);
    h.draw();
    assert!(h.screen().contains("Press any key or click to begin"));

    // First click wakes the desktop but opens nothing, even over an icon.
    h.click(3, 1);
    assert!(matches!(
        h.desktop.state().lock_state(),
        LockState::Unlocking { .. }
    ));
    assert!(h.desktop.wm().windows().is_empty());

    // After the fade the lock screen is gone and never re-arms.
    h.advance(1_100);
    assert_eq!(h.desktop.state().lock_state(), LockState::Unlocked);
    h.draw();
    assert!(!h.screen().contains("Press any key or click to begin"));

    h.click(3, 1);
    assert_eq!(h.desktop.wm().windows().len(), 1);
    assert_eq!(h.desktop.wm().windows()[0].kind, ContentKind::Resume);
}

#[test]
fn icon_click_opens_window_onto_taskbar() {
    let mut h = Harness::new(false);
    h.draw();

    // Third icon row: Projects.
    h.click(3, 5);
    assert_eq!(h.desktop.wm().windows().len(), 1);
    assert_eq!(h.desktop.wm().windows()[0].kind, ContentKind::Projects);

    h.draw();
    let screen = h.screen();
    let taskbar_row = screen.lines().nth(39).unwrap_or_default().to_string();
    assert!(taskbar_row.contains("Start"));
    assert!(taskbar_row.contains("Projects"));
}

#[test]
fn start_menu_opens_windows_and_quits() {
    let mut h = Harness::new(false);
    h.draw();

    // Toggle the start menu and pick Calculator from it.
    h.click(1, 39);
    assert!(h.desktop.state().start_menu_open());
    h.draw();
    assert!(h.screen().contains("Quit"));

    // Entries stack up from row 26 (10 kinds + Quit + footer).
    // Calculator is the fifth entry.
    h.click(2, 30);
    assert!(!h.desktop.state().start_menu_open());
    assert_eq!(h.desktop.wm().windows().len(), 1);
    assert_eq!(h.desktop.wm().windows()[0].kind, ContentKind::Calculator);

    // Reopen and pick Quit, the last entry.
    h.click(1, 39);
    h.draw();
    h.click(2, 36);
    assert!(h.desktop.quit_requested());
}

#[test]
fn context_menu_refresh_closes_windows_but_keeps_geometry() {
    let mut h = Harness::new(false);
    h.desktop.wm_mut().open(ContentKind::Resume);
    h.draw();

    // Drag the window somewhere so there's geometry to keep: header row
    // of the cascaded frame is (50, 6).
    h.event(MouseEventKind::Down(MouseButton::Left), 50, 6);
    h.event(MouseEventKind::Drag(MouseButton::Left), 55, 8);
    h.event(MouseEventKind::Up(MouseButton::Left), 55, 8);
    let moved = h.desktop.wm().windows()[0].position;

    // Right-click the background below the window; the menu clamps up
    // to fit, putting Refresh (first entry) at row 35.
    h.event(MouseEventKind::Down(MouseButton::Right), 70, 38);
    h.draw();
    assert!(h.screen().contains("Refresh"));
    h.click(71, 35);
    assert!(h.desktop.wm().windows().is_empty());
    assert!(h.desktop.state().refresh_flash_active(h.now));

    // Reopening lands on the persisted spot.
    let id = h.desktop.wm_mut().open(ContentKind::Resume);
    assert_eq!(h.desktop.wm().window(id).unwrap().position, moved);
}

#[test]
fn close_button_on_screen_removes_window() {
    let mut h = Harness::new(false);
    h.desktop.wm_mut().open(ContentKind::About);
    h.draw();

    let frame = h.desktop.wm().windows()[0].cell_frame.expect("frame");
    let close = (frame.x + frame.width - 4, frame.y + 1);
    h.click(close.0, close.1);
    assert!(h.desktop.wm().windows().is_empty());

    h.draw();
    let taskbar_row = h.screen().lines().nth(39).unwrap_or_default().to_string();
    assert!(!taskbar_row.contains("About"));
}

#[test]
fn window_chrome_is_visible_on_screen() {
    let mut h = Harness::new(false);
    h.desktop.wm_mut().open(ContentKind::Resume);
    h.draw();
    let screen = h.screen();
    // Title and buttons in the header row.
    let header = screen.lines().nth(6).unwrap_or_default().to_string();
    assert!(header.contains("Resume"));
    assert!(header.contains("[‒]"));
    assert!(header.contains("[□]"));
    assert!(header.contains("[×]"));
}
