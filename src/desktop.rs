//! The desktop shell: wallpaper, icons, menus, taskbar, lock screen, and
//! the event routing between them and the window manager.
//!
//! Routing order for mouse input: lock screen, open menus, taskbar,
//! windows, icons, then the background right-click menu. Whoever is
//! visually on top sees the event first.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::constants::TASKBAR_ROWS;
use crate::geometry::rect_contains;
use crate::keybindings::{Action, KeyBindings};
use crate::panel::{Taskbar, TaskbarHit};
use crate::persist::ConfigStore;
use crate::state::{DesktopState, LockState};
use crate::theme::{self, WALLPAPERS};
use crate::ui::UiFrame;
use crate::window::{ContentKind, WindowManager};

/// Kinds that get a desktop icon. Properties is reachable from the
/// context menu instead, like the original right-click flow.
const ICONS: [ContentKind; 9] = [
    ContentKind::Resume,
    ContentKind::About,
    ContentKind::Projects,
    ContentKind::Contact,
    ContentKind::Calculator,
    ContentKind::Notepad,
    ContentKind::Search,
    ContentKind::Github,
    ContentKind::AudioPlayer,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StartEntry {
    Open(ContentKind),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContextEntry {
    Refresh,
    NewNotepad,
    NextWallpaper,
    Properties,
}

impl ContextEntry {
    const ALL: [ContextEntry; 4] = [
        ContextEntry::Refresh,
        ContextEntry::NewNotepad,
        ContextEntry::NextWallpaper,
        ContextEntry::Properties,
    ];

    fn label(self) -> &'static str {
        match self {
            ContextEntry::Refresh => "Refresh",
            ContextEntry::NewNotepad => "New Notepad",
            ContextEntry::NextWallpaper => "Change Wallpaper",
            ContextEntry::Properties => "Properties",
        }
    }
}

pub struct Desktop {
    wm: WindowManager,
    state: DesktopState,
    store: Rc<RefCell<ConfigStore>>,
    taskbar: Taskbar,
    keys: KeyBindings,
    icon_zones: Vec<(ContentKind, Rect)>,
    start_zones: Vec<(StartEntry, Rect)>,
    context_zones: Vec<(ContextEntry, Rect)>,
    taskbar_area: Rect,
    host: String,
}

impl Desktop {
    pub fn new(store: Rc<RefCell<ConfigStore>>, start_locked: bool) -> Self {
        let host = hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "local".to_string());
        Self {
            wm: WindowManager::new(
                crate::geometry::Size::new(
                    crate::constants::DEFAULT_WINDOW_WIDTH,
                    crate::constants::DEFAULT_WINDOW_HEIGHT,
                ),
                Rc::clone(&store),
            ),
            state: DesktopState::new(start_locked),
            store,
            taskbar: Taskbar::new(),
            keys: KeyBindings::default(),
            icon_zones: Vec::new(),
            start_zones: Vec::new(),
            context_zones: Vec::new(),
            taskbar_area: Rect::default(),
            host,
        }
    }

    pub fn wm(&self) -> &WindowManager {
        &self.wm
    }

    pub fn wm_mut(&mut self) -> &mut WindowManager {
        &mut self.wm
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn quit_requested(&self) -> bool {
        self.state.quit_requested()
    }

    /// Advance animations. Returns true when a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.state.tick(now)
    }

    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        // The lock screen swallows its waking event entirely.
        if self.state.is_locked() {
            let wakes = matches!(event, Event::Key(_))
                || matches!(
                    event,
                    Event::Mouse(MouseEvent {
                        kind: MouseEventKind::Down(_),
                        ..
                    })
                );
            if wakes {
                self.state.begin_unlock(now);
            }
            return;
        }
        match event {
            Event::Key(key) => self.handle_key(key, event, now),
            Event::Mouse(me) => self.handle_mouse(me, now),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, event: &Event, now: Instant) {
        if self.keys.matches(Action::Quit, key) {
            self.state.request_quit();
            return;
        }
        if self.keys.matches(Action::CloseMenus, key) && self.state.any_menu_open() {
            self.state.close_menus();
            return;
        }
        if self.keys.matches(Action::FocusNext, key) {
            self.wm.cycle_focus(true);
            return;
        }
        if self.keys.matches(Action::FocusPrev, key) {
            self.wm.cycle_focus(false);
            return;
        }
        if self.keys.matches(Action::CloseFocusedWindow, key) {
            if let Some(id) = self.wm.focused_id() {
                self.wm.close_window(id);
            }
            return;
        }
        if self.keys.matches(Action::RefreshDesktop, key) {
            self.refresh(now);
            return;
        }
        if self.keys.matches(Action::NewNotepad, key) {
            self.wm.open(ContentKind::Notepad);
            return;
        }
        self.wm.route_key(event);
    }

    fn handle_mouse(&mut self, me: &MouseEvent, now: Instant) {
        // Open menus grab all clicks until dismissed.
        if self.state.context_menu_at().is_some() {
            if let MouseEventKind::Down(_) = me.kind {
                let hit = self
                    .context_zones
                    .iter()
                    .find(|(_, zone)| rect_contains(*zone, me.column, me.row))
                    .map(|(entry, _)| *entry);
                self.state.close_context_menu();
                if let Some(entry) = hit {
                    self.run_context_entry(entry, now);
                }
            }
            return;
        }
        if self.state.start_menu_open() {
            if let MouseEventKind::Down(_) = me.kind {
                if self
                    .taskbar
                    .hit_test(me.column, me.row)
                    .is_some_and(|hit| hit == TaskbarHit::Start)
                {
                    self.state.close_start_menu();
                    return;
                }
                let hit = self
                    .start_zones
                    .iter()
                    .find(|(_, zone)| rect_contains(*zone, me.column, me.row))
                    .map(|(entry, _)| *entry);
                self.state.close_start_menu();
                match hit {
                    Some(StartEntry::Open(kind)) => {
                        self.wm.open(kind);
                    }
                    Some(StartEntry::Quit) => self.state.request_quit(),
                    None => {}
                }
            }
            return;
        }

        if rect_contains(self.taskbar_area, me.column, me.row) {
            if me.kind == MouseEventKind::Down(MouseButton::Left) {
                match self.taskbar.hit_test(me.column, me.row) {
                    Some(TaskbarHit::Start) => self.state.toggle_start_menu(),
                    Some(TaskbarHit::Window(id)) => self.wm.taskbar_click(id),
                    None => {}
                }
            }
            return;
        }

        if self.wm.handle_mouse(me) {
            return;
        }

        match me.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .icon_zones
                    .iter()
                    .find(|(_, zone)| rect_contains(*zone, me.column, me.row))
                    .map(|(kind, _)| *kind);
                if let Some(kind) = hit {
                    self.wm.open(kind);
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                self.state.open_context_menu(me.column, me.row);
            }
            _ => {}
        }
    }

    fn run_context_entry(&mut self, entry: ContextEntry, now: Instant) {
        match entry {
            ContextEntry::Refresh => self.refresh(now),
            ContextEntry::NewNotepad => {
                self.wm.open(ContentKind::Notepad);
            }
            ContextEntry::NextWallpaper => self.cycle_wallpaper(),
            ContextEntry::Properties => {
                self.wm.open(ContentKind::Properties);
            }
        }
    }

    /// Close every window and flash the desktop. Persisted geometry and
    /// the wallpaper are untouched.
    fn refresh(&mut self, now: Instant) {
        self.wm.refresh_desktop();
        self.state.close_menus();
        self.state.begin_refresh_flash(now);
    }

    fn cycle_wallpaper(&mut self) {
        let current = self.store.borrow().wallpaper().to_string();
        let index = WALLPAPERS
            .iter()
            .position(|w| w.name == current)
            .unwrap_or(0);
        let next = WALLPAPERS[(index + 1) % WALLPAPERS.len()];
        self.store.borrow_mut().set_wallpaper(next.name);
    }

    pub fn render(&mut self, ui: &mut UiFrame<'_>, now: Instant) {
        let full = ui.area();
        let taskbar_height = TASKBAR_ROWS.min(full.height);
        let desktop_area = Rect {
            height: full.height.saturating_sub(taskbar_height),
            ..full
        };
        self.taskbar_area = Rect {
            x: full.x,
            y: full.y + desktop_area.height,
            width: full.width,
            height: taskbar_height,
        };

        let wallpaper = theme::wallpaper_by_name(self.store.borrow().wallpaper());
        ui.fill(
            desktop_area,
            wallpaper.glyph,
            Style::default().fg(wallpaper.fg).bg(wallpaper.bg),
        );

        self.render_icons(ui, desktop_area);

        self.wm.layout(desktop_area);
        self.wm.render(ui);

        if self.state.refresh_flash_active(now) {
            ui.fill_style(desktop_area, theme::dim());
        }

        self.taskbar.render(
            ui,
            self.taskbar_area,
            &self.wm,
            self.state.start_menu_open(),
        );

        if self.state.start_menu_open() {
            self.render_start_menu(ui, desktop_area);
        }
        if let Some((column, row)) = self.state.context_menu_at() {
            self.render_context_menu(ui, desktop_area, column, row);
        }

        match self.state.lock_state() {
            LockState::Locked => self.render_lock_screen(ui, full, false),
            LockState::Unlocking { .. } => self.render_lock_screen(ui, full, true),
            LockState::Unlocked => {}
        }
    }

    fn render_icons(&mut self, ui: &mut UiFrame<'_>, area: Rect) {
        self.icon_zones.clear();
        let style = Style::default().fg(theme::menu_fg());
        let mut y = area.y + 1;
        for kind in ICONS {
            if y + 1 >= area.y + area.height {
                break;
            }
            let label = format!(" ▣ {} ", kind.title());
            let width = (label.chars().count() as u16).min(area.width);
            ui.set_string(area.x + 1, y, &label, style);
            self.icon_zones.push((
                kind,
                Rect {
                    x: area.x + 1,
                    y,
                    width,
                    height: 1,
                },
            ));
            y += 2;
        }
    }

    fn render_start_menu(&mut self, ui: &mut UiFrame<'_>, desktop_area: Rect) {
        self.start_zones.clear();
        let entries: Vec<(StartEntry, String)> = ContentKind::ALL
            .iter()
            .map(|kind| (StartEntry::Open(*kind), kind.title().to_string()))
            .chain(std::iter::once((StartEntry::Quit, "Quit".to_string())))
            .collect();
        let footer = format!("term-desk {} @ {}", env!("CARGO_PKG_VERSION"), self.host);
        let width = entries
            .iter()
            .map(|(_, label)| label.chars().count())
            .chain(std::iter::once(footer.chars().count()))
            .max()
            .unwrap_or(0) as u16
            + 4;
        let height = entries.len() as u16 + 2;
        let menu = Rect {
            x: desktop_area.x,
            y: desktop_area
                .y
                .saturating_add(desktop_area.height.saturating_sub(height)),
            width: width.min(desktop_area.width),
            height: height.min(desktop_area.height),
        };
        let base = Style::default().bg(theme::menu_bg()).fg(theme::menu_fg());
        ui.fill(menu, " ", base);
        for (i, (entry, label)) in entries.iter().enumerate() {
            let y = menu.y + i as u16;
            ui.set_string(menu.x + 2, y, label, base);
            self.start_zones.push((
                *entry,
                Rect {
                    x: menu.x,
                    y,
                    width: menu.width,
                    height: 1,
                },
            ));
        }
        ui.set_string(
            menu.x + 1,
            menu.y + menu.height.saturating_sub(1),
            &footer,
            base.add_modifier(Modifier::DIM),
        );
    }

    fn render_context_menu(&mut self, ui: &mut UiFrame<'_>, desktop_area: Rect, column: u16, row: u16) {
        self.context_zones.clear();
        let width = ContextEntry::ALL
            .iter()
            .map(|e| e.label().chars().count())
            .max()
            .unwrap_or(0) as u16
            + 4;
        let height = ContextEntry::ALL.len() as u16;
        // Keep the menu on screen when opened near an edge.
        let x = column.min(
            desktop_area
                .x
                .saturating_add(desktop_area.width.saturating_sub(width)),
        );
        let y = row.min(
            desktop_area
                .y
                .saturating_add(desktop_area.height.saturating_sub(height)),
        );
        let menu = Rect {
            x,
            y,
            width,
            height,
        };
        let base = Style::default().bg(theme::menu_bg()).fg(theme::menu_fg());
        ui.fill(menu, " ", base);
        for (i, entry) in ContextEntry::ALL.iter().enumerate() {
            let item_y = menu.y + i as u16;
            ui.set_string(menu.x + 2, item_y, entry.label(), base);
            self.context_zones.push((
                *entry,
                Rect {
                    x: menu.x,
                    y: item_y,
                    width: menu.width,
                    height: 1,
                },
            ));
        }
    }

    fn render_lock_screen(&mut self, ui: &mut UiFrame<'_>, area: Rect, fading: bool) {
        let mut style = Style::default()
            .bg(theme::header_focused_bg())
            .fg(theme::header_focused_fg());
        if fading {
            style = style.add_modifier(Modifier::DIM);
        }
        ui.fill(area, " ", style);
        let clock = chrono::Local::now().format("%H:%M").to_string();
        let center_y = area.y + area.height / 2;
        let center = |text: &str| area.x + area.width.saturating_sub(text.chars().count() as u16) / 2;
        ui.set_string(
            center(&clock),
            center_y.saturating_sub(1),
            &clock,
            style.add_modifier(Modifier::BOLD),
        );
        let hint = "Press any key or click to begin";
        ui.set_string(center(hint), center_y + 1, hint, style);
    }
}
