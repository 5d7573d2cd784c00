//! The window manager: creation, focus, z-order, drag/resize sessions,
//! and durable geometry.
//!
//! All geometry lives in virtual pixel space; cell frames are derived
//! once per frame in [`WindowManager::layout`] and reused for mouse
//! hit-testing until the next pass. At most one drag or resize session
//! exists at a time, and it dies with its window.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::content::build_view;
use crate::geometry::{
    PixelRect, Position, Size, apply_drag, apply_resize, cascade_position, cells_to_px_size,
    clamp_to_viewport, clip_to_viewport, pointer_px, px_rect_to_cells, rect_contains,
};
use crate::persist::{ConfigStore, WindowConfig};
use crate::window::decorator::{self, HeaderAction};
use crate::window::{
    ContentKind, DragSession, ResizeSession, Session, Visibility, WindowId, WindowRecord,
};

pub struct WindowManager {
    windows: Vec<WindowRecord>,
    next_id: WindowId,
    next_z: u64,
    session: Option<Session>,
    viewport: Size,
    desktop_origin: (u16, u16),
    store: Rc<RefCell<ConfigStore>>,
}

impl WindowManager {
    pub fn new(viewport: Size, store: Rc<RefCell<ConfigStore>>) -> Self {
        Self {
            windows: Vec::new(),
            next_id: 1,
            next_z: 1,
            session: None,
            viewport,
            desktop_origin: (0, 0),
            store,
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Adopt a new desktop size (terminal resize). Existing windows are
    /// pulled back inside the new bounds.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        for record in &mut self.windows {
            record.position = clamp_to_viewport(record.position, record.size, viewport);
        }
    }

    /// Windows in creation order; the taskbar renders straight off this.
    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn window_mut(&mut self, id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    /// Ids bottom-to-top for painting.
    pub fn draw_order(&self) -> Vec<WindowId> {
        let mut ids: Vec<(u64, WindowId)> = self
            .windows
            .iter()
            .filter(|w| !w.visibility.is_minimized())
            .map(|w| (w.z, w.id))
            .collect();
        ids.sort_unstable();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    /// The top-most window that isn't minimized.
    pub fn focused_id(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|w| !w.visibility.is_minimized())
            .max_by_key(|w| w.z)
            .map(|w| w.id)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Open a window for `kind`. Singleton kinds focus (and restore) the
    /// existing window instead of opening a second copy.
    pub fn open(&mut self, kind: ContentKind) -> WindowId {
        if kind.singleton()
            && let Some(id) = self.windows.iter().find(|w| w.kind == kind).map(|w| w.id)
        {
            self.focus_window(id);
            return id;
        }
        self.create(kind)
    }

    fn create(&mut self, kind: ContentKind) -> WindowId {
        let chrome = kind.chrome();
        let title = kind.title().to_string();
        let seed = self.store.borrow().window_config(&title);

        let size = match seed {
            // Fixed-size kinds always use their declared size.
            Some(config) if chrome.resizable => config.size.floored(),
            _ => chrome.default_size,
        };
        let position = match seed {
            Some(config) => clamp_to_viewport(config.position, size, self.viewport),
            None => cascade_position(self.windows.len(), size, self.viewport),
        };
        // Persisted minimization is not reapplied; windows never open hidden.
        let visibility = match seed {
            Some(config) if config.maximized && chrome.resizable => Visibility::Maximized,
            _ => Visibility::Normal,
        };

        let id = self.next_id;
        self.next_id += 1;
        let z = self.bump_z();
        let view = build_view(kind, &self.store, None);
        tracing::debug!(id, title = %title, ?position, ?size, "window opened");
        self.windows.push(WindowRecord {
            id,
            kind,
            title,
            position,
            size,
            visibility,
            z,
            opened_at: Instant::now(),
            view,
            cell_frame: None,
        });
        id
    }

    pub fn close_window(&mut self, id: WindowId) {
        // A drag or resize session dies with the window it grips.
        if self.session.as_ref().is_some_and(|s| s.window_id() == id) {
            self.session = None;
        }
        let before = self.windows.len();
        self.windows.retain(|w| w.id != id);
        if self.windows.len() != before {
            tracing::debug!(id, "window closed");
        }
    }

    /// Raise `id` to the top, restoring it first if minimized.
    pub fn focus_window(&mut self, id: WindowId) {
        let z = self.bump_z();
        if let Some(record) = self.window_mut(id) {
            if let Visibility::Minimized { from_maximized } = record.visibility {
                record.visibility = if from_maximized {
                    Visibility::Maximized
                } else {
                    Visibility::Normal
                };
            }
            record.z = z;
        }
    }

    pub fn minimize(&mut self, id: WindowId) {
        if let Some(record) = self.window_mut(id)
            && !record.visibility.is_minimized()
        {
            record.visibility = Visibility::Minimized {
                from_maximized: record.visibility == Visibility::Maximized,
            };
            record.cell_frame = None;
            if self.session.as_ref().is_some_and(|s| s.window_id() == id) {
                self.session = None;
            }
            self.persist(id);
        }
    }

    /// Taskbar semantics: a minimized or unfocused window comes forward,
    /// the focused one minimizes.
    pub fn taskbar_click(&mut self, id: WindowId) {
        if self.focused_id() == Some(id) {
            self.minimize(id);
        } else {
            self.focus_window(id);
        }
    }

    pub fn toggle_maximize(&mut self, id: WindowId) {
        let mut changed = false;
        if let Some(record) = self.window_mut(id) {
            if !record.resizable() {
                return;
            }
            record.visibility = match record.visibility {
                Visibility::Normal => Visibility::Maximized,
                Visibility::Maximized => Visibility::Normal,
                minimized @ Visibility::Minimized { .. } => minimized,
            };
            changed = !record.visibility.is_minimized();
        }
        if changed {
            if self.session.as_ref().is_some_and(|s| s.window_id() == id) {
                self.session = None;
            }
            self.focus_window(id);
            self.persist(id);
        }
    }

    /// Move a window. The stored position is always normal-state
    /// geometry, so this applies even while maximized.
    pub fn update_window_position(&mut self, id: WindowId, position: Position) {
        let viewport = self.viewport;
        if let Some(record) = self.window_mut(id) {
            record.position = clamp_to_viewport(position, record.size, viewport);
            self.persist(id);
        }
    }

    /// Resize a window. Fixed-size kinds ignore this entirely.
    pub fn update_window_size(&mut self, id: WindowId, size: Size) {
        let viewport = self.viewport;
        let mut resized = false;
        if let Some(record) = self.window_mut(id) {
            if !record.resizable() {
                return;
            }
            record.size = size.floored();
            record.position = clamp_to_viewport(record.position, record.size, viewport);
            resized = true;
        }
        if resized {
            self.persist(id);
        }
    }

    /// Close everything and reset stacking. Persisted configs and the
    /// wallpaper survive; this only clears the live session.
    pub fn refresh_desktop(&mut self) {
        tracing::debug!(count = self.windows.len(), "desktop refreshed");
        self.windows.clear();
        self.session = None;
        self.next_z = 1;
    }

    /// Move focus to the next (or previous) window in creation order,
    /// restoring it if minimized.
    pub fn cycle_focus(&mut self, forward: bool) {
        if self.windows.is_empty() {
            return;
        }
        let focused = self.focused_id();
        let index = focused
            .and_then(|id| self.windows.iter().position(|w| w.id == id))
            .unwrap_or(0);
        let len = self.windows.len();
        let next = match (focused, forward) {
            (None, _) => index,
            (_, true) => (index + 1) % len,
            (_, false) => (index + len - 1) % len,
        };
        let id = self.windows[next].id;
        self.focus_window(id);
    }

    /// The rect a window actually occupies: its own geometry, or the
    /// whole viewport while maximized.
    pub fn effective_rect(&self, record: &WindowRecord) -> PixelRect {
        match record.visibility {
            Visibility::Maximized => {
                PixelRect::new(Position::new(0, 0), self.viewport)
            }
            _ => record.rect(),
        }
    }

    /// Recompute every visible window's cell frame for this frame's
    /// drawing and hit-testing. Must run before `handle_mouse`.
    pub fn layout(&mut self, desktop_area: Rect) {
        self.desktop_origin = (desktop_area.x, desktop_area.y);
        self.viewport = cells_to_px_size(desktop_area);
        let viewport = self.viewport;
        let ids: Vec<WindowId> = self.windows.iter().map(|w| w.id).collect();
        for id in ids {
            let Some(record) = self.window_mut(id) else {
                continue;
            };
            if record.visibility.is_minimized() {
                record.cell_frame = None;
                continue;
            }
            let rect = match record.visibility {
                Visibility::Maximized => PixelRect::new(Position::new(0, 0), viewport),
                _ => record.rect(),
            };
            let mut cells = px_rect_to_cells(rect);
            cells.x += desktop_area.x;
            cells.y += desktop_area.y;
            record.cell_frame = Some(cells.intersection(desktop_area));
        }
    }

    /// Paint every visible window bottom-to-top: chrome first, then the
    /// content into the body rect. Requires `layout` to have run.
    pub fn render(&mut self, ui: &mut crate::ui::UiFrame<'_>) {
        let focused_id = self.focused_id();
        for id in self.draw_order() {
            let Some(record) = self.window_mut(id) else {
                continue;
            };
            let Some(frame) = record.cell_frame else {
                continue;
            };
            let focused = focused_id == Some(id);
            let faded = record.opened_at.elapsed()
                < std::time::Duration::from_millis(crate::constants::WINDOW_OPEN_FADE_MS);
            decorator::render_frame(
                ui,
                frame,
                &record.title,
                focused,
                record.resizable(),
                faded,
            );
            record.view.render(ui, decorator::inner_rect(frame), focused);
        }
    }

    /// Top-most visible window whose frame contains the cell.
    pub fn window_at(&self, column: u16, row: u16) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|w| {
                w.cell_frame
                    .is_some_and(|frame| rect_contains(frame, column, row))
            })
            .max_by_key(|w| w.z)
            .map(|w| w.id)
    }

    fn pointer_in_px(&self, column: u16, row: u16) -> (i32, i32) {
        pointer_px(
            column.saturating_sub(self.desktop_origin.0),
            row.saturating_sub(self.desktop_origin.1),
        )
    }

    /// Route a mouse event. Returns true when the event landed on a
    /// window (or an active session) and the shell should not see it.
    pub fn handle_mouse(&mut self, me: &MouseEvent) -> bool {
        match me.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_left_down(me),
            MouseEventKind::Drag(MouseButton::Left) => self.drive_session(me),
            MouseEventKind::Up(MouseButton::Left) => self.end_session(),
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                self.route_to_window_at(me.column, me.row, &Event::Mouse(*me))
            }
            MouseEventKind::Down(MouseButton::Right) => {
                // Swallow right-clicks over windows so the desktop
                // context menu only opens on the background.
                self.window_at(me.column, me.row).is_some()
            }
            _ => false,
        }
    }

    fn handle_left_down(&mut self, me: &MouseEvent) -> bool {
        if self.session.is_some() {
            return true;
        }
        let Some(id) = self.window_at(me.column, me.row) else {
            return false;
        };
        self.focus_window(id);
        let (frame, resizable, maximized, position, rect) = {
            let Some(record) = self.window(id) else {
                return true;
            };
            let Some(frame) = record.cell_frame else {
                return true;
            };
            (
                frame,
                record.resizable(),
                record.visibility == Visibility::Maximized,
                record.position,
                record.rect(),
            )
        };

        if let Some(action) = decorator::header_action_at(frame, resizable, me.column, me.row) {
            match action {
                HeaderAction::Close => self.close_window(id),
                HeaderAction::Minimize => self.minimize(id),
                HeaderAction::Maximize => self.toggle_maximize(id),
                HeaderAction::Drag => {
                    if !maximized {
                        self.session = Some(Session::Drag(DragSession {
                            id,
                            start_pointer: self.pointer_in_px(me.column, me.row),
                            start_position: position,
                        }));
                    }
                }
            }
            return true;
        }

        if resizable
            && !maximized
            && let Some(edge) = decorator::resize_edge_at(frame, me.column, me.row)
        {
            self.session = Some(Session::Resize(ResizeSession {
                id,
                edge,
                start_pointer: self.pointer_in_px(me.column, me.row),
                start_rect: rect,
            }));
            return true;
        }

        // Body click: hand it to the content.
        let inner = decorator::inner_rect(frame);
        if rect_contains(inner, me.column, me.row) {
            let event = Event::Mouse(*me);
            if let Some(record) = self.window_mut(id) {
                record.view.handle_event(&event, inner);
            }
        }
        true
    }

    fn drive_session(&mut self, me: &MouseEvent) -> bool {
        let Some(session) = self.session else {
            return false;
        };
        let pointer = self.pointer_in_px(me.column, me.row);
        match session {
            Session::Drag(drag) => {
                let dx = pointer.0 - drag.start_pointer.0;
                let dy = pointer.1 - drag.start_pointer.1;
                let viewport = self.viewport;
                if let Some(record) = self.window_mut(drag.id) {
                    record.position =
                        apply_drag(drag.start_position, dx, dy, record.size, viewport);
                }
            }
            Session::Resize(resize) => {
                let dx = pointer.0 - resize.start_pointer.0;
                let dy = pointer.1 - resize.start_pointer.1;
                let rect = clip_to_viewport(
                    apply_resize(resize.start_rect, resize.edge, dx, dy),
                    self.viewport,
                );
                if let Some(record) = self.window_mut(resize.id) {
                    record.position = rect.position;
                    record.size = rect.size;
                }
            }
        }
        true
    }

    fn end_session(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        self.persist(session.window_id());
        true
    }

    fn route_to_window_at(&mut self, column: u16, row: u16, event: &Event) -> bool {
        let Some(id) = self.window_at(column, row) else {
            return false;
        };
        let inner = self
            .window(id)
            .and_then(|w| w.cell_frame)
            .map(decorator::inner_rect);
        if let (Some(inner), Some(record)) = (inner, self.window_mut(id)) {
            record.view.handle_event(event, inner);
        }
        true
    }

    /// Route a keyboard event to the focused window's content.
    pub fn route_key(&mut self, event: &Event) -> bool {
        let Some(id) = self.focused_id() else {
            return false;
        };
        let inner = self
            .window(id)
            .and_then(|w| w.cell_frame)
            .map(decorator::inner_rect)
            .unwrap_or_default();
        self.window_mut(id)
            .map(|record| record.view.handle_event(event, inner))
            .unwrap_or(false)
    }

    fn bump_z(&mut self) -> u64 {
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    fn persist(&mut self, id: WindowId) {
        let Some(record) = self.window(id) else {
            return;
        };
        let config = WindowConfig {
            position: record.position,
            size: record.size,
            maximized: match record.visibility {
                Visibility::Maximized => true,
                Visibility::Minimized { from_maximized } => from_maximized,
                Visibility::Normal => false,
            },
            minimized: record.visibility.is_minimized(),
        };
        let title = record.title.clone();
        self.store.borrow_mut().set_window_config(&title, config);
    }
}
