//! The taskbar: start button, one button per open window, and a clock.
//!
//! Hit zones are recorded at render time and reused by `hit_test` until
//! the next frame, the same contract the window manager uses for its
//! cell frames.

use chrono::Local;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::geometry::rect_contains;
use crate::theme;
use crate::ui::UiFrame;
use crate::window::{WindowId, WindowManager};

const START_LABEL: &str = " ⊞ Start ";
const CLOCK_WIDTH: u16 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarHit {
    Start,
    Window(WindowId),
}

#[derive(Debug, Default)]
pub struct Taskbar {
    start_zone: Option<Rect>,
    window_zones: Vec<(WindowId, Rect)>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ui: &mut UiFrame<'_>, area: Rect, wm: &WindowManager, start_open: bool) {
        self.start_zone = None;
        self.window_zones.clear();
        if area.height == 0 || area.width == 0 {
            return;
        }

        let bar_style = Style::default()
            .bg(theme::taskbar_bg())
            .fg(theme::taskbar_fg());
        ui.fill(area, " ", bar_style);

        // Start button.
        let start_style = if start_open {
            Style::default()
                .bg(theme::taskbar_focused_bg())
                .fg(theme::taskbar_focused_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            bar_style.add_modifier(Modifier::BOLD)
        };
        let start_width = (START_LABEL.chars().count() as u16).min(area.width);
        ui.set_string(area.x, area.y, START_LABEL, start_style);
        self.start_zone = Some(Rect {
            x: area.x,
            y: area.y,
            width: start_width,
            height: 1,
        });

        // Clock on the right.
        let clock = Local::now().format("%H:%M").to_string();
        let clock_x = area.x + area.width.saturating_sub(CLOCK_WIDTH);
        ui.set_string(clock_x + 1, area.y, &clock, bar_style);

        // One button per window, creation order, truncated to fit.
        let focused = wm.focused_id();
        let mut x = area.x + start_width + 1;
        let limit = clock_x.saturating_sub(1);
        for record in wm.windows() {
            let label = format!(" {} ", record.title);
            let width = label.chars().count() as u16;
            if x + width > limit {
                break;
            }
            let style = if focused == Some(record.id) {
                Style::default()
                    .bg(theme::taskbar_focused_bg())
                    .fg(theme::taskbar_focused_fg())
            } else if record.visibility.is_minimized() {
                bar_style.add_modifier(Modifier::DIM)
            } else {
                bar_style
            };
            ui.set_string(x, area.y, &label, style);
            self.window_zones.push((
                record.id,
                Rect {
                    x,
                    y: area.y,
                    width,
                    height: 1,
                },
            ));
            x += width + 1;
        }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<TaskbarHit> {
        if self
            .start_zone
            .is_some_and(|zone| rect_contains(zone, column, row))
        {
            return Some(TaskbarHit::Start);
        }
        self.window_zones
            .iter()
            .find(|(_, zone)| rect_contains(*zone, column, row))
            .map(|(id, _)| TaskbarHit::Window(*id))
    }
}
