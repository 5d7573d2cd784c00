//! Properties window: pick the desktop wallpaper. The choice is written
//! straight to the store; the shell reads it back every frame.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{Event, KeyCode, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::content::ContentView;
use crate::persist::ConfigStore;
use crate::theme::{self, WALLPAPERS};
use crate::ui::UiFrame;

pub struct PropertiesView {
    store: Rc<RefCell<ConfigStore>>,
    selected: usize,
}

impl PropertiesView {
    pub fn new(store: Rc<RefCell<ConfigStore>>) -> Self {
        let current = store.borrow().wallpaper().to_string();
        let selected = WALLPAPERS
            .iter()
            .position(|w| w.name == current)
            .unwrap_or(0);
        Self { store, selected }
    }

    fn apply(&mut self) {
        self.store
            .borrow_mut()
            .set_wallpaper(WALLPAPERS[self.selected].name);
    }

    fn move_selection(&mut self, down: bool) {
        if down {
            self.selected = (self.selected + 1).min(WALLPAPERS.len() - 1);
        } else {
            self.selected = self.selected.saturating_sub(1);
        }
    }
}

impl ContentView for PropertiesView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _focused: bool) {
        frame.set_string(
            area.x,
            area.y,
            "Wallpaper",
            Style::default().add_modifier(Modifier::BOLD),
        );
        let active = self.store.borrow().wallpaper().to_string();
        for (i, wallpaper) in WALLPAPERS.iter().enumerate() {
            let y = area.y + 2 + i as u16;
            let style = if i == self.selected {
                Style::default()
                    .fg(theme::menu_selected_fg())
                    .bg(theme::menu_selected_bg())
            } else {
                Style::default().fg(theme::menu_fg())
            };
            let mark = if wallpaper.name == active { "●" } else { "○" };
            frame.set_string(
                area.x,
                y,
                &format!(" {} {:<8}", mark, wallpaper.name),
                style,
            );
            // Swatch to the right of the name.
            frame.fill(
                Rect {
                    x: area.x + 13,
                    y,
                    width: 6.min(area.width.saturating_sub(13)),
                    height: 1,
                },
                wallpaper.glyph,
                Style::default().fg(wallpaper.fg).bg(wallpaper.bg),
            );
        }
        frame.set_string(
            area.x,
            area.y + 3 + WALLPAPERS.len() as u16,
            "Enter or click applies the selection.",
            Style::default().fg(theme::header_fg()),
        );
    }

    fn handle_event(&mut self, event: &Event, area: Rect) -> bool {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Up => {
                    self.move_selection(false);
                    true
                }
                KeyCode::Down => {
                    self.move_selection(true);
                    true
                }
                KeyCode::Enter => {
                    self.apply();
                    true
                }
                _ => false,
            },
            Event::Mouse(me) => {
                if me.kind == MouseEventKind::Down(MouseButton::Left) {
                    let list_top = area.y + 2;
                    if me.row >= list_top {
                        let index = (me.row - list_top) as usize;
                        if index < WALLPAPERS.len() {
                            self.selected = index;
                            self.apply();
                            return true;
                        }
                    }
                }
                false
            }
            _ => false,
        }
    }
}
