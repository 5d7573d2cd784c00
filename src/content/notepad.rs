//! Plain-text notepad backed by the desktop config store.
//!
//! Each notepad window edits one named document. Ctrl+S writes the
//! document back to the store; Ctrl+K copies the whole buffer to the
//! system clipboard. Unsaved edits live only in the window.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyModifiers, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::clipboard;
use crate::content::{ContentView, ScrollState};
use crate::persist::ConfigStore;
use crate::theme;
use crate::ui::UiFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusLine {
    Clean,
    Dirty,
    Saved,
    Copied,
    ClipboardUnavailable,
}

pub struct NotepadView {
    store: Rc<RefCell<ConfigStore>>,
    doc_name: String,
    lines: Vec<String>,
    cursor_row: usize,
    cursor_col: usize,
    scroll: ScrollState,
    status: StatusLine,
}

impl NotepadView {
    pub fn new(store: Rc<RefCell<ConfigStore>>, doc_name: String) -> Self {
        let lines = store
            .borrow()
            .notepad_doc(&doc_name)
            .map(|text| text.lines().map(str::to_string).collect::<Vec<_>>())
            .filter(|lines: &Vec<String>| !lines.is_empty())
            .unwrap_or_else(|| vec![String::new()]);
        Self {
            store,
            doc_name,
            lines,
            cursor_row: 0,
            cursor_col: 0,
            scroll: ScrollState::default(),
            status: StatusLine::Clean,
        }
    }

    pub fn doc_name(&self) -> &str {
        &self.doc_name
    }

    fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn save(&mut self) {
        let text = self.text();
        self.store
            .borrow_mut()
            .save_notepad_doc(&self.doc_name, &text);
        self.status = StatusLine::Saved;
    }

    fn copy_all(&mut self) {
        self.status = match clipboard::set(&self.text()) {
            Ok(()) => StatusLine::Copied,
            Err(err) => {
                tracing::warn!(%err, "clipboard copy failed");
                StatusLine::ClipboardUnavailable
            }
        };
    }

    fn clamp_cursor(&mut self) {
        self.cursor_row = self.cursor_row.min(self.lines.len().saturating_sub(1));
        let line_len = self.lines[self.cursor_row].chars().count();
        self.cursor_col = self.cursor_col.min(line_len);
    }

    fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.cursor_row];
        let byte = char_to_byte(line, self.cursor_col);
        line.insert(byte, c);
        self.cursor_col += 1;
        self.status = StatusLine::Dirty;
    }

    fn insert_newline(&mut self) {
        let line = &mut self.lines[self.cursor_row];
        let byte = char_to_byte(line, self.cursor_col);
        let rest = line.split_off(byte);
        self.lines.insert(self.cursor_row + 1, rest);
        self.cursor_row += 1;
        self.cursor_col = 0;
        self.status = StatusLine::Dirty;
    }

    fn backspace(&mut self) {
        if self.cursor_col > 0 {
            let line = &mut self.lines[self.cursor_row];
            let byte = char_to_byte(line, self.cursor_col - 1);
            line.remove(byte);
            self.cursor_col -= 1;
            self.status = StatusLine::Dirty;
        } else if self.cursor_row > 0 {
            let removed = self.lines.remove(self.cursor_row);
            self.cursor_row -= 1;
            self.cursor_col = self.lines[self.cursor_row].chars().count();
            self.lines[self.cursor_row].push_str(&removed);
            self.status = StatusLine::Dirty;
        }
    }

    fn status_text(&self) -> &'static str {
        match self.status {
            StatusLine::Clean => "",
            StatusLine::Dirty => "modified",
            StatusLine::Saved => "saved",
            StatusLine::Copied => "copied to clipboard",
            StatusLine::ClipboardUnavailable => "clipboard unavailable",
        }
    }
}

fn char_to_byte(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

impl ContentView for NotepadView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        if area.height < 2 {
            return;
        }
        let body_height = area.height as usize - 1;
        // Keep the cursor line visible.
        if self.cursor_row < self.scroll.offset {
            self.scroll.offset = self.cursor_row;
        } else if self.cursor_row >= self.scroll.offset + body_height {
            self.scroll.offset = self.cursor_row + 1 - body_height;
        }
        self.scroll.apply(self.lines.len(), body_height);

        let text_style = Style::default().fg(theme::menu_fg());
        for (i, line) in self
            .lines
            .iter()
            .skip(self.scroll.offset)
            .take(body_height)
            .enumerate()
        {
            frame.set_string(area.x, area.y + i as u16, line, text_style);
        }

        // A wheel scroll applied above may have moved the view off the
        // cursor line; only paint the cursor while it is on screen.
        let cursor_visible = self.cursor_row >= self.scroll.offset
            && self.cursor_row < self.scroll.offset + body_height;
        if focused && cursor_visible {
            let cursor_y = area.y + (self.cursor_row - self.scroll.offset) as u16;
            let cursor_x = area.x.saturating_add(self.cursor_col as u16);
            frame.fill_style(
                Rect {
                    x: cursor_x.min(area.right().saturating_sub(1)),
                    y: cursor_y,
                    width: 1,
                    height: 1,
                },
                Style::default().add_modifier(Modifier::REVERSED),
            );
        }

        let footer = format!(
            "{}  Ctrl+S save  Ctrl+K copy  {}",
            self.doc_name,
            self.status_text()
        );
        frame.set_string(
            area.x,
            area.y + area.height - 1,
            &footer,
            Style::default().fg(theme::header_fg()),
        );
    }

    fn handle_event(&mut self, event: &Event, area: Rect) -> bool {
        match event {
            Event::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    match key.code {
                        KeyCode::Char('s') => {
                            self.save();
                            return true;
                        }
                        KeyCode::Char('k') => {
                            self.copy_all();
                            return true;
                        }
                        _ => return false,
                    }
                }
                match key.code {
                    KeyCode::Char(c) => self.insert_char(c),
                    KeyCode::Enter => self.insert_newline(),
                    KeyCode::Backspace => self.backspace(),
                    KeyCode::Left => self.cursor_col = self.cursor_col.saturating_sub(1),
                    KeyCode::Right => {
                        self.cursor_col += 1;
                        self.clamp_cursor();
                    }
                    KeyCode::Up => {
                        self.cursor_row = self.cursor_row.saturating_sub(1);
                        self.clamp_cursor();
                    }
                    KeyCode::Down => {
                        self.cursor_row += 1;
                        self.clamp_cursor();
                    }
                    KeyCode::Home => self.cursor_col = 0,
                    KeyCode::End => {
                        self.cursor_col = usize::MAX;
                        self.clamp_cursor();
                    }
                    _ => return false,
                }
                true
            }
            Event::Mouse(me) => match me.kind {
                MouseEventKind::ScrollUp => {
                    self.scroll.bump(-3);
                    true
                }
                MouseEventKind::ScrollDown => {
                    self.scroll.bump(3);
                    true
                }
                MouseEventKind::Down(_) => {
                    // Place the cursor at the clicked cell.
                    let row = (me.row.saturating_sub(area.y)) as usize + self.scroll.offset;
                    let col = (me.column.saturating_sub(area.x)) as usize;
                    self.cursor_row = row;
                    self.cursor_col = col;
                    self.clamp_cursor();
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn area() -> Rect {
        Rect::new(0, 0, 40, 10)
    }

    #[test]
    fn typing_and_saving_round_trips_through_store() {
        let store = Rc::new(RefCell::new(ConfigStore::in_memory()));
        let mut pad = NotepadView::new(Rc::clone(&store), "Untitled 1".to_string());
        for c in "hi".chars() {
            assert!(pad.handle_event(&key(KeyCode::Char(c)), area()));
        }
        pad.handle_event(&key(KeyCode::Enter), area());
        pad.handle_event(&key(KeyCode::Char('x')), area());
        assert!(pad.handle_event(&ctrl('s'), area()));
        assert_eq!(store.borrow().notepad_doc("Untitled 1"), Some("hi\nx"));

        let reopened = NotepadView::new(store, "Untitled 1".to_string());
        assert_eq!(reopened.text(), "hi\nx");
    }

    #[test]
    fn backspace_joins_lines() {
        let store = Rc::new(RefCell::new(ConfigStore::in_memory()));
        let mut pad = NotepadView::new(store, "n".to_string());
        pad.handle_event(&key(KeyCode::Char('a')), area());
        pad.handle_event(&key(KeyCode::Enter), area());
        pad.handle_event(&key(KeyCode::Char('b')), area());
        pad.handle_event(&key(KeyCode::Home), area());
        pad.handle_event(&key(KeyCode::Backspace), area());
        assert_eq!(pad.text(), "ab");
        assert_eq!(pad.cursor_row, 0);
        assert_eq!(pad.cursor_col, 1);
    }

    #[test]
    fn wheel_scroll_past_cursor_still_renders() {
        let store = Rc::new(RefCell::new(ConfigStore::in_memory()));
        let text = (0..40)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        store.borrow_mut().save_notepad_doc("n", &text);
        let mut pad = NotepadView::new(store, "n".to_string());

        let wheel = Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 5,
            row: 5,
            modifiers: KeyModifiers::NONE,
        });
        assert!(pad.handle_event(&wheel, area()));

        // Cursor stays on line 0 while the view scrolls away from it.
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).expect("terminal");
        terminal
            .draw(|frame| {
                let mut ui = UiFrame::new(frame);
                pad.render(&mut ui, area(), true);
            })
            .expect("draw");
        assert_eq!(pad.scroll.offset, 3);
        assert_eq!(pad.cursor_row, 0);
    }

    #[test]
    fn cursor_clamps_to_line_end() {
        let store = Rc::new(RefCell::new(ConfigStore::in_memory()));
        let mut pad = NotepadView::new(store, "n".to_string());
        for c in "long line".chars() {
            pad.handle_event(&key(KeyCode::Char(c)), area());
        }
        pad.handle_event(&key(KeyCode::Enter), area());
        pad.handle_event(&key(KeyCode::Char('a')), area());
        pad.handle_event(&key(KeyCode::Up), area());
        assert_eq!(pad.cursor_row, 0);
        assert!(pad.cursor_col <= "long line".len());
    }
}
