//! Search window: a query box that hands off to the system browser.
//!
//! The desktop itself never fetches anything; Enter opens the query in
//! the user's default browser and the panel records whether that worked.

use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::content::ContentView;
use crate::theme;
use crate::ui::UiFrame;

#[derive(Debug)]
pub struct SearchView {
    query: String,
    last_opened: Option<String>,
    open_failed: bool,
}

impl SearchView {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            last_opened: None,
            open_failed: false,
        }
    }

    fn submit(&mut self) {
        if self.query.is_empty() {
            return;
        }
        let url = format!(
            "https://duckduckgo.com/?q={}",
            urlencode(&self.query)
        );
        match webbrowser::open(&url) {
            Ok(()) => {
                self.last_opened = Some(self.query.clone());
                self.open_failed = false;
            }
            Err(err) => {
                tracing::warn!(%err, url, "could not open browser");
                self.open_failed = true;
            }
        }
    }
}

fn urlencode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

impl ContentView for SearchView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        frame.set_string(
            area.x,
            area.y,
            "Search the web",
            Style::default().add_modifier(Modifier::BOLD),
        );
        let prompt = format!("> {}", self.query);
        let prompt_style = if focused {
            Style::default().fg(theme::accent())
        } else {
            Style::default().fg(theme::header_fg())
        };
        frame.set_string(area.x, area.y + 2, &prompt, prompt_style);
        if focused {
            frame.fill_style(
                Rect {
                    x: area.x.saturating_add(2 + self.query.chars().count() as u16),
                    y: area.y + 2,
                    width: 1,
                    height: 1,
                },
                Style::default().add_modifier(Modifier::REVERSED),
            );
        }

        let status = if self.open_failed {
            "Could not open a browser on this system.".to_string()
        } else if let Some(q) = &self.last_opened {
            format!("Opened \"{}\" in your browser.", q)
        } else {
            "Type a query and press Enter.".to_string()
        };
        frame.set_string(
            area.x,
            area.y + 4,
            &status,
            Style::default().fg(theme::header_fg()),
        );
    }

    fn handle_event(&mut self, event: &Event, _area: Rect) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                self.query.push(c);
                true
            }
            KeyCode::Backspace => {
                self.query.pop();
                true
            }
            KeyCode::Enter => {
                self.submit();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urlencode_escapes_reserved_bytes() {
        assert_eq!(urlencode("rust wm"), "rust+wm");
        assert_eq!(urlencode("a&b=c"), "a%26b%3Dc");
        assert_eq!(urlencode("safe-_.~"), "safe-_.~");
    }
}
