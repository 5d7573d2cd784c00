//! GitHub window: an offline snapshot of the profile with a shortcut to
//! the real page.

use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Paragraph, Wrap};

use crate::content::{ContentView, ScrollState, markdown};
use crate::theme;
use crate::ui::UiFrame;

const PROFILE_URL: &str = "https://github.com/samkeller";

const PROFILE: &str = indoc::indoc! {"
    # samkeller

    Systems and interface engineer. Mostly Rust lately.

    ## Pinned repositories

    - **term-desk** — a desktop environment for terminal shells
    - **driftcache** — read-through cache with TTL jitter
    - **patchbay** — terminal MIDI router
    - **chorde** — toy distributed hash table

    ## Activity

    A contribution graph doesn't survive the trip into a terminal; press
    `o` to open the live profile in your browser instead.
"};

pub struct GithubView {
    text: Text<'static>,
    scroll: ScrollState,
    open_failed: bool,
}

impl GithubView {
    pub fn new() -> Self {
        Self {
            text: markdown::markdown_to_text(PROFILE),
            scroll: ScrollState::default(),
            open_failed: false,
        }
    }
}

impl ContentView for GithubView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _focused: bool) {
        if area.height < 2 {
            return;
        }
        let body = Rect {
            height: area.height - 1,
            ..area
        };
        self.scroll.apply(self.text.lines.len(), body.height as usize);
        let paragraph = Paragraph::new(self.text.clone())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll.offset as u16, 0));
        frame.render_widget(paragraph, body);

        let footer = if self.open_failed {
            "Could not open a browser on this system.".to_string()
        } else {
            format!("o: open {}", PROFILE_URL)
        };
        frame.set_string(
            area.x,
            area.y + area.height - 1,
            &footer,
            Style::default()
                .fg(theme::header_fg())
                .add_modifier(Modifier::DIM),
        );
    }

    fn handle_event(&mut self, event: &Event, area: Rect) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        let page = (area.height as isize).max(1);
        match key.code {
            KeyCode::Char('o') | KeyCode::Enter => {
                if let Err(err) = webbrowser::open(PROFILE_URL) {
                    tracing::warn!(%err, "could not open browser");
                    self.open_failed = true;
                }
                true
            }
            KeyCode::Up => {
                self.scroll.bump(-1);
                true
            }
            KeyCode::Down => {
                self.scroll.bump(1);
                true
            }
            KeyCode::PageUp => {
                self.scroll.bump(-page);
                true
            }
            KeyCode::PageDown => {
                self.scroll.bump(page);
                true
            }
            _ => false,
        }
    }
}
