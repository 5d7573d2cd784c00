//! Audio player window. Terminals don't do audio output, so playback is
//! simulated: the transport state and elapsed position are real, the
//! sound is not.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::content::ContentView;
use crate::theme;
use crate::ui::UiFrame;

struct Track {
    title: &'static str,
    artist: &'static str,
    seconds: u64,
}

const TRACKS: &[Track] = &[
    Track {
        title: "Cascade",
        artist: "Window Dressing",
        seconds: 214,
    },
    Track {
        title: "Z-Order",
        artist: "Window Dressing",
        seconds: 187,
    },
    Track {
        title: "Minimize Me",
        artist: "The Taskbars",
        seconds: 243,
    },
    Track {
        title: "Eight Edges",
        artist: "The Taskbars",
        seconds: 201,
    },
];

pub struct AudioPlayerView {
    current: usize,
    /// When playback started, minus any already-elapsed time.
    playing_since: Option<Instant>,
    elapsed_at_pause: u64,
}

impl AudioPlayerView {
    pub fn new() -> Self {
        Self {
            current: 0,
            playing_since: None,
            elapsed_at_pause: 0,
        }
    }

    fn elapsed(&self) -> u64 {
        let live = self
            .playing_since
            .map(|since| since.elapsed().as_secs())
            .unwrap_or(0);
        (self.elapsed_at_pause + live).min(TRACKS[self.current].seconds)
    }

    fn toggle_play(&mut self) {
        if self.playing_since.is_some() {
            self.elapsed_at_pause = self.elapsed();
            self.playing_since = None;
        } else {
            self.playing_since = Some(Instant::now());
        }
    }

    fn select(&mut self, index: usize) {
        if index < TRACKS.len() && index != self.current {
            self.current = index;
            self.elapsed_at_pause = 0;
            if self.playing_since.is_some() {
                self.playing_since = Some(Instant::now());
            }
        }
    }

    fn skip(&mut self, forward: bool) {
        let next = if forward {
            (self.current + 1) % TRACKS.len()
        } else {
            (self.current + TRACKS.len() - 1) % TRACKS.len()
        };
        let was_current = self.current;
        self.select(next);
        if next == was_current {
            self.elapsed_at_pause = 0;
        }
    }
}

fn mmss(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

impl ContentView for AudioPlayerView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _focused: bool) {
        if area.height < 6 {
            return;
        }
        let track = &TRACKS[self.current];
        frame.set_string(
            area.x,
            area.y,
            track.title,
            Style::default().add_modifier(Modifier::BOLD),
        );
        frame.set_string(
            area.x,
            area.y + 1,
            track.artist,
            Style::default().fg(theme::header_fg()),
        );

        // Progress bar.
        let elapsed = self.elapsed();
        let width = area.width.max(1) as u64;
        let filled = (elapsed * width / track.seconds.max(1)).min(width) as u16;
        let bar_y = area.y + 3;
        frame.fill(
            Rect {
                x: area.x,
                y: bar_y,
                width: area.width,
                height: 1,
            },
            "─",
            Style::default().fg(theme::header_fg()),
        );
        frame.fill(
            Rect {
                x: area.x,
                y: bar_y,
                width: filled,
                height: 1,
            },
            "━",
            Style::default().fg(theme::accent()),
        );
        let transport = if self.playing_since.is_some() {
            "⏸"
        } else {
            "▶"
        };
        let times = format!(
            "{} {} / {}",
            transport,
            mmss(elapsed),
            mmss(track.seconds)
        );
        frame.set_string(area.x, area.y + 4, &times, Style::default());

        // Track list; the row offset has to match `handle_event`.
        for (i, t) in TRACKS.iter().enumerate() {
            let style = if i == self.current {
                Style::default()
                    .fg(theme::accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::menu_fg())
            };
            let marker = if i == self.current { "▸" } else { " " };
            frame.set_string(
                area.x,
                area.y + 6 + i as u16,
                &format!("{} {} — {}", marker, t.title, t.artist),
                style,
            );
        }
    }

    fn handle_event(&mut self, event: &Event, area: Rect) -> bool {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => {
                    self.toggle_play();
                    true
                }
                KeyCode::Right | KeyCode::Char('n') => {
                    self.skip(true);
                    true
                }
                KeyCode::Left | KeyCode::Char('p') => {
                    self.skip(false);
                    true
                }
                KeyCode::Up => {
                    self.select(self.current.saturating_sub(1));
                    true
                }
                KeyCode::Down => {
                    self.select((self.current + 1).min(TRACKS.len() - 1));
                    true
                }
                _ => false,
            },
            Event::Mouse(me) => {
                if me.kind == MouseEventKind::Down(MouseButton::Left) {
                    let list_top = area.y + 6;
                    if me.row >= list_top {
                        let index = (me.row - list_top) as usize;
                        if index < TRACKS.len() {
                            self.select(index);
                            return true;
                        }
                    } else if me.row == area.y + 3 || me.row == area.y + 4 {
                        self.toggle_play();
                        return true;
                    }
                }
                false
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_wraps_and_resets_position() {
        let mut player = AudioPlayerView::new();
        player.skip(false);
        assert_eq!(player.current, TRACKS.len() - 1);
        player.skip(true);
        assert_eq!(player.current, 0);
        assert_eq!(player.elapsed(), 0);
    }

    #[test]
    fn pause_freezes_elapsed() {
        let mut player = AudioPlayerView::new();
        player.toggle_play();
        player.toggle_play();
        assert!(player.playing_since.is_none());
        assert!(player.elapsed() <= 1);
    }

    #[test]
    fn mmss_formats() {
        assert_eq!(mmss(0), "0:00");
        assert_eq!(mmss(214), "3:34");
    }
}
