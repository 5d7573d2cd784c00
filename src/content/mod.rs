//! Window content: each open window owns one boxed view.
//!
//! Views draw into the window body the decorator leaves them and may
//! consume keyboard and mouse events routed to the focused window. They
//! know nothing about window chrome, z-order, or geometry.

use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::persist::ConfigStore;
use crate::ui::UiFrame;
use crate::window::ContentKind;

pub mod audio;
pub mod calculator;
pub mod github;
pub mod markdown;
pub mod notepad;
pub mod properties;
pub mod search;

pub use audio::AudioPlayerView;
pub use calculator::CalculatorView;
pub use github::GithubView;
pub use markdown::MarkdownView;
pub use notepad::NotepadView;
pub use properties::PropertiesView;
pub use search::SearchView;

pub trait ContentView {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool);

    /// Handle an event routed to this view. `area` is the body rect the
    /// view was last drawn into, for mouse hit-testing. Returns true when
    /// the event was consumed.
    fn handle_event(&mut self, _event: &Event, _area: Rect) -> bool {
        false
    }
}

/// Accumulates scroll intent between frames and clamps it against the
/// content extent once the view height is known at render time.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScrollState {
    pub offset: usize,
    pending: isize,
}

impl ScrollState {
    pub fn reset(&mut self) {
        self.offset = 0;
        self.pending = 0;
    }

    pub fn bump(&mut self, delta: isize) {
        self.pending = self.pending.saturating_add(delta);
    }

    pub fn apply(&mut self, total: usize, view: usize) {
        let max_offset = total.saturating_sub(view);
        if self.pending != 0 {
            let delta = self.pending;
            self.pending = 0;
            let next = if delta.is_negative() {
                self.offset.saturating_sub(delta.unsigned_abs())
            } else {
                self.offset.saturating_add(delta as usize)
            };
            self.offset = next.min(max_offset);
        } else if self.offset > max_offset {
            self.offset = max_offset;
        }
    }
}

/// Build the view for a window kind. Notepad windows carry the document
/// name they edit; every other kind ignores it.
pub fn build_view(
    kind: ContentKind,
    store: &Rc<RefCell<ConfigStore>>,
    doc_name: Option<String>,
) -> Box<dyn ContentView> {
    match kind {
        ContentKind::Resume => Box::new(MarkdownView::new(markdown::docs::RESUME)),
        ContentKind::About => Box::new(MarkdownView::new(markdown::docs::ABOUT)),
        ContentKind::Projects => Box::new(MarkdownView::new(markdown::docs::PROJECTS)),
        ContentKind::Contact => Box::new(MarkdownView::new(markdown::docs::CONTACT)),
        ContentKind::Calculator => Box::new(CalculatorView::new()),
        ContentKind::Notepad => {
            let name = doc_name.unwrap_or_else(|| store.borrow_mut().next_notepad_name());
            Box::new(NotepadView::new(Rc::clone(store), name))
        }
        ContentKind::Search => Box::new(SearchView::new()),
        ContentKind::Github => Box::new(GithubView::new()),
        ContentKind::AudioPlayer => Box::new(AudioPlayerView::new()),
        ContentKind::Properties => Box::new(PropertiesView::new(Rc::clone(store))),
    }
}
