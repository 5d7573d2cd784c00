//! Window records and the manager that owns them.

pub mod decorator;
pub mod window_manager;

pub use window_manager::WindowManager;

use std::time::Instant;

use ratatui::layout::Rect;

use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::content::ContentView;
use crate::geometry::{PixelRect, Position, ResizeEdge, Size};

pub type WindowId = u64;

/// Everything a window can host. The kind decides the title, the default
/// geometry, and whether the frame can be resized or maximized at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Resume,
    About,
    Projects,
    Contact,
    Calculator,
    Notepad,
    Search,
    Github,
    AudioPlayer,
    Properties,
}

/// Frame behavior for a content kind. Fixed-size windows get no resize
/// borders and no maximize button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub default_size: Size,
    pub resizable: bool,
}

impl ContentKind {
    pub const ALL: [ContentKind; 10] = [
        ContentKind::Resume,
        ContentKind::About,
        ContentKind::Projects,
        ContentKind::Contact,
        ContentKind::Calculator,
        ContentKind::Notepad,
        ContentKind::Search,
        ContentKind::Github,
        ContentKind::AudioPlayer,
        ContentKind::Properties,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ContentKind::Resume => "Resume",
            ContentKind::About => "About",
            ContentKind::Projects => "Projects",
            ContentKind::Contact => "Contact",
            ContentKind::Calculator => "Calculator",
            ContentKind::Notepad => "Notepad",
            ContentKind::Search => "Search",
            ContentKind::Github => "GitHub",
            ContentKind::AudioPlayer => "Audio Player",
            ContentKind::Properties => "Properties",
        }
    }

    pub fn chrome(self) -> Chrome {
        match self {
            ContentKind::Github => Chrome {
                default_size: Size::new(715, 768),
                resizable: true,
            },
            ContentKind::Calculator => Chrome {
                default_size: Size::new(240, 320),
                resizable: false,
            },
            ContentKind::AudioPlayer => Chrome {
                default_size: Size::new(450, 550),
                resizable: false,
            },
            ContentKind::Contact => Chrome {
                default_size: Size::new(800, 582),
                resizable: true,
            },
            _ => Chrome {
                default_size: Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
                resizable: true,
            },
        }
    }

    /// Notepads may be open many times at once; everything else focuses
    /// the already-open window instead of spawning a duplicate.
    pub fn singleton(self) -> bool {
        !matches!(self, ContentKind::Notepad)
    }
}

/// Display state of a window. Position and size on the record always
/// describe the normal-state frame; maximized windows remember it here
/// untouched, and a minimized window remembers whether restore should
/// bring it back maximized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Normal,
    Minimized { from_maximized: bool },
    Maximized,
}

impl Visibility {
    pub fn is_minimized(self) -> bool {
        matches!(self, Visibility::Minimized { .. })
    }
}

pub struct WindowRecord {
    pub id: WindowId,
    pub kind: ContentKind,
    pub title: String,
    pub position: Position,
    pub size: Size,
    pub visibility: Visibility,
    pub z: u64,
    pub opened_at: Instant,
    pub view: Box<dyn ContentView>,
    /// Cell rect of the whole frame from the last layout pass, used for
    /// mouse hit-testing. None while minimized.
    pub cell_frame: Option<Rect>,
}

impl WindowRecord {
    pub fn rect(&self) -> PixelRect {
        PixelRect::new(self.position, self.size)
    }

    pub fn resizable(&self) -> bool {
        self.kind.chrome().resizable
    }
}

/// An active header drag. Pointer coordinates are virtual pixels.
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    pub id: WindowId,
    pub start_pointer: (i32, i32),
    pub start_position: Position,
}

/// An active border resize.
#[derive(Debug, Clone, Copy)]
pub struct ResizeSession {
    pub id: WindowId,
    pub edge: ResizeEdge,
    pub start_pointer: (i32, i32),
    pub start_rect: PixelRect,
}

/// At most one of these exists at a time; pressing a new button while a
/// session runs is ignored until the pointer is released.
#[derive(Debug, Clone, Copy)]
pub enum Session {
    Drag(DragSession),
    Resize(ResizeSession),
}

impl Session {
    pub fn window_id(&self) -> WindowId {
        match self {
            Session::Drag(s) => s.id,
            Session::Resize(s) => s.id,
        }
    }
}
