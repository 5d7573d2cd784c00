//! Shared crate-wide constants.
//!
//! The window manager works in a virtual pixel space; the terminal shell
//! projects pixels onto character cells at a fixed scale. Keeping the
//! scale here (rather than in the renderer) lets geometry tests assert
//! pixel-level invariants without a terminal.

/// Horizontal pixels covered by one terminal column.
pub const CELL_PX_W: u32 = 10;

/// Vertical pixels covered by one terminal row.
pub const CELL_PX_H: u32 = 20;

/// Smallest width a resizable window may reach, in pixels.
pub const MIN_WINDOW_WIDTH: u32 = 300;

/// Smallest height a resizable window may reach, in pixels.
pub const MIN_WINDOW_HEIGHT: u32 = 200;

/// Default window size for content that doesn't declare its own.
pub const DEFAULT_WINDOW_WIDTH: u32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;

/// Origin of the new-window cascade, in pixels from the desktop corner.
pub const CASCADE_BASE_LEFT: i32 = 100;
pub const CASCADE_BASE_TOP: i32 = 100;

/// Diagonal offset applied per already-open window when cascading.
pub const CASCADE_STEP: i32 = 40;

/// Rows reserved for the taskbar at the bottom of the terminal.
pub const TASKBAR_ROWS: u16 = 1;

/// Duration of the presentational open-fade on a freshly created window.
pub const WINDOW_OPEN_FADE_MS: u64 = 150;

/// Duration of the desktop refresh flash.
pub const REFRESH_FLASH_MS: u64 = 500;

/// Duration of the unlock transition after the first interaction.
pub const UNLOCK_FADE_MS: u64 = 1000;
