//! term-desk: a portfolio desktop environment for terminal shells.
//!
//! Overlapping windows with drag, resize, minimize, and maximize; a
//! taskbar, desktop icons, a start menu, and durable window placement.
//! Window geometry lives in a virtual pixel space and is projected onto
//! terminal cells at draw time.

pub mod clipboard;
pub mod constants;
pub mod content;
pub mod desktop;
pub mod drivers;
pub mod event_loop;
pub mod geometry;
pub mod keybindings;
pub mod panel;
pub mod persist;
pub mod state;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
