//! Shell-level state outside the window manager: the lock screen, the
//! start and context menus, and the refresh flash.

use std::time::{Duration, Instant};

use crate::constants::{REFRESH_FLASH_MS, UNLOCK_FADE_MS};

/// Lock screen lifecycle. Starts locked, fades out after the first
/// interaction, and never re-arms for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Locked,
    Unlocking { until: Instant },
    Unlocked,
}

#[derive(Debug)]
pub struct DesktopState {
    lock: LockState,
    start_menu_open: bool,
    /// Cell position the context menu was opened at, if open.
    context_menu_at: Option<(u16, u16)>,
    refresh_flash_until: Option<Instant>,
    quit: bool,
}

impl DesktopState {
    pub fn new(start_locked: bool) -> Self {
        Self {
            lock: if start_locked {
                LockState::Locked
            } else {
                LockState::Unlocked
            },
            start_menu_open: false,
            context_menu_at: None,
            refresh_flash_until: None,
            quit: false,
        }
    }

    pub fn lock_state(&self) -> LockState {
        self.lock
    }

    /// True while the lock screen should swallow input.
    pub fn is_locked(&self) -> bool {
        matches!(self.lock, LockState::Locked)
    }

    /// Begin the unlock fade. The triggering event is consumed by the
    /// caller; nothing under the lock screen sees it.
    pub fn begin_unlock(&mut self, now: Instant) {
        if matches!(self.lock, LockState::Locked) {
            self.lock = LockState::Unlocking {
                until: now + Duration::from_millis(UNLOCK_FADE_MS),
            };
        }
    }

    /// Advance time-based state. Returns true when anything changed, so
    /// the caller knows to redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let LockState::Unlocking { until } = self.lock
            && now >= until
        {
            self.lock = LockState::Unlocked;
            changed = true;
        }
        if let Some(until) = self.refresh_flash_until
            && now >= until
        {
            self.refresh_flash_until = None;
            changed = true;
        }
        changed
    }

    pub fn start_menu_open(&self) -> bool {
        self.start_menu_open
    }

    pub fn toggle_start_menu(&mut self) {
        self.start_menu_open = !self.start_menu_open;
        if self.start_menu_open {
            self.context_menu_at = None;
        }
    }

    pub fn close_start_menu(&mut self) {
        self.start_menu_open = false;
    }

    pub fn context_menu_at(&self) -> Option<(u16, u16)> {
        self.context_menu_at
    }

    pub fn open_context_menu(&mut self, column: u16, row: u16) {
        self.context_menu_at = Some((column, row));
        self.start_menu_open = false;
    }

    pub fn close_context_menu(&mut self) {
        self.context_menu_at = None;
    }

    pub fn any_menu_open(&self) -> bool {
        self.start_menu_open || self.context_menu_at.is_some()
    }

    pub fn close_menus(&mut self) {
        self.start_menu_open = false;
        self.context_menu_at = None;
    }

    /// Start the brief dim flash shown while the desktop refreshes.
    pub fn begin_refresh_flash(&mut self, now: Instant) {
        self.refresh_flash_until = Some(now + Duration::from_millis(REFRESH_FLASH_MS));
    }

    pub fn refresh_flash_active(&self, now: Instant) -> bool {
        self.refresh_flash_until.is_some_and(|until| now < until)
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}
