//! Main menu screen.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::modes::{
    AlarmMode, ClockMode, Context, DvdMode, Mode, PomodoroMode, SettingsMenuMode,
};
use crate::widgets::{draw_header, draw_list};

// =============================================================================
// List selection state
// =============================================================================

/// Selection cursor for a vertical list, tracking the previously selected
/// row so callers can repaint only the two rows that changed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListState {
    pub index: usize,
    /// Row that lost the highlight on the most recent move.
    pub last: Option<usize>,
}

impl ListState {
    pub const fn new() -> Self {
        Self {
            index: 0,
            last: None,
        }
    }

    /// Move the cursor by `delta` detents, wrapping at both ends.
    /// Returns true when the selection actually moved.
    pub fn rotate(&mut self, delta: i32, count: usize) -> bool {
        if delta == 0 || count == 0 {
            return false;
        }
        let count = count as i32;
        let current = self.index as i32;
        let next = (current + delta).rem_euclid(count) as usize;
        if next == self.index {
            return false;
        }
        self.last = Some(self.index);
        self.index = next;
        true
    }
}

// =============================================================================
// Menu mode
// =============================================================================

const MENU_ROWS: [&str; 5] = ["Monitor", "Pomodoro", "Alarm", "DVD", "Settings"];

pub struct MenuMode {
    list: ListState,
}

impl MenuMode {
    pub const fn new() -> Self {
        Self {
            list: ListState::new(),
        }
    }

    pub fn enter<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, ctx: &mut Context) {
        draw_header(display, "MENU", ctx.settings.alarm_enabled);
        draw_list(display, &MENU_ROWS, self.list.index, None, true);
    }

    pub fn run<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        ctx: &mut Context,
    ) -> Option<Mode> {
        if self.list.rotate(ctx.input.rotation, MENU_ROWS.len()) {
            draw_list(display, &MENU_ROWS, self.list.index, self.list.last, false);
        }
        if ctx.input.confirm {
            return Some(match self.list.index {
                0 => Mode::Clock(ClockMode::new()),
                1 => Mode::Pomodoro(PomodoroMode::new()),
                2 => Mode::Alarm(AlarmMode::new()),
                3 => Mode::Dvd(DvdMode::new()),
                _ => Mode::Settings(SettingsMenuMode::new()),
            });
        }
        if ctx.input.back {
            return Some(Mode::Clock(ClockMode::new()));
        }
        None
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
