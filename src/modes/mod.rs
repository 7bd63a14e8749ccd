//! Mode state machine and dispatcher.
//!
//! Exactly one mode is active at a time. The dispatcher holds the active
//! mode plus a single pending-transition slot: transitions requested during
//! a cycle (by the active mode itself or by the alarm checker) are deferred
//! and applied at the start of the next [`Dispatcher::update`] call, after
//! which the new mode's `enter` performs its full first paint. A newer
//! request simply overwrites an unapplied older one, so the last request
//! before a cycle boundary wins.
//!
//! Mode structs own only their UI state (selection indices, previous drawn
//! values for differential redraw). Everything shared lives in [`Context`]
//! and is borrowed for the duration of one cycle.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::env::EnvMonitor;
use crate::hal::Hardware;
use crate::input::InputEvents;
use crate::settings::Settings;

pub mod alarm;
pub mod clock;
pub mod dvd;
pub mod menu;
pub mod pomodoro;
pub mod settings_edit;
pub mod settings_menu;
pub mod wifi;

pub use alarm::{AlarmMode, AlarmStatus};
pub use clock::ClockMode;
pub use dvd::DvdMode;
pub use menu::{ListState, MenuMode};
pub use pomodoro::PomodoroMode;
pub use settings_edit::{SettingId, SettingsEditMode};
pub use settings_menu::SettingsMenuMode;
pub use wifi::{WifiMenuMode, WifiResetConfirmMode, WifiSetupMode};

// =============================================================================
// Shared per-cycle context
// =============================================================================

/// Everything a mode may touch during one dispatch cycle.
pub struct Context<'a, 'h> {
    /// Debounced input edges gathered since the previous cycle.
    pub input: InputEvents,
    /// Monotonic milliseconds.
    pub now_ms: u64,
    pub settings: &'a mut Settings,
    pub env: &'a mut EnvMonitor,
    pub alarm: &'a mut AlarmStatus,
    pub hw: &'a mut Hardware<'h>,
}

// =============================================================================
// Mode enum
// =============================================================================

/// Discriminant-only view of [`Mode`], for policy checks that must not
/// borrow the mode state (alert suppression, LED preview carve-outs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Clock,
    Menu,
    Pomodoro,
    Alarm,
    Dvd,
    Settings,
    SettingsEdit,
    WifiMenu,
    WifiSetup,
    WifiResetConfirm,
}

/// The full set of screens, each carrying its own state.
pub enum Mode {
    Clock(ClockMode),
    Menu(MenuMode),
    Pomodoro(PomodoroMode),
    Alarm(AlarmMode),
    Dvd(DvdMode),
    Settings(SettingsMenuMode),
    SettingsEdit(SettingsEditMode),
    WifiMenu(WifiMenuMode),
    WifiSetup(WifiSetupMode),
    WifiResetConfirm(WifiResetConfirmMode),
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Clock(_) => ModeKind::Clock,
            Mode::Menu(_) => ModeKind::Menu,
            Mode::Pomodoro(_) => ModeKind::Pomodoro,
            Mode::Alarm(_) => ModeKind::Alarm,
            Mode::Dvd(_) => ModeKind::Dvd,
            Mode::Settings(_) => ModeKind::Settings,
            Mode::SettingsEdit(_) => ModeKind::SettingsEdit,
            Mode::WifiMenu(_) => ModeKind::WifiMenu,
            Mode::WifiSetup(_) => ModeKind::WifiSetup,
            Mode::WifiResetConfirm(_) => ModeKind::WifiResetConfirm,
        }
    }

    /// Full first paint plus any side effects of becoming active.
    fn enter<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, ctx: &mut Context) {
        match self {
            Mode::Clock(m) => m.enter(display, ctx),
            Mode::Menu(m) => m.enter(display, ctx),
            Mode::Pomodoro(m) => m.enter(display, ctx),
            Mode::Alarm(m) => m.enter(display, ctx),
            Mode::Dvd(m) => m.enter(display, ctx),
            Mode::Settings(m) => m.enter(display, ctx),
            Mode::SettingsEdit(m) => m.enter(display, ctx),
            Mode::WifiMenu(m) => m.enter(display, ctx),
            Mode::WifiSetup(m) => m.enter(display, ctx),
            Mode::WifiResetConfirm(m) => m.enter(display, ctx),
        }
    }

    /// One dispatch cycle: consume input, update state, repaint only what
    /// changed. Returning `Some` requests a transition for the next cycle.
    fn run<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        ctx: &mut Context,
    ) -> Option<Mode> {
        match self {
            Mode::Clock(m) => m.run(display, ctx),
            Mode::Menu(m) => m.run(display, ctx),
            Mode::Pomodoro(m) => m.run(display, ctx),
            Mode::Alarm(m) => m.run(display, ctx),
            Mode::Dvd(m) => m.run(display, ctx),
            Mode::Settings(m) => m.run(display, ctx),
            Mode::SettingsEdit(m) => m.run(display, ctx),
            Mode::WifiMenu(m) => m.run(display, ctx),
            Mode::WifiSetup(m) => m.run(display, ctx),
            Mode::WifiResetConfirm(m) => m.run(display, ctx),
        }
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Owns the active mode and the one-slot deferred transition.
pub struct Dispatcher {
    active: Mode,
    pending: Option<Mode>,
    entered: bool,
}

impl Dispatcher {
    pub fn new(initial: Mode) -> Self {
        Self {
            active: initial,
            pending: None,
            entered: false,
        }
    }

    /// Kind of the mode that will run on the next cycle (pending wins).
    pub fn active_kind(&self) -> ModeKind {
        match &self.pending {
            Some(next) => next.kind(),
            None => self.active.kind(),
        }
    }

    /// Queue a transition. A still-unapplied earlier request is dropped.
    pub fn request(&mut self, next: Mode) {
        self.pending = Some(next);
    }

    /// Run one dispatch cycle: apply a pending transition (entering the new
    /// mode), then give the active mode one turn.
    pub fn update<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, ctx: &mut Context) {
        if let Some(next) = self.pending.take() {
            self.active = next;
            self.entered = false;
        }
        if !self.entered {
            self.active.enter(display, ctx);
            self.entered = true;
        }
        if let Some(next) = self.active.run(display, ctx) {
            self.request(next);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{test_context, NullDisplay, TestHardware};

    #[test]
    fn test_request_is_deferred_until_next_cycle() {
        let mut hw = TestHardware::new();
        let mut fix = test_context(&mut hw);
        let mut display = NullDisplay;
        let mut dispatcher = Dispatcher::new(Mode::Clock(ClockMode::new()));

        dispatcher.update(&mut display, &mut fix.ctx());
        assert_eq!(dispatcher.active_kind(), ModeKind::Clock);

        dispatcher.request(Mode::Menu(MenuMode::new()));
        // Not applied until the next update call.
        assert_eq!(dispatcher.active.kind(), ModeKind::Clock);
        dispatcher.update(&mut display, &mut fix.ctx());
        assert_eq!(dispatcher.active.kind(), ModeKind::Menu);
    }

    #[test]
    fn test_last_request_wins() {
        let mut hw = TestHardware::new();
        let mut fix = test_context(&mut hw);
        let mut display = NullDisplay;
        let mut dispatcher = Dispatcher::new(Mode::Clock(ClockMode::new()));

        dispatcher.request(Mode::Menu(MenuMode::new()));
        dispatcher.request(Mode::Dvd(DvdMode::new()));
        dispatcher.update(&mut display, &mut fix.ctx());
        assert_eq!(
            dispatcher.active.kind(),
            ModeKind::Dvd,
            "newer request must replace the stale pending one"
        );
    }

    #[test]
    fn test_active_kind_reports_pending_target() {
        let mut dispatcher = Dispatcher::new(Mode::Clock(ClockMode::new()));
        dispatcher.request(Mode::Alarm(AlarmMode::new()));
        assert_eq!(dispatcher.active_kind(), ModeKind::Alarm);
    }
}
