//! Top-level appliance state and the once-per-frame tick.
//!
//! Tick order is fixed: run the dispatcher (which applies any pending mode
//! transition and gives the active mode one turn), then evaluate the alarm
//! trigger, then drive the alert coordinator. An alarm firing preempts
//! whatever transition the active mode just requested, because its request
//! lands in the pending slot last.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::alert::AlertCoordinator;
use crate::env::EnvMonitor;
use crate::hal::Hardware;
use crate::input::InputEvents;
use crate::modes::{self, AlarmMode, AlarmStatus, ClockMode, Context, Dispatcher, Mode};
use crate::settings::Settings;

pub struct App {
    dispatcher: Dispatcher,
    settings: Settings,
    env: EnvMonitor,
    alarm: AlarmStatus,
    alert: AlertCoordinator,
}

impl App {
    /// Boot state: settings from persistent storage, clock screen active.
    pub fn new(hw: &mut Hardware) -> Self {
        Self {
            dispatcher: Dispatcher::new(Mode::Clock(ClockMode::new())),
            settings: hw.store.load(),
            env: EnvMonitor::new(),
            alarm: AlarmStatus::default(),
            alert: AlertCoordinator::new(),
        }
    }

    pub fn tick<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        input: InputEvents,
        now_ms: u64,
        hw: &mut Hardware,
    ) {
        let mut ctx = Context {
            input,
            now_ms,
            settings: &mut self.settings,
            env: &mut self.env,
            alarm: &mut self.alarm,
            hw,
        };
        self.dispatcher.update(display, &mut ctx);

        if let Some(t) = hw.clock.now()
            && modes::alarm::should_fire(&self.settings, &self.alarm, t)
        {
            self.alarm.ringing = true;
            self.alarm.last_fired_day = Some(t.day);
            self.dispatcher.request(Mode::Alarm(AlarmMode::new()));
        }

        self.alert.update(
            now_ms,
            self.dispatcher.active_kind(),
            self.alarm.ringing,
            self.env.eco2,
            &self.settings,
            &mut *hw.led,
            &mut *hw.buzzer,
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
