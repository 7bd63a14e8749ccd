//! Alarm configuration screen, ringing screen, and the trigger check.
//!
//! Once the alarm fires, a day guard blocks a second trigger on the same
//! calendar day. Dismissing the ringing alarm or editing any alarm field
//! clears the guard, so a re-armed alarm can fire again.

use core::fmt::Write;

use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::colors::{BG, GREEN, LIGHT, RED, WHITE};
use crate::config::ALARM_BEEP_MS;
use crate::hal::TimeOfDay;
use crate::modes::{Context, MenuMode, Mode};
use crate::settings::Settings;
use crate::styles::{BODY_FONT, VALUE_FONT};
use crate::widgets::{clear_screen, draw_alarm_icon, text, text_centered};

const TIME_Y: i32 = 95;
const STATUS_Y: i32 = 170;
// "88:88" in the 16px value font, centered on a 320px screen.
const TIME_X: i32 = (320 - 5 * 16) / 2;

// =============================================================================
// Trigger state and check
// =============================================================================

/// Shared alarm state, owned by the app and visible to every mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlarmStatus {
    pub ringing: bool,
    /// Day-of-month of the last trigger. Blocks refiring on the same day.
    pub last_fired_day: Option<u8>,
}

/// The trigger condition, evaluated once per dispatch cycle with fresh
/// wall-clock time.
pub fn should_fire(settings: &Settings, status: &AlarmStatus, t: TimeOfDay) -> bool {
    settings.alarm_enabled
        && !status.ringing
        && t.hour == settings.alarm_hour
        && t.minute == settings.alarm_minute
        && t.second == 0
        && status.last_fired_day != Some(t.day)
}

// =============================================================================
// Alarm mode
// =============================================================================

/// Cursor over the three editable fields: hour, minute, enabled.
const FIELD_COUNT: usize = 3;

pub struct AlarmMode {
    field: usize,
    last_beep_ms: u64,
}

impl AlarmMode {
    pub const fn new() -> Self {
        Self {
            field: 0,
            last_beep_ms: 0,
        }
    }

    pub fn enter<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, ctx: &mut Context) {
        self.field = 0;
        self.last_beep_ms = 0;
        if ctx.alarm.ringing {
            draw_ringing_screen(display);
        } else {
            self.draw_config(display, ctx.settings, true);
        }
    }

    pub fn run<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        ctx: &mut Context,
    ) -> Option<Mode> {
        if ctx.alarm.ringing {
            if ctx.now_ms.saturating_sub(self.last_beep_ms) >= ALARM_BEEP_MS {
                self.last_beep_ms = ctx.now_ms;
                ctx.hw.buzzer.tone(2000, 400, ctx.settings.speaker_vol as u8);
            }
            if ctx.input.confirm || ctx.input.back {
                ctx.alarm.ringing = false;
                ctx.alarm.last_fired_day = None;
                ctx.hw.buzzer.stop();
                self.draw_config(display, ctx.settings, true);
            }
            return None;
        }

        let mut changed = false;
        if ctx.input.rotation != 0 {
            let s = &mut *ctx.settings;
            match self.field {
                0 => s.alarm_hour = wrap_add(s.alarm_hour, ctx.input.rotation, 24),
                1 => s.alarm_minute = wrap_add(s.alarm_minute, ctx.input.rotation, 60),
                _ => s.alarm_enabled = !s.alarm_enabled,
            }
            // Any edit re-arms the alarm for today.
            ctx.alarm.last_fired_day = None;
            changed = true;
        }
        if ctx.input.confirm {
            self.field = (self.field + 1) % FIELD_COUNT;
            changed = true;
        }
        if ctx.input.back {
            ctx.hw.store.save(ctx.settings);
            return Some(Mode::Menu(MenuMode::new()));
        }
        if changed {
            self.draw_config(display, ctx.settings, false);
            draw_alarm_icon(display, ctx.settings.alarm_enabled);
        }
        None
    }

    fn draw_config<D: DrawTarget<Color = Rgb565>>(
        &self,
        display: &mut D,
        settings: &Settings,
        full: bool,
    ) {
        if full {
            clear_screen(display, BG, settings.alarm_enabled);
            text(
                display,
                "Status:",
                60,
                STATUS_Y,
                MonoTextStyle::new(BODY_FONT, WHITE),
            );
        }

        let mut buf: String2 = String2::new();
        let _ = write!(buf, "{:02}", settings.alarm_hour);
        let hour_color = if self.field == 0 { LIGHT } else { WHITE };
        text(display, &buf, TIME_X, TIME_Y, field_style(hour_color));
        text(display, ":", TIME_X + 32, TIME_Y, field_style(WHITE));
        buf.clear();
        let _ = write!(buf, "{:02}", settings.alarm_minute);
        let min_color = if self.field == 1 { LIGHT } else { WHITE };
        text(display, &buf, TIME_X + 48, TIME_Y, field_style(min_color));

        let en_color = if self.field == 2 {
            LIGHT
        } else if settings.alarm_enabled {
            GREEN
        } else {
            RED
        };
        let label = if settings.alarm_enabled { "ON " } else { "OFF" };
        text(
            display,
            label,
            190,
            STATUS_Y,
            MonoTextStyleBuilder::new()
                .font(BODY_FONT)
                .text_color(en_color)
                .background_color(BG)
                .build(),
        );
    }
}

type String2 = heapless::String<4>;

fn field_style(color: Rgb565) -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyleBuilder::new()
        .font(VALUE_FONT)
        .text_color(color)
        .background_color(BG)
        .build()
}

/// Wrap-around field arithmetic for hours and minutes.
fn wrap_add(value: u8, delta: i32, modulus: i32) -> u8 {
    (value as i32 + delta).rem_euclid(modulus) as u8
}

fn draw_ringing_screen<D: DrawTarget<Color = Rgb565>>(display: &mut D) {
    display.clear(RED).ok();
    text_centered(
        display,
        "ALARM!",
        125,
        MonoTextStyleBuilder::new()
            .font(VALUE_FONT)
            .text_color(WHITE)
            .background_color(RED)
            .build(),
    );
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvents;
    use crate::testutil::{test_context, NullDisplay, TestHardware};

    fn at(hour: u8, minute: u8, second: u8, day: u8) -> TimeOfDay {
        TimeOfDay {
            hour,
            minute,
            second,
            day,
        }
    }

    fn armed() -> Settings {
        Settings {
            alarm_hour: 7,
            alarm_minute: 30,
            alarm_enabled: true,
            ..Settings::default()
        }
    }

    #[test]
    fn test_fires_only_at_configured_minute_boundary() {
        let status = AlarmStatus::default();
        assert!(should_fire(&armed(), &status, at(7, 30, 0, 12)));
        assert!(!should_fire(&armed(), &status, at(7, 30, 1, 12)), "only at second zero");
        assert!(!should_fire(&armed(), &status, at(7, 31, 0, 12)));
        assert!(!should_fire(&armed(), &status, at(8, 30, 0, 12)));
    }

    #[test]
    fn test_disabled_or_ringing_never_fires() {
        let mut settings = armed();
        settings.alarm_enabled = false;
        assert!(!should_fire(&settings, &AlarmStatus::default(), at(7, 30, 0, 12)));

        let ringing = AlarmStatus {
            ringing: true,
            last_fired_day: None,
        };
        assert!(!should_fire(&armed(), &ringing, at(7, 30, 0, 12)));
    }

    #[test]
    fn test_day_guard_blocks_same_day_refire() {
        let fired_today = AlarmStatus {
            ringing: false,
            last_fired_day: Some(12),
        };
        assert!(!should_fire(&armed(), &fired_today, at(7, 30, 0, 12)));
        assert!(
            should_fire(&armed(), &fired_today, at(7, 30, 0, 13)),
            "a new day clears the guard implicitly"
        );
    }

    #[test]
    fn test_dismiss_silences_and_rearms() {
        let mut hw = TestHardware::new();
        {
            let mut fix = test_context(&mut hw);
            fix.alarm.ringing = true;
            fix.alarm.last_fired_day = Some(12);
            let mut display = NullDisplay;
            let mut alarm = AlarmMode::new();

            fix.input = InputEvents {
                rotation: 0,
                confirm: true,
                back: false,
            };
            let next = alarm.run(&mut display, &mut fix.ctx());
            assert!(next.is_none(), "dismissal stays on the alarm screen");
            assert!(!fix.alarm.ringing);
            assert_eq!(fix.alarm.last_fired_day, None);
        }
        assert!(hw.buzzer.stopped);
    }

    #[test]
    fn test_ringing_chirps_on_the_beep_cadence() {
        let mut hw = TestHardware::new();
        {
            let mut fix = test_context(&mut hw);
            fix.alarm.ringing = true;
            let mut display = NullDisplay;
            let mut alarm = AlarmMode::new();

            fix.now_ms = 1_000;
            alarm.run(&mut display, &mut fix.ctx());
            fix.now_ms = 1_500; // too soon
            alarm.run(&mut display, &mut fix.ctx());
            fix.now_ms = 2_000;
            alarm.run(&mut display, &mut fix.ctx());
        }
        assert_eq!(hw.buzzer.tones, vec![(2000, 400), (2000, 400)]);
    }

    #[test]
    fn test_edits_wrap_and_clear_day_guard() {
        let mut hw = TestHardware::new();
        let mut fix = test_context(&mut hw);
        fix.settings.alarm_hour = 23;
        fix.alarm.last_fired_day = Some(5);
        let mut display = NullDisplay;
        let mut alarm = AlarmMode::new();

        fix.input = InputEvents {
            rotation: 1,
            confirm: false,
            back: false,
        };
        alarm.run(&mut display, &mut fix.ctx());
        assert_eq!(fix.settings.alarm_hour, 0, "hour wraps 23 -> 0");
        assert_eq!(fix.alarm.last_fired_day, None, "edit re-arms the alarm");

        // Advance to the minute field and wrap downward.
        fix.input = InputEvents {
            rotation: 0,
            confirm: true,
            back: false,
        };
        alarm.run(&mut display, &mut fix.ctx());
        fix.settings.alarm_minute = 0;
        fix.input = InputEvents {
            rotation: -1,
            confirm: false,
            back: false,
        };
        alarm.run(&mut display, &mut fix.ctx());
        assert_eq!(fix.settings.alarm_minute, 59, "minute wraps 0 -> 59");
    }
}
