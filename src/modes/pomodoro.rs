//! Pomodoro timer: four-step configuration, then a work/break cycle loop.
//!
//! Timing uses the monotonic millisecond clock. Pausing records the pause
//! instant; resuming shifts the phase start forward by the paused span, so
//! the remaining time is exactly what it was at the pause.

use core::fmt::Write;

use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use heapless::String;

use crate::colors::{ACCENT, BG, GREEN, LIGHT, WHITE, YELLOW};
use crate::config::{
    POMO_CYCLES_RANGE, POMO_LONG_RANGE, POMO_SHORT_RANGE, POMO_WORK_RANGE, SCREEN_WIDTH,
};
use crate::modes::{Context, MenuMode, Mode};
use crate::settings::clamp_adjust;
use crate::styles::{BODY_FONT, BODY_STYLE_WHITE, VALUE_FONT};
use crate::widgets::{draw_bar, draw_header, text_centered};

const LABEL_Y: i32 = 40;
const VALUE_Y: i32 = 130;
const TIMER_Y: i32 = 115;
const CYCLE_Y: i32 = 190;
const BAR_X: i32 = 20;
const BAR_Y: i32 = 225;
const BAR_W: u32 = 280;
const BAR_H: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigStep {
    Work,
    Short,
    Long,
    Cycles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PomodoroState {
    Config(ConfigStep),
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Work,
    Short,
    Long,
}

pub struct PomodoroMode {
    state: PomodoroState,
    phase: Phase,
    cycle: i32,
    start_ms: u64,
    paused_ms: u64,
    duration_ms: u64,
    // Differential-redraw trackers.
    prev_value: i32,
    prev_bar_w: i32,
    prev_label: &'static str,
    prev_time: String<8>,
    prev_time_color: Rgb565,
}

impl PomodoroMode {
    pub fn new() -> Self {
        Self {
            state: PomodoroState::Config(ConfigStep::Work),
            phase: Phase::Work,
            cycle: 1,
            start_ms: 0,
            paused_ms: 0,
            duration_ms: 0,
            prev_value: -1,
            prev_bar_w: -1,
            prev_label: "",
            prev_time: String::new(),
            prev_time_color: BG,
        }
    }

    pub fn enter<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, ctx: &mut Context) {
        self.state = PomodoroState::Config(ConfigStep::Work);
        self.prev_value = -1;
        draw_header(display, "Set Work", ctx.settings.alarm_enabled);
        self.draw_value(display, ctx.settings.pomo_work_min);
    }

    pub fn run<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        ctx: &mut Context,
    ) -> Option<Mode> {
        match self.state {
            PomodoroState::Config(step) => self.run_config(display, ctx, step),
            PomodoroState::Running | PomodoroState::Paused => self.run_timer(display, ctx),
        }

        if ctx.input.back {
            ctx.hw.store.save(ctx.settings);
            return Some(Mode::Menu(MenuMode::new()));
        }
        None
    }

    fn run_config<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        ctx: &mut Context,
        step: ConfigStep,
    ) {
        let s = &mut *ctx.settings;
        if ctx.input.rotation != 0 {
            let value = match step {
                ConfigStep::Work => {
                    s.pomo_work_min = clamp_adjust(s.pomo_work_min, ctx.input.rotation, POMO_WORK_RANGE);
                    s.pomo_work_min
                }
                ConfigStep::Short => {
                    s.pomo_short_min =
                        clamp_adjust(s.pomo_short_min, ctx.input.rotation, POMO_SHORT_RANGE);
                    s.pomo_short_min
                }
                ConfigStep::Long => {
                    s.pomo_long_min =
                        clamp_adjust(s.pomo_long_min, ctx.input.rotation, POMO_LONG_RANGE);
                    s.pomo_long_min
                }
                ConfigStep::Cycles => {
                    s.pomo_cycles = clamp_adjust(s.pomo_cycles, ctx.input.rotation, POMO_CYCLES_RANGE);
                    s.pomo_cycles
                }
            };
            self.draw_value(display, value);
        }

        if ctx.input.confirm {
            self.prev_value = -1;
            match step {
                ConfigStep::Work => {
                    self.state = PomodoroState::Config(ConfigStep::Short);
                    draw_header(display, "Short Break", s.alarm_enabled);
                    self.draw_value(display, s.pomo_short_min);
                }
                ConfigStep::Short => {
                    self.state = PomodoroState::Config(ConfigStep::Long);
                    draw_header(display, "Long Break", s.alarm_enabled);
                    self.draw_value(display, s.pomo_long_min);
                }
                ConfigStep::Long => {
                    self.state = PomodoroState::Config(ConfigStep::Cycles);
                    draw_header(display, "Set Cycles", s.alarm_enabled);
                    self.draw_value(display, s.pomo_cycles);
                }
                ConfigStep::Cycles => {
                    self.state = PomodoroState::Running;
                    self.phase = Phase::Work;
                    self.cycle = 1;
                    self.duration_ms = s.pomo_work_min as u64 * 60_000;
                    self.start_ms = ctx.now_ms;
                    self.draw_timer_screen(display, ctx.now_ms, s.pomo_cycles, true);
                }
            }
        }
    }

    fn run_timer<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, ctx: &mut Context) {
        if ctx.input.confirm {
            if self.state == PomodoroState::Running {
                self.state = PomodoroState::Paused;
                self.paused_ms = ctx.now_ms;
            } else {
                self.start_ms += ctx.now_ms - self.paused_ms;
                self.state = PomodoroState::Running;
            }
        }

        let mut full_repaint = false;
        if self.state == PomodoroState::Running
            && ctx.now_ms.saturating_sub(self.start_ms) >= self.duration_ms
        {
            // Phase complete chime, LED on for the duration of the tone.
            ctx.hw.led.set_brightness(ctx.settings.led_brightness as u8);
            ctx.hw
                .buzzer
                .tone(2000, 1500, ctx.settings.speaker_vol as u8);
            ctx.hw.led.set_brightness(0);
            self.advance_phase(ctx.settings.pomo_cycles);
            self.duration_ms = self.phase_duration_ms(ctx);
            self.start_ms = ctx.now_ms;
            full_repaint = true;
        }
        self.draw_timer_screen(display, ctx.now_ms, ctx.settings.pomo_cycles, full_repaint);
    }

    /// Work alternates with short breaks until the final cycle, which earns
    /// the long break; after that the whole sequence starts over.
    fn advance_phase(&mut self, total_cycles: i32) {
        match self.phase {
            Phase::Work => {
                self.phase = if self.cycle < total_cycles {
                    Phase::Short
                } else {
                    Phase::Long
                };
            }
            Phase::Short => {
                self.phase = Phase::Work;
                self.cycle += 1;
            }
            Phase::Long => {
                self.phase = Phase::Work;
                self.cycle = 1;
            }
        }
    }

    fn phase_duration_ms(&self, ctx: &Context) -> u64 {
        let minutes = match self.phase {
            Phase::Work => ctx.settings.pomo_work_min,
            Phase::Short => ctx.settings.pomo_short_min,
            Phase::Long => ctx.settings.pomo_long_min,
        };
        minutes as u64 * 60_000
    }

    /// Big centered number for the config screens, erased-and-redrawn only
    /// when the value changes.
    fn draw_value<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, value: i32) {
        if value == self.prev_value {
            return;
        }
        self.prev_value = value;
        let w = 100;
        Rectangle::new(
            Point::new((SCREEN_WIDTH as i32 - w) / 2, VALUE_Y - 30),
            Size::new(w as u32, 50),
        )
        .into_styled(PrimitiveStyle::with_fill(BG))
        .draw(display)
        .ok();
        let mut buf: String<8> = String::new();
        let _ = write!(buf, "{value}");
        text_centered(display, &buf, VALUE_Y, big_style(WHITE));
    }

    fn draw_timer_screen<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        now_ms: u64,
        total_cycles: i32,
        full: bool,
    ) {
        if full {
            display.clear(BG).ok();
            self.prev_bar_w = -1;
            self.prev_label = "";
            self.prev_time.clear();
            let mut buf: String<16> = String::new();
            let _ = write!(buf, "Cycle: {}/{}", self.cycle, total_cycles);
            text_centered(display, &buf, CYCLE_Y, BODY_STYLE_WHITE);
        }

        let (label, label_color) = match (self.state, self.phase) {
            (PomodoroState::Paused, _) => ("Paused", YELLOW),
            (_, Phase::Work) => ("Get to Work!", LIGHT),
            (_, Phase::Short) => ("Short Break", GREEN),
            (_, Phase::Long) => ("Long Break", ACCENT),
        };
        if label != self.prev_label {
            Rectangle::new(Point::new(0, LABEL_Y - 14), Size::new(SCREEN_WIDTH, 22))
                .into_styled(PrimitiveStyle::with_fill(BG))
                .draw(display)
                .ok();
            text_centered(
                display,
                label,
                LABEL_Y,
                MonoTextStyleBuilder::new()
                    .font(BODY_FONT)
                    .text_color(label_color)
                    .build(),
            );
            self.prev_label = label;
        }

        let elapsed = match self.state {
            PomodoroState::Running => now_ms.saturating_sub(self.start_ms),
            _ => self.paused_ms.saturating_sub(self.start_ms),
        }
        .min(self.duration_ms);
        let percent = if self.duration_ms > 0 {
            (elapsed * 100 / self.duration_ms) as i32
        } else {
            0
        };
        draw_bar(
            display,
            BAR_X,
            BAR_Y,
            BAR_W,
            BAR_H,
            percent,
            GREEN,
            &mut self.prev_bar_w,
        );

        let remain = self.duration_ms - elapsed;
        let mut time: String<8> = String::new();
        let _ = write!(time, "{:02}:{:02}", remain / 60_000, (remain / 1000) % 60);
        let time_color = if self.state == PomodoroState::Paused {
            LIGHT
        } else {
            WHITE
        };
        if time != self.prev_time || time_color != self.prev_time_color {
            text_centered(display, &time, TIMER_Y, big_style(time_color));
            self.prev_time = time;
            self.prev_time_color = time_color;
        }
    }
}

fn big_style(color: Rgb565) -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyleBuilder::new()
        .font(VALUE_FONT)
        .text_color(color)
        .background_color(BG)
        .build()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvents;
    use crate::testutil::{test_context, NullDisplay, TestHardware};

    fn confirm() -> InputEvents {
        InputEvents {
            rotation: 0,
            confirm: true,
            back: false,
        }
    }

    /// Drive the four config screens to reach the running timer.
    fn start_running(
        pomo: &mut PomodoroMode,
        display: &mut NullDisplay,
        fix: &mut crate::testutil::Fixture,
    ) {
        for _ in 0..4 {
            fix.input = confirm();
            pomo.run(display, &mut fix.ctx());
        }
        assert_eq!(pomo.state, PomodoroState::Running);
        assert_eq!((pomo.phase, pomo.cycle), (Phase::Work, 1));
        assert_eq!(
            pomo.duration_ms,
            fix.settings.pomo_work_min as u64 * 60_000,
            "fourth confirm commits the configured work duration"
        );
    }

    #[test]
    fn test_config_values_clamp_at_both_ends() {
        let mut hw = TestHardware::new();
        let mut fix = test_context(&mut hw);
        let mut display = NullDisplay;
        let mut pomo = PomodoroMode::new();

        fix.input = InputEvents {
            rotation: 500,
            confirm: false,
            back: false,
        };
        pomo.run(&mut display, &mut fix.ctx());
        assert_eq!(fix.settings.pomo_work_min, 90, "work minutes cap at 90");

        fix.input.rotation = -500;
        pomo.run(&mut display, &mut fix.ctx());
        assert_eq!(fix.settings.pomo_work_min, 1, "work minutes floor at 1");
    }

    #[test]
    fn test_default_config_commits_25_minute_work_phase() {
        let mut hw = TestHardware::new();
        let mut fix = test_context(&mut hw);
        let mut display = NullDisplay;
        let mut pomo = PomodoroMode::new();

        start_running(&mut pomo, &mut display, &mut fix);
        assert_eq!(pomo.duration_ms, 25 * 60_000);
    }

    #[test]
    fn test_phase_sequence_across_cycles() {
        let mut hw = TestHardware::new();
        let mut fix = test_context(&mut hw);
        fix.settings.pomo_cycles = 2;
        fix.settings.pomo_work_min = 1;
        fix.settings.pomo_short_min = 1;
        fix.settings.pomo_long_min = 1;
        let mut display = NullDisplay;
        let mut pomo = PomodoroMode::new();
        start_running(&mut pomo, &mut display, &mut fix);

        let mut expect = |fix: &mut crate::testutil::Fixture, phase, cycle| {
            fix.now_ms += 60_001;
            fix.input = InputEvents::none();
            pomo.run(&mut display, &mut fix.ctx());
            assert_eq!((pomo.phase, pomo.cycle), (phase, cycle));
        };
        expect(&mut fix, Phase::Short, 1); // work 1 done, not the last cycle
        expect(&mut fix, Phase::Work, 2); // short break done, next cycle
        expect(&mut fix, Phase::Long, 2); // work on the final cycle earns long
        expect(&mut fix, Phase::Work, 1); // long break wraps back to the start
    }

    #[test]
    fn test_pause_freezes_remaining_time() {
        let mut hw = TestHardware::new();
        let mut fix = test_context(&mut hw);
        fix.settings.pomo_work_min = 1; // 60_000 ms
        let mut display = NullDisplay;
        let mut pomo = PomodoroMode::new();
        start_running(&mut pomo, &mut display, &mut fix);
        let start = pomo.start_ms;

        fix.now_ms += 10_000;
        fix.input = confirm();
        pomo.run(&mut display, &mut fix.ctx());
        assert_eq!(pomo.state, PomodoroState::Paused);

        // A long pause must not consume timer time.
        fix.now_ms += 40_000;
        fix.input = confirm();
        pomo.run(&mut display, &mut fix.ctx());
        assert_eq!(pomo.state, PomodoroState::Running);
        assert_eq!(
            fix.now_ms - pomo.start_ms,
            10_000,
            "elapsed right after resume equals elapsed at pause"
        );
        assert_eq!(pomo.start_ms, start + 40_000);
    }

    #[test]
    fn test_phase_completion_chimes_and_pulses_led() {
        let mut hw = TestHardware::new();
        {
            let mut fix = test_context(&mut hw);
            fix.settings.pomo_work_min = 1;
            let mut display = NullDisplay;
            let mut pomo = PomodoroMode::new();
            start_running(&mut pomo, &mut display, &mut fix);

            fix.now_ms += 60_001;
            fix.input = InputEvents::none();
            pomo.run(&mut display, &mut fix.ctx());
        }
        assert_eq!(hw.buzzer.tones, vec![(2000, 1500)]);
        assert_eq!(
            hw.led.history.last(),
            Some(&0),
            "LED ends off after the completion pulse"
        );
        assert!(hw.led.history.contains(&100));
    }

    #[test]
    fn test_back_saves_settings() {
        let mut hw = TestHardware::new();
        {
            let mut fix = test_context(&mut hw);
            fix.settings.pomo_work_min = 42;
            fix.input = InputEvents {
                rotation: 0,
                confirm: false,
                back: true,
            };
            let mut display = NullDisplay;
            let mut pomo = PomodoroMode::new();
            let next = pomo.run(&mut display, &mut fix.ctx());
            assert!(next.is_some());
        }
        assert_eq!(hw.store.saved.map(|s| s.pomo_work_min), Some(42));
    }
}
