//! Home screen: wall-clock time, environment readouts, history graph.
//!
//! Redraw discipline: the big time string repaints only when the second
//! changes (the value style carries a background color, so the new text
//! overwrites in place). The four readout cells repaint on every fifth
//! second, alongside a forced sensor read. The graph repaints only when
//! the monitor actually appended a history slot.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use heapless::String;

use crate::colors::{BG, CO2_SERIES, GRID, HUM_SERIES, TEMP_SERIES, TVOC_SERIES, WHITE};
use crate::config::{
    GRID_BOT, GRID_LEFT, GRID_MID, GRID_MID_X, GRID_RIGHT, GRID_TOP, LABEL_BOT_Y, LABEL_TOP_Y,
    VALUE_BOT_Y, VALUE_TOP_Y,
};
use crate::env::EnvMonitor;
use crate::modes::{Context, MenuMode, Mode};
use crate::styles::{BODY_FONT, LABEL_FONT, VALUE_STYLE_WHITE};
use crate::widgets::{clear_screen, text_centered, text_centered_between};

/// Baseline for the big time string.
const TIME_Y: i32 = 42;

/// Readout text overwrites in place, so it needs an opaque background.
const CELL_STYLE: embedded_graphics::mono_font::MonoTextStyle<'static, Rgb565> =
    MonoTextStyleBuilder::new()
        .font(BODY_FONT)
        .text_color(WHITE)
        .background_color(BG)
        .build();

pub struct ClockMode {
    prev_second: Option<u8>,
    placeholder_shown: bool,
}

impl ClockMode {
    pub const fn new() -> Self {
        Self {
            prev_second: None,
            placeholder_shown: false,
        }
    }

    pub fn enter<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, ctx: &mut Context) {
        self.prev_second = None;
        self.placeholder_shown = false;
        clear_screen(display, BG, ctx.settings.alarm_enabled);
        draw_grid_chrome(display);
        ctx.env
            .sample(true, ctx.now_ms, ctx.hw.sensor, ctx.settings.graph_minutes);
        draw_readouts(display, ctx.env);
        crate::widgets::draw_history_graph(display, ctx.env.history());
    }

    pub fn run<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        ctx: &mut Context,
    ) -> Option<Mode> {
        let mut force_read = false;
        match ctx.hw.clock.now() {
            Some(t) => {
                if self.prev_second != Some(t.second) {
                    self.prev_second = Some(t.second);
                    self.placeholder_shown = false;
                    let mut time: String<12> = String::new();
                    let _ = write!(time, "{:02}:{:02}:{:02}", t.hour, t.minute, t.second);
                    text_centered(display, &time, TIME_Y, VALUE_STYLE_WHITE);
                    force_read = t.second % 5 == 0;
                }
            }
            None => {
                if !self.placeholder_shown {
                    self.placeholder_shown = true;
                    text_centered(display, "--:--:--", TIME_Y, VALUE_STYLE_WHITE);
                }
            }
        }

        let appended = ctx.env.sample(
            force_read,
            ctx.now_ms,
            ctx.hw.sensor,
            ctx.settings.graph_minutes,
        );
        if force_read {
            draw_readouts(display, ctx.env);
        }
        if appended {
            crate::widgets::draw_history_graph(display, ctx.env.history());
        }

        if ctx.input.confirm || ctx.input.back {
            return Some(Mode::Menu(MenuMode::new()));
        }
        None
    }
}

/// Static separators and labels for the 2x2 readout grid. Drawn once on
/// entry; never repainted.
fn draw_grid_chrome<D: DrawTarget<Color = Rgb565>>(display: &mut D) {
    let style = PrimitiveStyle::with_stroke(GRID, 1);
    for y in [GRID_TOP, GRID_MID, GRID_BOT] {
        Line::new(Point::new(GRID_LEFT, y), Point::new(GRID_RIGHT, y))
            .into_styled(style)
            .draw(display)
            .ok();
    }
    Line::new(
        Point::new(GRID_MID_X, GRID_TOP),
        Point::new(GRID_MID_X, GRID_BOT),
    )
    .into_styled(style)
    .draw(display)
    .ok();

    let label = |d: &mut D, s, color, x0, x1, y| {
        text_centered_between(d, s, x0, x1, y, MonoTextStyleBuilder::new()
            .font(LABEL_FONT)
            .text_color(color)
            .build());
    };
    label(display, "TEMP", TEMP_SERIES, GRID_LEFT, GRID_MID_X, LABEL_TOP_Y);
    label(display, "HUMI", HUM_SERIES, GRID_MID_X, GRID_RIGHT, LABEL_TOP_Y);
    label(display, "TVOC", TVOC_SERIES, GRID_LEFT, GRID_MID_X, LABEL_BOT_Y);
    label(display, "CO2", CO2_SERIES, GRID_MID_X, GRID_RIGHT, LABEL_BOT_Y);
}

fn draw_readouts<D: DrawTarget<Color = Rgb565>>(display: &mut D, env: &EnvMonitor) {
    let mut cell: String<16> = String::new();
    let _ = write!(cell, "{:5.1} C ", env.temp);
    text_centered_between(display, &cell, GRID_LEFT, GRID_MID_X, VALUE_TOP_Y, CELL_STYLE);

    cell.clear();
    let _ = write!(cell, "{:3.0} % ", env.hum);
    text_centered_between(display, &cell, GRID_MID_X, GRID_RIGHT, VALUE_TOP_Y, CELL_STYLE);

    cell.clear();
    let _ = write!(cell, "{:4} ppb ", env.tvoc);
    text_centered_between(display, &cell, GRID_LEFT, GRID_MID_X, VALUE_BOT_Y, CELL_STYLE);

    cell.clear();
    let _ = write!(cell, "{:4} ppm ", env.eco2);
    text_centered_between(display, &cell, GRID_MID_X, GRID_RIGHT, VALUE_BOT_Y, CELL_STYLE);
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::TimeOfDay;
    use crate::input::InputEvents;
    use crate::modes::ModeKind;
    use crate::testutil::{test_context, NullDisplay, TestHardware};

    #[test]
    fn test_forced_read_only_on_fifth_seconds() {
        let mut hw = TestHardware::new();
        hw.clock.now.set(Some(TimeOfDay {
            hour: 12,
            minute: 0,
            second: 7,
            day: 1,
        }));
        {
            let mut fix = test_context(&mut hw);
            let mut display = NullDisplay;
            let mut clock = ClockMode::new();
            // First-ever read primes the monitor; after that only a forced
            // sample may reach the sensor within the cadence window.
            {
                let mut ctx = fix.ctx();
                ctx.env.sample(false, 0, &mut *ctx.hw.sensor, 5);
            }
            // Same second twice: only the first cycle repaints, neither forces.
            clock.run(&mut display, &mut fix.ctx());
            clock.run(&mut display, &mut fix.ctx());
        }
        assert_eq!(hw.sensor.reads, 1, "second 7 must not force a sensor read");

        hw.clock.now.set(Some(TimeOfDay {
            hour: 12,
            minute: 0,
            second: 10,
            day: 1,
        }));
        {
            let mut fix = test_context(&mut hw);
            let mut display = NullDisplay;
            let mut clock = ClockMode::new();
            clock.run(&mut display, &mut fix.ctx());
        }
        assert_eq!(hw.sensor.reads, 2, "second 10 forces a read");
    }

    #[test]
    fn test_placeholder_drawn_once_when_unsynced() {
        let mut hw = TestHardware::new();
        hw.clock.now.set(None);
        let mut fix = test_context(&mut hw);
        let mut display = NullDisplay;
        let mut clock = ClockMode::new();

        clock.run(&mut display, &mut fix.ctx());
        assert!(clock.placeholder_shown);
        assert_eq!(clock.prev_second, None);
    }

    #[test]
    fn test_any_button_opens_menu() {
        let mut hw = TestHardware::new();
        let mut fix = test_context(&mut hw);
        let mut display = NullDisplay;
        let mut clock = ClockMode::new();

        fix.input = InputEvents {
            rotation: 0,
            confirm: true,
            back: false,
        };
        let next = clock.run(&mut display, &mut fix.ctx());
        assert_eq!(next.map(|m| m.kind()), Some(ModeKind::Menu));
    }
}
