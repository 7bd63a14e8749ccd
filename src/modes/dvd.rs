//! Bouncing-logo screensaver.
//!
//! The logo advances one velocity step every 35 ms regardless of the loop
//! rate. Wall hits reflect the velocity component and clamp the position
//! back inside the screen; a simultaneous hit on both axes is a corner hit,
//! which advances the palette and chirps. The encoder scales horizontal
//! speed without flipping the travel direction.

use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::colors::{BG, DVD_PALETTE};
use crate::config::{DVD_SPEED_RANGE, DVD_STEP_MS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::modes::{Context, MenuMode, Mode};
use crate::styles::BODY_FONT;
use crate::widgets::{fill_round_rect, stroke_round_rect, text_centered_between};

const LOGO_W: i32 = 80;
const LOGO_H: i32 = 30;
const LOGO_RADIUS: u32 = 8;

pub struct DvdMode {
    x: i32,
    y: i32,
    vx: i32,
    vy: i32,
    color_index: usize,
    last_step_ms: u64,
}

impl DvdMode {
    pub const fn new() -> Self {
        Self {
            x: 80,
            y: 80,
            vx: 3,
            vy: 2,
            color_index: 0,
            last_step_ms: 0,
        }
    }

    pub fn enter<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, ctx: &mut Context) {
        display.clear(BG).ok();
        self.last_step_ms = ctx.now_ms;
        self.draw_logo(display);
    }

    pub fn run<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        ctx: &mut Context,
    ) -> Option<Mode> {
        if ctx.input.back {
            return Some(Mode::Menu(MenuMode::new()));
        }
        if ctx.input.rotation != 0 {
            self.adjust_speed(ctx.input.rotation);
        }

        if ctx.now_ms.saturating_sub(self.last_step_ms) < DVD_STEP_MS {
            return None;
        }
        self.last_step_ms = ctx.now_ms;

        // Erase at the old position before stepping.
        fill_round_rect(
            display,
            self.x,
            self.y,
            LOGO_W as u32,
            LOGO_H as u32,
            LOGO_RADIUS,
            BG,
        );
        if self.step() {
            self.color_index = (self.color_index + 1) % DVD_PALETTE.len();
            ctx.hw.buzzer.tone(1500, 80, ctx.settings.speaker_vol as u8);
        }
        self.draw_logo(display);
        None
    }

    /// Scale horizontal speed, keeping the travel direction.
    fn adjust_speed(&mut self, detents: i32) {
        let speed = (self.vx.abs() + detents).clamp(DVD_SPEED_RANGE.0, DVD_SPEED_RANGE.1);
        self.vx = if self.vx >= 0 { speed } else { -speed };
    }

    /// Advance one step, reflecting off walls. Returns true on a corner hit.
    fn step(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        let right = SCREEN_WIDTH as i32 - LOGO_W;
        let bottom = SCREEN_HEIGHT as i32 - LOGO_H;

        let mut hit_x = false;
        if self.x <= 0 {
            self.x = 0;
            self.vx = -self.vx;
            hit_x = true;
        } else if self.x >= right {
            self.x = right;
            self.vx = -self.vx;
            hit_x = true;
        }
        let mut hit_y = false;
        if self.y <= 0 {
            self.y = 0;
            self.vy = -self.vy;
            hit_y = true;
        } else if self.y >= bottom {
            self.y = bottom;
            self.vy = -self.vy;
            hit_y = true;
        }
        hit_x && hit_y
    }

    fn draw_logo<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) {
        let color = DVD_PALETTE[self.color_index];
        fill_round_rect(
            display,
            self.x,
            self.y,
            LOGO_W as u32,
            LOGO_H as u32,
            LOGO_RADIUS,
            color,
        );
        stroke_round_rect(
            display,
            self.x,
            self.y,
            LOGO_W as u32,
            LOGO_H as u32,
            LOGO_RADIUS,
            BG,
        );
        text_centered_between(
            display,
            "DVD",
            self.x,
            self.x + LOGO_W,
            self.y + LOGO_H / 2 + 5,
            MonoTextStyleBuilder::new()
                .font(BODY_FONT)
                .text_color(BG)
                .background_color(color)
                .build(),
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_hit_reflects_and_clamps() {
        let mut dvd = DvdMode::new();
        dvd.x = SCREEN_WIDTH as i32 - LOGO_W - 1;
        dvd.vx = 3;
        assert!(!dvd.step(), "single-axis hit is not a corner");
        assert_eq!(dvd.x, SCREEN_WIDTH as i32 - LOGO_W, "clamped to the wall");
        assert_eq!(dvd.vx, -3, "horizontal velocity reflected");
    }

    #[test]
    fn test_corner_hit_detected_on_both_axes() {
        let mut dvd = DvdMode::new();
        dvd.x = 1;
        dvd.y = 1;
        dvd.vx = -3;
        dvd.vy = -2;
        assert!(dvd.step());
        assert_eq!((dvd.x, dvd.y), (0, 0));
        assert_eq!((dvd.vx, dvd.vy), (3, 2));
    }

    #[test]
    fn test_speed_adjust_clamps_and_keeps_direction() {
        let mut dvd = DvdMode::new();
        dvd.vx = -3;
        dvd.adjust_speed(100);
        assert_eq!(dvd.vx, -8, "speed caps at 8, direction preserved");
        dvd.adjust_speed(-100);
        assert_eq!(dvd.vx, -1, "speed floors at 1, never zero");
    }

    #[test]
    fn test_step_gate_and_corner_chirp() {
        use crate::input::InputEvents;
        use crate::testutil::{test_context, NullDisplay, TestHardware};

        let mut hw = TestHardware::new();
        {
            let mut fix = test_context(&mut hw);
            let mut display = NullDisplay;
            let mut dvd = DvdMode::new();
            dvd.x = 3;
            dvd.y = 2;
            dvd.vx = -3;
            dvd.vy = -2;
            dvd.last_step_ms = 0;

            fix.now_ms = 10; // before the step gate opens
            fix.input = InputEvents::none();
            dvd.run(&mut display, &mut fix.ctx());
            assert_eq!(dvd.x, 3, "no movement before 35 ms elapse");

            fix.now_ms = 35;
            dvd.run(&mut display, &mut fix.ctx());
            assert_eq!((dvd.x, dvd.y), (0, 0));
            assert_eq!(dvd.color_index, 1, "corner hit advances the palette");
        }
        assert_eq!(hw.buzzer.tones, vec![(1500, 80)]);
    }
}
