//! Single-value editor for brightness, volume, and graph range.
//!
//! Brightness edits preview live on the LED; volume edits play a short
//! confirmation chirp at the new level. Leaving the editor (confirm or
//! back) turns the preview off and returns to the settings list with the
//! edited row still selected.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::String;

use crate::colors::GREEN;
use crate::config::SCREEN_WIDTH;
use crate::modes::{Context, Mode, SettingsMenuMode};
use crate::styles::VALUE_STYLE_WHITE;
use crate::widgets::{draw_bar, draw_header, text_centered};

const VALUE_Y: i32 = 110;
const BAR_W: u32 = 260;
const BAR_H: u32 = 15;
const BAR_X: i32 = (SCREEN_WIDTH as i32 - BAR_W as i32) / 2;
const BAR_Y: i32 = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingId {
    LedBrightness,
    SpeakerVolume,
    GraphRange,
}

impl SettingId {
    const fn title(self) -> &'static str {
        match self {
            SettingId::LedBrightness => "LED Brightness",
            SettingId::SpeakerVolume => "Speaker Volume",
            SettingId::GraphRange => "Graph Range",
        }
    }

    /// Index of the matching row on the settings list.
    const fn row(self) -> usize {
        match self {
            SettingId::LedBrightness => 0,
            SettingId::SpeakerVolume => 1,
            SettingId::GraphRange => 2,
        }
    }
}

pub struct SettingsEditMode {
    id: SettingId,
    prev_bar_w: i32,
}

impl SettingsEditMode {
    pub const fn new(id: SettingId) -> Self {
        Self { id, prev_bar_w: -1 }
    }

    pub fn enter<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, ctx: &mut Context) {
        draw_header(display, self.id.title(), ctx.settings.alarm_enabled);
        self.prev_bar_w = -1;
        if self.id == SettingId::LedBrightness {
            // Live preview while the editor is open.
            ctx.hw
                .led
                .set_brightness(ctx.settings.led_brightness as u8);
        }
        self.draw_value(display, ctx);
    }

    pub fn run<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        ctx: &mut Context,
    ) -> Option<Mode> {
        if ctx.input.rotation != 0 {
            let changed = match self.id {
                SettingId::LedBrightness => {
                    let old = ctx.settings.led_brightness;
                    ctx.settings.adjust_brightness(ctx.input.rotation);
                    if ctx.settings.led_brightness != old {
                        ctx.hw
                            .led
                            .set_brightness(ctx.settings.led_brightness as u8);
                        true
                    } else {
                        false
                    }
                }
                SettingId::SpeakerVolume => {
                    let old = ctx.settings.speaker_vol;
                    ctx.settings.adjust_volume(ctx.input.rotation);
                    if ctx.settings.speaker_vol != old {
                        ctx.hw
                            .buzzer
                            .tone(2000, 20, ctx.settings.speaker_vol as u8);
                        true
                    } else {
                        false
                    }
                }
                SettingId::GraphRange => {
                    let old = ctx.settings.graph_minutes;
                    ctx.settings.step_graph_range(ctx.input.rotation);
                    ctx.settings.graph_minutes != old
                }
            };
            if changed {
                self.draw_value(display, ctx);
            }
        }

        if ctx.input.confirm || ctx.input.back {
            ctx.hw.led.set_brightness(0);
            return Some(Mode::Settings(SettingsMenuMode::with_selected(
                self.id.row(),
            )));
        }
        None
    }

    fn draw_value<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, ctx: &mut Context) {
        let mut buf: String<8> = String::new();
        match self.id {
            SettingId::GraphRange => {
                let minutes = ctx.settings.graph_minutes;
                if minutes < 60 {
                    let _ = write!(buf, "{minutes:>3}m ");
                } else {
                    let _ = write!(buf, "{:>3}h ", minutes / 60);
                }
                text_centered(display, &buf, VALUE_Y, VALUE_STYLE_WHITE);
            }
            _ => {
                let value = match self.id {
                    SettingId::LedBrightness => ctx.settings.led_brightness,
                    _ => ctx.settings.speaker_vol,
                };
                let _ = write!(buf, "{value:>3}%");
                text_centered(display, &buf, VALUE_Y, VALUE_STYLE_WHITE);
                draw_bar(
                    display,
                    BAR_X,
                    BAR_Y,
                    BAR_W,
                    BAR_H,
                    value,
                    GREEN,
                    &mut self.prev_bar_w,
                );
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GRAPH_RANGES_MIN;
    use crate::input::InputEvents;
    use crate::modes::ModeKind;
    use crate::testutil::{test_context, NullDisplay, TestHardware};

    #[test]
    fn test_brightness_edit_previews_on_led() {
        let mut hw = TestHardware::new();
        {
            let mut fix = test_context(&mut hw);
            fix.settings.led_brightness = 50;
            let mut display = NullDisplay;
            let mut edit = SettingsEditMode::new(SettingId::LedBrightness);
            edit.enter(&mut display, &mut fix.ctx());

            fix.input = InputEvents {
                rotation: 2,
                confirm: false,
                back: false,
            };
            edit.run(&mut display, &mut fix.ctx());
            assert_eq!(fix.settings.led_brightness, 60, "two detents of five percent");

            fix.input = InputEvents {
                rotation: 0,
                confirm: false,
                back: true,
            };
            let next = edit.run(&mut display, &mut fix.ctx());
            assert_eq!(next.map(|m| m.kind()), Some(ModeKind::Settings));
        }
        assert_eq!(
            hw.led.history,
            vec![50, 60, 0],
            "preview on entry, on change, off on exit"
        );
    }

    #[test]
    fn test_volume_edit_chirps_at_new_level() {
        let mut hw = TestHardware::new();
        {
            let mut fix = test_context(&mut hw);
            fix.settings.speaker_vol = 100;
            let mut display = NullDisplay;
            let mut edit = SettingsEditMode::new(SettingId::SpeakerVolume);
            edit.enter(&mut display, &mut fix.ctx());

            fix.input = InputEvents {
                rotation: -1,
                confirm: false,
                back: false,
            };
            edit.run(&mut display, &mut fix.ctx());
            assert_eq!(fix.settings.speaker_vol, 95);
        }
        assert_eq!(hw.buzzer.tones, vec![(2000, 20)]);
        assert_eq!(hw.buzzer.volumes, vec![95], "chirp plays at the new volume");
    }

    #[test]
    fn test_graph_range_steps_without_hardware_side_effects() {
        let mut hw = TestHardware::new();
        {
            let mut fix = test_context(&mut hw);
            let mut display = NullDisplay;
            let mut edit = SettingsEditMode::new(SettingId::GraphRange);
            edit.enter(&mut display, &mut fix.ctx());

            fix.input = InputEvents {
                rotation: 3,
                confirm: false,
                back: false,
            };
            edit.run(&mut display, &mut fix.ctx());
            assert_eq!(fix.settings.graph_minutes, GRAPH_RANGES_MIN[3]);
        }
        assert!(hw.buzzer.tones.is_empty());
    }

    #[test]
    fn test_exit_returns_to_edited_row() {
        let mut hw = TestHardware::new();
        let mut fix = test_context(&mut hw);
        let mut display = NullDisplay;
        let mut edit = SettingsEditMode::new(SettingId::GraphRange);

        fix.input = InputEvents {
            rotation: 0,
            confirm: true,
            back: false,
        };
        let next = edit.run(&mut display, &mut fix.ctx());
        match next {
            Some(Mode::Settings(_)) => {}
            _ => panic!("editor must hand back to the settings list"),
        }
    }
}
