//! Settings list screen.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::modes::{Context, ListState, MenuMode, Mode, SettingId, SettingsEditMode, WifiMenuMode};
use crate::widgets::{draw_header, draw_list};

const SETTINGS_ROWS: [&str; 4] = ["LED Brightness", "Speaker Volume", "Graph Range", "WiFi"];

pub struct SettingsMenuMode {
    list: ListState,
}

impl SettingsMenuMode {
    pub const fn new() -> Self {
        Self {
            list: ListState::new(),
        }
    }

    /// Re-enter with the cursor on the row that was just edited.
    pub const fn with_selected(index: usize) -> Self {
        Self {
            list: ListState { index, last: None },
        }
    }

    pub fn enter<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, ctx: &mut Context) {
        draw_header(display, "SETTINGS", ctx.settings.alarm_enabled);
        draw_list(display, &SETTINGS_ROWS, self.list.index, None, true);
    }

    pub fn run<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        ctx: &mut Context,
    ) -> Option<Mode> {
        if self.list.rotate(ctx.input.rotation, SETTINGS_ROWS.len()) {
            draw_list(display, &SETTINGS_ROWS, self.list.index, self.list.last, false);
        }
        if ctx.input.confirm {
            return Some(match self.list.index {
                0 => Mode::SettingsEdit(SettingsEditMode::new(SettingId::LedBrightness)),
                1 => Mode::SettingsEdit(SettingsEditMode::new(SettingId::SpeakerVolume)),
                2 => Mode::SettingsEdit(SettingsEditMode::new(SettingId::GraphRange)),
                _ => Mode::WifiMenu(WifiMenuMode::new()),
            });
        }
        if ctx.input.back {
            ctx.hw.store.save(ctx.settings);
            return Some(Mode::Menu(MenuMode::new()));
        }
        None
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvents;
    use crate::modes::ModeKind;
    use crate::testutil::{test_context, NullDisplay, TestHardware};

    #[test]
    fn test_rows_map_to_editors_and_wifi() {
        let mut hw = TestHardware::new();
        let mut fix = test_context(&mut hw);
        let mut display = NullDisplay;

        for (rotation, expected) in [
            (0, ModeKind::SettingsEdit),
            (1, ModeKind::SettingsEdit),
            (2, ModeKind::SettingsEdit),
            (3, ModeKind::WifiMenu),
        ] {
            let mut menu = SettingsMenuMode::new();
            fix.input = InputEvents {
                rotation,
                confirm: true,
                back: false,
            };
            let next = menu.run(&mut display, &mut fix.ctx());
            assert_eq!(next.map(|m| m.kind()), Some(expected), "row {rotation}");
        }
    }

    #[test]
    fn test_back_persists_settings() {
        let mut hw = TestHardware::new();
        {
            let mut fix = test_context(&mut hw);
            fix.settings.led_brightness = 35;
            fix.input = InputEvents {
                rotation: 0,
                confirm: false,
                back: true,
            };
            let mut display = NullDisplay;
            let mut menu = SettingsMenuMode::new();
            let next = menu.run(&mut display, &mut fix.ctx());
            assert_eq!(next.map(|m| m.kind()), Some(ModeKind::Menu));
        }
        assert_eq!(hw.store.saved.map(|s| s.led_brightness), Some(35));
    }
}
