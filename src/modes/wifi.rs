//! WiFi screens: status menu, provisioning portal, credential reset.
//!
//! The portal runs non-blocking: [`WifiSetupMode`] starts it on entry and
//! pumps it once per dispatch cycle. While it is open the appliance is
//! joinable as an access point, so alerts are suppressed for this mode by
//! the alert coordinator.

use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::colors::{ACCENT, BG, DARK, GREEN, RED, WHITE};
use crate::config::SCREEN_WIDTH;
use crate::hal::ProvisioningStatus;
use crate::modes::{Context, Mode, SettingsMenuMode};
use crate::styles::{BODY_FONT, BODY_STYLE_WHITE, HEADER_STYLE};
use crate::widgets::{
    clear_screen, draw_header, fill_round_rect, stroke_round_rect, text, text_centered,
    text_centered_between,
};

/// Access-point name the portal advertises.
pub const SETUP_AP_SSID: &str = "CyberClockSetup";
/// How long the success screen lingers before handing back to settings.
const SUCCESS_LINGER_MS: u64 = 1500;

fn body_style(color: Rgb565) -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyleBuilder::new()
        .font(BODY_FONT)
        .text_color(color)
        .build()
}

// =============================================================================
// WiFi menu
// =============================================================================

pub struct WifiMenuMode {
    index: usize,
}

impl WifiMenuMode {
    pub const fn new() -> Self {
        Self { index: 0 }
    }

    pub fn enter<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, ctx: &mut Context) {
        draw_header(display, "Current Network", ctx.settings.alarm_enabled);
        match ctx.hw.provisioner.ssid() {
            Some(ssid) => text_centered(display, ssid, 80, body_style(GREEN)),
            None => text_centered(display, "Not Connected", 80, body_style(RED)),
        }
        self.draw_buttons(display);
    }

    pub fn run<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        ctx: &mut Context,
    ) -> Option<Mode> {
        if ctx.input.rotation != 0 {
            self.index = (self.index as i32 + ctx.input.rotation).rem_euclid(2) as usize;
            self.draw_buttons(display);
        }
        if ctx.input.confirm {
            return Some(if self.index == 0 {
                Mode::WifiSetup(WifiSetupMode::new())
            } else {
                Mode::WifiResetConfirm(WifiResetConfirmMode::new())
            });
        }
        if ctx.input.back {
            return Some(Mode::Settings(SettingsMenuMode::with_selected(3)));
        }
        None
    }

    fn draw_buttons<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) {
        for (i, label) in ["Setup", "Reset"].iter().enumerate() {
            let y = 140 + i as i32 * 45;
            let accent = if i == 1 { RED } else { ACCENT };
            let selected = i == self.index;
            fill_round_rect(display, 40, y, 240, 35, 6, if selected { accent } else { BG });
            if !selected {
                stroke_round_rect(display, 40, y, 240, 35, 6, DARK);
            }
            let style = MonoTextStyleBuilder::new()
                .font(BODY_FONT)
                .text_color(if selected { BG } else { WHITE })
                .build();
            text_centered_between(display, label, 40, 280, y + 23, style);
        }
    }
}

// =============================================================================
// Provisioning portal
// =============================================================================

pub struct WifiSetupMode {
    connected_at_ms: Option<u64>,
}

impl WifiSetupMode {
    pub const fn new() -> Self {
        Self {
            connected_at_ms: None,
        }
    }

    pub fn enter<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, ctx: &mut Context) {
        self.connected_at_ms = None;
        clear_screen(display, BG, ctx.settings.alarm_enabled);
        text_centered(display, "WiFi Setup", 40, HEADER_STYLE);
        text(display, "1. Connect to:", 20, 85, BODY_STYLE_WHITE);
        text(display, SETUP_AP_SSID, 56, 110, body_style(GREEN));
        text(display, "2. Go to IP:", 20, 145, BODY_STYLE_WHITE);
        text(display, "192.168.4.1", 56, 170, body_style(GREEN));
        ctx.hw.provisioner.start_portal(SETUP_AP_SSID);
    }

    pub fn run<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        ctx: &mut Context,
    ) -> Option<Mode> {
        ctx.hw.provisioner.step();

        if ctx.input.back {
            ctx.hw.provisioner.stop_portal();
            return Some(Mode::WifiMenu(WifiMenuMode::new()));
        }

        match self.connected_at_ms {
            None => {
                if ctx.hw.provisioner.status() == ProvisioningStatus::Connected {
                    self.connected_at_ms = Some(ctx.now_ms);
                    clear_screen(display, BG, ctx.settings.alarm_enabled);
                    text_centered(display, "Success!", 110, body_style(GREEN));
                    text_centered(display, "WiFi Connected", 150, BODY_STYLE_WHITE);
                    ctx.hw.provisioner.stop_portal();
                }
            }
            Some(at) => {
                if ctx.now_ms.saturating_sub(at) >= SUCCESS_LINGER_MS {
                    return Some(Mode::Settings(SettingsMenuMode::with_selected(3)));
                }
            }
        }
        None
    }
}

// =============================================================================
// Credential reset confirmation
// =============================================================================

pub struct WifiResetConfirmMode {
    /// 0 = YES, 1 = NO. NO is preselected.
    index: usize,
}

impl WifiResetConfirmMode {
    pub const fn new() -> Self {
        Self { index: 1 }
    }

    pub fn enter<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D, ctx: &mut Context) {
        self.index = 1;
        clear_screen(display, BG, ctx.settings.alarm_enabled);
        text_centered(display, "WARNING!", 60, body_style(RED));
        text_centered(display, "Reset WiFi Settings?", 100, BODY_STYLE_WHITE);
        self.draw_buttons(display);
    }

    pub fn run<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
        ctx: &mut Context,
    ) -> Option<Mode> {
        if ctx.input.rotation != 0 {
            self.index = (self.index as i32 + ctx.input.rotation).rem_euclid(2) as usize;
            self.draw_buttons(display);
        }
        if ctx.input.confirm {
            if self.index == 0 {
                clear_screen(display, BG, ctx.settings.alarm_enabled);
                text(display, "Resetting...", 20, 120, body_style(RED));
                ctx.hw
                    .buzzer
                    .tone(1000, 1000, ctx.settings.speaker_vol as u8);
                ctx.hw.provisioner.reset_credentials();
            }
            return Some(Mode::WifiMenu(WifiMenuMode::new()));
        }
        if ctx.input.back {
            return Some(Mode::WifiMenu(WifiMenuMode::new()));
        }
        None
    }

    fn draw_buttons<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) {
        let (btn_w, btn_h, gap) = (100, 40, 20);
        let start_x = (SCREEN_WIDTH as i32 - (btn_w * 2 + gap)) / 2;
        let y = 140;
        for (i, label) in ["YES", "NO"].iter().enumerate() {
            let x = start_x + i as i32 * (btn_w + gap);
            let color = if i == 0 { RED } else { GREEN };
            let selected = i == self.index;
            fill_round_rect(
                display,
                x,
                y,
                btn_w as u32,
                btn_h as u32,
                6,
                if selected { color } else { BG },
            );
            if !selected {
                stroke_round_rect(display, x, y, btn_w as u32, btn_h as u32, 6, color);
            }
            let style = MonoTextStyleBuilder::new()
                .font(BODY_FONT)
                .text_color(if selected { BG } else { color })
                .build();
            text_centered_between(display, label, x, x + btn_w, y + 27, style);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
