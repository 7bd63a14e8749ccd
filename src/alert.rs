//! Alert coordinator: maps alarm and air-quality conditions onto the LED
//! and buzzer, once per dispatch cycle after the active mode has run.
//!
//! Priority: a ringing alarm outranks bad air, which outranks nothing.
//! The whole coordinator stands down while the provisioning portal is open,
//! and it leaves the LED alone in the settings screens so the brightness
//! preview is not fought over.

use crate::config::{ALERT_CHIRP_CO2_MS, ALERT_LED_ALARM_MS, ALERT_LED_CO2_MS, CO2_ALERT_PPM};
use crate::hal::{Buzzer, Led};
use crate::modes::ModeKind;
use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    None,
    AirQuality,
    Alarm,
}

/// Classify the current conditions.
pub fn current_level(alarm_ringing: bool, eco2: u16) -> AlertLevel {
    if alarm_ringing {
        AlertLevel::Alarm
    } else if eco2 > CO2_ALERT_PPM {
        AlertLevel::AirQuality
    } else {
        AlertLevel::None
    }
}

#[derive(Debug, Default)]
pub struct AlertCoordinator {
    led_on: bool,
    last_led_toggle_ms: u64,
    last_chirp_ms: u64,
}

impl AlertCoordinator {
    pub const fn new() -> Self {
        Self {
            led_on: false,
            last_led_toggle_ms: 0,
            last_chirp_ms: 0,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        now_ms: u64,
        mode: ModeKind,
        alarm_ringing: bool,
        eco2: u16,
        settings: &Settings,
        led: &mut dyn Led,
        buzzer: &mut dyn Buzzer,
    ) {
        if mode == ModeKind::WifiSetup {
            return;
        }
        let level = current_level(alarm_ringing, eco2);

        match level {
            AlertLevel::None => {
                // The settings screens own the LED for the brightness preview.
                if self.led_on && mode != ModeKind::Settings && mode != ModeKind::SettingsEdit {
                    led.set_brightness(0);
                }
                self.led_on = false;
            }
            AlertLevel::Alarm | AlertLevel::AirQuality => {
                let interval = if level == AlertLevel::Alarm {
                    ALERT_LED_ALARM_MS
                } else {
                    ALERT_LED_CO2_MS
                };
                if now_ms.saturating_sub(self.last_led_toggle_ms) > interval {
                    self.last_led_toggle_ms = now_ms;
                    self.led_on = !self.led_on;
                    led.set_brightness(if self.led_on {
                        settings.led_brightness as u8
                    } else {
                        0
                    });
                }
            }
        }

        if level == AlertLevel::AirQuality
            && now_ms.saturating_sub(self.last_chirp_ms) > ALERT_CHIRP_CO2_MS
        {
            self.last_chirp_ms = now_ms;
            buzzer.tone(1800, 80, settings.speaker_vol as u8);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
