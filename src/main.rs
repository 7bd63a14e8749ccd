//! Desk appliance simulator.
//!
//! Runs the firmware loop against an SDL window with fake hardware behind
//! the same trait seams the device build would use. Sensor values are
//! generated sinusoidally so every screen (including the CO2 alert path)
//! can be exercised from the desk.
//!
//! # Controls
//!
//! | Input | Key | Action |
//! |-------|-----|--------|
//! | Encoder CCW/CW | `Left` / `Right` | Rotate |
//! | Encoder press | `Enter` | Confirm |
//! | Back button | `Backspace` | Back |

use std::thread;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use cyberclock::config::{FRAME_TIME, SCREEN_HEIGHT, SCREEN_WIDTH};
use cyberclock::env::{EnvSensor, RawSample, NO_UPDATE};
use cyberclock::hal::{Buzzer, Clock, Hardware, Led, Provisioner, ProvisioningStatus, TimeOfDay};
use cyberclock::input::{InputSampler, RawInputs};
use cyberclock::settings::MemStore;
use cyberclock::App;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

fn main() {
    let mut display: SimulatorDisplay<Rgb565> =
        SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("CyberClock", &output_settings);

    let started = Instant::now();
    let mut led = SimLed::default();
    let mut buzzer = SimBuzzer;
    let mut provisioner = SimProvisioner::default();
    let mut store = MemStore::new();
    let mut sensor = SimSensor::default();
    let clock = SimClock;
    let mut hw = Hardware {
        led: &mut led,
        buzzer: &mut buzzer,
        provisioner: &mut provisioner,
        store: &mut store,
        sensor: &mut sensor,
        clock: &clock,
    };

    let mut app = App::new(&mut hw);
    let mut sampler = InputSampler::default();
    let mut confirm_held = false;
    let mut back_held = false;

    loop {
        let frame_start = Instant::now();
        let now_ms = started.elapsed().as_millis() as u64;

        // Rotation comes straight from key presses; the buttons go through
        // the same level-sampling debounce path the device uses.
        let mut rotation = 0i32;
        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => return,
                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Left => rotation -= 1,
                    Keycode::Right => rotation += 1,
                    Keycode::Return => confirm_held = true,
                    Keycode::Backspace => back_held = true,
                    _ => {}
                },
                SimulatorEvent::KeyUp { keycode, .. } => match keycode {
                    Keycode::Return => confirm_held = false,
                    Keycode::Backspace => back_held = false,
                    _ => {}
                },
                _ => {}
            }
        }
        let mut input = sampler.update(
            RawInputs {
                enc_a: true,
                enc_b: true,
                confirm_low: confirm_held,
                back_low: back_held,
            },
            now_ms,
        );
        input.rotation += rotation;

        app.tick(&mut display, input, now_ms, &mut hw);
        window.update(&display);

        let spent = frame_start.elapsed();
        if spent < FRAME_TIME {
            thread::sleep(FRAME_TIME - spent);
        }
    }
}

// =============================================================================
// Fake Hardware
// =============================================================================

#[derive(Default)]
struct SimLed {
    last: u8,
}

impl Led for SimLed {
    fn set_brightness(&mut self, percent: u8) {
        if percent != self.last {
            self.last = percent;
            println!("[led] {percent}%");
        }
    }
}

struct SimBuzzer;

impl Buzzer for SimBuzzer {
    fn tone(&mut self, freq_hz: u16, duration_ms: u32, volume: u8) {
        println!("[buzzer] {freq_hz} Hz for {duration_ms} ms at {volume}%");
    }

    fn stop(&mut self) {
        println!("[buzzer] stop");
    }
}

/// Fake portal that "connects" a few seconds after it opens.
#[derive(Default)]
struct SimProvisioner {
    portal_opened: Option<Instant>,
    ssid: Option<String>,
}

impl Provisioner for SimProvisioner {
    fn start_portal(&mut self, ap_ssid: &str) {
        println!("[wifi] portal open as {ap_ssid}");
        self.portal_opened = Some(Instant::now());
    }

    fn step(&mut self) {
        if let Some(opened) = self.portal_opened
            && opened.elapsed().as_secs() >= 6
        {
            self.ssid = Some("HomeNetwork".to_owned());
        }
    }

    fn status(&self) -> ProvisioningStatus {
        if self.ssid.is_some() {
            ProvisioningStatus::Connected
        } else if self.portal_opened.is_some() {
            ProvisioningStatus::Pending
        } else {
            ProvisioningStatus::Idle
        }
    }

    fn ssid(&self) -> Option<&str> {
        self.ssid.as_deref()
    }

    fn stop_portal(&mut self) {
        self.portal_opened = None;
    }

    fn reset_credentials(&mut self) {
        println!("[wifi] credentials wiped");
        self.ssid = None;
    }
}

/// UTC wall clock derived from system time.
struct SimClock;

impl Clock for SimClock {
    fn now(&self) -> Option<TimeOfDay> {
        let secs = SystemTime::now().duration_since(UNIX_EPOCH).ok()?.as_secs();
        let day_secs = secs % 86_400;
        Some(TimeOfDay {
            hour: (day_secs / 3600) as u8,
            minute: (day_secs / 60 % 60) as u8,
            second: (day_secs % 60) as u8,
            day: (secs / 86_400 % 28) as u8 + 1,
        })
    }
}

/// Sinusoidal sensor pair. eCO2 sweeps above the alert threshold so the
/// air-quality alert path can be watched live; every 20th air-quality read
/// reports the no-update sentinel like the real sensor does.
#[derive(Default)]
struct SimSensor {
    t: f32,
    reads: u32,
}

impl EnvSensor for SimSensor {
    fn read(&mut self) -> RawSample {
        self.t += 0.05;
        self.reads += 1;
        let (tvoc, eco2) = if self.reads.is_multiple_of(20) {
            (NO_UPDATE, NO_UPDATE)
        } else {
            (
                fake_signal(self.t, 50.0, 400.0, 0.07) as u16,
                fake_signal(self.t, 450.0, 2200.0, 0.03) as u16,
            )
        };
        RawSample {
            temp_hum: Some((
                fake_signal(self.t, 19.0, 28.0, 0.05),
                fake_signal(self.t, 35.0, 60.0, 0.08),
            )),
            tvoc,
            eco2,
        }
    }
}

/// Sinusoid between `min` and `max`, advancing with `t`.
fn fake_signal(t: f32, min: f32, max: f32, freq: f32) -> f32 {
    let normalized = (t * freq).sin().mul_add(0.5, 0.5);
    min + normalized * (max - min)
}
