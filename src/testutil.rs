//! Test doubles for the display and the hardware collaborators.
//!
//! Tests run on the host with std available, so the stubs record their
//! call history in plain vectors for later assertion. The usual pattern is
//! to scope the [`Fixture`] in a block, then inspect the [`TestHardware`]
//! after it drops.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::env::{EnvMonitor, EnvSensor, RawSample};
use crate::hal::{Buzzer, Clock, Hardware, Led, Provisioner, ProvisioningStatus, TimeOfDay};
use crate::input::InputEvents;
use crate::modes::{AlarmStatus, Context};
use crate::settings::{MemStore, Settings};

// =============================================================================
// Display
// =============================================================================

/// Full-size draw target that discards every pixel.
pub struct NullDisplay;

impl OriginDimensions for NullDisplay {
    fn size(&self) -> Size {
        Size::new(320, 240)
    }
}

impl DrawTarget for NullDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        pixels.into_iter().for_each(drop);
        Ok(())
    }
}

// =============================================================================
// Hardware stubs
// =============================================================================

#[derive(Default)]
pub struct StubLed {
    /// Every brightness write, in order.
    pub history: Vec<u8>,
}

impl Led for StubLed {
    fn set_brightness(&mut self, percent: u8) {
        self.history.push(percent);
    }
}

#[derive(Default)]
pub struct StubBuzzer {
    /// Every tone as (frequency, duration).
    pub tones: Vec<(u16, u32)>,
    /// The volume each tone was played at.
    pub volumes: Vec<u8>,
    pub stopped: bool,
}

impl Buzzer for StubBuzzer {
    fn tone(&mut self, freq_hz: u16, duration_ms: u32, volume: u8) {
        self.tones.push((freq_hz, duration_ms));
        self.volumes.push(volume);
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

#[derive(Default)]
pub struct StubProvisioner {
    pub portal_ssid: Option<String>,
    pub steps: u32,
    pub stopped: bool,
    pub reset: bool,
    /// When set, `status()` reports connected after this many `step` calls.
    pub connect_after_steps: Option<u32>,
    pub connected_ssid: Option<String>,
}

impl Provisioner for StubProvisioner {
    fn start_portal(&mut self, ap_ssid: &str) {
        self.portal_ssid = Some(ap_ssid.to_owned());
        self.stopped = false;
    }

    fn step(&mut self) {
        self.steps += 1;
    }

    fn status(&self) -> ProvisioningStatus {
        match self.connect_after_steps {
            Some(n) if self.steps >= n => ProvisioningStatus::Connected,
            _ if self.portal_ssid.is_some() && !self.stopped => ProvisioningStatus::Pending,
            _ => ProvisioningStatus::Idle,
        }
    }

    fn ssid(&self) -> Option<&str> {
        self.connected_ssid.as_deref()
    }

    fn stop_portal(&mut self) {
        self.stopped = true;
    }

    fn reset_credentials(&mut self) {
        self.reset = true;
        self.connected_ssid = None;
    }
}

/// Settable wall clock. `Cell` because [`Hardware`] holds the clock behind
/// a shared reference.
pub struct StubClock {
    pub now: Cell<Option<TimeOfDay>>,
}

impl Default for StubClock {
    fn default() -> Self {
        Self {
            now: Cell::new(Some(TimeOfDay {
                hour: 12,
                minute: 34,
                second: 56,
                day: 1,
            })),
        }
    }
}

impl Clock for StubClock {
    fn now(&self) -> Option<TimeOfDay> {
        self.now.get()
    }
}

pub struct StubSensor {
    pub reads: u32,
    pub sample: RawSample,
}

impl Default for StubSensor {
    fn default() -> Self {
        Self {
            reads: 0,
            sample: RawSample {
                temp_hum: Some((22.5, 45.0)),
                tvoc: 120,
                eco2: 600,
            },
        }
    }
}

impl EnvSensor for StubSensor {
    fn read(&mut self) -> RawSample {
        self.reads += 1;
        self.sample
    }
}

// =============================================================================
// Bundles
// =============================================================================

#[derive(Default)]
pub struct TestHardware {
    pub led: StubLed,
    pub buzzer: StubBuzzer,
    pub provisioner: StubProvisioner,
    pub store: MemStore,
    pub sensor: StubSensor,
    pub clock: StubClock,
}

impl TestHardware {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Borrow a [`TestHardware`] as the trait-object bundle the modes take.
pub fn hardware(hw: &mut TestHardware) -> Hardware<'_> {
    Hardware {
        led: &mut hw.led,
        buzzer: &mut hw.buzzer,
        provisioner: &mut hw.provisioner,
        store: &mut hw.store,
        sensor: &mut hw.sensor,
        clock: &hw.clock,
    }
}

/// Everything a [`Context`] borrows, owned in one place so a test can build
/// a fresh context per cycle with `fix.ctx()`.
pub struct Fixture<'h> {
    pub settings: Settings,
    pub env: EnvMonitor,
    pub alarm: AlarmStatus,
    pub now_ms: u64,
    pub input: InputEvents,
    hw: Hardware<'h>,
}

impl<'h> Fixture<'h> {
    pub fn ctx(&mut self) -> Context<'_, 'h> {
        Context {
            input: self.input,
            now_ms: self.now_ms,
            settings: &mut self.settings,
            env: &mut self.env,
            alarm: &mut self.alarm,
            hw: &mut self.hw,
        }
    }
}

pub fn test_context(hw: &mut TestHardware) -> Fixture<'_> {
    Fixture {
        settings: Settings::default(),
        env: EnvMonitor::new(),
        alarm: AlarmStatus::default(),
        now_ms: 0,
        input: InputEvents::none(),
        hw: hardware(hw),
    }
}
