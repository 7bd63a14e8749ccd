//! Hardware collaborator traits.
//!
//! The state machine never touches pins, I2C or the network directly; it
//! drives these narrow traits instead. The simulator binary provides fake
//! implementations, unit tests use recording stubs, and an embedded port
//! would wrap the real peripherals.
//!
//! All methods are infallible from the core's point of view: a sensor that
//! cannot produce a reading returns `None` and the core keeps showing the
//! last known value, a clock that has not synced yet returns `None` and the
//! clock screen shows a placeholder.

use crate::env::EnvSensor;
use crate::settings::Settings;

// =============================================================================
// Wall Clock
// =============================================================================

/// A wall-clock timestamp, as much of it as the core needs.
///
/// `day` is the day-of-month and exists only to feed the alarm's
/// fire-once-per-day guard.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub day: u8,
}

/// Source of wall-clock time. Returns `None` until a time sync has happened.
pub trait Clock {
    fn now(&self) -> Option<TimeOfDay>;
}

// =============================================================================
// Indicator LED / Buzzer
// =============================================================================

/// The front-panel LED, driven as a brightness percentage (0 = off).
pub trait Led {
    fn set_brightness(&mut self, percent: u8);
}

/// The piezo buzzer.
///
/// `tone` with a non-zero duration is allowed to block for that duration;
/// callers keep durations to small constants (tens to hundreds of
/// milliseconds) so the loop stays responsive.
pub trait Buzzer {
    fn tone(&mut self, freq_hz: u16, duration_ms: u32, volume: u8);
    fn stop(&mut self);
}

// =============================================================================
// WiFi Provisioning Portal
// =============================================================================

/// Connection state reported by the provisioning collaborator.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProvisioningStatus {
    /// No portal running, no network.
    Idle,
    /// Portal running, waiting for the user to submit credentials.
    Pending,
    /// Connected to a network.
    Connected,
}

/// The WiFi provisioning portal. `step` is cooperative: called once per loop
/// iteration while the setup screen is active, it must never block.
pub trait Provisioner {
    fn start_portal(&mut self, ap_ssid: &str);
    fn step(&mut self);
    fn status(&self) -> ProvisioningStatus;
    /// SSID of the currently connected network, if any.
    fn ssid(&self) -> Option<&str>;
    fn stop_portal(&mut self);
    /// Erase stored credentials and restart the device. Does not return
    /// control to the caller on real hardware.
    fn reset_credentials(&mut self);
}

// =============================================================================
// Settings Persistence
// =============================================================================

/// Key/value-backed settings persistence. Loaded once at boot, saved whenever
/// a mode exits back toward its parent.
pub trait SettingsStore {
    fn load(&mut self) -> Settings;
    fn save(&mut self, settings: &Settings);
}

// =============================================================================
// Hardware Bundle
// =============================================================================

/// Everything the modes may side-effect through, bundled so `Context` stays
/// one parameter. Trait objects keep [`crate::modes::Mode`] a plain value
/// type that fits the dispatcher's single inline slot.
pub struct Hardware<'a> {
    pub led: &'a mut dyn Led,
    pub buzzer: &'a mut dyn Buzzer,
    pub provisioner: &'a mut dyn Provisioner,
    pub store: &'a mut dyn SettingsStore,
    pub sensor: &'a mut dyn EnvSensor,
    pub clock: &'a dyn Clock,
}
