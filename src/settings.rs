//! User-tunable settings and their persistence seam.
//!
//! Every numeric adjustment goes through a clamping helper at the point of
//! mutation: out-of-range requests are silently clamped, never rejected.
//! Settings load once at boot (hardcoded defaults on first run) and are saved
//! by modes as they exit back toward their parent screen.

use crate::config::{GRAPH_RANGES_MIN, PERCENT_STEP};
use crate::hal::SettingsStore;

/// All persisted user parameters.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Settings {
    /// LED brightness percent, 0-100.
    pub led_brightness: i32,
    /// Speaker volume percent, 0-100.
    pub speaker_vol: i32,
    /// History graph time range, minutes. Always one of `GRAPH_RANGES_MIN`.
    pub graph_minutes: i32,
    pub alarm_hour: u8,
    pub alarm_minute: u8,
    pub alarm_enabled: bool,
    pub pomo_work_min: i32,
    pub pomo_short_min: i32,
    pub pomo_long_min: i32,
    pub pomo_cycles: i32,
}

impl Default for Settings {
    /// First-run defaults: full brightness/volume, 5 minute graph,
    /// 07:00 alarm disabled, classic 25/5/15 x4 pomodoro.
    fn default() -> Self {
        Self {
            led_brightness: 100,
            speaker_vol: 100,
            graph_minutes: 5,
            alarm_hour: 7,
            alarm_minute: 0,
            alarm_enabled: false,
            pomo_work_min: 25,
            pomo_short_min: 5,
            pomo_long_min: 15,
            pomo_cycles: 4,
        }
    }
}

/// Apply a signed adjustment and clamp the result into `range` (inclusive).
pub fn clamp_adjust(value: i32, delta: i32, range: (i32, i32)) -> i32 {
    (value + delta).clamp(range.0, range.1)
}

impl Settings {
    /// Adjust LED brightness by rotation detents (5% per detent, 0-100).
    pub fn adjust_brightness(&mut self, detents: i32) {
        self.led_brightness = clamp_adjust(self.led_brightness, detents * PERCENT_STEP, (0, 100));
    }

    /// Adjust speaker volume by rotation detents (5% per detent, 0-100).
    pub fn adjust_volume(&mut self, detents: i32) {
        self.speaker_vol = clamp_adjust(self.speaker_vol, detents * PERCENT_STEP, (0, 100));
    }

    /// Step the graph range through the fixed table. Clamped at the ends,
    /// not wrapped: spinning past 24h stays at 24h.
    pub fn step_graph_range(&mut self, detents: i32) {
        let old_idx = GRAPH_RANGES_MIN
            .iter()
            .position(|&m| m == self.graph_minutes)
            .unwrap_or(0);
        let new_idx = clamp_adjust(old_idx as i32, detents, (0, GRAPH_RANGES_MIN.len() as i32 - 1));
        self.graph_minutes = GRAPH_RANGES_MIN[new_idx as usize];
    }
}

// =============================================================================
// In-memory Store
// =============================================================================

/// Volatile [`SettingsStore`] used by the simulator and tests. Behaves like a
/// freshly erased flash: the first load yields the defaults.
#[derive(Default)]
pub struct MemStore {
    pub saved: Option<Settings>,
}

impl MemStore {
    pub const fn new() -> Self {
        Self { saved: None }
    }
}

impl SettingsStore for MemStore {
    fn load(&mut self) -> Settings {
        self.saved.unwrap_or_default()
    }

    fn save(&mut self, settings: &Settings) {
        self.saved = Some(*settings);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
