//! Environment sampling and history.
//!
//! [`EnvMonitor`] owns the last-known readings and a fixed-capacity circular
//! history per metric for the clock screen's graph. Sampling is cadence
//! gated: a non-forced `sample` reads the sensor at most once per
//! [`crate::config::SENSOR_READ_MS`]; history slots are appended at the much
//! slower rate derived from the configured graph time range, so 320 slots
//! always span the whole selected window.
//!
//! # Sensor failure handling
//!
//! A failed temperature/humidity read leaves the previous values in place;
//! the air-quality sensor reports `0xFFFF` for "no new data", which is
//! likewise treated as "keep showing the last reading" rather than an error.
//!
//! # History layout
//!
//! Four parallel `u16` buffers (temperature x10, humidity, TVOC, eCO2) with a
//! shared head index. A new sample overwrites the oldest slot; readers walk
//! oldest to newest starting at the head once the buffer has wrapped.

use crate::config::SENSOR_READ_MS;

/// Number of history slots per metric. Matches the graph region width so one
/// slot maps to one pixel column.
pub const HIST_LEN: usize = 320;

/// Sentinel the air-quality sensor returns when it has no fresh data.
pub const NO_UPDATE: u16 = 0xFFFF;

/// One raw read from the combined sensor pair.
#[derive(Clone, Copy, Debug)]
pub struct RawSample {
    /// Temperature (C) and relative humidity (%), `None` if the read failed.
    pub temp_hum: Option<(f32, f32)>,
    /// TVOC index, or [`NO_UPDATE`].
    pub tvoc: u16,
    /// eCO2 ppm, or [`NO_UPDATE`].
    pub eco2: u16,
}

/// The physical sensor pair behind a narrow seam.
pub trait EnvSensor {
    fn read(&mut self) -> RawSample;
}

// =============================================================================
// History Ring Buffer
// =============================================================================

/// One history slot, already in display units.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HistorySlot {
    /// Temperature in tenths of a degree C.
    pub temp_x10: u16,
    pub hum: u16,
    pub tvoc: u16,
    pub eco2: u16,
}

/// Fixed-capacity circular history, oldest slot overwritten first.
pub struct EnvHistory {
    temp: [u16; HIST_LEN],
    hum: [u16; HIST_LEN],
    tvoc: [u16; HIST_LEN],
    eco2: [u16; HIST_LEN],
    /// Next write position; once wrapped, also the oldest slot.
    head: usize,
    /// Number of valid slots (grows until `HIST_LEN`).
    count: usize,
}

impl EnvHistory {
    pub const fn new() -> Self {
        Self {
            temp: [0; HIST_LEN],
            hum: [0; HIST_LEN],
            tvoc: [0; HIST_LEN],
            eco2: [0; HIST_LEN],
            head: 0,
            count: 0,
        }
    }

    /// Append one slot, evicting the oldest when full.
    pub fn push(&mut self, slot: HistorySlot) {
        self.temp[self.head] = slot.temp_x10;
        self.hum[self.head] = slot.hum;
        self.tvoc[self.head] = slot.tvoc;
        self.eco2[self.head] = slot.eco2;
        self.head = (self.head + 1) % HIST_LEN;
        if self.count < HIST_LEN {
            self.count += 1;
        }
    }

    /// Number of valid slots.
    pub const fn len(&self) -> usize {
        self.count
    }

    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Slot `i` in chronological order: `get(0)` is the oldest valid slot,
    /// `get(len() - 1)` the newest.
    pub fn get(&self, i: usize) -> HistorySlot {
        debug_assert!(i < self.count);
        let start = if self.count < HIST_LEN { 0 } else { self.head };
        let idx = (start + i) % HIST_LEN;
        HistorySlot {
            temp_x10: self.temp[idx],
            hum: self.hum[idx],
            tvoc: self.tvoc[idx],
            eco2: self.eco2[idx],
        }
    }

    /// Chronological (oldest to newest) iterator over valid slots.
    pub fn iter(&self) -> impl Iterator<Item = HistorySlot> + '_ {
        (0..self.count).map(|i| self.get(i))
    }
}

impl Default for EnvHistory {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Monitor
// =============================================================================

/// Last-known environment readings plus the graphing history.
pub struct EnvMonitor {
    pub temp: f32,
    pub hum: f32,
    pub tvoc: u16,
    pub eco2: u16,
    history: EnvHistory,
    last_read_ms: Option<u64>,
    last_hist_ms: u64,
}

impl EnvMonitor {
    pub const fn new() -> Self {
        Self {
            temp: 0.0,
            hum: 0.0,
            tvoc: 0,
            eco2: 400,
            history: EnvHistory::new(),
            last_read_ms: None,
            last_hist_ms: 0,
        }
    }

    /// Interval between history slots for a given graph range, clamped so a
    /// tiny range can never spin the history faster than the sensor reads.
    pub fn history_interval_ms(graph_minutes: i32) -> u64 {
        let interval = (graph_minutes.max(0) as u64 * 60_000) / HIST_LEN as u64;
        interval.max(1000)
    }

    /// Read the sensor (cadence-gated unless `force`) and append a history
    /// slot when its own cadence is due. Returns true if a slot was appended,
    /// so the clock screen knows to repaint the graph.
    pub fn sample(
        &mut self,
        force: bool,
        now_ms: u64,
        sensor: &mut dyn EnvSensor,
        graph_minutes: i32,
    ) -> bool {
        // A monitor that has never read is always due.
        let due = self
            .last_read_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= SENSOR_READ_MS);
        if force || due {
            self.last_read_ms = Some(now_ms);
            let raw = sensor.read();
            if let Some((t, h)) = raw.temp_hum {
                self.temp = t;
                self.hum = h;
            }
            if raw.tvoc != NO_UPDATE {
                self.tvoc = raw.tvoc;
            }
            if raw.eco2 != NO_UPDATE {
                self.eco2 = raw.eco2;
            }
        }

        let interval = Self::history_interval_ms(graph_minutes);
        if now_ms.saturating_sub(self.last_hist_ms) >= interval {
            self.last_hist_ms = now_ms;
            self.history.push(HistorySlot {
                temp_x10: (self.temp * 10.0).max(0.0) as u16,
                hum: self.hum.max(0.0) as u16,
                tvoc: self.tvoc,
                eco2: self.eco2,
            });
            return true;
        }
        false
    }

    pub const fn history(&self) -> &EnvHistory {
        &self.history
    }
}

impl Default for EnvMonitor {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
