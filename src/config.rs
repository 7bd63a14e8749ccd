//! Application configuration constants.
//!
//! Layout positions are computed at compile time as `const` so rendering code
//! never does per-frame arithmetic for fixed geometry. Timing cadences live
//! here too: every "how often" number in the firmware (debounce, sensor read,
//! DVD physics step, alert blink intervals) is a named constant rather than a
//! literal buried in a loop.

use core::time::Duration;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (ST7789 landscape: 320x240).
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Screen center X coordinate, pre-computed as i32 for drawing code.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate, pre-computed as i32 for drawing code.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

// =============================================================================
// Clock Screen Layout
// =============================================================================
//
// The clock screen is split into: big time digits on top, a 2x2 labeled grid
// of environment readouts (HUMI | TEMP / TVOC | CO2), and the scrolling
// history graph at the bottom.

/// Left edge of the environment readout grid.
pub const GRID_LEFT: i32 = 10;

/// Right edge of the environment readout grid.
pub const GRID_RIGHT: i32 = 310;

/// Vertical divider between the two readout columns.
pub const GRID_MID_X: i32 = (GRID_LEFT + GRID_RIGHT) / 2;

/// Top horizontal rule of the readout grid.
pub const GRID_TOP: i32 = 75;

/// Middle horizontal rule (between the two readout rows).
pub const GRID_MID: i32 = 107;

/// Bottom horizontal rule of the readout grid.
pub const GRID_BOT: i32 = 139;

/// Baseline Y for the top-row labels (HUMI / TEMP).
pub const LABEL_TOP_Y: i32 = GRID_TOP + 12;

/// Baseline Y for the top-row values.
pub const VALUE_TOP_Y: i32 = GRID_TOP + 28;

/// Baseline Y for the bottom-row labels (TVOC / CO2).
pub const LABEL_BOT_Y: i32 = GRID_MID + 12;

/// Baseline Y for the bottom-row values.
pub const VALUE_BOT_Y: i32 = GRID_MID + 28;

/// Top edge of the history graph region.
pub const GRAPH_TOP: i32 = 145;

/// Height of the history graph region in pixels.
pub const GRAPH_HEIGHT: u32 = 90;

// =============================================================================
// List Screen Layout
// =============================================================================

/// Center Y of the first list row.
pub const LIST_FIRST_ROW_Y: i32 = 60;

/// Vertical distance between list row centers.
pub const LIST_ROW_PITCH: i32 = 35;

/// Highlight box height for a list row.
pub const LIST_ROW_HEIGHT: u32 = 28;

// =============================================================================
// Input Configuration
// =============================================================================

/// Software debounce interval applied to both buttons.
///
/// The polled-input contract: a level change is accepted only if the previous
/// accepted change is at least this old. One interval for confirm and back.
pub const DEBOUNCE_MS: u64 = 80;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Target frame time for the simulator loop (~50 FPS).
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Minimum interval between DVD screensaver physics steps. Keeps the logo
/// speed consistent no matter how fast the main loop spins.
pub const DVD_STEP_MS: u64 = 35;

/// Cadence for non-forced environment sensor reads.
pub const SENSOR_READ_MS: u64 = 1000;

/// Interval between alarm-ringing chirps.
pub const ALARM_BEEP_MS: u64 = 1000;

/// LED toggle interval while the alarm alert is active (fast blink).
pub const ALERT_LED_ALARM_MS: u64 = 120;

/// LED toggle interval while the air-quality alert is active (slower blink).
pub const ALERT_LED_CO2_MS: u64 = 250;

/// Chirp interval while the air-quality alert is active.
pub const ALERT_CHIRP_CO2_MS: u64 = 350;

/// eCO2 level (ppm) above which the air-quality alert raises.
pub const CO2_ALERT_PPM: u16 = 1800;

// =============================================================================
// Value Ranges
// =============================================================================

/// Pomodoro work phase length range, minutes.
pub const POMO_WORK_RANGE: (i32, i32) = (1, 90);

/// Pomodoro short break length range, minutes.
pub const POMO_SHORT_RANGE: (i32, i32) = (1, 30);

/// Pomodoro long break length range, minutes.
pub const POMO_LONG_RANGE: (i32, i32) = (1, 60);

/// Pomodoro cycle count range.
pub const POMO_CYCLES_RANGE: (i32, i32) = (1, 10);

/// Detent step for brightness/volume edits (percent per click).
pub const PERCENT_STEP: i32 = 5;

/// DVD logo speed magnitude range (pixels per physics step).
pub const DVD_SPEED_RANGE: (i32, i32) = (1, 8);

/// Selectable history graph time ranges, in minutes.
/// 5m, 15m, 30m, 1h, 3h, 6h, 12h, 24h.
pub const GRAPH_RANGES_MIN: [i32; 8] = [5, 15, 30, 60, 180, 360, 720, 1440];

// =============================================================================
// Unit Tests
// =============================================================================
