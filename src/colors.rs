//! Color constants for the CyberClock UI.
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! This format is native to the ST7789 panel, so no conversion happens when
//! the buffer is written out. Standard colors come from the `RgbColor` trait
//! constants; the rest are application-specific accents.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Screen background.
pub const BG: Rgb565 = Rgb565::BLACK;

/// Pure white. Default text color.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Alarm screen background, disabled states, reset buttons.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green. Progress bars, "connected"/"enabled" states, short break.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow. Paused pomodoro label, CO2 graph line.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Magenta/pink. DVD palette entry.
pub const PINK: Rgb565 = Rgb565::MAGENTA;

/// Cyan accent. Selected list rows, blue-ish labels, long break.
pub const ACCENT: Rgb565 = Rgb565::CYAN;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Warm orange highlight. Headers, selected alarm field, work-phase label.
/// RGB565 0xFD20.
pub const LIGHT: Rgb565 = Rgb565::new(31, 41, 0);

/// Dark gray. Empty portion of progress bars, unselected button fills.
/// RGB565 0x4208.
pub const DARK: Rgb565 = Rgb565::new(8, 16, 8);

/// Very dark gray for graph grid lines. RGB565 0x2104.
pub const GRID: Rgb565 = Rgb565::new(4, 8, 4);

// =============================================================================
// Series Colors (environment history graph)
// =============================================================================

/// Temperature trace.
pub const TEMP_SERIES: Rgb565 = RED;

/// Humidity trace.
pub const HUM_SERIES: Rgb565 = ACCENT;

/// TVOC trace.
pub const TVOC_SERIES: Rgb565 = GREEN;

/// eCO2 trace.
pub const CO2_SERIES: Rgb565 = YELLOW;

/// DVD logo palette, cycled on corner hits.
pub const DVD_PALETTE: [Rgb565; 6] = [WHITE, ACCENT, LIGHT, GREEN, PINK, YELLOW];
