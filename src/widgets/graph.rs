//! Environment history graph for the clock screen.
//!
//! Renders the four metric traces (temperature, humidity, TVOC, eCO2) as
//! polylines over a faint grid, one pixel column per history slot. Each
//! metric has a fixed display range; values outside it are clamped rather
//! than rescaled, so the traces stay comparable across redraws.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

use crate::colors::{BG, CO2_SERIES, GRID, HUM_SERIES, TEMP_SERIES, TVOC_SERIES};
use crate::config::{GRAPH_HEIGHT, GRAPH_TOP, SCREEN_WIDTH};
use crate::env::EnvHistory;

/// Map a value into graph Y space: `range.0` at the bottom, `range.1` at the
/// top, clamped. Y is absolute screen coordinates within the graph region.
fn scale_y(value: i32, range: (i32, i32)) -> i32 {
    let clamped = value.clamp(range.0, range.1);
    let span = range.1 - range.0;
    let inner_top = GRAPH_TOP + 2;
    let inner_bot = GRAPH_TOP + GRAPH_HEIGHT as i32 - 2;
    inner_bot - ((clamped - range.0) * (inner_bot - inner_top)) / span
}

fn polyline_segment<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Rgb565,
) {
    Line::new(Point::new(x0, y0), Point::new(x1, y1))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(display)
        .ok();
}

/// Redraw the whole graph region from the history buffer.
pub fn draw_history_graph<D: DrawTarget<Color = Rgb565>>(display: &mut D, history: &EnvHistory) {
    // Background + quarter grid lines.
    Rectangle::new(Point::new(0, GRAPH_TOP), Size::new(SCREEN_WIDTH, GRAPH_HEIGHT))
        .into_styled(PrimitiveStyle::with_fill(BG))
        .draw(display)
        .ok();
    for quarter in 1..4 {
        let y = GRAPH_TOP + (GRAPH_HEIGHT as i32 * quarter) / 4;
        Line::new(Point::new(0, y), Point::new(SCREEN_WIDTH as i32 - 1, y))
            .into_styled(PrimitiveStyle::with_stroke(GRID, 1))
            .draw(display)
            .ok();
    }

    let mut prev: Option<(i32, i32, i32, i32, i32)> = None;
    for (x, slot) in history.iter().enumerate() {
        let x = x as i32;
        // Display ranges: temp 0-50C, humidity 0-100%, TVOC 0-1500, CO2 0-2000.
        let y_t = scale_y(slot.temp_x10 as i32 / 10, (0, 50));
        let y_h = scale_y(slot.hum as i32, (0, 100));
        let y_v = scale_y(slot.tvoc as i32, (0, 1500));
        let y_c = scale_y(slot.eco2 as i32, (0, 2000));

        if let Some((px, pt, ph, pv, pc)) = prev {
            polyline_segment(display, px, pt, x, y_t, TEMP_SERIES);
            polyline_segment(display, px, ph, x, y_h, HUM_SERIES);
            polyline_segment(display, px, pv, x, y_v, TVOC_SERIES);
            polyline_segment(display, px, pc, x, y_c, CO2_SERIES);
        }
        prev = Some((x, y_t, y_h, y_v, y_c));
    }

    // Frame on top of the traces.
    Rectangle::new(Point::new(0, GRAPH_TOP), Size::new(SCREEN_WIDTH, GRAPH_HEIGHT))
        .into_styled(PrimitiveStyle::with_stroke(GRID, 1))
        .draw(display)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================
