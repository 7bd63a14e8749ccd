//! Low-level drawing primitives: text placement, progress bars, list rows.
//!
//! # Delta-region Progress Bar
//!
//! `draw_bar` memoizes the previous fill width through the caller-owned
//! `prev_w` slot (`-1` means "frame not drawn yet"). On change it paints only
//! the strip between the old and new widths: growth fills with the bar color,
//! shrinkage restores the dark background. The full frame (border + empty
//! fill) is drawn exactly once per screen entry.
//!
//! # List Rows
//!
//! `draw_list` implements the shared list-rendering policy: on first draw all
//! rows render; afterwards only the two rows whose selection state changed
//! repaint (selected row gets the accent fill, others plain background).

use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    CornerRadii, PrimitiveStyle, Rectangle, RoundedRectangle,
};
use embedded_graphics::text::Text;

use crate::colors::{ACCENT, BG, DARK, LIGHT, WHITE};
use crate::config::{
    CENTER_X, LIST_FIRST_ROW_Y, LIST_ROW_HEIGHT, LIST_ROW_PITCH, SCREEN_WIDTH,
};
use crate::styles::{BODY_FONT, CENTERED, HEADER_STYLE, LEFT_ALIGNED};

/// Left-aligned text at an explicit position.
pub fn text<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    s: &str,
    x: i32,
    y: i32,
    style: MonoTextStyle<'static, Rgb565>,
) {
    Text::with_text_style(s, Point::new(x, y), style, LEFT_ALIGNED)
        .draw(display)
        .ok();
}

/// Text centered on the full screen width, `y` is the baseline.
pub fn text_centered<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    s: &str,
    y: i32,
    style: MonoTextStyle<'static, Rgb565>,
) {
    Text::with_text_style(s, Point::new(CENTER_X, y), style, CENTERED)
        .draw(display)
        .ok();
}

/// Text centered between two X coordinates (grid cells, buttons).
pub fn text_centered_between<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    s: &str,
    x_start: i32,
    x_end: i32,
    y: i32,
    style: MonoTextStyle<'static, Rgb565>,
) {
    Text::with_text_style(s, Point::new((x_start + x_end) / 2, y), style, CENTERED)
        .draw(display)
        .ok();
}

/// Clear the whole screen. When clearing to the standard background, the
/// alarm-enabled icon is re-stamped in the top-right corner so it survives
/// every screen change.
pub fn clear_screen<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    bg: Rgb565,
    alarm_enabled: bool,
) {
    display.clear(bg).ok();
    if bg == BG {
        draw_alarm_icon(display, alarm_enabled);
    }
}

/// Standard screen header: clear + orange title line.
pub fn draw_header<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    title: &str,
    alarm_enabled: bool,
) {
    clear_screen(display, BG, alarm_enabled);
    text_centered(display, title, 40, HEADER_STYLE);
}

/// Small bell icon in the top-right corner while the alarm is armed.
/// Always blanks its cell first so disabling the alarm erases it.
pub fn draw_alarm_icon<D: DrawTarget<Color = Rgb565>>(display: &mut D, enabled: bool) {
    let x = SCREEN_WIDTH as i32 - 24;
    Rectangle::new(Point::new(x - 10, 0), Size::new(24, 24))
        .into_styled(PrimitiveStyle::with_fill(BG))
        .draw(display)
        .ok();
    if !enabled {
        return;
    }
    stroke_round_rect(display, x - 9, 4, 18, 14, 4, LIGHT);
    Rectangle::new(Point::new(x - 7, 16), Size::new(14, 1))
        .into_styled(PrimitiveStyle::with_fill(LIGHT))
        .draw(display)
        .ok();
    Rectangle::new(Point::new(x - 2, 18), Size::new(4, 3))
        .into_styled(PrimitiveStyle::with_fill(LIGHT))
        .draw(display)
        .ok();
}

/// Filled rounded rectangle helper.
pub fn fill_round_rect<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    radius: u32,
    color: Rgb565,
) {
    RoundedRectangle::new(
        Rectangle::new(Point::new(x, y), Size::new(w, h)),
        CornerRadii::new(Size::new(radius, radius)),
    )
    .into_styled(PrimitiveStyle::with_fill(color))
    .draw(display)
    .ok();
}

/// Stroked rounded rectangle helper (1px outline).
pub fn stroke_round_rect<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    radius: u32,
    color: Rgb565,
) {
    RoundedRectangle::new(
        Rectangle::new(Point::new(x, y), Size::new(w, h)),
        CornerRadii::new(Size::new(radius, radius)),
    )
    .into_styled(PrimitiveStyle::with_stroke(color, 1))
    .draw(display)
    .ok();
}

// =============================================================================
// Progress Bar
// =============================================================================

/// Draw a horizontal progress bar, repainting only the changed width strip.
///
/// `prev_w` is the caller's memoized fill width in pixels; pass `-1` to force
/// the one-time frame draw (white border + dark empty fill). `percent` is
/// clamped to 0-100.
pub fn draw_bar<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    percent: i32,
    color: Rgb565,
    prev_w: &mut i32,
) {
    if *prev_w == -1 {
        Rectangle::new(Point::new(x - 1, y - 1), Size::new(w + 2, h + 2))
            .into_styled(PrimitiveStyle::with_stroke(WHITE, 1))
            .draw(display)
            .ok();
        Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_fill(DARK))
            .draw(display)
            .ok();
        *prev_w = 0;
    }

    let target_w = (w as i32 * percent.clamp(0, 100)) / 100;
    if target_w != *prev_w {
        if target_w > *prev_w {
            // Growth: paint only the new strip.
            Rectangle::new(Point::new(x + *prev_w, y), Size::new((target_w - *prev_w) as u32, h))
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(display)
                .ok();
        } else {
            // Shrinkage: restore the vacated strip to the empty fill.
            Rectangle::new(Point::new(x + target_w, y), Size::new((*prev_w - target_w) as u32, h))
                .into_styled(PrimitiveStyle::with_fill(DARK))
                .draw(display)
                .ok();
        }
        *prev_w = target_w;
    }
}

// =============================================================================
// List Rows
// =============================================================================

/// Draw one list row, highlighted when selected.
pub fn draw_list_item<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    index: usize,
    selected_index: usize,
    label: &str,
) {
    let row_center_y = LIST_FIRST_ROW_Y + index as i32 * LIST_ROW_PITCH;
    let box_y = row_center_y - 14;
    let text_y = row_center_y + 5;
    let selected = index == selected_index;

    let (box_color, text_color) = if selected { (ACCENT, BG) } else { (BG, WHITE) };
    Rectangle::new(Point::new(10, box_y), Size::new(300, LIST_ROW_HEIGHT))
        .into_styled(PrimitiveStyle::with_fill(box_color))
        .draw(display)
        .ok();
    let style = MonoTextStyleBuilder::new()
        .font(BODY_FONT)
        .text_color(text_color)
        .background_color(box_color)
        .build();
    text(display, label, 24, text_y, style);
}

/// Draw a list with the shared differential policy: all rows on a full
/// redraw, otherwise only the old and new selection.
pub fn draw_list<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    labels: &[&str],
    selected: usize,
    last: Option<usize>,
    full_redraw: bool,
) {
    for (i, label) in labels.iter().enumerate() {
        if full_redraw || i == selected || Some(i) == last {
            draw_list_item(display, i, selected, label);
        }
    }
}
