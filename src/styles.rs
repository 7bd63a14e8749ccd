//! Pre-computed static text styles to avoid per-frame object construction.
//!
//! `MonoTextStyle` and `TextStyle` are built as `const`, so the compiler puts
//! them in read-only data and draw functions just reference them. Styles that
//! need a dynamic color (selected vs. plain list rows, alarm fields) are built
//! at the call site from the exposed font references instead.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle, MonoTextStyleBuilder,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::Rgb565,
    text::{Alignment, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_24_POINT;

use crate::colors::{BG, LIGHT, WHITE};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Centered text alignment. Used for headers, values, and time digits.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Left-aligned text. Used for setup instructions and status labels.
pub const LEFT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).build();

// =============================================================================
// Font References (for dynamic color styles)
// =============================================================================

/// Small label font (6x10). Usage: `MonoTextStyle::new(LABEL_FONT, color)`.
pub const LABEL_FONT: &MonoFont = &FONT_6X10;

/// Medium font (10x20) for list rows, headers and body text.
pub const BODY_FONT: &MonoFont = &FONT_10X20;

/// Large font (`ProFont` 24pt) for time digits and big values.
pub const VALUE_FONT: &MonoFont = &PROFONT_24_POINT;

// =============================================================================
// Pre-computed Text Styles
// =============================================================================

/// Medium white text for list rows and body copy.
pub const BODY_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, WHITE);

/// Medium orange text for screen headers.
pub const HEADER_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_10X20, LIGHT);

/// Large white-on-black text for time digits and big values. The explicit
/// background color means redrawing a changed value overwrites the old glyphs
/// without a separate clear rect.
pub const VALUE_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyleBuilder::new()
    .font(&PROFONT_24_POINT)
    .text_color(WHITE)
    .background_color(BG)
    .build();
