//! Drawing primitives shared across modes.
//!
//! Every function here is generic over `DrawTarget<Color = Rgb565>` so the
//! same code renders to the simulator window, a real panel driver, or the
//! pixel-discarding display used in unit tests. Draw errors are not
//! actionable mid-frame and are discarded with `.ok()` throughout.
//!
//! The two differential-redraw workhorses live here:
//!
//! - [`primitives::draw_bar`] repaints only the delta region between the
//!   previous and new fill width of a progress bar, never the whole bar.
//! - [`primitives::draw_list`] repaints only the previously-selected and
//!   newly-selected rows once a list is on screen.

pub mod graph;
pub mod primitives;

pub use graph::draw_history_graph;
pub use primitives::{
    clear_screen, draw_alarm_icon, draw_bar, draw_header, draw_list, draw_list_item,
    fill_round_rect, stroke_round_rect, text, text_centered, text_centered_between,
};
