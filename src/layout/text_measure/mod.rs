//! Text measurement for terminal rendering.
//!
//! Unicode-aware cell widths and line wrapping. This is the layout engine the
//! ellipsis fitter queries through [`CellMeasure`](crate::layout::CellMeasure).
//!
//! Uses `unicode-width` for East Asian Width tables and `unicode-segmentation`
//! for grapheme cluster and word boundaries, with extra rules for emoji
//! sequences so a ZWJ family or a flag counts as one wide cell pair.

mod width;
mod wrap;

pub use width::{char_width, grapheme_width, string_width};
pub use wrap::{measure_text, wrap_lines, wrap_ranges, Metrics};
