//! Line breaking for terminal layout.
//!
//! Both wrap modes share one breaking routine that reports each line as a
//! byte range of the input plus its cell width. `measure_text` folds those
//! into [`Metrics`] without allocating; `wrap_ranges` and `wrap_lines`
//! hand them to the renderer.
//!
//! Rules:
//! - `\n` is a hard break; an empty input occupies zero lines
//! - `Char` breaks before any grapheme that would overflow the line
//! - `Word` breaks at UAX #29 word bounds, force-breaks words wider than the
//!   line and drops whitespace that would start a wrapped line
//! - `max_width == 0` disables soft wrapping

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use super::width::{grapheme_width, string_width};
use crate::types::WrapMode;

/// Size of laid-out text: number of lines and widest line in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metrics {
    pub line_count: usize,
    pub width: usize,
}

impl Metrics {
    pub const fn new(line_count: usize, width: usize) -> Self {
        Self { line_count, width }
    }
}

/// Measure `text` as it would be wrapped at `max_width` cells.
pub fn measure_text(text: &str, max_width: usize, mode: WrapMode) -> Metrics {
    let mut metrics = Metrics::default();
    for_each_line(text, max_width, mode, |_, width| {
        metrics.line_count += 1;
        metrics.width = metrics.width.max(width);
    });
    metrics
}

/// Wrap `text` at `max_width` cells and return the lines.
pub fn wrap_lines(text: &str, max_width: usize, mode: WrapMode) -> Vec<String> {
    wrap_ranges(text, max_width, mode)
        .into_iter()
        .map(|range| text[range].to_owned())
        .collect()
}

/// Byte ranges of `text` that make up each wrapped line.
///
/// Hard breaks and whitespace dropped at soft breaks fall between ranges.
pub fn wrap_ranges(text: &str, max_width: usize, mode: WrapMode) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    for_each_line(text, max_width, mode, |range, _| ranges.push(range));
    ranges
}

/// Calls `emit(range, width)` for every line, in order.
fn for_each_line(
    text: &str,
    max_width: usize,
    mode: WrapMode,
    mut emit: impl FnMut(Range<usize>, usize),
) {
    if text.is_empty() {
        return;
    }

    let mut base = 0;
    for raw in text.split('\n') {
        let mut line = Line {
            text: raw,
            base,
            emit: &mut emit,
        };
        if max_width == 0 {
            line.push(0, raw.len(), string_width(raw));
        } else {
            match mode {
                WrapMode::Char => break_chars(&mut line, max_width),
                WrapMode::Word => break_words(&mut line, max_width),
            }
        }
        base += raw.len() + 1;
    }
}

/// One hard line being broken into soft lines.
struct Line<'t, 'e, E> {
    text: &'t str,
    base: usize,
    emit: &'e mut E,
}

impl<E: FnMut(Range<usize>, usize)> Line<'_, '_, E> {
    fn push(&mut self, start: usize, end: usize, width: usize) {
        (self.emit)(self.base + start..self.base + end, width);
    }
}

fn break_chars<E: FnMut(Range<usize>, usize)>(line: &mut Line<'_, '_, E>, max_width: usize) {
    let text = line.text;
    let mut start = 0;
    let mut width = 0;

    for (idx, grapheme) in text.grapheme_indices(true) {
        let gw = grapheme_width(grapheme);
        if width + gw > max_width && idx > start {
            line.push(start, idx, width);
            start = idx;
            width = 0;
        }
        width += gw;
    }

    line.push(start, text.len(), width);
}

fn break_words<E: FnMut(Range<usize>, usize)>(line: &mut Line<'_, '_, E>, max_width: usize) {
    let text = line.text;
    let mut start = 0;
    let mut width = 0;

    for (idx, segment) in text.split_word_bound_indices() {
        let seg_width = string_width(segment);

        if width + seg_width > max_width {
            if width > 0 {
                // Leading whitespace alone never makes a line.
                let kept = text[start..idx].trim_end();
                if !kept.is_empty() {
                    line.push(start, start + kept.len(), string_width(kept));
                }
                start = idx;
                width = 0;
            }

            if segment.chars().all(char::is_whitespace) {
                start = idx + segment.len();
                continue;
            }

            if seg_width > max_width {
                for (offset, grapheme) in segment.grapheme_indices(true) {
                    let at = idx + offset;
                    let gw = grapheme_width(grapheme);
                    if width + gw > max_width && at > start {
                        line.push(start, at, width);
                        start = at;
                        width = 0;
                    }
                    width += gw;
                }
                continue;
            }
        }

        width += seg_width;
    }

    line.push(start, text.len(), width);
}
