//! ANSI escape sequences for painting fitted text.
//!
//! Only the SGR subset is needed here: foreground color, attributes and
//! reset. Fitted text is written line by line exactly as the measurer
//! wrapped it, so what the user sees matches what was counted.

use std::io::Write;
use std::ops::Range;

use crate::layout::wrap_ranges;
use crate::primitives::{StyleSpan, StyledFit};
use crate::types::{Attr, Rgba, WrapMode};

// =============================================================================
// Colors
// =============================================================================

/// Reset all attributes and colors.
#[inline]
pub fn reset<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[0m")
}

/// Set foreground color.
#[inline]
pub fn fg<W: Write>(w: &mut W, color: Rgba) -> std::io::Result<()> {
    if color.is_terminal_default() {
        write!(w, "\x1b[39m")
    } else if color.is_ansi() {
        let index = color.ansi_index();
        if index < 8 {
            write!(w, "\x1b[{}m", 30 + index)
        } else if index < 16 {
            write!(w, "\x1b[{}m", 90 + index - 8)
        } else {
            write!(w, "\x1b[38;5;{}m", index)
        }
    } else {
        // TrueColor: 38;2;r;g;b
        write!(w, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
    }
}

// =============================================================================
// Text Attributes
// =============================================================================

/// Set text attributes from bitflags.
#[allow(unused_assignments)]
pub fn attrs<W: Write>(w: &mut W, attr: Attr) -> std::io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    let mut first = true;
    write!(w, "\x1b[")?;

    macro_rules! emit {
        ($flag:expr, $code:expr) => {
            if attr.contains($flag) {
                if !first {
                    write!(w, ";")?;
                }
                write!(w, "{}", $code)?;
                first = false;
            }
        };
    }

    emit!(Attr::BOLD, 1);
    emit!(Attr::DIM, 2);
    emit!(Attr::ITALIC, 3);
    emit!(Attr::UNDERLINE, 4);
    emit!(Attr::BLINK, 5);
    emit!(Attr::INVERSE, 7);
    emit!(Attr::HIDDEN, 8);
    emit!(Attr::STRIKETHROUGH, 9);

    write!(w, "m")
}

// =============================================================================
// Styled text
// =============================================================================

/// Write a fitted text wrapped at `max_width`, painting the ellipsis span.
///
/// Lines are separated by `\n` with no trailing newline. With `color` off,
/// or a plain style, no escape sequences are written at all.
pub fn write_styled<W: Write>(
    w: &mut W,
    styled: &StyledFit,
    max_width: usize,
    wrap: WrapMode,
    color: bool,
) -> std::io::Result<()> {
    let text = styled.text();
    let paint = styled
        .ellipsis
        .as_ref()
        .filter(|span| color && !span.is_plain());

    for (i, line) in wrap_ranges(text, max_width, wrap).into_iter().enumerate() {
        if i > 0 {
            writeln!(w)?;
        }
        match paint.and_then(|span| overlap(&line, &span.range).map(|marked| (span, marked))) {
            Some((span, marked)) => {
                w.write_all(text[line.start..marked.start].as_bytes())?;
                paint_span(w, &text[marked.clone()], span)?;
                w.write_all(text[marked.end..line.end].as_bytes())?;
            }
            None => w.write_all(text[line].as_bytes())?,
        }
    }
    Ok(())
}

fn paint_span<W: Write>(w: &mut W, segment: &str, span: &StyleSpan) -> std::io::Result<()> {
    if !span.fg.is_terminal_default() {
        fg(w, span.fg)?;
    }
    attrs(w, span.attrs)?;
    w.write_all(segment.as_bytes())?;
    reset(w)
}

/// The part of `span` inside `line`, if any.
fn overlap(line: &Range<usize>, span: &Range<usize>) -> Option<Range<usize>> {
    let start = line.start.max(span.start);
    let end = line.end.min(span.end);
    (start < end).then_some(start..end)
}
