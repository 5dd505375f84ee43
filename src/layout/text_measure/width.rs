//! Cell width of characters, grapheme clusters and strings.
//!
//! Terminals lay text out on a grid: most characters take one cell, East
//! Asian wide characters and emoji take two, combining marks and control
//! characters take none.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Emoji blocks that terminals render wide even where Unicode says narrow.
#[inline]
fn is_forced_wide(c: char) -> bool {
    matches!(
        c as u32,
        0x2600..=0x27BF          // Misc symbols, dingbats (☀ ⚡ ✨)
            | 0x1F300..=0x1F64F  // Pictographs, emoticons
            | 0x1F680..=0x1F6FF  // Transport and map
            | 0x1F900..=0x1F9FF  // Supplemental pictographs
            | 0x1FA70..=0x1FAFF  // Pictographs extended-A
    )
}

/// Trailing codepoints that turn a cluster into a wide emoji sequence.
#[inline]
fn is_emoji_modifier(c: char) -> bool {
    matches!(
        c as u32,
        0x200D                   // ZWJ
            | 0xFE0F             // VS16
            | 0x1F3FB..=0x1F3FF  // Fitzpatrick skin tones
            | 0x20E3             // Combining enclosing keycap
    )
}

/// Display width of a single codepoint in terminal cells (0, 1 or 2).
#[inline]
pub fn char_width(c: char) -> usize {
    if is_forced_wide(c) {
        2
    } else {
        c.width().unwrap_or(0)
    }
}

/// Display width of one grapheme cluster.
///
/// - single codepoint: `char_width`
/// - flag (regional indicator pair) or emoji sequence: 2
/// - base + combining marks: width of the base
pub fn grapheme_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let Some(base) = chars.next() else {
        return 0;
    };

    let rest = chars.as_str();
    if rest.is_empty() {
        return char_width(base);
    }

    if ('\u{1F1E6}'..='\u{1F1FF}').contains(&base) || rest.chars().any(is_emoji_modifier) {
        return 2;
    }

    base.width().unwrap_or(0)
}

/// Display width of a string in terminal cells.
pub fn string_width(s: &str) -> usize {
    if s.is_ascii() {
        return s.bytes().filter(|b| (0x20..0x7F).contains(b)).count();
    }
    s.graphemes(true).map(grapheme_width).sum()
}
