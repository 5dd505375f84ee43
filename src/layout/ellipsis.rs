//! Ellipsis fitting.
//!
//! Shrinks a text until it fits in a given number of lines, marking the cut
//! with an ellipsis either at the end or in the middle. Line breaking is
//! whatever the injected [`Measure`] says it is: the fitter proposes a
//! candidate, asks the oracle, and trims one grapheme per round until the
//! candidate fits.
//!
//! ```text
//! End:     "abcdefghij" + "..."  →  "abcdefghi..."  →  …  →  "abc..."
//! Middle:  "abcdef" + "..." + "ghij"  →  "abcde...ghij"  →  "abcde...hij"  →  …
//! ```
//!
//! Work is bounded by the grapheme count of the source: at most `n + 1`
//! candidates are measured in either mode, whatever the oracle answers.

use tracing::{debug, trace};
use unicode_segmentation::UnicodeSegmentation;

use super::oracle::Measure;
use crate::types::{EllipsisPosition, ShortCircuit};

// =============================================================================
// Request / Result
// =============================================================================

/// Input to [`fit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitRequest {
    pub source_text: String,
    /// `None` means no truncation was requested; the source is returned as-is.
    pub ellipsis: Option<String>,
    pub position: EllipsisPosition,
    /// Maximum number of lines. `0` is invalid and leaves the source as-is.
    pub line_limit: usize,
    pub short_circuit: ShortCircuit,
    /// Line count of the source the host already laid out, if it has one.
    /// Saves the initial measurement.
    pub laid_out_lines: Option<usize>,
}

impl Default for FitRequest {
    fn default() -> Self {
        Self {
            source_text: String::new(),
            ellipsis: None,
            position: EllipsisPosition::End,
            line_limit: 1,
            short_circuit: ShortCircuit::default(),
            laid_out_lines: None,
        }
    }
}

impl FitRequest {
    /// One-line, end-positioned request.
    pub fn new(source_text: impl Into<String>, ellipsis: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            ellipsis: Some(ellipsis.into()),
            ..Default::default()
        }
    }
}

/// Byte range of the ellipsis marker inside [`FitResult::display_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EllipsisSpan {
    pub start: usize,
    pub end: usize,
}

impl EllipsisSpan {
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// What the fitter had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitOutcome {
    /// Source already fit (or no ellipsis was configured).
    Unchanged,
    /// Ellipsis inserted and the candidate fits.
    Truncated,
    /// Even the bare ellipsis exceeds the limit; the ellipsis alone is returned.
    Overflow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitResult {
    pub display_text: String,
    /// Where the ellipsis sits, for styling. `None` when unchanged.
    pub ellipsis: Option<EllipsisSpan>,
    pub outcome: FitOutcome,
}

impl FitResult {
    pub fn unchanged(source: &str) -> Self {
        Self {
            display_text: source.to_owned(),
            ellipsis: None,
            outcome: FitOutcome::Unchanged,
        }
    }

    /// The ellipsis marker as it appears in the display text.
    pub fn ellipsis_text(&self) -> Option<&str> {
        self.ellipsis.map(|span| &self.display_text[span.range()])
    }

    /// Display text split around the ellipsis: `(before, marker, after)`.
    pub fn parts(&self) -> (&str, &str, &str) {
        match self.ellipsis {
            Some(span) => (
                &self.display_text[..span.start],
                &self.display_text[span.range()],
                &self.display_text[span.end..],
            ),
            None => (&self.display_text, "", ""),
        }
    }
}

// =============================================================================
// Fitting
// =============================================================================

/// Fit `request.source_text` into `request.line_limit` lines as measured by `measure`.
///
/// Pure apart from tracing events: identical requests against a deterministic
/// oracle give identical results.
pub fn fit<M: Measure + ?Sized>(request: &FitRequest, measure: &M) -> FitResult {
    let Some(ellipsis) = request.ellipsis.as_deref() else {
        trace!("no ellipsis marker, leaving text as-is");
        return FitResult::unchanged(&request.source_text);
    };

    let limit = request.line_limit;
    if limit == 0 {
        debug!("line limit is 0, leaving text as-is");
        return FitResult::unchanged(&request.source_text);
    }

    let lines = match request.laid_out_lines {
        Some(lines) => lines,
        None => measure.measure(&request.source_text).line_count,
    };
    if request.short_circuit.already_fits(lines, limit) {
        trace!(lines, limit, "source fits");
        return FitResult::unchanged(&request.source_text);
    }

    let source = Graphemes::new(&request.source_text);
    let (result, measured) = match request.position {
        EllipsisPosition::End => fit_end(&source, ellipsis, limit, measure),
        EllipsisPosition::Middle => fit_middle(&source, ellipsis, limit, measure),
    };

    debug!(
        position = ?request.position,
        lines,
        limit,
        measured,
        outcome = ?result.outcome,
        kept_bytes = result.display_text.len() - ellipsis.len(),
        source_bytes = request.source_text.len(),
        "fitted text"
    );
    result
}

/// Trim graphemes off the end of the prefix until `prefix + ellipsis` fits.
fn fit_end<M: Measure + ?Sized>(
    source: &Graphemes<'_>,
    ellipsis: &str,
    limit: usize,
    measure: &M,
) -> (FitResult, usize) {
    let mut keep = source.len();
    let mut measured = 0;

    loop {
        let (text, span) = splice(source.prefix(keep), ellipsis, "");
        let lines = measure.measure(&text).line_count;
        measured += 1;
        trace!(keep, lines, "end candidate");

        if lines <= limit {
            return (settled(text, span, FitOutcome::Truncated), measured);
        }
        if keep == 0 {
            return (settled(text, span, FitOutcome::Overflow), measured);
        }
        keep -= 1;
    }
}

/// Split past the midpoint and trim the halves alternately, left first,
/// until `left + ellipsis + right` fits.
///
/// The split index is `n / 2 + 1`, so the left half holds the extra
/// grapheme and the halves still cover the whole source.
fn fit_middle<M: Measure + ?Sized>(
    source: &Graphemes<'_>,
    ellipsis: &str,
    limit: usize,
    measure: &M,
) -> (FitResult, usize) {
    let n = source.len();
    let split = (n / 2 + 1).min(n);
    // Kept graphemes: [0, left) and [right, n).
    let mut left = split;
    let mut right = split;
    let mut measured = 0;
    let mut round = 0;

    loop {
        let (text, span) = splice(source.prefix(left), ellipsis, source.suffix_from(right));
        let lines = measure.measure(&text).line_count;
        measured += 1;
        trace!(round, left, right, lines, "middle candidate");

        if lines <= limit {
            return (settled(text, span, FitOutcome::Truncated), measured);
        }
        if left == 0 && right == n {
            return (settled(text, span, FitOutcome::Overflow), measured);
        }

        // Even rounds take from the left half, odd rounds from the right one.
        // An exhausted half hands its turn to the other.
        let take_left = if round % 2 == 0 { left > 0 } else { right == n };
        if take_left {
            left -= 1;
        } else {
            right += 1;
        }
        round += 1;
    }
}

fn splice(left: &str, ellipsis: &str, right: &str) -> (String, EllipsisSpan) {
    let mut text = String::with_capacity(left.len() + ellipsis.len() + right.len());
    text.push_str(left);
    text.push_str(ellipsis);
    text.push_str(right);

    let span = EllipsisSpan {
        start: left.len(),
        end: left.len() + ellipsis.len(),
    };
    (text, span)
}

fn settled(display_text: String, span: EllipsisSpan, outcome: FitOutcome) -> FitResult {
    FitResult {
        display_text,
        ellipsis: Some(span),
        outcome,
    }
}

/// Grapheme boundaries of a string, so trimming never splits a cluster.
struct Graphemes<'a> {
    text: &'a str,
    /// Byte offset of every grapheme start, plus `text.len()`.
    bounds: Vec<usize>,
}

impl<'a> Graphemes<'a> {
    fn new(text: &'a str) -> Self {
        let bounds = text
            .grapheme_indices(true)
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        Self { text, bounds }
    }

    fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    /// First `count` graphemes (clamped).
    fn prefix(&self, count: usize) -> &'a str {
        &self.text[..self.bounds[count.min(self.len())]]
    }

    /// Graphemes from index `first` to the end (clamped).
    fn suffix_from(&self, first: usize) -> &'a str {
        &self.text[self.bounds[first.min(self.len())]..]
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::layout::text_measure::Metrics;

    /// One line up to `fits` graphemes, two lines beyond.
    fn lines_by_len(fits: usize) -> impl Fn(&str) -> Metrics {
        move |s: &str| {
            let len = s.graphemes(true).count();
            Metrics::new(if len > fits { 2 } else { 1 }, len)
        }
    }

    fn request(source: &str, position: EllipsisPosition) -> FitRequest {
        FitRequest {
            source_text: source.to_string(),
            ellipsis: Some("...".to_string()),
            position,
            ..Default::default()
        }
    }

    #[test]
    fn end_trims_to_longest_fitting_prefix() {
        let result = fit(&request("abcdefghij", EllipsisPosition::End), &lines_by_len(6));
        assert_eq!(result.display_text, "abc...");
        assert_eq!(result.ellipsis, Some(EllipsisSpan { start: 3, end: 6 }));
        assert_eq!(result.outcome, FitOutcome::Truncated);
    }

    #[test]
    fn middle_alternates_starting_left() {
        let result = fit(&request("abcdefghij", EllipsisPosition::Middle), &lines_by_len(8));
        assert_eq!(result.display_text, "abc...ij");
        assert_eq!(result.ellipsis, Some(EllipsisSpan { start: 3, end: 6 }));
        assert_eq!(result.ellipsis_text(), Some("..."));
        assert_eq!(FitResult::unchanged("abc").ellipsis_text(), None);
    }

    #[test]
    fn middle_first_candidate_keeps_whole_source() {
        let seen = std::cell::RefCell::new(Vec::new());
        let oracle = |s: &str| {
            seen.borrow_mut().push(s.to_string());
            Metrics::new(if s.len() > 9 { 2 } else { 1 }, s.len())
        };
        let result = fit(&request("abcdefghij", EllipsisPosition::Middle), &oracle);

        assert_eq!(result.display_text, "abcd...ij");
        assert_eq!(
            *seen.borrow(),
            vec![
                "abcdefghij",
                "abcdef...ghij",
                "abcde...ghij",
                "abcde...hij",
                "abcd...hij",
                "abcd...ij",
            ]
        );
    }

    #[test]
    fn fitting_source_is_untouched() {
        let result = fit(&request("abc", EllipsisPosition::End), &lines_by_len(6));
        assert_eq!(result, FitResult::unchanged("abc"));
    }

    #[test]
    fn missing_ellipsis_means_no_truncation() {
        let req = FitRequest {
            source_text: "abcdefghij".to_string(),
            ..Default::default()
        };
        let result = fit(&req, &lines_by_len(2));
        assert_eq!(result.display_text, "abcdefghij");
        assert_eq!(result.outcome, FitOutcome::Unchanged);
    }

    #[test]
    fn below_limit_policy_appends_to_exact_fit() {
        let req = FitRequest {
            short_circuit: ShortCircuit::BelowLimit,
            ..request("abc", EllipsisPosition::End)
        };
        let result = fit(&req, &lines_by_len(6));
        assert_eq!(result.display_text, "abc...");
        assert_eq!(result.outcome, FitOutcome::Truncated);
    }

    #[test]
    fn laid_out_lines_skip_initial_measure() {
        let calls = Cell::new(0);
        let oracle = |s: &str| {
            calls.set(calls.get() + 1);
            lines_by_len(6)(s)
        };
        let req = FitRequest {
            laid_out_lines: Some(1),
            ..request("abcdefghij", EllipsisPosition::End)
        };
        assert_eq!(fit(&req, &oracle).outcome, FitOutcome::Unchanged);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn overflow_returns_bare_ellipsis() {
        let never = |s: &str| Metrics::new(3, s.len());
        for position in [EllipsisPosition::End, EllipsisPosition::Middle] {
            let result = fit(&request("abcdef", position), &never);
            assert_eq!(result.display_text, "...");
            assert_eq!(result.ellipsis, Some(EllipsisSpan { start: 0, end: 3 }));
            assert_eq!(result.outcome, FitOutcome::Overflow);
        }
    }

    #[test]
    fn measurements_are_bounded_by_source_length() {
        let calls = Cell::new(0);
        let never = |s: &str| {
            calls.set(calls.get() + 1);
            Metrics::new(usize::MAX, s.len())
        };
        for position in [EllipsisPosition::End, EllipsisPosition::Middle] {
            calls.set(0);
            fit(&request("0123456789", position), &never);
            // source measure + at most n + 1 candidates
            assert!(calls.get() <= 1 + 11, "{position:?}: {} calls", calls.get());
        }
    }

    #[test]
    fn zero_limit_leaves_source_unchanged() {
        let calls = Cell::new(0);
        let oracle = |s: &str| {
            calls.set(calls.get() + 1);
            lines_by_len(6)(s)
        };
        for position in [EllipsisPosition::End, EllipsisPosition::Middle] {
            let req = FitRequest {
                line_limit: 0,
                ..request("abcdefghij", position)
            };
            assert_eq!(fit(&req, &oracle), FitResult::unchanged("abcdefghij"));
        }
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn single_grapheme_middle_split() {
        let result = fit(&request("x", EllipsisPosition::Middle), &|s: &str| {
            Metrics::new(if s == "x" { 2 } else { 1 }, s.len())
        });
        assert_eq!(result.display_text, "x...");
    }

    #[test]
    fn never_splits_graphemes() {
        let text = "你好👨\u{200D}👩\u{200D}👧世界cafe\u{0301}";
        for position in [EllipsisPosition::End, EllipsisPosition::Middle] {
            let req = FitRequest {
                ellipsis: Some("…".to_string()),
                ..request(text, position)
            };
            let result = fit(&req, &lines_by_len(4));
            let (before, marker, after) = result.parts();
            assert_eq!(marker, "…");
            assert!(text.starts_with(before));
            assert!(text.ends_with(after));
            assert!(result.display_text.graphemes(true).count() <= 4);
        }
    }

    #[test]
    fn empty_marker_truncates_plainly() {
        let req = FitRequest {
            ellipsis: Some(String::new()),
            ..request("abcdefghij", EllipsisPosition::End)
        };
        let result = fit(&req, &lines_by_len(4));
        assert_eq!(result.display_text, "abcd");
        assert!(result.ellipsis.is_some_and(|span| span.is_empty()));
    }

    #[test]
    fn works_through_trait_objects() {
        let oracle = lines_by_len(6);
        let dyn_oracle: &dyn Measure = &oracle;
        let result = fit(&request("abcdefghij", EllipsisPosition::End), dyn_oracle);
        assert_eq!(result.display_text, "abc...");
    }
}
