use std::cell::Cell;

use rstest::rstest;
use unicode_segmentation::UnicodeSegmentation;

use spark_ellipsis::{
    fit, CellMeasure, EllipsisPosition, FitOutcome, FitRequest, FitResult, Measure, Metrics,
    ShortCircuit, WrapMode,
};

fn request(source: &str, ellipsis: &str, position: EllipsisPosition, limit: usize) -> FitRequest {
    FitRequest {
        source_text: source.to_string(),
        ellipsis: Some(ellipsis.to_string()),
        position,
        line_limit: limit,
        ..Default::default()
    }
}

fn graphemes(s: &str) -> Vec<&str> {
    s.graphemes(true).collect()
}

/// One line up to `fits` graphemes, two lines beyond.
fn lines_by_len(fits: usize) -> impl Fn(&str) -> Metrics {
    move |s: &str| {
        let len = s.graphemes(true).count();
        Metrics::new(if len > fits { 2 } else { 1 }, len)
    }
}

// =============================================================================
// Worked examples
// =============================================================================

#[test]
fn end_example_from_a_six_grapheme_line() {
    let result = fit(
        &request("abcdefghij", "...", EllipsisPosition::End, 1),
        &lines_by_len(6),
    );
    assert_eq!(result.display_text, "abc...");
    assert_eq!(result.ellipsis.map(|s| s.range()), Some(3..6));
    assert_eq!(result.outcome, FitOutcome::Truncated);
}

#[test]
fn middle_example_trims_left_first() {
    let result = fit(
        &request("abcdefghij", "...", EllipsisPosition::Middle, 1),
        &lines_by_len(8),
    );
    assert_eq!(result.display_text, "abc...ij");
    assert_eq!(result.parts(), ("abc", "...", "ij"));
}

#[rstest]
#[case::sentence_end(
    "The quick brown fox jumps over the lazy dog", 20, 1, EllipsisPosition::End,
    "The quick brown fox…"
)]
#[case::sentence_two_lines(
    "The quick brown fox jumps over the lazy dog", 20, 2, EllipsisPosition::End,
    "The quick brown fox jumps over the lazy…"
)]
#[case::sentence_middle(
    "The quick brown fox jumps over the lazy dog", 20, 1, EllipsisPosition::Middle,
    "The quick … lazy dog"
)]
#[case::wide_chars("你好世界你好世界", 10, 1, EllipsisPosition::End, "你好世界…")]
#[case::flags("🇯🇵🇯🇵🇯🇵🇯🇵", 5, 1, EllipsisPosition::End, "🇯🇵🇯🇵…")]
#[case::already_fits("short", 10, 1, EllipsisPosition::Middle, "short")]
fn char_wrapped_cells(
    #[case] source: &str,
    #[case] width: usize,
    #[case] limit: usize,
    #[case] position: EllipsisPosition,
    #[case] expected: &str,
) {
    let oracle = CellMeasure::new(width, WrapMode::Char);
    let result = fit(&request(source, "…", position, limit), &oracle);
    assert_eq!(result.display_text, expected);
}

#[test]
fn word_wrap_keeps_marker_on_the_last_line() {
    let oracle = CellMeasure::new(12, WrapMode::Word);
    let result = fit(
        &request("The quick brown fox jumps over the lazy dog", "…", EllipsisPosition::End, 2),
        &oracle,
    );
    assert_eq!(result.display_text, "The quick brown fox j…");
    assert_eq!(oracle.measure(&result.display_text).line_count, 2);
}

// =============================================================================
// Properties
// =============================================================================

const SOURCES: [&str; 5] = [
    "abcdefghijklmnopqrstuvwxyz",
    "The quick brown fox jumps over the lazy dog",
    "日本語のテキストを省略します",
    "e\u{301}e\u{301}e\u{301}e\u{301}e\u{301}e\u{301}e\u{301}e\u{301}\
     e\u{301}e\u{301}e\u{301}e\u{301}e\u{301}e\u{301}e\u{301}e\u{301}",
    "👨‍👩‍👧 family 👨‍👩‍👧 family",
];

fn cells() -> CellMeasure {
    CellMeasure::new(7, WrapMode::Char)
}

#[rstest]
fn fitted_text_fits(
    #[values(0, 1, 2, 3, 4)] source: usize,
    #[values(EllipsisPosition::End, EllipsisPosition::Middle)] position: EllipsisPosition,
    #[values(1, 2, 3)] limit: usize,
) {
    let result = fit(&request(SOURCES[source], "…", position, limit), &cells());
    assert!(cells().measure(&result.display_text).line_count <= limit);
    assert_ne!(result.outcome, FitOutcome::Overflow);
}

#[rstest]
fn unchanged_when_source_fits(
    #[values(EllipsisPosition::End, EllipsisPosition::Middle)] position: EllipsisPosition,
) {
    let source = SOURCES[0];
    let result = fit(&request(source, "…", position, 4), &cells());
    assert_eq!(result, FitResult::unchanged(source));
    assert!(result.ellipsis.is_none());
}

#[rstest]
fn end_keeps_the_longest_fitting_prefix(
    #[values(0, 1, 2, 3, 4)] source: usize,
    #[values(1, 2)] limit: usize,
) {
    let source = SOURCES[source];
    let result = fit(&request(source, "…", EllipsisPosition::End, limit), &cells());
    assert_eq!(result.outcome, FitOutcome::Truncated);

    let (before, marker, after) = result.parts();
    assert_eq!(marker, "…");
    assert!(after.is_empty());
    assert!(result.display_text.ends_with('…'));

    let all = graphemes(source);
    let kept = graphemes(before);
    assert_eq!(&all[..kept.len()], &kept[..]);

    let one_more = format!("{}…", all[..=kept.len()].concat());
    assert!(cells().measure(&one_more).line_count > limit);
}

#[rstest]
fn middle_keeps_prefix_and_suffix_in_order(
    #[values(0, 1, 2, 3, 4)] source: usize,
    #[values(1, 2)] limit: usize,
) {
    let source = SOURCES[source];
    let result = fit(&request(source, "…", EllipsisPosition::Middle, limit), &cells());
    let span = result.ellipsis.expect("truncated");
    let (before, marker, after) = result.parts();

    assert_eq!(marker, "…");
    assert_eq!(&result.display_text[span.range()], "…");
    assert_eq!(result.ellipsis_text(), Some("…"));
    assert!(source.starts_with(before));
    assert!(source.ends_with(after));
    assert!(before.len() + after.len() < source.len());

    let all = graphemes(source);
    assert_eq!(&all[..graphemes(before).len()], &graphemes(before)[..]);
    assert_eq!(&all[all.len() - graphemes(after).len()..], &graphemes(after)[..]);
}

#[rstest]
fn fitting_twice_changes_nothing(
    #[values(0, 1, 2, 3, 4)] source: usize,
    #[values(EllipsisPosition::End, EllipsisPosition::Middle)] position: EllipsisPosition,
) {
    let first = fit(&request(SOURCES[source], "…", position, 2), &cells());
    let second = fit(&request(&first.display_text, "…", position, 2), &cells());
    assert_eq!(second.display_text, first.display_text);
    assert_eq!(second.outcome, FitOutcome::Unchanged);
}

#[rstest]
fn identical_requests_give_identical_results(
    #[values(0, 1, 2, 3, 4)] source: usize,
    #[values(EllipsisPosition::End, EllipsisPosition::Middle)] position: EllipsisPosition,
    #[values(1, 2, 3)] limit: usize,
) {
    let req = request(SOURCES[source], "…", position, limit);
    assert_eq!(fit(&req, &cells()), fit(&req, &cells()));
    assert_eq!(fit(&req, &lines_by_len(8)), fit(&req, &lines_by_len(8)));
}

#[rstest]
fn larger_limit_never_shortens(
    #[values(0, 1, 2, 3, 4)] source: usize,
    #[values(EllipsisPosition::End, EllipsisPosition::Middle)] position: EllipsisPosition,
) {
    let source = SOURCES[source];
    let mut previous = 0;
    for limit in 1..=5 {
        let result = fit(&request(source, "…", position, limit), &cells());
        let kept = graphemes(&result.display_text).len();
        assert!(kept >= previous, "limit {limit} kept {kept} < {previous}");
        previous = kept;
    }
}

// =============================================================================
// Edge cases
// =============================================================================

#[rstest]
fn ellipsis_too_wide_overflows(
    #[values(EllipsisPosition::End, EllipsisPosition::Middle)] position: EllipsisPosition,
) {
    let oracle = CellMeasure::new(5, WrapMode::Char);
    let result = fit(&request("abcdefghij", "[truncated]", position, 1), &oracle);
    assert_eq!(result.outcome, FitOutcome::Overflow);
    assert_eq!(result.display_text, "[truncated]");
    assert_eq!(result.ellipsis.map(|s| s.range()), Some(0..11));
}

#[rstest]
fn measurements_are_bounded(
    #[values(EllipsisPosition::End, EllipsisPosition::Middle)] position: EllipsisPosition,
    #[values(None, Some(9))] laid_out: Option<usize>,
) {
    let calls = Cell::new(0);
    let never_fits = |s: &str| {
        calls.set(calls.get() + 1);
        Metrics::new(99, s.len())
    };
    let mut req = request("abcdefghij", "...", position, 1);
    req.laid_out_lines = laid_out;

    let result = fit(&req, &never_fits);
    assert_eq!(result.outcome, FitOutcome::Overflow);
    let initial = usize::from(laid_out.is_none());
    assert_eq!(calls.get(), initial + 11);
}

#[test]
fn below_limit_policy_truncates_an_exact_fill() {
    let oracle = CellMeasure::new(5, WrapMode::Char);
    let mut req = request("abcdefghij", "…", EllipsisPosition::End, 2);
    assert_eq!(fit(&req, &oracle).outcome, FitOutcome::Unchanged);

    req.short_circuit = ShortCircuit::BelowLimit;
    let result = fit(&req, &oracle);
    assert_eq!(result.display_text, "abcdefghi…");
    assert_eq!(result.outcome, FitOutcome::Truncated);
}

#[test]
fn missing_ellipsis_leaves_text_alone() {
    let req = FitRequest {
        source_text: "abcdefghij".to_string(),
        ..Default::default()
    };
    assert_eq!(fit(&req, &lines_by_len(2)), FitResult::unchanged("abcdefghij"));
}

#[rstest]
fn zero_limit_leaves_text_alone(
    #[values(EllipsisPosition::End, EllipsisPosition::Middle)] position: EllipsisPosition,
) {
    let oracle = CellMeasure::new(5, WrapMode::Char);
    let result = fit(&request("abcdefghij", "...", position, 0), &oracle);
    assert_eq!(result, FitResult::unchanged("abcdefghij"));
}
