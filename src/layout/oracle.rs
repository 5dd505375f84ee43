//! Measurement oracles.
//!
//! The fitter never lays text out itself. It asks a [`Measure`] how many
//! lines a candidate string occupies, under a layout context (box width,
//! wrap rules, font) that the oracle owns.
//!
//! Any `Fn(&str) -> Metrics` is an oracle, which keeps tests and foreign
//! layout engines cheap to plug in. [`CellMeasure`] is the terminal one.

use super::text_measure::{measure_text, Metrics};
use crate::types::WrapMode;

/// Reports the size a candidate string would occupy.
///
/// Implementations must be deterministic for a fixed layout context, and the
/// line count must not decrease as a candidate grows by concatenation. The
/// fitter bounds its work either way, but only gives minimal results when
/// this holds.
pub trait Measure {
    fn measure(&self, candidate: &str) -> Metrics;
}

impl<F> Measure for F
where
    F: Fn(&str) -> Metrics,
{
    #[inline]
    fn measure(&self, candidate: &str) -> Metrics {
        self(candidate)
    }
}

/// Terminal measurement: wraps candidates at `max_width` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMeasure {
    pub max_width: usize,
    pub wrap: WrapMode,
}

impl CellMeasure {
    pub const fn new(max_width: usize, wrap: WrapMode) -> Self {
        Self { max_width, wrap }
    }
}

impl Measure for CellMeasure {
    fn measure(&self, candidate: &str) -> Metrics {
        measure_text(candidate, self.max_width, self.wrap)
    }
}
