//! Ellipsis Text - Text that shrinks to a line limit.
//!
//! Binds the pure fitter to reactive state. Every setting lives in a signal
//! and the fit is a derived over them, so changing any setting invalidates
//! the memoized result and the next read refits. Reads without changes are
//! served from the derived.
//!
//! ```text
//! content ─┐
//! width ───┤
//! ellipsis ┤
//! position ┼──► fitted (derived) ──► rendered() ──► ANSI / host spans
//! limit ───┤                            ▲
//! wrap ────┘                 style ─────┘
//! ```
//!
//! Style changes do not refit: they only affect how the span is painted.

use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;

use spark_signals::{derived, signal, Signal};
use tracing::debug;

use super::types::{EllipsisTextProps, PropValue, StyledFit};
use crate::config::EllipsisSettings;
use crate::layout::{fit, CellMeasure, FitRequest, FitResult};
use crate::renderer::write_styled;
use crate::types::{EllipsisPosition, EllipsisStyle, ShortCircuit, WrapMode};

/// Reactive ellipsis text component.
pub struct EllipsisText {
    content: PropValue<String>,
    width: PropValue<usize>,
    ellipsis: Signal<Option<String>>,
    position: Signal<EllipsisPosition>,
    limit_lines: Signal<usize>,
    wrap: Signal<WrapMode>,
    short_circuit: Signal<ShortCircuit>,
    style: Signal<EllipsisStyle>,
    fitted: Rc<dyn Fn() -> FitResult>,
    passes: Rc<Cell<u64>>,
}

impl EllipsisText {
    /// Create the component. Static content and width are lifted into
    /// signals so `set_text`/`set_width` can drive them later.
    pub fn new(props: EllipsisTextProps) -> Self {
        let content = lift(props.content);
        let width = lift(props.width);
        let settings = props.settings;

        let ellipsis = signal(settings.ellipsis);
        let position = signal(settings.position);
        let limit_lines = signal(settings.limit_lines);
        let wrap = signal(settings.wrap);
        let short_circuit = signal(settings.short_circuit);
        let style = signal(settings.style);
        let passes = Rc::new(Cell::new(0u64));

        let fitted = {
            let content = content.clone();
            let width = width.clone();
            let ellipsis = ellipsis.clone();
            let position = position.clone();
            let limit_lines = limit_lines.clone();
            let wrap = wrap.clone();
            let short_circuit = short_circuit.clone();
            let passes = passes.clone();

            let fit_derived = derived(move || {
                // Reading each signal registers it as a dependency.
                let request = FitRequest {
                    source_text: content.get(),
                    ellipsis: ellipsis.get(),
                    position: position.get(),
                    line_limit: limit_lines.get(),
                    short_circuit: short_circuit.get(),
                    laid_out_lines: None,
                };
                let oracle = CellMeasure::new(width.get(), wrap.get());

                passes.set(passes.get() + 1);
                debug!(pass = passes.get(), width = oracle.max_width, "layout pass");
                fit(&request, &oracle)
            });

            Rc::new(move || fit_derived.get()) as Rc<dyn Fn() -> FitResult>
        };

        Self {
            content,
            width,
            ellipsis,
            position,
            limit_lines,
            wrap,
            short_circuit,
            style,
            fitted,
            passes,
        }
    }

    /// Convenience constructor for static content at a fixed width.
    pub fn with_settings(content: impl Into<String>, width: usize, settings: EllipsisSettings) -> Self {
        Self::new(EllipsisTextProps {
            content: PropValue::Static(content.into()),
            width: PropValue::Static(width),
            settings,
        })
    }

    // -------------------------------------------------------------------------
    // Setters
    // -------------------------------------------------------------------------

    /// Replace the source text. Ignored when content is bound to a getter.
    pub fn set_text(&self, text: impl Into<String>) {
        set_prop(&self.content, text.into(), "content");
    }

    /// Replace the box width. Ignored when width is bound to a getter.
    pub fn set_width(&self, width: usize) {
        set_prop(&self.width, width, "width");
    }

    /// `None` turns truncation off.
    pub fn set_ellipsis(&self, ellipsis: Option<&str>) {
        self.ellipsis.set(ellipsis.map(str::to_string));
    }

    pub fn set_position(&self, position: EllipsisPosition) {
        self.position.set(position);
    }

    pub fn set_limit_lines(&self, limit_lines: usize) {
        self.limit_lines.set(limit_lines);
    }

    pub fn set_wrap(&self, wrap: WrapMode) {
        self.wrap.set(wrap);
    }

    pub fn set_short_circuit(&self, short_circuit: ShortCircuit) {
        self.short_circuit.set(short_circuit);
    }

    /// Color, attributes and size of the ellipsis span. Does not refit.
    pub fn set_ellipsis_style(&self, style: EllipsisStyle) {
        self.style.set(style);
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Current fit, recomputed only if a setting changed since the last read.
    pub fn fitted(&self) -> FitResult {
        (self.fitted)()
    }

    /// Current fit together with the ellipsis style span.
    pub fn rendered(&self) -> StyledFit {
        StyledFit::new(self.fitted(), &self.style.get())
    }

    /// Current settings, as the setters left them.
    pub fn settings(&self) -> EllipsisSettings {
        EllipsisSettings {
            ellipsis: self.ellipsis.get(),
            position: self.position.get(),
            limit_lines: self.limit_lines.get(),
            style: self.style.get(),
            wrap: self.wrap.get(),
            short_circuit: self.short_circuit.get(),
        }
    }

    /// Number of times the fitter has run for this component.
    pub fn layout_passes(&self) -> u64 {
        self.passes.get()
    }

    /// Write the fitted text, wrapped the way it was measured.
    pub fn write_to<W: Write>(&self, w: &mut W, color: bool) -> io::Result<()> {
        write_styled(w, &self.rendered(), self.width.get(), self.wrap.get(), color)
    }
}

fn lift<T: Clone + PartialEq + 'static>(prop: PropValue<T>) -> PropValue<T> {
    match prop {
        PropValue::Static(v) => PropValue::Signal(signal(v)),
        other => other,
    }
}

fn set_prop<T: Clone + PartialEq + 'static>(prop: &PropValue<T>, value: T, name: &str) {
    match prop {
        PropValue::Signal(s) => {
            s.set(value);
        }
        _ => debug!(prop = name, "prop is bound to a getter, ignoring set"),
    }
}

// =============================================================================
// Tests
// =============================================================================
