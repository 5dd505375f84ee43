//! Primitive types - Props and styled output.
//!
//! Props support static values, signals, and getters for reactivity.

use std::ops::Range;
use std::rc::Rc;

use spark_signals::Signal;

use crate::config::EllipsisSettings;
use crate::layout::FitResult;
use crate::types::{Attr, EllipsisStyle, Rgba};

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// Reading a `Signal` or calling a `Getter` inside a derived creates a
/// dependency, so the derived re-runs when the source changes.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal (changes propagate automatically).
    Signal(Signal<T>),
    /// Getter function (called each time value is needed).
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value (for immediate reads).
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(v) => v.clone(),
            PropValue::Signal(s) => s.get(),
            PropValue::Getter(f) => f(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

impl From<&str> for PropValue<String> {
    fn from(value: &str) -> Self {
        PropValue::Static(value.to_string())
    }
}

// =============================================================================
// Ellipsis Text Props
// =============================================================================

/// Properties for [`EllipsisText`](super::EllipsisText).
///
/// # Example
///
/// ```ignore
/// use spark_ellipsis::primitives::{EllipsisText, EllipsisTextProps};
/// use spark_signals::signal;
///
/// let width = signal(40usize);
/// let label = EllipsisText::new(EllipsisTextProps {
///     content: "a long status line".into(),
///     width: width.clone().into(),
///     ..Default::default()
/// });
///
/// width.set(12); // label refits on next read
/// ```
#[derive(Clone, Default)]
pub struct EllipsisTextProps {
    /// The full, untruncated text.
    pub content: PropValue<String>,
    /// Box width in terminal cells. `0` disables soft wrapping.
    pub width: PropValue<usize>,
    /// Initial ellipsis settings. Each one gets its own setter afterwards.
    pub settings: EllipsisSettings,
}

// =============================================================================
// Styled output
// =============================================================================

/// Styling for a byte range of a fitted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSpan {
    pub range: Range<usize>,
    pub fg: Rgba,
    pub attrs: Attr,
    /// Glyph size for hosts that support it.
    pub size: Option<u16>,
}

impl StyleSpan {
    /// True when painting with this style changes nothing on a terminal.
    pub fn is_plain(&self) -> bool {
        self.fg.is_terminal_default() && self.attrs.is_empty()
    }
}

/// A fit plus the span the host should paint differently.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledFit {
    pub fit: FitResult,
    pub ellipsis: Option<StyleSpan>,
}

impl StyledFit {
    pub fn new(fit: FitResult, style: &EllipsisStyle) -> Self {
        let ellipsis = fit.ellipsis.filter(|span| !span.is_empty()).map(|span| StyleSpan {
            range: span.range(),
            fg: style.fg,
            attrs: style.attrs,
            size: style.size,
        });
        Self { fit, ellipsis }
    }

    pub fn text(&self) -> &str {
        &self.fit.display_text
    }
}
