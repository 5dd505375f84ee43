//! Primitives - Components built on the fitter.
//!
//! - [`EllipsisText`] - text that shrinks to a line limit and refits when
//!   any of its props or settings change
//!
//! # Reactivity
//!
//! Props can be:
//! - Static values: `width: 40usize.into()` (lifted into a signal so setters work)
//! - Signals: `width: width_signal.into()` (stays connected)
//! - Getters: `PropValue::Getter(Rc::new(|| compute_width()))`
//!
//! Pass signals through as-is. Reading one with `.get()` before building the
//! props freezes the value and the component stops tracking it.

mod ellipsis_text;
mod types;

pub use ellipsis_text::EllipsisText;
pub use types::{EllipsisTextProps, PropValue, StyleSpan, StyledFit};
