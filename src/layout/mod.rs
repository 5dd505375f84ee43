//! Layout Module
//!
//! Ellipsis fitting and the terminal text measurement it runs against.
//!
//! # Architecture
//!
//! ```text
//! FitRequest ──► ellipsis::fit ──candidate──► Measure (oracle) ──► Metrics
//!                      ▲                            │
//!                      └────────── line count ──────┘
//! ```
//!
//! The fitter owns no layout knowledge. [`CellMeasure`] wraps candidates on a
//! terminal cell grid via [`text_measure`]; any closure returning [`Metrics`]
//! works as well.
//!
//! # Example
//!
//! ```
//! use spark_ellipsis::layout::{fit, CellMeasure, FitRequest};
//! use spark_ellipsis::types::WrapMode;
//!
//! let request = FitRequest::new("The quick brown fox jumps over the lazy dog", "…");
//! let result = fit(&request, &CellMeasure::new(20, WrapMode::Char));
//! assert_eq!(result.display_text, "The quick brown fox…");
//! ```

pub mod ellipsis;
pub mod oracle;
pub mod text_measure;

pub use ellipsis::{fit, EllipsisSpan, FitOutcome, FitRequest, FitResult};
pub use oracle::{CellMeasure, Measure};
pub use text_measure::{measure_text, string_width, wrap_lines, wrap_ranges, Metrics};
