//! # spark-ellipsis
//!
//! Line-limited text truncation for terminal UIs.
//!
//! Given a text, an ellipsis marker and a line limit, the fitter shrinks the
//! text one grapheme at a time until the layout engine reports that it fits,
//! placing the marker at the end or in the middle. The layout engine is an
//! injected oracle, so the same fitter works against the built-in terminal
//! cell measurer or any host layout.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for the
//! reactive component that refits whenever its text, width or settings change.
//!
//! ## Architecture
//!
//! ```text
//! EllipsisConfig (YAML) ──validate──► EllipsisSettings
//!                                           │
//! content / width signals ──► EllipsisText (derived) ──► fit ◄──► CellMeasure
//!                                           │
//!                                           ▼
//!                                 StyledFit ──► renderer::ansi
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Colors, attributes and the ellipsis policy enums
//! - [`layout`] - The fitter, the measurement oracle and text wrapping
//! - [`primitives`] - The reactive [`EllipsisText`] component
//! - [`renderer`] - ANSI output for fitted text
//! - [`config`] - YAML settings and validation
//! - [`error`] - Configuration errors

pub mod config;
pub mod error;
pub mod layout;
pub mod primitives;
pub mod renderer;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{EllipsisConfig, EllipsisSettings};
pub use error::ConfigError;

pub use layout::{
    fit, measure_text, string_width, wrap_lines, CellMeasure, EllipsisSpan, FitOutcome,
    FitRequest, FitResult, Measure, Metrics,
};

pub use primitives::{EllipsisText, EllipsisTextProps, PropValue, StyleSpan, StyledFit};

pub use renderer::write_styled;
