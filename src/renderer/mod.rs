//! Terminal output for fitted text.

pub mod ansi;

pub use ansi::write_styled;
