//! Error types.
//!
//! Fitting itself cannot fail: bad inputs fall back to the unmodified
//! text. Only reading and validating configuration can.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("limit_lines must be at least 1, got {0}")]
    InvalidLineLimit(usize),
    #[error("unrecognized color {0:?}")]
    InvalidColor(String),
    #[error("unknown text attribute {0:?}")]
    UnknownAttr(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
