//! Ellipsis configuration.
//!
//! [`EllipsisConfig`] is the raw, deserialized form (YAML, every key
//! optional). [`EllipsisConfig::validate`] turns it into typed
//! [`EllipsisSettings`], which is what the adapter and the CLI consume.
//!
//! ```yaml
//! ellipsis: "…"
//! position: middle
//! limit_lines: 2
//! color: "#808080"
//! attrs: [dim]
//! wrap: word
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::layout::FitRequest;
use crate::types::{Attr, EllipsisPosition, EllipsisStyle, Rgba, ShortCircuit, WrapMode};

pub const DEFAULT_LIMIT_LINES: usize = 1;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EllipsisConfig {
    /// Marker text. Absent or `null` disables truncation.
    pub ellipsis: Option<String>,
    pub position: EllipsisPosition,
    pub limit_lines: usize,
    pub color: Option<String>,
    pub attrs: Vec<String>,
    pub size: Option<u16>,
    pub wrap: WrapMode,
    pub short_circuit: ShortCircuit,
}

impl Default for EllipsisConfig {
    fn default() -> Self {
        Self {
            ellipsis: None,
            position: EllipsisPosition::End,
            limit_lines: DEFAULT_LIMIT_LINES,
            color: None,
            attrs: Vec::new(),
            size: None,
            wrap: WrapMode::Char,
            short_circuit: ShortCircuit::default(),
        }
    }
}

impl EllipsisConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&yaml)?;
        debug!(path = %path.display(), ?config, "loaded ellipsis config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<EllipsisSettings, ConfigError> {
        if self.limit_lines < 1 {
            return Err(ConfigError::InvalidLineLimit(self.limit_lines));
        }

        let fg = match self.color.as_deref() {
            Some(color) => {
                Rgba::parse(color).ok_or_else(|| ConfigError::InvalidColor(color.to_string()))?
            }
            None => Rgba::TERMINAL_DEFAULT,
        };

        let attrs = self.attrs.iter().try_fold(Attr::NONE, |acc, name| {
            Attr::from_config_name(name)
                .map(|attr| acc | attr)
                .ok_or_else(|| ConfigError::UnknownAttr(name.clone()))
        })?;

        Ok(EllipsisSettings {
            ellipsis: self.ellipsis.clone(),
            position: self.position,
            limit_lines: self.limit_lines,
            style: EllipsisStyle {
                fg,
                attrs,
                size: self.size,
            },
            wrap: self.wrap,
            short_circuit: self.short_circuit,
        })
    }
}

/// Validated ellipsis configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipsisSettings {
    pub ellipsis: Option<String>,
    pub position: EllipsisPosition,
    pub limit_lines: usize,
    pub style: EllipsisStyle,
    pub wrap: WrapMode,
    pub short_circuit: ShortCircuit,
}

impl Default for EllipsisSettings {
    fn default() -> Self {
        Self {
            ellipsis: None,
            position: EllipsisPosition::End,
            limit_lines: DEFAULT_LIMIT_LINES,
            style: EllipsisStyle::default(),
            wrap: WrapMode::Char,
            short_circuit: ShortCircuit::default(),
        }
    }
}

impl EllipsisSettings {
    /// Fit request for `source` under these settings.
    pub fn request(&self, source: impl Into<String>) -> FitRequest {
        FitRequest {
            source_text: source.into(),
            ellipsis: self.ellipsis.clone(),
            position: self.position,
            line_limit: self.limit_lines,
            short_circuit: self.short_circuit,
            laid_out_lines: None,
        }
    }
}
