//! Slider configuration — defaults, TOML loading, validation.
//!
//! Programmatic construction accepts any values and lets the range inputs
//! sanitize them. Configuration read from outside the program goes through
//! [`SliderConfig::validate`] so typos fail loudly instead of rendering a
//! degenerate slider.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Domain, step and initial handle values of one slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SliderConfig {
    pub minimum: f64,
    pub maximum: f64,
    pub step: f64,
    pub initial_low: f64,
    pub initial_high: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            minimum: 0.0,
            maximum: 100.0,
            step: 1.0,
            initial_low: 25.0,
            initial_high: 75.0,
        }
    }
}

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("minimum ({minimum}) must be less than maximum ({maximum})")]
    EmptyRange { minimum: f64, maximum: f64 },
    #[error("step must be greater than zero, got {0}")]
    InvalidStep(f64),
    #[error("{field} ({value}) is outside [{minimum}, {maximum}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        minimum: f64,
        maximum: f64,
    },
}

impl SliderConfig {
    /// Parse a configuration from a TOML string. Missing keys take defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the invariants a well-formed slider needs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("minimum", self.minimum),
            ("maximum", self.maximum),
            ("step", self.step),
            ("initial_low", self.initial_low),
            ("initial_high", self.initial_high),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        if self.minimum >= self.maximum {
            return Err(ConfigError::EmptyRange {
                minimum: self.minimum,
                maximum: self.maximum,
            });
        }
        if self.step <= 0.0 {
            return Err(ConfigError::InvalidStep(self.step));
        }
        for (field, value) in [
            ("initial_low", self.initial_low),
            ("initial_high", self.initial_high),
        ] {
            if value < self.minimum || value > self.maximum {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    minimum: self.minimum,
                    maximum: self.maximum,
                });
            }
        }
        Ok(())
    }

    pub fn range(&self) -> f64 {
        self.maximum - self.minimum
    }
}
