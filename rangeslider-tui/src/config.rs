//! Host configuration — TOML file plus command-line overrides.
//!
//! ```toml
//! mount = "#range"
//! label = "Price"
//!
//! [slider]
//! minimum = 0.0
//! maximum = 500.0
//! step = 5.0
//! initial_low = 100.0
//! initial_high = 250.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use rangeslider_core::{ConfigError, SliderConfig};

/// Selector of the slot the host document provides.
pub const DEFAULT_MOUNT: &str = "#range";

/// Everything the terminal host needs to build its document and slider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Selector the slider mounts under.
    pub mount: String,
    /// Panel title.
    pub label: String,
    pub slider: SliderConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            mount: DEFAULT_MOUNT.to_string(),
            label: "Range".to_string(),
            slider: SliderConfig::default(),
        }
    }
}

/// Per-field overrides from the command line.
#[derive(Debug, Clone, Default)]
pub struct SliderOverrides {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub step: Option<f64>,
    pub low: Option<f64>,
    pub high: Option<f64>,
    pub label: Option<String>,
}

impl HostConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// `<config dir>/rangeslider/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rangeslider").join("config.toml"))
    }

    /// Load an explicitly requested file, or the default file if it exists.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn apply_overrides(&mut self, overrides: &SliderOverrides) {
        let slider = &mut self.slider;
        if let Some(v) = overrides.minimum {
            slider.minimum = v;
        }
        if let Some(v) = overrides.maximum {
            slider.maximum = v;
        }
        if let Some(v) = overrides.step {
            slider.step = v;
        }
        if let Some(v) = overrides.low {
            slider.initial_low = v;
        }
        if let Some(v) = overrides.high {
            slider.initial_high = v;
        }
        if let Some(label) = &overrides.label {
            self.label = label.clone();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.slider.validate()
    }
}
