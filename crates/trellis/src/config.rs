//! Configuration types for Trellis conversions.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from external
//! sources; every field has a default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining conversion and output settings.
//! - [`ConvertConfig`] - Settings that change how source documents are converted.
//! - [`OutputConfig`] - Settings for writing converted documents.
//!
//! # Example
//!
//! ```
//! # use trellis::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.convert().screen_dpi(), 96.0);
//! assert!(config.output().pretty());
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::TrellisError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Conversion section.
    #[serde(default)]
    convert: ConvertConfig,

    /// Output section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(convert: ConvertConfig, output: OutputConfig) -> Self {
        Self { convert, output }
    }

    /// Returns the conversion configuration.
    pub fn convert(&self) -> &ConvertConfig {
        &self.convert
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Checks values serde cannot validate.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Config`] for a non-positive or non-finite screen resolution.
    pub fn validate(&self) -> Result<(), TrellisError> {
        let dpi = self.convert.screen_dpi;
        if !dpi.is_finite() || dpi <= 0.0 {
            return Err(TrellisError::Config(format!(
                "screen_dpi must be a positive number, got {dpi}"
            )));
        }
        Ok(())
    }
}

fn default_screen_dpi() -> f64 {
    96.0
}

/// Settings that change how documents are converted.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    /// Resolution used to turn physical lengths into device pixels.
    #[serde(default = "default_screen_dpi")]
    screen_dpi: f64,

    /// Directory relative image file names are resolved against.
    ///
    /// Defaults to the working directory.
    #[serde(default)]
    image_base_dir: Option<PathBuf>,

    /// Whether nodes on hidden layers are converted.
    #[serde(default)]
    include_hidden_layers: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            screen_dpi: default_screen_dpi(),
            image_base_dir: None,
            include_hidden_layers: false,
        }
    }
}

impl ConvertConfig {
    pub fn with_screen_dpi(mut self, dpi: f64) -> Self {
        self.screen_dpi = dpi;
        self
    }

    pub fn with_image_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_base_dir = Some(dir.into());
        self
    }

    pub fn with_include_hidden_layers(mut self, include: bool) -> Self {
        self.include_hidden_layers = include;
        self
    }

    /// Returns the screen resolution in dots per inch.
    pub fn screen_dpi(&self) -> f64 {
        self.screen_dpi
    }

    /// Returns the configured image directory, if any.
    pub fn image_base_dir(&self) -> Option<&Path> {
        self.image_base_dir.as_deref()
    }

    /// Returns whether hidden layers are converted.
    pub fn include_hidden_layers(&self) -> bool {
        self.include_hidden_layers
    }
}

fn default_pretty() -> bool {
    true
}

/// Settings for writing converted documents.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Indent the JSON output.
    #[serde(default = "default_pretty")]
    pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
        }
    }
}

impl OutputConfig {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Returns whether output is indented.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}
