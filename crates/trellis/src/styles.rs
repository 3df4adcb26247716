//! Translation of source style attributes into target attributes.
//!
//! Each translator is a pure lookup from a source style value to its target
//! counterpart. Source styles are sparse: a node defines only what differs from
//! its ancestors, so lookups go through a [`StyleChain`].
//!
//! # Organization
//!
//! - [`fill`] - Color, gradient, image and hatch fills
//! - [`stroke`] - Stroke color, width and dash patterns
//! - [`arrowhead`] - Arrowhead shapes and sizes
//! - [`text`] - Font, alignment and text position
//! - [`interactivity`] - Tooltips and cursors
//! - [`units`] - Length conversions

pub mod arrowhead;
pub mod fill;
pub mod interactivity;
pub mod stroke;
pub mod text;
pub mod units;

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use trellis_core::source::{
    ArrowheadStyle, FillStyle, InteractivityStyle, StrokeStyle, StyleSheet, TextStyle,
};

use crate::{config::ConvertConfig, error::DiagnosticCode};

/// A style value that could not be translated.
#[derive(Debug, Error)]
pub enum StyleError {
    #[error("failed to read image `{}`", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("image fill has neither a file name nor embedded image data")]
    MissingImage,

    #[error("{0} fills have no counterpart")]
    UnsupportedFill(&'static str),
}

impl StyleError {
    /// The diagnostic code reported when a fill is dropped because of this error.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            StyleError::ImageLoad { .. } | StyleError::MissingImage => DiagnosticCode::W300,
            StyleError::UnsupportedFill(_) => DiagnosticCode::W301,
        }
    }
}

/// Settings the translators read.
#[derive(Debug, Clone)]
pub struct StyleContext {
    dpi: f64,
    image_base_dir: Option<PathBuf>,
}

impl StyleContext {
    pub fn new(dpi: f64) -> Self {
        Self {
            dpi,
            image_base_dir: None,
        }
    }

    pub fn with_image_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.image_base_dir = Some(dir.into());
        self
    }

    pub fn from_config(config: &ConvertConfig) -> Self {
        Self {
            dpi: config.screen_dpi(),
            image_base_dir: config.image_base_dir().map(Path::to_path_buf),
        }
    }

    /// Screen resolution lengths are converted with.
    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Resolves a relative image path against the image directory, or the
    /// working directory when none is configured.
    pub fn resolve_image_path(&self, path: &Path) -> Result<PathBuf, StyleError> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let base = match &self.image_base_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|source| StyleError::ImageLoad {
                path: path.to_path_buf(),
                source,
            })?,
        };
        Ok(base.join(path))
    }
}

/// The style sheets that apply to a node, nearest first.
///
/// Each attribute resolves to the first sheet in the chain that defines it.
/// The last sheet is normally the document style sheet, which defines
/// everything.
#[derive(Debug, Clone, Default)]
pub struct StyleChain<'a> {
    sheets: Vec<&'a StyleSheet>,
}

impl<'a> StyleChain<'a> {
    /// A chain ending at `root`.
    pub fn new(root: &'a StyleSheet) -> Self {
        Self { sheets: vec![root] }
    }

    /// Returns a chain with `sheet` in front of the current sheets.
    pub fn push(&self, sheet: &'a StyleSheet) -> Self {
        let mut sheets = Vec::with_capacity(self.sheets.len() + 1);
        sheets.push(sheet);
        sheets.extend_from_slice(&self.sheets);
        Self { sheets }
    }

    fn find<T: ?Sized>(&self, get: impl Fn(&'a StyleSheet) -> Option<&'a T>) -> Option<&'a T> {
        self.sheets.iter().copied().find_map(get)
    }

    pub fn fill(&self) -> Option<&'a FillStyle> {
        self.find(StyleSheet::fill)
    }

    pub fn stroke(&self) -> Option<&'a StrokeStyle> {
        self.find(StyleSheet::stroke)
    }

    pub fn start_arrowhead(&self) -> Option<&'a ArrowheadStyle> {
        self.find(StyleSheet::start_arrowhead)
    }

    pub fn end_arrowhead(&self) -> Option<&'a ArrowheadStyle> {
        self.find(StyleSheet::end_arrowhead)
    }

    pub fn text(&self) -> Option<&'a TextStyle> {
        self.find(StyleSheet::text)
    }

    pub fn interactivity(&self) -> Option<&'a InteractivityStyle> {
        self.find(StyleSheet::interactivity)
    }
}
