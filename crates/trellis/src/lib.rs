//! Trellis - Converts diagram documents between vector-graphics object models.
//!
//! A source document is a tree of groups, shapes and connectors placed with
//! scene transforms and styled through inherited style sheets. The converter
//! rebuilds it as a target document whose items carry explicit placement
//! fields, normalized outlines, connection ports, resolved styles and glued
//! connector ends.
//!
//! Anything the target model cannot express is dropped and reported as a
//! [`Diagnostic`] next to the converted document.

pub mod config;
pub mod error;
pub mod format;
pub mod importer;
pub mod styles;

pub use trellis_core::{color, geometry, identifier, source, target};

pub use error::{Diagnostic, DiagnosticCode, Severity, TrellisError};
pub use importer::Conversion;

use log::info;

use config::ConvertConfig;
use source::{Drawing, Library, SourceDocument};
use target::{DrawingDocument, LibraryDocument, TargetDocument};

/// Converts source documents with a fixed configuration.
///
/// # Examples
///
/// ```
/// use trellis::{Converter, config::ConvertConfig, geometry::Rect, source::{Drawing, SourceDocument}};
///
/// let converter = Converter::new(ConvertConfig::default().with_screen_dpi(120.0));
/// let source = SourceDocument::Drawing(Drawing::new(Rect::new(0.0, 0.0, 640.0, 480.0)));
///
/// let conversion = converter.convert(&source).expect("Failed to convert");
/// assert!(conversion.diagnostics.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    /// Create a new converter with the given configuration.
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Convert either kind of source document.
    ///
    /// # Errors
    ///
    /// Returns `TrellisError` when the source tree is structurally broken.
    /// Unsupported content is never an error; it is reported in the
    /// diagnostics of the returned conversion.
    pub fn convert(
        &self,
        document: &SourceDocument,
    ) -> Result<Conversion<TargetDocument>, TrellisError> {
        let conversion = match document {
            SourceDocument::Drawing(drawing) => self.convert_drawing(drawing)?.map(Into::into),
            SourceDocument::Library(library) => self.convert_library(library)?.map(Into::into),
        };
        info!(diagnostics = conversion.diagnostics.len(); "Conversion finished");
        Ok(conversion)
    }

    /// Convert a drawing into a single-page drawing.
    pub fn convert_drawing(
        &self,
        drawing: &Drawing,
    ) -> Result<Conversion<DrawingDocument>, TrellisError> {
        importer::drawing::import_drawing(drawing, &self.config)
    }

    /// Convert a library, one library item per master.
    pub fn convert_library(
        &self,
        library: &Library,
    ) -> Result<Conversion<LibraryDocument>, TrellisError> {
        importer::library::import_library(library, &self.config)
    }
}
