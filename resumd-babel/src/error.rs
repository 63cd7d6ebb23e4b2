//! Error types for format, layout and export operations

use thiserror::Error;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

/// Errors raised while placing a content tree onto pages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Page geometry or typography that leaves no room for text.
    #[error("Invalid layout settings: {0}")]
    InvalidSettings(String),
}

/// Errors raised by the export pipeline.
///
/// Only [`ExportError::TargetMissing`] and [`ExportError::Fallback`] ever reach
/// the caller as a terminal failure; every other variant describes why the
/// structured path or the rasterized path gave up.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    /// Nothing has been rendered, so there is nothing to export.
    #[error("Export target is missing; nothing has been rendered")]
    TargetMissing,
    /// The presentation could not provide a content tree.
    #[error("Content tree unavailable: {0}")]
    ContentUnavailable(String),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// Writing the page description failed.
    #[error("Rendering failed: {0}")]
    Render(String),
    /// The presentation could not be rasterized.
    #[error("Rasterization failed: {0}")]
    Raster(String),
    /// Both the structured path and the rasterized fallback failed.
    #[error("Export failed ({primary}); rasterized fallback also failed ({fallback})")]
    Fallback {
        primary: Box<ExportError>,
        fallback: Box<ExportError>,
    },
}

impl From<ExportError> for FormatError {
    fn from(err: ExportError) -> Self {
        FormatError::SerializationError(err.to_string())
    }
}
