//! Document publishing pipeline.
//!
//! One call from a document snapshot to an output: format lookup,
//! serialization and the optional file write. Text formats can stay in
//! memory; binary formats (PDF, PNG) are always written to a file.
//!
//! For more control over the conversion process, use [`FormatRegistry`] directly.

use crate::error::FormatError;
use crate::format::SerializedDocument;
use crate::registry::FormatRegistry;
use crate::model::Document;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Specifies how to publish a document.
///
/// Use the builder pattern to configure the publication:
///
/// ```ignore
/// let spec = PublishSpec::new(&document, "pdf")
///     .with_output_path(default_file_name("pdf"))
///     .with_option("page-size", "a4");
/// ```
///
/// If no output path is provided, text formats return in-memory content.
/// Binary formats (like PDF) require an explicit output path.
#[derive(Debug)]
pub struct PublishSpec<'a> {
    /// The snapshot to convert.
    pub document: &'a Document,
    /// Target format name (e.g., "html", "markdown", "pdf").
    pub format: &'a str,
    /// Optional file path for writing output. Required for binary formats.
    pub output: Option<PathBuf>,
    /// Format-specific options (e.g., theme selection, page size).
    pub options: HashMap<String, String>,
}

impl<'a> PublishSpec<'a> {
    /// Creates a publish request for the given document and format.
    pub fn new(document: &'a Document, format: &'a str) -> Self {
        Self {
            document,
            format,
            output: None,
            options: HashMap::new(),
        }
    }

    /// Sets the output file path. If provided, content is written to disk.
    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }

    /// Adds a format-specific option (e.g., theme, page size).
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// The output from a successful publish operation.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    /// Content held in memory (for text formats without an output path).
    InMemory(String),
    /// Path to the written file (when output path was specified).
    File(PathBuf),
}

/// Result of a publish operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    /// The published artifact (in-memory content or file path).
    pub artifact: PublishArtifact,
}

/// Conventional output file name for `format` (`resume.md`, `resume.pdf`, ...).
pub fn default_file_name(format: &str) -> String {
    let extension = match format {
        "markdown" => "md",
        other => other,
    };
    format!("resume.{extension}")
}

/// Publishes a document as described by `spec`.
///
/// Uses the default format registry to find the appropriate serializer.
/// For text formats, returns in-memory content unless an output path is specified.
/// For binary formats (like PDF), requires an output path.
///
/// # Errors
///
/// Returns [`FormatError`] if:
/// - The format is not supported
/// - Serialization fails
/// - File I/O fails
/// - A binary format is requested without an output path
pub fn publish(spec: PublishSpec<'_>) -> Result<PublishResult, FormatError> {
    let PublishSpec {
        document,
        format,
        output,
        options,
    } = spec;
    tracing::debug!(format, output = ?output, "publishing");
    let artifact = match FormatRegistry::with_defaults().serialize_with_options(
        document, format, &options,
    )? {
        SerializedDocument::Text(text) => match output {
            Some(path) => PublishArtifact::File(write_to_path(path, text.into_bytes())?),
            None => PublishArtifact::InMemory(text),
        },
        SerializedDocument::Binary(bytes) => {
            let path = output.ok_or_else(|| {
                FormatError::SerializationError(format!(
                    "{format} output is binary and needs a file path (e.g. {})",
                    default_file_name(format)
                ))
            })?;
            PublishArtifact::File(write_to_path(path, bytes)?)
        }
    };
    Ok(PublishResult { artifact })
}

fn write_to_path(path: PathBuf, bytes: Vec<u8>) -> Result<PathBuf, FormatError> {
    fs::write(&path, &bytes)
        .map(|_| path.clone())
        .map_err(|err| FormatError::SerializationError(err.to_string()))
}
