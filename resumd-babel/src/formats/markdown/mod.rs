//! Markdown format implementation
//!
//! Bidirectional conversion between the resume Markdown dialect and the
//! [`Document`] model.
//!
//! # Dialect
//!
//! | Markdown            | Model                                   |
//! |---------------------|-----------------------------------------|
//! | `## Title`          | Section (visible, title trimmed)        |
//! | `### Title`         | Item of the current section             |
//! | any other line      | Appended to the current item's body     |
//!
//! Only these two heading levels are structural. Everything else (lists,
//! emphasis, links, `#`/`####` headings, code fences) is kept verbatim inside
//! item bodies and interpreted later by the presentation mapping.
//!
//! # Lossy Conversions
//!
//! - Hidden sections and items are not written (use the `json` format to keep them).
//! - Bodies and titles are trimmed.
//! - Lines of text before the first `##`, or between a `##` and its first `###`, are dropped.
//! - A body line starting with `## ` or `### ` becomes a heading on re-import.
//! - A trailing empty-titled heading loses its trailing space and is re-read as body text.

pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::model::Document;

pub use parser::{parse_markdown, parse_with_ids};
pub use serializer::serialize_markdown;

/// Format implementation for the resume Markdown dialect
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Resume Markdown (## sections, ### items)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        Ok(parse_markdown(source))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serialize_markdown(doc))
    }
}
