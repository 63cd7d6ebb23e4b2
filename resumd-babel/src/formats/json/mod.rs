//! JSON save format
//!
//! Unlike Markdown, JSON keeps the complete model: hidden sections and items,
//! ids, and the additional-item flag. It is the lossless counterpart to the
//! Markdown export.

use crate::error::FormatError;
use crate::format::Format;
use crate::model::{Document, Section, SequentialIds};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Serialize)]
struct SavedRef<'a> {
    sections: Vec<&'a Section>,
}

#[derive(Deserialize)]
struct Saved {
    sections: Vec<Section>,
}

/// Format implementation for the JSON save file
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Lossless JSON document (keeps hidden content and ids)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let saved: Saved = serde_json::from_str(source)
            .map_err(|e| FormatError::ParseError(format!("Invalid resume JSON: {e}")))?;

        let mut seen = HashSet::new();
        for section in &saved.sections {
            let ids = std::iter::once(&section.id).chain(section.items.iter().map(|i| &i.id));
            for id in ids {
                if !seen.insert(id) {
                    return Err(FormatError::ParseError(format!("Duplicate id '{id}'")));
                }
            }
        }

        let ids = SequentialIds::after(seen.into_iter());
        Ok(Document::from_sections(saved.sections, Arc::new(ids)))
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        let saved = SavedRef {
            sections: doc.sections().iter().map(|s| s.as_ref()).collect(),
        };
        serde_json::to_string_pretty(&saved)
            .map_err(|e| FormatError::SerializationError(e.to_string()))
    }
}
