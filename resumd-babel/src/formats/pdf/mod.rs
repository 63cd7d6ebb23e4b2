//! PDF export through the layout engine, with a rasterized fallback.
//!
//! The structured renderer ([`render_pdf`]) writes base-14 Helvetica text and
//! URI annotations directly with `pdf-writer`; it needs no browser. Only the
//! fallback ([`raster_pdf`]) needs a screenshot of the HTML presentation.
//!
//! Options: `font-size`, `line-height`, `margin`, `show-full-urls`,
//! `page-size` (`letter` | `a4`), `fallback` (default on), and the `theme`
//! and viewport options used when the fallback has to rasterize.

mod raster;
mod writer;

use crate::error::FormatError;
use crate::export::{export_pdf_with, DocumentPresentation, ExportOutcome};
use crate::format::{Format, SerializedDocument};
use crate::formats::html::HtmlTheme;
use crate::formats::options::{layout_settings, parse_bool_flag};
use crate::layout::LayoutSettings;
use crate::model::Document;
use std::collections::HashMap;

pub use raster::{raster_pdf, strip_height};
pub use writer::{encode_win_ansi, render_pdf};

/// Format implementation for PDF export.
#[derive(Default)]
pub struct PdfFormat {
    settings: LayoutSettings,
}

impl PdfFormat {
    pub fn new(settings: LayoutSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &LayoutSettings {
        &self.settings
    }
}

impl Format for PdfFormat {
    fn name(&self) -> &str {
        "pdf"
    }

    fn description(&self) -> &str {
        "Paginated PDF with selectable text and links"
    }

    fn file_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(
            "PDF serialization produces binary output".to_string(),
        ))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let settings = layout_settings(self.settings, options)?;
        let fallback = parse_bool_flag(options, "fallback", true)?;
        let presentation = presentation_for(doc, options, &settings)?;

        match export_pdf_with(&presentation, &settings, fallback) {
            ExportOutcome::Structured(bytes) => Ok(SerializedDocument::Binary(bytes)),
            ExportOutcome::RasterizedFallback { bytes, reason } => {
                tracing::warn!(%reason, "pdf written as images only; text is not selectable");
                Ok(SerializedDocument::Binary(bytes))
            }
            ExportOutcome::Failure(err) => Err(err.into()),
        }
    }
}

fn presentation_for(
    doc: &Document,
    options: &HashMap<String, String>,
    settings: &LayoutSettings,
) -> Result<DocumentPresentation, FormatError> {
    let mut html = crate::formats::html::HtmlOptions::default();
    if let Some(name) = options.get("theme") {
        html.theme = HtmlTheme::from_name(name).ok_or_else(|| {
            FormatError::SerializationError(format!("Unknown theme '{name}'"))
        })?;
    }
    html.show_full_urls = settings.show_full_urls;
    let presentation = DocumentPresentation::new(doc.clone()).with_html_options(html);

    #[cfg(feature = "native-export")]
    let presentation =
        presentation.with_viewport(crate::formats::png::Viewport::from_options(options)?);

    Ok(presentation)
}
