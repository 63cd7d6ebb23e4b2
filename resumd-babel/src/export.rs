//! PDF export with a rasterized fallback.
//!
//! The structured path lays the content tree out with [`crate::layout`] and
//! writes selectable text and link annotations. If anything on that path
//! fails, the presentation is rasterized once and embedded page by page.
//! The result is always an [`ExportOutcome`]; nothing here panics or retries.

use crate::error::ExportError;
use crate::formats::html::{HtmlOptions, HtmlTheme};
use crate::formats::pdf::{raster_pdf, render_pdf};
use crate::ir::{from_model, ContentTree};
use crate::layout::{layout, LayoutSettings};
use crate::model::Document;
use crate::raster::RasterImage;

#[cfg(feature = "native-export")]
use crate::formats::png::Viewport;

/// The rendered document an export reads from.
pub trait Presentation {
    /// Whether anything has been rendered that could be measured.
    fn has_target(&self) -> bool;

    fn content_tree(&self) -> Result<ContentTree, ExportError>;

    /// A screenshot of the rendered document, used only by the fallback.
    fn rasterize(&self) -> Result<RasterImage, ExportError>;
}

/// How an export ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// Text and links laid out by the layout engine.
    Structured(Vec<u8>),
    /// Image-only PDF produced after the structured path failed with `reason`.
    RasterizedFallback { bytes: Vec<u8>, reason: ExportError },
    Failure(ExportError),
}

impl ExportOutcome {
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            ExportOutcome::Structured(bytes) | ExportOutcome::RasterizedFallback { bytes, .. } => {
                Some(bytes)
            }
            ExportOutcome::Failure(_) => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ExportOutcome::RasterizedFallback { .. })
    }

    pub fn into_result(self) -> Result<Vec<u8>, ExportError> {
        match self {
            ExportOutcome::Structured(bytes) | ExportOutcome::RasterizedFallback { bytes, .. } => {
                Ok(bytes)
            }
            ExportOutcome::Failure(err) => Err(err),
        }
    }
}

/// Export `presentation` to PDF, falling back to a rasterized PDF once.
pub fn export_pdf(presentation: &dyn Presentation, settings: &LayoutSettings) -> ExportOutcome {
    export_pdf_with(presentation, settings, true)
}

/// Like [`export_pdf`]; with `fallback` off a structured failure is terminal.
pub fn export_pdf_with(
    presentation: &dyn Presentation,
    settings: &LayoutSettings,
    fallback: bool,
) -> ExportOutcome {
    if !presentation.has_target() {
        tracing::error!("pdf export aborted: nothing has been rendered");
        return ExportOutcome::Failure(ExportError::TargetMissing);
    }

    let primary = match structured_pdf(presentation, settings) {
        Ok(bytes) => return ExportOutcome::Structured(bytes),
        Err(err) => err,
    };

    if !fallback {
        tracing::error!(error = %primary, "pdf export failed");
        return ExportOutcome::Failure(primary);
    }

    tracing::warn!(error = %primary, "structured pdf export failed; using rasterized fallback");
    match presentation
        .rasterize()
        .and_then(|image| raster_pdf(&image, settings))
    {
        Ok(bytes) => ExportOutcome::RasterizedFallback {
            bytes,
            reason: primary,
        },
        Err(fallback) => {
            let err = ExportError::Fallback {
                primary: Box::new(primary),
                fallback: Box::new(fallback),
            };
            tracing::error!(error = %err, "pdf export failed");
            ExportOutcome::Failure(err)
        }
    }
}

fn structured_pdf(
    presentation: &dyn Presentation,
    settings: &LayoutSettings,
) -> Result<Vec<u8>, ExportError> {
    let tree = presentation.content_tree()?;
    let placed = layout(&tree, settings)?;
    tracing::debug!(pages = placed.page_count, commands = placed.commands.len(), "layout done");
    render_pdf(&placed)
}

/// A document snapshot presented through the HTML format.
///
/// The snapshot is owned, so later edits to the live document cannot leak
/// into an export that is already running.
#[derive(Debug, Clone)]
pub struct DocumentPresentation {
    document: Document,
    html: HtmlOptions,
    #[cfg(feature = "native-export")]
    viewport: Viewport,
}

impl DocumentPresentation {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            html: HtmlOptions::default(),
            #[cfg(feature = "native-export")]
            viewport: Viewport::default(),
        }
    }

    pub fn with_theme(mut self, theme: HtmlTheme) -> Self {
        self.html.theme = theme;
        self
    }

    pub fn with_html_options(mut self, options: HtmlOptions) -> Self {
        self.html = options;
        self
    }

    #[cfg(feature = "native-export")]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Presentation for DocumentPresentation {
    fn has_target(&self) -> bool {
        true
    }

    fn content_tree(&self) -> Result<ContentTree, ExportError> {
        Ok(from_model(&self.document))
    }

    #[cfg(feature = "native-export")]
    fn rasterize(&self) -> Result<RasterImage, ExportError> {
        let html = crate::formats::html::serialize_to_html(&self.document, &self.html)
            .map_err(|e| ExportError::Raster(e.to_string()))?;
        crate::formats::png::rasterize_html(&html, self.viewport)
    }

    #[cfg(not(feature = "native-export"))]
    fn rasterize(&self) -> Result<RasterImage, ExportError> {
        Err(ExportError::Raster(
            "built without the native-export feature".to_string(),
        ))
    }
}
