//! HTML format implementation
//!
//! Renders the visible part of a document as a self-contained HTML5 page.
//! This is also the presentation that the degraded PDF path screenshots.
//!
//! # Library Choice
//!
//! The page body is built as an `html5ever` / `markup5ever_rcdom` DOM and
//! serialized by html5ever, so escaping and void elements are handled by a
//! browser-grade serializer rather than by string concatenation.
//!
//! # Element Mapping Table
//!
//! | Content node       | HTML                                           |
//! |--------------------|------------------------------------------------|
//! | Heading (section)  | `<h2 class="resume-section-title">`            |
//! | Heading (item)     | `<h3 class="resume-item-title">`               |
//! | Paragraph          | `<p class="resume-paragraph">`                 |
//! | List               | `<ul>`/`<ol>` with `class="resume-list"`       |
//! | ListItem           | `<li>`                                         |
//! | Link               | `<a href>` (+ `<span class="resume-url">` when full URLs are shown) |
//! | Emphasis           | `<strong>` / `<em>`                            |
//! | Break              | `<br>`                                         |
//!
//! # CSS and Theming
//!
//! `css/baseline.css` is always embedded; `css/themes/theme-*.css` adds
//! optional overrides. Custom CSS given through the `css-path` option is
//! appended last.

mod serializer;

use crate::error::FormatError;
use crate::format::{Format, SerializedDocument};
use crate::formats::options::parse_bool_flag;
use crate::model::Document;
use std::collections::HashMap;

pub use serializer::{render_tree, serialize_to_html, HtmlOptions};

/// Available CSS themes for HTML export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlTheme {
    /// Baseline sans-serif presentation
    #[default]
    Classic,
    /// Serif typography override
    Serif,
}

impl HtmlTheme {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" => Some(HtmlTheme::Classic),
            "serif" => Some(HtmlTheme::Serif),
            _ => None,
        }
    }

    pub(crate) fn css(&self) -> &'static str {
        match self {
            HtmlTheme::Classic => include_str!("../../../css/themes/theme-classic.css"),
            HtmlTheme::Serif => include_str!("../../../css/themes/theme-serif.css"),
        }
    }
}

pub(crate) const BASELINE_CSS: &str = include_str!("../../../css/baseline.css");

/// The stylesheet embedded by default: baseline plus the classic theme.
pub fn get_default_css() -> String {
    format!("{BASELINE_CSS}\n{}", HtmlTheme::Classic.css())
}

/// Format implementation for HTML
#[derive(Default)]
pub struct HtmlFormat {
    theme: HtmlTheme,
}

impl HtmlFormat {
    pub fn new(theme: HtmlTheme) -> Self {
        Self { theme }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 presentation with embedded CSS"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_to_html(doc, &HtmlOptions::new(self.theme))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let mut html_options = HtmlOptions::new(self.theme);
        if let Some(name) = options.get("theme") {
            html_options.theme = HtmlTheme::from_name(name).ok_or_else(|| {
                FormatError::SerializationError(format!(
                    "Unknown theme '{name}' (expected 'classic' or 'serif')"
                ))
            })?;
        }
        if let Some(path) = options.get("css-path") {
            let css = std::fs::read_to_string(path).map_err(|e| {
                FormatError::SerializationError(format!("Failed to read CSS '{path}': {e}"))
            })?;
            html_options.custom_css = Some(css);
        }
        html_options.show_full_urls = parse_bool_flag(options, "show-full-urls", false)?;

        serialize_to_html(doc, &html_options).map(SerializedDocument::Text)
    }
}
