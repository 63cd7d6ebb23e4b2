//! Format implementations
//!
//! Each format converts between the resume [`Document`](crate::model::Document)
//! and one external representation. Shared `--extra-*` option parsing lives
//! in [`options`].

pub mod html;
pub mod json;
pub mod markdown;
pub mod options;
pub mod pdf;
#[cfg(feature = "native-export")]
pub mod png;

pub use html::{get_default_css, HtmlFormat, HtmlOptions, HtmlTheme};
pub use json::JsonFormat;
pub use markdown::MarkdownFormat;
pub use pdf::PdfFormat;
#[cfg(feature = "native-export")]
pub use png::PngFormat;
