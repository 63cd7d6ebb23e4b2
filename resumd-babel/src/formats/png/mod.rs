//! Screenshots of the HTML presentation via headless Chrome.
//!
//! This is the rasterizer behind the degraded PDF export, and it is also
//! exposed directly as the `png` format. The document is rendered to HTML,
//! written to a temporary file, and captured with Chrome's `--screenshot`
//! mode. Trailing white rows below the content are trimmed.

use crate::error::{ExportError, FormatError};
use crate::format::{Format, SerializedDocument};
use crate::formats::html::HtmlFormat;
use crate::formats::options::parse_u32_option;
use crate::model::Document;
use crate::raster::RasterImage;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;
use url::Url;
use which::which;

/// Environment variable naming the Chrome/Chromium binary to use.
pub const CHROME_ENV: &str = "RESUMD_CHROME_BIN";

const SCREENSHOT_CSS: &str = "html, body { background: white; }\nbody { margin: 0; }\n";

/// Chrome window size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    /// Letter width at 96 dpi, four pages tall.
    fn default() -> Self {
        Self {
            width: 816,
            height: 4224,
        }
    }
}

impl Viewport {
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self, FormatError> {
        let default = Self::default();
        let viewport = Self {
            width: parse_u32_option(options, "viewport-width")?.unwrap_or(default.width),
            height: parse_u32_option(options, "viewport-height")?.unwrap_or(default.height),
        };
        if viewport.width == 0 || viewport.height == 0 {
            return Err(FormatError::SerializationError(
                "Viewport dimensions must be positive".to_string(),
            ));
        }
        Ok(viewport)
    }
}

/// Format implementation that screenshots the HTML presentation.
#[derive(Default)]
pub struct PngFormat {
    html: HtmlFormat,
}

impl Format for PngFormat {
    fn name(&self) -> &str {
        "png"
    }

    fn description(&self) -> &str {
        "Screenshot of the HTML presentation via headless Chrome"
    }

    fn file_extensions(&self) -> &[&str] {
        &["png"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(
            "PNG serialization produces binary output".to_string(),
        ))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let viewport = Viewport::from_options(options)?;
        let html = self.html.serialize(doc)?;
        let image = rasterize_html(&html, viewport)?;
        Ok(SerializedDocument::Binary(image.to_png()?))
    }
}

/// Screenshot `html` and decode it, trimming white rows at the bottom.
pub fn rasterize_html(html: &str, viewport: Viewport) -> Result<RasterImage, ExportError> {
    let png = screenshot_html(html, viewport)?;
    Ok(RasterImage::from_png(&png)?.trim_trailing_white())
}

/// Raw PNG bytes of `html` rendered in a `viewport`-sized window.
pub fn screenshot_html(html: &str, viewport: Viewport) -> Result<Vec<u8>, ExportError> {
    let chrome = resolve_chrome_binary()?;
    let temp_dir = tempdir().map_err(|e| ExportError::Raster(format!("Temp dir error: {e}")))?;
    let html_path = temp_dir.path().join("resume.html");
    fs::write(&html_path, inject_css(html, SCREENSHOT_CSS))
        .map_err(|e| ExportError::Raster(e.to_string()))?;

    let png_path = temp_dir.path().join("resume.png");
    let file_url = Url::from_file_path(&html_path).map_err(|_| {
        ExportError::Raster("Failed to construct file:// URL for HTML input".to_string())
    })?;

    tracing::debug!(chrome = %chrome.display(), ?viewport, "capturing screenshot");
    let status = Command::new(&chrome)
        .arg("--headless")
        .arg("--disable-gpu")
        .arg("--no-sandbox")
        .arg("--disable-dev-shm-usage")
        .arg("--hide-scrollbars")
        .arg(format!("--screenshot={}", png_path.display()))
        .arg(format!("--window-size={},{}", viewport.width, viewport.height))
        .arg(file_url.as_str())
        .status()
        .map_err(|e| {
            ExportError::Raster(format!(
                "Failed to launch Chrome ({}): {}",
                chrome.display(),
                e
            ))
        })?;

    if !status.success() {
        return Err(ExportError::Raster(format!(
            "Chrome exited with status {status}"
        )));
    }

    fs::read(&png_path).map_err(|e| ExportError::Raster(format!("No screenshot produced: {e}")))
}

fn inject_css(html: &str, css: &str) -> String {
    let style_tag = format!("<style data-resumd-raster>\n{css}</style>");
    match html.find("</head>") {
        Some(idx) => format!("{}{}{}", &html[..idx], style_tag, &html[idx..]),
        None => format!("{style_tag}{html}"),
    }
}

fn resolve_chrome_binary() -> Result<PathBuf, ExportError> {
    for var in [CHROME_ENV, "GOOGLE_CHROME_BIN", "CHROME_BIN"] {
        if let Some(path) = env::var_os(var) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
    }

    for candidate in [
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
        "chrome",
        "msedge",
    ] {
        if let Ok(path) = which(candidate) {
            return Ok(path);
        }
    }

    #[cfg(target_os = "macos")]
    {
        let candidate = PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    #[cfg(target_os = "windows")]
    {
        for candidate in [
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ] {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    #[cfg(target_os = "linux")]
    {
        for candidate in [
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium-browser",
            "/usr/bin/chromium",
        ] {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    Err(ExportError::Raster(format!(
        "Unable to locate a Chrome/Chromium binary. Set {CHROME_ENV} to override the detection."
    )))
}
