//! Shared configuration loader for the resumd toolchain.
//!
//! `defaults/resumd.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`ResumdConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use resumd_babel::formats::png::Viewport;
use resumd_babel::layout::{LayoutSettings, PageSize};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/resumd.default.toml");

/// Top-level configuration consumed by resumd applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumdConfig {
    pub layout: LayoutConfig,
    pub export: ExportConfig,
    pub raster: RasterConfig,
}

/// Typography and page geometry for the layout engine.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    pub font_size: f32,
    pub line_height: f32,
    pub margin: f32,
    pub show_full_urls: bool,
    pub page_size: PageSizeName,
}

impl From<LayoutConfig> for LayoutSettings {
    fn from(config: LayoutConfig) -> Self {
        LayoutSettings::from(&config)
    }
}

impl From<&LayoutConfig> for LayoutSettings {
    fn from(config: &LayoutConfig) -> Self {
        LayoutSettings {
            font_size: config.font_size,
            line_height: config.line_height,
            margin: config.margin,
            show_full_urls: config.show_full_urls,
            page: config.page_size.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PageSizeName {
    #[serde(rename = "letter")]
    Letter,
    #[serde(rename = "a4")]
    A4,
}

impl From<PageSizeName> for PageSize {
    fn from(name: PageSizeName) -> Self {
        match name {
            PageSizeName::Letter => PageSize::LETTER,
            PageSizeName::A4 => PageSize::A4,
        }
    }
}

/// Output file names and fallback policy.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub markdown_file: String,
    pub pdf_file: String,
    pub fallback: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RasterConfig {
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl From<&RasterConfig> for Viewport {
    fn from(config: &RasterConfig) -> Self {
        Viewport {
            width: config.viewport_width,
            height: config.viewport_height,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<ResumdConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<ResumdConfig, ConfigError> {
    Loader::new().build()
}
