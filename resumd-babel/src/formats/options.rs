//! Parsing of `--extra-*` style format options.

use crate::error::FormatError;
use crate::layout::{LayoutSettings, PageSize};
use std::collections::HashMap;

pub fn parse_bool_flag(
    options: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool, FormatError> {
    let Some(value) = options.get(key) else {
        return Ok(default);
    };
    if value.is_empty() {
        return Ok(true);
    }
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(FormatError::SerializationError(format!(
            "Invalid boolean value '{other}' for --extra-{key}"
        ))),
    }
}

pub fn parse_f32_option(
    options: &HashMap<String, String>,
    key: &str,
) -> Result<Option<f32>, FormatError> {
    options
        .get(key)
        .map(|value| {
            value.trim().parse::<f32>().map_err(|_| {
                FormatError::SerializationError(format!(
                    "Invalid number '{value}' for --extra-{key}"
                ))
            })
        })
        .transpose()
}

pub fn parse_u32_option(
    options: &HashMap<String, String>,
    key: &str,
) -> Result<Option<u32>, FormatError> {
    options
        .get(key)
        .map(|value| {
            value.trim().parse::<u32>().map_err(|_| {
                FormatError::SerializationError(format!(
                    "Invalid integer '{value}' for --extra-{key}"
                ))
            })
        })
        .transpose()
}

/// Overlay `font-size`, `line-height`, `margin`, `show-full-urls` and
/// `page-size` options onto `base`.
pub fn layout_settings(
    base: LayoutSettings,
    options: &HashMap<String, String>,
) -> Result<LayoutSettings, FormatError> {
    let mut settings = base;
    if let Some(size) = parse_f32_option(options, "font-size")? {
        settings.font_size = size;
    }
    if let Some(height) = parse_f32_option(options, "line-height")? {
        settings.line_height = height;
    }
    if let Some(margin) = parse_f32_option(options, "margin")? {
        settings.margin = margin;
    }
    settings.show_full_urls = parse_bool_flag(options, "show-full-urls", settings.show_full_urls)?;
    if let Some(name) = options.get("page-size") {
        settings.page = name
            .parse::<PageSize>()
            .map_err(|e| FormatError::SerializationError(e.to_string()))?;
    }
    Ok(settings)
}
