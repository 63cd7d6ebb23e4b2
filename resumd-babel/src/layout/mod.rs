//! Pagination and layout.
//!
//! [`layout`] walks a [`ContentTree`](crate::ir::ContentTree) with a single
//! cursor and produces absolutely positioned [`DrawCommand`]s on fixed-size
//! pages. Coordinates are PDF points with `y` growing downward from the top of
//! the page; `y` of a text run is the top of its line box.

mod engine;
pub mod measure;
pub mod wrap;

pub use engine::{layout, layout_with};
pub use measure::{Helvetica, TextMeasure};

use crate::error::LayoutError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };

    pub fn name(&self) -> Option<&'static str> {
        if *self == Self::LETTER {
            Some("letter")
        } else if *self == Self::A4 {
            Some("a4")
        } else {
            None
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

impl FromStr for PageSize {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "letter" | "us-letter" => Ok(Self::LETTER),
            "a4" => Ok(Self::A4),
            other => Err(LayoutError::InvalidSettings(format!(
                "unknown page size '{other}' (expected 'letter' or 'a4')"
            ))),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}x{}", self.width, self.height),
        }
    }
}

/// User-tunable layout options. All lengths are in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    pub font_size: f32,
    /// Vertical advance per body line.
    pub line_height: f32,
    /// Inset on all four sides.
    pub margin: f32,
    /// Append ` (url)` after every link.
    pub show_full_urls: bool,
    pub page: PageSize,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            line_height: 14.4,
            margin: 36.0,
            show_full_urls: false,
            page: PageSize::LETTER,
        }
    }
}

impl LayoutSettings {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.font_size > 0.0) {
            return Err(LayoutError::InvalidSettings(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        if !(self.line_height > 0.0) {
            return Err(LayoutError::InvalidSettings(format!(
                "line height must be positive, got {}",
                self.line_height
            )));
        }
        let smallest = self.page.width.min(self.page.height);
        if !(self.margin >= 0.0) || !(2.0 * self.margin < smallest) {
            return Err(LayoutError::InvalidSettings(format!(
                "margin {} leaves no room on a {} page",
                self.margin, self.page
            )));
        }
        Ok(())
    }

    /// Width available between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.page.width - 2.0 * self.margin
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Text,
    Link,
    Muted,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    /// Zero-based page index.
    pub page: usize,
    pub style: TextStyle,
}

/// Clickable area over one placed segment of a link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRegion {
    pub rect: Rect,
    pub url: String,
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DrawCommand {
    Text(TextRun),
    Link(LinkRegion),
}

impl DrawCommand {
    pub fn page(&self) -> usize {
        match self {
            DrawCommand::Text(run) => run.page,
            DrawCommand::Link(link) => link.page,
        }
    }
}

/// Result of laying out a content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub page_size: PageSize,
    pub page_count: usize,
    pub commands: Vec<DrawCommand>,
}

impl Layout {
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text(run) => Some(run),
            DrawCommand::Link(_) => None,
        })
    }

    pub fn links(&self) -> impl Iterator<Item = &LinkRegion> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Link(link) => Some(link),
            DrawCommand::Text(_) => None,
        })
    }

    /// Commands placed on `page`, in emission order.
    pub fn page_commands(&self, page: usize) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |command| command.page() == page)
    }
}
