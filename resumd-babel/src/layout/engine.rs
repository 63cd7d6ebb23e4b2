//! The placement walk.
//!
//! One recursive pass over the content tree with explicit cursor state. Block
//! nodes move the cursor vertically; inline nodes place text runs on the
//! current line, wrapping and breaking pages as they go.

use super::measure::{Helvetica, TextMeasure};
use super::wrap::wrap_text;
use super::{Color, DrawCommand, Layout, LayoutSettings, LinkRegion, Rect, TextRun, TextStyle};
use crate::error::LayoutError;
use crate::ir::{ContentNode, ContentTree};

/// Horizontal offset of list item content from its marker.
pub const LIST_CONTENT_OFFSET: f32 = 12.0;
/// Extra indent per nested list level.
pub const LIST_INDENT_STEP: f32 = 15.0;
/// Link annotation height as a multiple of the font size.
const LINK_BOX_SCALE: f32 = 1.2;
/// Paragraph spacing before and after, as a fraction of the line height.
const PARAGRAPH_SPACING: f32 = 0.3;
const CLOSING_PUNCTUATION: &[char] = &[',', '.', ';', ':', '!', '?', ')'];

fn heading_scale(level: u8) -> f32 {
    match level {
        1 => 1.2,
        2 => 1.15,
        3 => 1.1,
        _ => 1.0,
    }
}

/// Spacing before and after a heading, as fractions of the line height.
fn heading_spacing(level: u8) -> (f32, f32) {
    match level {
        1 => (0.8, 0.4),
        2 => (0.6, 0.3),
        _ => (0.4, 0.2),
    }
}

/// Lay out `tree` measuring text with the Helvetica metrics.
pub fn layout(tree: &ContentTree, settings: &LayoutSettings) -> Result<Layout, LayoutError> {
    layout_with(tree, settings, &Helvetica)
}

/// Lay out `tree` with a caller-supplied text measure.
pub fn layout_with(
    tree: &ContentTree,
    settings: &LayoutSettings,
    measure: &dyn TextMeasure,
) -> Result<Layout, LayoutError> {
    settings.validate()?;
    let mut placer = Placer::new(settings, measure);
    for node in &tree.nodes {
        placer.block(node);
    }
    let layout = Layout {
        page_size: settings.page,
        page_count: placer.page + 1,
        commands: placer.commands,
    };
    tracing::debug!(
        pages = layout.page_count,
        commands = layout.commands.len(),
        "laid out content tree"
    );
    Ok(layout)
}

/// A placed piece of a run: page, position and width.
struct Segment {
    page: usize,
    x: f32,
    y: f32,
    width: f32,
}

struct Placer<'a> {
    settings: &'a LayoutSettings,
    measure: &'a dyn TextMeasure,
    style: TextStyle,
    x: f32,
    y: f32,
    page: usize,
    /// Left offset (from the margin) of continuation lines in the current block.
    indent: f32,
    /// Current nesting depth of lists, 0 outside lists.
    list_depth: usize,
    /// Whether anything has been drawn on the current line.
    line_open: bool,
    commands: Vec<DrawCommand>,
}

impl<'a> Placer<'a> {
    fn new(settings: &'a LayoutSettings, measure: &'a dyn TextMeasure) -> Self {
        Self {
            settings,
            measure,
            style: TextStyle {
                font_size: settings.font_size,
                bold: false,
                italic: false,
                color: Color::Text,
            },
            x: settings.margin,
            y: settings.margin,
            page: 0,
            indent: 0.0,
            list_depth: 0,
            line_open: false,
            commands: Vec::new(),
        }
    }

    fn left(&self) -> f32 {
        self.settings.margin + self.indent
    }

    fn right(&self) -> f32 {
        self.settings.page.width - self.settings.margin
    }

    /// Vertical advance of one line at the current font size.
    fn line_advance(&self) -> f32 {
        self.settings.line_height * self.style.font_size / self.settings.font_size
    }

    fn at_page_top(&self) -> bool {
        self.y <= self.settings.margin
    }

    fn ensure_room(&mut self) {
        if self.y > self.settings.page.height - self.settings.margin {
            self.page += 1;
            self.y = self.settings.margin;
            self.x = self.left();
            self.line_open = false;
            tracing::debug!(page = self.page, "page break");
        }
    }

    fn new_line(&mut self) {
        self.y += self.line_advance();
        self.x = self.left();
        self.line_open = false;
    }

    fn block(&mut self, node: &ContentNode) {
        match node {
            ContentNode::Heading { level, children } => self.heading(*level, children),
            ContentNode::Paragraph(children) => self.paragraph(children),
            ContentNode::List { ordered, items } => self.list(*ordered, items),
            ContentNode::ListItem(children) => self.list_item("• ", children),
            inline => self.paragraph(std::slice::from_ref(inline)),
        }
    }

    fn heading(&mut self, level: u8, children: &[ContentNode]) {
        let (before, after) = heading_spacing(level);
        let saved = self.style;

        self.x = self.settings.margin;
        self.line_open = false;
        self.y += before * self.settings.line_height;
        self.style.font_size = self.settings.font_size * heading_scale(level);
        self.style.bold = true;

        self.inline(children, true);
        self.y += self.line_advance();

        self.style = saved;
        self.y += after * self.settings.line_height;
        self.x = self.settings.margin;
        self.line_open = false;
    }

    fn paragraph(&mut self, children: &[ContentNode]) {
        self.x = self.left();
        self.line_open = false;
        if !self.at_page_top() {
            self.y += PARAGRAPH_SPACING * self.settings.line_height;
        }

        self.inline(children, true);
        if self.line_open {
            self.y += self.line_advance();
        }

        self.y += PARAGRAPH_SPACING * self.settings.line_height;
        self.x = self.settings.margin;
        self.line_open = false;
    }

    fn list(&mut self, ordered: bool, items: &[ContentNode]) {
        let saved_indent = self.indent;
        self.indent = self.list_depth as f32 * LIST_INDENT_STEP;
        self.list_depth += 1;

        for (index, item) in items.iter().enumerate() {
            let marker = if ordered {
                format!("{}. ", index + 1)
            } else {
                "• ".to_string()
            };
            match item {
                ContentNode::ListItem(children) => self.list_item(&marker, children),
                other => self.list_item(&marker, std::slice::from_ref(other)),
            }
        }

        self.list_depth -= 1;
        self.indent = saved_indent;
    }

    fn list_item(&mut self, marker: &str, children: &[ContentNode]) {
        let item_indent = self.indent;
        self.x = self.left();
        self.line_open = false;
        self.ensure_room();

        let (x, y, page) = (self.x, self.y, self.page);
        self.emit_text(marker, x, y, page);

        self.indent = item_indent + LIST_CONTENT_OFFSET;
        self.x = self.left();
        self.line_open = false;
        self.inline(children, true);
        if self.line_open {
            self.y += self.line_advance();
        }

        self.indent = item_indent;
        self.x = self.settings.margin;
        self.line_open = false;
    }

    /// Place inline children. `first` says whether the first child starts its parent.
    fn inline(&mut self, children: &[ContentNode], first: bool) {
        for (index, child) in children.iter().enumerate() {
            let first = first && index == 0;
            match child {
                ContentNode::Text(value) => {
                    self.run(value, first);
                }
                ContentNode::Link { url, text } => self.link(text, url, first),
                ContentNode::Emphasis {
                    bold,
                    italic,
                    children,
                } => {
                    let saved = self.style;
                    self.style.bold |= *bold;
                    self.style.italic |= *italic;
                    self.inline(children, first);
                    self.style = saved;
                }
                ContentNode::Break => self.new_line(),
                ContentNode::List { ordered, items } => {
                    if self.line_open {
                        self.new_line();
                    }
                    let saved_indent = self.indent;
                    self.list(*ordered, items);
                    self.indent = saved_indent;
                    self.x = self.left();
                }
                ContentNode::Heading { .. }
                | ContentNode::Paragraph(_)
                | ContentNode::ListItem(_) => {
                    if self.line_open {
                        self.new_line();
                    }
                    self.block(child);
                }
            }
        }
    }

    fn link(&mut self, text: &str, url: &str, first: bool) {
        let saved = self.style;
        self.style.color = Color::Link;
        let segments = self.run(text, first);
        self.style = saved;

        let height = self.style.font_size * LINK_BOX_SCALE;
        for segment in segments {
            self.commands.push(DrawCommand::Link(LinkRegion {
                rect: Rect {
                    x: segment.x,
                    y: segment.y,
                    width: segment.width,
                    height,
                },
                url: url.to_string(),
                page: segment.page,
            }));
        }

        if self.settings.show_full_urls {
            self.style.color = Color::Muted;
            self.style.italic = true;
            self.run(&format!("({url})"), false);
            self.style = saved;
        }
    }

    /// Place a text run on the current line, wrapping as needed.
    fn run(&mut self, text: &str, first: bool) -> Vec<Segment> {
        self.ensure_room();
        if text.trim().is_empty() {
            return Vec::new();
        }

        if !first && self.line_open && !text.trim_start().starts_with(CLOSING_PUNCTUATION) {
            let space = self.measure.width(" ", &self.style);
            if self.x + space > self.right() {
                self.new_line();
                self.ensure_room();
            } else {
                self.x += space;
            }
        }

        let style = self.style;
        let measure = self.measure;
        let lines = wrap_text(
            text,
            self.right() - self.x,
            self.right() - self.left(),
            |piece| measure.width(piece, &style),
        );

        let mut segments = Vec::with_capacity(lines.len());
        for (index, line) in lines.iter().enumerate() {
            if index > 0 {
                self.new_line();
                self.ensure_room();
            }
            if line.is_empty() {
                continue;
            }
            let width = self.measure.width(line, &self.style);
            let (x, y, page) = (self.x, self.y, self.page);
            self.emit_text(line, x, y, page);
            segments.push(Segment { page, x, y, width });
            self.x += width;
        }
        segments
    }

    fn emit_text(&mut self, text: &str, x: f32, y: f32, page: usize) {
        self.commands.push(DrawCommand::Text(TextRun {
            text: text.to_string(),
            x,
            y,
            page,
            style: self.style,
        }));
        self.line_open = true;
    }
}
