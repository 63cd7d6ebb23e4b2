//! Markdown serialization (Document → Markdown export)
//!
//! Only visible sections and visible items are written.

use crate::model::Document;

/// Render the visible part of `doc` in the resume dialect.
///
/// The output always ends with exactly one newline; a document with nothing
/// visible becomes `"\n"`.
pub fn serialize_markdown(doc: &Document) -> String {
    let mut lines: Vec<String> = Vec::new();

    for section in doc.visible_sections() {
        lines.push(format!("## {}", section.title));
        lines.push(String::new());

        for item in section.visible_items() {
            lines.push(format!("### {}", item.title));
            lines.push(String::new());
            let content = item.content.trim();
            if !content.is_empty() {
                lines.push(content.to_string());
                lines.push(String::new());
            }
        }
    }

    let mut output = lines.join("\n").trim().to_string();
    output.push('\n');
    output
}
