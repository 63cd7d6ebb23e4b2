//! HTML serialization (Document → HTML export)
//!
//! Pipeline: Document → ContentTree → RcDom → HTML string → full page.

use super::{HtmlTheme, BASELINE_CSS};
use crate::error::FormatError;
use crate::ir::{from_model, ContentNode, ContentTree};
use crate::model::Document;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const DOCUMENT_TITLE: &str = "Resume";

/// Options for HTML serialization
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    pub theme: HtmlTheme,
    /// Appended after the baseline and theme CSS
    pub custom_css: Option<String>,
    /// Print ` (url)` after every link
    pub show_full_urls: bool,
}

impl HtmlOptions {
    pub fn new(theme: HtmlTheme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }
}

/// Serialize the visible part of `doc` to a complete HTML page
pub fn serialize_to_html(doc: &Document, options: &HtmlOptions) -> Result<String, FormatError> {
    render_tree(&from_model(doc), options)
}

/// Render an already mapped content tree to a complete HTML page
pub fn render_tree(tree: &ContentTree, options: &HtmlOptions) -> Result<String, FormatError> {
    let container = create_element("div", vec![("class", "resume-document")]);
    for node in &tree.nodes {
        append_node(&container, node, options);
    }
    let body = serialize_children(&container)?;
    Ok(wrap_in_document(&body, options))
}

fn append_node(parent: &Handle, node: &ContentNode, options: &HtmlOptions) {
    match node {
        ContentNode::Heading { level, children } => {
            let tag = format!("h{}", (*level).clamp(1, 6));
            let class = match level {
                2 => vec![("class", "resume-section-title")],
                3 => vec![("class", "resume-item-title")],
                _ => vec![],
            };
            let heading = append(parent, create_element(&tag, class));
            append_all(&heading, children, options);
        }
        ContentNode::Paragraph(children) => {
            let paragraph = append(parent, create_element("p", vec![("class", "resume-paragraph")]));
            append_all(&paragraph, children, options);
        }
        ContentNode::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            let list = append(parent, create_element(tag, vec![("class", "resume-list")]));
            for item in items {
                match item {
                    ContentNode::ListItem(_) => append_node(&list, item, options),
                    other => {
                        let li = append(&list, create_element("li", vec![]));
                        append_node(&li, other, options);
                    }
                }
            }
        }
        ContentNode::ListItem(children) => {
            let item = append(parent, create_element("li", vec![]));
            append_all(&item, children, options);
        }
        ContentNode::Link { url, text } => {
            let anchor = append(
                parent,
                create_element(
                    "a",
                    vec![
                        ("href", url.as_str()),
                        ("target", "_blank"),
                        ("rel", "noopener noreferrer"),
                    ],
                ),
            );
            append(&anchor, create_text(text));
            if options.show_full_urls {
                append(parent, create_text(" "));
                let span = append(parent, create_element("span", vec![("class", "resume-url")]));
                append(&span, create_text(&format!("({url})")));
            }
        }
        ContentNode::Emphasis {
            bold,
            italic,
            children,
        } => {
            let mut target = parent.clone();
            if *bold {
                target = append(&target, create_element("strong", vec![]));
            }
            if *italic {
                target = append(&target, create_element("em", vec![]));
            }
            append_all(&target, children, options);
        }
        ContentNode::Break => {
            append(parent, create_element("br", vec![]));
        }
        ContentNode::Text(value) => {
            append(parent, create_text(value));
        }
    }
}

fn append_all(parent: &Handle, children: &[ContentNode], options: &HtmlOptions) {
    for child in children {
        append_node(parent, child, options);
    }
}

fn append(parent: &Handle, child: Handle) -> Handle {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child.clone());
    child
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize the children of `container` (each including its own tag)
fn serialize_children(container: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in container.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
        output.push(b'\n');
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

fn wrap_in_document(body_html: &str, options: &HtmlOptions) -> String {
    let theme_css = options.theme.css();
    let custom_css = options.custom_css.as_deref().unwrap_or("");
    let title = html_escape(DOCUMENT_TITLE);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="resumd">
  <title>{title}</title>
  <style>
{BASELINE_CSS}
{theme_css}
{custom_css}
  </style>
</head>
<body>
<div class="resume-document">
{body_html}</div>
</body>
</html>
"#
    )
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
