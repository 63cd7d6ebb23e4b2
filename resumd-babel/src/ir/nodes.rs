//! The content tree handed to the layout engine and the HTML serializer.
//!
//! Block nodes (`Heading`, `Paragraph`, `List`, `ListItem`) hold inline nodes
//! (`Text`, `Link`, `Emphasis`, `Break`). A `ListItem` may also hold a nested
//! `List` after its inline content.

/// Root of a content tree: the ordered top-level blocks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContentTree {
    pub nodes: Vec<ContentNode>,
}

impl ContentTree {
    pub fn new(nodes: Vec<ContentNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    Heading {
        level: u8,
        children: Vec<ContentNode>,
    },
    Paragraph(Vec<ContentNode>),
    List {
        ordered: bool,
        items: Vec<ContentNode>,
    },
    ListItem(Vec<ContentNode>),
    Link {
        url: String,
        text: String,
    },
    Emphasis {
        bold: bool,
        italic: bool,
        children: Vec<ContentNode>,
    },
    /// Hard line break inside a block.
    Break,
    Text(String),
}

impl ContentNode {
    pub fn text(value: impl Into<String>) -> Self {
        ContentNode::Text(value.into())
    }

    pub fn heading(level: u8, title: impl Into<String>) -> Self {
        ContentNode::Heading {
            level,
            children: vec![ContentNode::text(title)],
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        ContentNode::Link {
            url: url.into(),
            text: text.into(),
        }
    }

    pub fn bold(children: Vec<ContentNode>) -> Self {
        ContentNode::Emphasis {
            bold: true,
            italic: false,
            children,
        }
    }

    pub fn italic(children: Vec<ContentNode>) -> Self {
        ContentNode::Emphasis {
            bold: false,
            italic: true,
            children,
        }
    }

    /// Concatenated visible text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ContentNode::Text(value) => out.push_str(value),
            ContentNode::Link { text, .. } => out.push_str(text),
            ContentNode::Break => out.push('\n'),
            ContentNode::Heading { children, .. }
            | ContentNode::Paragraph(children)
            | ContentNode::ListItem(children)
            | ContentNode::Emphasis { children, .. } => {
                children.iter().for_each(|child| child.collect_text(out))
            }
            ContentNode::List { items, .. } => items.iter().for_each(|item| {
                item.collect_text(out);
                out.push('\n');
            }),
        }
    }
}
