//! The editable document model: ordered sections holding ordered items.
//!
//! A [`Document`] is an immutable snapshot. Edit operations (see `edit.rs` and
//! `merge.rs`) return a new snapshot that shares every untouched section and
//! item with the one it was derived from, so a caller holding an older
//! snapshot never observes a later edit.
//!
//! Item bodies are kept as raw Markdown. Links inside them are parsed on
//! demand (see [`crate::common::links`]), never stored pre-split.

mod edit;
mod ids;
mod merge;

pub use ids::{Id, IdGenerator, RandomIds, SequentialIds};
pub use merge::{PROJECTS_SECTION_TITLE, PROJECT_KEYWORD};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Placeholder title given to items created with [`Document::add_item`].
pub const NEW_ITEM_TITLE: &str = "New Item";
/// Placeholder body given to items created with [`Document::add_item`].
pub const NEW_ITEM_CONTENT: &str = "Add your content here";
/// Placeholder title given to sections created with [`Document::add_section`].
pub const NEW_SECTION_TITLE: &str = "New Section";

/// A titled content block within a section (e.g. one job entry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: Id,
    pub title: String,
    /// Raw Markdown body; may contain `[text](url)` links and newlines.
    pub content: String,
    pub visible: bool,
    /// Set on items folded in by [`Document::merge_additional`].
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_additional: bool,
}

impl Item {
    pub fn new(id: Id, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            visible: true,
            is_additional: false,
        }
    }
}

/// Top-level grouping (e.g. "Experience") with a title and ordered items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: Id,
    pub title: String,
    pub visible: bool,
    pub items: Vec<Arc<Item>>,
}

impl Section {
    pub fn new(id: Id, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            visible: true,
            items: Vec::new(),
        }
    }

    /// Items that survive rendering, in order.
    pub fn visible_items(&self) -> impl Iterator<Item = &Item> {
        self.items
            .iter()
            .map(|item| item.as_ref())
            .filter(|item| item.visible)
    }

    pub fn item(&self, id: &Id) -> Option<&Item> {
        self.items
            .iter()
            .map(|item| item.as_ref())
            .find(|item| &item.id == id)
    }

    pub(crate) fn item_index(&self, id: &Id) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }
}

/// An immutable snapshot of the whole document.
#[derive(Clone)]
pub struct Document {
    sections: Vec<Arc<Section>>,
    ids: Arc<dyn IdGenerator>,
}

impl Document {
    /// An empty document using a [`SequentialIds`] generator.
    pub fn new() -> Self {
        Self::with_ids(Arc::new(SequentialIds::new()))
    }

    /// An empty document drawing ids from `ids`.
    pub fn with_ids(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            sections: Vec::new(),
            ids,
        }
    }

    /// Build a document from already-identified sections.
    ///
    /// The caller guarantees that the ids in `sections` are unique and that
    /// `ids` never produces one of them.
    pub fn from_sections(sections: Vec<Section>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            sections: sections.into_iter().map(Arc::new).collect(),
            ids,
        }
    }

    pub fn sections(&self) -> &[Arc<Section>] {
        &self.sections
    }

    pub fn section(&self, id: &Id) -> Option<&Section> {
        self.sections
            .iter()
            .map(|section| section.as_ref())
            .find(|section| &section.id == id)
    }

    pub fn item(&self, section_id: &Id, item_id: &Id) -> Option<&Item> {
        self.section(section_id)?.item(item_id)
    }

    /// Sections that survive rendering, in order.
    pub fn visible_sections(&self) -> impl Iterator<Item = &Section> {
        self.sections
            .iter()
            .map(|section| section.as_ref())
            .filter(|section| section.visible)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// The generator shared by this snapshot and every snapshot derived from it.
    pub fn id_generator(&self) -> &Arc<dyn IdGenerator> {
        &self.ids
    }

    /// Every section and item id, in document order.
    pub fn all_ids(&self) -> impl Iterator<Item = &Id> {
        self.sections.iter().flat_map(|section| {
            std::iter::once(&section.id).chain(section.items.iter().map(|item| &item.id))
        })
    }

    pub(crate) fn section_index(&self, id: &Id) -> Option<usize> {
        self.sections.iter().position(|section| &section.id == id)
    }

    pub(crate) fn next_id(&self) -> Id {
        self.ids.next_id()
    }

    pub(crate) fn derive(&self, sections: Vec<Arc<Section>>) -> Document {
        Document {
            sections,
            ids: Arc::clone(&self.ids),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.sections == other.sections
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("sections", &self.sections)
            .finish()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
