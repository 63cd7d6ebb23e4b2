//! Copy-on-write edit operations.
//!
//! Every operation leaves `self` untouched and returns the next snapshot.
//! Unknown section or item ids make the operation a no-op: the returned
//! snapshot is equal to (and shares every section with) the input.

use super::{Document, Id, Item, Section, NEW_ITEM_CONTENT, NEW_ITEM_TITLE, NEW_SECTION_TITLE};
use crate::common::links;
use std::sync::Arc;

impl Document {
    pub fn toggle_section_visibility(&self, section_id: &Id) -> Document {
        self.map_section(section_id, |section| {
            Some(Section {
                visible: !section.visible,
                ..section.clone()
            })
        })
    }

    pub fn toggle_item_visibility(&self, section_id: &Id, item_id: &Id) -> Document {
        self.map_item(section_id, item_id, |item| Item {
            visible: !item.visible,
            ..item.clone()
        })
    }

    /// Replace a section title verbatim. Empty titles are allowed.
    pub fn rename_section(&self, section_id: &Id, title: &str) -> Document {
        self.map_section(section_id, |section| {
            Some(Section {
                title: title.to_string(),
                ..section.clone()
            })
        })
    }

    /// Replace an item title verbatim. Empty titles are allowed.
    pub fn rename_item(&self, section_id: &Id, item_id: &Id, title: &str) -> Document {
        self.map_item(section_id, item_id, |item| Item {
            title: title.to_string(),
            ..item.clone()
        })
    }

    pub fn update_item_content(&self, section_id: &Id, item_id: &Id, content: &str) -> Document {
        self.map_item(section_id, item_id, |item| Item {
            content: content.to_string(),
            ..item.clone()
        })
    }

    /// Append `[text](url)` to the end of an item's body.
    pub fn insert_link(&self, section_id: &Id, item_id: &Id, text: &str, url: &str) -> Document {
        self.map_item(section_id, item_id, |item| Item {
            content: links::insert_link(&item.content, text, url),
            ..item.clone()
        })
    }

    /// Append a placeholder item with a fresh id.
    pub fn add_item(&self, section_id: &Id) -> Document {
        self.map_section(section_id, |section| {
            let mut next = section.clone();
            next.items.push(Arc::new(Item::new(
                self.next_id(),
                NEW_ITEM_TITLE,
                NEW_ITEM_CONTENT,
            )));
            Some(next)
        })
    }

    pub fn delete_item(&self, section_id: &Id, item_id: &Id) -> Document {
        self.map_section(section_id, |section| {
            let index = section.item_index(item_id)?;
            let mut next = section.clone();
            next.items.remove(index);
            Some(next)
        })
    }

    /// Move `moved_id` to the index currently held by `target_id`.
    ///
    /// The item is removed first and then inserted at the target's original
    /// index, so moving the last of `[A, B, C]` onto `A` gives `[C, A, B]`.
    pub fn reorder_items(&self, section_id: &Id, moved_id: &Id, target_id: &Id) -> Document {
        self.map_section(section_id, |section| {
            let from = section.item_index(moved_id)?;
            let to = section.item_index(target_id)?;
            if from == to {
                return None;
            }
            let mut next = section.clone();
            move_entry(&mut next.items, from, to);
            Some(next)
        })
    }

    /// Append an empty, visible placeholder section with a fresh id.
    pub fn add_section(&self) -> Document {
        let mut sections = self.sections.clone();
        sections.push(Arc::new(Section::new(self.next_id(), NEW_SECTION_TITLE)));
        self.derive(sections)
    }

    /// Remove a section together with all of its items.
    pub fn delete_section(&self, section_id: &Id) -> Document {
        let Some(index) = self.section_index(section_id) else {
            return self.clone();
        };
        let mut sections = self.sections.clone();
        sections.remove(index);
        self.derive(sections)
    }

    /// Same move semantics as [`Document::reorder_items`], applied to sections.
    pub fn reorder_sections(&self, moved_id: &Id, target_id: &Id) -> Document {
        let (Some(from), Some(to)) = (self.section_index(moved_id), self.section_index(target_id))
        else {
            return self.clone();
        };
        let mut sections = self.sections.clone();
        move_entry(&mut sections, from, to);
        self.derive(sections)
    }

    /// Rebuild one section; `None` from `edit` means "no change".
    pub(crate) fn map_section(
        &self,
        section_id: &Id,
        edit: impl FnOnce(&Section) -> Option<Section>,
    ) -> Document {
        let Some(index) = self.section_index(section_id) else {
            return self.clone();
        };
        let Some(replacement) = edit(&self.sections[index]) else {
            return self.clone();
        };
        let mut sections = self.sections.clone();
        sections[index] = Arc::new(replacement);
        self.derive(sections)
    }

    fn map_item(&self, section_id: &Id, item_id: &Id, edit: impl FnOnce(&Item) -> Item) -> Document {
        self.map_section(section_id, |section| {
            let index = section.item_index(item_id)?;
            let mut next = section.clone();
            next.items[index] = Arc::new(edit(&section.items[index]));
            Some(next)
        })
    }
}

fn move_entry<T>(entries: &mut Vec<T>, from: usize, to: usize) {
    let entry = entries.remove(from);
    entries.insert(to, entry);
}
