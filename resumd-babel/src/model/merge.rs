//! Folding a separately parsed batch of items into the project-like section.

use super::{Document, Item, Section};
use std::sync::Arc;

/// Case-insensitive keyword identifying the section that receives additional items.
pub const PROJECT_KEYWORD: &str = "project";
/// Title of the section created when no existing title contains [`PROJECT_KEYWORD`].
pub const PROJECTS_SECTION_TITLE: &str = "Projects";

impl Document {
    /// Merge every item of `batch` into this document as additional items.
    ///
    /// The target is the first section whose title contains "project"
    /// (any case); a "Projects" section is appended when there is none. Items
    /// from an earlier merge are replaced wholesale, everything else in the
    /// target is kept. Merged items receive fresh ids from this document's
    /// generator and keep their title, content and visibility.
    pub fn merge_additional(&self, batch: &Document) -> Document {
        let incoming: Vec<Arc<Item>> = batch
            .sections()
            .iter()
            .flat_map(|section| section.items.iter())
            .map(|item| {
                Arc::new(Item {
                    id: self.next_id(),
                    title: item.title.clone(),
                    content: item.content.clone(),
                    visible: item.visible,
                    is_additional: true,
                })
            })
            .collect();

        let target = self
            .sections()
            .iter()
            .find(|section| section.title.to_lowercase().contains(PROJECT_KEYWORD))
            .map(|section| section.id.clone());

        match target {
            Some(section_id) => self.map_section(&section_id, |section| {
                let mut next = section.clone();
                next.items.retain(|item| !item.is_additional);
                next.items.extend(incoming);
                Some(next)
            }),
            None => {
                let mut section = Section::new(self.next_id(), PROJECTS_SECTION_TITLE);
                section.items = incoming;
                let mut sections = self.sections().to_vec();
                sections.push(Arc::new(section));
                self.derive(sections)
            }
        }
    }
}
