use resumd_babel::formats::markdown::parse_markdown;
use resumd_babel::model::{Document, Id};
use std::sync::Arc;

const SOURCE: &str = "## Experience\n\n### A\n\na\n\n### B\n\nb\n\n### C\n\nc\n\n## Education\n\n### MIT\n\nBSc\n";

fn item_titles(doc: &Document, section: usize) -> Vec<&str> {
    doc.sections()[section]
        .items
        .iter()
        .map(|i| i.title.as_str())
        .collect()
}

#[test]
fn test_reorder_last_onto_first() {
    let doc = parse_markdown(SOURCE);
    let section = doc.sections()[0].id.clone();
    let a = doc.sections()[0].items[0].id.clone();
    let c = doc.sections()[0].items[2].id.clone();

    let moved = doc.reorder_items(&section, &c, &a);
    assert_eq!(item_titles(&moved, 0), vec!["C", "A", "B"]);
    assert_eq!(item_titles(&doc, 0), vec!["A", "B", "C"]);
}

#[test]
fn test_reorder_first_onto_last() {
    let doc = parse_markdown(SOURCE);
    let section = doc.sections()[0].id.clone();
    let a = doc.sections()[0].items[0].id.clone();
    let c = doc.sections()[0].items[2].id.clone();

    let moved = doc.reorder_items(&section, &a, &c);
    assert_eq!(item_titles(&moved, 0), vec!["B", "C", "A"]);
}

#[test]
fn test_reorder_sections() {
    let doc = parse_markdown(SOURCE);
    let experience = doc.sections()[0].id.clone();
    let education = doc.sections()[1].id.clone();
    let moved = doc.reorder_sections(&education, &experience);
    let titles: Vec<_> = moved.sections().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Education", "Experience"]);
}

#[test]
fn test_edits_never_touch_the_previous_snapshot() {
    let doc = parse_markdown(SOURCE);
    let section = doc.sections()[0].id.clone();
    let item = doc.sections()[0].items[1].id.clone();

    let edited = doc
        .rename_item(&section, &item, "Renamed")
        .update_item_content(&section, &item, "new body")
        .toggle_item_visibility(&section, &item);

    let before = doc.item(&section, &item).unwrap();
    assert_eq!((before.title.as_str(), before.content.as_str()), ("B", "b"));
    assert!(before.visible);

    let after = edited.item(&section, &item).unwrap();
    assert_eq!((after.title.as_str(), after.content.as_str()), ("Renamed", "new body"));
    assert!(!after.visible);
}

#[test]
fn test_untouched_sections_are_shared() {
    let doc = parse_markdown(SOURCE);
    let section = doc.sections()[0].id.clone();
    let edited = doc.rename_section(&section, "Work");
    assert!(!Arc::ptr_eq(&doc.sections()[0], &edited.sections()[0]));
    assert!(Arc::ptr_eq(&doc.sections()[1], &edited.sections()[1]));
}

#[test]
fn test_unknown_ids_are_no_ops() {
    let doc = parse_markdown(SOURCE);
    let section = doc.sections()[0].id.clone();
    let missing = Id::new("nope");

    assert_eq!(doc.toggle_section_visibility(&missing), doc);
    assert_eq!(doc.toggle_item_visibility(&section, &missing), doc);
    assert_eq!(doc.delete_item(&missing, &missing), doc);
    assert_eq!(doc.add_item(&missing), doc);
    assert_eq!(doc.reorder_items(&section, &missing, &missing), doc);
    assert_eq!(doc.delete_section(&missing), doc);
}

#[test]
fn test_add_and_delete() {
    let doc = parse_markdown(SOURCE);
    let education = doc.sections()[1].id.clone();

    let grown = doc.add_item(&education).add_section();
    assert_eq!(grown.sections().len(), 3);
    assert_eq!(grown.sections()[1].items.len(), 2);
    let added = grown.sections()[1].items[1].clone();
    assert!(added.visible);
    assert!(doc.all_ids().all(|id| *id != added.id));

    let shrunk = grown
        .delete_item(&education, &added.id)
        .delete_section(&grown.sections()[2].id);
    assert_eq!(shrunk, doc);
}

#[test]
fn test_deleted_ids_are_not_reused() {
    let doc = parse_markdown(SOURCE);
    let education = doc.sections()[1].id.clone();
    let mit = doc.sections()[1].items[0].id.clone();

    let next = doc.delete_item(&education, &mit).add_item(&education);
    assert_ne!(next.sections()[1].items[0].id, mit);
}

#[test]
fn test_document_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Document>();
}

#[test]
fn test_snapshot_moves_across_threads() {
    let doc = parse_markdown(SOURCE);
    let handle = std::thread::spawn(move || doc.sections().len());
    assert_eq!(handle.join().unwrap(), 2);
}
