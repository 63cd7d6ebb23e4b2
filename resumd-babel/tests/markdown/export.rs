//! Export tests for the Markdown dialect (Document → Markdown)

use insta::assert_snapshot;
use resumd_babel::format::Format;
use resumd_babel::formats::markdown::{parse_markdown, serialize_markdown, MarkdownFormat};
use resumd_babel::model::Id;

const SOURCE: &str = "## Experience\n\n### Acme\n\nBuilt things\n\n### Hidden Co\n\nSecret\n\n## Hobbies\n\n### Chess\n\nBlitz\n";

#[test]
fn test_hidden_content_is_not_exported() {
    let doc = parse_markdown(SOURCE);
    let experience = doc.sections()[0].id.clone();
    let hidden_co = doc.sections()[0].items[1].id.clone();
    let hobbies = doc.sections()[1].id.clone();

    let edited = doc
        .toggle_item_visibility(&experience, &hidden_co)
        .toggle_section_visibility(&hobbies);

    assert_snapshot!(serialize_markdown(&edited).trim_end(), @r"
    ## Experience

    ### Acme

    Built things
    ");
}

#[test]
fn test_hidden_section_hides_visible_items() {
    let doc = parse_markdown(SOURCE);
    let hobbies = doc.sections()[1].id.clone();
    let edited = doc.toggle_section_visibility(&hobbies);
    assert!(edited.sections()[1].items[0].visible);
    assert!(!serialize_markdown(&edited).contains("Chess"));
}

#[test]
fn test_edits_show_up_in_export() {
    let doc = parse_markdown(SOURCE);
    let section = doc.sections()[0].id.clone();
    let item = doc.sections()[0].items[0].id.clone();
    let edited = doc
        .rename_item(&section, &item, "Acme Corp")
        .insert_link(&section, &item, "site", "https://acme.test");

    let markdown = MarkdownFormat.serialize(&edited).unwrap();
    assert!(markdown.contains("### Acme Corp\n\nBuilt things[site](https://acme.test)\n"));
}

#[test]
fn test_unknown_ids_leave_export_unchanged() {
    let doc = parse_markdown(SOURCE);
    let edited = doc.toggle_section_visibility(&Id::new("missing"));
    assert_eq!(serialize_markdown(&edited), serialize_markdown(&doc));
}

#[test]
fn test_empty_item_title_round_trip() {
    let source = "## Skills\n\n### \n\nPython, Go\n";
    let doc = parse_markdown(source);
    assert_eq!(doc.sections()[0].items[0].title, "");
    assert_eq!(serialize_markdown(&doc), source);
}
