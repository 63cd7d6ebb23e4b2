//! Round-trip properties of the Markdown dialect

use proptest::prelude::*;
use resumd_babel::formats::markdown::{parse_markdown, serialize_markdown};
use resumd_babel::model::{Document, Id, Item, Section, SequentialIds};
use std::sync::Arc;

type Shape = Vec<(String, Vec<(String, String)>)>;

fn title() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,&]{0,15}".prop_map(|t| t.trim().to_string())
}

fn content() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z0-9 ,.*\\-\\[\\]()]{0,24}", 0..5)
        .prop_map(|lines| lines.join("\n").trim().to_string())
}

fn shape() -> impl Strategy<Value = Shape> {
    prop::collection::vec(
        (
            title(),
            prop::collection::vec((title(), content()), 0..4),
        ),
        0..5,
    )
}

fn build(shape: &Shape) -> Document {
    let ids = Arc::new(SequentialIds::with_prefix("gen-"));
    let mut next = 0;
    let mut id = || {
        next += 1;
        Id::new(format!("gen-{next}"))
    };
    let sections = shape
        .iter()
        .map(|(section_title, items)| {
            let mut section = Section::new(id(), section_title.clone());
            for (item_title, body) in items {
                section
                    .items
                    .push(Arc::new(Item::new(id(), item_title.clone(), body.clone())));
            }
            section
        })
        .collect();
    Document::from_sections(sections, ids)
}

fn shape_of(doc: &Document) -> Shape {
    doc.sections()
        .iter()
        .map(|s| {
            (
                s.title.clone(),
                s.items
                    .iter()
                    .map(|i| (i.title.clone(), i.content.clone()))
                    .collect(),
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn visible_documents_round_trip(shape in shape()) {
        let doc = build(&shape);
        let reparsed = parse_markdown(&serialize_markdown(&doc));
        prop_assert_eq!(shape_of(&reparsed), shape);
    }

    #[test]
    fn reserializing_is_idempotent(shape in shape()) {
        let once = serialize_markdown(&build(&shape));
        let twice = serialize_markdown(&parse_markdown(&once));
        prop_assert_eq!(twice, once);
    }
}

#[test]
fn test_section_and_item_order_is_preserved() {
    let source = "## B\n\n### b2\n\n### b1\n\n## A\n\n### a1\n";
    let doc = parse_markdown(source);
    assert_eq!(
        shape_of(&doc),
        vec![
            (
                "B".to_string(),
                vec![
                    ("b2".to_string(), String::new()),
                    ("b1".to_string(), String::new())
                ]
            ),
            ("A".to_string(), vec![("a1".to_string(), String::new())]),
        ]
    );
    assert_eq!(serialize_markdown(&doc), source);
}
