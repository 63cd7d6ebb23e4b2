//! Import tests for the Markdown dialect (Markdown → Document)

use resumd_babel::format::Format;
use resumd_babel::formats::markdown::{parse_markdown, MarkdownFormat};
use resumd_babel::model::Document;
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}

fn titles(doc: &Document) -> Vec<(String, Vec<String>)> {
    doc.sections()
        .iter()
        .map(|s| {
            (
                s.title.clone(),
                s.items.iter().map(|i| i.title.clone()).collect(),
            )
        })
        .collect()
}

#[test]
fn test_fixture_structure() {
    let doc = MarkdownFormat
        .parse(&fixture("resume.md"))
        .expect("markdown never fails to parse");

    assert_eq!(
        titles(&doc),
        vec![
            ("Summary".to_string(), vec!["Profile".to_string()]),
            (
                "Experience".to_string(),
                vec![
                    "Acme Corp, Staff Engineer".to_string(),
                    "Initech, Engineer".to_string()
                ]
            ),
            ("Skills".to_string(), vec!["".to_string()]),
        ]
    );
}

#[test]
fn test_item_content_is_trimmed_raw_markdown() {
    let doc = parse_markdown(&fixture("resume.md"));
    let acme = &doc.sections()[1].items[0];
    assert_eq!(
        acme.content,
        "Led the **ingest** team.\n\n- Cut p99 latency by 40%\n- Shipped the *v2* query planner"
    );
}

#[test]
fn test_everything_starts_visible() {
    let doc = parse_markdown(&fixture("resume.md"));
    assert!(doc.sections().iter().all(|s| s.visible));
    assert!(doc
        .sections()
        .iter()
        .flat_map(|s| s.items.iter())
        .all(|i| i.visible && !i.is_additional));
}

#[test]
fn test_ids_are_unique() {
    let doc = parse_markdown(&fixture("resume.md"));
    let mut ids: Vec<_> = doc.all_ids().map(|id| id.to_string()).collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert_eq!(total, 3 + 4);
}

#[test]
fn test_text_before_first_section_is_dropped() {
    let doc = parse_markdown("# Jane Doe\nintro\n### Orphan\nbody\n## Real\n### Item\ntext\n");
    assert_eq!(doc.sections().len(), 1);
    assert_eq!(doc.sections()[0].title, "Real");
    assert_eq!(doc.sections()[0].items[0].content, "text");
}

#[test]
fn test_empty_input() {
    assert!(parse_markdown("").is_empty());
    assert!(parse_markdown("\n\n  \n").is_empty());
}
