//! Export tests for HTML (Document → HTML)

use resumd_babel::format::{Format, SerializedDocument};
use resumd_babel::formats::html::{get_default_css, HtmlFormat};
use resumd_babel::formats::markdown::parse_markdown;
use std::collections::HashMap;
use std::fs;
use tempfile::tempdir;

const SOURCE: &str = include_str!("../fixtures/resume.md");

fn render(options: &HashMap<String, String>) -> String {
    let doc = parse_markdown(SOURCE);
    match HtmlFormat::default()
        .serialize_with_options(&doc, options)
        .expect("html export")
    {
        SerializedDocument::Text(html) => html,
        SerializedDocument::Binary(_) => panic!("expected text output"),
    }
}

#[test]
fn test_full_page_structure() {
    let html = render(&HashMap::new());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<meta name=\"generator\" content=\"resumd\">"));
    assert_eq!(html.matches("class=\"resume-section-title\"").count(), 3);
    assert_eq!(html.matches("class=\"resume-item-title\"").count(), 3);
    assert!(html.contains("<ol class=\"resume-list\">"));
    assert!(html.contains("<em>v2</em>"));
}

#[test]
fn test_hidden_sections_are_omitted() {
    let doc = parse_markdown(SOURCE);
    let skills = doc.sections()[2].id.clone();
    let html = HtmlFormat::default()
        .serialize(&doc.toggle_section_visibility(&skills))
        .unwrap();
    assert!(!html.contains("Skills"));
    assert!(!html.contains("Python, Go, Rust"));
}

#[test]
fn test_theme_and_custom_css_options() {
    let dir = tempdir().unwrap();
    let css_path = dir.path().join("extra.css");
    fs::write(&css_path, ".resume-document { max-width: 40rem; }").unwrap();

    let mut options = HashMap::new();
    options.insert("theme".to_string(), "serif".to_string());
    options.insert("css-path".to_string(), css_path.display().to_string());
    let html = render(&options);

    assert!(html.contains("Georgia"));
    assert!(html.contains("max-width: 40rem"));
}

#[test]
fn test_unknown_theme_is_an_error() {
    let doc = parse_markdown(SOURCE);
    let mut options = HashMap::new();
    options.insert("theme".to_string(), "neon".to_string());
    assert!(HtmlFormat::default()
        .serialize_with_options(&doc, &options)
        .is_err());
}

#[test]
fn test_default_css_is_embedded() {
    let html = render(&HashMap::new());
    let css = get_default_css();
    assert!(css.contains(".resume-section-title"));
    assert!(html.contains(".resume-section-title"));
}
