use resumd_babel::formats::markdown::{parse_markdown, serialize_markdown};
use resumd_babel::model::PROJECTS_SECTION_TITLE;

#[test]
fn test_merge_into_existing_project_section() {
    let base = parse_markdown("## Side Projects\n\n### resumd\n\nCLI\n\n## Skills\n\n### \n\nRust\n");
    let batch = parse_markdown("## Extra\n\n### Crawler\n\nAsync\n");

    let merged = base.merge_additional(&batch);
    let projects = &merged.sections()[0];
    let titles: Vec<_> = projects.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["resumd", "Crawler"]);
    assert!(!projects.items[0].is_additional);
    assert!(projects.items[1].is_additional);
    assert_eq!(merged.sections().len(), 2);
}

#[test]
fn test_second_merge_replaces_first_batch() {
    let base = parse_markdown("## Projects\n\n### Own\n\nmine\n");
    let first = base.merge_additional(&parse_markdown("## x\n\n### One\n\n1\n\n### Two\n\n2\n"));
    let second = first.merge_additional(&parse_markdown("## y\n\n### Three\n\n3\n"));

    let titles: Vec<_> = second.sections()[0]
        .items
        .iter()
        .map(|i| i.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Own", "Three"]);
}

#[test]
fn test_merge_appends_projects_section() {
    let base = parse_markdown("## Skills\n\n### \n\nRust\n");
    let merged = base.merge_additional(&parse_markdown("## x\n\n### Crawler\n\nAsync\n"));

    assert_eq!(merged.sections().len(), 2);
    assert_eq!(merged.sections()[1].title, PROJECTS_SECTION_TITLE);
    assert!(serialize_markdown(&merged).ends_with("## Projects\n\n### Crawler\n\nAsync\n"));
}

#[test]
fn test_merged_ids_do_not_collide() {
    let base = parse_markdown("## Projects\n\n### Own\n\nmine\n");
    let batch = parse_markdown("## x\n\n### Other\n\ntheirs\n");
    let merged = base.merge_additional(&batch);

    let mut ids: Vec<_> = merged.all_ids().map(|id| id.to_string()).collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}
