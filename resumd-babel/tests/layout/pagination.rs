use resumd_babel::ir::{from_model, ContentNode, ContentTree};
use resumd_babel::formats::markdown::parse_markdown;
use resumd_babel::layout::{
    layout, layout_with, Color, DrawCommand, Helvetica, LayoutSettings, PageSize, TextMeasure,
    TextStyle,
};
use resumd_babel::LayoutError;

/// Every glyph is exactly one point wide, independent of style.
struct Unit;

impl TextMeasure for Unit {
    fn width(&self, text: &str, _style: &TextStyle) -> f32 {
        text.chars().count() as f32
    }
}

fn tall_settings(lines_per_page: usize) -> LayoutSettings {
    let margin = 10.0;
    let line = 10.0;
    LayoutSettings {
        font_size: 10.0,
        line_height: line,
        margin,
        show_full_urls: false,
        page: PageSize {
            width: 500.0,
            height: 2.0 * margin + line * lines_per_page as f32,
        },
    }
}

fn lines(count: usize) -> ContentTree {
    let mut children = Vec::new();
    for index in 0..count {
        if index > 0 {
            children.push(ContentNode::Break);
        }
        children.push(ContentNode::text(format!("line{index}")));
    }
    ContentTree::new(vec![ContentNode::Paragraph(children)])
}

#[test]
fn test_page_break_when_cursor_passes_bottom_margin() {
    let settings = tall_settings(5);
    let placed = layout_with(&lines(12), &settings, &Unit).unwrap();

    let pages: Vec<usize> = placed.text_runs().map(|run| run.page).collect();
    assert_eq!(placed.page_count, *pages.last().unwrap() + 1);
    assert!(placed.page_count >= 2);

    let bottom = settings.page.height - settings.margin;
    for run in placed.text_runs() {
        assert!(run.y >= settings.margin, "{} starts above the margin", run.text);
        assert!(run.y <= bottom, "{} starts below the bottom margin", run.text);
    }
}

#[test]
fn test_runs_after_a_break_restart_at_top_margin() {
    let settings = tall_settings(5);
    let placed = layout_with(&lines(12), &settings, &Unit).unwrap();
    let runs: Vec<_> = placed.text_runs().collect();
    for pair in runs.windows(2) {
        if pair[1].page > pair[0].page {
            assert_eq!(pair[1].y, settings.margin);
            assert_eq!(pair[1].page, pair[0].page + 1);
        }
    }
}

#[test]
fn test_long_text_wraps_within_right_margin() {
    let settings = LayoutSettings::default();
    let sentence = "Shipped a distributed build cache that cut CI time in half across teams. ";
    let tree = ContentTree::new(vec![ContentNode::Paragraph(vec![ContentNode::text(
        sentence.repeat(20),
    )])]);
    let placed = layout(&tree, &settings).unwrap();

    let right = settings.page.width - settings.margin;
    assert!(placed.text_runs().count() > 10);
    for run in placed.text_runs() {
        let end = run.x + Helvetica.width(&run.text, &run.style);
        assert!(end <= right + 1e-3, "{:?} ends at {end}, past {right}", run.text);
    }
}

#[test]
fn test_empty_tree_is_one_blank_page() {
    let placed = layout(&ContentTree::default(), &LayoutSettings::default()).unwrap();
    assert_eq!(placed.page_count, 1);
    assert!(placed.commands.is_empty());
}

#[test]
fn test_invalid_settings_are_rejected() {
    let settings = LayoutSettings {
        margin: 306.0,
        ..LayoutSettings::default()
    };
    assert!(matches!(
        layout(&ContentTree::default(), &settings),
        Err(LayoutError::InvalidSettings(_))
    ));
}

#[test]
fn test_resume_fits_inside_margins() {
    let source = include_str!("../fixtures/resume.md");
    let settings = LayoutSettings::default();
    let placed = layout(&from_model(&parse_markdown(source)), &settings).unwrap();

    assert_eq!(placed.page_count, 1);
    let right = settings.page.width - settings.margin;
    for run in placed.text_runs() {
        assert!(run.x >= settings.margin);
        let end = run.x + Helvetica.width(&run.text, &run.style);
        assert!(end <= right + 1e-3, "{:?} ends at {end}, past {right}", run.text);
    }
    let headings: Vec<_> = placed
        .text_runs()
        .filter(|run| run.style.bold && run.style.font_size > settings.font_size * 1.12)
        .map(|run| run.text.as_str())
        .collect();
    assert_eq!(headings, vec!["Summary", "Experience", "Skills"]);
}

#[test]
fn test_links_become_regions() {
    let source = include_str!("../fixtures/resume.md");
    let placed = layout(&from_model(&parse_markdown(source)), &LayoutSettings::default()).unwrap();

    let links: Vec<_> = placed.links().collect();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].url, "https://github.com/jdoe");
    assert!(links[0].rect.width > 0.0);

    let link_text: Vec<_> = placed
        .text_runs()
        .filter(|run| run.style.color == Color::Link)
        .map(|run| run.text.as_str())
        .collect();
    assert_eq!(link_text.join(" "), "open source");
}

#[test]
fn test_full_urls_follow_links() {
    let tree = from_model(&parse_markdown("## S\n\n### I\n\n[gh](https://github.com/x)\n"));
    let settings = LayoutSettings {
        show_full_urls: true,
        ..LayoutSettings::default()
    };
    let placed = layout(&tree, &settings).unwrap();
    let muted: Vec<_> = placed
        .text_runs()
        .filter(|run| run.style.color == Color::Muted)
        .map(|run| run.text.as_str())
        .collect();
    assert_eq!(muted, vec!["(https://github.com/x)"]);
}

#[test]
fn test_a4_page_size_is_reported() {
    let settings = LayoutSettings {
        page: PageSize::A4,
        ..LayoutSettings::default()
    };
    let placed = layout(&lines(3), &settings).unwrap();
    assert_eq!(placed.page_size, PageSize::A4);
}

#[test]
fn test_commands_serialize_to_tagged_json() {
    let placed = layout(&lines(1), &LayoutSettings::default()).unwrap();
    let json = serde_json::to_value(&placed).unwrap();
    assert_eq!(json["commands"][0]["kind"], "text");
    assert!(matches!(placed.commands[0], DrawCommand::Text(_)));
}
