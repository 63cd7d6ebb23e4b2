use proptest::prelude::*;
use resumd_babel::layout::wrap::wrap_text;
use resumd_babel::layout::{Helvetica, TextMeasure, TextStyle, Color};

fn chars(text: &str) -> f32 {
    text.chars().count() as f32
}

fn squash(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

proptest! {
    #[test]
    fn lines_fit_and_keep_every_character(
        text in "[a-z]{1,12}( {1,3}[a-z]{1,12}){0,20}",
        width in 1usize..40,
    ) {
        let width = width as f32;
        let lines = wrap_text(&text, width, width, chars);

        prop_assert!(!lines.is_empty());
        for line in &lines {
            prop_assert!(!line.is_empty());
            prop_assert!(chars(line) <= width, "{:?} wider than {}", line, width);
            prop_assert_eq!(line.trim(), line.as_str());
        }
        prop_assert_eq!(squash(&lines.concat()), squash(&text));
    }

    #[test]
    fn wide_enough_lines_never_split_words(
        words in prop::collection::vec("[a-z]{1,8}", 1..20),
    ) {
        let text = words.join(" ");
        let lines = wrap_text(&text, 8.0, 8.0, chars);
        let rewrapped: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        prop_assert_eq!(rewrapped, words.iter().map(String::as_str).collect::<Vec<_>>());
    }
}

#[test]
fn test_helvetica_wrapping_respects_measured_width() {
    let style = TextStyle {
        font_size: 10.0,
        bold: false,
        italic: false,
        color: Color::Text,
    };
    let text = "Designed and shipped a distributed cache that cut database load in half";
    let lines = wrap_text(text, 120.0, 120.0, |piece| Helvetica.width(piece, &style));
    assert!(lines.len() > 1);
    for line in &lines {
        assert!(Helvetica.width(line, &style) <= 120.0);
    }
}
