//! Text measurement.
//!
//! The layout engine never measures text itself; it asks a [`TextMeasure`].
//! [`Helvetica`] uses the Adobe font metrics of the base-14 Helvetica faces,
//! which is what the PDF renderer draws with, so measured and drawn widths
//! agree.

use super::TextStyle;

pub trait TextMeasure {
    /// Advance width of `text` in points when drawn with `style`.
    fn width(&self, text: &str, style: &TextStyle) -> f32;
}

/// Metrics of Helvetica and Helvetica-Bold. Oblique faces share upright widths.
#[derive(Debug, Clone, Copy, Default)]
pub struct Helvetica;

/// Glyph widths (1/1000 em) for ASCII 32..=126, Helvetica.
#[rustfmt::skip]
const REGULAR: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Glyph widths (1/1000 em) for ASCII 32..=126, Helvetica-Bold.
#[rustfmt::skip]
const BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const DEFAULT_WIDTH: u16 = 556;

fn glyph_width(ch: char, bold: bool) -> u16 {
    match ch {
        ' '..='~' => {
            let table = if bold { &BOLD } else { &REGULAR };
            table[ch as usize - 32]
        }
        '•' => 350,
        '–' => 556,
        '—' => 1000,
        '\u{a0}' => 278,
        _ => DEFAULT_WIDTH,
    }
}

impl TextMeasure for Helvetica {
    fn width(&self, text: &str, style: &TextStyle) -> f32 {
        let units: u32 = text
            .chars()
            .map(|ch| u32::from(glyph_width(ch, style.bold)))
            .sum();
        units as f32 * style.font_size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Color;

    fn style(bold: bool) -> TextStyle {
        TextStyle {
            font_size: 10.0,
            bold,
            italic: false,
            color: Color::Text,
        }
    }

    #[test]
    fn regular_widths() {
        let m = Helvetica;
        assert!((m.width("A", &style(false)) - 6.67).abs() < 1e-4);
        assert!((m.width("il", &style(false)) - 4.44).abs() < 1e-4);
        assert!((m.width(" ", &style(false)) - 2.78).abs() < 1e-4);
    }

    #[test]
    fn bold_is_wider() {
        let m = Helvetica;
        assert!(m.width("Rust", &style(true)) > m.width("Rust", &style(false)));
    }

    #[test]
    fn width_scales_with_font_size() {
        let m = Helvetica;
        let mut big = style(false);
        big.font_size = 20.0;
        assert!((m.width("go", &big) - 2.0 * m.width("go", &style(false))).abs() < 1e-4);
    }

    #[test]
    fn non_ascii_uses_fallbacks() {
        let m = Helvetica;
        assert!((m.width("•", &style(false)) - 3.5).abs() < 1e-4);
        assert!((m.width("é", &style(false)) - 5.56).abs() < 1e-4);
    }
}
