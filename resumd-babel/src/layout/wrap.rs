//! Greedy word wrapping.

/// Split `text` into lines no wider than the available width.
///
/// Whitespace is collapsed to single spaces. The first line has
/// `first_width` available (the rest of a partially filled line); every
/// following line has `width`. When not even the first word fits in
/// `first_width` the first line is returned empty, so the caller moves to a
/// fresh line before drawing. Words wider than `width` are broken between
/// characters; a single character wider than `width` is placed alone.
pub fn wrap_text<F>(text: &str, first_width: f32, width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut wrapper = Wrapper {
        measure: &measure,
        width,
        available: first_width,
        lines: Vec::new(),
        current: String::new(),
    };
    for word in text.split_whitespace() {
        wrapper.push_word(word);
    }
    wrapper.finish()
}

struct Wrapper<'m, F> {
    measure: &'m F,
    width: f32,
    available: f32,
    lines: Vec<String>,
    current: String,
}

impl<F> Wrapper<'_, F>
where
    F: Fn(&str) -> f32,
{
    fn fits(&self, text: &str) -> bool {
        (self.measure)(text) <= self.available
    }

    fn push_word(&mut self, word: &str) {
        if !self.current.is_empty() {
            let candidate = format!("{} {}", self.current, word);
            if self.fits(&candidate) {
                self.current = candidate;
                return;
            }
            self.new_line();
        } else if self.lines.is_empty() && self.available < self.width && !self.fits(word) {
            self.new_line();
        }

        if self.fits(word) {
            self.current.push_str(word);
        } else {
            self.break_word(word);
        }
    }

    fn break_word(&mut self, word: &str) {
        let mut piece = String::new();
        for ch in word.chars() {
            piece.push(ch);
            if piece.chars().nth(1).is_some() && !self.fits(&piece) {
                piece.pop();
                self.current = std::mem::take(&mut piece);
                self.new_line();
                piece.push(ch);
            }
        }
        self.current = piece;
    }

    fn new_line(&mut self) {
        self.lines.push(std::mem::take(&mut self.current));
        self.available = self.width;
    }

    fn finish(mut self) -> Vec<String> {
        if !self.current.is_empty() {
            self.lines.push(self.current);
        }
        self.lines
    }
}
