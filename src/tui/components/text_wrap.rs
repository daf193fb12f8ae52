//! Word wrapping for review and detail text.
//!
//! Widths are display columns, so CJK text and emoji wrap where the
//! terminal would clip them. Leading indentation is repeated on
//! continuation lines and words wider than the panel are hard-wrapped.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wraps every line of `text` to `max_width` columns.
///
/// Empty lines are kept as paragraph breaks. A zero width returns the text
/// split into lines unchanged.
#[must_use]
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return text.lines().map(str::to_owned).collect();
    }

    text.lines()
        .flat_map(|line| wrap_line(line, max_width))
        .collect()
}

/// Hard-wraps `line` every `max_width` columns.
#[must_use]
pub fn hard_wrap(line: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || line.width() <= max_width {
        return vec![line.to_owned()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0_usize;
    for ch in line.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width.saturating_add(char_width) > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width = current_width.saturating_add(char_width);
    }
    lines.push(current);
    lines
}

fn wrap_line(line: &str, max_width: usize) -> Vec<String> {
    if line.width() <= max_width {
        return vec![line.to_owned()];
    }

    let trimmed = line.trim_start();
    let indent = line.strip_suffix(trimmed).unwrap_or_default();
    let indent_width = indent.width();
    if indent_width >= max_width {
        return hard_wrap(line, max_width);
    }

    let mut wrapper = LineWrapper::new(indent, max_width.saturating_sub(indent_width));
    for segment in segments(trimmed) {
        match segment {
            Segment::Word(word) => wrapper.push_word(word),
            Segment::Space(space) => wrapper.push_space(space),
        }
    }
    wrapper.finish()
}

struct LineWrapper<'a> {
    indent: &'a str,
    available_width: usize,
    lines: Vec<String>,
    current: String,
    content_width: usize,
}

impl<'a> LineWrapper<'a> {
    fn new(indent: &'a str, available_width: usize) -> Self {
        Self {
            indent,
            available_width,
            lines: Vec::new(),
            current: indent.to_owned(),
            content_width: 0,
        }
    }

    fn break_line(&mut self) {
        let finished = std::mem::replace(&mut self.current, self.indent.to_owned());
        self.lines.push(finished.trim_end().to_owned());
        self.content_width = 0;
    }

    fn push_word(&mut self, word: &str) {
        let word_width = word.width();
        if self.content_width > 0
            && self.content_width.saturating_add(word_width) > self.available_width
        {
            self.break_line();
        }

        if word_width <= self.available_width {
            self.current.push_str(word);
            self.content_width = self.content_width.saturating_add(word_width);
            return;
        }

        let mut pieces = hard_wrap(word, self.available_width).into_iter().peekable();
        while let Some(piece) = pieces.next() {
            self.content_width = self.content_width.saturating_add(piece.width());
            self.current.push_str(&piece);
            if pieces.peek().is_some() {
                self.break_line();
            }
        }
    }

    fn push_space(&mut self, space: &str) {
        if self.content_width == 0 {
            return;
        }
        let space_width = space.width();
        if self.content_width.saturating_add(space_width) <= self.available_width {
            self.current.push_str(space);
            self.content_width = self.content_width.saturating_add(space_width);
        } else {
            self.break_line();
        }
    }

    fn finish(mut self) -> Vec<String> {
        if self.content_width > 0 || self.lines.is_empty() {
            self.lines.push(self.current);
        }
        self.lines
    }
}

enum Segment<'a> {
    Word(&'a str),
    Space(&'a str),
}

fn segments(content: &str) -> Vec<Segment<'_>> {
    let mut result = Vec::new();
    let mut start = 0_usize;
    let mut in_space: Option<bool> = None;

    for (index, ch) in content.char_indices() {
        let is_space = ch.is_whitespace();
        match in_space {
            Some(previous) if previous != is_space => {
                result.push(segment(content, start, index, previous));
                start = index;
                in_space = Some(is_space);
            }
            Some(_) => {}
            None => in_space = Some(is_space),
        }
    }

    if let Some(previous) = in_space {
        result.push(segment(content, start, content.len(), previous));
    }
    result
}

fn segment(content: &str, start: usize, end: usize, is_space: bool) -> Segment<'_> {
    let text = content.get(start..end).unwrap_or_default();
    if is_space {
        Segment::Space(text)
    } else {
        Segment::Word(text)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn short_lines_pass_through() {
        assert_eq!(wrap_text("hello world", 80), vec!["hello world"]);
    }

    #[rstest]
    fn wraps_at_word_boundaries() {
        let wrapped = wrap_text("the quick brown fox jumps", 10);

        assert_eq!(wrapped, vec!["the quick", "brown fox", "jumps"]);
    }

    #[rstest]
    fn keeps_indentation_on_continuation_lines() {
        let wrapped = wrap_text("    alpha beta gamma", 14);

        assert_eq!(wrapped, vec!["    alpha beta", "    gamma"]);
    }

    #[rstest]
    fn hard_wraps_long_words() {
        let wrapped = wrap_text("abcdefghij", 4);

        assert_eq!(wrapped, vec!["abcd", "efgh", "ij"]);
    }

    #[rstest]
    fn keeps_paragraph_breaks() {
        assert_eq!(wrap_text("one\n\ntwo", 10), vec!["one", "", "two"]);
    }

    #[rstest]
    fn wide_characters_wrap_by_columns() {
        let wrapped = hard_wrap("日本語です", 4);

        assert_eq!(wrapped, vec!["日本", "語で", "す"]);
    }

    #[rstest]
    #[case::narrow(3)]
    #[case::medium(7)]
    #[case::wide(20)]
    fn wrapped_lines_never_exceed_width(#[case] width: usize) {
        let text = "lorem ipsum dolor sit amet, consectetur adipiscing elit";

        for line in wrap_text(text, width) {
            assert!(line.width() <= width, "{line:?} wider than {width}");
        }
    }
}
