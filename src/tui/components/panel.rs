//! Bordered panels and the blocks they are stacked into.
//!
//! A panel is drawn with a rounded border carrying its title in the top
//! edge (`╭─Title────╮`). The focused panel's border is coloured. Blocks are
//! fixed-width columns of lines that can be stacked vertically or placed
//! side by side.

use super::text_fit::fit_line;

const HIGHLIGHT_COLOUR: &str = "\x1b[38;5;62m";
const RESET: &str = "\x1b[0m";

/// A rectangular run of lines with a known outer width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    width: usize,
    lines: Vec<String>,
}

impl Block {
    /// Wraps already fitted lines of `width` columns.
    #[must_use]
    pub const fn new(width: usize, lines: Vec<String>) -> Self {
        Self { width, lines }
    }

    /// Outer width in columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Rendered lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consumes the block, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Stacks blocks top to bottom; the result is as wide as the widest.
    #[must_use]
    pub fn stack(blocks: Vec<Self>) -> Self {
        let width = blocks.iter().map(Self::width).max().unwrap_or(0);
        let lines = blocks
            .into_iter()
            .flat_map(|block| {
                let block_width = block.width;
                block.lines.into_iter().map(move |line| {
                    if block_width == width {
                        line
                    } else {
                        format!("{line}{}", " ".repeat(width.saturating_sub(block_width)))
                    }
                })
            })
            .collect();
        Self { width, lines }
    }

    /// Places blocks left to right, padding shorter blocks with blanks.
    #[must_use]
    pub fn beside(blocks: Vec<Self>) -> Self {
        let height = blocks.iter().map(|block| block.lines.len()).max().unwrap_or(0);
        let width = blocks.iter().map(Self::width).sum();
        let lines = (0..height)
            .map(|row| {
                blocks
                    .iter()
                    .map(|block| {
                        block
                            .lines
                            .get(row)
                            .cloned()
                            .unwrap_or_else(|| " ".repeat(block.width))
                    })
                    .collect::<String>()
            })
            .collect();
        Self { width, lines }
    }
}

/// Title, inner size and highlight flag of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel<'a> {
    title: &'a str,
    inner_width: usize,
    inner_height: usize,
    highlighted: bool,
}

impl<'a> Panel<'a> {
    /// Describes a panel of the given inner size.
    #[must_use]
    pub const fn new(title: &'a str, inner_width: usize, inner_height: usize) -> Self {
        Self {
            title,
            inner_width,
            inner_height,
            highlighted: false,
        }
    }

    /// Sets whether the border is drawn in the highlight colour.
    #[must_use]
    pub const fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Draws the panel around `body`, padding or clipping it to size.
    #[must_use]
    pub fn render(&self, body: &[String]) -> Block {
        let mut lines = Vec::with_capacity(self.inner_height.saturating_add(2));
        lines.push(self.top_border());

        let blank = String::new();
        for row in 0..self.inner_height {
            let content = body.get(row).unwrap_or(&blank);
            lines.push(format!(
                "{}{}{}",
                self.paint("│"),
                fit_line(content, self.inner_width),
                self.paint("│")
            ));
        }

        lines.push(self.paint(&format!("╰{}╯", "─".repeat(self.inner_width))));
        Block::new(self.inner_width.saturating_add(2), lines)
    }

    fn top_border(&self) -> String {
        let fitted = fit_line(self.title, self.inner_width.saturating_sub(1));
        let title = fitted.trim_end();
        let used = super::text_fit::display_width(title).saturating_add(1);
        let fill = "─".repeat(self.inner_width.saturating_sub(used));
        self.paint(&format!("╭─{title}{fill}╮"))
    }

    fn paint(&self, border: &str) -> String {
        if self.highlighted {
            format!("{HIGHLIGHT_COLOUR}{border}{RESET}")
        } else {
            border.to_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::tui::components::text_fit::display_width;

    #[rstest]
    fn renders_title_in_top_border() {
        let block = Panel::new("Items", 10, 2).render(&["one".to_owned()]);

        assert_eq!(
            block.lines(),
            &[
                "╭─Items────╮".to_owned(),
                "│one       │".to_owned(),
                "│          │".to_owned(),
                "╰──────────╯".to_owned(),
            ]
        );
        assert_eq!(block.width(), 12);
    }

    #[rstest]
    fn clips_long_titles_and_bodies() {
        let block = Panel::new("A very long title", 6, 1).render(&[
            "a body line that is too long".to_owned(),
            "second line is dropped".to_owned(),
        ]);

        assert_eq!(block.lines().len(), 3);
        assert!(block.lines().iter().all(|line| display_width(line) == 8));
    }

    #[rstest]
    fn highlight_colours_border_only() {
        let block = Panel::new("Review", 8, 1)
            .highlighted(true)
            .render(&["text".to_owned()]);

        assert!(block.lines().iter().all(|line| line.contains(HIGHLIGHT_COLOUR)));
        assert!(block.lines().iter().all(|line| display_width(line) == 10));
    }

    #[rstest]
    fn beside_pads_shorter_blocks() {
        let left = Block::new(2, vec!["ab".to_owned(), "cd".to_owned()]);
        let right = Block::new(1, vec!["x".to_owned()]);

        let joined = Block::beside(vec![left, right]);

        assert_eq!(joined.lines(), &["abx".to_owned(), "cd ".to_owned()]);
        assert_eq!(joined.width(), 3);
    }

    #[rstest]
    fn stack_pads_narrower_blocks() {
        let wide = Block::new(3, vec!["abc".to_owned()]);
        let narrow = Block::new(1, vec!["d".to_owned()]);

        let stacked = Block::stack(vec![wide, narrow]);

        assert_eq!(stacked.lines(), &["abc".to_owned(), "d  ".to_owned()]);
    }
}
