//! Animated progress bar for the review queue panel.
//!
//! The bar eases from the percentage it currently shows towards the queue's
//! target on each animation tick. Only the filled portion animates; the
//! numeric label always shows the target.

const FILLED: &str = "█";
const EMPTY: &str = "░";
const LABEL_WIDTH: usize = 5;

/// Displayed and target completion percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    displayed: u8,
    target: u8,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new(100)
    }
}

impl ProgressBar {
    /// Creates a settled bar at `percent`.
    #[must_use]
    pub fn new(percent: u8) -> Self {
        let clamped = percent.min(100);
        Self {
            displayed: clamped,
            target: clamped,
        }
    }

    /// Percentage currently drawn.
    #[must_use]
    pub const fn displayed(&self) -> u8 {
        self.displayed
    }

    /// Percentage the bar is moving towards.
    #[must_use]
    pub const fn target(&self) -> u8 {
        self.target
    }

    /// Sets a new target without moving the drawn fill.
    pub fn set_target(&mut self, percent: u8) {
        self.target = percent.min(100);
    }

    /// Jumps straight to `percent`.
    pub fn snap(&mut self, percent: u8) {
        *self = Self::new(percent);
    }

    /// Whether the drawn fill has reached the target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.displayed == self.target
    }

    /// Advances one animation frame, covering a third of the remaining gap.
    pub fn tick(&mut self) {
        let gap = self.displayed.abs_diff(self.target);
        let step = (gap.checked_div(3).unwrap_or(0)).max(1).min(gap);
        self.displayed = if self.displayed < self.target {
            self.displayed.saturating_add(step)
        } else {
            self.displayed.saturating_sub(step)
        };
    }

    /// Draws the bar and label in exactly `width` columns.
    #[must_use]
    pub fn render(&self, width: usize) -> String {
        let label = format!(" {:>3}%", self.target);
        if width <= LABEL_WIDTH {
            return label.chars().skip(LABEL_WIDTH.saturating_sub(width)).collect();
        }

        let bar_width = width.saturating_sub(LABEL_WIDTH);
        let filled = bar_width
            .saturating_mul(usize::from(self.displayed))
            .checked_div(100)
            .unwrap_or(0);
        format!(
            "{}{}{label}",
            FILLED.repeat(filled),
            EMPTY.repeat(bar_width.saturating_sub(filled))
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn ticks_converge_on_target() {
        let mut bar = ProgressBar::new(0);
        bar.set_target(100);

        let mut frames = 0;
        while !bar.is_settled() {
            bar.tick();
            frames += 1;
            assert!(frames < 50, "animation never settled");
        }

        assert_eq!(bar.displayed(), 100);
    }

    #[rstest]
    fn ticks_move_down_as_well_as_up() {
        let mut bar = ProgressBar::new(90);
        bar.set_target(30);

        bar.tick();

        assert_eq!(bar.displayed(), 70);
    }

    #[rstest]
    #[case::empty(0, "░░░░░   0%")]
    #[case::half(50, "██░░░  50%")]
    #[case::full(100, "█████ 100%")]
    fn renders_fill_and_label(#[case] percent: u8, #[case] expected: &str) {
        assert_eq!(ProgressBar::new(percent).render(10), expected);
    }

    #[rstest]
    fn label_shows_target_while_animating() {
        let mut bar = ProgressBar::new(0);
        bar.set_target(100);

        assert!(bar.render(10).ends_with("100%"));
        assert!(bar.render(10).starts_with('░'));
    }

    #[rstest]
    fn narrow_widths_keep_label_tail() {
        assert_eq!(ProgressBar::new(100).render(4), "100%");
    }
}
