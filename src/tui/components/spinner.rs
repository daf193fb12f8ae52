//! Activity indicator for the help line.

const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const IDLE_FRAME: &str = "/";

/// Line spinner advanced by animation ticks while reviews are pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    /// Moves to the next frame.
    pub fn tick(&mut self) {
        self.frame = self
            .frame
            .saturating_add(1)
            .checked_rem(FRAMES.len())
            .unwrap_or(0);
    }

    /// Current frame when `active`, otherwise the static idle glyph.
    #[must_use]
    pub fn view(&self, active: bool) -> &'static str {
        if active {
            FRAMES.get(self.frame).copied().unwrap_or(IDLE_FRAME)
        } else {
            IDLE_FRAME
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn cycles_through_frames() {
        let mut spinner = Spinner::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(spinner.view(true));
            spinner.tick();
        }

        assert_eq!(seen, vec!["|", "/", "-", "\\", "|"]);
    }

    #[rstest]
    fn idle_shows_static_glyph() {
        let mut spinner = Spinner::default();
        spinner.tick();
        spinner.tick();

        assert_eq!(spinner.view(false), "/");
    }
}
