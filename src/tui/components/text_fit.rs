//! Fitting rendered lines to an exact display width.
//!
//! Lines may carry ANSI colour sequences from syntax highlighting or
//! panel borders. Escape sequences take no columns, so widths are measured
//! over visible characters only and a reset is appended when a coloured
//! line is cut short.

use unicode_width::UnicodeWidthChar;

const ANSI_RESET: &str = "\x1b[0m";

/// Display width of `line` in terminal columns, ignoring ANSI sequences.
#[must_use]
pub fn display_width(line: &str) -> usize {
    let mut width = 0_usize;
    let mut in_escape = false;
    for ch in line.chars() {
        if in_escape {
            in_escape = !ch.is_ascii_alphabetic();
            continue;
        }
        if ch == '\x1b' {
            in_escape = true;
            continue;
        }
        width = width.saturating_add(UnicodeWidthChar::width(ch).unwrap_or(0));
    }
    width
}

/// Pads or truncates `line` to exactly `width` columns.
#[must_use]
pub fn fit_line(line: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    if line.contains('\x1b') {
        return fit_ansi_line(line, width);
    }

    fit_plain_line(line, width)
}

fn fit_plain_line(line: &str, width: usize) -> String {
    let mut output = String::with_capacity(line.len().max(width));
    let mut visible_width = 0_usize;

    for ch in line.chars() {
        if append_visible_char(ch, width, &mut visible_width, &mut output) {
            break;
        }
    }

    pad_to(&mut output, visible_width, width);
    output
}

fn fit_ansi_line(line: &str, width: usize) -> String {
    let mut output = String::with_capacity(line.len().max(width));
    let mut visible_width = 0_usize;
    let mut escape_state = AnsiEscapeState::default();

    for ch in line.chars() {
        if escape_state.in_escape {
            escape_state.push(ch, &mut output);
            continue;
        }

        if ch == '\x1b' {
            escape_state.start(ch, &mut output);
            continue;
        }

        if append_visible_char(ch, width, &mut visible_width, &mut output) {
            break;
        }
    }

    if escape_state.had_ansi && !escape_state.ended_with_reset {
        output.push_str(ANSI_RESET);
    }
    pad_to(&mut output, visible_width, width);
    output
}

#[derive(Default)]
struct AnsiEscapeState {
    in_escape: bool,
    had_ansi: bool,
    ended_with_reset: bool,
}

impl AnsiEscapeState {
    fn start(&mut self, ch: char, output: &mut String) {
        self.in_escape = true;
        self.had_ansi = true;
        self.ended_with_reset = false;
        output.push(ch);
    }

    fn push(&mut self, ch: char, output: &mut String) {
        output.push(ch);
        if ch.is_ascii_alphabetic() {
            self.in_escape = false;
            self.ended_with_reset = output.ends_with(ANSI_RESET);
        }
    }
}

/// Appends `ch` when it fits; returns true once the line is full.
fn append_visible_char(
    ch: char,
    width: usize,
    visible_width: &mut usize,
    output: &mut String,
) -> bool {
    if ch == '\t' {
        return append_visible_char(' ', width, visible_width, output);
    }

    let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
    if char_width == 0 {
        if !ch.is_control() {
            output.push(ch);
        }
        return false;
    }

    if visible_width.saturating_add(char_width) > width {
        return true;
    }

    output.push(ch);
    *visible_width = visible_width.saturating_add(char_width);
    false
}

fn pad_to(output: &mut String, visible_width: usize, width: usize) {
    if visible_width < width {
        output.push_str(&" ".repeat(width.saturating_sub(visible_width)));
    }
}
