//! Fixed-width line fitting and side-by-side column layout.
//!
//! Widths are measured in terminal columns. ANSI escape sequences are
//! copied through without counting towards the width.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub(crate) const ANSI_RESET: &str = "\x1b[0m";
pub(crate) const ANSI_REVERSE: &str = "\x1b[7m";
pub(crate) const ANSI_BOLD: &str = "\x1b[1m";

/// Wraps `text` in reverse video when `on` is set.
pub(crate) fn highlight(text: &str, on: bool) -> String {
    if on {
        format!("{ANSI_REVERSE}{text}{ANSI_RESET}")
    } else {
        text.to_owned()
    }
}

/// Pads or truncates `line` to exactly `width` visible columns.
///
/// A reset is appended when the line carried escape sequences that were
/// not terminated by one.
pub(crate) fn fit_to_width(line: &str, width: usize) -> String {
    let mut output = String::new();
    let mut visible = 0_usize;
    let mut escape = EscapeState::default();

    for ch in line.chars() {
        if escape.in_escape {
            output.push(ch);
            escape.sequence.push(ch);
            if ch.is_ascii_alphabetic() {
                escape.in_escape = false;
                escape.ended_with_reset =
                    matches!(escape.sequence.as_str(), "\x1b[0m" | "\x1b[m");
            }
            continue;
        }
        if ch == '\x1b' {
            escape.in_escape = true;
            escape.had_ansi = true;
            escape.ended_with_reset = false;
            escape.sequence.clear();
            escape.sequence.push(ch);
            output.push(ch);
            continue;
        }

        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if visible.saturating_add(char_width) > width {
            break;
        }
        output.push(ch);
        visible = visible.saturating_add(char_width);
    }

    if escape.had_ansi && !escape.ended_with_reset {
        output.push_str(ANSI_RESET);
    }
    output.push_str(&" ".repeat(width.saturating_sub(visible)));
    output
}

#[derive(Default)]
struct EscapeState {
    sequence: String,
    in_escape: bool,
    had_ansi: bool,
    ended_with_reset: bool,
}

/// Keeps at most `max_height` lines, replacing the last kept line with `...`
/// when lines were dropped. A `max_height` of zero keeps everything.
pub(crate) fn truncate_lines(lines: &mut Vec<String>, max_height: usize) {
    if max_height == 0 || lines.len() <= max_height {
        return;
    }
    lines.truncate(max_height.saturating_sub(1));
    lines.push("...".to_owned());
}

/// Wraps plain text at word boundaries so no line exceeds `width` columns.
///
/// Existing line breaks are kept. Words wider than `width` are left on a
/// line of their own and cut later by [`fit_to_width`]. A `width` of zero
/// disables wrapping.
pub(crate) fn wrap_words(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.lines().map(str::to_owned).collect();
    }

    let mut lines = Vec::new();
    for source_line in text.lines() {
        let mut current = String::new();
        let mut current_width = 0_usize;
        for word in source_line.split_whitespace() {
            let word_width = UnicodeWidthStr::width(word);
            if current_width > 0 && current_width.saturating_add(word_width) >= width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            if current_width > 0 {
                current.push(' ');
                current_width = current_width.saturating_add(1);
            }
            current.push_str(word);
            current_width = current_width.saturating_add(word_width);
        }
        lines.push(current);
    }
    lines
}

/// Renders two columns next to each other, each fitted to `column_width`
/// and separated by `gap` spaces.
pub(crate) fn side_by_side(
    left: &[String],
    right: &[String],
    column_width: usize,
    gap: usize,
) -> String {
    let rows = left.len().max(right.len());
    let separator = " ".repeat(gap);
    let mut output = String::new();

    for row in 0..rows {
        let left_cell = left.get(row).map_or("", String::as_str);
        let right_cell = right.get(row).map_or("", String::as_str);
        let row_text = format!(
            "{}{separator}{}",
            fit_to_width(left_cell, column_width),
            fit_to_width(right_cell, column_width)
        );
        output.push_str(row_text.trim_end());
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("abc", 5, "abc  ")]
    #[case("abcdef", 4, "abcd")]
    #[case("你好世界", 5, "你好 ")]
    fn fit_to_width_pads_and_truncates(
        #[case] line: &str,
        #[case] width: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(fit_to_width(line, width), expected);
    }

    #[test]
    fn fit_to_width_ignores_escape_sequences_when_measuring() {
        let fitted = fit_to_width(&highlight("[1]", true), 5);

        assert_eq!(fitted, "\x1b[7m[1]\x1b[0m  ");
    }

    #[test]
    fn fit_to_width_closes_truncated_escapes() {
        let fitted = fit_to_width("\x1b[7mhighlighted", 4);

        assert_eq!(fitted, "\x1b[7mhigh\x1b[0m");
    }

    #[test]
    fn truncate_lines_marks_cut_off() {
        let mut lines = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
        truncate_lines(&mut lines, 2);

        assert_eq!(lines, vec!["a".to_owned(), "...".to_owned()]);
    }

    #[rstest]
    #[case("one two three", 9, vec!["one two", "three"])]
    #[case("one\ntwo", 20, vec!["one", "two"])]
    #[case("unbreakable", 4, vec!["unbreakable"])]
    fn wrap_words_breaks_at_spaces(
        #[case] text: &str,
        #[case] width: usize,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(wrap_words(text, width), expected);
    }

    #[test]
    fn side_by_side_aligns_uneven_columns() {
        let left = vec!["one".to_owned(), "two".to_owned()];
        let right = vec!["uno".to_owned()];

        let output = side_by_side(&left, &right, 5, 2);

        assert_eq!(output, "one    uno\ntwo\n");
    }
}
