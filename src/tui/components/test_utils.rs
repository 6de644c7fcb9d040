//! Helpers for asserting on rendered TUI output.

/// Removes ANSI escape sequences, leaving only visible text.
///
/// # Example
///
/// ```
/// use runcompare::tui::components::test_utils::strip_ansi_codes;
///
/// let row = "  [1] \x1b[7m[2]\x1b[0m nightly-1";
/// assert_eq!(strip_ansi_codes(row), "  [1] [2] nightly-1");
/// ```
#[must_use]
pub fn strip_ansi_codes(text: &str) -> String {
    let mut visible = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for terminator in chars.by_ref() {
                if terminator.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            visible.push(ch);
        }
    }

    visible
}

/// Returns the first rendered line containing `needle`, with escapes
/// removed.
#[must_use]
pub fn line_containing(rendered: &str, needle: &str) -> Option<String> {
    strip_ansi_codes(rendered)
        .lines()
        .find(|line| line.contains(needle))
        .map(str::to_owned)
}
