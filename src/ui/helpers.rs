//! Shared rendering utilities.
//!
//! Everything here works in characters, not bytes, so names with non-ASCII
//! letters neither panic on slicing nor misalign columns.

use crate::ui::theme::Theme;

/// Positions the cursor at a 1-indexed row and column.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Number of characters in `text`.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Shortens `text` to at most `width` characters, ending in `...` when cut.
///
/// ```
/// use candidate_browser::ui::helpers::truncate;
///
/// assert_eq!(truncate("Backend Engineer", 10), "Backend...");
/// assert_eq!(truncate("QA", 10), "QA");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if char_len(text) <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }
    let mut out: String = text.chars().take(width - 3).collect();
    out.push_str("...");
    out
}

/// Prints `text` left-aligned in a field of `width` characters.
pub fn print_padded(text: &str, width: usize) {
    print!("{text}");
    print!("{}", " ".repeat(width.saturating_sub(char_len(text))));
}

/// Prints `text` centered in a line of `cols` characters.
pub fn print_centered(text: &str, cols: usize) {
    let len = char_len(text).min(cols);
    let padding = cols.saturating_sub(len) / 2;
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
}

/// Prints text with highlighted character ranges.
///
/// Ranges are `(start, end)` character indices with exclusive ends. On a
/// selected row the highlight is dropped so the selection colors stay intact.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let end = end.min(chars.len());
        if start >= end || start < current_pos {
            continue;
        }
        let normal: String = chars[current_pos..start].iter().collect();
        print!("{normal}");

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted: String = chars[start..end].iter().collect();
        print!("{highlighted}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Zoë Müller-Lüdenscheidt", 10), "Zoë Mül...");
        assert_eq!(char_len(&truncate("Zoë Müller-Lüdenscheidt", 10)), 10);
    }

    #[test]
    fn truncate_handles_tiny_widths() {
        assert_eq!(truncate("Engineer", 2), "En");
        assert_eq!(truncate("Engineer", 0), "");
        assert_eq!(truncate("", 5), "");
    }
}
