//! Pagination bar component.

use crate::domain::page_window::PageMarker;
use crate::ui::helpers::{char_len, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationBar;

const PREVIOUS_LABEL: &str = "< Prev";
const NEXT_LABEL: &str = "Next >";

/// Renders `< Prev  1 … 9 [10] 11 … 20  Next >` centered on one line.
///
/// The current page uses the selection colors; disabled controls are dimmed.
pub fn render_pagination(row: usize, bar: &PaginationBar, theme: &Theme, cols: usize) -> usize {
    let labels: Vec<String> = bar.markers.iter().map(|m| marker_label(*m, bar.current_page)).collect();
    let width = char_len(PREVIOUS_LABEL)
        + char_len(NEXT_LABEL)
        + 4
        + labels.iter().map(|l| char_len(l) + 1).sum::<usize>();

    position_cursor(row, 1);
    print!("{}", " ".repeat(cols.saturating_sub(width) / 2));

    render_control(PREVIOUS_LABEL, bar.has_previous, theme);
    print!("  ");
    for (marker, label) in bar.markers.iter().zip(&labels) {
        if marker.page() == Some(bar.current_page) {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else if marker.page().is_none() {
            print!("{}", Theme::fg(&theme.colors.text_dim));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{label}");
        print!("{} ", Theme::reset());
    }
    print!(" ");
    render_control(NEXT_LABEL, bar.has_next, theme);
    row + 1
}

fn marker_label(marker: PageMarker, current_page: u32) -> String {
    match marker {
        PageMarker::Page(n) if n == current_page => format!("[{n}]"),
        PageMarker::Page(n) => n.to_string(),
        PageMarker::Ellipsis => "…".to_string(),
    }
}

fn render_control(label: &str, enabled: bool, theme: &Theme) {
    if enabled {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    } else {
        print!("{}", Theme::dim());
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{label}");
    print!("{}", Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_page_is_bracketed() {
        assert_eq!(marker_label(PageMarker::Page(4), 4), "[4]");
        assert_eq!(marker_label(PageMarker::Page(5), 4), "5");
        assert_eq!(marker_label(PageMarker::Ellipsis, 4), "…");
    }
}
