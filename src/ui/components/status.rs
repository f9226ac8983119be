//! Status line component: loading indicator or fetch error.

use crate::ui::helpers::{position_cursor, print_padded, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{StatusKind, StatusLine};

/// Renders the status line, or a blank line when there is nothing to report.
pub fn render_status(row: usize, status: Option<&StatusLine>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    let Some(status) = status else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    match status.kind {
        StatusKind::Loading => {
            print!("{}", Theme::dim());
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
        StatusKind::Error => {
            print!("{}", Theme::bold());
            print!("{}", Theme::fg(&theme.colors.error_fg));
        }
    }
    print_padded(&truncate(&format!(" {}", status.message), cols), cols);
    print!("{}", Theme::reset());
    row + 1
}
