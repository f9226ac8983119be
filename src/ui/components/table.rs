//! Candidate table component.
//!
//! Four columns. NAME, STATUS, and LAST ACTIVITY have fixed widths and
//! POSITION takes whatever the pane leaves. Below the table, the selected
//! candidate's remaining fields are listed.

use crate::ui::helpers::{self, char_len, position_cursor, print_padded, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CandidateDetails, CandidateRow, ACTIVITY_COLUMN_WIDTH, NAME_COLUMN_WIDTH, STATUS_COLUMN_WIDTH,
};

fn position_width(cols: usize) -> usize {
    cols.saturating_sub(NAME_COLUMN_WIDTH + STATUS_COLUMN_WIDTH + ACTIVITY_COLUMN_WIDTH + 1)
}

/// Renders the column headers. Returns the next free row.
pub fn render_table_headers(row: usize, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(" ");
    print_padded("NAME", NAME_COLUMN_WIDTH);
    print_padded("POSITION", position_width(cols));
    print_padded("STATUS", STATUS_COLUMN_WIDTH);
    print_padded("LAST ACTIVITY", ACTIVITY_COLUMN_WIDTH);
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all rows. Returns the next free row.
pub fn render_table_rows(row: usize, rows: &[CandidateRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in rows {
        current_row = render_table_row(current_row, item, theme, cols);
    }
    current_row
}

/// Selection colors span the full row; search highlights apply to the name
/// of unselected rows only.
fn render_table_row(row: usize, item: &CandidateRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let base = if item.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };
    print!("{base} ");

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);
    print!("{}", " ".repeat(NAME_COLUMN_WIDTH.saturating_sub(char_len(&item.name))));

    print_padded(&item.position, position_width(cols));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.status_fg));
    }
    print_padded(&item.status, STATUS_COLUMN_WIDTH);

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print_padded(&item.last_activity, ACTIVITY_COLUMN_WIDTH);

    print!("{}", Theme::reset());
    row + 1
}

/// Renders the selected candidate's role, action link, availability, and
/// interviews on three lines. Returns the next free row.
pub fn render_details(row: usize, details: &CandidateDetails, theme: &Theme, cols: usize) -> usize {
    let label = Theme::fg(&theme.colors.text_dim);
    let text = Theme::fg(&theme.colors.text_normal);
    let width = cols.saturating_sub(16);

    position_cursor(row, 1);
    print!("{label}  Role           {text}{}", truncate(&details.role, width));
    print!("{}", Theme::reset());

    position_cursor(row + 1, 1);
    print!("{label}  Next action    ");
    print!("{}{}", Theme::underline(), Theme::fg(&theme.colors.status_fg));
    print!("{}", truncate(&details.action_link, width));
    print!("{}", Theme::reset());

    let mut extras = Vec::new();
    if let Some(availability) = &details.availability {
        extras.push(format!("Availability: {availability}"));
    }
    if !details.interviews.is_empty() {
        extras.push(format!("Interviews: {}", details.interviews.join(", ")));
    }

    position_cursor(row + 2, 1);
    print!("{label}  Schedule       {text}");
    if extras.is_empty() {
        print!("{label}-");
    } else {
        print!("{}", truncate(&extras.join("  |  "), width));
    }
    print!("{}", Theme::reset());

    row + 3
}
