//! UI components and the page layout that stacks them.
//!
//! - [`header`]: result summary and sort/filter subtitle
//! - [`search`]: search input box
//! - [`filters`]: filter panel
//! - [`table`]: candidate table and selected candidate details
//! - [`empty`]: message shown in place of the table
//! - [`pagination`]: page navigation bar
//! - [`status`]: loading and error line
//! - [`footer`]: keybinding hints

mod empty;
mod filters;
mod footer;
mod header;
mod pagination;
mod search;
mod status;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use empty::render_empty_state;
use filters::render_filter_panel;
use footer::render_footer;
use header::render_header;
use pagination::render_pagination;
use search::render_search_bar;
use status::render_status;
use table::{render_details, render_table_headers, render_table_rows};

/// Renders a horizontal rule. Returns the next free row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole pane top to bottom:
///
/// ```text
/// [blank line]
/// [Header title + subtitle]
/// [Border]
/// [Search bar, 3 lines]        only while searching or with search text
/// [Filter panel + border]      only in filter mode
/// [Table headers]
/// [Table rows | empty state]
/// [Border + details, 3 lines]  only with a selected candidate
/// ...
/// [Pagination bar]             only with more than one page
/// [Status line]
/// [Border]
/// [Footer]
/// ```
pub fn render_layout(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    if let Some(panel) = &vm.filter_panel {
        current_row = render_filter_panel(current_row, panel, theme);
        current_row = render_border(current_row, &theme.colors.border, cols);
    }

    current_row = render_table_headers(current_row, theme, cols);
    current_row = match &vm.empty_state {
        Some(empty) => render_empty_state(current_row, empty, theme, cols),
        None => render_table_rows(current_row, &vm.rows, theme, cols),
    };
    if let Some(details) = &vm.details {
        current_row = render_border(current_row, &theme.colors.border, cols);
        render_details(current_row, details, theme, cols);
    }

    let footer_row = rows.saturating_sub(1);
    let border_row = footer_row.saturating_sub(1);
    let status_row = border_row.saturating_sub(1);

    if let Some(bar) = &vm.pagination {
        render_pagination(status_row.saturating_sub(1), bar, theme, cols);
    }
    render_status(status_row, vm.status.as_ref(), theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
