//! Filter panel component: one line per category with check boxes.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterOption, FilterPanel};

/// Width of the category label column.
const LABEL_WIDTH: usize = 20;

/// Renders each filter group on its own line:
///
/// ```text
///   Application Type    [x] active  [ ] archived
///   Source              [ ] LinkedIn  [x] Indeed  [ ] Referral  [ ] GitHub
/// ```
///
/// Returns the next free row.
pub fn render_filter_panel(row: usize, panel: &FilterPanel, theme: &Theme) -> usize {
    let mut current_row = row;
    for group in &panel.groups {
        position_cursor(current_row, 1);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.header_fg));
        print!("  {:<LABEL_WIDTH$}", group.label);
        print!("{}", Theme::reset());

        for option in &group.options {
            render_option(option, theme);
            print!("  ");
        }
        current_row += 1;
    }
    current_row
}

fn render_option(option: &FilterOption, theme: &Theme) {
    let mark = if option.is_checked { "x" } else { " " };

    if option.has_cursor {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else if option.is_checked {
        print!("{}", Theme::fg(&theme.colors.filter_checked_fg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("[{mark}] {}", option.value);
    print!("{}", Theme::reset());
}
