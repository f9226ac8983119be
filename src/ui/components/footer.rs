//! Footer component: keybinding hints for the current mode.

use crate::ui::helpers::{position_cursor, print_centered, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the hints centered and dimmed, cut to the pane width.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print_centered(&truncate(&footer.keybindings, cols), cols);
    print!("{}", Theme::reset());
    row + 1
}
