//! Input mode state machine.
//!
//! The mode decides how keys are interpreted and what the footer advertises:
//!
//! - **Normal**: row selection, paging, sort cycling, reset, retry
//! - **Search**: printable keys edit the search text
//! - **Filters**: the filter panel is open and `j`/`k` move its cursor

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,

    /// Editing the search text. Every keystroke is a new query.
    Search,

    /// Choosing filter values in the filter panel.
    Filters,
}
