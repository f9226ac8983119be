//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel` and consumed by
//! the renderer. They hold display-ready strings and flags only.

use crate::domain::page_window::PageMarker;

/// Fixed width of the NAME column, in characters.
pub const NAME_COLUMN_WIDTH: usize = 28;
/// Fixed width of the STATUS column.
pub const STATUS_COLUMN_WIDTH: usize = 18;
/// Fixed width of the LAST ACTIVITY column.
pub const ACTIVITY_COLUMN_WIDTH: usize = 12;

/// Complete UI view model for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    /// Shown while searching or whenever search text is set.
    pub search_bar: Option<SearchBarInfo>,
    /// Shown in filter mode.
    pub filter_panel: Option<FilterPanel>,
    /// Visible window of candidate rows.
    pub rows: Vec<CandidateRow>,
    /// Index of the selected row within `rows`.
    pub selected_index: usize,
    /// Expanded fields of the selected candidate.
    pub details: Option<CandidateDetails>,
    /// Replaces the table when there is nothing to list.
    pub empty_state: Option<EmptyState>,
    /// Present only when there is more than one page.
    pub pagination: Option<PaginationBar>,
    pub status: Option<StatusLine>,
    pub footer: FooterInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// Current sort and active filter summary.
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Keystrokes currently edit the query.
    pub is_editing: bool,
}

/// Filter options grouped by category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPanel {
    pub groups: Vec<FilterGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterGroup {
    pub label: &'static str,
    pub options: Vec<FilterOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: &'static str,
    pub is_checked: bool,
    pub has_cursor: bool,
}

/// One candidate as a table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRow {
    pub name: String,
    /// Character ranges of `name` matching the search text, end exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
    pub position: String,
    pub status: String,
    pub last_activity: String,
    pub is_selected: bool,
}

/// Secondary fields of the selected candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDetails {
    /// Job title, with the company when known.
    pub role: String,
    pub action_link: String,
    pub availability: Option<String>,
    pub interviews: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Page navigation controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationBar {
    pub markers: Vec<PageMarker>,
    pub current_page: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}
