//! Application state and view model computation.
//!
//! [`AppState`] wraps the [`QueryController`] with the purely visual state the
//! controller has no business knowing about: which row is selected, which
//! input mode is active, and where the filter cursor sits. The view model is
//! computed on demand from a snapshot of both.

use super::controller::{FetchStatus, QueryController};
use super::modes::InputMode;
use crate::domain::candidate::Candidate;
use crate::domain::page_window::{next_page, previous_page};
use crate::domain::query::FilterCategory;
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CandidateDetails, CandidateRow, EmptyState, FilterGroup, FilterOption, FilterPanel, FooterInfo,
    HeaderInfo, PaginationBar, SearchBarInfo, StatusKind, StatusLine, UIViewModel,
    ACTIVITY_COLUMN_WIDTH, NAME_COLUMN_WIDTH, STATUS_COLUMN_WIDTH,
};
use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Rows taken by the blank top line, header title, subtitle, and border.
const HEADER_ROWS: usize = 4;
/// Table header, status line, bottom border, and footer.
const FIXED_ROWS: usize = 4;
const SEARCH_BAR_ROWS: usize = 3;
/// Border plus the detail lines of the selected candidate.
const DETAIL_ROWS: usize = 4;

/// Every filter option in panel order, categories first to last.
fn filter_choices() -> impl Iterator<Item = (FilterCategory, &'static str)> {
    FilterCategory::ALL
        .into_iter()
        .flat_map(|category| category.options().iter().map(move |value| (category, *value)))
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub controller: QueryController,
    pub theme: Theme,
    /// Zero-based index into the committed candidate list.
    pub selected_index: usize,
    pub input_mode: InputMode,
    /// Zero-based index into the flattened filter options.
    pub filter_cursor: usize,
}

impl AppState {
    #[must_use]
    pub fn new(controller: QueryController, theme: Theme) -> Self {
        Self {
            controller,
            theme,
            selected_index: 0,
            input_mode: InputMode::Normal,
            filter_cursor: 0,
        }
    }

    /// Candidates of the last committed page.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        self.controller
            .result()
            .map_or(&[], |page| page.candidates.as_slice())
    }

    #[must_use]
    pub fn selected_candidate(&self) -> Option<&Candidate> {
        self.candidates().get(self.selected_index)
    }

    /// Moves the row selection down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.candidates().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the row selection up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.candidates().len();
        if len == 0 {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            len - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Keeps the selection inside the committed list after it changes.
    pub fn clamp_selection(&mut self) {
        self.selected_index = self
            .selected_index
            .min(self.candidates().len().saturating_sub(1));
    }

    pub fn move_filter_cursor_down(&mut self) {
        self.filter_cursor = (self.filter_cursor + 1) % filter_choices().count();
    }

    pub fn move_filter_cursor_up(&mut self) {
        let count = filter_choices().count();
        self.filter_cursor = (self.filter_cursor + count - 1) % count;
    }

    #[must_use]
    pub fn filter_choice_under_cursor(&self) -> Option<(FilterCategory, &'static str)> {
        filter_choices().nth(self.filter_cursor)
    }

    /// Computes the view model for a pane of `rows` by `cols` cells.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        self.compute_viewmodel_at(rows, cols, Utc::now())
    }

    /// Like [`compute_viewmodel`](Self::compute_viewmodel), with relative
    /// last-activity ages measured from `now`.
    #[must_use]
    pub fn compute_viewmodel_at(&self, rows: usize, cols: usize, now: DateTime<Utc>) -> UIViewModel {
        let search_bar = self.compute_search_bar();
        let filter_panel = self.compute_filter_panel();
        let pagination = self.compute_pagination();
        let details = self.selected_candidate().map(Self::compute_details);

        let mut chrome = HEADER_ROWS + FIXED_ROWS;
        if search_bar.is_some() {
            chrome += SEARCH_BAR_ROWS;
        }
        if let Some(panel) = &filter_panel {
            chrome += panel.groups.len() + 1;
        }
        if details.is_some() {
            chrome += DETAIL_ROWS;
        }
        if pagination.is_some() {
            chrome += 1;
        }
        let available_rows = rows.saturating_sub(chrome).max(1);

        let candidates = self.candidates();
        let selected = self.selected_index.min(candidates.len().saturating_sub(1));
        let mut visible_start = selected.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(candidates.len());
        if visible_end - visible_start < available_rows && candidates.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = if self.controller.state().search_text.is_empty() {
            None
        } else {
            Some(SkimMatcherV2::default())
        };
        let position_width =
            cols.saturating_sub(NAME_COLUMN_WIDTH + STATUS_COLUMN_WIDTH + ACTIVITY_COLUMN_WIDTH + 1);

        let display_rows = candidates[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, candidate)| {
                let is_selected = visible_start + relative_idx == selected;
                self.compute_row(candidate, is_selected, position_width, matcher.as_ref(), now)
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar,
            filter_panel,
            rows: display_rows,
            selected_index: selected - visible_start,
            details,
            empty_state: self.compute_empty_state(),
            pagination,
            status: self.compute_status(),
            footer: self.compute_footer(),
        }
    }

    fn compute_row(
        &self,
        candidate: &Candidate,
        is_selected: bool,
        position_width: usize,
        matcher: Option<&SkimMatcherV2>,
        now: DateTime<Utc>,
    ) -> CandidateRow {
        let name = truncate(&candidate.name, NAME_COLUMN_WIDTH - 2);
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            compute_highlight_ranges(&name, &self.controller.state().search_text, m)
        });

        CandidateRow {
            name,
            highlight_ranges,
            position: truncate(&candidate.position, position_width.saturating_sub(2)),
            status: truncate(&candidate.status, STATUS_COLUMN_WIDTH - 2),
            last_activity: candidate.last_activity_ago(now).unwrap_or_default(),
            is_selected,
        }
    }

    fn compute_details(candidate: &Candidate) -> CandidateDetails {
        let role = match candidate.company.as_deref().filter(|c| !c.is_empty()) {
            Some(company) if !candidate.job_title.is_empty() => {
                format!("{} at {company}", candidate.job_title)
            }
            Some(company) => company.to_string(),
            None => candidate.job_title.clone(),
        };
        CandidateDetails {
            role,
            action_link: candidate.action_link.clone(),
            availability: candidate.availability().map(str::to_string),
            interviews: candidate.interviews().iter().map(|i| i.name.clone()).collect(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = self.controller.result().map_or_else(
            || " Candidates ".to_string(),
            |page| format!(" Showing {} candidate applications ", page.total),
        );

        let query = self.controller.state();
        let mut subtitle = format!("Sort: {}", query.sort.label());
        if !query.filters.is_empty() {
            let values: Vec<&str> = FilterCategory::ALL
                .into_iter()
                .flat_map(|category| query.filters.values(category))
                .collect();
            subtitle.push_str("  |  Filters: ");
            subtitle.push_str(&values.join(", "));
        }
        HeaderInfo { title, subtitle }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        let query = &self.controller.state().search_text;
        let is_editing = self.input_mode == InputMode::Search;
        (is_editing || !query.is_empty()).then(|| SearchBarInfo {
            query: query.clone(),
            is_editing,
        })
    }

    fn compute_filter_panel(&self) -> Option<FilterPanel> {
        if self.input_mode != InputMode::Filters {
            return None;
        }
        let filters = &self.controller.state().filters;
        let mut index = 0;
        let groups = FilterCategory::ALL
            .into_iter()
            .map(|category| FilterGroup {
                label: category.label(),
                options: category
                    .options()
                    .iter()
                    .copied()
                    .map(|value| {
                        let option = FilterOption {
                            value,
                            is_checked: filters.contains(category, value),
                            has_cursor: index == self.filter_cursor,
                        };
                        index += 1;
                        option
                    })
                    .collect(),
            })
            .collect();
        Some(FilterPanel { groups })
    }

    fn compute_pagination(&self) -> Option<PaginationBar> {
        let total_pages = self.controller.total_pages();
        if total_pages <= 1 {
            return None;
        }
        let current_page = self.controller.current_page();
        Some(PaginationBar {
            markers: self.controller.page_window(),
            current_page,
            has_previous: previous_page(current_page).is_some(),
            has_next: next_page(current_page, total_pages).is_some(),
        })
    }

    fn compute_status(&self) -> Option<StatusLine> {
        match self.controller.status() {
            FetchStatus::Loading { .. } => Some(StatusLine {
                kind: StatusKind::Loading,
                message: "Loading candidates...".to_string(),
            }),
            FetchStatus::Failed { message } => Some(StatusLine {
                kind: StatusKind::Error,
                message: format!("{message}  (r: retry)"),
            }),
            FetchStatus::Idle | FetchStatus::Loaded => None,
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        match self.controller.result() {
            Some(page) if page.candidates.is_empty() => Some(EmptyState {
                message: "No candidates found".to_string(),
                subtitle: "Try a different search, or press x to clear search and filters".to_string(),
            }),
            Some(_) => None,
            None => match self.controller.status() {
                FetchStatus::Failed { .. } => Some(EmptyState {
                    message: "Candidates could not be loaded".to_string(),
                    subtitle: "Press r to try again".to_string(),
                }),
                _ => Some(EmptyState {
                    message: "Loading candidates".to_string(),
                    subtitle: "Waiting for the candidate API".to_string(),
                }),
            },
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Normal => {
                "j/k: select  h/l: page  g/G: first/last  /: search  f: filters  s: sort  x: reset  r: retry  q: quit"
            }
            InputMode::Search => "Type to search  Backspace: delete  Ctrl+u: clear  Enter/Esc: done",
            InputMode::Filters => "j/k: move  Space/Enter: toggle  Esc/f: done",
        };
        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Character ranges of `text` matched by `query`, coalesced into contiguous
/// `(start, end)` runs with exclusive ends.
fn compute_highlight_ranges(text: &str, query: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
    use fuzzy_matcher::FuzzyMatcher;

    let Some((_score, indices)) = matcher.fuzzy_indices(text, query) else {
        return vec![];
    };

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for idx in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end == idx => *end = idx + 1,
            _ => ranges.push((idx, idx + 1)),
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiConfig, FetchRequest};
    use crate::domain::page_window::PageMarker::{Ellipsis, Page};
    use chrono::TimeZone;

    fn app() -> AppState {
        AppState::new(QueryController::new(ApiConfig::default(), 10), Theme::default())
    }

    fn commit(state: &mut AppState, request: Option<FetchRequest>, body: serde_json::Value) {
        let request = request.expect("request issued");
        state
            .controller
            .on_response(&request.ticket, 200, body.to_string().as_bytes());
        state.clamp_selection();
    }

    fn loaded(count: usize, total_pages: u32) -> AppState {
        let mut state = app();
        let candidates: Vec<_> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "id": i,
                    "name": format!("Candidate {i}"),
                    "position": "Backend Engineer",
                    "status": "Interviewing",
                    "last_activity": "2024-05-08T12:00:00Z",
                })
            })
            .collect();
        let request = state.controller.start();
        commit(
            &mut state,
            request,
            serde_json::json!({"candidates": candidates, "total": count * 3, "total_pages": total_pages}),
        );
        state
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut state = loaded(3, 1);
        state.move_selection_up();
        assert_eq!(state.selected_index, 2);
        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn selection_is_a_no_op_without_candidates() {
        let mut state = app();
        state.move_selection_down();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
        assert!(state.selected_candidate().is_none());
    }

    #[test]
    fn filter_cursor_walks_all_options() {
        let mut state = app();
        assert_eq!(
            state.filter_choice_under_cursor(),
            Some((FilterCategory::ApplicationType, "active"))
        );
        state.move_filter_cursor_up();
        assert_eq!(state.filter_choice_under_cursor(), Some((FilterCategory::Source, "GitHub")));
        state.move_filter_cursor_down();
        state.move_filter_cursor_down();
        assert_eq!(
            state.filter_choice_under_cursor(),
            Some((FilterCategory::ApplicationType, "archived"))
        );
    }

    #[test]
    fn viewmodel_lists_rows_and_summary() {
        let vm = loaded(2, 1).compute_viewmodel_at(40, 120, now());
        assert_eq!(vm.header.title, " Showing 6 candidate applications ");
        assert_eq!(vm.header.subtitle, "Sort: Last Activity (new to old)");
        assert_eq!(vm.rows.len(), 2);
        assert!(vm.rows[0].is_selected);
        assert_eq!(vm.rows[1].last_activity, "2d ago");
        assert!(vm.pagination.is_none());
        assert!(vm.status.is_none());
        assert!(vm.empty_state.is_none());
        assert!(vm.details.is_some());
    }

    #[test]
    fn pagination_appears_with_more_than_one_page() {
        let vm = loaded(5, 20).compute_viewmodel_at(40, 120, now());
        let bar = vm.pagination.unwrap();
        assert_eq!(bar.markers, vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(20)]);
        assert!(!bar.has_previous);
        assert!(bar.has_next);
    }

    #[test]
    fn pagination_is_hidden_for_a_single_page_or_no_results() {
        assert!(loaded(3, 1).compute_viewmodel_at(40, 120, now()).pagination.is_none());
        assert!(loaded(0, 0).compute_viewmodel_at(40, 120, now()).pagination.is_none());
        assert!(app().compute_viewmodel_at(40, 120, now()).pagination.is_none());
    }

    #[test]
    fn failed_page_change_keeps_the_bar_on_the_shown_page() {
        let mut state = loaded(2, 3);
        let request = state.controller.next_page().unwrap();
        state.controller.on_response(&request.ticket, 503, b"");

        let bar = state.compute_viewmodel_at(40, 120, now()).pagination.unwrap();
        assert_eq!(bar.current_page, 1);
        assert!(!bar.has_previous);
        assert!(bar.has_next);
    }

    #[test]
    fn failed_fetch_keeps_rows_and_shows_error() {
        let mut state = loaded(2, 2);
        let request = state.controller.next_page().unwrap();
        state.controller.on_response(&request.ticket, 500, b"");

        let vm = state.compute_viewmodel_at(40, 120, now());
        assert_eq!(vm.rows.len(), 2);
        let status = vm.status.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.message.starts_with("Failed to load candidates (HTTP 500)"));
    }

    #[test]
    fn empty_states_distinguish_loading_failure_and_no_matches() {
        let mut state = app();
        state.controller.start();
        let vm = state.compute_viewmodel_at(40, 120, now());
        assert_eq!(vm.empty_state.unwrap().message, "Loading candidates");
        assert_eq!(vm.status.unwrap().kind, StatusKind::Loading);

        state.controller.on_timeout();
        let vm = state.compute_viewmodel_at(40, 120, now());
        assert_eq!(vm.empty_state.unwrap().message, "Candidates could not be loaded");

        let vm = loaded(0, 0).compute_viewmodel_at(40, 120, now());
        assert_eq!(vm.empty_state.unwrap().message, "No candidates found");
        assert_eq!(vm.header.title, " Showing 0 candidate applications ");
    }

    #[test]
    fn search_text_highlights_matching_name_characters() {
        let mut state = loaded(1, 1);
        let request = state.controller.set_search_text("cand");
        commit(
            &mut state,
            request,
            serde_json::json!({"candidates": [{"id": 1, "name": "Candace Lee"}], "total": 1, "total_pages": 1}),
        );
        let vm = state.compute_viewmodel_at(40, 120, now());
        assert_eq!(vm.rows[0].highlight_ranges, vec![(0, 4)]);
        assert_eq!(vm.search_bar.unwrap().query, "cand");
    }

    #[test]
    fn filter_panel_marks_checked_options_and_cursor() {
        let mut state = app();
        state.controller.toggle_filter(FilterCategory::Source, "Referral");
        state.input_mode = InputMode::Filters;
        state.filter_cursor = 1;

        let vm = state.compute_viewmodel_at(40, 120, now());
        let panel = vm.filter_panel.unwrap();
        assert_eq!(panel.groups.len(), 2);
        assert!(panel.groups[0].options[1].has_cursor);
        assert!(panel.groups[1].options[2].is_checked);
        assert_eq!(vm.header.subtitle, "Sort: Last Activity (new to old)  |  Filters: Referral");
    }

    #[test]
    fn rows_window_around_selection_on_short_panes() {
        let mut state = loaded(30, 1);
        state.selected_index = 20;
        let vm = state.compute_viewmodel_at(20, 120, now());
        assert!(vm.rows.len() < 30);
        assert!(vm.rows[vm.selected_index].is_selected);
        assert_eq!(vm.rows[vm.selected_index].name, "Candidate 20");
    }

    #[test]
    fn details_combine_job_title_and_company() {
        let candidate: Candidate = serde_json::from_str(
            r#"{"id": 1, "name": "X", "job_title": "Engineer", "company": "Acme",
                "has_interviews": true, "interviews": [{"name": "Onsite"}]}"#,
        )
        .unwrap();
        let details = AppState::compute_details(&candidate);
        assert_eq!(details.role, "Engineer at Acme");
        assert_eq!(details.interviews, vec!["Onsite"]);
        assert_eq!(details.availability, None);
    }

    #[test]
    fn highlight_ranges_coalesce_consecutive_matches() {
        let matcher = SkimMatcherV2::default();
        assert_eq!(compute_highlight_ranges("ann lee", "lee", &matcher), vec![(4, 7)]);
        assert_eq!(compute_highlight_ranges("ann lee", "al", &matcher), vec![(0, 1), (4, 5)]);
        assert!(compute_highlight_ranges("ann", "xyz", &matcher).is_empty());
    }
}
