//! Query controller: the single owner of [`QueryState`].
//!
//! Every state-changing operation replaces the query state wholesale and, when
//! the new state differs from the old one, issues a fetch tagged with a fresh
//! sequence number. Responses are committed only when their sequence number is
//! the one currently in flight, so a slow response to an older query can never
//! overwrite the result of a newer one.
//!
//! The controller performs no I/O. Operations return the [`FetchRequest`] to
//! perform and the caller reports the outcome back through
//! [`QueryController::on_response`] and [`QueryController::on_timeout`].

use crate::api::{parse_candidate_page, ApiConfig, FetchRequest, FetchTicket};
use crate::domain::candidate::CandidatePage;
use crate::domain::page_window::{next_page, page_window, previous_page, PageMarker};
use crate::domain::query::{FilterCategory, QueryState, RequestParameters, SortOption};
use std::collections::VecDeque;

/// Seconds before an unanswered request is declared failed.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

const TIMEOUT_MESSAGE: &str = "Failed to load candidates: request timed out";

/// Where the most recent fetch stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    /// Nothing has been requested yet.
    #[default]
    Idle,
    Loading {
        seq: u64,
    },
    Loaded,
    /// The last fetch failed; the previous result stays visible.
    Failed {
        message: String,
    },
}

/// What happened to a response handed to [`QueryController::on_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseOutcome {
    /// Superseded, timed out, or arrived after teardown.
    Discarded,
    Committed,
    Failed,
    /// Committed, but the requested page no longer exists; the follow-up
    /// request for the last page must be performed.
    Clamped(FetchRequest),
}

#[derive(Debug, Clone)]
pub struct QueryController {
    api: ApiConfig,
    fetch_timeout: Option<u64>,
    state: QueryState,
    result: Option<CandidatePage>,
    /// Page number of `result`, within its page count.
    committed_page: u32,
    status: FetchStatus,
    next_seq: u64,
    in_flight: Option<u64>,
    /// Sequence numbers of requests with a pending timeout timer, oldest first.
    armed_timeouts: VecDeque<u64>,
    torn_down: bool,
}

impl QueryController {
    /// Creates a controller in the default query state. A `fetch_timeout` of
    /// zero disables request timeouts.
    #[must_use]
    pub fn new(api: ApiConfig, fetch_timeout: u64) -> Self {
        Self {
            api,
            fetch_timeout: (fetch_timeout > 0).then_some(fetch_timeout),
            state: QueryState::default(),
            result: None,
            committed_page: 1,
            status: FetchStatus::Idle,
            next_seq: 1,
            in_flight: None,
            armed_timeouts: VecDeque::new(),
            torn_down: false,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &QueryState {
        &self.state
    }

    /// Last successfully committed page of results.
    #[must_use]
    pub const fn result(&self) -> Option<&CandidatePage> {
        self.result.as_ref()
    }

    #[must_use]
    pub const fn status(&self) -> &FetchStatus {
        &self.status
    }

    #[must_use]
    pub const fn fetch_timeout(&self) -> Option<u64> {
        self.fetch_timeout
    }

    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Page count from the last committed result, zero before the first one.
    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.result.as_ref().map_or(0, |page| page.total_pages)
    }

    /// Parameters the current state would be requested with.
    #[must_use]
    pub fn request_parameters(&self) -> RequestParameters {
        self.state.to_request_parameters(self.api.per_page)
    }

    /// Page the user is looking at.
    ///
    /// This is the requested page, except after a failed fetch, when the
    /// last committed result is still on screen and its page is reported.
    #[must_use]
    pub fn current_page(&self) -> u32 {
        match (&self.status, &self.result) {
            (FetchStatus::Failed { .. }, Some(_)) => self.committed_page,
            _ => self.state.page,
        }
    }

    /// Page markers for the current page against the last known page count.
    #[must_use]
    pub fn page_window(&self) -> Vec<PageMarker> {
        page_window(self.current_page(), self.total_pages())
    }

    /// Requests the current state. Used once the host is ready to fetch.
    pub fn start(&mut self) -> Option<FetchRequest> {
        self.issue()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) -> Option<FetchRequest> {
        let next = self.state.with_search_text(text);
        self.transition(next)
    }

    pub fn toggle_filter(&mut self, category: FilterCategory, value: &str) -> Option<FetchRequest> {
        let next = self.state.with_filter_toggled(category, value);
        self.transition(next)
    }

    pub fn set_sort(&mut self, sort: SortOption) -> Option<FetchRequest> {
        let next = self.state.with_sort(sort);
        self.transition(next)
    }

    pub fn set_page(&mut self, page: u32) -> Option<FetchRequest> {
        let next = self.state.with_page(page);
        if next == self.state && next.page != self.current_page() {
            // The page failed to load and the previous one is still shown.
            return self.issue();
        }
        self.transition(next)
    }

    pub fn reset_all(&mut self) -> Option<FetchRequest> {
        self.transition(QueryState::reset())
    }

    /// Moves to the following page; a no-op on the last known page.
    pub fn next_page(&mut self) -> Option<FetchRequest> {
        let page = next_page(self.current_page(), self.total_pages())?;
        self.set_page(page)
    }

    /// Moves to the preceding page; a no-op on page 1.
    pub fn previous_page(&mut self) -> Option<FetchRequest> {
        let page = previous_page(self.current_page())?;
        self.set_page(page)
    }

    pub fn first_page(&mut self) -> Option<FetchRequest> {
        self.set_page(1)
    }

    /// Moves to the last known page; a no-op before any page count is known.
    pub fn last_page(&mut self) -> Option<FetchRequest> {
        match self.total_pages() {
            0 => None,
            total => self.set_page(total),
        }
    }

    /// Re-requests the unchanged state, superseding anything in flight.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        tracing::debug!(page = self.state.page, "retrying candidate fetch");
        self.issue()
    }

    /// Applies a response if it answers the request currently in flight.
    pub fn on_response(&mut self, ticket: &FetchTicket, status: u16, body: &[u8]) -> ResponseOutcome {
        if self.torn_down || self.in_flight != Some(ticket.seq) {
            tracing::debug!(
                response_seq = ticket.seq,
                in_flight_seq = ?self.in_flight,
                torn_down = self.torn_down,
                "discarding stale candidate response"
            );
            return ResponseOutcome::Discarded;
        }
        self.in_flight = None;

        let page = match parse_candidate_page(status, body) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(seq = ticket.seq, status, error = %e, "candidate fetch failed");
                self.status = FetchStatus::Failed {
                    message: e.user_message(),
                };
                return ResponseOutcome::Failed;
            }
        };

        tracing::debug!(
            seq = ticket.seq,
            candidates = page.candidates.len(),
            total = page.total,
            total_pages = page.total_pages,
            "candidate page committed"
        );

        let total_pages = page.total_pages;
        self.result = Some(page);
        self.committed_page = self.state.page.min(total_pages.max(1));
        self.status = FetchStatus::Loaded;

        if total_pages >= 1 && self.state.page > total_pages {
            tracing::debug!(
                requested = self.state.page,
                total_pages,
                "requested page out of range, clamping"
            );
            self.state = self.state.with_page(total_pages);
            if let Some(request) = self.issue() {
                return ResponseOutcome::Clamped(request);
            }
        }
        ResponseOutcome::Committed
    }

    /// Handles one expired timeout timer. Returns `true` if it failed the
    /// request still in flight.
    ///
    /// All timers share one duration, so they expire in the order they were
    /// armed and the oldest armed sequence number belongs to this timer.
    pub fn on_timeout(&mut self) -> bool {
        let Some(seq) = self.armed_timeouts.pop_front() else {
            return false;
        };
        if self.torn_down || self.in_flight != Some(seq) {
            return false;
        }
        tracing::warn!(seq, timeout_secs = ?self.fetch_timeout, "candidate fetch timed out");
        self.in_flight = None;
        self.status = FetchStatus::Failed {
            message: TIMEOUT_MESSAGE.to_string(),
        };
        true
    }

    /// Stops the controller. Later responses and timers are ignored and no
    /// further requests are issued.
    pub fn teardown(&mut self) {
        tracing::debug!(in_flight_seq = ?self.in_flight, "query controller torn down");
        self.torn_down = true;
        self.in_flight = None;
        self.armed_timeouts.clear();
    }

    fn transition(&mut self, next: QueryState) -> Option<FetchRequest> {
        if self.torn_down || next == self.state {
            return None;
        }
        self.state = next;
        self.issue()
    }

    fn issue(&mut self) -> Option<FetchRequest> {
        if self.torn_down {
            return None;
        }
        let span = tracing::debug_span!("issue_fetch", page = self.state.page);
        let _guard = span.enter();

        let url = match self.api.request_url(&self.state) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, "could not build candidate request");
                self.in_flight = None;
                self.status = FetchStatus::Failed {
                    message: e.user_message(),
                };
                return None;
            }
        };

        let seq = self.next_seq;
        self.next_seq += 1;
        if let Some(superseded) = self.in_flight.replace(seq) {
            tracing::debug!(superseded, seq, "superseding in-flight request");
        }
        if self.fetch_timeout.is_some() {
            self.armed_timeouts.push_back(seq);
        }
        self.status = FetchStatus::Loading { seq };

        tracing::debug!(seq, %url, "issuing candidate fetch");
        Some(FetchRequest {
            ticket: FetchTicket::new(seq),
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::page_window::PageMarker::{Ellipsis, Page};
    use crate::domain::query::{SortKey, SortOrder};

    fn controller() -> QueryController {
        QueryController::new(ApiConfig::default(), DEFAULT_FETCH_TIMEOUT_SECS)
    }

    fn body(names: &[&str], total_pages: u32) -> Vec<u8> {
        let candidates: Vec<_> = names
            .iter()
            .enumerate()
            .map(|(i, name)| serde_json::json!({"id": i, "name": name}))
            .collect();
        serde_json::json!({
            "candidates": candidates,
            "total": names.len() as u32 * total_pages,
            "total_pages": total_pages,
        })
        .to_string()
        .into_bytes()
    }

    fn names(controller: &QueryController) -> Vec<String> {
        controller
            .result()
            .map(|page| page.candidates.iter().map(|c| c.name.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn toggling_a_filter_then_loading_three_pages() {
        let mut c = controller();
        let initial = c.start().unwrap();
        c.on_response(&initial.ticket, 200, &body(&["Ada"], 1));

        let request = c.toggle_filter(FilterCategory::Source, "LinkedIn").unwrap();
        let params = c.request_parameters();
        assert_eq!(params.get_all("source"), vec!["LinkedIn"]);
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("search"), None);
        assert!(request.url.contains("source=LinkedIn"));

        let outcome = c.on_response(&request.ticket, 200, &body(&["Lee"], 3));
        assert_eq!(outcome, ResponseOutcome::Committed);
        assert_eq!(c.page_window(), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn older_response_arriving_last_is_discarded() {
        let mut c = controller();
        let a = c.set_search_text("an").unwrap();
        let b = c.set_search_text("ann").unwrap();

        assert_eq!(c.on_response(&b.ticket, 200, &body(&["Ann"], 1)), ResponseOutcome::Committed);
        assert_eq!(c.on_response(&a.ticket, 200, &body(&["Andre", "Anita"], 4)), ResponseOutcome::Discarded);

        assert_eq!(names(&c), vec!["Ann"]);
        assert_eq!(c.total_pages(), 1);
        assert_eq!(c.status(), &FetchStatus::Loaded);
    }

    #[test]
    fn older_response_arriving_first_is_discarded_too() {
        let mut c = controller();
        let a = c.set_sort(SortOption::new(SortKey::Name, SortOrder::Asc)).unwrap();
        let b = c.set_page(2).unwrap();

        assert_eq!(c.on_response(&a.ticket, 200, &body(&["Old"], 5)), ResponseOutcome::Discarded);
        assert_eq!(c.status(), &FetchStatus::Loading { seq: b.ticket.seq });
        assert_eq!(c.on_response(&b.ticket, 200, &body(&["New"], 5)), ResponseOutcome::Committed);
        assert_eq!(names(&c), vec!["New"]);
    }

    #[test]
    fn failure_keeps_previous_result_visible() {
        let mut c = controller();
        let first = c.start().unwrap();
        c.on_response(&first.ticket, 200, &body(&["Ada", "Lee"], 2));

        let next = c.next_page().unwrap();
        assert_eq!(c.on_response(&next.ticket, 503, b""), ResponseOutcome::Failed);

        assert_eq!(names(&c), vec!["Ada", "Lee"]);
        assert_eq!(c.total_pages(), 2);
        assert_eq!(
            c.status(),
            &FetchStatus::Failed {
                message: "Failed to load candidates (HTTP 503)".to_string()
            }
        );
    }

    #[test]
    fn failed_page_change_keeps_the_committed_page_current() {
        let mut c = controller();
        let first = c.start().unwrap();
        c.on_response(&first.ticket, 200, &body(&["Ada"], 3));

        let next = c.next_page().unwrap();
        assert_eq!(c.current_page(), 2);
        c.on_response(&next.ticket, 503, b"");

        assert_eq!(names(&c), vec!["Ada"]);
        assert_eq!(c.current_page(), 1);
        assert_eq!(c.page_window(), vec![Page(1), Page(2), Page(3)]);
        assert!(c.previous_page().is_none());

        let again = c.next_page().unwrap();
        assert!(again.url.contains("page=2&"));
        assert_eq!(c.current_page(), 2);
        c.on_response(&again.ticket, 200, &body(&["Lee"], 3));
        assert_eq!(c.current_page(), 2);
        assert_eq!(names(&c), vec!["Lee"]);
    }

    #[test]
    fn failed_clamped_follow_up_reports_an_in_range_page() {
        let mut c = controller();
        let first = c.start().unwrap();
        c.on_response(&first.ticket, 200, &body(&["Ada"], 8));
        let request = c.set_page(7).unwrap();
        let ResponseOutcome::Clamped(follow_up) = c.on_response(&request.ticket, 200, &body(&[], 2)) else {
            panic!("expected a clamped follow-up request");
        };
        c.on_response(&follow_up.ticket, 500, b"");
        assert_eq!(c.current_page(), 2);
    }

    #[test]
    fn malformed_body_is_a_failure() {
        let mut c = controller();
        let request = c.start().unwrap();
        assert_eq!(c.on_response(&request.ticket, 200, b"not json"), ResponseOutcome::Failed);
        assert!(c.result().is_none());
    }

    #[test]
    fn unchanged_state_issues_nothing() {
        let mut c = controller();
        assert!(c.set_search_text("").is_none());
        assert!(c.set_page(1).is_none());
        assert!(c.reset_all().is_none());
        assert!(c.set_page(0).is_none());
    }

    #[test]
    fn page_navigation_stops_at_the_boundaries() {
        let mut c = controller();
        assert!(c.previous_page().is_none());
        assert!(c.next_page().is_none());
        assert!(c.last_page().is_none());

        let request = c.start().unwrap();
        c.on_response(&request.ticket, 200, &body(&["Ada"], 3));

        let request = c.last_page().unwrap();
        assert_eq!(c.state().page, 3);
        c.on_response(&request.ticket, 200, &body(&["Zoe"], 3));
        assert!(c.next_page().is_none());
        assert!(c.last_page().is_none());

        c.previous_page().unwrap();
        assert_eq!(c.state().page, 2);
        c.first_page().unwrap();
        assert_eq!(c.state().page, 1);
    }

    #[test]
    fn shrinking_result_clamps_page_and_refetches() {
        let mut c = controller();
        let request = c.start().unwrap();
        c.on_response(&request.ticket, 200, &body(&["Ada"], 8));
        let request = c.set_page(7).unwrap();

        let ResponseOutcome::Clamped(follow_up) = c.on_response(&request.ticket, 200, &body(&[], 2)) else {
            panic!("expected a clamped follow-up request");
        };
        assert_eq!(c.state().page, 2);
        assert!(follow_up.url.contains("page=2"));
        assert_eq!(c.status(), &FetchStatus::Loading { seq: follow_up.ticket.seq });
    }

    #[test]
    fn empty_result_keeps_first_page() {
        let mut c = controller();
        let request = c.set_search_text("nobody").unwrap();
        assert_eq!(c.on_response(&request.ticket, 200, &body(&[], 0)), ResponseOutcome::Committed);
        assert_eq!(c.state().page, 1);
        assert_eq!(c.page_window(), vec![Page(1)]);
    }

    #[test]
    fn timeout_fails_only_the_request_in_flight() {
        let mut c = controller();
        let a = c.set_search_text("a").unwrap();
        let b = c.set_search_text("ab").unwrap();

        // a's timer: a was superseded, nothing to fail.
        assert!(!c.on_timeout());
        assert_eq!(c.status(), &FetchStatus::Loading { seq: b.ticket.seq });

        assert!(c.on_timeout());
        assert_eq!(
            c.status(),
            &FetchStatus::Failed {
                message: TIMEOUT_MESSAGE.to_string()
            }
        );
        assert_eq!(c.on_response(&b.ticket, 200, &body(&["Late"], 1)), ResponseOutcome::Discarded);
        assert_eq!(c.on_response(&a.ticket, 200, &body(&["Later"], 1)), ResponseOutcome::Discarded);
        assert!(!c.on_timeout());
    }

    #[test]
    fn timer_after_commit_is_harmless() {
        let mut c = controller();
        let request = c.start().unwrap();
        c.on_response(&request.ticket, 200, &body(&["Ada"], 1));
        assert!(!c.on_timeout());
        assert_eq!(c.status(), &FetchStatus::Loaded);
    }

    #[test]
    fn zero_timeout_arms_nothing() {
        let mut c = QueryController::new(ApiConfig::default(), 0);
        assert_eq!(c.fetch_timeout(), None);
        let request = c.start().unwrap();
        assert!(!c.on_timeout());
        assert_eq!(c.status(), &FetchStatus::Loading { seq: request.ticket.seq });
    }

    #[test]
    fn retry_supersedes_the_failed_request() {
        let mut c = controller();
        let failed = c.start().unwrap();
        c.on_response(&failed.ticket, 0, b"");

        let retried = c.retry().unwrap();
        assert!(retried.ticket.seq > failed.ticket.seq);
        assert_eq!(retried.url, failed.url);
        assert_eq!(c.on_response(&retried.ticket, 200, &body(&["Ada"], 1)), ResponseOutcome::Committed);
    }

    #[test]
    fn nothing_happens_after_teardown() {
        let mut c = controller();
        let request = c.start().unwrap();
        c.teardown();

        assert_eq!(c.on_response(&request.ticket, 200, &body(&["Ada"], 1)), ResponseOutcome::Discarded);
        assert!(c.result().is_none());
        assert!(!c.on_timeout());
        assert!(c.set_search_text("x").is_none());
        assert!(c.retry().is_none());
        assert!(c.is_torn_down());
    }

    #[test]
    fn reset_restores_defaults_and_refetches() {
        let mut c = controller();
        c.set_search_text("lee");
        c.toggle_filter(FilterCategory::ApplicationType, "archived");
        let request = c.reset_all().unwrap();
        assert_eq!(c.state(), &QueryState::default());
        assert!(!request.url.contains("search="));
    }

    #[test]
    fn large_page_counts_render_a_truncated_window() {
        let mut c = controller();
        let request = c.start().unwrap();
        c.on_response(&request.ticket, 200, &body(&["Ada"], 20));
        let request = c.set_page(10).unwrap();
        c.on_response(&request.ticket, 200, &body(&["Ada"], 20));
        assert_eq!(
            c.page_window(),
            vec![Page(1), Ellipsis, Page(9), Page(10), Page(11), Ellipsis, Page(20)]
        );
    }
}
