//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only entry point through which the plugin runtime
//! changes application state. It returns whether the pane needs re-rendering
//! and the side effects to perform.
//!
//! Events fall into a few groups:
//! - **Selection**: `KeyDown`, `KeyUp` (rows, or filter options in filter mode)
//! - **Paging**: `NextPage`, `PreviousPage`, `FirstPage`, `LastPage`
//! - **Query edits**: `Char`, `Backspace`, `ClearSearch`, `ToggleFilter`,
//!   `CycleSort`, `ResetAll`, `Retry`
//! - **Modes**: `SearchMode`, `ExitSearch`, `FilterMode`, `ExitFilters`
//! - **Host**: `Start`, `FetchCompleted`, `TimerElapsed`, `Teardown`, `CloseFocus`

use super::controller::ResponseOutcome;
use super::modes::InputMode;
use crate::api::{FetchRequest, FetchTicket, TraceContext};
use crate::app::{Action, AppState};
use std::collections::BTreeMap;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Events triggered by user input or the plugin host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The host can perform web requests; load the first page.
    Start,

    KeyDown,
    KeyUp,

    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,

    SearchMode,
    /// Leaves search mode, keeping the search text.
    ExitSearch,
    Char(char),
    Backspace,
    ClearSearch,

    FilterMode,
    ExitFilters,
    /// Toggles the filter option under the filter cursor.
    ToggleFilter,

    CycleSort,
    ResetAll,
    Retry,

    CloseFocus,

    /// A web request finished. `context` is the map the request was issued with.
    FetchCompleted {
        status: u16,
        body: Vec<u8>,
        context: BTreeMap<String, String>,
    },

    /// A request timeout timer expired.
    TimerElapsed,

    /// The plugin is about to close.
    Teardown,
}

/// Processes an event, mutates application state, and returns
/// `(should_render, actions)`.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventKind(event)).entered();

    match event {
        Event::Start => {
            let request = state.controller.start();
            (true, dispatch(state, request))
        }
        Event::KeyDown => {
            if state.input_mode == InputMode::Filters {
                state.move_filter_cursor_down();
            } else {
                state.move_selection_down();
            }
            (true, vec![])
        }
        Event::KeyUp => {
            if state.input_mode == InputMode::Filters {
                state.move_filter_cursor_up();
            } else {
                state.move_selection_up();
            }
            (true, vec![])
        }
        Event::NextPage => {
            let request = state.controller.next_page();
            query_changed(state, request)
        }
        Event::PreviousPage => {
            let request = state.controller.previous_page();
            query_changed(state, request)
        }
        Event::FirstPage => {
            let request = state.controller.first_page();
            query_changed(state, request)
        }
        Event::LastPage => {
            let request = state.controller.last_page();
            query_changed(state, request)
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            (true, vec![])
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.controller.state().search_text, "leaving search mode");
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        Event::Char(c) => {
            if state.input_mode != InputMode::Search {
                return (false, vec![]);
            }
            let mut text = state.controller.state().search_text.clone();
            text.push(*c);
            tracing::trace!(query = %text, char = %c, "search text updated");
            let request = state.controller.set_search_text(text);
            query_changed(state, request)
        }
        Event::Backspace => {
            if state.input_mode != InputMode::Search {
                return (false, vec![]);
            }
            let mut text = state.controller.state().search_text.clone();
            if text.pop().is_none() {
                return (false, vec![]);
            }
            let request = state.controller.set_search_text(text);
            query_changed(state, request)
        }
        Event::ClearSearch => {
            let request = state.controller.set_search_text(String::new());
            query_changed(state, request)
        }
        Event::FilterMode => {
            state.input_mode = InputMode::Filters;
            (true, vec![])
        }
        Event::ExitFilters => {
            state.input_mode = InputMode::Normal;
            (true, vec![])
        }
        Event::ToggleFilter => {
            if state.input_mode != InputMode::Filters {
                return (false, vec![]);
            }
            let Some((category, value)) = state.filter_choice_under_cursor() else {
                return (false, vec![]);
            };
            tracing::debug!(category = category.param_name(), value, "toggling filter");
            let request = state.controller.toggle_filter(category, value);
            query_changed(state, request)
        }
        Event::CycleSort => {
            let sort = state.controller.state().sort.next();
            tracing::debug!(sort = sort.label(), "changing sort");
            let request = state.controller.set_sort(sort);
            query_changed(state, request)
        }
        Event::ResetAll => {
            let request = state.controller.reset_all();
            query_changed(state, request)
        }
        Event::Retry => {
            let request = state.controller.retry();
            (request.is_some(), dispatch(state, request))
        }
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        Event::FetchCompleted {
            status,
            body,
            context,
        } => {
            let Some(ticket) = FetchTicket::from_context(context) else {
                tracing::debug!("ignoring web request result without a candidate ticket");
                return (false, vec![]);
            };
            let span = tracing::debug_span!("fetch_completed", seq = ticket.seq, status);
            if let Some(parent) = ticket.trace_context.as_ref().and_then(TraceContext::parent_context) {
                span.set_parent(parent);
            }
            let _span = span.entered();

            match state.controller.on_response(&ticket, *status, body) {
                ResponseOutcome::Discarded => (false, vec![]),
                ResponseOutcome::Failed => (true, vec![]),
                ResponseOutcome::Committed => {
                    state.clamp_selection();
                    (true, vec![])
                }
                ResponseOutcome::Clamped(request) => {
                    state.clamp_selection();
                    (true, dispatch(state, Some(request)))
                }
            }
        }
        Event::TimerElapsed => (state.controller.on_timeout(), vec![]),
        Event::Teardown => {
            state.controller.teardown();
            (false, vec![])
        }
    }
}

/// Event name without payload, for span fields.
struct EventKind<'a>(&'a Event);

impl std::fmt::Debug for EventKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Event::FetchCompleted { status, body, .. } => {
                write!(f, "FetchCompleted(status={status}, bytes={})", body.len())
            }
            other => write!(f, "{other:?}"),
        }
    }
}

fn query_changed(state: &mut AppState, request: Option<FetchRequest>) -> (bool, Vec<Action>) {
    if request.is_none() {
        return (false, vec![]);
    }
    state.selected_index = 0;
    (true, dispatch(state, request))
}

fn dispatch(state: &AppState, request: Option<FetchRequest>) -> Vec<Action> {
    request.map_or_else(Vec::new, |request| {
        Action::dispatch(request, state.controller.fetch_timeout())
    })
}
