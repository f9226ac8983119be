//! Zellij plugin entry point.
//!
//! A thin shim between the host and the library: it translates host events
//! into [`Event`]s, hands them to [`handle_event`], and carries out the
//! returned [`Action`]s with host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: request `WebAccess`; once granted, fetch page 1
//! 3. **Update**: keys, web request results and timers become events
//! 4. **Render**: delegate to the library renderer
//! 5. **Close**: `BeforeClose` tears the controller down
//!
//! # Event Mapping
//!
//! - `Key` → mode-dependent navigation, search and filter events
//! - `WebRequestResult` → `Event::FetchCompleted`
//! - `Timer` → `Event::TimerElapsed`
//! - `BeforeClose` → `Event::Teardown`
//!
//! # Keybindings
//!
//! Any mode:
//! - `Ctrl+n` / `Ctrl+p`: move down / up
//!
//! Normal mode:
//! - `j`/`Down`, `k`/`Up`: select candidate
//! - `h`/`Left`, `l`/`Right`: previous / next page
//! - `g`/`Home`, `G`/`End`: first / last page
//! - `/`: search, `f`: filters, `s`: cycle sort
//! - `x`: reset search, filters and sort
//! - `r`: retry the last request
//! - `q`: close
//!
//! Search mode:
//! - characters edit the search text, `Backspace` deletes, `Ctrl+u` clears
//! - `Enter`/`Esc`: back to normal mode
//!
//! Filter mode:
//! - `j`/`k`: move between options, `Space`/`Enter`: toggle
//! - `Esc`/`f`: back to normal mode

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use candidate_browser::{handle_event, Action, AppState, Config, Event, InputMode};

register_plugin!(State);

struct State {
    app: AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: candidate_browser::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        candidate_browser::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_url = %config.api_url, job_id = ?config.job_id, "parsed configuration");
        self.app = candidate_browser::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
            EventType::BeforeClose,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                tracing::debug!(status, body_len = body.len(), "web request result");
                Event::FetchCompleted { status, body, context }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::TimerElapsed,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("web access granted - loading first page");
                    Event::Start
                }
                PermissionStatus::Denied => {
                    tracing::warn!("web access denied - candidates cannot be loaded");
                    return false;
                }
            },
            zellij_tile::prelude::Event::BeforeClose => Event::Teardown,
            _ => return false,
        };

        let (should_render, actions) = handle_event(&mut self.app, &our_event);
        tracing::debug!(action_count = actions.len(), should_render, "event handled");
        for action in &actions {
            Self::execute_action(action);
        }
        should_render
    }

    fn render(&mut self, rows: usize, cols: usize) {
        candidate_browser::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(..) => "WebRequestResult".to_string(),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            zellij_tile::prelude::Event::BeforeClose => "BeforeClose".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('u') if self.app.input_mode == InputMode::Search => Some(Event::ClearSearch),
                _ => None,
            };
        }

        match self.app.input_mode {
            InputMode::Normal => Self::map_normal_key(key.bare_key),
            InputMode::Search => Self::map_search_key(key.bare_key),
            InputMode::Filters => Self::map_filter_key(key.bare_key),
        }
    }

    fn map_normal_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Left | BareKey::Char('h') => Event::PreviousPage,
            BareKey::Right | BareKey::Char('l') => Event::NextPage,
            BareKey::Home | BareKey::Char('g') => Event::FirstPage,
            BareKey::End | BareKey::Char('G') => Event::LastPage,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('f') => Event::FilterMode,
            BareKey::Char('s') => Event::CycleSort,
            BareKey::Char('x') => Event::ResetAll,
            BareKey::Char('r') => Event::Retry,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    fn map_search_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Enter | BareKey::Esc => Event::ExitSearch,
            BareKey::Backspace => Event::Backspace,
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_filter_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char(' ') | BareKey::Enter => Event::ToggleFilter,
            BareKey::Esc | BareKey::Char('f') => Event::ExitFilters,
            _ => return None,
        })
    }

    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => hide_self(),
            Action::IssueRequest { url, context } => {
                web_request(url, HttpVerb::Get, BTreeMap::new(), vec![], context.clone());
            }
            Action::ArmTimeout { seconds } => {
                // Precision loss is irrelevant for timeouts measured in seconds.
                #[allow(clippy::cast_precision_loss)]
                set_timeout(*seconds as f64);
            }
        }
    }
}
