//! Application layer coordinating query state, events, and actions.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain and API layers:
//!
//! ```text
//! Key / host event → Event → handle_event → QueryController → Action(s)
//!                                  ↑                             ↓
//!                                  └──── FetchCompleted / Timer ─┘
//! ```
//!
//! - [`controller`]: owner of the query state; issues and commits fetches
//! - [`handler`]: event dispatch and mode transitions
//! - [`state`]: view-side state and view model computation
//! - [`modes`]: input modes
//! - [`actions`]: side effects for the host shim
//!
//! ```
//! use candidate_browser::app::{handle_event, Action, AppState, Event, QueryController};
//! use candidate_browser::api::ApiConfig;
//! use candidate_browser::ui::Theme;
//!
//! let mut state = AppState::new(QueryController::new(ApiConfig::default(), 10), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Start);
//! assert!(render);
//! assert!(matches!(actions[0], Action::IssueRequest { .. }));
//! ```

pub mod actions;
pub mod controller;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use controller::{FetchStatus, QueryController, ResponseOutcome};
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::AppState;
