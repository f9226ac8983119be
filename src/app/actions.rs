//! Side effects requested by the event handler.
//!
//! The handler never talks to the plugin host. It returns a `Vec<Action>` and
//! the host shim in `main.rs` performs each one in order.

use crate::api::FetchRequest;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Performs an HTTP GET. `context` is echoed back with the result and
    /// identifies which request it answers.
    IssueRequest {
        url: String,
        context: BTreeMap<String, String>,
    },

    /// Arms a one-shot host timer that reports back as a timeout.
    ArmTimeout { seconds: u64 },
}

impl Action {
    /// Actions that perform `request`, arming its timeout when one is set.
    #[must_use]
    pub fn dispatch(request: FetchRequest, timeout: Option<u64>) -> Vec<Self> {
        let mut actions = vec![Self::IssueRequest {
            url: request.url,
            context: request.ticket.to_context(),
        }];
        if let Some(seconds) = timeout {
            actions.push(Self::ArmTimeout { seconds });
        }
        actions
    }
}
