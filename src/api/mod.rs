//! Candidate API boundary.
//!
//! The plugin never performs HTTP itself. The controller emits a
//! [`FetchRequest`], the host shim hands it to Zellij's `web_request`, and the
//! result comes back as an event carrying the same [`FetchTicket`].
//!
//! - [`request`]: endpoint configuration, URL construction, request tickets
//! - [`response`]: status and body classification

pub mod request;
pub mod response;

pub use request::{ApiConfig, FetchRequest, FetchTicket, TraceContext, DEFAULT_API_URL};
pub use response::parse_candidate_page;
