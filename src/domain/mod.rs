//! Domain layer for the candidate browser.
//!
//! Pure types and rules with no dependency on the plugin host:
//!
//! - [`query`]: query state, its transitions, and request parameter derivation
//! - [`page_window`]: the truncated page-number window for pagination controls
//! - [`candidate`]: candidate records and result pages from the API
//! - [`error`]: error types and result alias

pub mod candidate;
pub mod error;
pub mod page_window;
pub mod query;

pub use candidate::{Candidate, CandidateId, CandidatePage, Interview};
pub use error::{BrowserError, Result};
pub use page_window::{page_window, PageMarker};
pub use query::{FilterCategory, Filters, QueryState, RequestParameters, SortKey, SortOption, SortOrder};
