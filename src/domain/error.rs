//! Error types for the candidate browser.
//!
//! [`BrowserError`] is the single error enum used across the crate, with a
//! [`Result`] alias for convenience. Fetch errors never reach the view as
//! errors: the controller folds them into a failed fetch status.

use thiserror::Error;

/// The main error type for candidate browser operations.
///
/// # Examples
///
/// ```
/// use candidate_browser::BrowserError;
///
/// let err = BrowserError::Transport { status: 503 };
/// assert_eq!(err.to_string(), "Request failed with HTTP status 503");
/// ```
#[derive(Debug, Error)]
pub enum BrowserError {
    /// The candidate API answered with a non-success status, or the host could
    /// not reach it at all (reported as status 0 by the plugin host).
    #[error("Request failed with HTTP status {status}")]
    Transport {
        /// HTTP status code reported by the host.
        status: u16,
    },

    /// The response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Request parameters could not be encoded into a URL.
    #[error("Request encoding error: {0}")]
    Request(String),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrowserError {
    /// Short message shown in the status line when a fetch fails.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { status: 0 } => "Failed to load candidates: API unreachable".to_string(),
            Self::Transport { status } => format!("Failed to load candidates (HTTP {status})"),
            Self::MalformedResponse(_) => "Failed to load candidates: unexpected response".to_string(),
            other => format!("Failed to load candidates: {other}"),
        }
    }
}

/// A specialized `Result` type for candidate browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;
