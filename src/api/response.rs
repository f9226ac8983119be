//! Classification of candidate API responses.

use crate::domain::candidate::CandidatePage;
use crate::domain::error::{BrowserError, Result};

/// Turns a host-reported HTTP result into a page of candidates.
///
/// Any status outside `200..300` is a transport failure; the plugin host
/// reports unreachable endpoints with status 0. A success status with a body
/// that is not a candidate page is a malformed response.
///
/// # Errors
///
/// Returns [`BrowserError::Transport`] or [`BrowserError::MalformedResponse`].
pub fn parse_candidate_page(status: u16, body: &[u8]) -> Result<CandidatePage> {
    if !(200..300).contains(&status) {
        tracing::debug!(status, body_len = body.len(), "candidate request failed");
        return Err(BrowserError::Transport { status });
    }

    serde_json::from_slice::<CandidatePage>(body).map_err(|e| {
        tracing::debug!(error = %e, body_len = body.len(), "candidate response did not parse");
        BrowserError::MalformedResponse(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_parses_into_page() {
        let body = br#"{
            "candidates": [{"id": 1, "name": "Ada Park", "job_title": "Engineer"}],
            "total": 11, "page": 1, "per_page": 5, "total_pages": 3
        }"#;
        let page = parse_candidate_page(200, body).unwrap();
        assert_eq!(page.candidates.len(), 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total, 11);
        assert_eq!(page.page, Some(1));
    }

    #[test]
    fn non_success_status_is_transport_failure() {
        assert!(matches!(
            parse_candidate_page(502, b"{}"),
            Err(BrowserError::Transport { status: 502 })
        ));
        assert!(matches!(
            parse_candidate_page(0, b""),
            Err(BrowserError::Transport { status: 0 })
        ));
    }

    #[test]
    fn unexpected_shape_is_malformed() {
        assert!(matches!(
            parse_candidate_page(200, br#"{"items": []}"#),
            Err(BrowserError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_candidate_page(200, b"<html>"),
            Err(BrowserError::MalformedResponse(_))
        ));
    }

    #[test]
    fn empty_result_set_is_valid() {
        let page = parse_candidate_page(200, br#"{"candidates": [], "total": 0, "total_pages": 0}"#).unwrap();
        assert!(page.candidates.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
