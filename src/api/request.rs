//! Outgoing candidate requests.
//!
//! A request is a URL plus a [`FetchTicket`]. The plugin host performs the
//! HTTP call and hands the ticket back, as a string map, together with the
//! response. The ticket's sequence number is what lets the controller discard
//! responses that a newer request has superseded.

use crate::domain::error::{BrowserError, Result};
use crate::domain::query::{QueryState, DEFAULT_PER_PAGE, MAX_PER_PAGE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Endpoint used when no `api_url` is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/candidates";

/// Context key identifying requests issued by this plugin.
const ORIGIN_KEY: &str = "origin";
const ORIGIN_VALUE: &str = "candidate-browser";
const SEQ_KEY: &str = "request_seq";
const TRACE_ID_KEY: &str = "trace_id";
const PARENT_SPAN_KEY: &str = "parent_span_id";

/// Where and how candidate pages are requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub per_page: u32,
    /// Restricts every request to one job posting when set.
    pub job_id: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            job_id: None,
        }
    }
}

impl ApiConfig {
    /// Builds the full request URL for a query state.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Request`] if the parameters cannot be encoded.
    ///
    /// ```
    /// use candidate_browser::api::ApiConfig;
    /// use candidate_browser::domain::QueryState;
    ///
    /// let url = ApiConfig::default().request_url(&QueryState::default()).unwrap();
    /// assert_eq!(
    ///     url,
    ///     "http://localhost:8000/api/candidates?page=1&per_page=5&sort_by=last_activity&sort_order=desc"
    /// );
    /// ```
    pub fn request_url(&self, state: &QueryState) -> Result<String> {
        let mut params = state.to_request_parameters(self.per_page.clamp(1, MAX_PER_PAGE));
        if let Some(job_id) = self.job_id.as_ref().filter(|id| !id.is_empty()) {
            params.push("job_id", job_id.clone());
        }
        let query = params.to_query_string()?;

        if self.base_url.is_empty() {
            return Err(BrowserError::Request("empty API URL".to_string()));
        }
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        Ok(format!("{}{separator}{query}", self.base_url))
    }
}

/// Distributed tracing context for linking a response span to its request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,
    /// Span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the current span's trace and span IDs.
    ///
    /// Returns `None` when no valid OpenTelemetry span is active, which is the
    /// normal case when tracing is disabled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// The request's span as a remote parent context.
    ///
    /// Returns `None` if the ids are not valid hex.
    #[must_use]
    pub fn parent_context(&self) -> Option<opentelemetry::Context> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Identity of one issued request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    /// Monotonically increasing per controller; higher means newer.
    pub seq: u64,
    pub trace_context: Option<TraceContext>,
}

impl FetchTicket {
    /// Creates a ticket carrying the current trace context.
    #[must_use]
    pub fn new(seq: u64) -> Self {
        Self {
            seq,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Encodes the ticket as the string map the plugin host echoes back.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(ORIGIN_KEY.to_string(), ORIGIN_VALUE.to_string());
        context.insert(SEQ_KEY.to_string(), self.seq.to_string());
        if let Some(trace) = &self.trace_context {
            context.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            context.insert(PARENT_SPAN_KEY.to_string(), trace.parent_span_id.clone());
        }
        context
    }

    /// Decodes a ticket from a host context map.
    ///
    /// Returns `None` for requests this plugin did not issue.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        if context.get(ORIGIN_KEY).map(String::as_str) != Some(ORIGIN_VALUE) {
            return None;
        }
        let seq = context.get(SEQ_KEY)?.parse().ok()?;
        let trace_context = match (context.get(TRACE_ID_KEY), context.get(PARENT_SPAN_KEY)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };
        Some(Self { seq, trace_context })
    }
}

/// A request ready for the plugin host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub url: String,
}
