//! Candidate records as returned by the candidate API.
//!
//! The browser does not interpret these beyond display. Every field except
//! `id` and `name` is optional on the wire so that sparse records still render.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_DAY: i64 = 86400;

/// Candidate identifier; the API uses either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CandidateId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A scheduled or pending interview step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    pub name: String,
}

/// A single job application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub action_link: String,
    #[serde(default)]
    pub has_availability: bool,
    #[serde(default)]
    pub availability_status: Option<String>,
    #[serde(default)]
    pub has_interviews: bool,
    #[serde(default)]
    pub interviews: Option<Vec<Interview>>,
    #[serde(default)]
    pub application_type: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    /// RFC 3339 timestamp or plain `YYYY-MM-DD` date.
    #[serde(default)]
    pub last_activity: Option<String>,
}

impl Candidate {
    /// Availability label, only when the record says availability applies.
    #[must_use]
    pub fn availability(&self) -> Option<&str> {
        if self.has_availability {
            self.availability_status.as_deref()
        } else {
            None
        }
    }

    /// Interview steps, only when the record says interviews apply.
    #[must_use]
    pub fn interviews(&self) -> &[Interview] {
        match (&self.interviews, self.has_interviews) {
            (Some(list), true) => list,
            _ => &[],
        }
    }

    /// Relative age of the last activity ("3d ago"), if it can be parsed.
    #[must_use]
    pub fn last_activity_ago(&self, now: DateTime<Utc>) -> Option<String> {
        let raw = self.last_activity.as_deref()?;
        let timestamp = DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.timestamp())
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc().timestamp())
            })?;
        Some(format_age(now.timestamp() - timestamp))
    }
}

fn format_age(diff: i64) -> String {
    if diff < SECONDS_PER_MINUTE {
        "just now".to_string()
    } else if diff < SECONDS_PER_HOUR {
        format!("{}m ago", diff / SECONDS_PER_MINUTE)
    } else if diff < SECONDS_PER_DAY {
        format!("{}h ago", diff / SECONDS_PER_HOUR)
    } else {
        format!("{}d ago", diff / SECONDS_PER_DAY)
    }
}

/// One page of results from the candidate API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CandidatePage {
    pub candidates: Vec<Candidate>,
    /// Zero when nothing matches.
    pub total_pages: u32,
    /// Number of matching applications across all pages.
    pub total: u64,
    /// Page the server actually served, when it reports one.
    #[serde(default)]
    pub page: Option<u32>,
}
