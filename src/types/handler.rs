//! Invocation result types: per-ticker outcomes and the handler envelope.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::CORS_HEADERS;
use crate::error::Result;

/// Final state of one ticker within an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "status")]
pub enum TickerStatus {
    Success,
    Failed { error: String },
}

/// Outcome of processing one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerOutcome {
    pub ticker: String,
    #[serde(flatten)]
    pub status: TickerStatus,
}

impl TickerOutcome {
    pub fn success(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            status: TickerStatus::Success,
        }
    }

    pub fn failed(ticker: impl Into<String>, error: impl ToString) -> Self {
        Self {
            ticker: ticker.into(),
            status: TickerStatus::Failed {
                error: error.to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == TickerStatus::Success
    }
}

/// Bookkeeping for a whole invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Daily log key written during this run.
    pub daily_key: String,
    /// Whether this run found the daily log absent and bootstrapped it.
    pub first_run_of_day: bool,
    /// Per-ticker outcomes in processing order.
    pub outcomes: Vec<TickerOutcome>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// HTTP-style envelope returned by the handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded results list.
    pub body: String,
}

impl HandlerResponse {
    /// Build the always-200 response. With `report` the body lists every
    /// ticker outcome; otherwise it is an empty JSON array.
    pub fn from_summary(summary: &RunSummary, report: bool) -> Result<Self> {
        let body = if report {
            serde_json::to_string(&summary.outcomes)?
        } else {
            "[]".to_owned()
        };
        Ok(Self {
            status_code: 200,
            headers: CORS_HEADERS
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> RunSummary {
        RunSummary {
            daily_key: "2025-06-13.json".into(),
            first_run_of_day: false,
            outcomes: vec![
                TickerOutcome::failed("A", "boom"),
                TickerOutcome::success("B"),
            ],
        }
    }

    #[test]
    fn unreported_body_is_empty_array() {
        let resp = HandlerResponse::from_summary(&summary(), false).unwrap();
        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.body, "[]");
        assert_eq!(resp.headers["Access-Control-Allow-Origin"], "*");
    }

    #[test]
    fn reported_body_lists_outcomes() {
        let resp = HandlerResponse::from_summary(&summary(), true).unwrap();
        let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(body[0]["ticker"], "A");
        assert_eq!(body[0]["status"], "failed");
        assert_eq!(body[0]["error"], "boom");
        assert_eq!(body[1]["status"], "success");
    }

    #[test]
    fn summary_counts() {
        let s = summary();
        assert_eq!(s.succeeded(), 1);
        assert_eq!(s.failed(), 1);
    }
}
