//! Wire types for the checklist query endpoint.
//!
//! Field names on the wire are the Portuguese names the dashboard consumes;
//! the Rust names are their English equivalents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display form of one checklist submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestView {
    /// Submission date, `dd/mm/yyyy`.
    #[serde(rename = "data")]
    pub date: String,
    /// Submission time, `HH:MM:SS`.
    #[serde(rename = "hora")]
    pub time: String,
    #[serde(rename = "operador")]
    pub operator: String,
    pub status: String,
    /// Compliance percentage in `[0, 100]`. Absent on the placeholder view.
    #[serde(
        rename = "conformidade",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub compliance: Option<u8>,
    /// Number of answers flagging a problem. Absent on the placeholder view.
    #[serde(rename = "problemas", default, skip_serializing_if = "Option::is_none")]
    pub problems: Option<u32>,
}

/// Most-recent-first summary of the backing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "ultimaVerificacao")]
    pub latest: LatestView,
    #[serde(rename = "historicoVerificacoes")]
    pub history: Vec<LatestView>,
    #[serde(rename = "totalVerificacoes")]
    pub total: usize,
    #[serde(rename = "ultimaAtualizacao")]
    pub generated_at: DateTime<Utc>,
}

/// Error payload returned when the table is missing or processing fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            error: error.into(),
            timestamp: Some(timestamp),
        }
    }
}

/// Serializes as `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmptyObject {}

/// Payload returned when the backing table has no rows at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmptyTableBody {
    pub error: String,
    #[serde(rename = "ultimaVerificacao")]
    pub latest: EmptyObject,
    #[serde(rename = "historicoVerificacoes")]
    pub history: Vec<LatestView>,
}

impl EmptyTableBody {
    pub const MESSAGE: &'static str = "no data found";

    pub fn new() -> Self {
        Self {
            error: Self::MESSAGE.to_string(),
            latest: EmptyObject {},
            history: Vec::new(),
        }
    }
}

impl Default for EmptyTableBody {
    fn default() -> Self {
        Self::new()
    }
}

/// Any payload the query endpoint can produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Summary(Summary),
    EmptyTable(EmptyTableBody),
    Error(ErrorBody),
}

impl QueryResponse {
    /// Returns the `error` field, if the payload carries one.
    pub fn error(&self) -> Option<&str> {
        match self {
            QueryResponse::Summary(_) => None,
            QueryResponse::EmptyTable(body) => Some(&body.error),
            QueryResponse::Error(body) => Some(&body.error),
        }
    }

    /// Consumes the response, returning the summary on success.
    pub fn into_summary(self) -> Option<Summary> {
        match self {
            QueryResponse::Summary(summary) => Some(summary),
            _ => None,
        }
    }
}
