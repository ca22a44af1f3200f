//! API error types with HTTP response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use common::{ErrorBody, QueryResponse};
use scoring::ScoringError;
use sheet_store::SheetStoreError;
use thiserror::Error;

/// Failures while answering a checklist query.
///
/// Consumers detect failure by the `error` field, so every variant is
/// answered with `200 OK` and an [`ErrorBody`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backing table could not be read.
    #[error(transparent)]
    Store(#[from] SheetStoreError),

    /// The table could not be turned into a summary.
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl ApiError {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Store(SheetStoreError::SheetNotFound(_)) => "sheet_not_found",
            ApiError::Store(_) => "store",
            ApiError::Scoring(_) => "scoring",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        match &self {
            ApiError::Store(SheetStoreError::SheetNotFound(_)) => {
                tracing::warn!(error = %self, kind, "checklist query failed");
            }
            _ => tracing::error!(error = %self, kind, "checklist query failed"),
        }
        metrics::counter!("checklist_query_errors_total", "kind" => kind).increment(1);

        let body = QueryResponse::Error(ErrorBody::new(self.to_string(), Utc::now()));
        (StatusCode::OK, Json(body)).into_response()
    }
}
