//! Checklist query endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use common::QueryResponse;
use sheet_store::SheetSource;

use crate::AppState;
use crate::error::ApiError;

/// GET /checklist — most recent check, last entries, total and refresh time.
///
/// Always answers `200 OK`; failures carry an `error` field instead.
pub async fn query<S: SheetSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<QueryResponse>, ApiError> {
    let started = Instant::now();
    metrics::counter!("checklist_queries_total").increment(1);

    let result = state.service.query(Utc::now()).await;

    metrics::histogram!("checklist_query_duration_seconds")
        .record(started.elapsed().as_secs_f64());
    Ok(Json(result?))
}
