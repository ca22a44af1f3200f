//! Checklist query service: one full table read per request.

use chrono::{DateTime, Utc};
use common::{EmptyTableBody, QueryResponse};
use scoring::{SummaryBuilder, SummaryConfig};
use sheet_store::SheetSource;

use crate::error::ApiError;

/// Reads the configured sheet and summarizes it.
pub struct ChecklistService<S: SheetSource> {
    source: S,
    sheet_name: String,
    builder: SummaryBuilder,
}

impl<S: SheetSource> ChecklistService<S> {
    pub fn new(source: S, sheet_name: impl Into<String>, config: SummaryConfig) -> Self {
        Self {
            source,
            sheet_name: sheet_name.into(),
            builder: SummaryBuilder::new(config),
        }
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Builds the response payload as of `now`.
    ///
    /// A table with no header and no rows is answered with the
    /// "no data found" body rather than an error.
    #[tracing::instrument(skip(self), fields(sheet = %self.sheet_name))]
    pub async fn query(&self, now: DateTime<Utc>) -> Result<QueryResponse, ApiError> {
        let table = self.source.read_table(&self.sheet_name).await?;
        let response = match self.builder.summarize_table(&table, now)? {
            Some(summary) => {
                tracing::debug!(total = summary.total, "summary built");
                QueryResponse::Summary(summary)
            }
            None => {
                tracing::info!("backing table is empty");
                QueryResponse::EmptyTable(EmptyTableBody::new())
            }
        };
        Ok(response)
    }
}
