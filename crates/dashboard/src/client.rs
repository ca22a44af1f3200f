use std::time::Duration;

use common::Summary;
use reqwest::Client;

use crate::{DashboardError, Result};

/// HTTP client for the checklist query endpoint.
#[derive(Clone)]
pub struct ChecklistClient {
    http: Client,
    url: String,
}

impl ChecklistClient {
    /// Creates a client for `url`; `timeout` of `None` waits indefinitely.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches and decodes the current summary.
    ///
    /// A non-success status or a payload with an `error` field is a failure,
    /// including the "no data found" body of an empty table.
    #[tracing::instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<Summary> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response.json().await?;
        if let Some(error) = body.get("error") {
            let message = error
                .as_str()
                .map(String::from)
                .unwrap_or_else(|| error.to_string());
            return Err(DashboardError::Api(message));
        }

        Ok(serde_json::from_value(body)?)
    }
}
