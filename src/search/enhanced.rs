//! Client for the external search collaborator used by enhanced mode.
//!
//! The collaborator receives `POST {url}` with `{ query, mode, maxResults }`
//! and answers `{ results: [SearchResult] }`. One attempt is made, bounded by
//! the configured timeout; there is no retry.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::engine::SearchResult;
use crate::config::EnhancedConfig;
use crate::error::{BabelError, Result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExternalRequest<'a> {
    query: &'a str,
    mode: &'a str,
    max_results: usize,
}

#[derive(Debug, Deserialize)]
struct ExternalResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Clone)]
pub struct ExternalSearch {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl ExternalSearch {
    /// Build a client when enhanced search is enabled; `None` otherwise.
    pub fn from_config(config: &EnhancedConfig) -> Result<Option<Self>> {
        if !config.enabled || config.url.is_empty() {
            return Ok(None);
        }
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| BabelError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Some(Self {
            client,
            url: config.url.clone(),
            timeout,
        }))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        let request = ExternalRequest {
            query,
            mode: "enhanced",
            max_results,
        };
        let call = async {
            let response = self.client.post(&self.url).json(&request).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(BabelError::Upstream(format!("collaborator returned HTTP {status}")));
            }
            let body: ExternalResponse = response.json().await?;
            Ok::<_, BabelError>(body.results)
        };

        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(BabelError::Upstream(format!(
                "no response within {}ms",
                self.timeout.as_millis()
            ))),
        }
    }
}
