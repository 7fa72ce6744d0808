//! HTTP implementation of [`QueryEngine`] against the hosted index service.
//!
//! Speaks a small REST contract: `POST {base}/api/v1/indexes/{project}/{index}/query`
//! with bearer auth and a JSON body; a successful response carries the
//! synthesized answer in a `response` field. The service performs all
//! retrieval, ranking, and answer synthesis — this client only forwards.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RetrievalError;
use crate::retrieval::config::RetrievalConfig;
use crate::retrieval::engine::{QueryEngine, QueryRequest, QueryResponse};

/// Wire body for a query call.
#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    organization_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
}

/// Wire body of a successful answer.
#[derive(Debug, Deserialize)]
struct AnswerBody {
    response: Option<String>,
}

/// Client for a named, pre-existing index on the hosted retrieval service.
pub struct CloudIndex {
    config: RetrievalConfig,
    http: reqwest::Client,
}

impl std::fmt::Debug for CloudIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudIndex")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CloudIndex {
    /// Creates a client for the index named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError::Http`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: RetrievalConfig) -> Result<Self, RetrievalError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    fn query_url(&self) -> String {
        format!(
            "{}/api/v1/indexes/{}/{}/query",
            self.config.base_url.trim_end_matches('/'),
            self.config.project,
            self.config.index,
        )
    }
}

#[async_trait]
impl QueryEngine for CloudIndex {
    fn name(&self) -> &'static str {
        "cloud"
    }

    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, RetrievalError> {
        let url = self.query_url();
        debug!(index = %self.config.index, "querying hosted index");

        let body = QueryBody {
            query: &request.query,
            organization_id: self.config.organization_id.as_deref(),
            filter: request.filter.as_deref(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(RetrievalError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let answer: AnswerBody =
            response
                .json()
                .await
                .map_err(|e| RetrievalError::MalformedResponse {
                    message: e.to_string(),
                })?;

        let text = answer
            .response
            .ok_or_else(|| RetrievalError::MalformedResponse {
                message: "missing 'response' field".to_string(),
            })?;

        Ok(QueryResponse { text })
    }
}
