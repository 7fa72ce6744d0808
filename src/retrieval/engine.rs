//! Pluggable query-engine trait for the hosted retrieval index.
//!
//! Implementations translate a [`QueryRequest`] into a call against a remote
//! index and hand back the synthesized answer text. Keeping this behind a
//! trait decouples the tool and server layers from any particular hosted
//! service, and lets tests substitute a stub engine.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::RetrievalError;

/// A single retrieval query.
///
/// Created per invocation; not retained after the call returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Free-text query to run against the index.
    pub query: String,
    /// Optional category filter to narrow the searched documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl QueryRequest {
    /// Creates a request with no filter.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filter: None,
        }
    }
}

/// The synthesized answer from the retrieval service.
///
/// No schema is imposed on the contents beyond "non-empty text or a
/// propagated failure".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Answer text produced by the remote service.
    pub text: String,
}

/// Trait for remote retrieval backends.
///
/// Implementations handle the transport layer (HTTP, auth, timeouts) for a
/// specific hosted service while presenting a uniform interface to the tool
/// layer.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    /// Backend name (e.g., `"cloud"`).
    fn name(&self) -> &'static str;

    /// Executes a query against the remote index.
    ///
    /// # Errors
    ///
    /// Returns [`RetrievalError`] on transport failures, service-side
    /// rejections (auth, index-not-found), or malformed responses. Errors
    /// are surfaced verbatim; no retry or translation happens here.
    async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, RetrievalError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization_omits_empty_filter() {
        let request = QueryRequest::new("how do I install this?");
        let json = serde_json::to_string(&request).unwrap_or_default();
        assert!(json.contains("how do I install this?"));
        assert!(!json.contains("filter"));
    }

    #[test]
    fn test_request_serialization_includes_filter() {
        let request = QueryRequest {
            query: "setup".to_string(),
            filter: Some("tutorials".to_string()),
        };
        let json = serde_json::to_string(&request).unwrap_or_default();
        assert!(json.contains("tutorials"));
    }
}
