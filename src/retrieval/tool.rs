//! The documentation-search forwarding function.
//!
//! This is the unit that gets exposed as an MCP tool: bias the query toward
//! a verbose, example-rich answer, forward it to the hosted index, and hand
//! the answer text back. Remote failures propagate verbatim; the caller
//! framework decides how to present them.

use tracing::debug;

use crate::error::RetrievalError;
use crate::retrieval::engine::{QueryEngine, QueryRequest};

/// Fixed instruction suffix appended to every forwarded query to bias the
/// remote answer format.
pub const ANSWER_STYLE_SUFFIX: &str = " Be verbose and include code examples.";

/// Searches the hosted documentation index for the given query.
///
/// Appends [`ANSWER_STYLE_SUFFIX`] to the forwarded text exactly once; the
/// caller's string is never mutated.
///
/// # Errors
///
/// Returns [`RetrievalError::EmptyQuery`] when `query` is blank, and
/// propagates the engine's own errors otherwise.
pub async fn search_docs(
    engine: &dyn QueryEngine,
    query: &str,
    filter: Option<&str>,
) -> Result<String, RetrievalError> {
    if query.trim().is_empty() {
        return Err(RetrievalError::EmptyQuery);
    }

    let request = QueryRequest {
        query: format!("{query}{ANSWER_STYLE_SUFFIX}"),
        filter: filter.map(ToOwned::to_owned),
    };

    let response = engine.query(&request).await?;
    debug!(backend = engine.name(), chars = response.text.len(), "retrieval answer received");
    Ok(response.text)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::RetrievalError;
    use crate::retrieval::engine::QueryResponse;

    use std::sync::Mutex;

    use async_trait::async_trait;

    /// Stub engine that records the forwarded request and returns a canned
    /// answer or error.
    pub(crate) struct StubEngine {
        pub answer: Result<String, String>,
        pub seen: Mutex<Vec<QueryRequest>>,
    }

    impl StubEngine {
        pub(crate) fn answering(text: &str) -> Self {
            Self {
                answer: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self {
                answer: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl QueryEngine for StubEngine {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, RetrievalError> {
            if let Ok(mut seen) = self.seen.lock() {
                seen.push(request.clone());
            }
            match &self.answer {
                Ok(text) => Ok(QueryResponse { text: text.clone() }),
                Err(message) => Err(RetrievalError::Api {
                    status: 401,
                    message: message.clone(),
                }),
            }
        }
    }

    #[tokio::test]
    async fn test_suffix_appended_exactly_once() {
        let engine = StubEngine::answering("answer");
        let original = "How do I instantiate an agent?".to_string();
        let result = search_docs(&engine, &original, None)
            .await
            .unwrap_or_else(|e| unreachable!("search failed: {e}"));
        assert_eq!(result, "answer");

        // Caller's string untouched
        assert_eq!(original, "How do I instantiate an agent?");

        let seen = engine.seen.lock().unwrap_or_else(|e| e.into_inner());
        assert_eq!(seen.len(), 1);
        let forwarded = &seen[0].query;
        assert_eq!(
            forwarded,
            &format!("How do I instantiate an agent?{ANSWER_STYLE_SUFFIX}")
        );
        assert_eq!(forwarded.matches(ANSWER_STYLE_SUFFIX).count(), 1);
    }

    #[tokio::test]
    async fn test_answer_returned_unmodified() {
        let engine = StubEngine::answering("Step 1...");
        let result = search_docs(&engine, "installation steps", None)
            .await
            .unwrap_or_else(|e| unreachable!("search failed: {e}"));
        assert_eq!(result, "Step 1...");
    }

    #[tokio::test]
    async fn test_empty_query_rejected_before_network() {
        let engine = StubEngine::answering("never");
        let err = search_docs(&engine, "   ", None).await.unwrap_err();
        assert!(matches!(err, RetrievalError::EmptyQuery));
        assert!(engine.seen.lock().unwrap_or_else(|e| e.into_inner()).is_empty());
    }

    #[tokio::test]
    async fn test_engine_error_propagates_verbatim() {
        let engine = StubEngine::failing("auth rejected");
        let err = search_docs(&engine, "anything", None).await.unwrap_err();
        match err {
            RetrievalError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "auth rejected");
            }
            other => unreachable!("expected Api error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn test_filter_forwarded() {
        let engine = StubEngine::answering("ok");
        search_docs(&engine, "setup", Some("tutorials"))
            .await
            .unwrap_or_else(|e| unreachable!("search failed: {e}"));
        let seen = engine.seen.lock().unwrap_or_else(|e| e.into_inner());
        assert_eq!(seen[0].filter.as_deref(), Some("tutorials"));
    }
}
