//! Agentic tool-calling loop.
//!
//! Drives the LLM ↔ tool execution round-trip: sends a request to the model,
//! dispatches any tool calls in the response, appends results, and repeats
//! until the model produces a final text response or the iteration limit
//! is reached. Tool failures are fed back to the model as error-marked
//! results rather than raised, so the model can retry or report.

use async_trait::async_trait;
use tracing::debug;

use super::message::{ChatRequest, ChatResponse, assistant_tool_calls_message, tool_message};
use super::provider::LlmProvider;
use super::tool::{ToolCall, ToolResult};
use crate::error::AgentError;

/// Maximum raw byte length of tool argument JSON from the LLM.
const MAX_TOOL_ARGS_LEN: usize = 100_000;

/// Dispatches tool calls requested by the model.
///
/// Implementations may suspend on I/O — the remote dispatcher sends each
/// call over the network and awaits the response frame.
#[async_trait]
pub trait ToolDispatcher: Send + Sync {
    /// Executes one tool call and returns its result.
    ///
    /// Must not panic; failures are reported through
    /// [`ToolResult::is_error`](super::tool::ToolResult).
    async fn dispatch(&self, call: &ToolCall) -> ToolResult;
}

/// Runs an agentic loop: model → tool calls → tool results → model → …
///
/// Continues until the model responds without tool calls (i.e., it produces
/// a final text answer) or `max_iterations` is reached.
///
/// # Errors
///
/// Returns [`AgentError::ToolLoopExceeded`] if the model keeps requesting
/// tools beyond `max_iterations`. Propagates any provider errors.
pub async fn agentic_loop(
    provider: &dyn LlmProvider,
    request: &mut ChatRequest,
    dispatcher: &dyn ToolDispatcher,
    max_iterations: usize,
) -> Result<ChatResponse, AgentError> {
    for iteration in 0..max_iterations {
        let response = provider.chat(request).await?;

        // If no tool calls, we have a final answer
        if response.tool_calls.is_empty() {
            debug!(iteration, "agentic loop completed with final text response");
            return Ok(response);
        }

        debug!(
            iteration,
            tool_count = response.tool_calls.len(),
            "dispatching tool calls"
        );

        // Append the assistant message with tool calls
        request
            .messages
            .push(assistant_tool_calls_message(response.tool_calls.clone()));

        // Dispatch each tool call and append results
        for call in &response.tool_calls {
            let result = if call.arguments.len() > MAX_TOOL_ARGS_LEN {
                ToolResult::error(
                    &call.id,
                    format!(
                        "tool arguments too large ({} bytes, max {MAX_TOOL_ARGS_LEN})",
                        call.arguments.len()
                    ),
                )
            } else {
                dispatcher.dispatch(call).await
            };
            debug!(
                tool = call.name,
                call_id = call.id,
                is_error = result.is_error,
                "tool dispatch complete"
            );
            request
                .messages
                .push(tool_message(&result.tool_call_id, &result.content));
        }
    }

    Err(AgentError::ToolLoopExceeded { max_iterations })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::agent::message::{TokenUsage, system_message, user_message};

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock provider that returns tool calls on the first N calls,
    /// then a final text response.
    pub(crate) struct MockToolProvider {
        call_count: AtomicUsize,
        tool_rounds: usize,
    }

    impl MockToolProvider {
        pub(crate) fn new(tool_rounds: usize) -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                tool_rounds,
            }
        }
    }

    #[async_trait]
    impl LlmProvider for MockToolProvider {
        fn name(&self) -> &'static str {
            "mock"
        }

        async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, AgentError> {
            let count = self.call_count.fetch_add(1, Ordering::SeqCst);

            if count < self.tool_rounds {
                Ok(ChatResponse {
                    content: String::new(),
                    usage: TokenUsage::default(),
                    tool_calls: vec![ToolCall {
                        id: format!("call_{count}"),
                        name: "search_docs".to_string(),
                        arguments: r#"{"query":"install"}"#.to_string(),
                    }],
                    finish_reason: Some("tool_calls".to_string()),
                })
            } else {
                Ok(ChatResponse {
                    content: "Final answer based on tool results.".to_string(),
                    usage: TokenUsage {
                        prompt_tokens: 100,
                        completion_tokens: 20,
                        total_tokens: 120,
                    },
                    tool_calls: Vec::new(),
                    finish_reason: Some("stop".to_string()),
                })
            }
        }
    }

    /// Dispatcher that records calls and returns a canned result.
    pub(crate) struct RecordingDispatcher {
        pub answer: String,
        pub calls: Mutex<Vec<ToolCall>>,
    }

    impl RecordingDispatcher {
        pub(crate) fn answering(answer: &str) -> Self {
            Self {
                answer: answer.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ToolDispatcher for RecordingDispatcher {
        async fn dispatch(&self, call: &ToolCall) -> ToolResult {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call.clone());
            }
            ToolResult::success(&call.id, self.answer.clone())
        }
    }

    fn base_request() -> ChatRequest {
        ChatRequest {
            model: "test".to_string(),
            messages: vec![system_message("test"), user_message("query")],
            max_tokens: Some(1024),
            tools: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_agentic_loop_single_tool_round() {
        let provider = MockToolProvider::new(1);
        let dispatcher = RecordingDispatcher::answering("Step 1...");

        let mut request = base_request();
        let response = agentic_loop(&provider, &mut request, &dispatcher, 10)
            .await
            .unwrap_or_else(|e| unreachable!("agentic_loop failed: {e}"));

        assert_eq!(response.content, "Final answer based on tool results.");
        // system + user + assistant(tool_calls) + tool(result) = 4 messages
        assert_eq!(request.messages.len(), 4);
        assert_eq!(request.messages[3].content, "Step 1...");
        let calls = dispatcher.calls.lock().unwrap_or_else(|e| e.into_inner());
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "search_docs");
    }

    #[tokio::test]
    async fn test_agentic_loop_multiple_rounds() {
        let provider = MockToolProvider::new(3);
        let dispatcher = RecordingDispatcher::answering("result");

        let mut request = base_request();
        let response = agentic_loop(&provider, &mut request, &dispatcher, 10)
            .await
            .unwrap_or_else(|e| unreachable!("agentic_loop failed: {e}"));

        assert_eq!(response.content, "Final answer based on tool results.");
        // 2 initial + 3 rounds * 2 (assistant + tool) = 8 messages
        assert_eq!(request.messages.len(), 8);
    }

    #[tokio::test]
    async fn test_agentic_loop_exceeds_max() {
        // Provider always returns tool calls (100 rounds > max of 2)
        let provider = MockToolProvider::new(100);
        let dispatcher = RecordingDispatcher::answering("result");

        let mut request = base_request();
        let result = agentic_loop(&provider, &mut request, &dispatcher, 2).await;
        assert!(matches!(
            result,
            Err(AgentError::ToolLoopExceeded { max_iterations: 2 })
        ));
    }

    #[tokio::test]
    async fn test_agentic_loop_no_tools() {
        // Provider returns text immediately (0 tool rounds)
        let provider = MockToolProvider::new(0);
        let dispatcher = RecordingDispatcher::answering("unused");

        let mut request = base_request();
        let response = agentic_loop(&provider, &mut request, &dispatcher, 10)
            .await
            .unwrap_or_else(|e| unreachable!("agentic_loop failed: {e}"));

        assert_eq!(response.content, "Final answer based on tool results.");
        // No tool rounds, so messages unchanged
        assert_eq!(request.messages.len(), 2);
        assert!(dispatcher.calls.lock().unwrap_or_else(|e| e.into_inner()).is_empty());
    }

    #[tokio::test]
    async fn test_agentic_loop_oversized_arguments_rejected() {
        struct OversizedProvider {
            call_count: AtomicUsize,
        }

        #[async_trait]
        impl LlmProvider for OversizedProvider {
            fn name(&self) -> &'static str {
                "mock"
            }

            async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, AgentError> {
                if self.call_count.fetch_add(1, Ordering::SeqCst) == 0 {
                    Ok(ChatResponse {
                        content: String::new(),
                        usage: TokenUsage::default(),
                        tool_calls: vec![ToolCall {
                            id: "call_big".to_string(),
                            name: "search_docs".to_string(),
                            arguments: "x".repeat(MAX_TOOL_ARGS_LEN + 1),
                        }],
                        finish_reason: Some("tool_calls".to_string()),
                    })
                } else {
                    Ok(ChatResponse {
                        content: "done".to_string(),
                        usage: TokenUsage::default(),
                        tool_calls: Vec::new(),
                        finish_reason: Some("stop".to_string()),
                    })
                }
            }
        }

        let provider = OversizedProvider {
            call_count: AtomicUsize::new(0),
        };
        let dispatcher = RecordingDispatcher::answering("unused");

        let mut request = base_request();
        agentic_loop(&provider, &mut request, &dispatcher, 5)
            .await
            .unwrap_or_else(|e| unreachable!("agentic_loop failed: {e}"));

        // The oversized call never reached the dispatcher; the model saw an error result.
        assert!(dispatcher.calls.lock().unwrap_or_else(|e| e.into_inner()).is_empty());
        assert!(request.messages[3].content.contains("too large"));
    }
}
