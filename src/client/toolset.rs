//! Remote tool discovery, filtering, and dispatch.
//!
//! Converts the tools an MCP server advertises into provider-agnostic
//! definitions for the agent loop, applies the caller's allow-set, and
//! dispatches the model's tool calls back over the connection.

use async_trait::async_trait;
use rmcp::model::Tool;
use serde_json::Value;
use tracing::{debug, warn};

use crate::agent::{ToolCall, ToolDefinition, ToolDispatcher, ToolResult};
use crate::client::connection::ToolClient;

/// Converts an advertised MCP tool into an agent-facing definition.
///
/// A missing description becomes an empty string; a missing or non-object
/// schema becomes an empty object schema, which every provider accepts.
#[must_use]
pub fn to_definition(tool: &Tool) -> ToolDefinition {
    ToolDefinition {
        name: tool.name.to_string(),
        description: tool
            .description
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default(),
        parameters: Value::Object((*tool.input_schema).clone()),
    }
}

/// Intersects the advertised definitions with an allow-set.
///
/// `None` keeps everything. Allowed names the server never advertised are
/// dropped silently; the server's catalog is the source of truth.
#[must_use]
pub fn filter_tools(
    definitions: Vec<ToolDefinition>,
    allowed: Option<&[String]>,
) -> Vec<ToolDefinition> {
    let Some(allowed) = allowed else {
        return definitions;
    };
    let kept: Vec<ToolDefinition> = definitions
        .into_iter()
        .filter(|d| allowed.iter().any(|a| a == &d.name))
        .collect();
    debug!(kept = kept.len(), "applied tool allow-set");
    kept
}

/// Dispatcher that forwards the model's tool calls to a connected server.
pub struct RemoteDispatcher<'a> {
    client: &'a ToolClient,
}

impl<'a> RemoteDispatcher<'a> {
    /// Wraps an existing connection.
    #[must_use]
    pub const fn new(client: &'a ToolClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolDispatcher for RemoteDispatcher<'_> {
    async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        let arguments: Value = match serde_json::from_str(&call.arguments) {
            Ok(value) => value,
            Err(e) => {
                warn!(tool = %call.name, error = %e, "model produced unparseable arguments");
                return ToolResult::error(&call.id, format!("invalid tool arguments: {e}"));
            }
        };

        match self.client.call_tool(&call.name, arguments).await {
            Ok(text) => ToolResult::success(&call.id, text),
            Err(e) => {
                warn!(tool = %call.name, error = %e, "remote tool call failed");
                ToolResult::error(&call.id, e.to_string())
            }
        }
    }
}
