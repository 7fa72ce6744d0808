//! Tool types shared between the orchestration loop and the tool client.
//!
//! Provider-agnostic definitions, calls, and results. Unlike a fixed tool
//! catalog, definitions here are produced at runtime from whatever the
//! connected MCP server advertises.

use serde::{Deserialize, Serialize};

/// A tool definition that can be sent to an LLM for function-calling.
///
/// The descriptor tuple: unique name, free-text description, and a JSON
/// Schema object for the parameters. Immutable once discovered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name (unique per server).
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema object describing the tool's parameters.
    pub parameters: serde_json::Value,
}

/// A tool call requested by the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this call (assigned by the provider).
    pub id: String,
    /// Name of the tool to invoke.
    pub name: String,
    /// JSON-encoded arguments for the tool.
    pub arguments: String,
}

/// The result of executing a tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// ID of the tool call this result corresponds to.
    pub tool_call_id: String,
    /// Result content (answer text on success, error message on failure).
    pub content: String,
    /// Whether this result represents an error.
    pub is_error: bool,
}

impl ToolResult {
    /// Creates a success result for the given call.
    #[must_use]
    pub fn success(call_id: &str, content: impl Into<String>) -> Self {
        Self {
            tool_call_id: call_id.to_string(),
            content: content.into(),
            is_error: false,
        }
    }

    /// Creates an error result for the given call.
    #[must_use]
    pub fn error(call_id: &str, message: impl Into<String>) -> Self {
        Self {
            tool_call_id: call_id.to_string(),
            content: message.into(),
            is_error: true,
        }
    }
}
