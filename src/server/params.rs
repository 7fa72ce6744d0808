//! Tool parameter types.
//!
//! Defines the input schemas for the served tools using `schemars` for
//! automatic JSON Schema generation required by the MCP protocol.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the `search_docs` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchDocsParams {
    /// Free-text query to run against the documentation index.
    pub query: String,

    /// Optional category filter (e.g., `"tutorials"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Returns the JSON Schema object for a parameter type.
pub(crate) fn schema_object<T: JsonSchema>() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| {
        serde_json::json!({ "type": "object", "properties": {} })
    })
}
