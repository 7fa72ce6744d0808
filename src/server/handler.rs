//! MCP server handler over the tool registry.
//!
//! Implements `rmcp::ServerHandler` by hand rather than through the tool
//! macros, so the explicit [`ToolRegistry`] stays the single source of truth
//! for what is served. Execution failures and timeouts come back as
//! error-marked tool results; only an unknown tool name is a protocol
//! error.

use std::sync::Arc;
use std::time::Duration;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use tracing::{debug, warn};

use crate::error::ToolError;
use crate::server::registry::{ToolArguments, ToolRegistry};

/// Default bound on a single tool execution.
const DEFAULT_TOOL_TIMEOUT_SECS: u64 = 30;

/// MCP server serving the tools held by a frozen [`ToolRegistry`].
///
/// Cloning is cheap; clones share the immutable registry. That table is the
/// only state shared between in-flight invocations, so concurrent sessions
/// need no locking.
#[derive(Clone)]
pub struct DocdexServer {
    registry: Arc<ToolRegistry>,
    tool_timeout: Duration,
}

impl std::fmt::Debug for DocdexServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocdexServer")
            .field("tools", &self.registry.names())
            .field("tool_timeout", &self.tool_timeout)
            .finish()
    }
}

impl DocdexServer {
    /// Creates a server over a frozen registry with the default timeout.
    #[must_use]
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            tool_timeout: Duration::from_secs(DEFAULT_TOOL_TIMEOUT_SECS),
        }
    }

    /// Overrides the per-tool execution timeout.
    #[must_use]
    pub const fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    /// Executes a registered tool with a bounded timeout.
    ///
    /// Returns `None` for an unknown tool name.
    pub(crate) async fn invoke(
        &self,
        name: &str,
        args: ToolArguments,
    ) -> Option<Result<String, ToolError>> {
        let handler = self.registry.get(name)?;
        let secs = self.tool_timeout.as_secs();

        let outcome = match tokio::time::timeout(self.tool_timeout, handler(args)).await {
            Ok(result) => result,
            Err(_) => Err(ToolError::Timeout {
                name: name.to_string(),
                secs,
            }),
        };
        Some(outcome)
    }
}

impl ServerHandler for DocdexServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "docdex".to_string(),
                title: Some("Docdex MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: Some("https://github.com/zircote/docdex".to_string()),
            },
            instructions: Some(
                "Docdex: search tools over a hosted documentation index. Use the \
                 `search_docs` tool to ask free-text questions about the indexed docs."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools: Vec<Tool> = self
            .registry
            .specs()
            .into_iter()
            .map(|spec| {
                let input_schema = match &spec.input_schema {
                    serde_json::Value::Object(obj) => Arc::new(obj.clone()),
                    _ => Arc::new(serde_json::Map::new()),
                };
                Tool {
                    name: std::borrow::Cow::Owned(spec.name.clone()),
                    title: None,
                    description: Some(std::borrow::Cow::Owned(spec.description.clone())),
                    input_schema,
                    output_schema: None,
                    annotations: None,
                    icons: None,
                    meta: None,
                }
            })
            .collect();

        debug!(tool_count = tools.len(), "list_tools called");

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let name = request.name.to_string();
        let args = request.arguments.unwrap_or_default();
        debug!(tool = %name, "call_tool called");

        match self.invoke(&name, args).await {
            None => {
                warn!(tool = %name, "unknown tool requested");
                Err(McpError::invalid_params(
                    format!("tool '{name}' not found"),
                    None,
                ))
            }
            Some(Ok(text)) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Some(Err(e)) => {
                warn!(tool = %name, error = %e, "tool execution failed");
                Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::registry::tests::fixed_handler;
    use crate::server::registry::{ToolHandler, ToolSpec};

    fn spec(name: &str) -> ToolSpec {
        ToolSpec {
            name: name.to_string(),
            description: format!("{name} tool"),
            input_schema: serde_json::json!({"type": "object", "properties": {}}),
        }
    }

    /// Handler that echoes the `query` argument back.
    fn echo_handler() -> ToolHandler {
        Arc::new(|args| {
            Box::pin(async move {
                let query = args
                    .get("query")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string();
                Ok(format!("echo: {query}"))
            })
        })
    }

    /// Handler that sleeps longer than any test timeout.
    fn slow_handler() -> ToolHandler {
        Arc::new(|_args| {
            Box::pin(async move {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            })
        })
    }

    fn server_with(entries: Vec<(&str, ToolHandler)>) -> DocdexServer {
        let mut registry = ToolRegistry::new();
        for (name, handler) in entries {
            registry.register(spec(name), handler);
        }
        DocdexServer::new(registry)
    }

    #[tokio::test]
    async fn test_invoke_known_tool() {
        let server = server_with(vec![("search_docs", fixed_handler("Step 1..."))]);
        let result = server
            .invoke("search_docs", ToolArguments::new())
            .await
            .unwrap_or_else(|| unreachable!());
        assert_eq!(result.unwrap_or_default(), "Step 1...");
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool_is_none() {
        let server = server_with(vec![("search_docs", fixed_handler("x"))]);
        assert!(server.invoke("other_tool", ToolArguments::new()).await.is_none());
    }

    #[tokio::test]
    async fn test_invoke_times_out() {
        let server = server_with(vec![("slow", slow_handler())])
            .with_tool_timeout(Duration::from_millis(20));
        let result = server
            .invoke("slow", ToolArguments::new())
            .await
            .unwrap_or_else(|| unreachable!());
        assert!(matches!(result, Err(ToolError::Timeout { secs: 0, .. })));
    }

    #[tokio::test]
    async fn test_concurrent_invocations_are_isolated() {
        let server = server_with(vec![("echo", echo_handler())]);

        let mut args_a = ToolArguments::new();
        args_a.insert("query".to_string(), serde_json::json!("alpha"));
        let mut args_b = ToolArguments::new();
        args_b.insert("query".to_string(), serde_json::json!("beta"));

        let (a, b) = tokio::join!(server.invoke("echo", args_a), server.invoke("echo", args_b));

        // Each invocation sees only its own arguments and result
        assert_eq!(
            a.unwrap_or_else(|| unreachable!()).unwrap_or_default(),
            "echo: alpha"
        );
        assert_eq!(
            b.unwrap_or_else(|| unreachable!()).unwrap_or_default(),
            "echo: beta"
        );
    }

    #[test]
    fn test_get_info_advertises_tools() {
        let server = server_with(vec![("search_docs", fixed_handler("x"))]);
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert_eq!(info.server_info.name, "docdex");
    }
}
