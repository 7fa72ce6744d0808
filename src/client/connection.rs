//! MCP client connection over streamable HTTP.
//!
//! Wraps the rmcp client service with a small surface: connect, list tools,
//! call a tool, close. The agent layer never touches rmcp types directly.

use rmcp::model::{
    CallToolRequestParams, CallToolResult, ClientCapabilities, ClientInfo, Implementation, Tool,
};
use rmcp::service::RunningService;
use rmcp::transport::StreamableHttpClientTransport;
use rmcp::{RoleClient, ServiceExt};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::ClientError;

/// Connected MCP client bound to one server endpoint.
pub struct ToolClient {
    service: RunningService<RoleClient, ClientInfo>,
}

impl ToolClient {
    /// Connects to an MCP server at `url` and completes the initialize
    /// handshake.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connect`] when the transport cannot be
    /// established or the handshake is rejected.
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        debug!(%url, "connecting to MCP server");

        let transport = StreamableHttpClientTransport::from_uri(url);

        let client_info = ClientInfo {
            meta: None,
            protocol_version: Default::default(),
            capabilities: ClientCapabilities::default(),
            client_info: Implementation {
                name: "docdex-agent".to_string(),
                title: Some("Docdex Agent".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                website_url: None,
                icons: None,
            },
        };

        let service = client_info
            .serve(transport)
            .await
            .map_err(|e| ClientError::Connect {
                message: e.to_string(),
            })?;

        info!(%url, "MCP connection initialized");
        Ok(Self { service })
    }

    /// Lists every tool the server advertises.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Protocol`] when the list request fails.
    pub async fn list_tools(&self) -> Result<Vec<Tool>, ClientError> {
        let result = self
            .service
            .list_tools(Default::default())
            .await
            .map_err(|e| ClientError::Protocol {
                message: e.to_string(),
            })?;

        debug!(tool_count = result.tools.len(), "listed remote tools");
        Ok(result.tools)
    }

    /// Invokes a remote tool and returns the text of its first content block.
    ///
    /// A server-side execution failure arrives as an error-marked result;
    /// it is surfaced as [`ClientError::ToolCall`] with the server's text so
    /// the caller can relay it to the model.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ToolCall`] for rejected or failed invocations.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, ClientError> {
        debug!(tool = %name, "calling remote tool");

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: arguments.as_object().cloned(),
            task: None,
        };

        let result = self
            .service
            .call_tool(params)
            .await
            .map_err(|e| ClientError::ToolCall {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        let text = first_text(&result);
        if result.is_error.unwrap_or(false) {
            return Err(ClientError::ToolCall {
                name: name.to_string(),
                message: text.unwrap_or_else(|| "tool reported an error".to_string()),
            });
        }

        Ok(text.unwrap_or_default())
    }

    /// Shuts the connection down cleanly.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Protocol`] if cancellation fails.
    pub async fn close(self) -> Result<(), ClientError> {
        self.service
            .cancel()
            .await
            .map_err(|e| ClientError::Protocol {
                message: e.to_string(),
            })?;
        Ok(())
    }
}

/// Extracts the first text content block from a tool result.
fn first_text(result: &CallToolResult) -> Option<String> {
    result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::Content;

    #[test]
    fn test_first_text_extracts_leading_block() {
        let result = CallToolResult::success(vec![
            Content::text("first"),
            Content::text("second"),
        ]);
        assert_eq!(first_text(&result).as_deref(), Some("first"));
    }

    #[test]
    fn test_first_text_empty_content() {
        let result = CallToolResult::success(vec![]);
        assert!(first_text(&result).is_none());
    }
}
