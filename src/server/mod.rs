//! MCP server for docdex.
//!
//! Exposes the hosted documentation index as callable MCP tools over two
//! transports: a stdio pipe for local process integration and a streamable
//! HTTP endpoint for networked clients.
//!
//! # Architecture
//!
//! ```text
//! MCP Client
//!   ↓ tools/list, tools/call
//! DocdexServer (manual ServerHandler)
//!   ↓ ToolRegistry lookup + timeout
//! search_docs handler
//!   ↓ QueryEngine (CloudIndex over HTTPS)
//! Hosted index → answer text → MCP Client
//! ```

pub mod handler;
pub mod params;
pub mod registry;
pub mod transport;

use std::sync::Arc;

use futures_util::FutureExt;

use crate::error::ToolError;
use crate::retrieval::{QueryEngine, search_docs};

pub use handler::DocdexServer;
pub use params::SearchDocsParams;
pub use registry::{ToolArguments, ToolHandler, ToolRegistry, ToolSpec};
pub use transport::{serve_http, serve_http_on, serve_stdio};

/// Builds the registry of tools served by docdex.
///
/// Registers `search_docs` over the given engine. Argument parsing failures
/// surface as [`ToolError::InvalidArguments`]; remote failures as
/// [`ToolError::Execution`] carrying the backend's message.
#[must_use]
pub fn default_registry(engine: Arc<dyn QueryEngine>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    let spec = ToolSpec {
        name: "search_docs".to_string(),
        description: "Search the hosted documentation index and return a \
                      synthesized answer with code examples."
            .to_string(),
        input_schema: params::schema_object::<SearchDocsParams>(),
    };

    let handler: ToolHandler = Arc::new(move |args: ToolArguments| {
        let engine = Arc::clone(&engine);
        async move {
            let params: SearchDocsParams =
                serde_json::from_value(serde_json::Value::Object(args)).map_err(|e| {
                    ToolError::InvalidArguments {
                        message: e.to_string(),
                    }
                })?;
            search_docs(engine.as_ref(), &params.query, params.filter.as_deref())
                .await
                .map_err(|e| ToolError::Execution {
                    name: "search_docs".to_string(),
                    message: e.to_string(),
                })
        }
        .boxed()
    });

    registry.register(spec, handler);
    registry
}
