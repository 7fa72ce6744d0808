//! Explicit tool registry.
//!
//! Tools are registered one at a time with a descriptor and an async
//! implementation; the registry is then frozen behind an `Arc` and served by
//! exactly one transport. Registration is overwrite-last-wins on name
//! collision, keeping the original position so listing order stays
//! deterministic.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::error::ToolError;

/// JSON argument object passed to a tool implementation.
pub type ToolArguments = serde_json::Map<String, Value>;

/// Async tool implementation: argument object in, answer text out.
pub type ToolHandler =
    Arc<dyn Fn(ToolArguments) -> BoxFuture<'static, Result<String, ToolError>> + Send + Sync>;

/// Descriptor for a registered tool.
///
/// Created at registration, immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description for discovery.
    pub description: String,
    /// JSON Schema object describing the parameters.
    pub input_schema: Value,
}

/// Ordered collection of named tools.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    entries: Vec<(ToolSpec, ToolHandler)>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool, overwriting any existing tool with the same name.
    ///
    /// An overwrite keeps the first registration's position so that
    /// [`specs`](Self::specs) order is deterministic.
    pub fn register(&mut self, spec: ToolSpec, handler: ToolHandler) {
        if let Some(entry) = self.entries.iter_mut().find(|(s, _)| s.name == spec.name) {
            *entry = (spec, handler);
        } else {
            self.entries.push((spec, handler));
        }
    }

    /// Returns the registered descriptors in registration order.
    #[must_use]
    pub fn specs(&self) -> Vec<&ToolSpec> {
        self.entries.iter().map(|(s, _)| s).collect()
    }

    /// Returns the registered tool names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(s, _)| s.name.as_str()).collect()
    }

    /// Looks up a tool's handler by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ToolHandler> {
        self.entries
            .iter()
            .find(|(s, _)| s.name == name)
            .map(|(_, h)| Arc::clone(h))
    }

    /// Returns `true` if no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
