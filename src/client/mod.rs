//! MCP client side of docdex.
//!
//! Connects to a running docdex server (or any MCP server) over streamable
//! HTTP, discovers its tools, and bridges them into the agent loop. Tool
//! names are opaque here: whatever the server advertises is what the model
//! gets to see, minus the caller's allow-set.

pub mod connection;
pub mod toolset;

pub use connection::ToolClient;
pub use toolset::{RemoteDispatcher, filter_tools, to_definition};
