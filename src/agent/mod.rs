//! LLM orchestration loop for docdex.
//!
//! Given tool definitions discovered from an MCP server and one
//! natural-language instruction, an external model decides which tools to
//! invoke and synthesizes the final answer. Uses a pluggable provider
//! abstraction backed by OpenAI-compatible APIs.
//!
//! # Architecture
//!
//! ```text
//! Instruction → AgentRunner
//!   └── agentic_loop
//!       ├── LlmProvider::chat (model picks tool calls)
//!       ├── ToolDispatcher::dispatch (MCP call_tool over HTTP)
//!       └── repeat until final text answer
//! ```

pub mod agentic_loop;
pub mod client;
pub mod config;
pub mod message;
pub mod provider;
pub mod providers;
pub mod runner;
pub mod tool;

// Re-export key types
pub use agentic_loop::{ToolDispatcher, agentic_loop};
pub use client::create_provider;
pub use config::AgentConfig;
pub use message::{ChatMessage, ChatRequest, ChatResponse, Role, TokenUsage};
pub use provider::LlmProvider;
pub use runner::{AgentRunner, DEFAULT_SYSTEM_PROMPT};
pub use tool::{ToolCall, ToolDefinition, ToolResult};
