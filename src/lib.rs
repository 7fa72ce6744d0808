//! # docdex
//!
//! MCP tools over a hosted documentation index.
//!
//! Docdex exposes a managed document-retrieval service as callable tools
//! for the Model Context Protocol. The same binary serves the tools over
//! stdio or streamable HTTP, and ships a client that discovers a server's
//! tools and drives them through an LLM tool-calling loop.
//!
//! # Architecture
//!
//! ```text
//! docdex serve (stdio | http)
//!   DocdexServer → ToolRegistry → search_docs → CloudIndex → hosted index
//!
//! docdex agent "<instruction>"
//!   AgentRunner → LlmProvider (OpenAI)
//!     ↕ tool calls
//!   RemoteDispatcher → ToolClient → MCP server
//! ```
//!
//! # Quick Start
//!
//! ```bash
//! export DOCDEX_RETRIEVAL_API_KEY=...
//! docdex serve http &
//!
//! export OPENAI_API_KEY=sk-...
//! docdex agent "How do I install the SDK?"
//! ```

pub mod agent;
pub mod cli;
pub mod client;
pub mod error;
pub mod retrieval;
pub mod server;

pub use error::{Error, Result};
