//! CLI layer for docdex.
//!
//! Provides the command-line interface using clap, with commands for
//! serving MCP tools, inspecting a running server, and driving the agent.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands, ServeCommands};
