//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Parser, Subcommand};

/// Default endpoint for client commands, matching `serve http` defaults.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000/mcp";

/// Docdex: MCP tools over a hosted documentation index.
///
/// Serves documentation-search tools to MCP clients and ships a small
/// agent client that drives them through an LLM.
#[derive(Parser, Debug)]
#[command(name = "docdex")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the MCP server (stdio or http).
    #[command(subcommand)]
    Serve(ServeCommands),

    /// List the tools a running MCP server advertises.
    #[command(after_help = r#"Examples:
  docdex tools                                   # Default endpoint
  docdex tools --url http://127.0.0.1:9000/mcp   # Custom endpoint
  docdex --format json tools | jq '.[].name'
"#)]
    Tools {
        /// MCP server URL.
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        url: String,
    },

    /// Run one instruction through an LLM with the server's tools.
    #[command(after_help = r#"Examples:
  docdex agent "How do I install the SDK?"
  docdex agent "Summarize the auth docs" --allow search_docs
  docdex agent "Find setup steps" --model gpt-4o
  docdex agent "Answer briefly" --system-prompt "One paragraph max."
"#)]
    Agent {
        /// Natural-language instruction for the agent.
        instruction: String,

        /// MCP server URL.
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        url: String,

        /// Restrict the agent to these tool names (repeatable).
        #[arg(long = "allow")]
        allow: Vec<String>,

        /// Override the configured model.
        #[arg(long)]
        model: Option<String>,

        /// Override the default system prompt.
        #[arg(long)]
        system_prompt: Option<String>,
    },

    /// Query the hosted index directly, bypassing MCP.
    #[command(after_help = r#"Examples:
  docdex query "How do I configure retries?"
  docdex query "deployment guide" --filter tutorials
"#)]
    Query {
        /// Free-text query for the documentation index.
        text: String,

        /// Optional category filter.
        #[arg(long)]
        filter: Option<String>,
    },
}

/// MCP server transports.
#[derive(Subcommand, Debug)]
pub enum ServeCommands {
    /// Start MCP server with stdio transport.
    ///
    /// Reads JSON-RPC messages from stdin, writes responses to stdout.
    /// This is the standard transport for local agent integration.
    #[command(after_help = r#"Examples:
  docdex serve stdio                                    # Start stdio MCP server
  DOCDEX_RETRIEVAL_API_KEY=... docdex serve stdio       # With API key
"#)]
    Stdio,

    /// Start MCP server with streamable HTTP transport.
    ///
    /// Listens for incoming MCP connections at `/mcp`.
    #[command(after_help = r#"Examples:
  docdex serve http                          # Listen on 127.0.0.1:8000
  docdex serve http --host 0.0.0.0 --port 9000
"#)]
    Http {
        /// Host to bind.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on.
        #[arg(long, default_value = "8000")]
        port: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_http_defaults() {
        let cli = Cli::parse_from(["docdex", "serve", "http"]);
        match cli.command {
            Commands::Serve(ServeCommands::Http { host, port }) => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 8000);
            }
            other => unreachable!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_agent_with_allow_set() {
        let cli = Cli::parse_from([
            "docdex",
            "agent",
            "find the docs",
            "--allow",
            "search_docs",
            "--allow",
            "list_indexes",
        ]);
        match cli.command {
            Commands::Agent { allow, .. } => {
                assert_eq!(allow, vec!["search_docs", "list_indexes"]);
            }
            other => unreachable!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_query_with_filter() {
        let cli = Cli::parse_from(["docdex", "query", "setup", "--filter", "tutorials"]);
        match cli.command {
            Commands::Query { text, filter } => {
                assert_eq!(text, "setup");
                assert_eq!(filter.as_deref(), Some("tutorials"));
            }
            other => unreachable!("unexpected command: {other:?}"),
        }
    }
}
