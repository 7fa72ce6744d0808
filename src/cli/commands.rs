//! CLI command implementations.
//!
//! Contains the business logic for each CLI command. Commands are
//! synchronous at the boundary; each one that needs I/O creates its own
//! runtime and blocks on it.

use std::sync::Arc;

use tracing::warn;

use crate::agent::{AgentConfig, AgentRunner, create_provider};
use crate::cli::output::{OutputFormat, format_answer, format_tool_list};
use crate::cli::parser::{Cli, Commands, ServeCommands};
use crate::client::{RemoteDispatcher, ToolClient, filter_tools, to_definition};
use crate::error::{CommandError, Result};
use crate::retrieval::{CloudIndex, QueryEngine, RetrievalConfig, search_docs};
use crate::server::{DocdexServer, default_registry, serve_http, serve_stdio};

/// Executes the CLI command.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Serve(sub) => cmd_serve(sub),
        Commands::Tools { url } => cmd_tools(url, format),
        Commands::Agent {
            instruction,
            url,
            allow,
            model,
            system_prompt,
        } => {
            let params = AgentCommandParams {
                instruction,
                url,
                allow,
                model: model.as_deref(),
                system_prompt: system_prompt.as_deref(),
            };
            cmd_agent(&params, format)
        }
        Commands::Query { text, filter } => cmd_query(text, filter.as_deref(), format),
    }
}

/// Parameters for the agent command.
#[derive(Debug, Clone)]
pub struct AgentCommandParams<'a> {
    /// Natural-language instruction.
    pub instruction: &'a str,
    /// MCP server URL.
    pub url: &'a str,
    /// Tool allow-set; empty means everything.
    pub allow: &'a [String],
    /// Model override.
    pub model: Option<&'a str>,
    /// System prompt override.
    pub system_prompt: Option<&'a str>,
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().map_err(|e| {
        CommandError::ExecutionFailed(format!("Failed to create async runtime: {e}")).into()
    })
}

/// Reads the per-tool execution bound override, if any.
fn tool_timeout_from_env() -> Option<std::time::Duration> {
    std::env::var("DOCDEX_TOOL_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(std::time::Duration::from_secs)
}

/// Closes a connection without letting teardown failures mask the
/// command's own outcome.
async fn close_quietly(client: ToolClient) {
    if let Err(e) = client.close().await {
        warn!(error = %e, "failed to close MCP connection");
    }
}

fn cloud_engine() -> Result<Arc<dyn QueryEngine>> {
    let config = RetrievalConfig::from_env()?;
    let index = CloudIndex::new(config)?;
    Ok(Arc::new(index))
}

/// Creates the MCP server over the hosted index and runs it until the
/// client disconnects (stdio) or the server is stopped (http).
fn cmd_serve(cmd: &ServeCommands) -> Result<String> {
    let engine = cloud_engine()?;
    let mut server = DocdexServer::new(default_registry(engine));
    if let Some(timeout) = tool_timeout_from_env() {
        server = server.with_tool_timeout(timeout);
    }

    let rt = runtime()?;
    rt.block_on(async {
        match cmd {
            ServeCommands::Stdio => serve_stdio(server).await,
            ServeCommands::Http { host, port } => serve_http(server, host, *port).await,
        }
    })
    .map_err(|e| CommandError::ExecutionFailed(format!("MCP server error: {e}")))?;

    Ok(String::new())
}

/// Connects to a server, lists its tools, and renders them.
fn cmd_tools(url: &str, format: OutputFormat) -> Result<String> {
    let rt = runtime()?;
    rt.block_on(async {
        let client = ToolClient::connect(url).await?;
        let tools = client.list_tools().await?;
        let definitions: Vec<_> = tools.iter().map(to_definition).collect();
        close_quietly(client).await;
        Ok(format_tool_list(&definitions, format))
    })
}

/// Runs one instruction through the agent loop against a remote server.
fn cmd_agent(params: &AgentCommandParams<'_>, format: OutputFormat) -> Result<String> {
    let mut config = AgentConfig::from_env()?;
    if let Some(model) = params.model {
        config.model = model.to_string();
    }
    let provider = create_provider(&config)?;

    let rt = runtime()?;
    rt.block_on(async {
        let client = ToolClient::connect(params.url).await?;
        let tools = client.list_tools().await?;
        let definitions: Vec<_> = tools.iter().map(to_definition).collect();

        let allowed = if params.allow.is_empty() {
            None
        } else {
            Some(params.allow)
        };
        let definitions = filter_tools(definitions, allowed);

        let mut runner = AgentRunner::new(provider, config);
        if let Some(prompt) = params.system_prompt {
            runner = runner.with_system_prompt(prompt);
        }

        let dispatcher = RemoteDispatcher::new(&client);
        let answer = runner
            .run(params.instruction, definitions, &dispatcher)
            .await;
        close_quietly(client).await;

        Ok(format_answer(&answer?, format))
    })
}

/// Queries the hosted index directly, without going through MCP.
fn cmd_query(text: &str, filter: Option<&str>, format: OutputFormat) -> Result<String> {
    let engine = cloud_engine()?;

    let rt = runtime()?;
    rt.block_on(async {
        let answer = search_docs(engine.as_ref(), text, filter).await?;
        Ok(format_answer(&answer, format))
    })
}
