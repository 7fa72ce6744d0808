//! Error types for docdex.
//!
//! One `thiserror` enum per subsystem, plus a crate-level umbrella used by
//! the CLI layer. The core never swallows an error: remote-service failures
//! are carried verbatim in the variant message and resilience (retry,
//! backoff) is left to callers.

use thiserror::Error;

/// Errors from building configuration structs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required credential was not provided or found in the environment.
    #[error("missing API key: set {var}")]
    MissingApiKey {
        /// Primary environment variable that would satisfy the requirement.
        var: &'static str,
    },

    /// A configuration value could not be parsed.
    #[error("invalid value for {field}: {message}")]
    Invalid {
        /// Field that failed validation.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

/// Errors from the hosted retrieval index client.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The query string was empty after trimming.
    #[error("query text must not be empty")]
    EmptyQuery,

    /// Transport-level failure reaching the retrieval service.
    #[error("retrieval request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The retrieval service answered with a non-success status.
    #[error("retrieval service error (status {status}): {message}")]
    Api {
        /// HTTP status code returned by the service.
        status: u16,
        /// Response body or status text.
        message: String,
    },

    /// The service answered 2xx but the body did not carry an answer.
    #[error("malformed retrieval response: {message}")]
    MalformedResponse {
        /// What was missing or unparseable.
        message: String,
    },
}

/// Errors from executing a registered tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The arguments object did not match the tool's declared schema.
    #[error("invalid arguments: {message}")]
    InvalidArguments {
        /// Deserialization failure detail.
        message: String,
    },

    /// The tool implementation failed.
    #[error("tool '{name}' failed: {message}")]
    Execution {
        /// Name of the failing tool.
        name: String,
        /// Failure detail, carried verbatim from the underlying error.
        message: String,
    },

    /// The tool did not complete within the configured bound.
    #[error("tool '{name}' timed out after {secs}s")]
    Timeout {
        /// Name of the timed-out tool.
        name: String,
        /// Configured bound in seconds.
        secs: u64,
    },
}

/// Errors from the MCP tool client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not establish or initialize the connection.
    #[error("connection failed: {message}")]
    Connect {
        /// Transport or handshake failure detail.
        message: String,
    },

    /// A protocol-level operation (list, shutdown) failed.
    #[error("protocol error: {message}")]
    Protocol {
        /// Failure detail from the protocol library.
        message: String,
    },

    /// A tool invocation was rejected or failed server-side.
    #[error("tool call '{name}' failed: {message}")]
    ToolCall {
        /// Tool that was invoked.
        name: String,
        /// Server-reported failure detail.
        message: String,
    },
}

/// Errors from the agent system.
#[derive(Debug, Error)]
pub enum AgentError {
    /// No API key was provided or found in the environment.
    #[error("no API key configured: set OPENAI_API_KEY or DOCDEX_LLM_API_KEY")]
    ApiKeyMissing,

    /// The configured provider name has no implementation.
    #[error("unsupported provider: {name}")]
    UnsupportedProvider {
        /// The unrecognized provider name.
        name: String,
    },

    /// An API request to the LLM provider failed.
    #[error("API request failed{}: {message}", status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    ApiRequest {
        /// Provider error message.
        message: String,
        /// HTTP status, when the SDK surfaced one.
        status: Option<u16>,
    },

    /// The model kept requesting tools past the iteration limit.
    #[error("tool-calling loop exceeded {max_iterations} iterations")]
    ToolLoopExceeded {
        /// The configured limit.
        max_iterations: usize,
    },
}

/// Errors from CLI command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command's arguments were rejected before execution.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The command started but failed.
    #[error("{0}")]
    ExecutionFailed(String),
}

/// Crate-level error umbrella.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Retrieval service failure.
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// Tool execution failure.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// MCP client failure.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Agent system failure.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// CLI command failure.
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Result alias used throughout the CLI layer.
pub type Result<T> = std::result::Result<T, Error>;
