//! Single-instruction agent runner.
//!
//! Wires a provider, the remote tool definitions, and a dispatcher for one
//! natural-language instruction. The decision policy — which tools to call,
//! in what order, how to combine results — belongs entirely to the external
//! model; this runner only presents accurate tool descriptors and relays
//! calls.

use tracing::info;

use super::agentic_loop::{ToolDispatcher, agentic_loop};
use super::config::AgentConfig;
use super::message::{ChatRequest, system_message, user_message};
use super::provider::LlmProvider;
use super::tool::ToolDefinition;
use crate::error::AgentError;

/// Default system prompt for the documentation agent.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a documentation assistant. Use the available search tools to ground \
     every answer in the indexed documentation, and cite what the tools return.";

/// Runs one instruction through the tool-calling loop.
pub struct AgentRunner {
    provider: Box<dyn LlmProvider>,
    config: AgentConfig,
    system_prompt: String,
}

impl AgentRunner {
    /// Creates a runner with the default system prompt.
    #[must_use]
    pub fn new(provider: Box<dyn LlmProvider>, config: AgentConfig) -> Self {
        Self {
            provider,
            config,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Replaces the system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Answers `instruction` using the given tools, returning the model's
    /// final text.
    ///
    /// # Errors
    ///
    /// Propagates provider errors and [`AgentError::ToolLoopExceeded`].
    pub async fn run(
        &self,
        instruction: &str,
        tools: Vec<ToolDefinition>,
        dispatcher: &dyn ToolDispatcher,
    ) -> Result<String, AgentError> {
        let mut request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                system_message(&self.system_prompt),
                user_message(instruction),
            ],
            max_tokens: Some(self.config.max_tokens),
            tools,
        };

        let response = agentic_loop(
            self.provider.as_ref(),
            &mut request,
            dispatcher,
            self.config.max_tool_iterations,
        )
        .await?;

        info!(
            model = self.config.model,
            total_tokens = response.usage.total_tokens,
            "agent run complete"
        );

        Ok(response.content)
    }
}
