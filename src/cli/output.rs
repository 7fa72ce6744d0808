//! Output formatting for CLI results.

use std::fmt::Write as FmtWrite;

use crate::agent::ToolDefinition;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputFormat {
    /// Parses a format string, defaulting to text for unknown values.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a discovered tool list.
#[must_use]
pub fn format_tool_list(tools: &[ToolDefinition], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(tools).unwrap_or_else(|_| "[]".to_string())
        }
        OutputFormat::Text => {
            if tools.is_empty() {
                return "No tools advertised.".to_string();
            }
            let mut out = String::new();
            let _ = writeln!(out, "Tools ({}):", tools.len());
            for tool in tools {
                let _ = writeln!(out, "  {} - {}", tool.name, tool.description);
            }
            out
        }
    }
}

/// Formats a plain answer string.
#[must_use]
pub fn format_answer(answer: &str, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::json!({ "answer": answer }).to_string(),
        OutputFormat::Text => answer.to_string(),
    }
}
