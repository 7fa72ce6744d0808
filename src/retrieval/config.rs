//! Retrieval service configuration with builder pattern and environment
//! variable support.
//!
//! Configuration is resolved in order: explicit values → environment
//! variables → defaults. Business logic never reads the environment itself;
//! a [`RetrievalConfig`] is constructed once at startup and handed to the
//! components that need it.

use std::time::Duration;

use crate::error::ConfigError;

/// Default base URL of the hosted retrieval service.
const DEFAULT_BASE_URL: &str = "https://api.docdex.dev";
/// Default index name. The index must already exist on the service.
const DEFAULT_INDEX: &str = "docdex-demo";
/// Default owning project of the index.
const DEFAULT_PROJECT: &str = "Default";
/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the hosted retrieval index client.
///
/// The API key is an opaque credential for the retrieval service. It is
/// never logged; the `Debug` impl redacts it.
#[derive(Clone)]
pub struct RetrievalConfig {
    /// API key for the retrieval service.
    pub api_key: String,
    /// Base URL of the service.
    pub base_url: String,
    /// Name of the remote index to query.
    pub index: String,
    /// Project that owns the index.
    pub project: String,
    /// Organization identifier, when the service requires one.
    pub organization_id: Option<String>,
    /// Request timeout for outbound calls.
    pub timeout: Duration,
}

impl std::fmt::Debug for RetrievalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("index", &self.index)
            .field("project", &self.project)
            .field("organization_id", &self.organization_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RetrievalConfig {
    /// Creates a new builder for `RetrievalConfig`.
    #[must_use]
    pub fn builder() -> RetrievalConfigBuilder {
        RetrievalConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if no API key is found.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder().from_env().build()
    }
}

/// Builder for [`RetrievalConfig`].
#[derive(Debug, Clone, Default)]
pub struct RetrievalConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    index: Option<String>,
    project: Option<String>,
    organization_id: Option<String>,
    timeout: Option<Duration>,
}

impl RetrievalConfigBuilder {
    /// Populates unset fields from environment variables.
    #[must_use]
    pub fn from_env(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = std::env::var("DOCDEX_RETRIEVAL_API_KEY").ok();
        }
        if self.base_url.is_none() {
            self.base_url = std::env::var("DOCDEX_RETRIEVAL_URL").ok();
        }
        if self.index.is_none() {
            self.index = std::env::var("DOCDEX_INDEX").ok();
        }
        if self.project.is_none() {
            self.project = std::env::var("DOCDEX_PROJECT").ok();
        }
        if self.organization_id.is_none() {
            self.organization_id = std::env::var("DOCDEX_ORG_ID").ok();
        }
        if self.timeout.is_none() {
            self.timeout = std::env::var("DOCDEX_RETRIEVAL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs);
        }
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the index name.
    #[must_use]
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Sets the owning project.
    #[must_use]
    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// Sets the organization identifier.
    #[must_use]
    pub fn organization_id(mut self, id: impl Into<String>) -> Self {
        self.organization_id = Some(id.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Builds the [`RetrievalConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingApiKey`] if no API key was set.
    pub fn build(self) -> Result<RetrievalConfig, ConfigError> {
        let api_key = self.api_key.ok_or(ConfigError::MissingApiKey {
            var: "DOCDEX_RETRIEVAL_API_KEY",
        })?;

        Ok(RetrievalConfig {
            api_key,
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            index: self.index.unwrap_or_else(|| DEFAULT_INDEX.to_string()),
            project: self.project.unwrap_or_else(|| DEFAULT_PROJECT.to_string()),
            organization_id: self.organization_id,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = RetrievalConfig::builder()
            .api_key("test-key")
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.index, DEFAULT_INDEX);
        assert_eq!(config.project, DEFAULT_PROJECT);
        assert!(config.organization_id.is_none());
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_builder_missing_api_key() {
        let result = RetrievalConfig::builder().build();
        assert!(matches!(result, Err(ConfigError::MissingApiKey { .. })));
    }

    #[test]
    fn test_builder_custom_values() {
        let config = RetrievalConfig::builder()
            .api_key("key")
            .base_url("http://localhost:9200")
            .index("handbook")
            .project("Docs Team")
            .organization_id("org-123")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.base_url, "http://localhost:9200");
        assert_eq!(config.index, "handbook");
        assert_eq!(config.project, "Docs Team");
        assert_eq!(config.organization_id.as_deref(), Some("org-123"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = RetrievalConfig::builder()
            .api_key("super-secret")
            .build()
            .unwrap_or_else(|_| unreachable!());
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
