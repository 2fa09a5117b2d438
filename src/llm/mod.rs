//! LLM: provider registry for room generation.
//!
//! DESIGN
//! ======
//! Each request names its provider (`claude` or `openai`), so instead of one
//! configured client the server holds a registry with a client per provider
//! whose API key is present. A missing key leaves that provider out; asking
//! for it later is a request-time error, not a startup failure.

pub mod anthropic;
pub mod config;
mod http;
pub mod openai;
pub mod types;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use config::{DEFAULT_LLM_MAX_TOKENS, LlmConfig};
pub use types::LlmChat;
use types::LlmError;

// =============================================================================
// PROVIDER
// =============================================================================

/// Provider name as sent by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    #[default]
    Claude,
    OpenAi,
}

impl Provider {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::OpenAi => "openai",
        }
    }

    /// Parse an optional request field; absent means [`Provider::Claude`].
    ///
    /// # Errors
    ///
    /// Returns [`UnknownProvider`] for any name other than `claude` or `openai`.
    pub fn from_request(raw: Option<&str>) -> Result<Self, UnknownProvider> {
        raw.map_or(Ok(Self::default()), str::parse)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claude" => Ok(Self::Claude),
            "openai" => Ok(Self::OpenAi),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Clients keyed by provider, plus the shared completion budget.
#[derive(Clone)]
pub struct LlmRegistry {
    clients: HashMap<Provider, Arc<dyn LlmChat>>,
    max_tokens: u32,
}

impl Default for LlmRegistry {
    fn default() -> Self {
        Self { clients: HashMap::new(), max_tokens: DEFAULT_LLM_MAX_TOKENS }
    }
}

impl LlmRegistry {
    /// Build a registry from environment variables. See [`LlmConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is malformed or an HTTP client
    /// fails to build.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(&LlmConfig::from_env()?)
    }

    /// Build a client for every provider that has credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if a provider HTTP client fails to build.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let mut registry = Self { clients: HashMap::new(), max_tokens: config.max_tokens };
        if let Some(p) = config.provider(Provider::Claude) {
            let client = anthropic::AnthropicClient::new(p.api_key.clone(), p.model.clone(), config.timeouts)?;
            registry = registry.with(Provider::Claude, Arc::new(client));
        }
        if let Some(p) = config.provider(Provider::OpenAi) {
            let client =
                openai::OpenAiClient::new(p.api_key.clone(), p.model.clone(), &config.openai_base_url, config.timeouts)?;
            registry = registry.with(Provider::OpenAi, Arc::new(client));
        }
        Ok(registry)
    }

    /// Register (or replace) the client for `provider`.
    #[must_use]
    pub fn with(mut self, provider: Provider, client: Arc<dyn LlmChat>) -> Self {
        self.clients.insert(provider, client);
        self
    }

    #[must_use]
    pub fn get(&self, provider: Provider) -> Option<Arc<dyn LlmChat>> {
        self.clients.get(&provider).cloned()
    }

    /// Configured providers, `claude` first.
    #[must_use]
    pub fn providers(&self) -> Vec<Provider> {
        [Provider::Claude, Provider::OpenAi]
            .into_iter()
            .filter(|p| self.clients.contains_key(p))
            .collect()
    }

    #[must_use]
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}
