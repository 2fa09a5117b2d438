//! LLM configuration parsed from environment variables.

use super::Provider;
use super::types::LlmError;

pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-6";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-5-mini";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Credentials and model for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    /// `None` when `ANTHROPIC_API_KEY` is unset.
    pub anthropic: Option<ProviderConfig>,
    /// `None` when `OPENAI_API_KEY` is unset.
    pub openai: Option<ProviderConfig>,
    pub openai_base_url: String,
    pub max_tokens: u32,
    pub timeouts: LlmTimeouts,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// A provider is enabled when its key is present:
    /// - `ANTHROPIC_API_KEY`, model from `ANTHROPIC_MODEL` (default `claude-sonnet-4-6`)
    /// - `OPENAI_API_KEY`, model from `OPENAI_MODEL` (default `gpt-5-mini`)
    ///
    /// Optional:
    /// - `OPENAI_BASE_URL`: default OpenAI API base URL
    /// - `LLM_MAX_TOKENS`: default 4096
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigParse`] when a numeric variable is set but
    /// not a valid number.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LlmConfig::from_env`] but reading through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`LlmConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let provider = |key_var: &str, model_var: &str, default_model: &str| {
            lookup(key_var)
                .filter(|k| !k.trim().is_empty())
                .map(|api_key| ProviderConfig {
                    api_key,
                    model: lookup(model_var).unwrap_or_else(|| default_model.to_string()),
                })
        };

        let anthropic = provider("ANTHROPIC_API_KEY", "ANTHROPIC_MODEL", DEFAULT_ANTHROPIC_MODEL);
        let openai = provider("OPENAI_API_KEY", "OPENAI_MODEL", DEFAULT_OPENAI_MODEL);
        let openai_base_url = lookup("OPENAI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let max_tokens = parse_or(&lookup, "LLM_MAX_TOKENS", DEFAULT_LLM_MAX_TOKENS)?;
        let timeouts = LlmTimeouts {
            request_secs: parse_or(&lookup, "LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_or(&lookup, "LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS)?,
        };

        Ok(Self { anthropic, openai, openai_base_url, max_tokens, timeouts })
    }

    /// Config for `provider`, if its key was present.
    #[must_use]
    pub fn provider(&self, provider: Provider) -> Option<&ProviderConfig> {
        match provider {
            Provider::Claude => self.anthropic.as_ref(),
            Provider::OpenAi => self.openai.as_ref(),
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, LlmError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| LlmError::ConfigParse(format!("{key} is not a valid number: {raw}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
