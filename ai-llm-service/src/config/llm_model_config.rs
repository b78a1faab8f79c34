use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{
    ConfigError, Result, validate_http_endpoint, validate_range_f32,
};

/// Configuration for one generation backend.
///
/// Built once at process start (see
/// [`config_for`](crate::config::default_config::config_for)) and
/// handed to [`LlmService::from_config`](crate::LlmService::from_config).
///
/// # Fields
///
/// - `provider`: which backend to call.
/// - `model`: model identifier (e.g., `"gemini-2.0-flash"`, `"qwen3:14b"`).
/// - `endpoint`: base URL of the API; the service appends its own path.
/// - `api_key`: credential for hosted providers.
/// - `max_tokens`: upper bound on generated tokens.
/// - `temperature` / `top_p`: sampling knobs.
/// - `timeout_secs`: per-request timeout; bounds every generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// The backend to call.
    pub provider: LlmProvider,

    /// Model identifier string.
    pub model: String,

    /// Base URL (scheme + host [+ port]).
    pub endpoint: String,

    /// API key for hosted providers.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Checks the invariants every service relies on.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyModel`] for a blank model name
    /// - [`ConfigError::InvalidFormat`] for a non-http(s) endpoint
    /// - [`ConfigError::MissingVar`] when the provider needs a key and none is set
    /// - [`ConfigError::OutOfRange`] for temperature outside `0..=2` or top_p outside `0..=1`
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel.into());
        }
        validate_http_endpoint("endpoint", self.endpoint.trim())?;

        if self.provider.requires_api_key()
            && self.api_key.as_deref().is_none_or(|k| k.trim().is_empty())
        {
            let var = match self.provider {
                LlmProvider::Gemini => "GOOGLE_API_KEY",
                _ => "OPENAI_API_KEY",
            };
            return Err(ConfigError::MissingVar(var).into());
        }

        if let Some(t) = self.temperature {
            validate_range_f32("temperature", t, 0.0, 2.0)?;
        }
        if let Some(p) = self.top_p {
            validate_range_f32("top_p", p, 0.0, 1.0)?;
        }
        Ok(())
    }
}
