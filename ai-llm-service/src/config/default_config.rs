//! LLM config loaded from environment variables.
//!
//! # Environment variables
//!
//! Common:
//! - `AI_DOCFIX_PROVIDER` = `gemini` (default), `openai`, `ollama`
//! - `AI_DOCFIX_MODEL`    = model override for any provider
//! - `LLM_MAX_TOKENS`     = max generated tokens (u32, default 200)
//! - `LLM_TEMPERATURE`    = sampling temperature (f32, default 0.2)
//! - `LLM_TOP_P`          = nucleus sampling (f32, default 0.8)
//! - `LLM_TIMEOUT_SECS`   = per-request timeout (u64, default 30)
//!
//! Gemini:
//! - `GOOGLE_API_KEY` (mandatory), `GEMINI_URL` (optional base URL)
//!
//! OpenAI:
//! - `OPENAI_API_KEY` (mandatory), `OPENAI_URL` (optional base URL)
//!
//! Ollama:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (default `http://localhost:11434`)
//! - `OLLAMA_MODEL` = model, unless `AI_DOCFIX_MODEL` is set

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt, env_opt_f32, env_opt_u32, env_opt_u64, must_env,
    },
};

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

pub const DEFAULT_MAX_TOKENS: u32 = 200;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TOP_P: f32 = 0.8;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Reads `AI_DOCFIX_PROVIDER`, falling back to Gemini.
///
/// # Errors
/// [`ConfigError::UnsupportedProvider`] for an unknown name.
pub fn provider_from_env() -> Result<LlmProvider, AiLlmError> {
    match env_opt("AI_DOCFIX_PROVIDER") {
        Some(name) => Ok(name.parse::<LlmProvider>()?),
        None => Ok(LlmProvider::Gemini),
    }
}

/// Resolves the Ollama endpoint.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
/// 3. [`DEFAULT_OLLAMA_URL`]
///
/// # Errors
/// [`ConfigError::InvalidNumber`] if `OLLAMA_PORT` is not a port number.
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Some(url) = env_opt("OLLAMA_URL") {
        return Ok(url);
    }
    if let Some(port) = env_opt("OLLAMA_PORT") {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Ok(DEFAULT_OLLAMA_URL.to_string())
}

/// Picks the model: explicit override, then `AI_DOCFIX_MODEL`, then the
/// provider's own default (`OLLAMA_MODEL` for Ollama).
fn resolve_model(provider: LlmProvider, model: Option<String>) -> Result<String, AiLlmError> {
    if let Some(m) = model.filter(|m| !m.trim().is_empty()) {
        return Ok(m);
    }
    if let Some(m) = env_opt("AI_DOCFIX_MODEL") {
        return Ok(m);
    }
    match provider.default_model() {
        Some(m) => Ok(m.to_string()),
        None => must_env("OLLAMA_MODEL"),
    }
}

/// Builds and validates the config for `provider`.
///
/// `model` takes precedence over every environment source; the CLI passes
/// its `--model` flag here.
///
/// # Errors
/// - [`ConfigError::MissingVar`] for a missing API key or Ollama model
/// - [`ConfigError::InvalidNumber`] for unparsable numeric variables
/// - any error from [`LlmModelConfig::validate`]
pub fn config_for(provider: LlmProvider, model: Option<String>) -> Result<LlmModelConfig, AiLlmError> {
    let model = resolve_model(provider, model)?;

    let (endpoint, api_key) = match provider {
        LlmProvider::Gemini => (
            env_opt("GEMINI_URL").unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string()),
            Some(must_env("GOOGLE_API_KEY")?),
        ),
        LlmProvider::OpenAI => (
            env_opt("OPENAI_URL").unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string()),
            Some(must_env("OPENAI_API_KEY")?),
        ),
        LlmProvider::Ollama => (ollama_endpoint()?, None),
    };

    let cfg = LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: Some(env_opt_u32("LLM_MAX_TOKENS")?.unwrap_or(DEFAULT_MAX_TOKENS)),
        temperature: Some(env_opt_f32("LLM_TEMPERATURE")?.unwrap_or(DEFAULT_TEMPERATURE)),
        top_p: Some(env_opt_f32("LLM_TOP_P")?.unwrap_or(DEFAULT_TOP_P)),
        timeout_secs: Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    };
    cfg.validate()?;
    Ok(cfg)
}
