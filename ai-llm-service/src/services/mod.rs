pub mod gemini_service;
pub mod ollama_service;
pub mod open_ai_service;

use std::time::Duration;

use crate::{
    config::llm_provider::LlmProvider,
    error_handler::{AiLlmError, HttpError, ProviderError, ProviderErrorKind, make_snippet},
};

/// Timeout used when the config leaves it unset.
pub(crate) const FALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

/// Checks the endpoint scheme and returns it without a trailing slash.
pub(crate) fn base_url(provider: LlmProvider, endpoint: &str) -> Result<String, AiLlmError> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
    {
        return Err(ProviderError::new(
            provider,
            ProviderErrorKind::InvalidEndpoint(endpoint.to_string()),
        )
        .into());
    }
    Ok(endpoint.trim_end_matches('/').to_string())
}

/// Converts a non-2xx response into a provider error with a body snippet.
pub(crate) async fn status_error(
    provider: LlmProvider,
    url: &str,
    resp: reqwest::Response,
) -> AiLlmError {
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    ProviderError::new(
        provider,
        ProviderErrorKind::HttpStatus(HttpError {
            status,
            url: url.to_string(),
            snippet: make_snippet(&text),
        }),
    )
    .into()
}
