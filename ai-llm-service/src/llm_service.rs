//! Provider-agnostic generation entry point.

use tracing::info;

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::AiLlmError,
    services::{
        gemini_service::GeminiService, ollama_service::OllamaService,
        open_ai_service::OpenAiService,
    },
};

/// One configured backend, chosen by [`LlmModelConfig::provider`].
#[derive(Debug)]
pub enum LlmService {
    Gemini(GeminiService),
    OpenAi(OpenAiService),
    Ollama(OllamaService),
}

impl LlmService {
    /// Validates `cfg` and builds the matching service.
    ///
    /// # Errors
    /// Any validation error from [`LlmModelConfig::validate`] or the
    /// service constructor.
    pub fn from_config(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        cfg.validate()?;
        info!(provider = %cfg.provider, model = %cfg.model, "LLM service selected");
        Ok(match cfg.provider {
            LlmProvider::Gemini => LlmService::Gemini(GeminiService::new(cfg)?),
            LlmProvider::OpenAI => LlmService::OpenAi(OpenAiService::new(cfg)?),
            LlmProvider::Ollama => LlmService::Ollama(OllamaService::new(cfg)?),
        })
    }

    /// Runs one non-streaming generation request.
    ///
    /// # Errors
    /// Whatever the underlying provider returns.
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        match self {
            LlmService::Gemini(s) => s.generate(prompt, system).await,
            LlmService::OpenAi(s) => s.generate(prompt, system).await,
            LlmService::Ollama(s) => s.generate(prompt, system).await,
        }
    }

    pub fn provider(&self) -> LlmProvider {
        match self {
            LlmService::Gemini(_) => LlmProvider::Gemini,
            LlmService::OpenAi(_) => LlmProvider::OpenAI,
            LlmService::Ollama(_) => LlmProvider::Ollama,
        }
    }
}
