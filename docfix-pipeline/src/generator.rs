//! The seam between the orchestrator and whatever drafts docstring text.

use std::future::Future;

use ai_llm_service::LlmService;
use docfix_core::{ContextWindow, Declaration};
use tracing::debug;

use crate::config::DocfixConfig;
use crate::errors::GenerationError;
use crate::prompt::{DEFAULT_SYSTEM, build_user_prompt};

/// Everything a generator gets to see for one declaration.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub declaration: &'a Declaration,
    pub window: &'a ContextWindow,
    /// Whole original file, when file context is enabled.
    pub file_text: Option<&'a str>,
}

/// Produces raw docstring text. Output may be noisy; the caller normalizes it.
pub trait DocGenerator {
    fn generate(
        &self,
        request: &GenerationRequest<'_>,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

/// [`DocGenerator`] backed by an [`LlmService`].
#[derive(Debug)]
pub struct LlmDocGenerator {
    service: LlmService,
    max_line_width: usize,
    max_file_context_chars: usize,
}

impl LlmDocGenerator {
    pub fn new(service: LlmService, cfg: &DocfixConfig) -> Self {
        Self {
            service,
            max_line_width: cfg.max_line_width,
            max_file_context_chars: cfg.max_file_context_chars,
        }
    }
}

impl DocGenerator for LlmDocGenerator {
    fn generate(
        &self,
        request: &GenerationRequest<'_>,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send {
        let prompt = build_user_prompt(request, self.max_line_width, self.max_file_context_chars);
        let name = request.declaration.qualified_name.clone();
        async move {
            debug!(declaration = %name, prompt_len = prompt.len(), "requesting docstring");
            let text = self.service.generate(&prompt, Some(DEFAULT_SYSTEM)).await?;
            if text.trim().is_empty() {
                return Err(GenerationError::Empty);
            }
            Ok(text)
        }
    }
}
