use std::fmt;
use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Represents the backend used to draft docstrings.
///
/// # Examples
///
/// ```
/// use ai_llm_service::LlmProvider;
///
/// let provider: LlmProvider = "ollama".parse().unwrap();
/// assert_eq!(provider, LlmProvider::Ollama);
/// assert!(!provider.requires_api_key());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Gemini `generateContent` API.
    Gemini,
    /// OpenAI chat completions (or any compatible server).
    OpenAI,
    /// Local Ollama runtime.
    Ollama,
}

impl LlmProvider {
    /// Whether requests must carry an API key.
    pub fn requires_api_key(&self) -> bool {
        match self {
            LlmProvider::Gemini | LlmProvider::OpenAI => true,
            LlmProvider::Ollama => false,
        }
    }

    /// Model used when neither the CLI nor the environment names one.
    ///
    /// Ollama has no sensible default because installed models differ per host.
    pub fn default_model(&self) -> Option<&'static str> {
        match self {
            LlmProvider::Gemini => Some("gemini-2.0-flash"),
            LlmProvider::OpenAI => Some("gpt-4o-mini"),
            LlmProvider::Ollama => None,
        }
    }

    /// Lowercase identifier accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini",
            LlmProvider::OpenAI => "openai",
            LlmProvider::Ollama => "ollama",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" | "vertex_ai" => Ok(LlmProvider::Gemini),
            "openai" | "chatgpt" => Ok(LlmProvider::OpenAI),
            "ollama" => Ok(LlmProvider::Ollama),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}
