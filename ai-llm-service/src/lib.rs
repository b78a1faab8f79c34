//! Generation backends used to draft docstrings.
//!
//! The crate exposes one entry point, [`LlmService`], which dispatches a
//! non-streaming text generation request to Gemini, an OpenAI-compatible
//! endpoint, or a local Ollama runtime. Configuration is a plain
//! [`LlmModelConfig`] record, usually produced by
//! [`config::default_config::config_for`].

pub mod config;
pub mod error_handler;
pub mod llm_service;
pub mod services;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind, Result};
pub use llm_service::LlmService;
