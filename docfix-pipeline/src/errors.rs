use std::path::PathBuf;

use ai_llm_service::AiLlmError;
use docfix_core::{ContextError, PatchError, ScanError};
use thiserror::Error;

/// Invalid `DOCFIX_*` settings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid number in {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("invalid value in {var}: {value:?} (expected {expected})")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("{var} must be at least {min}")]
    TooSmall { var: &'static str, min: usize },
}

/// Why a generator produced nothing usable.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Llm(#[from] AiLlmError),

    #[error("generator returned no docstring text")]
    Empty,

    #[error("generator unavailable: {0}")]
    Unavailable(String),
}

/// Failure for one declaration; the rest of the file is still processed.
#[derive(Debug, Error)]
pub enum DeclarationError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Patch(#[from] PatchError),
}

/// Failure that aborts one file (or discovery).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("repository at {0} has no working directory")]
    BareRepository(PathBuf),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}
