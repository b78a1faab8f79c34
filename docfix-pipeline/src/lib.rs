//! Per-file docstring pipeline.
//!
//! For each file: scan for undocumented declarations, then bottom-up for
//! each one extract its context window, ask the [`DocGenerator`] for text,
//! normalize it and splice it under the header. The file is written once,
//! and only when something was inserted.
//!
//! Files and declarations are processed strictly one after another; the
//! only suspension point is the generator call. Generation goes through the
//! [`DocGenerator`] trait with static dispatch, so tests can plug in
//! scripted generators without touching the network.

pub mod config;
pub mod discover;
pub mod errors;
pub mod generator;
pub mod process;
pub mod prompt;
pub mod summary;

pub use config::{DocfixConfig, FailurePolicy};
pub use discover::staged_python_files;
pub use errors::{ConfigError, DeclarationError, GenerationError, PipelineError};
pub use generator::{DocGenerator, GenerationRequest, LlmDocGenerator};
pub use process::{process_file, run};
pub use summary::{DeclarationFailure, FileOutcome, FileReport, RunSummary};
