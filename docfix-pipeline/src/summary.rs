//! Per-file and per-run outcomes.

use std::path::{Path, PathBuf};

use crate::config::FailurePolicy;
use crate::errors::{DeclarationError, PipelineError};

/// A declaration that could not be documented.
#[derive(Debug)]
pub struct DeclarationFailure {
    pub qualified_name: String,
    pub line: usize,
    pub error: DeclarationError,
}

#[derive(Debug)]
pub enum FileOutcome {
    Modified,
    Unmodified,
    /// Read, parse or write failed; the file on disk is untouched.
    Errored(PipelineError),
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
    /// Qualified names that received a docstring, in processing order.
    pub documented: Vec<String>,
    /// Declarations left alone because their body shares the header line.
    pub skipped: Vec<String>,
    pub failures: Vec<DeclarationFailure>,
}

impl FileReport {
    pub(crate) fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            outcome: FileOutcome::Unmodified,
            documented: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub(crate) fn errored(path: &Path, error: PipelineError) -> Self {
        Self {
            outcome: FileOutcome::Errored(error),
            ..Self::new(path)
        }
    }

    pub fn is_modified(&self) -> bool {
        matches!(self.outcome, FileOutcome::Modified)
    }

    pub fn is_errored(&self) -> bool {
        matches!(self.outcome, FileOutcome::Errored(_))
    }
}

/// Reports for every file of one run, in input order.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files: Vec<FileReport>,
}

impl RunSummary {
    pub fn modified(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.is_modified())
    }

    pub fn errored(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.is_errored())
    }

    pub fn documented_count(&self) -> usize {
        self.files.iter().map(|f| f.documented.len()).sum()
    }

    pub fn failure_count(&self) -> usize {
        self.files.iter().map(|f| f.failures.len()).sum()
    }

    /// Whether the commit should be stopped for a human to look.
    ///
    /// Modified files always need review. Under [`FailurePolicy::Fail`] so do
    /// failed declarations and files that could not be processed.
    pub fn requires_review(&self, policy: FailurePolicy) -> bool {
        let modified = self.modified().next().is_some();
        match policy {
            FailurePolicy::Warn => modified,
            FailurePolicy::Fail => {
                modified || self.failure_count() > 0 || self.errored().next().is_some()
            }
        }
    }
}
