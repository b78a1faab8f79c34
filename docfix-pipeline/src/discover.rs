//! Staged-file discovery for pre-commit use.

use std::path::{Path, PathBuf};

use git2::{Delta, ErrorCode, Repository};
use tracing::debug;

use crate::errors::PipelineError;

/// Python files staged in the repository containing `repo_dir`.
///
/// Compares HEAD's tree (none on an unborn branch) with the index and keeps
/// added, modified, renamed and copied `.py` entries, joined onto the workdir.
pub fn staged_python_files(repo_dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let repo = Repository::discover(repo_dir)?;
    let workdir = repo
        .workdir()
        .ok_or_else(|| PipelineError::BareRepository(repo.path().to_path_buf()))?
        .to_path_buf();

    let head_tree = match repo.head() {
        Ok(head) => Some(head.peel_to_tree()?),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => None,
        Err(e) => return Err(e.into()),
    };

    let index = repo.index()?;
    let diff = repo.diff_tree_to_index(head_tree.as_ref(), Some(&index), None)?;

    let mut files: Vec<PathBuf> = diff
        .deltas()
        .filter(|d| {
            matches!(
                d.status(),
                Delta::Added | Delta::Modified | Delta::Renamed | Delta::Copied
            )
        })
        .filter_map(|d| d.new_file().path().map(Path::to_path_buf))
        .filter(|p| p.extension().is_some_and(|ext| ext == "py"))
        .map(|p| workdir.join(p))
        .collect();
    files.sort();
    files.dedup();

    debug!(count = files.len(), "staged python files");
    Ok(files)
}
