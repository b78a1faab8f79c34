//! Orchestrator: scan → extract → generate → normalize → patch, one file at a time.

use std::path::{Path, PathBuf};
use std::time::Instant;

use docfix_core::{
    Declaration, FileLines, block_indent, check_line_width, extract, insert_after, normalize_at,
    scan,
};
use tracing::{debug, info, instrument, warn};

use crate::config::DocfixConfig;
use crate::errors::{DeclarationError, GenerationError, PipelineError};
use crate::generator::{DocGenerator, GenerationRequest};
use crate::summary::{DeclarationFailure, FileOutcome, FileReport, RunSummary};

/// Processes `files` sequentially and collects their reports.
pub async fn run<G: DocGenerator>(
    files: &[PathBuf],
    cfg: &DocfixConfig,
    generator: &G,
) -> RunSummary {
    let t0 = Instant::now();
    let mut summary = RunSummary::default();
    for path in files {
        summary.files.push(process_file(path, cfg, generator).await);
    }
    info!(
        files = summary.files.len(),
        documented = summary.documented_count(),
        failures = summary.failure_count(),
        elapsed_ms = t0.elapsed().as_millis(),
        "run complete"
    );
    summary
}

/// Adds docstrings to every undocumented declaration of one file.
///
/// Errors never escape: read, parse and write failures become
/// [`FileOutcome::Errored`], per-declaration failures are listed in the report.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn process_file<G: DocGenerator>(
    path: &Path,
    cfg: &DocfixConfig,
    generator: &G,
) -> FileReport {
    match try_process(path, cfg, generator).await {
        Ok(report) => report,
        Err(e) => {
            warn!(error = %e, "file skipped");
            FileReport::errored(path, e)
        }
    }
}

async fn try_process<G: DocGenerator>(
    path: &Path,
    cfg: &DocfixConfig,
    generator: &G,
) -> Result<FileReport, PipelineError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PipelineError::io(path, e))?;

    let mut issues = scan(&text, path)?;
    let mut report = FileReport::new(path);
    if issues.is_empty() {
        debug!("nothing to document");
        return Ok(report);
    }

    // Bottom-up, so earlier line numbers stay valid after each insertion.
    issues.sort_by(|a, b| b.declaration.start_line.cmp(&a.declaration.start_line));
    info!(issues = issues.len(), "undocumented declarations found");

    let mut file = FileLines::from_text(&text);
    let file_text = cfg.include_file_context.then_some(text.as_str());

    for issue in &issues {
        let decl = &issue.declaration;
        if decl.inline_body {
            warn!(
                declaration = %decl.qualified_name,
                line = decl.start_line,
                "body shares the header line; skipped"
            );
            report.skipped.push(decl.qualified_name.clone());
            continue;
        }

        match document_one(&file.lines, decl, file_text, cfg, generator).await {
            Ok(lines) => {
                debug!(declaration = %decl.qualified_name, line = decl.start_line, "docstring inserted");
                file.lines = lines;
                report.documented.push(decl.qualified_name.clone());
            }
            Err(error) => {
                warn!(
                    declaration = %decl.qualified_name,
                    line = decl.start_line,
                    %error,
                    "declaration not documented"
                );
                report.failures.push(DeclarationFailure {
                    qualified_name: decl.qualified_name.clone(),
                    line: decl.start_line,
                    error,
                });
            }
        }
    }

    if !report.documented.is_empty() {
        tokio::fs::write(path, file.to_text())
            .await
            .map_err(|e| PipelineError::io(path, e))?;
        report.outcome = FileOutcome::Modified;
        info!(documented = report.documented.len(), "file updated");
    }
    Ok(report)
}

async fn document_one<G: DocGenerator>(
    lines: &[String],
    decl: &Declaration,
    file_text: Option<&str>,
    cfg: &DocfixConfig,
    generator: &G,
) -> Result<Vec<String>, DeclarationError> {
    let window = extract(lines, decl.index())?;
    let raw = generator
        .generate(&GenerationRequest {
            declaration: decl,
            window: &window,
            file_text,
        })
        .await?;

    let indent = block_indent(lines, decl.index(), decl.header_end_index());
    let block = normalize_at(&raw, cfg.max_line_width, &indent);
    if block.is_empty() {
        return Err(GenerationError::Empty.into());
    }

    let (fits, violations) = check_line_width(&block.to_text(), cfg.max_line_width);
    if !fits {
        warn!(declaration = %decl.qualified_name, %violations, "docstring exceeds width");
    }

    Ok(insert_after(
        lines,
        decl.index(),
        decl.header_end_index(),
        block.lines(),
    )?)
}
