//! User-facing run summary on stdout.

use colored::{ColoredString, Colorize};
use docfix_pipeline::{FileOutcome, RunSummary};

pub const PREFIX: &str = "[ai-docfix]";
pub const REVIEW_HINT: &str = "Docstrings added. Please review changes, stage them, and commit again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Added,
    Skipped,
    Failed,
    Errored,
}

/// One line per event, in file order, without styling.
pub fn lines(summary: &RunSummary) -> Vec<(Tone, String)> {
    let mut out = Vec::new();
    for file in &summary.files {
        let path = file.path.display();
        match &file.outcome {
            FileOutcome::Errored(e) => {
                out.push((Tone::Errored, format!("Could not process {path}: {e}")));
                continue;
            }
            FileOutcome::Modified => out.push((
                Tone::Added,
                format!("Added {} docstring(s) to: {path}", file.documented.len()),
            )),
            FileOutcome::Unmodified => {}
        }
        for name in &file.skipped {
            out.push((
                Tone::Skipped,
                format!("Skipped {name} in {path}: body is on the header line"),
            ));
        }
        for failure in &file.failures {
            out.push((
                Tone::Failed,
                format!(
                    "Could not document {} ({path}:{}): {}",
                    failure.qualified_name, failure.line, failure.error
                ),
            ));
        }
    }
    out
}

fn paint(tone: Tone, prefix: &str) -> ColoredString {
    match tone {
        Tone::Added => prefix.green(),
        Tone::Skipped => prefix.dimmed(),
        Tone::Failed => prefix.yellow(),
        Tone::Errored => prefix.red().bold(),
    }
}

pub fn print(summary: &RunSummary) {
    for (tone, line) in lines(summary) {
        println!("{} {line}", paint(tone, PREFIX));
    }
    if summary.modified().next().is_some() {
        println!();
        println!("{}", REVIEW_HINT.bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docfix_pipeline::{
        DeclarationError, DeclarationFailure, FileReport, GenerationError,
    };
    use std::path::PathBuf;

    fn report(path: &str, outcome: FileOutcome) -> FileReport {
        FileReport {
            path: PathBuf::from(path),
            outcome,
            documented: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }

    #[test]
    fn lists_additions_then_problems() {
        let mut modified = report("pkg/a.py", FileOutcome::Modified);
        modified.documented = vec!["f".into(), "g".into()];
        modified.skipped = vec!["tiny".into()];
        modified.failures.push(DeclarationFailure {
            qualified_name: "C.m".into(),
            line: 12,
            error: DeclarationError::Generation(GenerationError::Empty),
        });
        let summary = RunSummary {
            files: vec![modified, report("pkg/b.py", FileOutcome::Unmodified)],
        };

        let got: Vec<String> = lines(&summary).into_iter().map(|(_, l)| l).collect();
        assert_eq!(
            got,
            vec![
                "Added 2 docstring(s) to: pkg/a.py".to_string(),
                "Skipped tiny in pkg/a.py: body is on the header line".to_string(),
                "Could not document C.m (pkg/a.py:12): generator returned no docstring text"
                    .to_string(),
            ]
        );
    }
}
