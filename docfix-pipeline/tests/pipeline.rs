use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use docfix_pipeline::{
    DeclarationError, DocGenerator, DocfixConfig, FailurePolicy, FileOutcome, GenerationError,
    GenerationRequest, PipelineError, process_file, run,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Replies through a closure and counts calls.
struct Scripted<F> {
    reply: F,
    calls: AtomicUsize,
}

impl<F> Scripted<F>
where
    F: Fn(&GenerationRequest<'_>) -> Result<String, GenerationError> + Sync,
{
    fn new(reply: F) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<F> DocGenerator for Scripted<F>
where
    F: Fn(&GenerationRequest<'_>) -> Result<String, GenerationError> + Sync,
{
    fn generate(
        &self,
        request: &GenerationRequest<'_>,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let out = (self.reply)(request);
        async move { out }
    }
}

fn doc_for_name(req: &GenerationRequest<'_>) -> Result<String, GenerationError> {
    Ok(format!("Doc for {}.", req.declaration.name))
}

fn write_py(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

const THREE_FUNCTIONS: &str = "\
def a(x):
    return x


def b(y):
    return y


def c(z):
    return z
";

#[tokio::test]
async fn blocks_land_under_their_own_headers() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_py(&dir, "m.py", THREE_FUNCTIONS);
    let generator = Scripted::new(doc_for_name);

    let report = process_file(&path, &DocfixConfig::default(), &generator).await;

    assert!(report.is_modified());
    assert_eq!(report.documented, vec!["c", "b", "a"]);
    assert_eq!(
        read(&path),
        "\
def a(x):
    \"\"\"
    Doc for a.
    \"\"\"

    return x


def b(y):
    \"\"\"
    Doc for b.
    \"\"\"

    return y


def c(z):
    \"\"\"
    Doc for c.
    \"\"\"

    return z
"
    );
}

#[tokio::test]
async fn second_run_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_py(&dir, "m.py", THREE_FUNCTIONS);
    let generator = Scripted::new(|_: &GenerationRequest<'_>| Ok("Fixed text.".to_string()));
    let cfg = DocfixConfig::default();

    let first = run(&[path.clone()], &cfg, &generator).await;
    assert!(first.requires_review(FailurePolicy::Fail));
    let after_first = read(&path);
    assert_eq!(generator.calls(), 3);

    let second = run(&[path.clone()], &cfg, &generator).await;
    assert!(!second.requires_review(FailurePolicy::Fail));
    assert!(matches!(second.files[0].outcome, FileOutcome::Unmodified));
    assert_eq!(read(&path), after_first);
    assert_eq!(generator.calls(), 3);
}

#[tokio::test]
async fn nested_members_use_their_own_indent() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_py(
        &dir,
        "cls.py",
        "\
class Account:
    def deposit(self, amount: float,
                note: str = \"\") -> None:
        # keep history
        self.balance += amount
",
    );
    let generator = Scripted::new(|req: &GenerationRequest<'_>| {
        Ok(match req.declaration.qualified_name.as_str() {
            "Account" => "A bank account.".to_string(),
            _ => "```python\n\"\"\"Add money.\n\nArgs:\namount: value to add\nnote: free text\n\"\"\"\n```"
                .to_string(),
        })
    });

    let report = process_file(&path, &DocfixConfig::default(), &generator).await;
    assert_eq!(report.documented, vec!["Account.deposit", "Account"]);
    assert_eq!(
        read(&path),
        "\
class Account:
    \"\"\"
    A bank account.
    \"\"\"

    def deposit(self, amount: float,
                note: str = \"\") -> None:
        \"\"\"
        Add money.

        Args:
            amount: value to add
            note: free text
        \"\"\"

        # keep history
        self.balance += amount
"
    );
}

#[tokio::test]
async fn generator_sees_window_and_file_context() {
    let dir = tempfile::tempdir().unwrap();
    let src = "def solo(n):\n    return n * 2\n";
    let path = write_py(&dir, "solo.py", src);

    let generator = Scripted::new(|req: &GenerationRequest<'_>| {
        assert_eq!(req.window.signature, vec!["def solo(n):"]);
        assert_eq!(req.window.body, vec!["    return n * 2", ""]);
        assert_eq!(req.file_text, Some("def solo(n):\n    return n * 2\n"));
        Ok("Doubles n.".to_string())
    });
    process_file(&path, &DocfixConfig::default(), &generator).await;
    assert_eq!(generator.calls(), 1);

    let path = write_py(&dir, "solo2.py", src);
    let cfg = DocfixConfig {
        include_file_context: false,
        ..DocfixConfig::default()
    };
    let generator = Scripted::new(|req: &GenerationRequest<'_>| {
        assert!(req.file_text.is_none());
        Ok("Doubles n.".to_string())
    });
    process_file(&path, &cfg, &generator).await;
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn failed_declaration_does_not_stop_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_py(&dir, "m.py", THREE_FUNCTIONS);
    let generator = Scripted::new(|req: &GenerationRequest<'_>| {
        if req.declaration.name == "b" {
            Err(GenerationError::Unavailable("quota exhausted".into()))
        } else {
            doc_for_name(req)
        }
    });

    let summary = run(&[path.clone()], &DocfixConfig::default(), &generator).await;
    let report = &summary.files[0];

    assert_eq!(report.documented, vec!["c", "a"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].qualified_name, "b");
    assert_eq!(report.failures[0].line, 5);
    assert!(matches!(
        report.failures[0].error,
        DeclarationError::Generation(GenerationError::Unavailable(_))
    ));

    let text = read(&path);
    assert!(text.contains("Doc for a."));
    assert!(text.contains("def b(y):\n    return y"));
    assert!(text.contains("Doc for c."));
}

#[tokio::test]
async fn empty_replies_are_failures_and_leave_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_py(&dir, "m.py", "def f():\n    pass\n");
    let generator = Scripted::new(|_: &GenerationRequest<'_>| Ok("```\n```".to_string()));

    let summary = run(&[path.clone()], &DocfixConfig::default(), &generator).await;

    assert!(matches!(summary.files[0].outcome, FileOutcome::Unmodified));
    assert!(matches!(
        summary.files[0].failures[0].error,
        DeclarationError::Generation(GenerationError::Empty)
    ));
    assert_eq!(read(&path), "def f():\n    pass\n");
    assert!(summary.requires_review(FailurePolicy::Fail));
    assert!(!summary.requires_review(FailurePolicy::Warn));
}

#[tokio::test]
async fn syntax_errors_abort_only_that_file() {
    let dir = tempfile::tempdir().unwrap();
    let broken = "def broken(:\n    pass\n";
    let bad = write_py(&dir, "bad.py", broken);
    let good = write_py(&dir, "good.py", "def ok():\n    return 1\n");
    let generator = Scripted::new(doc_for_name);

    let summary = run(&[bad.clone(), good.clone()], &DocfixConfig::default(), &generator).await;

    assert!(matches!(
        summary.files[0].outcome,
        FileOutcome::Errored(PipelineError::Scan(_))
    ));
    assert_eq!(read(&bad), broken);
    assert!(summary.files[1].is_modified());
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gone.py");
    let generator = Scripted::new(doc_for_name);

    let report = process_file(&path, &DocfixConfig::default(), &generator).await;

    match &report.outcome {
        FileOutcome::Errored(PipelineError::Io { path: p, .. }) => assert_eq!(p, &path),
        other => panic!("unexpected outcome: {other:?}"),
    }
    let summary = docfix_pipeline::RunSummary {
        files: vec![report],
    };
    assert!(summary.requires_review(FailurePolicy::Fail));
    assert!(!summary.requires_review(FailurePolicy::Warn));
}

#[tokio::test]
async fn one_line_bodies_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let src = "def tiny(): return 1\n\n\ndef full():\n    return 2\n";
    let path = write_py(&dir, "m.py", src);
    let generator = Scripted::new(doc_for_name);

    let report = process_file(&path, &DocfixConfig::default(), &generator).await;

    assert_eq!(report.skipped, vec!["tiny"]);
    assert_eq!(report.documented, vec!["full"]);
    assert!(report.failures.is_empty());
    assert!(read(&path).starts_with("def tiny(): return 1\n"));
}

#[tokio::test]
async fn crlf_files_keep_their_line_endings() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_py(&dir, "win.py", "def f():\r\n    pass\r\n");
    let generator = Scripted::new(doc_for_name);

    process_file(&path, &DocfixConfig::default(), &generator).await;

    assert_eq!(
        read(&path),
        "def f():\r\n    \"\"\"\r\n    Doc for f.\r\n    \"\"\"\r\n\r\n    pass\r\n"
    );
}

#[tokio::test]
async fn narrow_width_wraps_inserted_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_py(&dir, "m.py", "class K:\n    def m(self):\n        pass\n");
    let generator = Scripted::new(|_: &GenerationRequest<'_>| {
        Ok("Summarize the thing in a sentence that is definitely too long for the width.".into())
    });
    let cfg = DocfixConfig {
        max_line_width: 40,
        ..DocfixConfig::default()
    };

    process_file(&path, &cfg, &generator).await;

    let text = read(&path);
    assert!(text.lines().all(|l| l.chars().count() <= 40), "{text}");
}

#[tokio::test]
async fn backslashes_land_in_a_raw_docstring() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_py(&dir, "paths.py", "def load():\n    return 1\n");
    let generator = Scripted::new(|_: &GenerationRequest<'_>| {
        Ok("Reads the file at C:\\Users\\me\\cfg.ini or \\x00.".to_string())
    });

    let report = process_file(&path, &DocfixConfig::default(), &generator).await;
    assert!(report.is_modified());

    let text = read(&path);
    assert_eq!(
        text,
        "def load():\n    r\"\"\"\n    Reads the file at C:\\Users\\me\\cfg.ini or \\x00.\n    \"\"\"\n\n    return 1\n"
    );
    assert!(docfix_core::scan(&text, &path).unwrap().is_empty());
}

#[tokio::test]
async fn two_space_bodies_keep_their_indent() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_py(
        &dir,
        "narrow.py",
        "class A:\n  def m(self):\n    return 1\n\n\ndef f():\n  return 2\n",
    );
    let generator = Scripted::new(doc_for_name);

    let report = process_file(&path, &DocfixConfig::default(), &generator).await;
    assert_eq!(report.documented, vec!["f", "A.m", "A"]);

    let text = read(&path);
    assert_eq!(
        text,
        "\
class A:
  \"\"\"
  Doc for A.
  \"\"\"

  def m(self):
    \"\"\"
    Doc for m.
    \"\"\"

    return 1


def f():
  \"\"\"
  Doc for f.
  \"\"\"

  return 2
"
    );
    assert!(docfix_core::scan(&text, &path).unwrap().is_empty());
}
