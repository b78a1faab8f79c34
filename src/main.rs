mod report;
mod telemetry;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ai_llm_service::config::default_config::{config_for, provider_from_env};
use ai_llm_service::{LlmProvider, LlmService};
use anyhow::Context;
use clap::{ArgAction, Parser};
use colored::Colorize;
use docfix_pipeline::{DocfixConfig, FailurePolicy, LlmDocGenerator, staged_python_files};
use tracing::{info, warn};

/// Add generated Google-style docstrings to undocumented Python functions and classes.
///
/// Without FILES, the Python files staged in the current git repository are
/// processed. Exit status: 0 nothing to review, 1 files changed (or, with the
/// `fail` policy, a declaration could not be documented), 2 startup error.
#[derive(Debug, Parser)]
#[command(name = "ai-docfix", version, about, long_about = None)]
struct Cli {
    /// Python files to process (default: staged `.py` files).
    files: Vec<PathBuf>,

    /// Model name; overrides AI_DOCFIX_MODEL.
    #[arg(long)]
    model: Option<String>,

    /// Generation backend: gemini, openai or ollama; overrides AI_DOCFIX_PROVIDER.
    #[arg(long)]
    provider: Option<LlmProvider>,

    /// Maximum docstring line width; overrides DOCFIX_MAX_LINE_WIDTH.
    #[arg(long)]
    width: Option<usize>,

    /// `fail` or `warn`; overrides DOCFIX_ON_GENERATION_FAILURE.
    #[arg(long, value_name = "POLICY")]
    on_generation_failure: Option<FailurePolicy>,

    /// Do not send the whole file as background to the model.
    #[arg(long)]
    no_file_context: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // A missing .env is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    if let Err(e) = telemetry::init(cli.verbose) {
        eprintln!("{} logging disabled: {e:#}", report::PREFIX.yellow());
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", report::PREFIX.red().bold());
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let cfg = docfix_config(&cli)?;

    let files = if cli.files.is_empty() {
        let cwd = std::env::current_dir().context("cannot read current directory")?;
        staged_python_files(&cwd).context("cannot list staged files")?
    } else {
        python_only(&cli.files)
    };

    if files.is_empty() {
        info!("no Python files to check");
        return Ok(ExitCode::SUCCESS);
    }

    let provider = match cli.provider {
        Some(p) => p,
        None => provider_from_env()?,
    };
    let llm_cfg = config_for(provider, cli.model.clone())?;
    let service = LlmService::from_config(llm_cfg)?;
    info!(files = files.len(), provider = %service.provider(), "processing");
    let generator = LlmDocGenerator::new(service, &cfg);

    let summary = docfix_pipeline::run(&files, &cfg, &generator).await;
    report::print(&summary);

    Ok(if summary.requires_review(cfg.on_generation_failure) {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

/// Environment settings with CLI overrides applied.
fn docfix_config(cli: &Cli) -> anyhow::Result<DocfixConfig> {
    let mut cfg = DocfixConfig::from_env().context("invalid DOCFIX_* setting")?;
    if let Some(width) = cli.width {
        cfg.max_line_width = width;
    }
    if let Some(policy) = cli.on_generation_failure {
        cfg.on_generation_failure = policy;
    }
    if cli.no_file_context {
        cfg.include_file_context = false;
    }
    cfg.validate().context("invalid --width")?;
    Ok(cfg)
}

fn python_only(files: &[PathBuf]) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|p| {
            let keep = is_python(p);
            if !keep {
                warn!(path = %p.display(), "not a Python file; skipped");
            }
            keep
        })
        .cloned()
        .collect()
}

fn is_python(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "py")
}
