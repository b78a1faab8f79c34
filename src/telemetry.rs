use std::io::{self, IsTerminal};

use tracing::Level;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Workspace crates whose level `-v` raises.
pub const TARGETS: &[&str] = &["ai_docfix", "docfix_core", "docfix_pipeline", "ai_llm_service"];

/// RFC3339 UTC timer implemented via `chrono`.
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        w.write_str(&now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

/// Maps `-v` occurrences to a level for our own crates.
pub fn verbosity_level(verbose: u8) -> Option<Level> {
    match verbose {
        0 => None,
        1 => Some(Level::INFO),
        _ => Some(Level::DEBUG),
    }
}

/// `RUST_LOG` (default `warn`) plus per-crate directives for `verbose`.
pub fn env_filter(verbose: u8) -> Result<EnvFilter, ParseError> {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Some(level) = verbosity_level(verbose) {
        for target in TARGETS {
            filter = filter.add_directive(level_directive(target, level)?);
        }
    }
    Ok(filter)
}

fn level_directive(target: &str, level: Level) -> Result<Directive, ParseError> {
    format!("{target}={}", level.as_str().to_lowercase()).parse()
}

/// Installs the global subscriber: compact lines on stderr, stdout stays
/// free for the run summary.
pub fn init(verbose: u8) -> anyhow::Result<()> {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .event_format(
            fmt::format()
                .compact()
                .with_timer(ChronoRfc3339Utc)
                .with_target(true),
        );

    tracing_subscriber::registry()
        .with(env_filter(verbose)?)
        .with(layer)
        .try_init()?;
    Ok(())
}
