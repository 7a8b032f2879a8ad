use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// File logging for the terminal client, which owns stdout.
///
/// - Daily rolling file `assistant-tui.log.<date>` under `log_dir`
/// - Level from `RUST_LOG`, default `info`
///
/// Keep the returned guard alive for the whole run or buffered lines are lost.
pub fn init_file(log_dir: &Path) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(log_dir, "assistant-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter())
        .with(layer)
        .init();

    tracing::debug!(dir = %log_dir.display(), "file logging initialized");
    guard
}

/// Stderr logging for `serve`.
pub fn init_stderr() {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter())
        .with(layer)
        .init();
}
