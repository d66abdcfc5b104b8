use std::fs;

use anyhow::{anyhow, Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wirepilot_core::ConfigPaths;

const LOG_ENV: &str = "WIREPILOT_LOG";
const DEFAULT_FILTER: &str = "info";

/// Logs to stderr and appends plain lines to the debug log. Keep the guard
/// alive until exit or buffered lines are lost.
pub fn init(paths: &ConfigPaths) -> Result<WorkerGuard> {
    fs::create_dir_all(&paths.logs_dir)
        .with_context(|| format!("create log dir {}", paths.logs_dir.display()))?;
    let file_name = paths
        .debug_log
        .file_name()
        .ok_or_else(|| anyhow!("debug log path has no file name"))?;
    let appender = tracing_appender::rolling::never(&paths.logs_dir, file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .map_err(|err| anyhow!("initialize logging: {err}"))?;

    Ok(guard)
}
