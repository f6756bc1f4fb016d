/// Logging configuration.
///
/// Logs go to stderr by default. When a log directory is configured
/// (`--log-dir` or `CHAT_WEEK_LOG_DIR`) they are appended to
/// `{log_dir}/chat-week.log` instead, with a separator per run.
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable naming the log directory.
pub const LOG_DIR_ENV: &str = "CHAT_WEEK_LOG_DIR";

/// Log file name inside the log directory.
pub const LOG_FILE_NAME: &str = "chat-week.log";

/// Resolve the log directory: explicit flag first, then the environment.
pub fn resolve_log_dir(flag: Option<PathBuf>) -> Option<PathBuf> {
    flag.or_else(|| std::env::var_os(LOG_DIR_ENV).map(PathBuf::from))
}

fn default_filter() -> EnvFilter {
    // Default to INFO level, but allow override via RUST_LOG env var
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes logging to stderr.
pub fn init_stderr_logging() {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(default_filter())
        .with(stderr_layer)
        .try_init()
        .ok(); // Ignore error if already initialized
}

/// Initializes logging to `{log_dir}/chat-week.log`.
///
/// # Arguments
///
/// * `log_dir` - Directory for the log file, created if missing
/// * `source` - Chat export being analysed, written into the run separator
pub fn init_file_logging(log_dir: &Path, source: &str) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    // Write run separator with timestamp before the subscriber takes the file
    let separator = format!(
        "\n{sep}\n[{ts}] New analysis run: {source}\n{sep}\n",
        sep = "=".repeat(80),
        ts = chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        source = source
    );

    use std::io::Write;
    if let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE_NAME))
    {
        let _ = writeln!(file, "{}", separator);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI codes in log files
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(default_filter())
        .with(file_layer)
        .try_init()
        .ok();

    tracing::info!("File logging initialized for: {}", source);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_environment() {
        let dir = resolve_log_dir(Some(PathBuf::from("/tmp/from-flag")));
        assert_eq!(dir, Some(PathBuf::from("/tmp/from-flag")));
    }
}
