//! Logging setup: stderr plus a per-session log file.
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber. Keep the returned guard alive for the
/// whole process, or buffered file output is lost.
pub fn setup_logging(session_id: Option<&str>) -> Result<WorkerGuard> {
    let session_id = session_id.map(str::to_string).unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{}", timestamp)
    });

    let session_log_dir = log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "bomber.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/bomber.log", session_log_dir.display());

    Ok(guard)
}

/// Platform cache directory for logs:
/// - macOS: `~/Library/Caches/bomber/logs`
/// - Linux: `~/.cache/bomber/logs` (or `$XDG_CACHE_HOME/bomber/logs`)
/// - Windows: `%LOCALAPPDATA%\bomber\cache\logs`
/// - Fallback: `/tmp/bomber/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "bomber")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/bomber"))
        .join("logs")
}
