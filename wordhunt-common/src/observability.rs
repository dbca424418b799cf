//! Shared observability helpers for the binary and integration tests.
//!
//! The logging initializer centralises our `tracing` setup so that every
//! entrypoint emits into the same rolling file sink. Standard output belongs
//! to the query protocol, so events only ever go to the file and, when
//! requested, to `stderr`. If the file cannot be opened, `stderr` takes its
//! place. Call [`init_logging`] once near process start; additional callers
//! are treated as no-ops and simply receive the resolved log file path.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_SINK: OnceLock<Option<PathBuf>> = OnceLock::new();

const LOG_DIR_ENV: &str = "WORDHUNT_LOG_DIR";

/// Output encoding for structured logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Configuration passed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Logical name of the component (used for defaults and file names).
    pub app_name: &'static str,
    /// Optional explicit directory for log output. If `None`, we consult
    /// `WORDHUNT_LOG_DIR` and finally fall back to `~/.local/share/<app_name>`.
    pub log_dir: Option<PathBuf>,
    /// Whether to duplicate events to `stderr` in addition to the file sink.
    pub emit_stderr: bool,
    /// Preferred log encoding.
    pub format: LogFormat,
    /// Default filter applied when `RUST_LOG` is unset.
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: "wordhunt",
            log_dir: None,
            emit_stderr: false,
            format: LogFormat::Text,
            default_filter: "info".to_string(),
        }
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Returns the concrete log file path for the current day, or `None` when the
/// log directory cannot be created or written. In that case events go to
/// `stderr` only and a warning is logged; a broken log location never stops
/// the program. Subsequent calls are cheap and hand back the first result.
pub fn init_logging(config: LogConfig) -> anyhow::Result<Option<PathBuf>> {
    if let Some(sink) = LOG_SINK.get() {
        return Ok(sink.clone());
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let resolved_dir = resolve_log_dir(config.app_name, config.log_dir.as_deref());
    let log_filename = format!("{}.log", config.app_name);

    let sink = match open_file_sink(&resolved_dir, &log_filename) {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = LOG_GUARD.set(guard);

            let installed = match config.format {
                LogFormat::Text => tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().with_writer(writer).with_ansi(false))
                    .with(
                        config
                            .emit_stderr
                            .then(|| fmt::layer().with_writer(std::io::stderr)),
                    )
                    .try_init(),
                LogFormat::Json => tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json().with_writer(writer))
                    .with(
                        config
                            .emit_stderr
                            .then(|| fmt::layer().json().with_writer(std::io::stderr)),
                    )
                    .try_init(),
            };
            installed.map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;
            Some(daily_log_path(&resolved_dir, &log_filename))
        }
        Err(err) => {
            let installed = match config.format {
                LogFormat::Text => tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().with_writer(std::io::stderr))
                    .try_init(),
                LogFormat::Json => tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json().with_writer(std::io::stderr))
                    .try_init(),
            };
            installed.map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;
            tracing::warn!(
                log_dir = %resolved_dir.display(),
                error = %format!("{err:#}"),
                "logging.file_sink_unavailable"
            );
            None
        }
    };

    let _ = LOG_SINK.set(sink.clone());
    Ok(sink)
}

/// Create `dir` if needed and open today's file in it.
fn open_file_sink(dir: &Path, log_filename: &str) -> anyhow::Result<RollingFileAppender> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(log_filename)
        .build(dir)
        .with_context(|| format!("failed to open log file in {}", dir.display()))
}

/// Path of the file the daily appender writes to today (`<name>.<YYYY-MM-DD>`, UTC).
fn daily_log_path(dir: &Path, log_filename: &str) -> PathBuf {
    let today = Utc::now().format("%Y-%m-%d").to_string();
    dir.join(format!("{log_filename}.{today}"))
}

fn resolve_log_dir(app_name: &str, explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return expand_home(dir);
    }

    if let Ok(env_dir) = std::env::var(LOG_DIR_ENV) {
        return expand_home(Path::new(&env_dir));
    }

    default_data_dir(app_name)
}

fn expand_home(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}

fn default_data_dir(app_name: &str) -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(app_name)
    } else {
        PathBuf::from(".").join(app_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let tmp = tempfile::TempDir::new().unwrap();
        let resolved = resolve_log_dir("wordhunt", Some(tmp.path()));
        assert_eq!(resolved, tmp.path());
    }

    #[test]
    fn relative_paths_are_left_alone() {
        assert_eq!(expand_home(Path::new("logs/run")), PathBuf::from("logs/run"));
    }

    #[test]
    fn daily_path_carries_date_suffix() {
        let path = daily_log_path(Path::new("/var/log/wordhunt"), "wordhunt.log");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("wordhunt.log."));
        assert_eq!(name.len(), "wordhunt.log.".len() + "YYYY-MM-DD".len());
    }

    #[test]
    fn unusable_log_dir_is_reported_not_panicked() {
        let tmp = tempfile::TempDir::new().unwrap();
        let file = tmp.path().join("not-a-dir");
        std::fs::write(&file, b"occupied").unwrap();

        let err = open_file_sink(&file.join("logs"), "wordhunt.log").unwrap_err();
        assert!(format!("{err:#}").contains("failed to create log directory"));
    }

    #[test]
    fn file_sink_opens_in_fresh_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("logs");
        open_file_sink(&dir, "wordhunt.log").unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn log_format_parses_from_config_strings() {
        let json: LogFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(json, LogFormat::Json);
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }
}
