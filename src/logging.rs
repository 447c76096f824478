use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use time::UtcOffset;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{self, fmt, prelude::*};

const LOG_RETENTION_DAYS: u64 = 7;

/// Get the log directory path in the user-specific OS cache directory
/// - Linux: ~/.cache/word-completer/
/// - macOS: ~/Library/Caches/word-completer/
/// - Windows: %LOCALAPPDATA%\word-completer\
fn get_log_dir() -> io::Result<PathBuf> {
    let mut log_dir = dirs::cache_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Unable to determine user cache directory")
    })?;
    log_dir.push("word-completer");

    if !log_dir.exists() {
        fs::create_dir_all(&log_dir)?;
    }

    Ok(log_dir)
}

/// Clean up session logs older than LOG_RETENTION_DAYS
fn cleanup_old_logs(log_dir: &Path) {
    let now = std::time::SystemTime::now();
    let retention = std::time::Duration::from_secs(LOG_RETENTION_DAYS * 24 * 60 * 60);

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !(name.starts_with("session-") && name.ends_with(".log")) {
            continue;
        }
        let age = entry
            .metadata()
            .and_then(|metadata| metadata.modified())
            .ok()
            .and_then(|modified| now.duration_since(modified).ok());
        if age.is_some_and(|age| age > retention) {
            if let Err(e) = fs::remove_file(entry.path()) {
                eprintln!("Failed to remove old log file {:?}: {}", entry.path(), e);
            }
        }
    }
}

/// True when a global subscriber or `log` logger was installed before us.
///
/// `try_init` sets the tracing dispatcher first and then bridges `log`
/// records, so either step may report the conflict.
fn is_already_set(e: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(e);
    while let Some(error) = current {
        let message = error.to_string();
        if message.contains("already been set")
            || message.contains("already initialized")
            || message.contains("SetLoggerError")
        {
            return true;
        }
        current = error.source();
    }
    false
}

/// Initialize logging to stderr and, optionally, a per-session file.
///
/// Returns a guard that must be kept alive for the duration of the program so
/// buffered file output is flushed.
///
/// # Arguments
/// * `no_color` - Disable ANSI colors in stderr output
/// * `log_level` - Override log level (otherwise uses RUST_LOG or defaults to "info")
/// * `enable_file_logging` - Also log at DEBUG level to a session file in the cache directory
pub fn init_logger(
    no_color: bool,
    log_level: Option<&str>,
    enable_file_logging: bool,
) -> io::Result<WorkerGuard> {
    let timer = fmt::time::OffsetTime::new(
        UtcOffset::UTC,
        format_description!(
            "[[[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z]"
        ),
    );

    let stderr_filter = match log_level {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(timer.clone())
        .with_ansi(!no_color)
        .with_filter(stderr_filter);

    if !enable_file_logging {
        let (_, guard) = tracing_appender::non_blocking(std::io::sink());
        return match tracing_subscriber::registry().with(stderr_layer).try_init() {
            Ok(()) => Ok(guard),
            Err(e) if is_already_set(&e) => Ok(guard),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
        };
    }

    let log_dir = get_log_dir()?;
    cleanup_old_logs(&log_dir);

    let session_format = format_description!("[year][month][day]-[hour][minute][second]");
    let timestamp = time::OffsetDateTime::now_utc()
        .format(session_format)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    let log_path = log_dir.join(format!("session-{}-{}.log", timestamp, std::process::id()));

    let file = fs::OpenOptions::new().create(true).append(true).open(&log_path)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_timer(timer)
        .with_ansi(false)
        .with_filter(tracing_subscriber::EnvFilter::new("debug"));

    match tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
    {
        Ok(()) => {
            eprintln!("Logging to file: {:?}", log_path);
            Ok(guard)
        }
        Err(e) if is_already_set(&e) => Ok(guard),
        Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
    }
}
