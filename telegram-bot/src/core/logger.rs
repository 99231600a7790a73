//! Logging initialization: human-readable lines (timestamp, level, target, message, fields) to stdout and the log file.

use std::io;
use std::path::Path;
use std::sync::Mutex;

use file_rotate::{compression::Compression, suffix::AppendCount, ContentLimit, FileRotate};
use tracing_subscriber::{
    fmt::format::{Format, Full, Writer},
    fmt::time::FormatTime,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// The log file rotates past this size.
pub const LOG_MAX_BYTES: usize = 5 * 1024 * 1024;
/// Rotated files kept next to the log file (`bot.log.1` .. `bot.log.3`).
pub const LOG_BACKUPS: usize = 3;

/// Directives for the file layer. HTTP internals and the completion client stay at info, so
/// request bodies (chat history, inline images) never reach the file.
const FILE_FILTER: &str =
    "debug,openai_client=info,async_openai=info,hyper=info,hyper_util=info,h2=info,rustls=info,reqwest=info";

/// Local time in `YYYY-MM-DD HH:MM:SS` for human-readable log lines.
struct ChronoLocal;

impl FormatTime for ChronoLocal {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let t = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        write!(w, "{} ", t)
    }
}

fn event_format() -> Format<Full, ChronoLocal> {
    tracing_subscriber::fmt::format()
        .with_timer(ChronoLocal)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(false)
}

fn file_filter() -> EnvFilter {
    EnvFilter::new(FILE_FILTER)
}

/// Append-mode writer for `path` that rolls over to `path.1` (older files shift up) once
/// `max_bytes` are written, keeping at most `backups` old files.
pub fn rotating_log_writer(
    path: &Path,
    max_bytes: usize,
    backups: usize,
) -> io::Result<FileRotate<AppendCount>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(FileRotate::new(
        path,
        AppendCount::new(backups),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    ))
}

/// Initializes the global tracing subscriber.
///
/// Format: `YYYY-MM-DD HH:MM:SS LEVEL target: message key=value ...`, no ANSI codes.
/// Stdout is filtered by `RUST_LOG` (default `info`). The log file records `debug` and above
/// and rotates at [`LOG_MAX_BYTES`] keeping [`LOG_BACKUPS`] files. Load `.env` before calling.
pub fn init_tracing(log_file_path: &str) -> anyhow::Result<()> {
    let file = rotating_log_writer(Path::new(log_file_path), LOG_MAX_BYTES, LOG_BACKUPS)?;

    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .event_format(event_format())
        .with_ansi(false)
        .with_filter(stdout_filter);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .event_format(event_format())
        .with_ansi(false)
        .with_filter(file_filter());

    Registry::default()
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}
