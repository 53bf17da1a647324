//! Process-wide logging bootstrap.
//!
//! The library only emits through the `log` facade with `event=... module=...`
//! messages. Binaries call [`init_logging`] once at startup; without it every
//! log call is a no-op.
//!
//! # Invariants
//! - Initialization happens at most once per process and never panics.
//! - Repeating the call with the same level and destination is a no-op.
//! - Switching level or destination after startup is rejected.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;

const LOG_FILE_BASENAME: &str = "niview";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceLock<Mutex<Option<LoggingState>>> = OnceLock::new();

struct LoggingState {
    level: &'static str,
    log_dir: Option<PathBuf>,
    _logger: LoggerHandle,
}

/// Starts `flexi_logger` at `level`. Logs go to stderr, or to size-rotated
/// files under `log_dir` when one is given.
///
/// # Errors
/// - Unsupported level names.
/// - A log directory that cannot be created.
/// - A second call asking for a different level or destination.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<(), String> {
    let level = normalize_level(level)?;
    let log_dir = log_dir.map(Path::to_path_buf);

    let cell = LOGGING_STATE.get_or_init(|| Mutex::new(None));
    let mut state = cell
        .lock()
        .map_err(|_| "logging state lock poisoned".to_string())?;

    if let Some(active) = state.as_ref() {
        if active.log_dir != log_dir {
            return Err(format!(
                "logging already initialized at `{}`; refusing to switch to `{}`",
                describe(active.log_dir.as_deref()),
                describe(log_dir.as_deref())
            ));
        }
        if active.level != level {
            return Err(format!(
                "logging already initialized with level `{}`; refusing to switch to `{level}`",
                active.level
            ));
        }
        return Ok(());
    }

    let logger = Logger::try_with_str(level)
        .map_err(|error| format!("invalid log level `{level}`: {error}"))?;
    let logger = match log_dir.as_deref() {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|error| {
                format!("failed to create log directory `{}`: {error}", dir.display())
            })?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
        }
        None => logger.log_to_stderr(),
    };
    let handle = logger
        .start()
        .map_err(|error| format!("failed to start logger: {error}"))?;

    info!(
        "event=logging_init module=logging status=ok level={level} destination={} version={}",
        describe(log_dir.as_deref()),
        env!("CARGO_PKG_VERSION")
    );

    *state = Some(LoggingState {
        level,
        log_dir,
        _logger: handle,
    });
    Ok(())
}

/// `(level, log_dir)` of the active logger, `None` before [`init_logging`].
pub fn logging_status() -> Option<(&'static str, Option<PathBuf>)> {
    let state = LOGGING_STATE.get()?.lock().ok()?;
    state
        .as_ref()
        .map(|active| (active.level, active.log_dir.clone()))
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error|off"
        )),
    }
}

fn describe(log_dir: Option<&Path>) -> String {
    log_dir.map_or_else(|| "stderr".to_string(), |dir| dir.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, normalize_level};

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("INFO"), Ok("info"));
        assert_eq!(normalize_level(" warning "), Ok("warn"));
        assert_eq!(normalize_level("trace"), Ok("trace"));
        assert!(normalize_level("verbose").is_err());
    }

    #[test]
    fn init_is_idempotent_and_rejects_switches() {
        let dir = tempfile::tempdir().expect("tempdir");
        let logs = dir.path().join("logs");

        init_logging("info", Some(&logs)).expect("first init");
        init_logging("info", Some(&logs)).expect("repeat init");
        assert!(init_logging("debug", Some(&logs)).is_err());
        assert!(init_logging("info", None).is_err());
        assert!(logs.is_dir());

        let (level, log_dir) = logging_status().expect("status");
        assert_eq!(level, "info");
        assert_eq!(log_dir.as_deref(), Some(logs.as_path()));
    }
}
