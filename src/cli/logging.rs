//! Tracing subscriber setup.

use super::CliError;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "outpost=info";

/// Where log lines go.
#[derive(Debug, Clone, Copy)]
pub(crate) enum LogSink<'a> {
    /// Standard error.
    Stderr,
    /// Append to a file.
    File(&'a Path),
    /// Nowhere.
    Disabled,
}

impl<'a> LogSink<'a> {
    /// The TUI owns the terminal, so it only logs to a file if given one.
    pub(crate) fn for_tui(log_file: Option<&'a Path>) -> Self {
        log_file.map_or(Self::Disabled, Self::File)
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub(crate) fn init(sink: LogSink<'_>) -> Result<(), CliError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match sink {
        LogSink::Disabled => return Ok(()),
        LogSink::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogSink::File(path) => {
            let file = File::options().create(true).append(true).open(path).map_err(|e| {
                CliError::new(format!("Failed to open log file {}: {e}", path.display()))
            })?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
    };
    installed.map_err(|e| CliError::new(format!("Failed to install logger: {e}")))
}
