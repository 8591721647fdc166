//! Logging init.
//!
//! Logs go to stderr unless `--log-file` is passed, since the job normally
//! runs under a CI runner that captures stderr. The file sink appends to
//! `$XDG_STATE_HOME/icon-mirror/icon-mirror.log`.

use anyhow::Result;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,icon_mirror_core=debug,icon_mirror=debug";

/// Per-event sink for the log file. Falls back to stderr for an event whose
/// file handle could not be cloned, so no log line is dropped.
enum LogSink {
    File(fs::File),
    Stderr(io::Stderr),
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr(e) => e.flush(),
        }
    }
}

struct LogFile(fs::File);

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => LogSink::File(f),
            Err(_) => LogSink::Stderr(io::stderr()),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("icon-mirror")?;
    Ok(xdg_dirs
        .get_state_home()
        .join("icon-mirror")
        .join("icon-mirror.log"))
}

/// Sends logs to the state-dir file and returns its path. Errors (no state
/// dir, unwritable file) leave no subscriber installed, so the CLI can
/// still call [`init_logging_stderr`].
pub fn init_file_logging() -> Result<PathBuf> {
    let log_file_path = log_file_path()?;
    if let Some(dir) = log_file_path.parent() {
        fs::create_dir_all(dir)?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    let writer: BoxMakeWriter = BoxMakeWriter::new(LogFile(file));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!("icon-mirror logging initialized at {}", log_file_path.display());

    Ok(log_file_path)
}

/// Default sink: plain (no ANSI) lines on stderr.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
