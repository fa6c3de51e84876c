//! Logging init: stderr by default, or an append-mode log file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,depfetch_core=debug,depfetch_cli=debug";

/// Where log records go.
#[derive(Debug, Clone)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Writer that is either a file or stderr (used when file clone fails).
enum FileOrStderr {
    File(fs::File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct FileMakeWriter(fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStderr::File)
            .unwrap_or(FileOrStderr::Stderr)
    }
}

fn open_log_file(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
/// A log file that cannot be opened falls back to stderr.
pub fn init_logging(target: LogTarget) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (writer, ansi, fallback_reason) = match &target {
        LogTarget::Stderr => (BoxMakeWriter::new(io::stderr), true, None),
        LogTarget::File(path) => match open_log_file(path) {
            Ok(file) => (BoxMakeWriter::new(FileMakeWriter(file)), false, None),
            Err(e) => (BoxMakeWriter::new(io::stderr), true, Some(e)),
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .init();

    match (target, fallback_reason) {
        (LogTarget::File(path), Some(e)) => {
            tracing::warn!("cannot open log file {}: {}; logging to stderr", path.display(), e);
        }
        (LogTarget::File(path), None) => {
            tracing::debug!("depfetch logging to {}", path.display());
        }
        (LogTarget::Stderr, _) => {}
    }
}
