//! Error type shared by every fetch step.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T, E = FetchError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{} is not a zip file: {reason}", path.display())]
    InvalidArchive { path: PathBuf, reason: String },

    #[error("GET {url} returned HTTP {code}")]
    Http { url: String, code: u32 },

    #[error("transfer from {url} failed: {source}")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },

    #[error("unknown file type: {0}")]
    UnknownFileType(String),

    #[error("`{program}` exited with {status}")]
    Command { program: String, status: ExitStatus },

    #[error("checksum mismatch for {url}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        url: String,
        expected: String,
        actual: String,
    },

    #[error("failed to read zip entry: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl FetchError {
    /// Wrap an IO error with the path it happened on.
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| FetchError::Io { path, source }
    }

    pub(crate) fn curl(url: &str) -> impl FnOnce(curl::Error) -> Self + '_ {
        move |source| FetchError::Curl {
            url: url.to_string(),
            source,
        }
    }
}
