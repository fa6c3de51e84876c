pub mod config;
pub mod error;
pub mod logging;

pub mod archive_kind;
pub mod cache;
pub mod checksum;
pub mod download;
pub mod extract;
pub mod fetcher;
pub mod installer;
pub mod mirror;
pub mod progress;
pub mod url_model;

pub use archive_kind::ArchiveKind;
pub use error::{FetchError, Result};
pub use fetcher::{FetchOptions, FetchOutcome, Fetcher, FetcherBuilder};
pub use progress::{ProgressHandler, TracingProgress};
