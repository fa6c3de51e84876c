//! URL modeling: cache keys and archive file names.
//!
//! The cache key is the URL with `/` and `:` flattened to `_`, so every cached
//! archive lives directly under the cache directory. The archive name (the last
//! URL path segment) decides how the archive is unpacked.

mod escape;
mod path;

pub use escape::escape_url;
pub use path::filename_from_url_path;

use crate::error::{FetchError, Result};

/// File name of the archive behind `url`, e.g. `foo-1.0.zip`.
pub fn archive_name(url: &str) -> Result<String> {
    let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    filename_from_url_path(&parsed).ok_or_else(|| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: "URL path has no file name".to_string(),
    })
}
