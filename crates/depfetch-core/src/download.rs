//! Single-stream HTTP GET into a cache entry.
//!
//! Only the connect phase has a timeout; a stalled transfer blocks until the
//! server closes the connection or the process is terminated.

use crate::cache::CacheWriter;
use crate::error::{FetchError, Result};
use crate::progress::ProgressHandler;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct DownloadOptions {
    pub connect_timeout: Duration,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
        }
    }
}

/// Streams `url` into `writer`, reporting progress to `progress`.
/// Returns the number of bytes written. The writer is left uncommitted.
pub fn download_to(
    url: &str,
    name: &str,
    writer: &mut CacheWriter,
    options: DownloadOptions,
    progress: &dyn ProgressHandler,
) -> Result<u64> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(FetchError::curl(url))?;
    easy.follow_location(true).map_err(FetchError::curl(url))?;
    easy.max_redirections(10).map_err(FetchError::curl(url))?;
    easy.connect_timeout(options.connect_timeout)
        .map_err(FetchError::curl(url))?;
    easy.progress(true).map_err(FetchError::curl(url))?;

    progress.on_download_start(name, url);

    let mut write_err: Option<FetchError> = None;
    let perform_result = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match writer.write_chunk(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    tracing::warn!("cache write failed: {}", e);
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })
            .map_err(FetchError::curl(url))?;
        transfer
            .progress_function(|dltotal, dlnow, _, _| {
                let total = (dltotal > 0.0).then_some(dltotal as u64);
                progress.on_download_progress(dlnow as u64, total);
                true
            })
            .map_err(FetchError::curl(url))?;
        transfer.perform()
    };

    if let Some(e) = write_err {
        return Err(e);
    }
    perform_result.map_err(FetchError::curl(url))?;

    let code = easy.response_code().map_err(FetchError::curl(url))?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http {
            url: url.to_string(),
            code,
        });
    }

    let written = writer.bytes_written();
    progress.on_download_complete(written);
    Ok(written)
}
