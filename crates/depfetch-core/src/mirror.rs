//! Near-cache mirror probing.
//!
//! Mirrors are URL templates expanded with the cache key and archive name.
//! Each one is probed with a short HEAD request; the first that answers 2xx
//! replaces the canonical URL for the download. Probing is best-effort: a
//! mirror that is down, slow, or missing the file is simply skipped.

use crate::error::{FetchError, Result};
use std::str;
use std::time::Duration;

/// Metadata returned by a HEAD probe.
#[derive(Debug, Clone)]
pub struct HeadResult {
    pub status: u32,
    /// Total size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
}

/// Substitute `{escaped}` and `{name}` in a mirror template.
pub fn expand_template(template: &str, escaped: &str, name: &str) -> String {
    template.replace("{escaped}", escaped).replace("{name}", name)
}

/// Performs a HEAD request with `timeout` covering connect and response.
///
/// Follows redirects. Non-2xx responses are errors.
pub fn probe(url: &str, timeout: Duration) -> Result<HeadResult> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(FetchError::curl(url))?;
    easy.nobody(true).map_err(FetchError::curl(url))?; // HEAD request
    easy.follow_location(true).map_err(FetchError::curl(url))?;
    easy.connect_timeout(timeout).map_err(FetchError::curl(url))?;
    easy.timeout(timeout).map_err(FetchError::curl(url))?;

    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })
            .map_err(FetchError::curl(url))?;
        transfer.perform().map_err(FetchError::curl(url))?;
    }

    let code = easy.response_code().map_err(FetchError::curl(url))?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http {
            url: url.to_string(),
            code,
        });
    }

    Ok(HeadResult {
        status: code,
        content_length: parse_content_length(&headers),
    })
}

/// Last `Content-Length` seen; after redirects the final response comes last.
fn parse_content_length(lines: &[String]) -> Option<u64> {
    lines
        .iter()
        .filter_map(|line| line.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .filter_map(|(_, value)| value.trim().parse::<u64>().ok())
        .last()
}

/// Returns the first mirror that answers the probe, or `None` to use the canonical URL.
pub fn select_mirror(
    templates: &[String],
    escaped: &str,
    name: &str,
    timeout: Duration,
) -> Option<String> {
    for template in templates {
        let candidate = expand_template(template, escaped, name);
        match probe(&candidate, timeout) {
            Ok(head) => {
                tracing::info!("using near cache: {}", candidate);
                tracing::debug!(status = head.status, size = ?head.content_length, "mirror probe ok");
                return Some(candidate);
            }
            Err(e) => tracing::debug!("near cache {} unavailable: {}", candidate, e),
        }
    }
    None
}
