//! Filename extraction from URL path.

/// Extracts the last path segment from a parsed URL.
///
/// Returns `None` if the path is empty/root or the segment is `.`/`..`.
pub fn filename_from_url_path(url: &url::Url) -> Option<String> {
    let segment = url.path().split('/').filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(u: &str) -> Option<String> {
        filename_from_url_path(&url::Url::parse(u).unwrap())
    }

    #[test]
    fn normal() {
        assert_eq!(
            name("https://example.com/a/b/file.tar.gz").as_deref(),
            Some("file.tar.gz")
        );
        assert_eq!(name("https://example.com/single").as_deref(), Some("single"));
    }

    #[test]
    fn root_or_empty() {
        assert_eq!(name("https://example.com/"), None);
        assert_eq!(name("https://example.com"), None);
    }

    #[test]
    fn with_query_and_trailing_slash() {
        assert_eq!(
            name("https://example.com/file.zip?token=abc").as_deref(),
            Some("file.zip")
        );
        assert_eq!(name("https://example.com/dir/").as_deref(), Some("dir"));
    }
}
