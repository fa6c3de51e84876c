/// Flatten `url` into a single file name by replacing `/` and `:` with `_`.
pub fn escape_url(url: &str) -> String {
    url.replace(['/', ':'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_slashes_and_colons() {
        assert_eq!(
            escape_url("https://example.com/pkg/foo-1.0.zip"),
            "https___example.com_pkg_foo-1.0.zip"
        );
        assert_eq!(escape_url("http://host:9000/a"), "http___host_9000_a");
    }

    #[test]
    fn deterministic() {
        let u = "https://github.com/org/repo/releases/download/v1/tool.tar.gz";
        assert_eq!(escape_url(u), escape_url(u));
        assert!(!escape_url(u).contains('/'));
        assert!(!escape_url(u).contains(':'));
    }

    #[test]
    fn distinct_slash_patterns_give_distinct_keys() {
        let a = escape_url("https://example.com/a/b.zip");
        let b = escape_url("https://example.com/ab.zip");
        let c = escape_url("https://example.com/a/b/c.zip");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn other_characters_untouched() {
        assert_eq!(escape_url("foo-1.0?x=y&z"), "foo-1.0?x=y&z");
    }
}
