//! Scheme handling for URL-like path strings.
//!
//! Root matching is scheme-agnostic: `http://host/root`, `https://host/root`
//! and `host/root` all name the same root. These helpers split off the
//! `scheme://` prefix without otherwise touching the string.

/// Separator between a scheme and the rest of a URL.
pub const SCHEME_SEPARATOR: &str = "://";

/// Split a URL into its scheme (if any) and the remainder.
///
/// Only the first `://` is considered.
///
/// # Examples
///
/// ```
/// use artpath::url::split_scheme;
///
/// assert_eq!(split_scheme("https://host/a"), (Some("https"), "host/a"));
/// assert_eq!(split_scheme("host/a"), (None, "host/a"));
/// ```
#[must_use]
pub fn split_scheme(url: &str) -> (Option<&str>, &str) {
    match url.split_once(SCHEME_SEPARATOR) {
        Some((scheme, rest)) => (Some(scheme), rest),
        None => (None, url),
    }
}

/// Byte length of the `scheme://` prefix of `url`, zero when there is none.
///
/// # Examples
///
/// ```
/// use artpath::url::scheme_prefix_len;
///
/// assert_eq!(scheme_prefix_len("https://host"), 8);
/// assert_eq!(scheme_prefix_len("host"), 0);
/// ```
#[must_use]
pub fn scheme_prefix_len(url: &str) -> usize {
    url.find(SCHEME_SEPARATOR)
        .map_or(0, |idx| idx + SCHEME_SEPARATOR.len())
}

/// Returns a URL without its `scheme://` prefix.
///
/// A URL that is nothing but a scheme (`"http://"`) yields the scheme name,
/// so the result is never empty unless the input is.
///
/// # Examples
///
/// ```
/// use artpath::url::protoless_url;
///
/// assert_eq!(protoless_url("http://custom/root"), "custom/root");
/// assert_eq!(protoless_url("custom/root"), "custom/root");
/// assert_eq!(protoless_url("http://"), "http");
/// ```
#[must_use]
pub fn protoless_url(url: &str) -> &str {
    match split_scheme(url) {
        (Some(scheme), "") => scheme,
        (_, rest) => rest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protoless_strips_any_scheme() {
        assert_eq!(protoless_url("https://artifactory.a.b/artifactory"), "artifactory.a.b/artifactory");
        assert_eq!(protoless_url("ftp://x"), "x");
    }

    #[test]
    fn test_protoless_only_first_separator() {
        assert_eq!(protoless_url("http://a/b://c"), "a/b://c");
    }

    #[test]
    fn test_protoless_empty() {
        assert_eq!(protoless_url(""), "");
    }

    #[test]
    fn test_scheme_prefix_len_matches_split() {
        for url in ["http://a/b", "a/b", "https://", "s3://bucket/key"] {
            let (_, rest) = split_scheme(url);
            assert_eq!(scheme_prefix_len(url), url.len() - rest.len());
        }
    }
}
