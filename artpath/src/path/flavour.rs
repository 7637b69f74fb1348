//! Root resolution.
//!
//! A path string carries no explicit marker for where the repository root
//! ends, so [`Flavour::split_root`] decides it with a fixed priority of
//! strategies:
//!
//! 1. [`RootStrategy::Registered`]: the first registry root prefixing the path
//!    on a segment boundary
//! 2. [`RootStrategy::LiteralSegment`]: up to the first `artifactory` segment
//! 3. [`RootStrategy::Bare`]: no separator at all, so no root
//! 4. [`RootStrategy::Authority`]: `scheme://host` (or the first segment)
//!
//! Every string resolves to something; the engine has no failure mode.

use std::fmt;

use crate::config::{RootEntry, RootRegistry};
use crate::path::parsed::ParsedPath;
use crate::url::scheme_prefix_len;

/// Path separator.
pub const SEPARATOR: char = '/';

/// Segment that marks the end of a repository root when no registered root
/// matches.
pub const LITERAL_ROOT_SEGMENT: &str = "artifactory";

/// How the root of a path was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RootStrategy {
    /// Matched a root registered in the [`RootRegistry`].
    Registered,
    /// Ended at the first literal `artifactory` segment.
    LiteralSegment,
    /// Fell back to the scheme and authority.
    Authority,
    /// The path has no separator; it is a single relative component.
    Bare,
    /// The path is empty or consists only of separators.
    #[default]
    Empty,
}

impl fmt::Display for RootStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registered => write!(f, "registered"),
            Self::LiteralSegment => write!(f, "literal-segment"),
            Self::Authority => write!(f, "authority"),
            Self::Bare => write!(f, "bare"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// Result of [`Flavour::split_root`].
///
/// `root + dir_marker + tail` reconstructs the input minus one trailing
/// separator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitRoot {
    /// Repository root, without a trailing separator.
    pub root: String,
    /// First segment below the root as `/segment/`, or empty.
    pub dir_marker: String,
    /// Everything after the directory marker, unsplit.
    pub tail: String,
    /// Which strategy produced `root`.
    pub strategy: RootStrategy,
}

impl SplitRoot {
    /// The `(root, dir_marker, tail)` triple.
    #[must_use]
    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.root, &self.dir_marker, &self.tail)
    }
}

/// Byte length of the root if `path` starts with a registered root.
///
/// Uses [`RootRegistry::search_with_len`], so a registered `host/root` does
/// not claim `host/rootless` and a later `host/rootless` entry still can.
#[must_use]
pub fn registered_root_len(registry: &RootRegistry, path: &str) -> Option<usize> {
    registry.search_with_len(path).map(|(_, len)| len)
}

/// Byte length up to and including the first whole `artifactory` segment.
///
/// # Examples
///
/// ```
/// use artpath::path::flavour::literal_root_len;
///
/// let path = "http://artifactory.local/artifactory/foo";
/// assert_eq!(literal_root_len(path).map(|n| &path[..n]), Some("http://artifactory.local/artifactory"));
/// assert_eq!(literal_root_len("http://artifactory.local/foo"), None);
/// ```
#[must_use]
pub fn literal_root_len(path: &str) -> Option<usize> {
    let mut offset = 0;
    for segment in path.split(SEPARATOR) {
        let end = offset + segment.len();
        if segment == LITERAL_ROOT_SEGMENT {
            return Some(end);
        }
        offset = end + SEPARATOR.len_utf8();
    }
    None
}

/// Byte length of the scheme and authority, or of the first segment when
/// there is no scheme. `None` when `path` has no separator.
///
/// # Examples
///
/// ```
/// use artpath::path::flavour::authority_root_len;
///
/// let path = "https://foo.bar.com/some-repository";
/// assert_eq!(authority_root_len(path).map(|n| &path[..n]), Some("https://foo.bar.com"));
/// assert_eq!(authority_root_len("example1.com"), None);
/// ```
#[must_use]
pub fn authority_root_len(path: &str) -> Option<usize> {
    if !path.contains(SEPARATOR) {
        return None;
    }
    let prefix = scheme_prefix_len(path);
    Some(
        path[prefix..]
            .find(SEPARATOR)
            .map_or(path.len(), |idx| prefix + idx),
    )
}

/// Split `path` into its segment components, dropping empty and `.` ones.
fn components(tail: &str) -> Vec<String> {
    tail.split(SEPARATOR)
        .filter(|part| !part.is_empty() && *part != ".")
        .map(str::to_string)
        .collect()
}

/// The root resolution engine, bound to a registry.
///
/// # Examples
///
/// ```
/// use artpath::config::RootRegistry;
/// use artpath::path::Flavour;
///
/// let registry = RootRegistry::new();
/// let flavour = Flavour::new(&registry);
///
/// let split = flavour.split_root("https://artifactory.a.b.c.d/artifactory/foo/bar");
/// assert_eq!(
///     split.as_tuple(),
///     ("https://artifactory.a.b.c.d/artifactory", "/foo/", "bar")
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Flavour<'r> {
    registry: &'r RootRegistry,
}

impl<'r> Flavour<'r> {
    /// Create an engine that consults `registry`.
    #[must_use]
    pub fn new(registry: &'r RootRegistry) -> Self {
        Self { registry }
    }

    /// The registry this engine consults.
    #[must_use]
    pub fn registry(&self) -> &'r RootRegistry {
        self.registry
    }

    /// Decide which strategy applies to `path` and how long its root is.
    ///
    /// `path` is expected without a trailing separator.
    #[must_use]
    pub fn decide(&self, path: &str) -> (RootStrategy, usize) {
        let (strategy, len, _) = self.decide_with_entry(path);
        (strategy, len)
    }

    fn decide_with_entry(&self, path: &str) -> (RootStrategy, usize, Option<&'r RootEntry>) {
        if path.chars().all(|c| c == SEPARATOR) {
            return (RootStrategy::Empty, 0, None);
        }
        if let Some((entry, len)) = self.registry.search_with_len(path) {
            return (RootStrategy::Registered, len, Some(entry));
        }
        if let Some(len) = literal_root_len(path) {
            return (RootStrategy::LiteralSegment, len, None);
        }
        match authority_root_len(path) {
            Some(len) => (RootStrategy::Authority, len, None),
            None => (RootStrategy::Bare, 0, None),
        }
    }

    /// Split `path` into root, directory marker and unsplit tail.
    ///
    /// A single trailing separator is ignored, so `split_root(s)` and
    /// `split_root(s + "/")` agree.
    #[must_use]
    pub fn split_root(&self, path: &str) -> SplitRoot {
        self.split_root_with_entry(path).0
    }

    /// Like [`split_root`](Self::split_root), also returning the registry
    /// entry that decided the root.
    ///
    /// The entry is `Some` exactly when the strategy is
    /// [`RootStrategy::Registered`].
    #[must_use]
    pub fn split_root_with_entry(&self, path: &str) -> (SplitRoot, Option<&'r RootEntry>) {
        let path = path.strip_suffix(SEPARATOR).unwrap_or(path);
        let (strategy, root_len, entry) = self.decide_with_entry(path);

        let split = match strategy {
            RootStrategy::Empty => SplitRoot::default(),
            RootStrategy::Bare => SplitRoot {
                tail: path.to_string(),
                strategy,
                ..SplitRoot::default()
            },
            _ => {
                let root = path[..root_len].trim_end_matches(SEPARATOR);
                let rest = path[root_len..].trim_start_matches(SEPARATOR);
                let (dir, tail) = rest.split_once(SEPARATOR).unwrap_or((rest, ""));
                SplitRoot {
                    root: root.to_string(),
                    dir_marker: if dir.is_empty() {
                        String::new()
                    } else {
                        format!("{SEPARATOR}{dir}{SEPARATOR}")
                    },
                    tail: tail.to_string(),
                    strategy,
                }
            }
        };

        log::debug!(
            "split {path:?} via {strategy}: root={:?} marker={:?} tail={:?}",
            split.root,
            split.dir_marker,
            split.tail
        );
        (split, entry)
    }

    /// Join `parts` with the separator and parse the result.
    ///
    /// Components after the directory marker are split on the separator;
    /// empty and `.` components are dropped and `..` is kept verbatim.
    ///
    /// # Examples
    ///
    /// ```
    /// use artpath::config::RootRegistry;
    /// use artpath::path::Flavour;
    ///
    /// let registry = RootRegistry::new();
    /// let parsed = Flavour::new(&registry).parse_parts(["http://b/artifactory/c/d.xml"]);
    ///
    /// assert_eq!(parsed.root(), "http://b/artifactory");
    /// assert_eq!(parsed.dir_marker(), "/c/");
    /// assert_eq!(parsed.parts(), ["http://b/artifactory/c/", "d.xml"]);
    /// ```
    #[must_use]
    pub fn parse_parts<I, S>(&self, parts: I) -> ParsedPath
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = parts
            .into_iter()
            .map(|part| part.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(&SEPARATOR.to_string());
        self.parse(&joined)
    }

    /// Parse a single path string.
    #[must_use]
    pub fn parse(&self, path: &str) -> ParsedPath {
        self.parse_with_entry(path).0
    }

    /// Parse `path` and report the registry entry that decided its root.
    #[must_use]
    pub fn parse_with_entry(&self, path: &str) -> (ParsedPath, Option<&'r RootEntry>) {
        let (split, entry) = self.split_root_with_entry(path);
        let parsed = ParsedPath::new(split.root, split.dir_marker, components(&split.tail));
        (parsed, entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawRootConfig;

    fn custom_registry() -> RootRegistry {
        let mut registry = RootRegistry::new();
        registry.load_yaml("---\nhttp://custom/root: {}\n").unwrap();
        registry
    }

    fn check(registry: &RootRegistry, path: &str, expected: (&str, &str, &str)) {
        let split = Flavour::new(registry).split_root(path);
        assert_eq!(split.as_tuple(), expected, "split_root({path:?})");
    }

    #[test]
    fn test_split_root() {
        let registry = custom_registry();
        let cases = [
            (".com", ("", "", ".com")),
            ("example1.com", ("", "", "example1.com")),
            ("example2.com/artifactory", ("example2.com/artifactory", "", "")),
            ("example2.com/artifactory/", ("example2.com/artifactory", "", "")),
            ("example3.com/artifactory/foo", ("example3.com/artifactory", "/foo/", "")),
            ("example3.com/artifactory/foo/bar", ("example3.com/artifactory", "/foo/", "bar")),
            (
                "artifactory.local/artifactory/foo/bar",
                ("artifactory.local/artifactory", "/foo/", "bar"),
            ),
            (
                "http://artifactory.local/artifactory/foo/bar",
                ("http://artifactory.local/artifactory", "/foo/", "bar"),
            ),
            (
                "https://artifactory.a.b.c.d/artifactory/foo/bar",
                ("https://artifactory.a.b.c.d/artifactory", "/foo/", "bar"),
            ),
        ];
        for (path, expected) in cases {
            check(&registry, path, expected);
        }
    }

    #[test]
    fn test_split_root_custom_root() {
        let registry = custom_registry();
        let cases = [
            ("http://custom/root", ("http://custom/root", "", "")),
            ("custom/root", ("custom/root", "", "")),
            ("https://custom/root", ("https://custom/root", "", "")),
            ("http://custom/root/", ("http://custom/root", "", "")),
            ("http://custom/root/artifactory", ("http://custom/root", "/artifactory/", "")),
            ("http://custom/root/foo/bar", ("http://custom/root", "/foo/", "bar")),
            ("https://foo.bar.com/some-repository/", ("https://foo.bar.com", "/some-repository/", "")),
            ("https://custom/root/foo/baz", ("https://custom/root", "/foo/", "baz")),
        ];
        for (path, expected) in cases {
            check(&registry, path, expected);
        }
    }

    #[test]
    fn test_strategy_reported() {
        let registry = custom_registry();
        let flavour = Flavour::new(&registry);
        assert_eq!(flavour.split_root("custom/root/x").strategy, RootStrategy::Registered);
        assert_eq!(flavour.split_root("h/artifactory/x").strategy, RootStrategy::LiteralSegment);
        assert_eq!(flavour.split_root("http://h/x").strategy, RootStrategy::Authority);
        assert_eq!(flavour.split_root("file.txt").strategy, RootStrategy::Bare);
        assert_eq!(flavour.split_root("//").strategy, RootStrategy::Empty);
    }

    #[test]
    fn test_empty_inputs() {
        let registry = RootRegistry::new();
        for path in ["", "/", "//", "////"] {
            check(&registry, path, ("", "", ""));
        }
    }

    #[test]
    fn test_literal_segment_is_case_sensitive_and_whole() {
        let registry = RootRegistry::new();
        check(&registry, "http://h/Artifactory/x/y", ("http://h", "/Artifactory/", "x/y"));
        check(&registry, "http://h/my-artifactory/x", ("http://h", "/my-artifactory/", "x"));
    }

    #[test]
    fn test_literal_segment_first_occurrence() {
        let registry = RootRegistry::new();
        check(
            &registry,
            "http://h/artifactory/foo/artifactory/bar",
            ("http://h/artifactory", "/foo/", "artifactory/bar"),
        );
    }

    #[test]
    fn test_registered_root_preserves_caller_scheme() {
        let mut registry = RootRegistry::new();
        registry
            .load([("https://Host/Base/", RawRootConfig::default())])
            .unwrap();
        check(&registry, "http://Host/Base/repo/x", ("http://Host/Base", "/repo/", "x"));
    }

    #[test]
    fn test_registered_root_requires_segment_boundary() {
        let registry = custom_registry();
        check(&registry, "http://custom/rootless/a", ("http://custom", "/rootless/", "a"));
    }

    #[test]
    fn test_later_registered_root_matches_after_boundary_miss() {
        let mut registry = RootRegistry::new();
        registry
            .load_yaml("http://h/root: {}\nhttp://h/rootless: {}\n")
            .unwrap();
        let flavour = Flavour::new(&registry);

        let (split, entry) = flavour.split_root_with_entry("http://h/rootless/repo/x");
        assert_eq!(split.as_tuple(), ("http://h/rootless", "/repo/", "x"));
        assert_eq!(split.strategy, RootStrategy::Registered);
        assert_eq!(entry.map(RootEntry::url), Some("http://h/rootless"));

        let (split, entry) = flavour.split_root_with_entry("http://h/root/repo/x");
        assert_eq!(split.as_tuple(), ("http://h/root", "/repo/", "x"));
        assert_eq!(entry.map(RootEntry::url), Some("http://h/root"));

        assert_eq!(registered_root_len(&registry, "http://h/rootless/repo"), Some(17));
        assert_eq!(registered_root_len(&registry, "http://h/rooted/repo"), None);
    }

    #[test]
    fn test_entry_reported_only_for_registered_strategy() {
        let registry = custom_registry();
        let flavour = Flavour::new(&registry);
        for path in ["http://custom/rootless/a", "h/artifactory/x", "file.txt", "/"] {
            let (split, entry) = flavour.split_root_with_entry(path);
            assert_ne!(split.strategy, RootStrategy::Registered, "{path}");
            assert!(entry.is_none(), "{path}");
        }
    }

    #[test]
    fn test_registered_root_beats_literal_segment() {
        let mut registry = RootRegistry::new();
        registry
            .load([("http://h/artifactory/nested", RawRootConfig::default())])
            .unwrap();
        check(
            &registry,
            "http://h/artifactory/nested/repo/file",
            ("http://h/artifactory/nested", "/repo/", "file"),
        );
    }

    #[test]
    fn test_authority_without_scheme() {
        let registry = RootRegistry::new();
        check(&registry, "host/repo/a/b", ("host", "/repo/", "a/b"));
        check(&registry, "/repo/a", ("", "/repo/", "a"));
    }

    #[test]
    fn test_reassembly() {
        let registry = custom_registry();
        let flavour = Flavour::new(&registry);
        for path in [
            "http://custom/root/foo/baz/qux",
            "https://h/artifactory/r/a/b.txt",
            "host/repo/x",
            "http://h",
            "plain",
        ] {
            let split = flavour.split_root(path);
            let rebuilt = format!("{}{}{}", split.root, split.dir_marker, split.tail);
            let rebuilt = if split.dir_marker.is_empty() || !split.tail.is_empty() {
                rebuilt
            } else {
                rebuilt.trim_end_matches(SEPARATOR).to_string()
            };
            assert_eq!(rebuilt, path);
        }
    }

    #[test]
    fn test_parse_parts() {
        let registry = custom_registry();
        let flavour = Flavour::new(&registry);
        let cases: [(&[&str], (&str, &str, Vec<&str>)); 5] = [
            (&[".txt"], ("", "", vec![".txt"])),
            (
                &["http://b/artifactory/c/d.xml"],
                ("http://b/artifactory", "/c/", vec!["http://b/artifactory/c/", "d.xml"]),
            ),
            (
                &["http://example.com/artifactory/foo"],
                ("http://example.com/artifactory", "/foo/", vec!["http://example.com/artifactory/foo/"]),
            ),
            (
                &["http://example.com/artifactory/foo/bar"],
                (
                    "http://example.com/artifactory",
                    "/foo/",
                    vec!["http://example.com/artifactory/foo/", "bar"],
                ),
            ),
            (
                &["http://example.com/artifactory/foo/bar/artifactory"],
                (
                    "http://example.com/artifactory",
                    "/foo/",
                    vec!["http://example.com/artifactory/foo/", "bar", "artifactory"],
                ),
            ),
        ];

        for (input, (root, marker, parts)) in cases {
            let parsed = flavour.parse_parts(input.iter());
            assert_eq!(parsed.root(), root);
            assert_eq!(parsed.dir_marker(), marker);
            assert_eq!(parsed.parts(), parts.as_slice());
        }
    }

    #[test]
    fn test_parse_parts_joins_inputs() {
        let registry = RootRegistry::new();
        let parsed = Flavour::new(&registry).parse_parts(["http://b/artifactory", "c", "d/e.xml"]);
        assert_eq!(parsed.parts(), ["http://b/artifactory/c/", "d", "e.xml"]);
    }

    #[test]
    fn test_parse_parts_dot_handling() {
        let registry = RootRegistry::new();
        let parsed = Flavour::new(&registry).parse_parts(["http://b/artifactory/c/./d//../e"]);
        assert_eq!(parsed.parts(), ["http://b/artifactory/c/", "d", "..", "e"]);
    }

    #[test]
    fn test_parse_anchor_only_root() {
        let registry = RootRegistry::new();
        let parsed = Flavour::new(&registry).parse("http://a/artifactory/");
        assert_eq!(parsed.parts(), ["http://a/artifactory"]);
        assert_eq!(parsed.dir_marker(), "");
    }

    #[cfg(feature = "property-tests")]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn segment() -> impl Strategy<Value = String> {
            "[a-z0-9_.-]{1,10}".prop_filter("not a dot segment", |s| s != "." && s != "..")
        }

        proptest! {
            /// Strings without separators never get a root.
            #[test]
            fn bare_strings_have_no_root(s in "[a-zA-Z0-9_.:-]{0,20}") {
                let registry = RootRegistry::new();
                let split = Flavour::new(&registry).split_root(&s);
                prop_assert_eq!(split.root, "");
                prop_assert_eq!(split.dir_marker, "");
            }

            /// A path ending at the literal segment ignores a trailing separator.
            #[test]
            fn literal_root_trailing_separator(host in segment()) {
                let registry = RootRegistry::new();
                let flavour = Flavour::new(&registry);
                let s = format!("http://{host}/artifactory");
                prop_assert_eq!(flavour.split_root(&s), flavour.split_root(&format!("{s}/")));
            }

            /// The directory marker is empty or exactly `/segment/`.
            #[test]
            fn marker_shape(parts in prop::collection::vec(segment(), 0..6)) {
                let registry = RootRegistry::new();
                let path = format!("http://h/artifactory/{}", parts.join("/"));
                let split = Flavour::new(&registry).split_root(&path);
                prop_assert!(!split.root.ends_with(SEPARATOR));
                if !split.dir_marker.is_empty() {
                    prop_assert!(split.dir_marker.starts_with(SEPARATOR));
                    prop_assert!(split.dir_marker.ends_with(SEPARATOR));
                    prop_assert_eq!(split.dir_marker.matches(SEPARATOR).count(), 2);
                }
            }
        }
    }
}
