//! The root registry.
//!
//! A [`RootRegistry`] is an insertion-ordered table of root URLs and their
//! settings. It is an ordinary value: build it, [`load`](RootRegistry::load)
//! it, then hand out shared references to the resolution engine and to paths.
//! Because paths borrow the registry, it cannot be mutated while any path
//! parsed against it is alive.
//!
//! # Lookup order
//!
//! [`search`](RootRegistry::search) returns the *first* registered root whose
//! scheme-less form prefixes the scheme-less candidate on a segment boundary,
//! not the longest one. When roots overlap, register the more specific one
//! first. A registered `host/root` never claims `host/rootless`, so a later
//! `host/rootless` entry still gets its turn.

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::config::loader::ConfigLoader;
use crate::config::schema::{RawRootConfig, RootConfig};
use crate::error::{Error, Result};
use crate::path::flavour::SEPARATOR;
use crate::url::{protoless_url, scheme_prefix_len};

/// A registered root URL and its resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootEntry {
    url: String,
    config: RootConfig,
}

impl RootEntry {
    /// The root URL exactly as registered.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The resolved settings for this root.
    #[must_use]
    pub fn config(&self) -> &RootConfig {
        &self.config
    }

    /// The scheme-less form used for matching, without one trailing `/`.
    #[must_use]
    pub fn normalized(&self) -> &str {
        let url = protoless_url(&self.url);
        url.strip_suffix(SEPARATOR).unwrap_or(url)
    }

    /// Byte length of this root within `candidate`, if it prefixes it.
    ///
    /// The comparison ignores the candidate's scheme, but the returned length
    /// counts it, so `&candidate[..len]` is the root as the caller spelled it.
    /// The match must end at the end of `candidate` or on a separator.
    ///
    /// # Examples
    ///
    /// ```
    /// use artpath::config::{RawRootConfig, RootRegistry};
    ///
    /// let mut registry = RootRegistry::new();
    /// registry.load([("http://host/root", RawRootConfig::default())]).unwrap();
    /// let entry = registry.iter().next().unwrap();
    ///
    /// assert_eq!(entry.match_len("https://host/root/repo"), Some(17));
    /// assert_eq!(entry.match_len("host/root"), Some(9));
    /// assert_eq!(entry.match_len("http://host/rootless"), None);
    /// ```
    #[must_use]
    pub fn match_len(&self, candidate: &str) -> Option<usize> {
        let normalized = self.normalized();
        if normalized.is_empty() {
            return None;
        }

        let prefix = scheme_prefix_len(candidate);
        let remainder = candidate[prefix..].strip_prefix(normalized)?;
        let at_boundary = remainder.is_empty()
            || remainder.starts_with(SEPARATOR)
            || normalized.ends_with(SEPARATOR);
        at_boundary.then_some(prefix + normalized.len())
    }
}

/// Ordered collection of known repository roots.
///
/// # Examples
///
/// ```
/// use artpath::config::{RawRootConfig, RootRegistry};
///
/// let mut registry = RootRegistry::new();
/// registry
///     .load([("http://custom/root", RawRootConfig::default())])
///     .unwrap();
///
/// let entry = registry.search("https://custom/root/foo").unwrap();
/// assert_eq!(entry.url(), "http://custom/root");
/// assert!(registry.search("http://elsewhere/root").is_none());
/// assert!(registry.search("http://custom/rootless").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RootRegistry {
    entries: Vec<RootEntry>,
}

impl RootRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered roots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no roots are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered roots in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &RootEntry> {
        self.entries.iter()
    }

    /// Find the first registered root that prefixes `candidate`.
    ///
    /// Both sides are compared without their scheme, so `http://host/root`
    /// matches `https://host/root/x` and `host/root`. See
    /// [`RootEntry::match_len`] for the boundary rule.
    #[must_use]
    pub fn search(&self, candidate: &str) -> Option<&RootEntry> {
        self.search_with_len(candidate).map(|(entry, _)| entry)
    }

    /// Like [`search`](Self::search), also returning the byte length of the
    /// matched root within `candidate`.
    #[must_use]
    pub fn search_with_len(&self, candidate: &str) -> Option<(&RootEntry, usize)> {
        self.entries
            .iter()
            .find_map(|entry| entry.match_len(candidate).map(|len| (entry, len)))
    }

    /// The entry registered exactly as `key`, else the result of
    /// [`search`](Self::search).
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&RootEntry> {
        self.entries
            .iter()
            .find(|entry| entry.url == key)
            .or_else(|| self.search(key))
    }

    /// Settings for `key`: an exact registered URL, else the result of
    /// [`search`](Self::search).
    ///
    /// # Examples
    ///
    /// ```
    /// use artpath::config::{RawRootConfig, RootRegistry};
    ///
    /// let mut registry = RootRegistry::new();
    /// registry
    ///     .load([(
    ///         "http://bar.net/artifactory",
    ///         RawRootConfig { username: Some("foo".into()), ..Default::default() },
    ///     )])
    ///     .unwrap();
    ///
    /// let config = registry.get("bar.net/artifactory/libs").unwrap();
    /// assert_eq!(config.username.as_deref(), Some("foo"));
    /// assert!(registry.get("foobarbaz").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RootConfig> {
        self.lookup(key).map(RootEntry::config)
    }

    /// Merge roots into the registry.
    ///
    /// Existing roots are overwritten in place and keep their position; new
    /// roots are appended in iteration order. Defaults are applied here, once.
    /// Nothing is merged if any record fails to resolve.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the root if a record's `cert`
    /// cannot be tilde-expanded.
    pub fn load<I, K>(&mut self, mapping: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, RawRootConfig)>,
        K: Into<String>,
    {
        let resolved = mapping
            .into_iter()
            .map(|(url, raw)| {
                let url: String = url.into();
                let config = raw.resolve().map_err(|e| Error::Validation {
                    field: format!("{url}.cert"),
                    message: e.to_string(),
                })?;
                Ok((url, config))
            })
            .collect::<Result<Vec<(String, RootConfig)>>>()?;

        let count = resolved.len();
        for (url, config) in resolved {
            match self.entries.iter_mut().find(|entry| entry.url == url) {
                Some(existing) => existing.config = config,
                None => self.entries.push(RootEntry { url, config }),
            }
        }

        log::debug!("loaded {count} root(s); registry now holds {}", self.entries.len());
        Ok(self)
    }

    /// Merge roots from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is invalid or a record fails to
    /// resolve.
    pub fn load_yaml(&mut self, yaml: &str) -> Result<&mut Self> {
        let table = ConfigLoader::parse_str(yaml)?;
        self.load(table)
    }

    /// Merge roots from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&mut self, path: &Path) -> Result<&mut Self> {
        let table = ConfigLoader::load_file(path)?;
        self.load(table)
    }

    /// Remove every root.
    pub fn clear(&mut self) -> &mut Self {
        self.entries.clear();
        self
    }

    /// Direct assignment is not supported; use [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// Always returns [`Error::ImmutableConfig`].
    #[allow(clippy::unused_self, clippy::needless_pass_by_value)]
    pub fn set(&mut self, key: &str, _config: RawRootConfig) -> Result<()> {
        Err(Error::ImmutableConfig {
            key: key.to_string(),
        })
    }

    /// Serialize the registry back into a YAML mapping in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be represented in YAML.
    pub fn to_yaml(&self) -> Result<String> {
        let mut mapping = Mapping::new();
        for entry in &self.entries {
            mapping.insert(
                Value::String(entry.url.clone()),
                serde_yaml::to_value(&entry.config)?,
            );
        }
        Ok(serde_yaml::to_string(&mapping)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(roots: &[&str]) -> RootRegistry {
        let mut registry = RootRegistry::new();
        registry
            .load(roots.iter().map(|root| (*root, RawRootConfig::default())))
            .unwrap();
        registry
    }

    #[test]
    fn test_search_is_scheme_agnostic() {
        let registry = registry_with(&["http://custom/root"]);
        for candidate in [
            "http://custom/root",
            "https://custom/root/foo",
            "custom/root",
            "custom/root/",
        ] {
            assert_eq!(registry.search(candidate).unwrap().url(), "http://custom/root");
        }
    }

    #[test]
    fn test_search_ignores_single_trailing_separator_on_entry() {
        let registry = registry_with(&["https://host/base/"]);
        assert!(registry.search("host/base").is_some());
    }

    #[test]
    fn test_search_first_match_wins() {
        let registry = registry_with(&["http://host/a", "http://host/a/b"]);
        assert_eq!(registry.search("host/a/b/c").unwrap().url(), "http://host/a");

        let registry = registry_with(&["http://host/a/b", "http://host/a"]);
        assert_eq!(registry.search("host/a/b/c").unwrap().url(), "http://host/a/b");
    }

    #[test]
    fn test_search_requires_segment_boundary() {
        let registry = registry_with(&["http://h/root", "http://h/rootless"]);
        assert_eq!(registry.search("http://h/root/x").unwrap().url(), "http://h/root");
        assert_eq!(
            registry.search("http://h/rootless/repo/x").unwrap().url(),
            "http://h/rootless"
        );
        assert_eq!(registry.search("h/rootless").unwrap().url(), "http://h/rootless");

        let registry = registry_with(&["http://h/root"]);
        assert!(registry.search("http://h/rootless/repo").is_none());
    }

    #[test]
    fn test_search_with_len_counts_caller_scheme() {
        let registry = registry_with(&["http://h/root"]);
        let (entry, len) = registry.search_with_len("https://h/root/repo").unwrap();
        assert_eq!(entry.url(), "http://h/root");
        assert_eq!(&"https://h/root/repo"[..len], "https://h/root");
    }

    #[test]
    fn test_lookup_prefers_exact_key() {
        let registry = registry_with(&["http://host/a", "http://host/a/b"]);
        assert_eq!(registry.lookup("http://host/a/b").unwrap().url(), "http://host/a/b");
        assert_eq!(registry.lookup("https://host/a/b").unwrap().url(), "http://host/a");
        assert!(registry.lookup("http://host/ab").is_none());
    }

    #[test]
    fn test_search_no_match() {
        let registry = registry_with(&["http://custom/root"]);
        assert!(registry.search("http://custom/other").is_none());
        assert!(RootRegistry::new().search("anything").is_none());
    }

    #[test]
    fn test_load_overwrites_in_place() {
        let mut registry = registry_with(&["http://a/root", "http://b/root"]);
        registry
            .load([(
                "http://a/root",
                RawRootConfig {
                    username: Some("admin".to_string()),
                    ..Default::default()
                },
            )])
            .unwrap();

        let urls: Vec<&str> = registry.iter().map(RootEntry::url).collect();
        assert_eq!(urls, ["http://a/root", "http://b/root"]);
        assert_eq!(
            registry.get("http://a/root").unwrap().username.as_deref(),
            Some("admin")
        );
    }

    #[test]
    fn test_load_is_atomic_on_failure() {
        let mut registry = registry_with(&["http://a/root"]);
        let result = registry.load([
            ("http://b/root", RawRootConfig::default()),
            (
                "http://c/root",
                RawRootConfig {
                    cert: Some("~nobody/cert".to_string()),
                    ..Default::default()
                },
            ),
        ]);
        assert!(result.is_err());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_load_error_names_the_root() {
        let mut registry = RootRegistry::new();
        let err = registry
            .load([(
                "http://c/root",
                RawRootConfig {
                    cert: Some("~nobody/cert".to_string()),
                    ..Default::default()
                },
            )])
            .unwrap_err();
        match err {
            Error::Validation { field, message } => {
                assert_eq!(field, "http://c/root.cert");
                assert!(message.contains("~user"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_get_prefers_exact_key() {
        let mut registry = RootRegistry::new();
        registry
            .load([
                ("http://host/a", RawRootConfig::default()),
                (
                    "http://host/a/b",
                    RawRootConfig {
                        verify: Some(false),
                        ..Default::default()
                    },
                ),
            ])
            .unwrap();

        assert!(!registry.get("http://host/a/b").unwrap().verifies());
        assert!(registry.get("https://host/a/b").unwrap().verifies());
    }

    #[test]
    fn test_set_is_rejected() {
        let mut registry = RootRegistry::new();
        let err = registry
            .set("http://a/root", RawRootConfig::default())
            .unwrap_err();
        assert!(err.is_immutable_config());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut registry = registry_with(&["http://a/root", "http://b/root"]);
        assert!(registry.clear().is_empty());
        assert!(registry.search("a/root").is_none());
    }

    #[test]
    fn test_to_yaml_round_trip() {
        let mut registry = RootRegistry::new();
        registry
            .load_yaml("http://z/artifactory:\n  username: u\n  password: p\nhttp://a/artifactory: {}\n")
            .unwrap();

        let yaml = registry.to_yaml().unwrap();
        let mut reloaded = RootRegistry::new();
        reloaded.load_yaml(&yaml).unwrap();

        let urls: Vec<&str> = reloaded.iter().map(RootEntry::url).collect();
        assert_eq!(urls, ["http://z/artifactory", "http://a/artifactory"]);
        assert_eq!(
            reloaded.get("http://z/artifactory"),
            registry.get("http://z/artifactory")
        );
    }
}
