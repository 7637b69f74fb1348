//! The path value object.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Div;
use std::path::PathBuf;

use crate::config::RootRegistry;
use crate::error::{Error, Result};
use crate::path::attributes::{Auth, PathAttributes};
use crate::path::flavour::{Flavour, SEPARATOR};
use crate::path::parsed::ParsedPath;

/// An immutable repository path.
///
/// Paths borrow the [`RootRegistry`] they were parsed against, so the
/// registry cannot change while they are alive. Every derivation returns a
/// new path carrying a copy of the receiver's [`PathAttributes`]; equality
/// and hashing ignore the attributes.
///
/// # Examples
///
/// ```
/// use artpath::config::RootRegistry;
/// use artpath::path::ArtifactoryPath;
///
/// let registry = RootRegistry::new();
/// let path = ArtifactoryPath::new(&registry, "http://b/artifactory/c/d.xml");
///
/// assert_eq!(path.drive(), "http://b/artifactory");
/// assert_eq!(path.root(), "/c/");
/// assert_eq!(path.anchor(), "http://b/artifactory/c/");
/// assert_eq!(path.with_suffix(".txt").unwrap().to_string(), "http://b/artifactory/c/d.txt");
/// assert_eq!((&path.parent() / "e" / "f.jar").to_string(), "http://b/artifactory/c/e/f.jar");
/// ```
#[derive(Clone)]
pub struct ArtifactoryPath<'r> {
    flavour: Flavour<'r>,
    parsed: ParsedPath,
    attributes: PathAttributes,
}

impl<'r> ArtifactoryPath<'r> {
    /// Parse `path` against `registry`.
    ///
    /// Attributes are initialised from the settings of the registered root
    /// that decided the split, if one did.
    #[must_use]
    pub fn new(registry: &'r RootRegistry, path: &str) -> Self {
        let flavour = Flavour::new(registry);
        let (parsed, entry) = flavour.parse_with_entry(path);
        let attributes = entry
            .map(|entry| PathAttributes::from_config(entry.config()))
            .unwrap_or_default();
        Self {
            flavour,
            parsed,
            attributes,
        }
    }

    /// Parse several strings joined with the separator.
    #[must_use]
    pub fn from_parts<I, S>(registry: &'r RootRegistry, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = parts
            .into_iter()
            .map(|part| part.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(&SEPARATOR.to_string());
        Self::new(registry, &joined)
    }

    fn derive(&self, parsed: ParsedPath) -> Self {
        Self {
            flavour: self.flavour,
            parsed,
            attributes: self.attributes.clone(),
        }
    }

    /// Set basic-auth credentials.
    #[must_use]
    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.attributes = self.attributes.with_auth(Auth::new(username, password));
        self
    }

    /// Set TLS certificate verification.
    #[must_use]
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.attributes = self.attributes.with_verify(verify);
        self
    }

    /// Set the client certificate path.
    #[must_use]
    pub fn with_cert(mut self, cert: impl Into<PathBuf>) -> Self {
        self.attributes = self.attributes.with_cert(cert);
        self
    }

    /// Add a custom session option.
    #[must_use]
    pub fn with_session_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes = self.attributes.with_session_option(key, value);
        self
    }

    /// Replace all attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: PathAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// The side-channel attributes.
    #[must_use]
    pub fn attributes(&self) -> &PathAttributes {
        &self.attributes
    }

    /// Credentials, if any.
    #[must_use]
    pub fn auth(&self) -> Option<&Auth> {
        self.attributes.auth()
    }

    /// The structural form of this path.
    #[must_use]
    pub fn parsed(&self) -> &ParsedPath {
        &self.parsed
    }

    /// The engine this path was parsed with.
    #[must_use]
    pub fn flavour(&self) -> Flavour<'r> {
        self.flavour
    }

    /// The repository root URL, e.g. `http://b/artifactory`.
    #[must_use]
    pub fn drive(&self) -> &str {
        self.parsed.root()
    }

    /// The directory marker, e.g. `/c/`.
    #[must_use]
    pub fn root(&self) -> &str {
        self.parsed.dir_marker()
    }

    /// `drive() + root()`.
    #[must_use]
    pub fn anchor(&self) -> &str {
        self.parsed.anchor()
    }

    /// The repository name, the directory marker without separators.
    #[must_use]
    pub fn repo(&self) -> &str {
        self.parsed.repo()
    }

    /// Components, the anchor first when present.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        self.parsed.parts()
    }

    /// Whether the path has a drive or a directory marker.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.parsed.is_anchored()
    }

    /// The final component, or empty for anchor-only paths.
    #[must_use]
    pub fn name(&self) -> &str {
        self.parsed.name()
    }

    /// The final extension of [`name`](Self::name), including the dot.
    ///
    /// Leading dots do not start an extension and a trailing dot is not one.
    #[must_use]
    pub fn suffix(&self) -> &str {
        let name = self.name();
        match name.rfind('.') {
            Some(idx) if idx > 0 && idx < name.len() - 1 => &name[idx..],
            _ => "",
        }
    }

    /// Every extension of [`name`](Self::name), in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use artpath::config::RootRegistry;
    /// use artpath::path::ArtifactoryPath;
    ///
    /// let registry = RootRegistry::new();
    /// let path = ArtifactoryPath::new(&registry, "http://b/artifactory/c/tool-1.0.tar.gz");
    /// assert_eq!(path.suffixes(), [".0", ".tar", ".gz"]);
    /// assert_eq!(path.suffix(), ".gz");
    /// assert_eq!(path.stem(), "tool-1.0.tar");
    /// ```
    #[must_use]
    pub fn suffixes(&self) -> Vec<String> {
        let name = self.name();
        if name.ends_with('.') {
            return Vec::new();
        }
        name.trim_start_matches('.')
            .split('.')
            .skip(1)
            .map(|ext| format!(".{ext}"))
            .collect()
    }

    /// [`name`](Self::name) without its final extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        let name = self.name();
        &name[..name.len() - self.suffix().len()]
    }

    /// The logical parent. Anchor-only and empty paths are their own parent.
    #[must_use]
    pub fn parent(&self) -> Self {
        self.derive(self.parsed.parent())
    }

    /// Successive parents, nearest first, ending with the anchor.
    pub fn parents(&self) -> impl Iterator<Item = ArtifactoryPath<'r>> {
        let first = self.parent();
        let first = (first != *self).then_some(first);
        std::iter::successors(first, |path| {
            let next = path.parent();
            (next != *path).then_some(next)
        })
    }

    /// Append one string, split on the separator.
    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        self.joinpath([segment])
    }

    /// Append several strings, each split on the separator.
    ///
    /// Empty and `.` components are dropped. The root is never re-derived,
    /// so joining a URL-looking string only adds components.
    #[must_use]
    pub fn joinpath<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let components: Vec<String> = segments
            .into_iter()
            .flat_map(|segment| {
                segment
                    .as_ref()
                    .split(SEPARATOR)
                    .filter(|part| !part.is_empty() && *part != ".")
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        self.derive(self.parsed.join(components))
    }

    /// Append another path.
    ///
    /// An anchored `other` replaces the receiver entirely. Attributes set on
    /// `other` take precedence over the receiver's.
    #[must_use]
    pub fn join_path(&self, other: &ArtifactoryPath<'_>) -> Self {
        let parsed = if other.is_absolute() {
            other.parsed.clone()
        } else {
            self.parsed.join(other.parsed.parts().iter().cloned())
        };
        Self {
            flavour: self.flavour,
            parsed,
            attributes: self.attributes.merged_with(&other.attributes),
        }
    }

    /// This path relative to `other`, parsed against the same registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathOutsideScope`] if `other` is not an ancestor of
    /// this path.
    pub fn relative_to(&self, other: &str) -> Result<Self> {
        self.relative_to_parsed(&self.flavour.parse(other))
    }

    /// This path relative to another path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathOutsideScope`] if `other` is not an ancestor of
    /// this path.
    pub fn relative_to_path(&self, other: &ArtifactoryPath<'_>) -> Result<Self> {
        self.relative_to_parsed(&other.parsed)
    }

    fn relative_to_parsed(&self, other: &ParsedPath) -> Result<Self> {
        self.parsed
            .relative_to(other)
            .map(|parsed| self.derive(parsed))
            .ok_or_else(|| Error::PathOutsideScope {
                path: self.to_string(),
                other: other.to_string(),
            })
    }

    /// Replace the final component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if this path has no name or `name` is
    /// empty, `.`, or contains a separator.
    pub fn with_name(&self, name: &str) -> Result<Self> {
        if name.is_empty() || name == "." || name.contains(SEPARATOR) {
            return Err(self.invalid_name(name, "not a single path component"));
        }
        self.parsed
            .with_last(name)
            .map(|parsed| self.derive(parsed))
            .ok_or_else(|| self.invalid_name(name, "path has an empty name"))
    }

    /// Replace the final extension, or add one if there is none. An empty
    /// `suffix` removes the extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if this path has no name or `suffix`
    /// is neither empty nor a `.` followed by a separator-free extension.
    pub fn with_suffix(&self, suffix: &str) -> Result<Self> {
        let well_formed = suffix.is_empty()
            || (suffix.starts_with('.') && suffix.len() > 1 && !suffix.contains(SEPARATOR));
        if !well_formed {
            return Err(self.invalid_name(suffix, "invalid suffix"));
        }
        if self.name().is_empty() {
            return Err(self.invalid_name(suffix, "path has an empty name"));
        }
        let name = format!("{}{suffix}", self.stem());
        self.with_name(&name)
    }

    /// `parent() / name`.
    #[must_use]
    pub fn sibling(&self, name: &str) -> Self {
        self.parent().join(name)
    }

    fn invalid_name(&self, name: &str, reason: &str) -> Error {
        Error::InvalidName {
            path: self.to_string(),
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for ArtifactoryPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.parsed.fmt(f)
    }
}

impl fmt::Debug for ArtifactoryPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactoryPath")
            .field("path", &self.to_string())
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl PartialEq for ArtifactoryPath<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.parsed == other.parsed
    }
}

impl Eq for ArtifactoryPath<'_> {}

impl Hash for ArtifactoryPath<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parsed.hash(state);
    }
}

impl<'r> Div<&str> for &ArtifactoryPath<'r> {
    type Output = ArtifactoryPath<'r>;

    fn div(self, rhs: &str) -> Self::Output {
        self.join(rhs)
    }
}

impl<'r> Div<&str> for ArtifactoryPath<'r> {
    type Output = ArtifactoryPath<'r>;

    fn div(self, rhs: &str) -> Self::Output {
        self.join(rhs)
    }
}

impl<'r> Div<&ArtifactoryPath<'_>> for &ArtifactoryPath<'r> {
    type Output = ArtifactoryPath<'r>;

    fn div(self, rhs: &ArtifactoryPath<'_>) -> Self::Output {
        self.join_path(rhs)
    }
}
