//! Structural form of a parsed path.

use std::fmt;

use crate::path::flavour::SEPARATOR;

/// Root, directory marker and component sequence of a path.
///
/// When the path is anchored, `parts()[0]` is the anchor string
/// `root + dir_marker`. A non-empty root with an empty directory marker
/// never has components after the anchor; the first component joined on is
/// promoted to the marker instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ParsedPath {
    root: String,
    dir_marker: String,
    parts: Vec<String>,
}

impl ParsedPath {
    /// Build a parsed path from its root, marker and the components after
    /// the anchor.
    #[must_use]
    pub fn new(root: String, dir_marker: String, mut tail: Vec<String>) -> Self {
        let mut dir_marker = dir_marker;
        if !root.is_empty() && dir_marker.is_empty() && !tail.is_empty() {
            let first = tail.remove(0);
            dir_marker = format!("{SEPARATOR}{first}{SEPARATOR}");
        }

        let mut parts = Vec::with_capacity(tail.len() + 1);
        if !root.is_empty() || !dir_marker.is_empty() {
            parts.push(format!("{root}{dir_marker}"));
        }
        parts.extend(tail);

        Self {
            root,
            dir_marker,
            parts,
        }
    }

    /// A relative path made of `parts`.
    #[must_use]
    pub fn relative(parts: Vec<String>) -> Self {
        Self::new(String::new(), String::new(), parts)
    }

    /// The repository root, e.g. `http://host/artifactory`.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The directory marker, e.g. `/repo/`.
    #[must_use]
    pub fn dir_marker(&self) -> &str {
        &self.dir_marker
    }

    /// Whether the path has a root or a directory marker.
    #[must_use]
    pub fn is_anchored(&self) -> bool {
        !self.root.is_empty() || !self.dir_marker.is_empty()
    }

    /// `root + dir_marker`, or empty for relative paths.
    #[must_use]
    pub fn anchor(&self) -> &str {
        if self.is_anchored() {
            &self.parts[0]
        } else {
            ""
        }
    }

    /// Every component, the anchor first when present.
    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Components after the anchor.
    #[must_use]
    pub fn tail(&self) -> &[String] {
        if self.is_anchored() {
            &self.parts[1..]
        } else {
            &self.parts
        }
    }

    /// The last component after the anchor, or empty.
    #[must_use]
    pub fn name(&self) -> &str {
        self.tail().last().map_or("", String::as_str)
    }

    /// The directory marker without separators.
    #[must_use]
    pub fn repo(&self) -> &str {
        self.dir_marker.trim_matches(SEPARATOR)
    }

    /// Append `segments` after the existing components.
    #[must_use]
    pub fn join<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tail = self.tail().to_vec();
        tail.extend(segments.into_iter().map(Into::into));
        Self::new(self.root.clone(), self.dir_marker.clone(), tail)
    }

    /// Drop the last component. Anchor-only and empty paths are their own
    /// parent.
    #[must_use]
    pub fn parent(&self) -> Self {
        let tail = self.tail();
        match tail.split_last() {
            Some((_, rest)) => Self::new(self.root.clone(), self.dir_marker.clone(), rest.to_vec()),
            None => self.clone(),
        }
    }

    /// Replace the last component, or `None` if there is none.
    #[must_use]
    pub fn with_last(&self, name: &str) -> Option<Self> {
        let (_, rest) = self.tail().split_last()?;
        let mut tail = rest.to_vec();
        tail.push(name.to_string());
        Some(Self::new(self.root.clone(), self.dir_marker.clone(), tail))
    }

    /// The components of `self` after `base`, as a relative path.
    ///
    /// `base` matches when it has the same anchor and its components prefix
    /// ours, or when it is a bare root equal to ours, in which case the
    /// repository becomes the first relative component.
    #[must_use]
    pub fn relative_to(&self, base: &Self) -> Option<Self> {
        if !base.root.is_empty()
            && base.dir_marker.is_empty()
            && base.root == self.root
            && !self.dir_marker.is_empty()
        {
            let mut parts = vec![self.repo().to_string()];
            parts.extend_from_slice(self.tail());
            return Some(Self::relative(parts));
        }

        if self.anchor() != base.anchor() {
            return None;
        }
        let (ours, theirs) = (self.tail(), base.tail());
        if theirs.len() > ours.len() || ours[..theirs.len()] != *theirs {
            return None;
        }
        Some(Self::relative(ours[theirs.len()..].to_vec()))
    }
}

impl fmt::Display for ParsedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tail = self.tail().join(&SEPARATOR.to_string());
        if self.is_anchored() {
            write!(f, "{}{tail}", self.anchor())
        } else if tail.is_empty() {
            write!(f, ".")
        } else {
            write!(f, "{tail}")
        }
    }
}
