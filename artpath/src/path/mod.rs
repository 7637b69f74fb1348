//! Repository path handling.
//!
//! This module turns URL-like strings into structured repository paths and
//! derives new paths from them.
//!
//! # Key Concepts
//!
//! ## Root resolution
//!
//! A repository URL has no syntax marking where the server's base URL ends.
//! The [`Flavour`] engine decides it, trying in order:
//!
//! - A root registered in the [`RootRegistry`](crate::config::RootRegistry)
//! - The first `artifactory` segment
//! - The `scheme://host` authority
//!
//! The segment right after the root is the *directory marker* (the
//! repository). Together they form the *anchor*.
//!
//! ## Attributes
//!
//! Paths carry [`PathAttributes`] (credentials, TLS settings, session
//! options) that never affect parsing and are copied into every derived path.
//!
//! # Examples
//!
//! ```
//! use artpath::config::RootRegistry;
//! use artpath::path::ArtifactoryPath;
//!
//! let mut registry = RootRegistry::new();
//! registry.load_yaml("http://custom/root: {}\n").unwrap();
//!
//! let path = ArtifactoryPath::new(&registry, "https://custom/root/libs-release/org/lib.jar");
//! assert_eq!(path.drive(), "https://custom/root");
//! assert_eq!(path.repo(), "libs-release");
//! assert_eq!(path.name(), "lib.jar");
//!
//! let rel = path.relative_to("https://custom/root/libs-release").unwrap();
//! assert_eq!(rel.to_string(), "org/lib.jar");
//! ```

pub mod attributes;
pub mod flavour;
mod object;
mod parsed;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types
pub use attributes::{Auth, PathAttributes};
pub use flavour::{Flavour, RootStrategy, SplitRoot};
pub use object::ArtifactoryPath;
pub use parsed::ParsedPath;
