//! Root configuration for artpath.
//!
//! This module provides:
//! - The [`RootRegistry`], an ordered table of known repository roots
//! - Typed per-root settings ([`RawRootConfig`] as written, [`RootConfig`]
//!   once defaults are applied)
//! - YAML loading through [`ConfigLoader`]
//!
//! # Examples
//!
//! ```
//! use artpath::config::RootRegistry;
//!
//! let mut registry = RootRegistry::new();
//! registry
//!     .load_yaml(
//!         "---\n\
//!          http://bar.net/artifactory:\n  username: foo\n  password: bar\n\
//!          foo.net/artifactory:\n  verify: false\n",
//!     )
//!     .unwrap();
//!
//! let config = registry.get("https://bar.net/artifactory").unwrap();
//! assert_eq!(config.username.as_deref(), Some("foo"));
//! assert!(config.verifies());
//! assert!(!registry.get("foo.net/artifactory").unwrap().verifies());
//! ```

pub mod loader;
pub mod registry;
pub mod schema;

pub use loader::{expand_tilde, ConfigLoader, RootTable};
pub use registry::{RootEntry, RootRegistry};
pub use schema::{RawRootConfig, RootConfig};
