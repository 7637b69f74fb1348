#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # artpath
//!
//! Path-style addressing for Artifactory repositories.
//!
//! A repository URL such as `http://host/artifactory/libs-release/org/lib.jar`
//! has no syntax marking where the server's base URL ends. This library
//! resolves that boundary (with help from a registry of known roots) and
//! offers an immutable path value type on top of it.
//!
//! ## Core Types
//!
//! - [`RootRegistry`]: known repository roots and their settings
//! - [`Flavour`]: the root resolution engine
//! - [`ArtifactoryPath`]: immutable repository paths
//! - [`Accessor`]: storage operations over a pluggable [`Transport`]
//! - [`checksum`]: streaming file digests for deploys
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use artpath::{ArtifactoryPath, RootRegistry};
//!
//! let mut registry = RootRegistry::new();
//! registry.load_yaml("http://custom/root:\n  username: admin\n").unwrap();
//!
//! let path = ArtifactoryPath::new(&registry, "http://custom/root/libs/a/b.jar");
//! assert_eq!(path.drive(), "http://custom/root");
//! assert_eq!(path.root(), "/libs/");
//! assert_eq!(path.auth().map(|a| a.username()), Some("admin"));
//!
//! let pom = path.with_suffix(".pom").unwrap();
//! assert_eq!(pom.to_string(), "http://custom/root/libs/a/b.pom");
//! ```

pub mod accessor;
pub mod checksum;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod path;
pub mod url;

// Re-export key types at crate root for convenience
pub use accessor::{Accessor, RequestOptions, Response, StatRecord, Transport};
pub use codec::{
    decode_properties, encode_matrix_parameters, encode_properties, escape_chars, ParamValue,
    Parameters,
};
pub use config::{ConfigLoader, RawRootConfig, RootConfig, RootRegistry};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{ArtifactoryPath, Auth, Flavour, ParsedPath, PathAttributes, RootStrategy, SplitRoot};
