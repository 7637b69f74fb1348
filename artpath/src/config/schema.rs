//! Configuration schema definitions.
//!
//! A configuration document maps root URLs to per-root settings:
//!
//! ```yaml
//! http://foo.bar.com/artifactory:
//!   username: deployer
//!   password: secret
//!   verify: true
//!   cert: ~/certs/client.pem
//! http://bar.baz.com/: {}
//! ```
//!
//! [`RawRootConfig`] is the document shape with every field optional.
//! [`RootConfig`] is the resolved record, normalized once when the registry
//! loads it. `verify` stays optional there so an unset value can be told
//! apart from an explicit `true`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::loader::expand_tilde;
use crate::error::Result;

/// Per-root settings as written in a configuration document.
///
/// # Examples
///
/// ```
/// use artpath::config::RawRootConfig;
///
/// let raw = RawRootConfig {
///     username: Some("admin".to_string()),
///     verify: Some(false),
///     ..Default::default()
/// };
/// let config = raw.resolve().unwrap();
/// assert!(!config.verifies());
/// assert_eq!(config.password, None);
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RawRootConfig {
    /// Account name used for basic authentication.
    pub username: Option<String>,

    /// Password or API key paired with `username`.
    pub password: Option<String>,

    /// Whether TLS certificates are verified (defaults to true).
    pub verify: Option<bool>,

    /// Client certificate path.
    ///
    /// A leading `~` or `~/` is expanded to the current user's home directory
    /// at load time. The `~user/...` form is not supported and fails the load
    /// with an error naming the root.
    pub cert: Option<String>,
}

impl RawRootConfig {
    /// Produce the resolved record.
    ///
    /// An empty `cert` is treated as absent and a present one is
    /// tilde-expanded.
    ///
    /// # Errors
    ///
    /// Returns an error if `cert` uses `~user` syntax or the home directory
    /// cannot be determined.
    pub fn resolve(self) -> Result<RootConfig> {
        let cert = match self.cert.as_deref() {
            None | Some("") => None,
            Some(cert) => Some(expand_tilde(Path::new(cert))?),
        };

        Ok(RootConfig {
            username: self.username,
            password: self.password,
            verify: self.verify,
            cert,
        })
    }
}

/// Resolved per-root settings.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct RootConfig {
    /// Account name used for basic authentication.
    pub username: Option<String>,

    /// Password or API key paired with `username`.
    pub password: Option<String>,

    /// Whether TLS certificates are verified, if the document says.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verify: Option<bool>,

    /// Absolute path to a client certificate.
    pub cert: Option<PathBuf>,
}

impl RootConfig {
    /// Whether TLS certificates are verified; `true` unless disabled.
    #[must_use]
    pub fn verifies(&self) -> bool {
        self.verify.unwrap_or(true)
    }
}
