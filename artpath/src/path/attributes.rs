//! Side-channel attributes carried by paths.
//!
//! Attributes never influence parsing. Every path derived from another
//! starts with a copy of its attributes.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::RootConfig;

/// Basic-auth credentials.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Auth {
    username: String,
    password: String,
}

impl Auth {
    /// Create credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The user name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Attributes attached to a path.
///
/// # Examples
///
/// ```
/// use artpath::path::{Auth, PathAttributes};
///
/// let parent = PathAttributes::default().with_auth(Auth::new("admin", "secret"));
/// let child = PathAttributes::default().with_verify(false);
///
/// let merged = parent.merged_with(&child);
/// assert_eq!(merged.auth().map(Auth::username), Some("admin"));
/// assert!(!merged.verify());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathAttributes {
    auth: Option<Auth>,
    verify: Option<bool>,
    cert: Option<PathBuf>,
    session: BTreeMap<String, String>,
}

impl PathAttributes {
    /// Attributes implied by a registered root's settings.
    ///
    /// Credentials are only set when a username is configured; a missing
    /// password becomes empty. `verify` is only set when the root's
    /// configuration sets it, so merging does not override an explicit
    /// choice with the default.
    #[must_use]
    pub fn from_config(config: &RootConfig) -> Self {
        Self {
            auth: config.username.as_ref().map(|username| {
                Auth::new(username.clone(), config.password.clone().unwrap_or_default())
            }),
            verify: config.verify,
            cert: config.cert.clone(),
            session: BTreeMap::new(),
        }
    }

    /// Credentials, if any.
    #[must_use]
    pub fn auth(&self) -> Option<&Auth> {
        self.auth.as_ref()
    }

    /// Whether TLS certificates are verified. Defaults to `true`.
    #[must_use]
    pub fn verify(&self) -> bool {
        self.verify.unwrap_or(true)
    }

    /// Client certificate path, if any.
    #[must_use]
    pub fn cert(&self) -> Option<&Path> {
        self.cert.as_deref()
    }

    /// Custom session options.
    #[must_use]
    pub fn session(&self) -> &BTreeMap<String, String> {
        &self.session
    }

    /// Replace the credentials.
    #[must_use]
    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Set certificate verification.
    #[must_use]
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = Some(verify);
        self
    }

    /// Set the client certificate path.
    #[must_use]
    pub fn with_cert(mut self, cert: impl Into<PathBuf>) -> Self {
        self.cert = Some(cert.into());
        self
    }

    /// Add or replace one session option.
    #[must_use]
    pub fn with_session_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.session.insert(key.into(), value.into());
        self
    }

    /// Merge `child` over `self`; every attribute `child` sets wins.
    #[must_use]
    pub fn merged_with(&self, child: &Self) -> Self {
        let mut session = self.session.clone();
        session.extend(child.session.clone());
        Self {
            auth: child.auth.clone().or_else(|| self.auth.clone()),
            verify: child.verify.or(self.verify),
            cert: child.cert.clone().or_else(|| self.cert.clone()),
            session,
        }
    }
}
