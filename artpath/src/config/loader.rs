//! Configuration file discovery and loading.
//!
//! Documents are YAML mappings of root URL to [`RawRootConfig`]. Document
//! order is preserved because the registry's first-match lookup depends on
//! it.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::config::schema::RawRootConfig;
use crate::error::{Error, Result};

/// Root entries in document order.
pub type RootTable = Vec<(String, RawRootConfig)>;

/// Name of the per-user configuration directory under `$HOME`.
const CONFIG_DIR: &str = ".artpath";

/// Name of the configuration file inside [`CONFIG_DIR`].
const CONFIG_FILE: &str = "config.yaml";

/// Loads root configuration documents.
///
/// # Examples
///
/// ```
/// use artpath::config::ConfigLoader;
///
/// let table = ConfigLoader::parse_str("http://custom/root: {}\n").unwrap();
/// assert_eq!(table[0].0, "http://custom/root");
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse a YAML document into root entries, keeping document order.
    ///
    /// An empty document yields no entries; a root with a null value gets an
    /// all-default record.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid, the document is not a
    /// mapping, a key is not a string, or a record has unknown fields.
    pub fn parse_str(yaml: &str) -> Result<RootTable> {
        let document: Value = serde_yaml::from_str(yaml)?;

        let mapping = match document {
            Value::Null => return Ok(Vec::new()),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(Error::Validation {
                    field: "<document>".to_string(),
                    message: format!("expected a mapping of root URLs, found {other:?}"),
                })
            }
        };

        mapping
            .into_iter()
            .map(|(key, value)| {
                let root = match key {
                    Value::String(root) => root,
                    other => {
                        return Err(Error::Validation {
                            field: format!("{other:?}"),
                            message: "root URLs must be strings".to_string(),
                        })
                    }
                };
                let raw = if value.is_null() {
                    RawRootConfig::default()
                } else {
                    serde_yaml::from_value(value)?
                };
                Ok((root, raw))
            })
            .collect()
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<RootTable> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read configuration file: {e}"),
        })?;

        Self::parse_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid configuration: {e}"),
        })
    }

    /// Path of the per-user configuration file, `~/.artpath/config.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
            path: PathBuf::from("~"),
            reason: "Cannot determine home directory".to_string(),
        })?;
        Ok(home.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load the per-user configuration file if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_default() -> Result<Option<RootTable>> {
        let path = Self::default_path()?;
        if !path.exists() {
            return Ok(None);
        }
        Self::load_file(&path).map(Some)
    }
}

/// Expand a leading `~` to the home directory.
///
/// Handles `~` and `~/path`; `~user` is rejected.
///
/// # Errors
///
/// Returns an error if the path is not UTF-8, uses `~user` syntax, or the
/// home directory cannot be determined.
///
/// # Examples
///
/// ```
/// use artpath::config::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/certs/client.pem")).unwrap();
/// assert!(expanded.ends_with("certs/client.pem"));
/// assert_eq!(expand_tilde(Path::new("/etc/ssl")).unwrap(), Path::new("/etc/ssl"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Path contains invalid UTF-8".to_string(),
    })?;

    let Some(rest) = path_str.strip_prefix('~') else {
        return Ok(path.to_path_buf());
    };

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if rest.is_empty() {
        Ok(home)
    } else if let Some(tail) = rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')) {
        Ok(home.join(tail))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}
