//! Error types for the artpath library.
//!
//! Path resolution itself never fails; the errors here come from registry
//! mutation, path derivations that need a name or an ancestor, configuration
//! loading, and the remote accessor.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with an artpath error.
///
/// # Examples
///
/// ```
/// use artpath::{Error, Result};
///
/// fn example_operation() -> Result<&'static str> {
///     Ok("http://b/artifactory/c")
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the artpath library.
#[derive(Debug, Error)]
pub enum Error {
    /// A registry entry was assigned directly instead of through `load`.
    #[error("attempt to change value on immutable config object: {key}")]
    ImmutableConfig {
        /// The key that was assigned.
        key: String,
    },

    /// `relative_to` was asked for a path that is not an ancestor.
    #[error("{path:?} does not start with {other:?}")]
    PathOutsideScope {
        /// The path being made relative.
        path: String,
        /// The requested ancestor.
        other: String,
    },

    /// A directory listing was requested for a file.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that was listed.
        path: String,
    },

    /// A name or suffix replacement could not be applied.
    #[error("invalid name {name:?} for {path:?}: {reason}")]
    InvalidName {
        /// The path being derived from.
        path: String,
        /// The offending name or suffix.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A configuration document could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A response body was not valid JSON.
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote service answered with an unexpected status.
    #[error("unexpected HTTP status {status} from {url}: {body}")]
    Http {
        /// The response status code.
        status: u16,
        /// The requested URL.
        url: String,
        /// The response body.
        body: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if error was caused by direct registry assignment.
    ///
    /// # Examples
    ///
    /// ```
    /// use artpath::Error;
    ///
    /// let err = Error::ImmutableConfig { key: "http://a/artifactory".to_string() };
    /// assert!(err.is_immutable_config());
    /// ```
    #[must_use]
    pub fn is_immutable_config(&self) -> bool {
        matches!(self, Self::ImmutableConfig { .. })
    }

    /// Check if error is a `relative_to` scope violation.
    #[must_use]
    pub fn is_outside_scope(&self) -> bool {
        matches!(self, Self::PathOutsideScope { .. })
    }

    /// Check if error indicates a listing of a non-directory.
    ///
    /// # Examples
    ///
    /// ```
    /// use artpath::Error;
    ///
    /// let err = Error::NotADirectory { path: "http://b/artifactory/c/d".to_string() };
    /// assert!(err.is_not_a_directory());
    /// ```
    #[must_use]
    pub fn is_not_a_directory(&self) -> bool {
        matches!(self, Self::NotADirectory { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immutable_config_error() {
        let err = Error::ImmutableConfig {
            key: "http://custom/root".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("immutable config"));
        assert!(display.contains("http://custom/root"));
        assert!(err.is_immutable_config());
    }

    #[test]
    fn test_path_outside_scope_error() {
        let err = Error::PathOutsideScope {
            path: "http://b/artifactory/c/d".to_string(),
            other: "http://x/artifactory/y".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("does not start with"));
        assert!(display.contains("http://x/artifactory/y"));
        assert!(err.is_outside_scope());
        assert!(!err.is_not_a_directory());
    }

    #[test]
    fn test_not_a_directory_error() {
        let err = Error::NotADirectory {
            path: "http://b/artifactory/c/d.xml".to_string(),
        };
        assert!(format!("{err}").contains("not a directory"));
        assert!(err.is_not_a_directory());
    }

    #[test]
    fn test_invalid_name_error() {
        let err = Error::InvalidName {
            path: "http://b/artifactory/c/".to_string(),
            name: "d.txt".to_string(),
            reason: "path has an empty name".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid name"));
        assert!(display.contains("empty name"));
    }

    #[test]
    fn test_invalid_path_error() {
        let err = Error::InvalidPath {
            path: PathBuf::from("~other/cert.pem"),
            reason: "~user syntax is not supported".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("invalid path"));
        assert!(display.contains("cert.pem"));
    }

    #[test]
    fn test_http_error() {
        let err = Error::Http {
            status: 404,
            url: "http://b/artifactory/api/storage/c/d".to_string(),
            body: "not found".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("404"));
        assert!(display.contains("api/storage"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(format!("{err}").contains("invalid JSON"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<u16> {
            Err(Error::ImmutableConfig {
                key: "k".to_string(),
            })
        }

        assert!(returns_result().is_err());
    }
}
