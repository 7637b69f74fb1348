//! Storage operations against a repository server.
//!
//! The [`Accessor`] turns path operations into storage API requests and
//! parses the responses. The HTTP client itself sits behind the
//! [`Transport`] trait so the request/response shaping can be exercised
//! without a network.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use url::form_urlencoded;

use crate::checksum::DeployChecksums;
use crate::codec::{encode_matrix_parameters, encode_properties, Parameters};
use crate::error::{Error, Result};
use crate::path::{ArtifactoryPath, Auth, PathAttributes};

/// Request headers.
pub type Headers = BTreeMap<String, String>;

/// Header carrying the MD5 of a deployed file.
pub const CHECKSUM_MD5_HEADER: &str = "X-Checksum-Md5";
/// Header carrying the SHA-1 of a deployed file.
pub const CHECKSUM_SHA1_HEADER: &str = "X-Checksum-Sha1";
/// Header carrying the SHA-256 of a deployed file.
pub const CHECKSUM_SHA256_HEADER: &str = "X-Checksum-Sha256";

impl From<&DeployChecksums> for Headers {
    fn from(checksums: &DeployChecksums) -> Self {
        [
            (CHECKSUM_MD5_HEADER, &checksums.md5),
            (CHECKSUM_SHA1_HEADER, &checksums.sha1),
            (CHECKSUM_SHA256_HEADER, &checksums.sha256),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
    }
}

/// Per-request settings derived from a path's attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// Basic-auth credentials.
    pub auth: Option<Auth>,
    /// Whether TLS certificates are verified.
    pub verify: bool,
    /// Client certificate path.
    pub cert: Option<PathBuf>,
    /// Custom session options.
    pub session: BTreeMap<String, String>,
}

impl From<&PathAttributes> for RequestOptions {
    fn from(attributes: &PathAttributes) -> Self {
        Self {
            auth: attributes.auth().cloned(),
            verify: attributes.verify(),
            cert: attributes.cert().map(PathBuf::from),
            session: attributes.session().clone(),
        }
    }
}

/// A response from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// The HTTP layer.
pub trait Transport {
    /// Issue a GET request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be performed.
    fn get(&self, url: &str, options: &RequestOptions) -> Result<Response>;

    /// Issue a PUT request streaming `body`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be performed.
    fn put(
        &self,
        url: &str,
        body: &mut dyn Read,
        headers: &Headers,
        options: &RequestOptions,
    ) -> Result<Response>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, options: &RequestOptions) -> Result<Response> {
        (**self).get(url, options)
    }

    fn put(
        &self,
        url: &str,
        body: &mut dyn Read,
        headers: &Headers,
        options: &RequestOptions,
    ) -> Result<Response> {
        (**self).put(url, body, headers, options)
    }
}

/// File or folder metadata from the storage API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRecord {
    /// Creation time.
    pub ctime: DateTime<FixedOffset>,
    /// Last modification time.
    pub mtime: DateTime<FixedOffset>,
    /// User that created the item.
    pub created_by: Option<String>,
    /// User that last modified the item.
    pub modified_by: Option<String>,
    /// MIME type; absent for folders.
    pub mime_type: Option<String>,
    /// Size in bytes; zero for folders.
    pub size: u64,
    /// SHA-1 checksum.
    pub sha1: Option<String>,
    /// MD5 checksum.
    pub md5: Option<String>,
    /// Whether the item is a folder.
    pub is_dir: bool,
}

// The storage API reports file sizes as strings; accept numbers too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SizeField {
    Number(u64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
struct Checksums {
    sha1: Option<String>,
    md5: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChildEntry {
    uri: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorageInfo {
    created: String,
    last_modified: String,
    created_by: Option<String>,
    modified_by: Option<String>,
    mime_type: Option<String>,
    size: Option<SizeField>,
    checksums: Option<Checksums>,
    children: Option<Vec<ChildEntry>>,
}

fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).map_err(|e| Error::Validation {
        field: field.to_string(),
        message: format!("invalid timestamp {value:?}: {e}"),
    })
}

impl StorageInfo {
    fn into_stat(self) -> Result<StatRecord> {
        let size = match self.size {
            None => 0,
            Some(SizeField::Number(n)) => n,
            Some(SizeField::Text(text)) => text.parse().map_err(|e| Error::Validation {
                field: "size".to_string(),
                message: format!("invalid size {text:?}: {e}"),
            })?,
        };
        let checksums = self.checksums.unwrap_or_default();

        Ok(StatRecord {
            ctime: parse_timestamp("created", &self.created)?,
            mtime: parse_timestamp("lastModified", &self.last_modified)?,
            created_by: self.created_by,
            modified_by: self.modified_by,
            mime_type: self.mime_type,
            size,
            sha1: checksums.sha1,
            md5: checksums.md5,
            is_dir: self.children.is_some(),
        })
    }
}

fn expect_status(response: Response, url: &str, accepted: &[u16]) -> Result<Response> {
    if accepted.contains(&response.status) {
        Ok(response)
    } else {
        Err(Error::Http {
            status: response.status,
            url: url.to_string(),
            body: response.body,
        })
    }
}

/// Storage operations over a [`Transport`].
///
/// # Examples
///
/// ```
/// use std::io::Read;
/// use artpath::accessor::{Accessor, Headers, RequestOptions, Response, Transport};
/// use artpath::config::RootRegistry;
/// use artpath::path::ArtifactoryPath;
///
/// struct Offline;
///
/// impl Transport for Offline {
///     fn get(&self, _url: &str, _options: &RequestOptions) -> artpath::Result<Response> {
///         Ok(Response { status: 404, body: String::new() })
///     }
///
///     fn put(
///         &self,
///         _url: &str,
///         _body: &mut dyn Read,
///         _headers: &Headers,
///         _options: &RequestOptions,
///     ) -> artpath::Result<Response> {
///         Ok(Response { status: 201, body: String::new() })
///     }
/// }
///
/// let registry = RootRegistry::new();
/// let path = ArtifactoryPath::new(&registry, "http://b/artifactory/libs/a/b.jar");
/// let accessor = Accessor::new(Offline);
///
/// assert_eq!(
///     accessor.storage_url(&path),
///     "http://b/artifactory/api/storage/libs/a/b.jar"
/// );
/// assert!(accessor.stat(&path).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Accessor<T> {
    transport: T,
}

impl<T: Transport> Accessor<T> {
    /// Wrap a transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The wrapped transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Storage API URL for `path`: `{drive}/api/storage/{repo}/{tail}`.
    #[must_use]
    pub fn storage_url(&self, path: &ArtifactoryPath<'_>) -> String {
        let mut url = format!("{}/api/storage", path.drive());
        let segments = std::iter::once(path.repo())
            .chain(path.parsed().tail().iter().map(String::as_str))
            .filter(|segment| !segment.is_empty());
        for segment in segments {
            url.push('/');
            url.push_str(segment);
        }
        url
    }

    fn storage_info(&self, path: &ArtifactoryPath<'_>) -> Result<StorageInfo> {
        let url = self.storage_url(path);
        let options = RequestOptions::from(path.attributes());
        let response = expect_status(self.transport.get(&url, &options)?, &url, &[200])?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Metadata for `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server does not answer
    /// 200, or the response is not a valid storage record.
    pub fn stat(&self, path: &ArtifactoryPath<'_>) -> Result<StatRecord> {
        let stat = self.storage_info(path)?.into_stat()?;
        log::debug!("stat {path}: dir={} size={}", stat.is_dir, stat.size);
        Ok(stat)
    }

    /// Names of the children of the folder at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotADirectory`] if `path` is a file, or any error
    /// [`stat`](Self::stat) can return.
    pub fn listdir(&self, path: &ArtifactoryPath<'_>) -> Result<Vec<String>> {
        let children = self
            .storage_info(path)?
            .children
            .ok_or_else(|| Error::NotADirectory {
                path: path.to_string(),
            })?;
        Ok(children
            .into_iter()
            .map(|child| child.uri.trim_start_matches('/').to_string())
            .collect())
    }

    /// Upload `body` to `path`, tagging it with matrix `parameters`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with
    /// anything but 200 or 201.
    pub fn deploy(
        &self,
        path: &ArtifactoryPath<'_>,
        body: &mut dyn Read,
        parameters: &Parameters,
    ) -> Result<()> {
        self.deploy_with_headers(path, body, parameters, &Headers::new())
    }

    /// Upload the file at `file` to `path`, sending its MD5, SHA-1 and
    /// SHA-256 as `X-Checksum-*` headers.
    ///
    /// The file is read twice: once to hash it and once as the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or any error
    /// [`deploy`](Self::deploy) can return.
    pub fn deploy_file(
        &self,
        path: &ArtifactoryPath<'_>,
        file: &Path,
        parameters: &Parameters,
    ) -> Result<()> {
        let checksums = DeployChecksums::from_file(file)?;
        let mut body = File::open(file)?;
        self.deploy_with_headers(path, &mut body, parameters, &Headers::from(&checksums))
    }

    fn deploy_with_headers(
        &self,
        path: &ArtifactoryPath<'_>,
        body: &mut dyn Read,
        parameters: &Parameters,
        headers: &Headers,
    ) -> Result<()> {
        let mut url = path.to_string();
        if !parameters.is_empty() {
            url.push(';');
            url.push_str(&encode_matrix_parameters(parameters));
        }
        self.put(&url, body, headers, path, &[200, 201])?;
        log::debug!("deployed {url}");
        Ok(())
    }

    /// Create the folder at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with
    /// anything but 200 or 201.
    pub fn mkdir(&self, path: &ArtifactoryPath<'_>) -> Result<()> {
        let mut url = path.to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.put(&url, &mut io::empty(), &Headers::new(), path, &[200, 201])?;
        Ok(())
    }

    /// Set item properties on `path`, optionally on everything below it.
    ///
    /// The encoded property string is form-encoded into the query, so
    /// reserved characters in values reach the server intact.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with
    /// anything but 200 or 204.
    pub fn set_properties(
        &self,
        path: &ArtifactoryPath<'_>,
        properties: &Parameters,
        recursive: bool,
    ) -> Result<()> {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("properties", &encode_properties(properties))
            .append_pair("recursive", if recursive { "1" } else { "0" })
            .finish();
        let url = format!("{}?{query}", self.storage_url(path));
        self.put(&url, &mut io::empty(), &Headers::new(), path, &[200, 204])?;
        Ok(())
    }

    fn put(
        &self,
        url: &str,
        body: &mut dyn Read,
        headers: &Headers,
        path: &ArtifactoryPath<'_>,
        accepted: &[u16],
    ) -> Result<Response> {
        let options = RequestOptions::from(path.attributes());
        let response = self.transport.put(url, body, headers, &options)?;
        expect_status(response, url, accepted)
    }
}
