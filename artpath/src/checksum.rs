//! File checksums.
//!
//! Files are hashed in fixed-size chunks, so large artifacts never have to
//! fit in memory. [`DeployChecksums`] computes the digests the storage API
//! accepts alongside an upload in a single pass.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};

use crate::error::{Error, Result};

const CHUNK_SIZE: usize = 64 * 1024;

/// Feed `reader` to every hasher in `update` until it is exhausted.
fn read_chunks(reader: &mut dyn Read, mut update: impl FnMut(&[u8])) -> Result<()> {
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(()),
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        update(&buf[..n]);
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: format!("Failed to open file for hashing: {e}"),
    })
}

/// Lowercase hex digest of everything `reader` yields.
///
/// # Errors
///
/// Returns an error if reading fails.
///
/// # Examples
///
/// ```
/// use artpath::checksum::hexdigest;
/// use sha2::Sha256;
///
/// let digest = hexdigest::<Sha256>(&mut "hello world".as_bytes()).unwrap();
/// assert_eq!(digest, "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9");
/// ```
pub fn hexdigest<D: Digest>(reader: &mut dyn Read) -> Result<String> {
    let mut hasher = D::new();
    read_chunks(reader, |chunk| hasher.update(chunk))?;
    Ok(hex::encode(hasher.finalize()))
}

fn file_hexdigest<D: Digest>(path: &Path) -> Result<String> {
    hexdigest::<D>(&mut open(path)?)
}

/// MD5 of a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn md5sum(path: &Path) -> Result<String> {
    file_hexdigest::<Md5>(path)
}

/// SHA-1 of a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn sha1sum(path: &Path) -> Result<String> {
    file_hexdigest::<Sha1>(path)
}

/// SHA-256 of a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn sha256sum(path: &Path) -> Result<String> {
    file_hexdigest::<Sha256>(path)
}

/// SHA-512 of a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn sha512sum(path: &Path) -> Result<String> {
    file_hexdigest::<Sha512>(path)
}

/// Digests sent with a deploy as `X-Checksum-*` headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployChecksums {
    /// Lowercase hex MD5.
    pub md5: String,
    /// Lowercase hex SHA-1.
    pub sha1: String,
    /// Lowercase hex SHA-256.
    pub sha256: String,
}

impl DeployChecksums {
    /// Hash everything `reader` yields, in one pass.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn from_reader(reader: &mut dyn Read) -> Result<Self> {
        let mut md5 = Md5::new();
        let mut sha1 = Sha1::new();
        let mut sha256 = Sha256::new();
        read_chunks(reader, |chunk| {
            md5.update(chunk);
            sha1.update(chunk);
            sha256.update(chunk);
        })?;

        Ok(Self {
            md5: hex::encode(md5.finalize()),
            sha1: hex::encode(sha1.finalize()),
            sha256: hex::encode(sha256.finalize()),
        })
    }

    /// Hash a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_reader(&mut open(path)?)
    }
}
