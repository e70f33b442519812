use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::core::error::{LauncherError, LauncherResult};

/// Lower-case hex SHA-256 of a file, streamed from disk.
pub fn sha256_file(path: &Path) -> LauncherResult<String> {
    let io_err = |source| LauncherError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher).map_err(io_err)?;
    Ok(hex::encode(hasher.finalize()))
}

/// Like [`sha256_file`] but an absent file hashes to `None`.
pub fn existing_sha256(path: &Path) -> LauncherResult<Option<String>> {
    match sha256_file(path) {
        Ok(hash) => Ok(Some(hash)),
        Err(LauncherError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Hex digests from manifests are compared without regard to case.
pub fn hashes_match(actual: &str, expected: &str) -> bool {
    actual.eq_ignore_ascii_case(expected.trim())
}
