use std::path::Path;

use tracing::{info, warn};

use crate::core::downloader::hash::hashes_match;
use crate::core::downloader::sha256_file;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::version::Artifact;

/// Re-hash every selected artifact, cache hits included.
///
/// Any missing or mismatching file aborts the session; this is the last
/// check before cache contents are handed to the runtime.
pub fn verify_all(repo_dir: &Path, selected: &[Artifact]) -> LauncherResult<()> {
    for artifact in selected {
        let path = repo_dir.join(&artifact.name);
        let actual = sha256_file(&path).map_err(|err| LauncherError::Verification {
            name: artifact.name.clone(),
            reason: format!("unable to hash file: {err}"),
        })?;

        if !hashes_match(&actual, &artifact.hash) {
            warn!(
                "Expected {} for {} but got {}",
                artifact.hash, artifact.name, actual
            );
            return Err(LauncherError::HashMismatch {
                name: artifact.name.clone(),
                expected: artifact.hash.clone(),
                actual,
            });
        }

        info!("Verified hash of {}", artifact.name);
    }

    Ok(())
}
