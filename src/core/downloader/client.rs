use std::path::Path;

use futures_util::StreamExt;
use reqwest::Client;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};

use super::hash::hashes_match;

/// Sequential, SHA-256 verified downloader.
#[derive(Debug, Clone)]
pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Stream `url` into `dest`, hashing on the way through.
    ///
    /// `on_progress` receives the bytes written so far for this file. The
    /// response status is checked before any byte is read, so an error page
    /// never lands in `dest`. On a hash mismatch the written file stays in
    /// place and must be treated as untrusted.
    pub async fn download_verified<F>(
        &self,
        url: &str,
        dest: &Path,
        expected_sha256: &str,
        mut on_progress: F,
    ) -> LauncherResult<u64>
    where
        F: FnMut(u64),
    {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let io_err = |source| LauncherError::Io {
            path: dest.to_path_buf(),
            source,
        };

        let mut hasher = Sha256::new();
        let mut downloaded = 0_u64;

        // Scope the handle so it is flushed and closed before hashing is judged.
        {
            let mut file = tokio::fs::File::create(dest).await.map_err(io_err)?;
            let mut stream = response.bytes_stream();

            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                file.write_all(&chunk).await.map_err(io_err)?;
                hasher.update(&chunk);
                downloaded = downloaded.saturating_add(chunk.len() as u64);
                on_progress(downloaded);
            }

            file.flush().await.map_err(io_err)?;
        }

        let actual = hex::encode(hasher.finalize());
        if !hashes_match(&actual, expected_sha256) {
            return Err(LauncherError::HashMismatch {
                name: url.to_string(),
                expected: expected_sha256.to_string(),
                actual,
            });
        }

        debug!("Downloaded: {} -> {:?} ({} bytes)", url, dest, downloaded);
        Ok(downloaded)
    }
}
