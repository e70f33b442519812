// ─── Cache Download ───
// Content-addressed download decision and the sequential download loop.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::core::downloader::hash::hashes_match;
use crate::core::downloader::{existing_sha256, Downloader};
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::progress::{stage, ProgressSink};
use crate::core::version::Artifact;

/// Artifacts whose cached bytes do not hash to the manifest value.
#[derive(Debug, Default)]
pub struct DownloadPlan<'a> {
    pub queued: Vec<&'a Artifact>,
    /// Sum of the declared sizes of `queued`.
    pub total_bytes: u64,
}

/// Queue every artifact whose cache file is missing or hashes differently.
/// Timestamps and sizes on disk are never consulted.
pub fn plan_downloads<'a>(
    repo_dir: &Path,
    selected: &'a [Artifact],
) -> LauncherResult<DownloadPlan<'a>> {
    let mut plan = DownloadPlan::default();

    for artifact in selected {
        let cached = existing_sha256(&repo_dir.join(&artifact.name))?;
        if cached.as_deref().is_some_and(|hash| hashes_match(hash, &artifact.hash)) {
            debug!("Hash for {} up to date", artifact.name);
            continue;
        }

        plan.total_bytes = plan.total_bytes.saturating_add(artifact.size);
        plan.queued.push(artifact);
    }

    Ok(plan)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: Vec<String>,
    /// Fetched but failed verification; left on disk, untrusted.
    pub unverified: Vec<String>,
}

/// Download the plan one artifact at a time.
///
/// A network failure aborts the batch. A hash mismatch on a single artifact
/// is logged and the loop moves on; the final verification pass is what
/// turns that into a fatal error.
pub async fn download_all(
    downloader: &Downloader,
    repo_dir: &Path,
    plan: &DownloadPlan<'_>,
    sink: &dyn ProgressSink,
) -> LauncherResult<DownloadReport> {
    let mut report = DownloadReport::default();
    let total = plan.total_bytes;
    let mut completed = 0_u64;

    sink.stage(stage::DOWNLOAD_START, "Downloading");
    if !plan.queued.is_empty() {
        info!(
            "Downloading {} artifacts ({} bytes)",
            plan.queued.len(),
            total
        );
    }

    for artifact in &plan.queued {
        let dest = repo_dir.join(&artifact.name);
        let before = completed;
        debug!("Downloading {}", artifact.name);

        let result = downloader
            .download_verified(&artifact.path, &dest, &artifact.hash, |done| {
                sink.download(
                    stage::DOWNLOAD_START,
                    stage::DOWNLOAD_END,
                    &artifact.name,
                    before.saturating_add(done),
                    total,
                )
            })
            .await;

        match result {
            Ok(_) => {
                completed = completed.saturating_add(artifact.size);
                report.downloaded.push(artifact.name.clone());
            }
            Err(err @ LauncherError::HashMismatch { .. }) => {
                warn!("Unable to verify {}: {}", artifact.name, err);
                report.unverified.push(artifact.name.clone());
            }
            Err(err) => return Err(err),
        }
    }

    Ok(report)
}
