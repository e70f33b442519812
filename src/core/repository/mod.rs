// ─── Artifact Repository ───
// Reconciles the local artifact cache against the manifest:
// select → clean → download → verify.

pub mod clean;
pub mod select;
pub mod sync;
pub mod verify;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::downloader::Downloader;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::platform::HostPlatform;
use crate::core::progress::{stage, ProgressSink};
use crate::core::version::{Artifact, Manifest};

pub use clean::{clean, retain_set, CleanReport};
pub use select::select_artifacts;
pub use sync::{download_all, plan_downloads, DownloadPlan, DownloadReport};
pub use verify::verify_all;

/// Outcome of a successful synchronization.
#[derive(Debug)]
pub struct SyncedArtifacts {
    pub selected: Vec<Artifact>,
    /// Cache paths of `selected`, in manifest order.
    pub classpath: Vec<PathBuf>,
    pub report: DownloadReport,
}

pub struct ArtifactSynchronizer<'a> {
    repo_dir: &'a Path,
    downloader: &'a Downloader,
}

impl<'a> ArtifactSynchronizer<'a> {
    pub fn new(repo_dir: &'a Path, downloader: &'a Downloader) -> Self {
        Self {
            repo_dir,
            downloader,
        }
    }

    pub async fn sync(
        &self,
        manifest: &Manifest,
        host: &HostPlatform,
        sink: &dyn ProgressSink,
    ) -> LauncherResult<SyncedArtifacts> {
        std::fs::create_dir_all(self.repo_dir).map_err(|source| LauncherError::Io {
            path: self.repo_dir.to_path_buf(),
            source,
        })?;

        let selected = select_artifacts(manifest, host);
        info!(
            "{} of {} artifacts apply to {} ({})",
            selected.len(),
            manifest.artifacts.len(),
            host.family,
            host.arch
        );

        let cleaned = clean(self.repo_dir, &selected);
        if !cleaned.deleted.is_empty() {
            info!("Removed {} stale cache files", cleaned.deleted.len());
        }

        let report = {
            let plan = plan_downloads(self.repo_dir, &selected)?;
            download_all(self.downloader, self.repo_dir, &plan, sink).await?
        };

        sink.stage(stage::VERIFY, "Verifying");
        verify_all(self.repo_dir, &selected)?;

        let classpath = selected
            .iter()
            .map(|artifact| self.repo_dir.join(&artifact.name))
            .collect();

        Ok(SyncedArtifacts {
            selected,
            classpath,
            report,
        })
    }
}
