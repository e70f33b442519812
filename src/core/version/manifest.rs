// ─── Bootstrap Manifest ───
// Fetches and parses the remote manifest for an update channel. Fetched
// fresh on every run and never written to disk.

use std::path::{Component, Path};

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::platform::{HostPlatform, OsFamily};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default)]
    pub required_launcher_version: Option<String>,
    #[serde(default, alias = "requiredJVMVersion")]
    pub required_runtime_version: Option<String>,
    #[serde(default)]
    pub minimum_launcher_version: Option<String>,
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

/// One cache slot. `name` is its on-disk identity, `hash` its integrity key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Artifact {
    pub name: String,
    pub path: String,
    pub hash: String,
    pub size: u64,
    #[serde(default)]
    pub platform: Option<Vec<Platform>>,
    #[serde(default)]
    pub diffs: Option<Vec<Diff>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Platform {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arch: Option<String>,
}

/// Names a predecessor file that must survive cache cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Diff {
    pub from: String,
}

impl Platform {
    /// Family must match (raw OS name equality for families we don't know),
    /// and arch must be absent or exactly equal.
    pub fn matches(&self, host: &HostPlatform) -> bool {
        let Some(name) = self.name.as_deref() else {
            return false;
        };

        let family_matches = match OsFamily::parse(name) {
            OsFamily::Other => name == host.os_name,
            family => family == host.family,
        };

        family_matches && self.arch.as_deref().map_or(true, |arch| arch == host.arch)
    }
}

impl Artifact {
    /// Unconstrained artifacts (no list, or an empty one) apply everywhere.
    pub fn applies_to(&self, host: &HostPlatform) -> bool {
        match self.platform.as_deref() {
            None | Some([]) => true,
            Some(platforms) => platforms.iter().any(|p| p.matches(host)),
        }
    }

    /// Cache entries live directly in the repository directory, so a name
    /// must be a single plain file name.
    fn check_name(&self) -> LauncherResult<()> {
        let mut components = Path::new(&self.name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(LauncherError::Parse(format!(
                "Artifact name {:?} is not a plain file name",
                self.name
            ))),
        }
    }

    pub fn diff_sources(&self) -> impl Iterator<Item = &str> {
        self.diffs.iter().flatten().map(|diff| diff.from.as_str())
    }
}

impl Manifest {
    pub fn parse(raw: &str) -> LauncherResult<Self> {
        let manifest: Self = serde_json::from_str(raw)?;
        for artifact in &manifest.artifacts {
            artifact.check_name()?;
        }
        Ok(manifest)
    }

    /// Fetch the manifest from `url` using a shared HTTP client.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> LauncherResult<Self> {
        info!("Fetching bootstrap manifest from {}", url);

        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let raw = response.text().await?;
        let manifest = Self::parse(&raw)?;

        info!("Loaded {} artifacts from manifest", manifest.artifacts.len());
        debug!(
            "Manifest constraints: launcher={:?} runtime={:?} minimum={:?}",
            manifest.required_launcher_version,
            manifest.required_runtime_version,
            manifest.minimum_launcher_version
        );
        Ok(manifest)
    }
}
