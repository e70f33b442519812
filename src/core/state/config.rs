use crate::core::channel::Channel;
use crate::core::launch::runtime::HostRuntime;
use crate::core::platform::HostPlatform;

use super::paths::LauncherPaths;
use super::settings::LauncherSettings;

const MANIFEST_URL_ENV: &str = "BOOTSTRAPPER_MANIFEST_URL";
pub const DEFAULT_ENTRY_POINT: &str = "net.bootstrapper.client.Client";

/// Everything the pipeline needs to know about this machine and this
/// launcher build. Built once before the pipeline starts, never mutated.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub paths: LauncherPaths,
    pub launcher_version: String,
    pub host: HostPlatform,
    pub runtime: HostRuntime,
    pub entry_point: String,
    /// Replaces every channel's manifest URL when set.
    pub manifest_url_override: Option<String>,
}

impl BootstrapConfig {
    pub fn new(paths: LauncherPaths, settings: &LauncherSettings, runtime: HostRuntime) -> Self {
        Self {
            paths,
            launcher_version: env!("CARGO_PKG_VERSION").to_string(),
            host: HostPlatform::current(),
            runtime,
            entry_point: settings
                .entry_point
                .clone()
                .unwrap_or_else(|| DEFAULT_ENTRY_POINT.to_string()),
            manifest_url_override: std::env::var(MANIFEST_URL_ENV)
                .ok()
                .filter(|url| !url.trim().is_empty()),
        }
    }

    pub fn manifest_url(&self, channel: Channel) -> String {
        self.manifest_url_override
            .clone()
            .unwrap_or_else(|| channel.default_manifest_url().to_string())
    }
}
