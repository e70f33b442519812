// ─── Host Runtime ───
// Locates the application runtime binary and queries its version once.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, instrument, warn};

/// The runtime the application will run on, whichever strategy is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRuntime {
    pub binary: PathBuf,
    /// `None` when the binary could not be queried.
    pub version: Option<String>,
}

impl HostRuntime {
    /// Discover and query the version. An explicit binary from settings wins.
    pub fn discover(explicit: Option<&Path>) -> Self {
        let binary = explicit
            .map(Path::to_path_buf)
            .or_else(java_home_binary)
            .or_else(bundled_binary)
            .unwrap_or_else(|| PathBuf::from(java_exe()));

        let version = query_version(&binary);
        if version.is_none() {
            warn!("Unable to determine version of runtime {:?}", binary);
        }

        Self { binary, version }
    }
}

fn java_exe() -> &'static str {
    if cfg!(target_os = "windows") {
        "java.exe"
    } else {
        "java"
    }
}

fn java_home_binary() -> Option<PathBuf> {
    let home = std::env::var_os("JAVA_HOME").filter(|v| !v.is_empty())?;
    let candidate = PathBuf::from(home).join("bin").join(java_exe());
    candidate.is_file().then_some(candidate)
}

/// A runtime shipped next to the launcher executable (`jre/bin/java`).
fn bundled_binary() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let candidate = exe.parent()?.join("jre").join("bin").join(java_exe());
    candidate.is_file().then_some(candidate)
}

#[instrument]
pub fn query_version(binary: &Path) -> Option<String> {
    let output = Command::new(binary).arg("-version").output().ok()?;

    let version_output = format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stderr),
        String::from_utf8_lossy(&output.stdout)
    );
    debug!(
        "Probing {:?}: {}",
        binary,
        version_output.lines().next().unwrap_or("")
    );

    parse_version_string(&version_output)
}

/// First double-quoted token, e.g. `openjdk version "17.0.9" 2023-10-17`.
fn parse_version_string(output: &str) -> Option<String> {
    output.lines().find_map(|line| {
        let start = line.find('"')?;
        let rest = &line[start + 1..];
        let end = rest.find('"')?;
        Some(rest[..end].to_string())
    })
}
