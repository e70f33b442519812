// ─── Host Platform ───
// Normalized (OS family, arch) descriptor used to select artifacts and
// pick platform-specific runtime properties.

use std::fmt;

/// Operating system families the manifest knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl OsFamily {
    /// Parse a manifest/OS name. Anything unrecognized is `Other`.
    pub fn parse(name: &str) -> Self {
        let lower = name.trim().to_ascii_lowercase();
        if lower.starts_with("windows") {
            OsFamily::Windows
        } else if lower.starts_with("mac") || lower.starts_with("darwin") || lower == "osx" {
            OsFamily::MacOs
        } else if lower.starts_with("linux") {
            OsFamily::Linux
        } else {
            OsFamily::Other
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsFamily::Windows => write!(f, "windows"),
            OsFamily::MacOs => write!(f, "macos"),
            OsFamily::Linux => write!(f, "linux"),
            OsFamily::Other => write!(f, "other"),
        }
    }
}

/// The machine the launcher runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPlatform {
    pub family: OsFamily,
    /// Raw OS name, compared verbatim against unrecognized manifest names.
    pub os_name: String,
    pub arch: String,
}

impl HostPlatform {
    pub fn new(os_name: impl Into<String>, arch: impl Into<String>) -> Self {
        let os_name = os_name.into();
        Self {
            family: OsFamily::parse(&os_name),
            os_name,
            arch: arch.into(),
        }
    }

    pub fn current() -> Self {
        Self::new(std::env::consts::OS, runtime_arch())
    }
}

/// Host-specific preparation run once before the pipeline starts, e.g.
/// blocking known-bad native libraries. The core only calls it.
pub trait PlatformHook: Send + Sync {
    fn prepare(&self, host: &HostPlatform);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPlatformHook;

impl PlatformHook for NoopPlatformHook {
    fn prepare(&self, _host: &HostPlatform) {}
}

/// Architecture names as the manifest spells them.
fn runtime_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        other => other,
    }
}
