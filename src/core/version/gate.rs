// ─── Version Gate ───
// Decides whether this launcher and runtime may run the fetched manifest.
// Runs after the manifest fetch and before any artifact is touched.

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::core::error::{LauncherError, LauncherResult};

use super::compare::{compare_semver, compare_tokenized};
use super::manifest::Manifest;

/// What the gate compares the manifest against.
#[derive(Debug, Clone, Copy)]
pub struct GateInput<'a> {
    pub launcher_version: &'a str,
    /// `None` when the runtime could not be queried.
    pub runtime_version: Option<&'a str>,
    /// The application will run on the launcher's own runtime.
    pub in_process: bool,
}

fn is_newer(required: &str, current: &str) -> bool {
    compare_tokenized(required, current) == Ordering::Greater
}

/// Checks, in order:
/// 1. required launcher version, tokenized comparison;
/// 2. required runtime version, tokenized comparison. Fatal in-process, and
///    also fatal when spawning because the child runs on the same runtime;
/// 3. minimum launcher version, strict semver comparison.
pub fn check(manifest: &Manifest, input: GateInput<'_>) -> LauncherResult<()> {
    if let Some(required) = manifest.required_launcher_version.as_deref() {
        if is_newer(required, input.launcher_version) {
            return Err(LauncherError::LauncherTooOld {
                required: required.to_string(),
                current: input.launcher_version.to_string(),
            });
        }
    }

    if let Some(required) = manifest.required_runtime_version.as_deref() {
        match input.runtime_version {
            Some(current) if is_newer(required, current) => {
                if input.in_process {
                    debug!("In-process launch cannot fall back to a newer runtime");
                }
                return Err(LauncherError::RuntimeTooOld {
                    required: required.to_string(),
                    current: current.to_string(),
                });
            }
            Some(_) => {}
            None => warn!(
                "Unable to determine runtime version, skipping required runtime {} check",
                required
            ),
        }
    }

    if let Some(minimum) = manifest.minimum_launcher_version.as_deref() {
        if compare_semver(input.launcher_version, minimum)? == Ordering::Less {
            return Err(LauncherError::LauncherOutdated {
                minimum: minimum.to_string(),
                current: input.launcher_version.to_string(),
            });
        }
    }

    Ok(())
}
