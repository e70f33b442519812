// ─── Classpath Builder ───
// Joins the verified cache entries into the runtime classpath.

use std::path::{Path, PathBuf};

use crate::core::error::{LauncherError, LauncherResult};

/// Platform-specific classpath separator.
pub fn get_classpath_separator() -> &'static str {
    if cfg!(target_os = "windows") {
        ";"
    } else {
        ":"
    }
}

/// Entries keep the manifest order; the runtime resolves classes first-wins.
pub fn build_classpath(entries: &[PathBuf]) -> LauncherResult<String> {
    let entries: Vec<String> = entries
        .iter()
        .map(|entry| safe_path_str(entry))
        .filter(|entry| !entry.trim().is_empty())
        .collect();

    if entries.is_empty() {
        return Err(LauncherError::Launch(
            "Classpath is empty, the manifest selected no artifacts for this host".into(),
        ));
    }

    Ok(entries.join(get_classpath_separator()))
}

pub fn safe_path_str(path: &Path) -> String {
    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let text = resolved.to_string_lossy().to_string();

    #[cfg(target_os = "windows")]
    {
        // The runtime rejects extended-length paths (`\\?\C:\...`) on the classpath.
        if let Some(stripped) = text.strip_prefix(r"\\?\") {
            return stripped.to_string();
        }
    }

    text
}
