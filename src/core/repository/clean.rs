use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::version::Artifact;

/// Filenames that must survive cleanup: every selected artifact plus every
/// predecessor a selected artifact can be diffed from.
pub fn retain_set(selected: &[Artifact]) -> HashSet<String> {
    let mut names = HashSet::new();
    for artifact in selected {
        names.insert(artifact.name.clone());
        names.extend(artifact.diff_sources().map(str::to_string));
    }
    names
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

/// Delete top-level files in `repo_dir` that are not in the retain set.
///
/// Best effort: a missing directory or a failed delete is logged, never
/// returned as an error.
pub fn clean(repo_dir: &Path, selected: &[Artifact]) -> CleanReport {
    let mut report = CleanReport::default();

    let entries = match std::fs::read_dir(repo_dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!("Skipping cache cleanup of {:?}: {}", repo_dir, err);
            return report;
        }
    };

    let keep = retain_set(selected);

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if keep.contains(&name) {
            continue;
        }

        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!("Deleted old artifact {:?}", path);
                report.deleted.push(name);
            }
            Err(err) => {
                warn!("Unable to delete old artifact {:?}: {}", path, err);
                report.failed.push(name);
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::version::Diff;

    fn artifact(name: &str, diffs: &[&str]) -> Artifact {
        Artifact {
            name: name.into(),
            path: String::new(),
            hash: "00".into(),
            size: 0,
            platform: None,
            diffs: Some(
                diffs
                    .iter()
                    .map(|from| Diff {
                        from: from.to_string(),
                    })
                    .collect(),
            ),
        }
    }

    #[test]
    fn retain_set_includes_diff_sources() {
        let keep = retain_set(&[artifact("client-2.jar", &["client-1.jar"])]);
        assert!(keep.contains("client-2.jar"));
        assert!(keep.contains("client-1.jar"));
        assert_eq!(keep.len(), 2);
    }

    #[test]
    fn deletes_only_unreferenced_files() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        for name in ["client-2.jar", "client-1.jar", "client-0.jar", "stray.txt"] {
            std::fs::write(dir.join(name), name).unwrap();
        }
        std::fs::create_dir(dir.join("subdir")).unwrap();

        let mut report = clean(dir, &[artifact("client-2.jar", &["client-1.jar"])]);
        report.deleted.sort();

        assert_eq!(report.deleted, vec!["client-0.jar", "stray.txt"]);
        assert!(report.failed.is_empty());
        assert!(dir.join("client-2.jar").exists());
        assert!(dir.join("client-1.jar").exists());
        assert!(dir.join("subdir").is_dir());
    }

    #[test]
    fn missing_directory_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let report = clean(&tmp.path().join("nope"), &[]);
        assert_eq!(report, CleanReport::default());
    }
}
