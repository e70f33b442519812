use crate::core::platform::HostPlatform;
use crate::core::version::{Artifact, Manifest};

/// Artifacts this host needs, in manifest order.
pub fn select_artifacts(manifest: &Manifest, host: &HostPlatform) -> Vec<Artifact> {
    manifest
        .artifacts
        .iter()
        .filter(|artifact| artifact.applies_to(host))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::version::Platform;

    fn artifact(name: &str, platforms: Option<Vec<Platform>>) -> Artifact {
        Artifact {
            name: name.into(),
            path: format!("https://example.com/{name}"),
            hash: "00".into(),
            size: 1,
            platform: platforms,
            diffs: None,
        }
    }

    fn on(name: &str, arch: Option<&str>) -> Platform {
        Platform {
            name: Some(name.into()),
            arch: arch.map(str::to_string),
        }
    }

    #[test]
    fn keeps_unconstrained_and_matching_in_order() {
        let manifest = Manifest {
            artifacts: vec![
                artifact("win.jar", Some(vec![on("Windows", None)])),
                artifact("common.jar", None),
                artifact("linux-arm.jar", Some(vec![on("Linux", Some("aarch64"))])),
                artifact("linux-x64.jar", Some(vec![on("Linux", Some("amd64"))])),
                artifact("any-of.jar", Some(vec![on("Windows", None), on("Linux", None)])),
            ],
            ..Manifest::default()
        };

        let selected = select_artifacts(&manifest, &HostPlatform::new("linux", "amd64"));
        let names: Vec<_> = selected.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["common.jar", "linux-x64.jar", "any-of.jar"]);
    }

    #[test]
    fn empty_platform_list_is_unconstrained() {
        let manifest = Manifest {
            artifacts: vec![artifact("everywhere.jar", Some(Vec::new()))],
            ..Manifest::default()
        };
        assert_eq!(
            select_artifacts(&manifest, &HostPlatform::new("linux", "amd64")).len(),
            1
        );
    }
}
