// ─── Runtime Properties ───
// System properties and runtime parameters for the application runtime.
// Computed once per run; both launch strategies use the same values.

use std::fmt;
use std::path::PathBuf;

use crate::core::platform::OsFamily;

use super::classpath::safe_path_str;

pub const LAUNCHER_VERSION_KEY: &str = "bootstrapper.launcher.version";
pub const INSECURE_TLS_KEY: &str = "bootstrapper.insecure-skip-tls-verification";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum HardwareAccelerationMode {
    Off,
    Directdraw,
    Opengl,
}

impl HardwareAccelerationMode {
    pub fn default_for(family: OsFamily) -> Self {
        match family {
            OsFamily::Windows => HardwareAccelerationMode::Directdraw,
            OsFamily::MacOs => HardwareAccelerationMode::Opengl,
            OsFamily::Linux | OsFamily::Other => HardwareAccelerationMode::Off,
        }
    }

    pub fn to_properties(self, family: OsFamily) -> Vec<String> {
        let windows = family == OsFamily::Windows;
        let props: &[&str] = match (self, windows) {
            (HardwareAccelerationMode::Off, true) => &[
                "-Dsun.java2d.noddraw=true",
                "-Dsun.java2d.d3d=false",
                "-Dsun.java2d.opengl=false",
            ],
            (HardwareAccelerationMode::Off, false) => &["-Dsun.java2d.opengl=false"],
            (HardwareAccelerationMode::Directdraw, true) => {
                &["-Dsun.java2d.noddraw=false", "-Dsun.java2d.d3d=false"]
            }
            // DirectDraw only exists on Windows.
            (HardwareAccelerationMode::Directdraw, false) => &[],
            (HardwareAccelerationMode::Opengl, true) => {
                &["-Dsun.java2d.d3d=false", "-Dsun.java2d.opengl=true"]
            }
            (HardwareAccelerationMode::Opengl, false) => &["-Dsun.java2d.opengl=true"],
        };
        props.iter().map(|p| p.to_string()).collect()
    }
}

impl fmt::Display for HardwareAccelerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareAccelerationMode::Off => write!(f, "OFF"),
            HardwareAccelerationMode::Directdraw => write!(f, "DIRECTDRAW"),
            HardwareAccelerationMode::Opengl => write!(f, "OPENGL"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PropertyInputs {
    pub family: OsFamily,
    pub launcher_version: String,
    pub scale: Option<String>,
    pub mode: HardwareAccelerationMode,
    pub insecure_skip_tls_verification: bool,
    pub use_jre_truststore: bool,
    pub crash_files: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeProperties {
    /// `-Dkey=value` system properties.
    pub properties: Vec<String>,
    /// Parameters that can only be set when the runtime starts.
    pub parameters: Vec<String>,
}

impl RuntimeProperties {
    pub fn compute(inputs: &PropertyInputs) -> Self {
        let mut properties = Vec::new();

        if let Some(scale) = &inputs.scale {
            properties.push("-Dsun.java2d.dpiaware=true".to_string());
            properties.push(format!("-Dsun.java2d.uiScale={scale}"));
        }

        properties.extend(inputs.mode.to_properties(inputs.family));

        properties.push("-Djava.net.preferIPv4Stack=true".to_string());
        properties.push("-Djava.net.preferIPv4Addresses=true".to_string());

        if inputs.family == OsFamily::MacOs {
            properties.push("-Dapple.awt.application.appearance=system".to_string());
        }

        properties.push(format!(
            "-D{}={}",
            LAUNCHER_VERSION_KEY, inputs.launcher_version
        ));

        if inputs.insecure_skip_tls_verification {
            properties.push(format!("-D{INSECURE_TLS_KEY}=true"));
        }

        if inputs.family == OsFamily::Windows && !inputs.use_jre_truststore {
            properties.push("-Djavax.net.ssl.trustStoreType=Windows-ROOT".to_string());
        }

        let parameters = vec![format!("-XX:ErrorFile={}", safe_path_str(&inputs.crash_files))];

        Self {
            properties,
            parameters,
        }
    }

    /// Properties first, then parameters, as the runtime expects them.
    pub fn runtime_args(&self) -> impl Iterator<Item = &String> {
        self.properties.iter().chain(self.parameters.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(family: OsFamily) -> PropertyInputs {
        PropertyInputs {
            family,
            launcher_version: "1.2.3".into(),
            scale: None,
            mode: HardwareAccelerationMode::default_for(family),
            insecure_skip_tls_verification: false,
            use_jre_truststore: false,
            crash_files: PathBuf::from("/tmp/logs/runtime_crash_pid_%p.log"),
        }
    }

    #[test]
    fn linux_defaults() {
        let props = RuntimeProperties::compute(&inputs(OsFamily::Linux));
        assert_eq!(
            props.properties,
            vec![
                "-Dsun.java2d.opengl=false",
                "-Djava.net.preferIPv4Stack=true",
                "-Djava.net.preferIPv4Addresses=true",
                "-Dbootstrapper.launcher.version=1.2.3",
            ]
        );
        assert_eq!(
            props.parameters,
            vec!["-XX:ErrorFile=/tmp/logs/runtime_crash_pid_%p.log"]
        );
    }

    #[test]
    fn scale_comes_first() {
        let mut input = inputs(OsFamily::Linux);
        input.scale = Some("2".into());
        let props = RuntimeProperties::compute(&input);
        assert_eq!(props.properties[0], "-Dsun.java2d.dpiaware=true");
        assert_eq!(props.properties[1], "-Dsun.java2d.uiScale=2");
    }

    #[test]
    fn windows_uses_system_truststore_unless_told_otherwise() {
        let trust = "-Djavax.net.ssl.trustStoreType=Windows-ROOT".to_string();

        let props = RuntimeProperties::compute(&inputs(OsFamily::Windows));
        assert_eq!(props.properties.last(), Some(&trust));

        let mut input = inputs(OsFamily::Windows);
        input.use_jre_truststore = true;
        assert!(!RuntimeProperties::compute(&input).properties.contains(&trust));
    }

    #[test]
    fn insecure_flag_is_forwarded() {
        let mut input = inputs(OsFamily::MacOs);
        input.insecure_skip_tls_verification = true;
        let props = RuntimeProperties::compute(&input);
        assert!(props
            .properties
            .contains(&"-Dbootstrapper.insecure-skip-tls-verification=true".to_string()));
        assert!(props
            .properties
            .contains(&"-Dapple.awt.application.appearance=system".to_string()));
    }

    #[test]
    fn default_mode_follows_family() {
        assert_eq!(
            HardwareAccelerationMode::default_for(OsFamily::Windows),
            HardwareAccelerationMode::Directdraw
        );
        assert_eq!(
            HardwareAccelerationMode::default_for(OsFamily::MacOs),
            HardwareAccelerationMode::Opengl
        );
        assert!(HardwareAccelerationMode::Directdraw
            .to_properties(OsFamily::Linux)
            .is_empty());
    }
}
