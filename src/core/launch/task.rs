// ─── Launch Task ───
// Hands control to the application, either by becoming it or by spawning it.

use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus};

#[cfg(target_os = "windows")]
use std::os::windows::process::CommandExt;

use tracing::{debug, info};

use crate::core::error::{LauncherError, LauncherResult};

use super::properties::RuntimeProperties;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStrategy {
    /// The launcher process becomes the application.
    InProcess,
    /// A separate runtime process is started and left running.
    ChildProcess,
}

impl LaunchStrategy {
    pub fn from_no_jvm(no_jvm: bool) -> Self {
        if no_jvm {
            LaunchStrategy::InProcess
        } else {
            LaunchStrategy::ChildProcess
        }
    }
}

/// What happened once control left the launcher.
#[derive(Debug)]
pub enum Launched {
    /// Child-process strategy: the runtime is running, nobody waits for it.
    Spawned(Child),
    /// In-process strategy on hosts without `exec`: the application ran to
    /// completion in a runtime the launcher waited on.
    Finished(ExitStatus),
}

#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub runtime: PathBuf,
    pub classpath: String,
    pub properties: RuntimeProperties,
    pub entry_point: String,
    pub args: Vec<String>,
}

impl LaunchPlan {
    /// Runtime invocation for `strategy`.
    ///
    /// Start-up parameters are only passed to a freshly spawned runtime; the
    /// in-process path receives system properties alone, as a running
    /// runtime would.
    pub fn command(&self, strategy: LaunchStrategy) -> Command {
        let mut cmd = Command::new(&self.runtime);

        match strategy {
            LaunchStrategy::InProcess => {
                cmd.args(&self.properties.properties);
            }
            LaunchStrategy::ChildProcess => {
                cmd.args(self.properties.runtime_args());
            }
        }

        cmd.arg("-cp").arg(&self.classpath);
        cmd.arg(&self.entry_point);
        cmd.args(&self.args);
        cmd
    }
}

pub fn launch(plan: &LaunchPlan, strategy: LaunchStrategy) -> LauncherResult<Launched> {
    let mut cmd = plan.command(strategy);

    debug!("Classpath len={} value={:?}", plan.classpath.len(), plan.classpath);
    debug!("Command (copy/paste): {}", format_command_for_logs(&cmd));

    match strategy {
        LaunchStrategy::InProcess => {
            info!("Starting {} in the launcher process", plan.entry_point);
            replace_process(cmd)
        }
        LaunchStrategy::ChildProcess => {
            info!("Starting {} with runtime {:?}", plan.entry_point, plan.runtime);
            configure_platform_spawn(&mut cmd);
            let child = cmd
                .spawn()
                .map_err(|e| LauncherError::Launch(format!("Unable to start the runtime: {e}")))?;
            info!("Runtime started with pid {}", child.id());
            Ok(Launched::Spawned(child))
        }
    }
}

#[cfg(unix)]
fn replace_process(mut cmd: Command) -> LauncherResult<Launched> {
    use std::os::unix::process::CommandExt;

    // Only returns on failure.
    let err = cmd.exec();
    Err(LauncherError::Launch(format!(
        "Unable to hand the process over to the runtime: {err}"
    )))
}

#[cfg(not(unix))]
fn replace_process(mut cmd: Command) -> LauncherResult<Launched> {
    let status = cmd
        .status()
        .map_err(|e| LauncherError::Launch(format!("Unable to start the runtime: {e}")))?;
    Ok(Launched::Finished(status))
}

fn configure_platform_spawn(cmd: &mut Command) {
    #[cfg(target_os = "windows")]
    {
        // Keep the client alive after the launcher's console goes away.
        const DETACHED_PROCESS: u32 = 0x00000008;
        cmd.creation_flags(DETACHED_PROCESS);
    }
    #[cfg(not(target_os = "windows"))]
    let _ = cmd;
}

fn format_command_for_logs(cmd: &Command) -> String {
    let program = shell_escape(&cmd.get_program().to_string_lossy());
    let args = cmd
        .get_args()
        .map(|arg| shell_escape(&arg.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ");

    if args.is_empty() {
        program
    } else {
        format!("{} {}", program, args)
    }
}

fn shell_escape(raw: &str) -> String {
    if raw.is_empty() {
        return "\"\"".to_string();
    }

    if raw.chars().all(|ch| {
        ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '/' | ':' | '\\' | '=' | '%')
    }) {
        return raw.to_string();
    }

    format!("\"{}\"", raw.replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan() -> LaunchPlan {
        LaunchPlan {
            runtime: PathBuf::from("/opt/jre/bin/java"),
            classpath: "/c/a.jar:/c/b.jar".into(),
            properties: RuntimeProperties {
                properties: vec!["-Dx=1".into(), "-Dy=2".into()],
                parameters: vec!["-XX:ErrorFile=/logs/crash_%p.log".into()],
            },
            entry_point: "net.example.Client".into(),
            args: vec!["--world".into(), "301".into()],
        }
    }

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn child_process_gets_properties_then_parameters() {
        let cmd = plan().command(LaunchStrategy::ChildProcess);
        assert_eq!(cmd.get_program(), "/opt/jre/bin/java");
        assert_eq!(
            args_of(&cmd),
            vec![
                "-Dx=1",
                "-Dy=2",
                "-XX:ErrorFile=/logs/crash_%p.log",
                "-cp",
                "/c/a.jar:/c/b.jar",
                "net.example.Client",
                "--world",
                "301",
            ]
        );
    }

    #[test]
    fn in_process_uses_the_same_arguments_without_startup_parameters() {
        let cmd = plan().command(LaunchStrategy::InProcess);
        let args = args_of(&cmd);
        assert!(!args.iter().any(|a| a.starts_with("-XX:")));
        assert_eq!(&args[args.len() - 3..], ["net.example.Client", "--world", "301"]);
    }

    #[test]
    fn strategy_follows_no_jvm() {
        assert_eq!(LaunchStrategy::from_no_jvm(true), LaunchStrategy::InProcess);
        assert_eq!(LaunchStrategy::from_no_jvm(false), LaunchStrategy::ChildProcess);
    }

    #[test]
    fn log_format_quotes_only_when_needed() {
        let mut cmd = Command::new("java");
        cmd.arg("-Dname=a b").arg("-cp").arg("x.jar");
        assert_eq!(format_command_for_logs(&cmd), "java \"-Dname=a b\" -cp x.jar");
    }
}
