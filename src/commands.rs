//! Top-level commands: the full launch pipeline and the post-install step.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::cli::Cli;
use crate::core::channel::Channel;
use crate::core::downloader::Downloader;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::http::build_http_client;
use crate::core::launch::{
    self, build_classpath, ArgSources, HardwareAccelerationMode, LaunchPlan, LaunchStrategy,
    Launched, PropertyInputs, RuntimeProperties,
};
use crate::core::progress::{stage, ProgressSink, SplashGuard};
use crate::core::repository::ArtifactSynchronizer;
use crate::core::state::{BootstrapConfig, LauncherSettings};
use crate::core::version::{gate, GateInput, Manifest};

const NOJVM_ENV: &str = "BOOTSTRAPPER_NOJVM";

/// Per-run choices, resolved from the command line, settings and environment.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub channel: Channel,
    pub strategy: LaunchStrategy,
    pub insecure_skip_tls_verification: bool,
    pub use_jre_truststore: bool,
    pub scale: Option<String>,
    pub mode: HardwareAccelerationMode,
    pub args: ArgSources,
}

impl LaunchOptions {
    pub fn resolve(
        cli: &Cli,
        settings: &LauncherSettings,
        config: &BootstrapConfig,
        channel: Channel,
    ) -> Self {
        let no_jvm = cli.nojvm
            || settings.no_jvm
            || std::env::var(NOJVM_ENV).is_ok_and(|v| v.eq_ignore_ascii_case("true"));

        let mode = if settings.disable_hardware_acceleration {
            HardwareAccelerationMode::Off
        } else {
            cli.mode
                .unwrap_or_else(|| HardwareAccelerationMode::default_for(config.host.family))
        };

        Self {
            channel,
            strategy: LaunchStrategy::from_no_jvm(no_jvm),
            insecure_skip_tls_verification: cli.insecure_skip_tls_verification,
            use_jre_truststore: cli.use_jre_truststore,
            scale: cli.scale.map(|scale| scale.to_string()),
            mode,
            args: ArgSources {
                passthrough: cli.passthrough.clone(),
                client_args: cli.clientargs.clone(),
                debug: cli.debug,
                ..ArgSources::default()
            }
            .with_process_env(),
        }
    }

    fn property_inputs(&self, config: &BootstrapConfig) -> PropertyInputs {
        PropertyInputs {
            family: config.host.family,
            launcher_version: config.launcher_version.clone(),
            scale: self.scale.clone(),
            mode: self.mode,
            insecure_skip_tls_verification: self.insecure_skip_tls_verification,
            use_jre_truststore: self.use_jre_truststore,
            crash_files: config.paths.crash_files(),
        }
    }
}

/// Run the whole pipeline and hand control to the application.
///
/// The progress surface is closed on every exit path. Failures are rendered
/// on it before being returned.
pub async fn launch(
    config: &BootstrapConfig,
    options: &LaunchOptions,
    sink: &dyn ProgressSink,
) -> LauncherResult<Launched> {
    let mut splash = SplashGuard::new(sink);

    let result = match prepare_launch(config, options, splash.sink()).await {
        Ok(plan) => hand_off(&plan, options.strategy, &mut splash),
        Err(err) => Err(err),
    };

    if let Err(err) = &result {
        error!("Launch failed: {}", err);
        if !splash.is_closed() {
            let (title, message) = err.user_message();
            splash.sink().error(&title, &message);
        }
    }

    result
}

/// An in-process hand-off replaces the process image, so the progress
/// surface is closed before it rather than by the guard.
fn hand_off(
    plan: &LaunchPlan,
    strategy: LaunchStrategy,
    splash: &mut SplashGuard<'_>,
) -> LauncherResult<Launched> {
    splash.sink().stage(stage::LAUNCH, "Starting the client");
    if strategy == LaunchStrategy::InProcess {
        splash.close();
    }
    launch::launch(plan, strategy)
}

/// Everything up to, but not including, the hand-off:
/// fetch → gate → sync → classpath and launch plan.
pub async fn prepare_launch(
    config: &BootstrapConfig,
    options: &LaunchOptions,
    sink: &dyn ProgressSink,
) -> LauncherResult<LaunchPlan> {
    sink.stage(stage::SETUP, "Setting up environment");
    log_environment(config, options);

    let client = build_http_client(options.insecure_skip_tls_verification)?;

    sink.stage(stage::MANIFEST, "Downloading bootstrap");
    let manifest_url = config.manifest_url(options.channel);
    let manifest = Manifest::fetch(&client, &manifest_url).await?;

    gate::check(
        &manifest,
        GateInput {
            launcher_version: &config.launcher_version,
            runtime_version: config.runtime.version.as_deref(),
            in_process: options.strategy == LaunchStrategy::InProcess,
        },
    )?;

    // Read by the native wrapper on its next start, never by this launch.
    let properties = RuntimeProperties::compute(&options.property_inputs(config));
    if let Err(err) = write_vm_args(config, &properties) {
        warn!("Unable to update launcher VM arguments: {}", err);
    }

    sink.stage(stage::TIDY, "Tidying the cache");
    let downloader = Downloader::new(client);
    let repo_dir = config.paths.repository_dir();
    let synced = ArtifactSynchronizer::new(&repo_dir, &downloader)
        .sync(&manifest, &config.host, sink)
        .await?;

    debug!("Downloaded {} artifacts", synced.report.downloaded.len());

    let classpath = build_classpath(&synced.classpath)?;

    Ok(LaunchPlan {
        runtime: config.runtime.binary.clone(),
        classpath,
        properties,
        entry_point: config.entry_point.clone(),
        args: options.args.assemble(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VmArgsFile<'a> {
    vm_args: &'a [String],
}

/// Non-interactive install step: record the runtime start-up parameters for
/// the native wrapper. The version gate is not consulted, so the file is
/// written even for a host that could not launch yet. Failures are logged
/// only.
pub async fn postinstall(config: &BootstrapConfig, options: &LaunchOptions) -> LauncherResult<()> {
    let result = run_postinstall(config, options).await;
    match &result {
        Ok(()) => info!("Performed post-install steps"),
        Err(err) => error!("Post-install failed: {}", err),
    }
    result
}

async fn run_postinstall(config: &BootstrapConfig, options: &LaunchOptions) -> LauncherResult<()> {
    let client = build_http_client(options.insecure_skip_tls_verification)?;
    // The channel must be reachable before the wrapper is pointed at it.
    Manifest::fetch(&client, &config.manifest_url(options.channel)).await?;

    let properties = RuntimeProperties::compute(&options.property_inputs(config));
    write_vm_args(config, &properties)
}

fn write_vm_args(config: &BootstrapConfig, properties: &RuntimeProperties) -> LauncherResult<()> {
    let path = config.paths.vm_args_file();
    write_json(
        &path,
        &VmArgsFile {
            vm_args: &properties.parameters,
        },
    )?;
    info!("Wrote launcher VM arguments to {:?}", path);
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> LauncherResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    let io_err = |source| LauncherError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, json).map_err(io_err)
}

fn log_environment(config: &BootstrapConfig, options: &LaunchOptions) {
    debug!("Launcher version: {}", config.launcher_version);
    debug!(
        "Host: {} ({}) arch {}",
        config.host.os_name, config.host.family, config.host.arch
    );
    debug!("Base directory: {:?}", config.paths.base_dir());
    debug!(
        "Runtime: {:?} version {}",
        config.runtime.binary,
        config.runtime.version.as_deref().unwrap_or("unknown")
    );
    debug!("Channel: {}", options.channel);
    debug!("Strategy: {:?}", options.strategy);
    debug!("Hardware acceleration mode: {}", options.mode);
}
