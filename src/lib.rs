pub mod cli;
pub mod commands;
pub mod core;

use std::io::{BufRead, Write};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tokio::sync::oneshot;
use tracing::{error, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::Cli;
use crate::commands::LaunchOptions;
use crate::core::channel::{self, Channel};
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::launch::{HostRuntime, Launched};
use crate::core::platform::{NoopPlatformHook, PlatformHook};
use crate::core::progress::LogProgress;
use crate::core::state::{BootstrapConfig, LauncherPaths, LauncherSettings};

const LOG_FILE_NAME: &str = "launcher.log";

pub fn run() -> ExitCode {
    let cli = Cli::parse_from(cli::split_args(
        std::env::args_os().map(|arg| arg.to_string_lossy().into_owned()),
    ));
    let paths = LauncherPaths::from_env();
    init_logging(&paths, cli.debug);

    info!("Bootstrapper {} starting...", env!("CARGO_PKG_VERSION"));

    let settings = LauncherSettings::load(&paths.settings_file());
    let runtime = HostRuntime::discover(settings.runtime_path.as_deref());
    let config = BootstrapConfig::new(paths, &settings, runtime);

    NoopPlatformHook.prepare(&config.host);

    let tokio_rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => {
            error!("Unable to start the async runtime: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let channel = match tokio_rt.block_on(resolve_channel(&cli, &settings)) {
        Ok(channel) => channel,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let options = LaunchOptions::resolve(&cli, &settings, &config, channel);

    if cli.postinstall {
        return match tokio_rt.block_on(commands::postinstall(&config, &options)) {
            Ok(()) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        };
    }

    match tokio_rt.block_on(commands::launch(&config, &options, &LogProgress)) {
        Ok(Launched::Spawned(_)) => ExitCode::SUCCESS,
        Ok(Launched::Finished(status)) => {
            ExitCode::from(status.code().and_then(|c| u8::try_from(c).ok()).unwrap_or(1))
        }
        Err(_) => ExitCode::FAILURE,
    }
}

/// Stderr always; the log file when the logs directory is writable.
fn init_logging(paths: &LauncherPaths, debug: bool) {
    let default_filter = if debug {
        "info,bootstrapper_lib=debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let log_file = paths.ensure_dirs().and_then(|()| {
        let path = paths.logs_dir().join(LOG_FILE_NAME);
        std::fs::File::create(&path).map_err(|source| LauncherError::Io { path, source })
    });
    let (file_layer, file_error) = match log_file {
        Ok(file) => (
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            ),
            None,
        ),
        Err(err) => (None, Some(err)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    if let Some(err) = file_error {
        warn!("Logging to stderr only: {}", err);
    }
}

/// Flags, then the persisted channel, then ask. Post-install never asks.
async fn resolve_channel(cli: &Cli, settings: &LauncherSettings) -> LauncherResult<Channel> {
    if let Some(channel) =
        channel::resolve_without_prompt(cli.channel(), settings.ask_mode, settings.bootstrap_channel)
    {
        return Ok(channel);
    }

    if cli.postinstall {
        return Ok(settings.bootstrap_channel.unwrap_or(Channel::Stable));
    }

    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || prompt_for_channel(tx));
    channel::await_choice(rx).await
}

/// Reads the choice from stdin. Dropping `tx` without sending (EOF) means
/// no channel was chosen.
fn prompt_for_channel(tx: oneshot::Sender<Channel>) {
    let stdin = std::io::stdin();
    let mut stderr = std::io::stderr();

    loop {
        let _ = writeln!(stderr, "Select an update channel:");
        for (i, channel) in Channel::ALL.iter().enumerate() {
            let _ = writeln!(stderr, "  {}) {}", i + 1, channel.label());
        }
        let _ = write!(stderr, "> ");
        let _ = stderr.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        let answer = line.trim();
        let choice = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Channel::ALL.get(i).copied())
            .or_else(|| Channel::parse(answer));

        if let Some(channel) = choice {
            let _ = tx.send(channel);
            return;
        }
    }
}
