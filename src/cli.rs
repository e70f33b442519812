//! Command line surface of the `bootstrapper` binary.

use clap::{ArgGroup, CommandFactory, Parser};

use crate::core::channel::Channel;
use crate::core::launch::HardwareAccelerationMode;

#[derive(Debug, Parser)]
#[command(name = "bootstrapper")]
#[command(about = "Keeps the client up to date and starts it", version)]
#[command(group(ArgGroup::new("channel").args(["stable", "nightly", "staging"])))]
pub struct Cli {
    /// Extra arguments for the client, space separated
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub clientargs: Option<String>,

    /// Run the client in the launcher process instead of spawning a runtime
    #[arg(long)]
    pub nojvm: bool,

    /// UI scaling factor for the client
    #[arg(long, value_name = "SCALE")]
    pub scale: Option<f64>,

    /// Accept invalid TLS certificates (launcher and client)
    #[arg(long)]
    pub insecure_skip_tls_verification: bool,

    /// Keep the runtime's bundled trust store on Windows
    #[arg(long)]
    pub use_jre_truststore: bool,

    /// Hardware acceleration mode
    #[arg(long, value_enum, ignore_case = true)]
    pub mode: Option<HardwareAccelerationMode>,

    /// Use the stable update channel
    #[arg(long)]
    pub stable: bool,

    /// Use the nightly update channel
    #[arg(long)]
    pub nightly: bool,

    /// Use the staging update channel
    #[arg(long)]
    pub staging: bool,

    /// Write the launcher VM arguments and exit without launching
    #[arg(long)]
    pub postinstall: bool,

    /// Verbose logging, also forwarded to the client
    #[arg(long)]
    pub debug: bool,

    /// Arguments passed to the client unchanged
    #[arg(value_name = "CLIENT_ARGS")]
    pub passthrough: Vec<String>,
}

/// Reorder a raw command line so options are recognised anywhere in it.
///
/// Launcher options keep their place in front; every other token (positional
/// or an option the launcher does not know) moves behind `--`, in order, and
/// reaches the client untouched. The macOS process serial number
/// (`-psn_0_1234`) is dropped.
pub fn split_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut command = Cli::command();
    command.build();

    let mut args = args.into_iter();
    let mut known: Vec<String> = args.next().into_iter().collect();
    let mut passthrough = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--" {
            passthrough.extend(args.by_ref());
            break;
        }
        if is_process_serial(&arg) {
            continue;
        }

        match option_takes_value(&command, &arg) {
            Some(true) => {
                known.push(arg);
                known.extend(args.next());
            }
            Some(false) => known.push(arg),
            None => passthrough.push(arg),
        }
    }

    if !passthrough.is_empty() {
        known.push("--".to_string());
        known.extend(passthrough);
    }
    known
}

/// `None` when `arg` is not one of the launcher's own options.
fn option_takes_value(command: &clap::Command, arg: &str) -> Option<bool> {
    if matches!(arg, "-h" | "-V") {
        return Some(false);
    }

    let long = arg.strip_prefix("--")?;
    let (name, inline_value) = match long.split_once('=') {
        Some((name, _)) => (name, true),
        None => (long, false),
    };

    let option = command
        .get_arguments()
        .find(|option| option.get_long() == Some(name))?;
    Some(option.get_action().takes_values() && !inline_value)
}

fn is_process_serial(arg: &str) -> bool {
    cfg!(target_os = "macos") && arg.starts_with("-psn_")
}

impl Cli {
    pub fn channel(&self) -> Option<Channel> {
        if self.stable {
            Some(Channel::Stable)
        } else if self.nightly {
            Some(Channel::Nightly)
        } else if self.staging {
            Some(Channel::Staging)
        } else {
            None
        }
    }
}
