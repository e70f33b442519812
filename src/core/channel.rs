// ─── Update Channel ───
// Immutable channel value threaded through the pipeline, plus the one-shot
// handoff used when the user picks it interactively.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tracing::info;

use crate::core::error::{LauncherError, LauncherResult};

const STABLE_MANIFEST_URL: &str = "https://bootstrap.example.org/bootstrap-stable.json";
const NIGHTLY_MANIFEST_URL: &str = "https://bootstrap.example.org/bootstrap-nightly.json";
const STAGING_MANIFEST_URL: &str = "https://bootstrap.example.org/bootstrap-staging.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Stable,
    Nightly,
    Staging,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Stable, Channel::Nightly, Channel::Staging];

    pub fn default_manifest_url(self) -> &'static str {
        match self {
            Channel::Stable => STABLE_MANIFEST_URL,
            Channel::Nightly => NIGHTLY_MANIFEST_URL,
            Channel::Staging => STAGING_MANIFEST_URL,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::Stable => "Stable",
            Channel::Nightly => "Nightly",
            Channel::Staging => "Staging",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "stable" => Some(Channel::Stable),
            "nightly" => Some(Channel::Nightly),
            "staging" => Some(Channel::Staging),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pick the channel without asking: explicit flag first, then the persisted
/// choice when the user turned off the prompt.
pub fn resolve_without_prompt(
    flag: Option<Channel>,
    ask_mode: bool,
    persisted: Option<Channel>,
) -> Option<Channel> {
    flag.or(if ask_mode { None } else { persisted })
}

/// Wait for the interactive chooser to hand over exactly one channel.
///
/// The pipeline must not start until this resolves.
pub async fn await_choice(choice: oneshot::Receiver<Channel>) -> LauncherResult<Channel> {
    let channel = choice
        .await
        .map_err(|_| LauncherError::Other("No update channel was selected".into()))?;
    info!("Update channel selected: {}", channel);
    Ok(channel)
}
