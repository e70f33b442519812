use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the whole bootstrap pipeline.
/// Every stage returns `Result<T, LauncherError>`.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    // ── Parsing ─────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    // ── Version gate ────────────────────────────────────
    #[error("Launcher {current} is older than the required {required}")]
    LauncherTooOld { required: String, current: String },

    #[error("Runtime {current} is older than the required {required}")]
    RuntimeTooOld { required: String, current: String },

    #[error("Launcher {current} is below the minimum supported {minimum}")]
    LauncherOutdated { minimum: String, current: String },

    // ── Integrity ───────────────────────────────────────
    #[error("SHA-256 mismatch for {name}: expected {expected}, got {actual}")]
    HashMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("Unable to verify {name}: {reason}")]
    Verification { name: String, reason: String },

    // ── Launch ──────────────────────────────────────────
    #[error("Launch failed: {0}")]
    Launch(String),

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;

impl From<std::io::Error> for LauncherError {
    fn from(source: std::io::Error) -> Self {
        LauncherError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

/// Coarse failure classes the progress surface renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parse,
    VersionIncompatible,
    Verification,
    Launch,
    Unexpected,
}

impl LauncherError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LauncherError::Http(_) | LauncherError::DownloadFailed { .. } => {
                ErrorCategory::Network
            }
            LauncherError::Json(_) | LauncherError::Parse(_) => ErrorCategory::Parse,
            LauncherError::LauncherTooOld { .. }
            | LauncherError::RuntimeTooOld { .. }
            | LauncherError::LauncherOutdated { .. } => ErrorCategory::VersionIncompatible,
            LauncherError::HashMismatch { .. } | LauncherError::Verification { .. } => {
                ErrorCategory::Verification
            }
            LauncherError::Launch(_) => ErrorCategory::Launch,
            LauncherError::Io { .. } | LauncherError::Other(_) => ErrorCategory::Unexpected,
        }
    }

    /// Title and body shown to the user for this failure.
    ///
    /// The three version gate failures each get their own wording so the
    /// user knows whether to update the launcher or the runtime.
    pub fn user_message(&self) -> (String, String) {
        const SEE_LOGS: &str = "You have encountered an issue, please check your log files for a more detailed error message.";

        match self {
            LauncherError::RuntimeTooOld { required, .. } => (
                "Your runtime installation is too old".into(),
                format!(
                    "The application now requires runtime {required}. Install a newer runtime or a launcher bundle that ships one."
                ),
            ),
            LauncherError::LauncherOutdated { .. } => (
                "Your launcher is outdated!".into(),
                "The launcher you're using is outdated. Please download a newer version of the launcher.".into(),
            ),
            _ => {
                let title = match self.category() {
                    ErrorCategory::Network => "Error while downloading the bootstrap!",
                    ErrorCategory::Parse => "Error while reading the bootstrap!",
                    ErrorCategory::VersionIncompatible => "Error while downloading the client!",
                    ErrorCategory::Verification => "Error while verifying downloaded files!",
                    ErrorCategory::Launch => "Error while starting the client!",
                    ErrorCategory::Unexpected => "Error during startup!",
                };
                (title.into(), SEE_LOGS.into())
            }
        }
    }
}
