use std::path::{Path, PathBuf};

use crate::core::error::{LauncherError, LauncherResult};

const APP_DIR_NAME: &str = ".bootstrapper";
const HOME_OVERRIDE_ENV: &str = "BOOTSTRAPPER_HOME";
const CRASH_FILE_PATTERN: &str = "runtime_crash_pid_%p.log";

/// On-disk layout of the launcher's home directory.
#[derive(Debug, Clone)]
pub struct LauncherPaths {
    base_dir: PathBuf,
}

impl LauncherPaths {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// `$BOOTSTRAPPER_HOME`, or `~/.bootstrapper`.
    pub fn from_env() -> Self {
        if let Some(dir) = std::env::var_os(HOME_OVERRIDE_ENV).filter(|v| !v.is_empty()) {
            return Self::new(dir);
        }

        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(home.join(APP_DIR_NAME))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Content-addressed artifact cache.
    pub fn repository_dir(&self) -> PathBuf {
        self.base_dir.join("repository")
    }

    /// Crash dump location handed to the runtime. `%p` expands to the pid.
    pub fn crash_files(&self) -> PathBuf {
        self.logs_dir().join(CRASH_FILE_PATTERN)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }

    pub fn vm_args_file(&self) -> PathBuf {
        self.base_dir.join("launcher_vmargs.json")
    }

    pub fn ensure_dirs(&self) -> LauncherResult<()> {
        for dir in [self.logs_dir(), self.repository_dir()] {
            std::fs::create_dir_all(&dir).map_err(|source| LauncherError::Io {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}
