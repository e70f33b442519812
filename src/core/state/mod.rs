pub mod config;
pub mod paths;
pub mod settings;

pub use config::BootstrapConfig;
pub use paths::LauncherPaths;
pub use settings::LauncherSettings;
