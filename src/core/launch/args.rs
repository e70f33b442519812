// ─── Client Arguments ───
// Final argument list handed to the application, identical for both launch
// strategies.

/// First extra-arguments source, read after the command line.
pub const PRIMARY_ARGS_ENV: &str = "BOOTSTRAPPER_CLIENT_ARGS";
/// Second extra-arguments source, read after the first.
pub const SECONDARY_ARGS_ENV: &str = "BOOTSTRAPPER_ARGS";

pub const DEBUG_FLAG: &str = "--debug";

/// Space-delimited, trimmed, empty tokens dropped.
pub fn split_extra_args(raw: &str) -> impl Iterator<Item = String> + '_ {
    raw.split(' ')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

#[derive(Debug, Clone, Default)]
pub struct ArgSources {
    /// Non-option command line arguments, in their original order.
    pub passthrough: Vec<String>,
    /// Value of `--clientargs`.
    pub client_args: Option<String>,
    pub primary_env: Option<String>,
    pub secondary_env: Option<String>,
    pub debug: bool,
}

impl ArgSources {
    /// Fill the environment sources from the process environment.
    pub fn with_process_env(mut self) -> Self {
        self.primary_env = std::env::var(PRIMARY_ARGS_ENV).ok();
        self.secondary_env = std::env::var(SECONDARY_ARGS_ENV).ok();
        self
    }

    /// Command line first (pass-through then `--clientargs`), then the two
    /// environment sources, then the debug flag.
    pub fn assemble(&self) -> Vec<String> {
        let mut args = self.passthrough.clone();

        for source in [&self.client_args, &self.primary_env, &self.secondary_env]
            .into_iter()
            .flatten()
        {
            args.extend(split_extra_args(source));
        }

        if self.debug {
            args.push(DEBUG_FLAG.to_string());
        }

        args
    }
}
