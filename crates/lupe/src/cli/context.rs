//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use lupe_config::Config;
use lupe_core::JunkWords;
use lupe_index::TantivySource;
use tracing::debug;

use super::args::ExclusionArgs;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (default if no config files were found).
    pub config: Config,
    /// Index directory given on the command line.
    index_override: Option<PathBuf>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(index_override: Option<PathBuf>) -> Result<Self, ExitCode> {
        let cwd = env::current_dir().map_err(|e| {
            eprintln!("error: could not determine current directory: {e}");
            ExitCode::FAILURE
        })?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self::new(cwd, config, index_override))
    }

    /// Builds a context from already loaded parts.
    pub fn new(cwd: PathBuf, config: Config, index_override: Option<PathBuf>) -> Self {
        Self {
            cwd,
            config,
            index_override,
        }
    }

    /// Returns the index directory: `--index` if given, else `[index] path` from configuration.
    ///
    /// A relative `--index` is taken relative to the working directory.
    pub fn index_path(&self) -> Option<PathBuf> {
        match &self.index_override {
            Some(path) => Some(self.cwd.join(path)),
            None => self.config.index.path.clone(),
        }
    }

    /// Opens the index, exiting with a consistent error on failure.
    pub fn open_index(&self) -> Result<TantivySource, ExitCode> {
        let Some(path) = self.index_path() else {
            eprintln!("error: no index given");
            eprintln!("Pass --index PATH or set [index] path in .lupe.toml.");
            return Err(ExitCode::FAILURE);
        };
        debug!(index = %path.display(), "opening index");
        TantivySource::open(&path).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}

/// Builds the set of excluded terms from command-line flags plus configured defaults.
///
/// Configured terms are always included; a stopword language from the command line replaces
/// the configured one.
pub fn build_exclusions(
    args: &ExclusionArgs,
    configured: &[String],
    configured_stopwords: Option<&str>,
) -> Result<JunkWords, ExitCode> {
    let mut junk = match args.stopwords.as_deref().or(configured_stopwords) {
        Some(language) => JunkWords::stopwords(language).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?,
        None => JunkWords::new(),
    };
    junk.extend(configured.iter().cloned());
    junk.extend(args.exclude.iter().cloned());
    Ok(junk)
}
