//! Configuration system for lupe.
//!
//! lupe reads TOML files named `.lupe.toml`. Configuration is resolved by walking up the
//! directory tree from the current working directory, collecting every `.lupe.toml` found, then
//! loading `~/.lupe.toml` with lowest precedence. A file containing `root = true` ends the walk.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawIndexSettings, RawReconstructSettings, RawTermsSettings, parse_config_file,
    parse_config_str,
};
pub use resolve::resolve_path;
use lupe_core::{DEFAULT_GAP_MARKER, DEFAULT_TOKENS_PER_LINE, DEFAULT_TOP_TERMS};
use serde::Serialize;
use tracing::debug;

/// Merged configuration for lupe.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Index location.
    pub index: IndexSettings,
    /// Defaults for `lupe terms`.
    pub terms: TermsSettings,
    /// Defaults for `lupe doc`.
    pub reconstruct: ReconstructSettings,
    /// Files the configuration was merged from, highest precedence first.
    pub config_files: Vec<PathBuf>,
}

impl Config {
    /// Discovers and merges all `.lupe.toml` files relevant to `cwd`.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of files, highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                debug!(path = %path.display(), "loading config");
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Serializes the effective settings in `.lupe.toml` format.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            index: &self.index,
            terms: &self.terms,
            reconstruct: &self.reconstruct,
        };
        toml::to_string_pretty(&serializable).expect("settings are always representable as TOML")
    }
}

/// The `[index]` section.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexSettings {
    /// Resolved index directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// The `[terms]` section.
#[derive(Debug, Clone, Serialize)]
pub struct TermsSettings {
    /// Number of terms to report.
    pub limit: usize,
    /// Fields to scan; empty means every field.
    pub fields: Vec<String>,
    /// Terms to leave out.
    pub exclude: Vec<String>,
    /// Stopword language whose words are also left out.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stopwords: Option<String>,
}

impl Default for TermsSettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_TOP_TERMS,
            fields: Vec::new(),
            exclude: Vec::new(),
            stopwords: None,
        }
    }
}

/// The `[reconstruct]` section.
#[derive(Debug, Clone, Serialize)]
pub struct ReconstructSettings {
    /// Tokens per output line; 0 disables wrapping.
    pub tokens_per_line: usize,
    /// Prefix of the marker for unresolved positions.
    pub gap_marker: String,
    /// Mark positions no term recorded.
    pub fill_unrecorded: bool,
}

impl Default for ReconstructSettings {
    fn default() -> Self {
        Self {
            tokens_per_line: DEFAULT_TOKENS_PER_LINE,
            gap_marker: DEFAULT_GAP_MARKER.to_string(),
            fill_unrecorded: false,
        }
    }
}

/// Borrowed view of the settings sections for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// The `[index]` section.
    index: &'a IndexSettings,
    /// The `[terms]` section.
    terms: &'a TermsSettings,
    /// The `[reconstruct]` section.
    reconstruct: &'a ReconstructSettings,
}
