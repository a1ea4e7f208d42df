//! Configuration file parsing.
//!
//! Parses individual `.lupe.toml` files into `RawConfig` structures in which every value is
//! optional, so partial files can be merged.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Index location section.
    pub index: Option<RawIndexSettings>,
    /// Top-terms section.
    pub terms: Option<RawTermsSettings>,
    /// Reconstruction section.
    pub reconstruct: Option<RawReconstructSettings>,
}

/// Raw `[index]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawIndexSettings {
    /// Index directory, relative to the config file unless absolute or `~`-prefixed.
    pub path: Option<String>,
}

/// Raw `[terms]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawTermsSettings {
    /// Number of terms to report.
    pub limit: Option<usize>,
    /// Fields to scan. Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub fields: Option<Vec<String>>,
    /// Terms to leave out. Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub exclude: Option<Vec<String>>,
    /// Stopword language whose words are also left out.
    pub stopwords: Option<String>,
}

/// Raw `[reconstruct]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawReconstructSettings {
    /// Tokens per output line; 0 disables wrapping.
    pub tokens_per_line: Option<usize>,
    /// Prefix of the marker for unresolved positions.
    pub gap_marker: Option<String>,
    /// Mark positions no term recorded, such as removed stop words.
    pub fill_unrecorded: Option<bool>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> RawConfig {
        parse_config_str(toml, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn empty_config_has_no_sections() {
        let config = parse("");
        assert!(config.root.is_none());
        assert!(config.index.is_none());
        assert!(config.terms.is_none());
        assert!(config.reconstruct.is_none());
    }

    #[test]
    fn parses_all_sections() {
        let config = parse(
            r#"
root = true

[index]
path = "./idx"

[terms]
limit = 25
fields = ["title", "body"]
exclude = ["lorem", "ipsum"]
stopwords = "english"

[reconstruct]
tokens_per_line = 8
gap_marker = "gap"
fill_unrecorded = true
"#,
        );
        assert_eq!(config.root, Some(true));
        assert_eq!(config.index.unwrap().path.as_deref(), Some("./idx"));

        let terms = config.terms.unwrap();
        assert_eq!(terms.limit, Some(25));
        assert_eq!(terms.fields.unwrap(), vec!["title", "body"]);
        assert_eq!(terms.exclude.unwrap(), vec!["lorem", "ipsum"]);
        assert_eq!(terms.stopwords.as_deref(), Some("english"));

        let reconstruct = config.reconstruct.unwrap();
        assert_eq!(reconstruct.tokens_per_line, Some(8));
        assert_eq!(reconstruct.gap_marker.as_deref(), Some("gap"));
        assert_eq!(reconstruct.fill_unrecorded, Some(true));
    }

    #[test]
    fn single_string_lists_are_accepted() {
        let config = parse(
            r#"
[terms]
fields = "body"
exclude = "lorem"
"#,
        );
        let terms = config.terms.unwrap();
        assert_eq!(terms.fields.unwrap(), vec!["body"]);
        assert_eq!(terms.exclude.unwrap(), vec!["lorem"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = parse_config_str("[terms]\nlimt = 3\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let err = parse_config_str("[terms]\nlimit = \"ten\"\n", Path::new("t.toml"));
        assert!(err.is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = parse_config_file(Path::new("/nonexistent/.lupe.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }
}
