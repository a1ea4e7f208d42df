//! Configuration merging.
//!
//! Merges parsed `.lupe.toml` files into a single [`Config`]. Files are given highest precedence
//! first; for every setting the first file that defines it wins.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, IndexSettings, ReconstructSettings, TermsSettings,
    parse::{RawConfig, RawReconstructSettings, RawTermsSettings},
    resolve::resolve_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges configuration files given in precedence order.
///
/// Scalars and lists are taken whole from the highest-precedence file that sets them; lists are
/// not concatenated across files. The index path is resolved against the directory of the file
/// that defines it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    let mut config = Config {
        index: merge_index(configs)?,
        config_files: configs.iter().map(|c| c.path.clone()).collect(),
        ..Config::default()
    };

    // Lowest precedence first so higher precedence overwrites.
    for parsed in configs.iter().rev() {
        if let Some(terms) = &parsed.config.terms {
            apply_raw_terms(&mut config.terms, terms, &parsed.path)?;
        }
        if let Some(reconstruct) = &parsed.config.reconstruct {
            apply_raw_reconstruct(&mut config.reconstruct, reconstruct, &parsed.path)?;
        }
    }

    Ok(config)
}

/// Resolves the index path from the highest-precedence file that sets one.
fn merge_index(configs: &[ParsedConfig]) -> Result<IndexSettings, ConfigError> {
    for parsed in configs {
        let Some(path) = parsed.config.index.as_ref().and_then(|i| i.path.as_deref()) else {
            continue;
        };
        let config_dir = parsed.path.parent().unwrap_or_else(|| Path::new("."));
        return Ok(IndexSettings {
            path: Some(resolve_path(path, config_dir)?),
        });
    }
    Ok(IndexSettings::default())
}

/// Applies raw `[terms]` values, overwriting any present.
fn apply_raw_terms(
    result: &mut TermsSettings,
    raw: &RawTermsSettings,
    path: &Path,
) -> Result<(), ConfigError> {
    if let Some(limit) = raw.limit {
        if limit == 0 {
            return Err(invalid("terms.limit", path, "must be at least 1"));
        }
        result.limit = limit;
    }
    if let Some(fields) = &raw.fields {
        result.fields.clone_from(fields);
    }
    if let Some(exclude) = &raw.exclude {
        result.exclude.clone_from(exclude);
    }
    if let Some(stopwords) = &raw.stopwords {
        result.stopwords = Some(stopwords.clone());
    }
    Ok(())
}

/// Applies raw `[reconstruct]` values, overwriting any present.
fn apply_raw_reconstruct(
    result: &mut ReconstructSettings,
    raw: &RawReconstructSettings,
    path: &Path,
) -> Result<(), ConfigError> {
    if let Some(tokens_per_line) = raw.tokens_per_line {
        result.tokens_per_line = tokens_per_line;
    }
    if let Some(marker) = &raw.gap_marker {
        if marker.trim().is_empty() {
            return Err(invalid("reconstruct.gap_marker", path, "must not be empty"));
        }
        result.gap_marker.clone_from(marker);
    }
    if let Some(fill) = raw.fill_unrecorded {
        result.fill_unrecorded = fill;
    }
    Ok(())
}

/// Builds an `InvalidSetting` error.
fn invalid(setting: &str, path: &Path, message: &str) -> ConfigError {
    ConfigError::InvalidSetting {
        setting: setting.to_string(),
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config_str;

    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(toml, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn empty_input_gives_defaults() {
        let config = merge_configs(&[]).unwrap();
        assert_eq!(config.terms.limit, 100);
        assert!(config.index.path.is_none());
        assert!(config.config_files.is_empty());
    }

    #[test]
    fn closer_file_wins_per_setting() {
        let configs = [
            parsed("/w/p/.lupe.toml", "[terms]\nlimit = 5\n"),
            parsed(
                "/home/u/.lupe.toml",
                "[terms]\nlimit = 50\nstopwords = \"english\"\n[reconstruct]\ngap_marker = \"gap\"\n",
            ),
        ];
        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.terms.limit, 5);
        assert_eq!(config.terms.stopwords.as_deref(), Some("english"));
        assert_eq!(config.reconstruct.gap_marker, "gap");
        assert_eq!(config.config_files.len(), 2);
    }

    #[test]
    fn lists_are_replaced_not_concatenated() {
        let configs = [
            parsed("/a/.lupe.toml", "[terms]\nexclude = [\"x\"]\n"),
            parsed("/b/.lupe.toml", "[terms]\nexclude = [\"y\", \"z\"]\n"),
        ];
        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.terms.exclude, vec!["x"]);
    }

    #[test]
    fn index_path_resolves_against_defining_file() {
        let configs = [
            parsed("/w/p/sub/.lupe.toml", "[terms]\nlimit = 3\n"),
            parsed("/w/p/.lupe.toml", "[index]\npath = \"idx\"\n"),
        ];
        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.index.path, Some(PathBuf::from("/w/p/idx")));
    }

    #[test]
    fn zero_limit_is_invalid() {
        let configs = [parsed("/w/.lupe.toml", "[terms]\nlimit = 0\n")];
        let err = merge_configs(&configs).unwrap_err();
        assert!(err.to_string().contains("terms.limit"));
    }

    #[test]
    fn blank_gap_marker_is_invalid() {
        let configs = [parsed("/w/.lupe.toml", "[reconstruct]\ngap_marker = \" \"\n")];
        assert!(matches!(
            merge_configs(&configs),
            Err(ConfigError::InvalidSetting { .. })
        ));
    }
}
