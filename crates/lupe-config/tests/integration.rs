//! Integration tests for lupe-config.
//!
//! Exercises the full loading pipeline: discovery, parsing, path resolution and merging.

#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use lupe_config::{CONFIG_FILENAME, Config, ConfigError, is_global_config};

/// Temporary directory tree for a single test.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    fn write_config(&self, rel_dir: &str, content: &str) -> PathBuf {
        let path = self.create_dir(rel_dir).join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn root_config_without_settings_gives_defaults() {
    let env = TestEnv::new();
    env.write_config("", "root = true\n");

    let config = Config::load(env.path()).unwrap();
    assert!(config.index.path.is_none());
    assert_eq!(config.terms.limit, 100);
    assert_eq!(config.reconstruct.tokens_per_line, 10);
}

#[test]
fn nested_configs_merge_closest_first() {
    let env = TestEnv::new();
    env.write_config(
        "",
        r#"
root = true

[index]
path = "indexes/main"

[terms]
limit = 40
exclude = ["lorem", "ipsum"]
"#,
    );
    env.write_config(
        "project",
        r#"
[terms]
limit = 7

[reconstruct]
tokens_per_line = 0
"#,
    );
    let cwd = env.create_dir("project/src");

    let config = Config::load(&cwd).unwrap();
    assert_eq!(config.terms.limit, 7);
    assert_eq!(config.terms.exclude, vec!["lorem", "ipsum"]);
    assert_eq!(config.reconstruct.tokens_per_line, 0);
    assert_eq!(
        config.index.path,
        Some(env.path().join("indexes/main"))
    );

    let local: Vec<_> = config
        .config_files
        .iter()
        .filter(|p| !is_global_config(p))
        .collect();
    assert_eq!(local.len(), 2);
    assert!(local[0].starts_with(env.path().join("project")));
}

#[test]
fn parse_errors_name_the_file() {
    let env = TestEnv::new();
    let path = env.write_config("", "root = true\n[terms\n");

    let err = Config::load(env.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseToml { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
}

#[test]
fn invalid_values_are_reported() {
    let env = TestEnv::new();
    env.write_config("", "root = true\n[terms]\nlimit = 0\n");

    let err = Config::load(env.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSetting { .. }));
}

#[test]
fn load_from_files_respects_given_order() {
    let env = TestEnv::new();
    let a = env.write_config("a", "[reconstruct]\ngap_marker = \"first\"\n");
    let b = env.write_config("b", "[reconstruct]\ngap_marker = \"second\"\n");

    let config = Config::load_from_files(&[b, a]).unwrap();
    assert_eq!(config.reconstruct.gap_marker, "second");
}
