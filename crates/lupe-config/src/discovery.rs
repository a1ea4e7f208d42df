//! Configuration file discovery.
//!
//! Discovers `.lupe.toml` files by walking up the directory tree from a starting point,
//! then appending the global `~/.lupe.toml` if present.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".lupe.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths in precedence order: closest to `cwd` first, global (`~/.lupe.toml`) last.
/// The walk stops at the first file with `root = true`; the global file is skipped in that case.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let stop = is_root_config(&candidate);
        configs.push(candidate);
        if stop {
            return configs;
        }
    }

    if let Some(global) = global_config_path().filter(|p| p.is_file())
        && !configs.contains(&global)
    {
        configs.push(global);
    }
    configs
}

/// Returns the path to the global configuration file (`~/.lupe.toml`).
///
/// Returns `None` if the home directory cannot be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    /// Drops the global config, which depends on the machine running the tests.
    fn local(configs: Vec<PathBuf>) -> Vec<PathBuf> {
        configs.into_iter().filter(|p| !is_global_config(p)).collect()
    }

    #[test]
    fn no_configs_found() {
        let dir = TestDir::new();
        let cwd = dir.mkdir("a/b/c");
        assert!(local(discover_config_files(&cwd)).is_empty());
    }

    #[test]
    fn closest_config_comes_first() {
        let dir = TestDir::new();
        let top = dir.config("", "# top\n");
        let mid = dir.config("a/b", "# mid\n");
        let cwd = dir.mkdir("a/b/c/d");

        assert_eq!(local(discover_config_files(&cwd)), vec![mid, top]);
    }

    #[test]
    fn cwd_config_is_included() {
        let dir = TestDir::new();
        let config = dir.config("", "# top\n");
        assert_eq!(local(discover_config_files(dir.path())), vec![config]);
    }

    #[test]
    fn root_config_stops_the_walk() {
        let dir = TestDir::new();
        dir.config("", "# top\n");
        let root = dir.config("project", "root = true\n");
        let leaf = dir.config("project/sub", "");
        let cwd = dir.mkdir("project/sub/deeper");

        let configs = discover_config_files(&cwd);
        assert_eq!(configs, vec![leaf, root]);
    }

    #[test]
    fn global_path_ends_with_filename() {
        let path = global_config_path().unwrap();
        assert!(path.ends_with(CONFIG_FILENAME));
        assert!(is_global_config(&path));
        assert!(!is_global_config(Path::new("/elsewhere/.lupe.toml")));
    }
}
