//! Canonical project-relative locations.

use std::path::{Path, PathBuf};

use super::config::TesterConfig;

/// All canonical paths for a project root.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub tester_dir: PathBuf,
    /// Central manifest (`.package-tester/config.json`).
    pub manifest_path: PathBuf,
    /// Tool settings (`.package-tester/tester.toml`).
    pub config_path: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let tester_dir = root.join(".package-tester");
        Self {
            root: root.clone(),
            tester_dir: tester_dir.clone(),
            manifest_path: tester_dir.join("config.json"),
            config_path: tester_dir.join("tester.toml"),
        }
    }

    /// Directory scanned for self-declaration files.
    pub fn dependency_root(&self, config: &TesterConfig) -> PathBuf {
        self.resolve(&config.dependency_dir)
    }

    /// Resolve a possibly relative path against the project root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}
