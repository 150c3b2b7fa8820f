//! Test-only helpers for building project layouts on disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::types::DECLARATION_FILE;
use crate::io::paths::ProjectPaths;

/// Write `<dep_root>/<name>/package-tester.json`, creating directories.
pub fn write_declaration(dep_root: &Path, name: &str, contents: &str) -> PathBuf {
    let dir = dep_root.join(name);
    fs::create_dir_all(&dir).expect("create declaration dir");
    let path = dir.join(DECLARATION_FILE);
    fs::write(&path, contents).expect("write declaration");
    path
}

/// Write the central manifest for a project root.
pub fn write_manifest(root: &Path, contents: &str) -> PathBuf {
    let paths = ProjectPaths::new(root);
    fs::create_dir_all(&paths.tester_dir).expect("create tester dir");
    fs::write(&paths.manifest_path, contents).expect("write manifest");
    paths.manifest_path
}

/// Install an executable `vendor/bin/phpunit` shell script with `body`.
#[cfg(unix)]
pub fn install_runner_script(root: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = root.join("vendor/bin/phpunit");
    fs::create_dir_all(path.parent().expect("shim parent")).expect("create bin dir");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write runner script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod runner script");
    path
}

/// Create a temporary project directory.
pub fn temp_project() -> tempfile::TempDir {
    tempfile::tempdir().expect("tempdir")
}
