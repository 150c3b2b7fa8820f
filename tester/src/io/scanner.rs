//! Filesystem scan for per-package `package-tester.json` declarations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::naming::infer_package_name;
use crate::core::suite::suite_from_object;
use crate::core::types::{DECLARATION_FILE, PackageDescriptor};

/// Declaration files under `dep_root`: vendor-scoped matches first, then flat ones.
pub fn declaration_files(dep_root: &Path) -> Result<Vec<PathBuf>> {
    let root = glob::Pattern::escape(&dep_root.to_string_lossy());
    let mut files = Vec::new();
    for pattern in [
        format!("{root}/*/*/{DECLARATION_FILE}"),
        format!("{root}/*/{DECLARATION_FILE}"),
    ] {
        let entries =
            glob::glob(&pattern).with_context(|| format!("invalid glob pattern {pattern}"))?;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(err) => warn!(err = %err, "unreadable path during scan"),
            }
        }
    }
    Ok(files)
}

/// Build descriptors for every usable declaration file under `dep_root`.
///
/// Files whose package name cannot be inferred, that fail to parse, or whose
/// top level is not an object are skipped.
pub fn scan_dependencies(dep_root: &Path) -> Result<Vec<PackageDescriptor>> {
    let files = declaration_files(dep_root)?;
    debug!(dep_root = %dep_root.display(), count = files.len(), "declaration files found");
    Ok(files
        .iter()
        .filter_map(|file| descriptor_from_declaration(dep_root, file))
        .collect())
}

/// Read one declaration file into a descriptor with a single suite.
pub fn descriptor_from_declaration(dep_root: &Path, file: &Path) -> Option<PackageDescriptor> {
    let name = infer_package_name(dep_root, file)?;
    let raw = match fs::read_to_string(file) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(file = %file.display(), err = %err, "skip unreadable declaration");
            return None;
        }
    };
    let document = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(document)) => document,
        Ok(_) => {
            warn!(file = %file.display(), "skip declaration: not a JSON object");
            return None;
        }
        Err(err) => {
            warn!(file = %file.display(), err = %err, "skip declaration: invalid json");
            return None;
        }
    };

    let suite = match document.get("namespace") {
        Some(Value::Object(namespace)) => suite_from_object(namespace),
        _ => suite_from_object(&serde_json::Map::new()),
    };

    Some(PackageDescriptor {
        path: file.parent().map(Path::to_path_buf),
        tests: vec![suite],
        config_source_path: Some(file.to_path_buf()),
        ..PackageDescriptor::new(name)
    })
}

/// Whether a package carries a self-declaration file.
///
/// Checks the recorded source file first, then `<path>/package-tester.json`.
pub fn is_self_declaring(descriptor: &PackageDescriptor) -> bool {
    if descriptor
        .config_source_path
        .as_ref()
        .is_some_and(|source| source.is_file())
    {
        return true;
    }
    descriptor
        .path
        .as_ref()
        .is_some_and(|path| path.join(DECLARATION_FILE).is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::UNKNOWN_VERSION;
    use crate::test_support::write_declaration;

    #[test]
    fn scans_namespaced_and_flat_declarations() {
        let temp = tempfile::tempdir().expect("tempdir");
        let vendor = temp.path().join("vendor");
        write_declaration(
            &vendor,
            "acme/flow",
            r#"{ "namespace": { "path": "tests/Unit", "option": ["--colors=never"], "filter": "Flow" } }"#,
        );
        write_declaration(&vendor, "standalone", "{}");

        let found = scan_dependencies(&vendor).expect("scan");
        assert_eq!(found.len(), 2);

        let flow = &found[0];
        assert_eq!(flow.name, "acme/flow");
        assert_eq!(flow.version, UNKNOWN_VERSION);
        assert_eq!(flow.path, Some(vendor.join("acme/flow")));
        assert_eq!(
            flow.config_source_path,
            Some(vendor.join("acme/flow").join(DECLARATION_FILE))
        );
        assert_eq!(flow.tests.len(), 1);
        assert_eq!(flow.tests[0].path, "tests/Unit");
        assert_eq!(flow.tests[0].options, vec!["--colors=never"]);
        assert_eq!(flow.tests[0].filter.as_deref(), Some("Flow"));

        let flat = &found[1];
        assert_eq!(flat.name, "standalone");
        assert_eq!(flat.tests[0].path, "tests");
    }

    #[test]
    fn broken_declarations_are_skipped() {
        let temp = tempfile::tempdir().expect("tempdir");
        let vendor = temp.path().join("vendor");
        write_declaration(&vendor, "acme/broken", "{ nope");
        write_declaration(&vendor, "acme/array", "[1, 2]");
        write_declaration(&vendor, "acme/ok", r#"{ "namespace": "ignored" }"#);

        let found = scan_dependencies(&vendor).expect("scan");
        let names: Vec<&str> = found.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["acme/ok"]);
        assert_eq!(found[0].tests[0].path, "tests");
    }

    #[test]
    fn missing_dependency_root_yields_nothing() {
        let temp = tempfile::tempdir().expect("tempdir");
        let found = scan_dependencies(&temp.path().join("vendor")).expect("scan");
        assert!(found.is_empty());
    }

    #[test]
    fn self_declaring_falls_back_to_package_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let vendor = temp.path().join("vendor");
        write_declaration(&vendor, "acme/flow", "{}");

        let by_path = PackageDescriptor {
            path: Some(vendor.join("acme/flow")),
            ..PackageDescriptor::new("acme/flow")
        };
        assert!(is_self_declaring(&by_path));
        assert!(!is_self_declaring(&PackageDescriptor::new("acme/none")));
    }
}
