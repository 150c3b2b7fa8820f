//! Package name inference for self-declaration files.

use std::path::{Component, Path};

use super::types::DECLARATION_FILE;

/// Infer the owning package name of a declaration file.
///
/// `dep_root/vendor/pkg/package-tester.json` yields `vendor/pkg`;
/// `dep_root/pkg/package-tester.json` yields `pkg`. Files outside `dep_root`,
/// or not named [`DECLARATION_FILE`], yield `None`.
pub fn infer_package_name(dep_root: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(dep_root).ok()?;
    let segments: Vec<&str> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    if segments.last() != Some(&DECLARATION_FILE) {
        return None;
    }
    match segments.len() {
        n if n >= 3 => Some(format!("{}/{}", segments[0], segments[1])),
        2 => Some(segments[0].to_string()),
        _ => None,
    }
}
