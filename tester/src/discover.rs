//! Builds the per-invocation package registry from the manifest and the
//! dependency scan.

use std::collections::BTreeSet;

use anyhow::Result;
use tracing::{debug, instrument};

use crate::core::merge::{PackageRegistry, build_registry};
use crate::core::naming::infer_package_name;
use crate::io::config::TesterConfig;
use crate::io::manifest::{ManifestState, load_manifest};
use crate::io::paths::ProjectPaths;
use crate::io::scanner::{declaration_files, descriptor_from_declaration, is_self_declaring};

/// Everything discovered for one invocation. Built once, never refreshed.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub registry: PackageRegistry,
    pub manifest_state: ManifestState,
    /// Names inferred from every declaration file found, parseable or not.
    pub declared_names: Vec<String>,
}

impl Discovery {
    /// Sorted, de-duplicated names of packages that carry a declaration file.
    pub fn self_declaring_names(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = self
            .registry
            .iter()
            .filter(|package| !package.name.is_empty() && is_self_declaring(package))
            .map(|package| package.name.clone())
            .collect();
        names.extend(self.declared_names.iter().cloned());
        names.into_iter().collect()
    }
}

/// Read the manifest, scan the dependency root, and merge.
#[instrument(skip_all, fields(root = %paths.root.display()))]
pub fn discover(paths: &ProjectPaths, config: &TesterConfig) -> Result<Discovery> {
    let manifest = load_manifest(&paths.manifest_path, &paths.root);
    if let ManifestState::Invalid { message } = &manifest.state {
        eprintln!(
            "Invalid JSON in {}: {message}",
            paths.manifest_path.display()
        );
    }

    let dep_root = paths.dependency_root(config);
    let files = declaration_files(&dep_root)?;
    let declared_names: Vec<String> = files
        .iter()
        .filter_map(|file| infer_package_name(&dep_root, file))
        .collect();
    let scanned = files
        .iter()
        .filter_map(|file| descriptor_from_declaration(&dep_root, file))
        .collect();

    let registry = build_registry(manifest.packages, scanned);
    debug!(packages = registry.len(), "registry built");
    Ok(Discovery {
        registry,
        manifest_state: manifest.state,
        declared_names,
    })
}
