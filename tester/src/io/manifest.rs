//! Central package manifest (`.package-tester/config.json`).

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::core::suite::normalize_tests;
use crate::core::types::{PackageDescriptor, Status, UNKNOWN_VERSION};

/// How the manifest load went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestState {
    /// No manifest file; not an error.
    Missing,
    Loaded,
    /// Unreadable or unparsable; packages are empty.
    Invalid { message: String },
}

impl ManifestState {
    /// Short label for discovery listings.
    pub fn label(&self) -> &'static str {
        match self {
            ManifestState::Missing => "missing",
            ManifestState::Loaded => "loaded",
            ManifestState::Invalid { .. } => Status::InvalidJson.as_str(),
        }
    }
}

/// Normalized manifest contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub state: ManifestState,
    /// Entries in document order. Names may still be empty for keyless entries.
    pub packages: Vec<PackageDescriptor>,
}

impl Manifest {
    fn empty(state: ManifestState) -> Self {
        Self {
            state,
            packages: Vec::new(),
        }
    }

}

/// Load the manifest at `path`, resolving relative package paths against `root`.
///
/// Never fails: a broken manifest degrades to an empty package list with
/// [`ManifestState::Invalid`].
pub fn load_manifest(path: &Path, root: &Path) -> Manifest {
    if !path.exists() {
        debug!(path = %path.display(), "no manifest");
        return Manifest::empty(ManifestState::Missing);
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            error!(path = %path.display(), err = %err, "read manifest");
            return Manifest::empty(ManifestState::Invalid {
                message: err.to_string(),
            });
        }
    };
    match parse_manifest(&raw, root) {
        Ok(packages) => {
            debug!(path = %path.display(), count = packages.len(), "manifest loaded");
            Manifest {
                state: ManifestState::Loaded,
                packages,
            }
        }
        Err(message) => {
            error!(path = %path.display(), %message, "invalid manifest json");
            Manifest::empty(ManifestState::Invalid { message })
        }
    }
}

/// Parse and normalize manifest text.
pub fn parse_manifest(raw: &str, root: &Path) -> Result<Vec<PackageDescriptor>, String> {
    let document: Value = serde_json::from_str(raw).map_err(|err| err.to_string())?;
    let entries: Vec<(Option<&str>, &Value)> = match &document {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| (Some(key.as_str()), value))
            .collect(),
        Value::Array(items) => items.iter().map(|value| (None, value)).collect(),
        _ => return Err("manifest must be a JSON object keyed by package name".to_string()),
    };

    Ok(entries
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Object(fields) => Some(normalize_entry(key, fields, root)),
            _ => None,
        })
        .collect())
}

fn normalize_entry(
    key: Option<&str>,
    fields: &Map<String, Value>,
    root: &Path,
) -> PackageDescriptor {
    let name = non_empty_str(fields.get("name"))
        .or(key.filter(|key| !key.is_empty()))
        .unwrap_or_default();
    let version = non_empty_str(fields.get("version")).unwrap_or(UNKNOWN_VERSION);
    let path = non_empty_str(fields.get("path")).map(|raw| {
        let path = PathBuf::from(raw);
        if path.is_absolute() {
            path
        } else {
            root.join(path)
        }
    });
    let tests = fields.get("tests").map(normalize_tests).unwrap_or_default();

    PackageDescriptor {
        name: name.to_string(),
        version: version.to_string(),
        path,
        tests,
        config_source_path: None,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}
