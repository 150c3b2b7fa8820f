//! Registry construction from manifest and scanner descriptors.
//!
//! The central manifest is authoritative; self-declaration files only fill
//! fields the manifest left empty.

use std::collections::HashMap;

use super::types::PackageDescriptor;

/// Ordered, name-keyed set of packages known to one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRegistry {
    packages: Vec<PackageDescriptor>,
    index: HashMap<String, usize>,
}

impl PackageRegistry {
    pub fn get(&self, name: &str) -> Option<&PackageDescriptor> {
        self.index.get(name).map(|&idx| &self.packages[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Packages in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PackageDescriptor> {
        self.packages.iter()
    }

    /// Insert, replacing an existing entry of the same name in place.
    fn upsert(&mut self, descriptor: PackageDescriptor) {
        match self.index.get(&descriptor.name) {
            Some(&idx) => self.packages[idx] = descriptor,
            None => {
                self.index
                    .insert(descriptor.name.clone(), self.packages.len());
                self.packages.push(descriptor);
            }
        }
    }

    fn take(&mut self, name: &str) -> Option<PackageDescriptor> {
        let idx = *self.index.get(name)?;
        Some(std::mem::replace(
            &mut self.packages[idx],
            PackageDescriptor::new(name),
        ))
    }
}

impl FromIterator<PackageDescriptor> for PackageRegistry {
    fn from_iter<I: IntoIterator<Item = PackageDescriptor>>(iter: I) -> Self {
        let mut registry = PackageRegistry::default();
        for descriptor in iter {
            registry.upsert(descriptor);
        }
        registry
    }
}

/// Merge manifest and scanner descriptors into one registry.
///
/// Manifest entries with empty names are dropped. Scanner descriptors for new
/// names are appended; for known names they only backfill empty fields.
pub fn build_registry(
    manifest: Vec<PackageDescriptor>,
    scanned: Vec<PackageDescriptor>,
) -> PackageRegistry {
    let mut registry: PackageRegistry = manifest
        .into_iter()
        .filter(|descriptor| !descriptor.name.is_empty())
        .collect();

    for fallback in scanned {
        match registry.take(&fallback.name) {
            Some(primary) => registry.upsert(merge_descriptor(primary, fallback)),
            None => registry.upsert(fallback),
        }
    }
    registry
}

/// Merge two descriptors of the same package; `primary` wins field by field.
pub fn merge_descriptor(
    mut primary: PackageDescriptor,
    fallback: PackageDescriptor,
) -> PackageDescriptor {
    if primary.tests.is_empty() {
        primary.tests = fallback.tests;
    }
    if primary
        .path
        .as_ref()
        .is_none_or(|path| path.as_os_str().is_empty())
    {
        primary.path = fallback.path;
    }
    if primary
        .config_source_path
        .as_ref()
        .is_none_or(|path| path.as_os_str().is_empty())
    {
        primary.config_source_path = fallback.config_source_path;
    }
    primary
}
