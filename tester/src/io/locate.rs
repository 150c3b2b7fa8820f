//! Runner executable resolution.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::config::RunnerLocations;
use crate::core::command::RunnerCommand;

/// Finds the runner for a project, checking candidates in a fixed order.
#[derive(Debug, Clone)]
pub struct RunnerLocator {
    root: PathBuf,
    locations: RunnerLocations,
}

impl RunnerLocator {
    pub fn new(root: impl Into<PathBuf>, locations: RunnerLocations) -> Self {
        Self {
            root: root.into(),
            locations,
        }
    }

    /// Resolve using the process environment for the override variable.
    pub fn resolve(&self) -> Option<RunnerCommand> {
        self.resolve_with(std::env::var_os(&self.locations.env_var))
    }

    /// Resolve with an explicit override value; first existing candidate wins.
    pub fn resolve_with(&self, env_override: Option<OsString>) -> Option<RunnerCommand> {
        let locations = &self.locations;

        if let Some(script) = env_override.filter(|value| !value.is_empty())
            && Path::new(&script).is_file()
        {
            debug!(script = ?script, "runner from environment override");
            return Some(RunnerCommand::interpreted(&locations.interpreter, script));
        }

        let batch = self.root.join(&locations.batch_wrapper);
        if cfg!(windows) && batch.is_file() {
            debug!(path = %batch.display(), "runner batch wrapper");
            return Some(RunnerCommand::direct(batch));
        }

        let shim = self.root.join(&locations.shim);
        if shim.is_file() && is_executable(&shim) {
            debug!(path = %shim.display(), "runner shim");
            return Some(RunnerCommand::direct(shim));
        }

        let entry = self.root.join(&locations.entry_script);
        if entry.is_file() {
            debug!(path = %entry.display(), "runner entry script");
            return Some(RunnerCommand::interpreted(
                &locations.interpreter,
                entry.into_os_string(),
            ));
        }

        debug!(root = %self.root.display(), "no runner found");
        None
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
