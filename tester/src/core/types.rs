//! Shared deterministic types for discovery and orchestration.
//!
//! These types are the contracts between the discovery layer, the suite
//! runner, and the orchestrator. They carry no I/O handles.

use std::path::PathBuf;

/// Version reported for packages that do not declare one.
pub const UNKNOWN_VERSION: &str = "N/A";

/// Default suite path, relative to the package root.
pub const DEFAULT_SUITE_PATH: &str = "tests";

/// File name of a per-package self-declaration manifest.
pub const DECLARATION_FILE: &str = "package-tester.json";

/// Outcome classification for suites and packages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
    Warning,
    /// Environment problem: unresolvable runner, missing package path, spawn failure.
    Error,
    /// Requested package is not in the registry.
    NotInstalled,
    TestFileNotFound,
    InvalidJson,
}

impl Status {
    /// Statuses that force a non-zero exit code even when no tool code is available.
    pub fn is_failing(self) -> bool {
        matches!(
            self,
            Status::Failure
                | Status::Error
                | Status::NotInstalled
                | Status::TestFileNotFound
                | Status::InvalidJson
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Failure => "failure",
            Status::Warning => "warning",
            Status::Error => "error",
            Status::NotInstalled => "not_installed",
            Status::TestFileNotFound => "test_file_not_found",
            Status::InvalidJson => "invalid_json",
        }
    }
}

/// One runner invocation unit within a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSuiteSpec {
    /// Path relative to the package root.
    pub path: String,
    /// Raw runner arguments, in order.
    pub options: Vec<String>,
    pub filter: Option<String>,
}

impl Default for TestSuiteSpec {
    fn default() -> Self {
        Self {
            path: DEFAULT_SUITE_PATH.to_string(),
            options: Vec::new(),
            filter: None,
        }
    }
}

/// Identity and test configuration for one discoverable package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    /// Package root. Descriptors without a path register fine but cannot run.
    pub path: Option<PathBuf>,
    pub tests: Vec<TestSuiteSpec>,
    /// Self-declaration file that contributed this descriptor, if any.
    pub config_source_path: Option<PathBuf>,
}

impl PackageDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: UNKNOWN_VERSION.to_string(),
            path: None,
            tests: Vec::new(),
            config_source_path: None,
        }
    }
}

/// Outcome of running one suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub status: Status,
    pub exit_code: i32,
    /// Effective test path handed to the runner (absent when resolution failed first).
    pub resolved_path: Option<PathBuf>,
}

/// Folded status and exit code across a package's suites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteSummary {
    pub status: Status,
    pub exit_code: i32,
}

/// Outcome of running one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRunResult {
    pub name: String,
    pub version: String,
    pub status: Status,
    /// Per-suite outcomes in declaration order; empty when no suite was attempted.
    pub suite_results: Vec<RunResult>,
    /// Fold of `suite_results`, present only when at least one suite was attempted.
    pub summary: Option<SuiteSummary>,
}

impl PackageRunResult {
    /// Result for a package that never reached suite execution.
    pub fn short_circuit(name: &str, version: &str, status: Status) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            status,
            suite_results: Vec::new(),
            summary: None,
        }
    }
}

/// Command-line flags that apply to every suite of an invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Overrides each suite's own filter when set.
    pub filter: Option<String>,
    pub stop_on_failure: bool,
    pub testdox: bool,
    /// Raw runner arguments appended after the generated flags.
    pub extra_options: Vec<String>,
    pub continue_on_failure: bool,
    /// Print discovery details, command lines, and finish banners.
    pub detailed: bool,
}
