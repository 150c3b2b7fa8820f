//! Sequencing of suite runs across one or many packages.
//!
//! Everything runs strictly in order: a suite finishes before the next one
//! starts, and a package finishes before the next package. Exit code
//! aggregation depends on that ordering.

use tracing::{error, info, instrument};

use crate::core::aggregate::{fold_suites, package_exit_code, package_status};
use crate::core::merge::PackageRegistry;
use crate::core::types::{
    PackageDescriptor, PackageRunResult, RunOptions, RunResult, Status, UNKNOWN_VERSION,
};
use crate::exit_codes;
use crate::report;
use crate::suite_runner::SuiteExecutor;

/// Result of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub exit_code: i32,
    /// Packages that actually ran, in order.
    pub results: Vec<PackageRunResult>,
}

/// Runs packages from one registry through one executor.
pub struct Orchestrator<'a, E> {
    registry: &'a PackageRegistry,
    executor: &'a E,
    options: &'a RunOptions,
}

impl<'a, E: SuiteExecutor> Orchestrator<'a, E> {
    pub fn new(registry: &'a PackageRegistry, executor: &'a E, options: &'a RunOptions) -> Self {
        Self {
            registry,
            executor,
            options,
        }
    }

    /// Run one package by name.
    ///
    /// `show_header` prints the package heading and result table, as for an
    /// explicitly requested package.
    #[instrument(skip(self))]
    pub fn run_package(&self, name: &str, show_header: bool) -> PackageRunResult {
        let Some(package) = self.registry.get(name) else {
            eprintln!("Package '{name}' not discovered!");
            return PackageRunResult::short_circuit(name, UNKNOWN_VERSION, Status::NotInstalled);
        };

        if show_header {
            println!("Testing package: {name}");
            println!();
        }

        let result = self.run_descriptor(package);
        if show_header && let Some(summary) = &result.summary {
            report::package_table(summary);
            if self.options.detailed {
                report::suite_results(&result.suite_results);
            }
        }
        info!(status = result.status.as_str(), "package finished");
        result
    }

    fn run_descriptor(&self, package: &PackageDescriptor) -> PackageRunResult {
        let Some(path) = package.path.as_deref().filter(|p| !p.as_os_str().is_empty()) else {
            eprintln!("Invalid or missing package path for '{}'", package.name);
            return PackageRunResult::short_circuit(
                &package.name,
                &package.version,
                Status::Error,
            );
        };

        if package.tests.is_empty() {
            eprintln!("No tests configured for '{}'", package.name);
            return PackageRunResult::short_circuit(
                &package.name,
                &package.version,
                Status::Warning,
            );
        }

        let results: Vec<RunResult> = package
            .tests
            .iter()
            .map(|suite| match self.executor.run_suite(path, suite) {
                Ok(result) => result,
                Err(err) => {
                    let err = format!("{err:#}");
                    error!(package = %package.name, suite = %suite.path, %err, "suite could not run");
                    eprintln!("Suite '{}' could not run: {err}", suite.path);
                    RunResult {
                        status: Status::Error,
                        exit_code: exit_codes::FAILURE,
                        resolved_path: None,
                    }
                }
            })
            .collect();

        let summary = fold_suites(&results);
        PackageRunResult {
            name: package.name.clone(),
            version: package.version.clone(),
            status: package_status(&summary),
            suite_results: results,
            summary: Some(summary),
        }
    }

    /// Run a package by name and map its result to an exit code.
    pub fn run_one(&self, name: &str) -> i32 {
        package_exit_code(&self.run_package(name, true))
    }

    /// Run every registry package in order.
    pub fn run_all(&self) -> BatchOutcome {
        let names: Vec<&str> = self.registry.iter().map(|p| p.name.as_str()).collect();
        self.run_batch(&names)
    }

    /// Run packages in order, honoring continue-on-failure.
    ///
    /// Without continue-on-failure the first failing package ends the batch
    /// and its code is returned. With it, every package runs and the last
    /// failing package's code is returned.
    #[instrument(skip_all, fields(count = names.len(), continue_on_failure = self.options.continue_on_failure))]
    pub fn run_batch(&self, names: &[&str]) -> BatchOutcome {
        if names.is_empty() {
            eprintln!("No packages discovered.");
            return BatchOutcome {
                exit_code: exit_codes::FAILURE,
                results: Vec::new(),
            };
        }

        println!("Testing {} package(s)...", names.len());
        println!();

        let mut aggregate = exit_codes::OK;
        let mut results = Vec::with_capacity(names.len());
        for name in names {
            let result = self.run_package(name, false);
            let exit_code = package_exit_code(&result);
            results.push(result);

            if exit_code != exit_codes::OK {
                aggregate = exit_code;
                if !self.options.continue_on_failure {
                    println!();
                    eprintln!("Stopping execution due to failure.");
                    return BatchOutcome { exit_code, results };
                }
            }
        }
        BatchOutcome {
            exit_code: aggregate,
            results,
        }
    }
}
