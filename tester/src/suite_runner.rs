//! Runs one suite through the external runner tool.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, instrument, warn};

use crate::core::command::{build_args, pretty_command, resolve_test_path};
use crate::core::types::{RunOptions, RunResult, Status, TestSuiteSpec};
use crate::exit_codes;
use crate::io::locate::RunnerLocator;
use crate::io::process::run_streaming;
use crate::report;

/// Executes a single suite for a package rooted at `package_path`.
///
/// Resolution problems come back as `Ok` results with a failing status; `Err`
/// is reserved for failures to start or supervise the process.
pub trait SuiteExecutor {
    fn run_suite(&self, package_path: &Path, suite: &TestSuiteSpec) -> Result<RunResult>;
}

/// [`SuiteExecutor`] backed by the real runner executable.
pub struct ToolSuiteRunner {
    locator: RunnerLocator,
    workdir: PathBuf,
    options: RunOptions,
    timeout: Option<Duration>,
}

impl ToolSuiteRunner {
    pub fn new(
        locator: RunnerLocator,
        workdir: impl Into<PathBuf>,
        options: RunOptions,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            locator,
            workdir: workdir.into(),
            options,
            timeout,
        }
    }
}

impl SuiteExecutor for ToolSuiteRunner {
    #[instrument(skip_all, fields(package = %package_path.display(), suite = %suite.path))]
    fn run_suite(&self, package_path: &Path, suite: &TestSuiteSpec) -> Result<RunResult> {
        let Some(runner) = self.locator.resolve() else {
            eprintln!("Runner binary not found.");
            return Ok(RunResult {
                status: Status::Error,
                exit_code: exit_codes::FAILURE,
                resolved_path: None,
            });
        };

        let test_path = resolve_test_path(package_path, &suite.path);
        if !test_path.exists() {
            eprintln!("Test path not found: {}", test_path.display());
            return Ok(RunResult {
                status: Status::TestFileNotFound,
                exit_code: exit_codes::FAILURE,
                resolved_path: Some(test_path),
            });
        }

        let args = build_args(&runner, suite, &self.options, &test_path);
        if self.options.detailed {
            report::command_banner(&pretty_command(&runner.program, &args));
        }
        debug!(program = %runner.program.display(), argc = args.len(), "running suite");

        let mut cmd = Command::new(&runner.program);
        cmd.args(&args).current_dir(&self.workdir);
        let outcome = run_streaming(cmd, self.timeout, std::io::stdout())?;

        let exit_code = outcome.code_or(exit_codes::FAILURE);
        let status = if outcome.timed_out {
            warn!(test_path = %test_path.display(), "suite timed out");
            Status::Error
        } else if exit_code == exit_codes::OK {
            Status::Success
        } else {
            Status::Failure
        };
        if self.options.detailed {
            report::finish_banner(exit_code);
        }

        Ok(RunResult {
            status,
            exit_code,
            resolved_path: Some(test_path),
        })
    }
}
