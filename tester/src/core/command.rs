//! Runner argument vector construction.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::types::{RunOptions, TestSuiteSpec};

/// Resolved runner invocation prefix (program plus leading arguments).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerCommand {
    pub program: PathBuf,
    pub prefix_args: Vec<OsString>,
}

impl RunnerCommand {
    pub fn direct(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
        }
    }

    /// Run `script` through `interpreter`.
    pub fn interpreted(interpreter: impl Into<PathBuf>, script: impl Into<OsString>) -> Self {
        Self {
            program: interpreter.into(),
            prefix_args: vec![script.into()],
        }
    }
}

/// Join a suite path onto the package root, ignoring leading separators.
pub fn resolve_test_path(package_path: &Path, suite_path: &str) -> PathBuf {
    let trimmed = suite_path.trim_start_matches(['/', '\\']);
    package_path.join(trimmed)
}

/// Arguments after the program: prefix, suite options, filter, global flags,
/// passthrough options, then the test path last.
pub fn build_args(
    runner: &RunnerCommand,
    suite: &TestSuiteSpec,
    options: &RunOptions,
    test_path: &Path,
) -> Vec<OsString> {
    let mut args = runner.prefix_args.clone();
    args.extend(suite.options.iter().map(OsString::from));

    let filter = options
        .filter
        .as_deref()
        .filter(|f| !f.is_empty())
        .or(suite.filter.as_deref());
    if let Some(filter) = filter {
        args.push("--filter".into());
        args.push(filter.into());
    }
    if options.stop_on_failure {
        args.push("--stop-on-failure".into());
    }
    if options.testdox {
        args.push("--testdox".into());
    }
    args.extend(options.extra_options.iter().map(OsString::from));
    args.push(test_path.as_os_str().to_os_string());
    args
}

/// Render a command line for display, quoting parts that contain whitespace.
pub fn pretty_command(program: &Path, args: &[OsString]) -> String {
    std::iter::once(program.as_os_str())
        .chain(args.iter().map(OsString::as_os_str))
        .map(|part| {
            let part = part.to_string_lossy();
            if part.chars().any(char::is_whitespace) {
                format!("\"{part}\"")
            } else {
                part.into_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn args_follow_fixed_order() {
        let runner = RunnerCommand::interpreted("php", "/app/vendor/phpunit/phpunit/phpunit");
        let suite = TestSuiteSpec {
            path: "tests".to_string(),
            options: vec!["--colors=never".to_string()],
            filter: Some("SuiteFilter".to_string()),
        };
        let options = RunOptions {
            filter: None,
            stop_on_failure: true,
            testdox: true,
            extra_options: vec!["--debug".to_string()],
            ..RunOptions::default()
        };

        let args = build_args(&runner, &suite, &options, Path::new("/pkg/tests"));
        assert_eq!(
            strings(&args),
            vec![
                "/app/vendor/phpunit/phpunit/phpunit",
                "--colors=never",
                "--filter",
                "SuiteFilter",
                "--stop-on-failure",
                "--testdox",
                "--debug",
                "/pkg/tests",
            ]
        );
    }

    #[test]
    fn global_filter_overrides_suite_filter() {
        let runner = RunnerCommand::direct("/app/vendor/bin/phpunit");
        let suite = TestSuiteSpec {
            filter: Some("SuiteFilter".to_string()),
            ..TestSuiteSpec::default()
        };
        let options = RunOptions {
            filter: Some("CliFilter".to_string()),
            ..RunOptions::default()
        };

        let args = build_args(&runner, &suite, &options, Path::new("/pkg/tests"));
        assert_eq!(strings(&args), vec!["--filter", "CliFilter", "/pkg/tests"]);
    }

    #[test]
    fn leading_separators_are_stripped() {
        assert_eq!(
            resolve_test_path(Path::new("/pkg"), "/tests/Unit"),
            PathBuf::from("/pkg/tests/Unit")
        );
    }

    #[test]
    fn pretty_command_quotes_whitespace() {
        let rendered = pretty_command(
            Path::new("php"),
            &["--filter".into(), "it works".into()],
        );
        assert_eq!(rendered, "php --filter \"it works\"");
    }
}
