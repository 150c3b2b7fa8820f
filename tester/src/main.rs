//! Package test orchestrator.
//!
//! Discovers packages from `.package-tester/config.json` and from
//! `package-tester.json` files under the dependency root, then runs the
//! external test runner against each declared suite.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use package_tester::core::types::RunOptions;
use package_tester::discover::discover;
use package_tester::exit_codes;
use package_tester::io::config::load_config;
use package_tester::io::locate::RunnerLocator;
use package_tester::io::paths::ProjectPaths;
use package_tester::menu::{self, Selection};
use package_tester::orchestrate::Orchestrator;
use package_tester::suite_runner::ToolSuiteRunner;
use package_tester::{logging, report};

#[derive(Parser)]
#[command(
    name = "package-tester",
    version,
    about = "Run the test suites of installed packages through the project's test runner"
)]
struct Cli {
    /// Full package name (e.g. `jobmetric/laravel-flow`).
    package: Option<String>,

    /// Test all discovered packages.
    #[arg(long)]
    all: bool,

    /// List discovered packages and show each runner command.
    #[arg(long)]
    detailed: bool,

    /// Test-name filter passed to the runner; overrides suite filters.
    #[arg(long)]
    filter: Option<String>,

    /// Ask the runner to stop on its first failure.
    #[arg(long)]
    stop_on_failure: bool,

    /// Ask the runner for human-readable test output.
    #[arg(long)]
    testdox: bool,

    /// Additional raw runner option (repeatable).
    #[arg(long = "options", value_name = "OPTION", allow_hyphen_values = true)]
    options: Vec<String>,

    /// Keep testing other packages after one fails.
    #[arg(long)]
    continue_on_failure: bool,
}

impl Cli {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            filter: self.filter.clone().filter(|f| !f.is_empty()),
            stop_on_failure: self.stop_on_failure,
            testdox: self.testdox,
            extra_options: self.options.clone(),
            continue_on_failure: self.continue_on_failure,
            detailed: self.detailed,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.detailed);
    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::FAILURE);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let root = std::env::current_dir().context("resolve working directory")?;
    let paths = ProjectPaths::new(&root);
    let config = load_config(&paths.config_path)?;

    report::banner();
    let discovery = discover(&paths, &config)?;
    let options = cli.run_options();
    if options.detailed {
        report::discovered_packages(&discovery.manifest_state, &discovery.registry);
    }

    let executor = ToolSuiteRunner::new(
        RunnerLocator::new(&root, config.runner.clone()),
        &root,
        options.clone(),
        config.suite_timeout(),
    );
    let orchestrator = Orchestrator::new(&discovery.registry, &executor, &options);

    if cli.all {
        return Ok(orchestrator.run_all().exit_code);
    }
    if let Some(name) = &cli.package {
        return Ok(orchestrator.run_one(name));
    }

    if discovery.registry.is_empty() {
        eprintln!("No packages discovered. Make sure the package-tester JSON exists.");
        return Ok(exit_codes::FAILURE);
    }
    let selection = menu::prompt(
        &discovery.registry,
        &discovery.self_declaring_names(),
        &mut io::stdin().lock(),
        &mut io::stdout(),
    )?;
    Ok(match selection {
        Selection::All => orchestrator.run_all().exit_code,
        Selection::Package(name) => orchestrator.run_one(&name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_package_and_flags() {
        let cli = Cli::parse_from([
            "package-tester",
            "acme/flow",
            "--filter",
            "FlowTest",
            "--testdox",
            "--continue-on-failure",
        ]);
        assert_eq!(cli.package.as_deref(), Some("acme/flow"));
        let options = cli.run_options();
        assert_eq!(options.filter.as_deref(), Some("FlowTest"));
        assert!(options.testdox);
        assert!(options.continue_on_failure);
        assert!(!options.stop_on_failure);
    }

    #[test]
    fn passthrough_options_accept_leading_dashes() {
        let cli = Cli::parse_from([
            "package-tester",
            "--all",
            "--options=--colors=never",
            "--options",
            "--debug",
        ]);
        assert!(cli.all);
        assert_eq!(cli.options, vec!["--colors=never", "--debug"]);
    }

    #[test]
    fn empty_filter_is_ignored() {
        let cli = Cli::parse_from(["package-tester", "--filter="]);
        assert_eq!(cli.run_options().filter, None);
    }
}
