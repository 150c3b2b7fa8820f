//! Tool settings stored under `.package-tester/tester.toml`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Tool configuration (TOML).
///
/// Every field is optional in the file; missing fields keep the defaults that
/// match a stock Composer/PHPUnit project layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TesterConfig {
    /// Dependency root scanned for `package-tester.json`, relative to the project.
    pub dependency_dir: String,

    /// Kill a suite's runner after this many seconds. Unset means wait forever.
    pub suite_timeout_secs: Option<u64>,

    pub runner: RunnerLocations,
}

/// Where to look for the runner executable, checked in field order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RunnerLocations {
    /// Environment variable holding an explicit runner script path.
    pub env_var: String,
    /// Interpreter used for script candidates (env override, entry script).
    pub interpreter: String,
    /// Windows batch wrapper.
    pub batch_wrapper: String,
    /// Executable shim.
    pub shim: String,
    /// The tool's own entry script.
    pub entry_script: String,
}

impl Default for RunnerLocations {
    fn default() -> Self {
        Self {
            env_var: "PHPUNIT_BINARY".to_string(),
            interpreter: "php".to_string(),
            batch_wrapper: "vendor/bin/phpunit.bat".to_string(),
            shim: "vendor/bin/phpunit".to_string(),
            entry_script: "vendor/phpunit/phpunit/phpunit".to_string(),
        }
    }
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self {
            dependency_dir: "vendor".to_string(),
            suite_timeout_secs: None,
            runner: RunnerLocations::default(),
        }
    }
}

impl TesterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dependency_dir.trim().is_empty() {
            return Err(anyhow!("dependency_dir must be non-empty"));
        }
        if self.suite_timeout_secs == Some(0) {
            return Err(anyhow!("suite_timeout_secs must be > 0 when set"));
        }
        let runner = &self.runner;
        for (field, value) in [
            ("runner.env_var", &runner.env_var),
            ("runner.interpreter", &runner.interpreter),
            ("runner.batch_wrapper", &runner.batch_wrapper),
            ("runner.shim", &runner.shim),
            ("runner.entry_script", &runner.entry_script),
        ] {
            if value.trim().is_empty() {
                return Err(anyhow!("{field} must be non-empty"));
            }
        }
        Ok(())
    }

    pub fn suite_timeout(&self) -> Option<Duration> {
        self.suite_timeout_secs.map(Duration::from_secs)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `TesterConfig::default()`.
pub fn load_config(path: &Path) -> Result<TesterConfig> {
    if !path.exists() {
        let cfg = TesterConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: TesterConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
