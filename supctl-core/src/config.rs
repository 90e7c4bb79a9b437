//! Client configuration.
//!
//! Usually built in code, optionally loaded from a small TOML file:
//!
//! ```toml
//! program = "/usr/local/bin/supervisorctl"
//! config_file = "/etc/supervisor/supervisord.conf"
//! timeout_secs = 30
//! ```

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PROGRAM: &str = "supervisorctl";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Executable to invoke; bare names are resolved through `PATH`.
    pub program: String,
    /// Passed to the tool as `-c <path>` when set.
    pub config_file: Option<PathBuf>,
    /// Kill the tool after this many seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            config_file: None,
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.program.trim().is_empty(), "program must not be empty");
        ensure!(
            self.timeout_secs != Some(0),
            "timeout_secs must be greater than zero"
        );
        Ok(())
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("failed to parse client config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }
}
