//! CLI argument parsing for supctl.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use supctl_core::ClientConfig;

#[derive(Parser, Debug)]
#[command(name = "supctl", version)]
#[command(about = "Query and control supervisord programs through supervisorctl")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// supctl settings file (TOML: program, config_file, timeout_secs)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// supervisord configuration file, passed to supervisorctl as `-c`
    #[arg(short = 'c', long, global = true)]
    pub configuration: Option<PathBuf>,

    /// supervisorctl executable (name on PATH or absolute path)
    #[arg(long, global = true)]
    pub program: Option<String>,

    /// Kill supervisorctl after this many seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the status of all programs, or only the named ones
    Status {
        names: Vec<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Start a program
    Start {
        name: String,

        /// Launch supervisorctl and return without waiting for it
        #[arg(long)]
        no_wait: bool,
    },

    /// Stop a program
    Stop { name: String },

    /// Restart a program
    Restart {
        name: String,

        /// Launch supervisorctl and return without waiting for it
        #[arg(long)]
        no_wait: bool,
    },
}

impl Cli {
    /// Settings file values, overridden by any flags given.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.settings {
            Some(path) => ClientConfig::load(path)?,
            None => ClientConfig::default(),
        };
        if let Some(path) = &self.configuration {
            config = config.with_config_file(path);
        }
        if let Some(program) = &self.program {
            config = config.with_program(program);
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout_secs(secs);
        }
        config.validate()?;
        Ok(config)
    }
}
