//! Process execution trait.
//!
//! Every call to the external control tool goes through `ProcessOps` so the
//! client can be exercised without spawning real processes.

use crate::{HalError, HalResult};
use std::process::Output;
use std::time::Duration;

/// External command runner.
pub trait ProcessOps: Send + Sync {
    /// Runs `program` to completion and returns its exit status with captured
    /// stdout and stderr. A non-zero exit is not an error at this level.
    ///
    /// `timeout` of `None` waits for as long as the command takes.
    fn command_output(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> HalResult<Output>;

    /// Launches `program` and returns as soon as it has been spawned.
    fn spawn_detached(&self, program: &str, args: &[&str]) -> HalResult<()>;

    /// Runs `program` to completion and reports only success or failure.
    fn command_status(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> HalResult<()> {
        let output = self.command_output(program, args, timeout)?;
        if !output.status.success() {
            return Err(output_failed(program, &output));
        }
        Ok(())
    }
}

impl<T: ProcessOps + ?Sized> ProcessOps for &T {
    fn command_output(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> HalResult<Output> {
        (**self).command_output(program, args, timeout)
    }

    fn spawn_detached(&self, program: &str, args: &[&str]) -> HalResult<()> {
        (**self).spawn_detached(program, args)
    }
}

/// Builds a `CommandFailed` from a finished command.
///
/// The message carries stdout and stderr; supervisorctl reports most
/// failures on stdout.
pub fn output_failed(program: &str, output: &Output) -> HalError {
    HalError::CommandFailed {
        program: program.to_string(),
        code: output.status.code(),
        stderr: combined_output(output),
    }
}

/// Stdout followed by stderr, lossily decoded and trimmed.
pub fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = stdout.trim();
    let stderr = stderr.trim();
    match (stdout.is_empty(), stderr.is_empty()) {
        (_, true) => stdout.to_string(),
        (true, false) => stderr.to_string(),
        (false, false) => format!("{}\n{}", stdout, stderr),
    }
}
