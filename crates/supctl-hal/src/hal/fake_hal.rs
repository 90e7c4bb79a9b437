//! Fake HAL implementation for testing.
//!
//! This implementation records every invocation without executing anything
//! and answers with scripted responses, so client logic can be tested without
//! a real `supervisorctl` on the machine.

use super::ProcessOps;
use crate::{HalError, HalResult};
use std::collections::VecDeque;
#[cfg(unix)]
use std::os::unix::process::ExitStatusExt;
#[cfg(windows)]
use std::os::windows::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Operation records for testing and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Command {
        program: String,
        args: Vec<String>,
        timeout_secs: Option<u64>,
    },
    Detached {
        program: String,
        args: Vec<String>,
    },
}

impl Operation {
    pub fn args(&self) -> &[String] {
        match self {
            Operation::Command { args, .. } | Operation::Detached { args, .. } => args,
        }
    }
}

/// Scripted result for the next invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeResponse {
    /// The command ran and exited with `code`.
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    /// The program could not be found.
    NotFound,
    /// The command exceeded its deadline.
    Timeout,
}

impl FakeResponse {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self::exit(0, stdout)
    }

    pub fn exit(code: i32, stdout: impl Into<String>) -> Self {
        FakeResponse::Exit {
            code,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn with_stderr(self, stderr: impl Into<String>) -> Self {
        match self {
            FakeResponse::Exit { code, stdout, .. } => FakeResponse::Exit {
                code,
                stdout,
                stderr: stderr.into(),
            },
            other => other,
        }
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    // Raw wait status: exit code lives in the second byte.
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    ExitStatus::from_raw(code as u32)
}

/// Shared state for FakeHal operations.
#[derive(Debug, Default)]
struct FakeHalState {
    /// All operations that were recorded
    operations: Vec<Operation>,
    /// Responses handed out in order; an empty queue means success with no output
    responses: VecDeque<FakeResponse>,
}

/// Fake HAL that records invocations and replays scripted responses.
///
/// Clones share state, so a test can keep one handle while the client owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

impl FakeHal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response for the next invocation.
    pub fn push_response(&self, response: FakeResponse) -> &Self {
        self.state.lock().unwrap().responses.push_back(response);
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.state.lock().unwrap().operations.clone()
    }

    /// Argument vector of the most recent invocation.
    pub fn last_args(&self) -> Option<Vec<String>> {
        self.state
            .lock()
            .unwrap()
            .operations
            .last()
            .map(|op| op.args().to_vec())
    }

    /// Get the number of operations recorded.
    pub fn operation_count(&self) -> usize {
        self.state.lock().unwrap().operations.len()
    }

    /// Check if a specific operation was recorded.
    pub fn has_operation(&self, check: impl Fn(&Operation) -> bool) -> bool {
        self.state.lock().unwrap().operations.iter().any(check)
    }

    /// Clear recorded operations and pending responses.
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        state.operations.clear();
        state.responses.clear();
    }

    fn record_operation(&self, op: Operation) -> Option<FakeResponse> {
        let mut state = self.state.lock().unwrap();
        state.operations.push(op);
        state.responses.pop_front()
    }
}

impl ProcessOps for FakeHal {
    fn command_output(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> HalResult<Output> {
        let response = self.record_operation(Operation::Command {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            timeout_secs: timeout.map(|t| t.as_secs()),
        });

        match response.unwrap_or_else(|| FakeResponse::success("")) {
            FakeResponse::Exit {
                code,
                stdout,
                stderr,
            } => Ok(Output {
                status: exit_status(code),
                stdout: stdout.into_bytes(),
                stderr: stderr.into_bytes(),
            }),
            FakeResponse::NotFound => Err(HalError::CommandNotFound(program.to_string())),
            FakeResponse::Timeout => Err(HalError::CommandTimeout {
                program: program.to_string(),
                timeout_secs: timeout.map(|t| t.as_secs()).unwrap_or_default(),
            }),
        }
    }

    fn spawn_detached(&self, program: &str, args: &[&str]) -> HalResult<()> {
        let response = self.record_operation(Operation::Detached {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
        });
        // Only a launch failure is observable for a detached command.
        match response {
            Some(FakeResponse::NotFound) => Err(HalError::CommandNotFound(program.to_string())),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_hal_records_command() {
        let hal = FakeHal::new();

        hal.command_output("supervisorctl", &["status"], None)
            .unwrap();

        assert_eq!(hal.operation_count(), 1);
        assert!(hal.has_operation(|op| matches!(
            op,
            Operation::Command { program, timeout_secs: None, .. } if program == "supervisorctl"
        )));
        assert_eq!(hal.last_args(), Some(vec!["status".to_string()]));
    }

    #[test]
    fn fake_hal_replays_responses_in_order() {
        let hal = FakeHal::new();
        hal.push_response(FakeResponse::exit(3, "a STOPPED not started\n"))
            .push_response(FakeResponse::NotFound);

        let out = hal.command_output("supervisorctl", &["status"], None).unwrap();
        assert_eq!(out.status.code(), Some(3));
        assert_eq!(out.stdout, b"a STOPPED not started\n");

        let err = hal.command_output("supervisorctl", &["status"], None).unwrap_err();
        assert!(matches!(err, HalError::CommandNotFound(_)));

        // Queue exhausted: plain success.
        let out = hal.command_output("supervisorctl", &["status"], None).unwrap();
        assert!(out.status.success());
    }

    #[test]
    fn fake_hal_status_uses_exit_code() {
        let hal = FakeHal::new();
        hal.push_response(FakeResponse::exit(1, "").with_stderr("boom"));

        let err = hal
            .command_status("supervisorctl", &["stop", "web"], None)
            .unwrap_err();
        match err {
            HalError::CommandFailed { code, stderr, .. } => {
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn fake_hal_records_detached() {
        let hal = FakeHal::new();
        hal.spawn_detached("supervisorctl", &["start", "web"]).unwrap();

        assert!(hal.has_operation(|op| matches!(op, Operation::Detached { .. })));
        assert_eq!(
            hal.last_args(),
            Some(vec!["start".to_string(), "web".to_string()])
        );
    }

    #[test]
    fn fake_hal_can_clear() {
        let hal = FakeHal::new();
        hal.push_response(FakeResponse::NotFound);
        hal.spawn_detached("supervisorctl", &["start", "web"]).unwrap_err();

        assert_eq!(hal.operation_count(), 1);

        hal.clear();

        assert_eq!(hal.operation_count(), 0);
        assert!(hal.command_output("supervisorctl", &[], None).is_ok());
    }
}
