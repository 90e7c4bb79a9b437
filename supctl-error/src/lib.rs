use std::fmt;
use std::io;
use thiserror::Error;

pub type HalResult<T> = Result<T, HalError>;
pub type CtlResult<T> = Result<T, CtlError>;

/// Failures raised by the process execution layer.
#[derive(Error, Debug)]
pub enum HalError {
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    #[error("Command failed: {program} (exit={code:?}): {stderr}")]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Command timed out: {program} after {timeout_secs}s")]
    CommandTimeout { program: String, timeout_secs: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Failures decoding a line of `status` output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid status line: {0}")]
    InvalidLine(String),

    #[error("unknown state: {0}")]
    UnknownState(String),
}

/// The subcommand a failed invocation was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Status,
    Start,
    Stop,
    Restart,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Status => "status",
            Action::Start => "start",
            Action::Stop => "stop",
            Action::Restart => "restart",
        }
    }

    fn failure_label(self) -> &'static str {
        match self {
            Action::Status => "failed to get status",
            Action::Start => "failed to start program",
            Action::Stop => "failed to stop program",
            Action::Restart => "failed to restart program",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the supervisorctl client.
#[derive(Error, Debug)]
pub enum CtlError {
    /// The tool could not be started at all.
    #[error("{}: could not launch {program}: {source}", .action.failure_label())]
    Launch {
        action: Action,
        program: String,
        #[source]
        source: HalError,
    },

    /// The tool ran but exited with a status the caller does not tolerate.
    #[error("{}: {program} exited with {code:?} - output {output}", .action.failure_label())]
    Exit {
        action: Action,
        program: String,
        code: Option<i32>,
        output: String,
    },

    #[error("{}: {program} timed out after {timeout_secs}s", .action.failure_label())]
    Timeout {
        action: Action,
        program: String,
        timeout_secs: u64,
    },

    #[error("failed to parse status line: {0}")]
    Parse(#[from] ParseError),
}

impl CtlError {
    /// Classifies a process-layer failure for `action`.
    pub fn from_hal(action: Action, program: &str, err: HalError) -> Self {
        match err {
            HalError::CommandFailed { code, stderr, .. } => CtlError::Exit {
                action,
                program: program.to_string(),
                code,
                output: stderr,
            },
            HalError::CommandTimeout { timeout_secs, .. } => CtlError::Timeout {
                action,
                program: program.to_string(),
                timeout_secs,
            },
            other => CtlError::Launch {
                action,
                program: program.to_string(),
                source: other,
            },
        }
    }

    /// Exit code of the tool, when it ran far enough to report one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            CtlError::Exit { code, .. } => *code,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_line_message_contains_line() {
        let err = ParseError::InvalidLine("invalid".to_string());
        assert_eq!(err.to_string(), "invalid status line: invalid");
    }

    #[test]
    fn parse_error_is_wrapped_for_status() {
        let err = CtlError::from(ParseError::UnknownState("WEIRD".to_string()));
        assert_eq!(
            err.to_string(),
            "failed to parse status line: unknown state: WEIRD"
        );
    }

    #[test]
    fn command_failed_maps_to_exit() {
        let err = CtlError::from_hal(
            Action::Stop,
            "supervisorctl",
            HalError::CommandFailed {
                program: "supervisorctl".to_string(),
                code: Some(7),
                stderr: "ERROR (not running)".to_string(),
            },
        );
        assert_eq!(err.exit_code(), Some(7));
        let msg = err.to_string();
        assert!(msg.starts_with("failed to stop program"));
        assert!(msg.contains("ERROR (not running)"));
    }

    #[test]
    fn missing_command_maps_to_launch() {
        let err = CtlError::from_hal(
            Action::Start,
            "supervisorctl",
            HalError::CommandNotFound("supervisorctl".to_string()),
        );
        assert!(matches!(err, CtlError::Launch { action: Action::Start, .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn timeout_keeps_deadline() {
        let err = CtlError::from_hal(
            Action::Status,
            "supervisorctl",
            HalError::CommandTimeout {
                program: "supervisorctl".to_string(),
                timeout_secs: 5,
            },
        );
        assert!(matches!(err, CtlError::Timeout { timeout_secs: 5, .. }));
    }
}
