//! The supervisorctl client.

use crate::command::{build_args, ControlAction};
use crate::config::ClientConfig;
use crate::status::{parse_status_output, ProgramInfo};
use supctl_error::{Action, CtlError, CtlResult};
use supctl_hal::hal::combined_output;
use supctl_hal::{ProcessOps, SystemHal};

/// `status` exit codes that still carry a usable report: 3 (some programs
/// not running) and 4 (some names not found).
pub const TOLERATED_STATUS_EXIT_CODES: [i32; 2] = [3, 4];

/// Which programs `status` reports on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusOptions {
    /// Empty means every program.
    pub names: Vec<String>,
}

impl StatusOptions {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

/// Runs supervisorctl through a [`ProcessOps`] backend.
///
/// Holds no mutable state; one client can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct SupervisorClient<P = SystemHal> {
    config: ClientConfig,
    ops: P,
}

impl SupervisorClient<SystemHal> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_ops(config, SystemHal::new())
    }
}

impl Default for SupervisorClient<SystemHal> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<P: ProcessOps> SupervisorClient<P> {
    pub fn with_ops(config: ClientConfig, ops: P) -> Self {
        Self { config, ops }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn ops(&self) -> &P {
        &self.ops
    }

    fn args<S: AsRef<str>>(&self, action: Action, operands: &[S]) -> Vec<String> {
        build_args(self.config.config_file.as_deref(), action, operands)
    }

    /// Arguments a `status` call with `opts` would pass to the tool.
    pub fn status_args(&self, opts: &StatusOptions) -> Vec<String> {
        self.args(Action::Status, opts.names.as_slice())
    }

    /// Runs `status` and returns its raw stdout.
    ///
    /// Exit codes 3 and 4 are accepted; any other failure carries the
    /// captured output.
    pub fn status_output(&self, opts: &StatusOptions) -> CtlResult<String> {
        let program = self.config.program.as_str();
        let args = self.status_args(opts);
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();

        let output = self
            .ops
            .command_output(program, &argv, self.config.timeout())
            .map_err(|e| CtlError::from_hal(Action::Status, program, e))?;

        if !output.status.success() {
            match output.status.code() {
                Some(code) if TOLERATED_STATUS_EXIT_CODES.contains(&code) => {
                    log::trace!("{} status exited with {}; parsing partial report", program, code);
                }
                code => {
                    return Err(CtlError::Exit {
                        action: Action::Status,
                        program: program.to_string(),
                        code,
                        output: combined_output(&output),
                    });
                }
            }
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Status of the programs named in `opts` (all when empty), in report order.
    pub fn status(&self, opts: &StatusOptions) -> CtlResult<Vec<ProgramInfo>> {
        let output = self.status_output(opts)?;
        Ok(parse_status_output(&output)?)
    }

    /// Runs `<action> <name>` and waits for it to finish.
    pub fn control(&self, action: ControlAction, name: &str) -> CtlResult<()> {
        let program = self.config.program.as_str();
        let args = self.args(action.into(), &[name]);
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();

        self.ops
            .command_status(program, &argv, self.config.timeout())
            .map_err(|e| CtlError::from_hal(action.into(), program, e))
    }

    pub fn start(&self, name: &str) -> CtlResult<()> {
        self.control(ControlAction::Start, name)
    }

    pub fn stop(&self, name: &str) -> CtlResult<()> {
        self.control(ControlAction::Stop, name)
    }

    pub fn restart(&self, name: &str) -> CtlResult<()> {
        self.control(ControlAction::Restart, name)
    }

    /// Launches `<action> <name>` and returns without waiting.
    ///
    /// Nothing about the outcome is reported, including a failure to launch.
    fn control_detached(&self, action: ControlAction, name: &str) {
        let args = self.args(action.into(), &[name]);
        let argv: Vec<&str> = args.iter().map(String::as_str).collect();
        let _ = self.ops.spawn_detached(&self.config.program, &argv);
    }

    pub fn start_detached(&self, name: &str) {
        self.control_detached(ControlAction::Start, name);
    }

    pub fn restart_detached(&self, name: &str) {
        self.control_detached(ControlAction::Restart, name);
    }
}
