//! Real HAL implementation backed by `std::process`.

use super::ProcessOps;
use crate::{HalError, HalResult};
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;
use wait_timeout::ChildExt;

/// Spawns real processes, resolving bare program names through `PATH`.
#[derive(Debug, Clone, Default)]
pub struct SystemHal;

impl SystemHal {
    pub fn new() -> Self {
        Self
    }
}

fn map_command_err(program: &str, err: std::io::Error) -> HalError {
    if err.kind() == std::io::ErrorKind::NotFound {
        return HalError::CommandNotFound(program.to_string());
    }
    HalError::Io(err)
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

/// `None` when the deadline passed before the child exited.
fn wait_child(child: &mut Child, timeout: Option<Duration>) -> HalResult<Option<ExitStatus>> {
    let status = match timeout {
        Some(timeout) => child.wait_timeout(timeout)?,
        None => Some(child.wait()?),
    };
    Ok(status)
}

fn output_with_timeout(
    program: &str,
    cmd: &mut Command,
    timeout: Option<Duration>,
) -> HalResult<Output> {
    // Avoid commands hanging waiting for input.
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().map_err(|e| map_command_err(program, e))?;

    // Drain pipes concurrently to avoid deadlocks on large output.
    let stdout_handle = drain(child.stdout.take());
    let stderr_handle = drain(child.stderr.take());

    let status = match wait_child(&mut child, timeout)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            let _ = stdout_handle.join();
            let _ = stderr_handle.join();
            return Err(HalError::CommandTimeout {
                program: program.to_string(),
                timeout_secs: timeout.map(|t| t.as_secs()).unwrap_or_default(),
            });
        }
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

impl ProcessOps for SystemHal {
    fn command_output(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> HalResult<Output> {
        log::debug!("exec: {} {:?}", program, args);
        let mut cmd = Command::new(program);
        cmd.args(args);
        output_with_timeout(program, &mut cmd, timeout)
    }

    fn spawn_detached(&self, program: &str, args: &[&str]) -> HalResult<()> {
        log::debug!("exec (detached): {} {:?}", program, args);
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| map_command_err(program, e))?;

        // Reap in the background so the child never lingers as a zombie. The
        // child is already running, so a missing reaper does not fail the launch;
        // it then stays unreaped until this process exits.
        let pid = child.id();
        if let Err(err) = std::thread::Builder::new()
            .name(format!("reap-{}", pid))
            .spawn(move || {
                let _ = child.wait();
            })
        {
            log::debug!("no reaper thread for {} (pid {}): {}", program, pid, err);
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn output_keeps_nonzero_status() {
        let hal = SystemHal::new();
        let out = hal
            .command_output("sh", &["-c", "echo partial; exit 3"], None)
            .unwrap();
        assert_eq!(out.status.code(), Some(3));
        assert_eq!(String::from_utf8_lossy(&out.stdout), "partial\n");
    }

    #[test]
    fn output_captures_stderr() {
        let hal = SystemHal::new();
        let out = hal
            .command_output("sh", &["-c", "echo oops >&2"], None)
            .unwrap();
        assert!(out.status.success());
        assert!(out.stdout.is_empty());
        assert_eq!(String::from_utf8_lossy(&out.stderr), "oops\n");
    }

    #[test]
    fn non_utf8_output_is_decoded_lossily() {
        let hal = SystemHal::new();
        let out = hal
            .command_output("sh", &["-c", "printf 'web\\377'"], None)
            .unwrap();
        assert_eq!(out.stdout, b"web\xff");
        assert_eq!(crate::hal::combined_output(&out), "web\u{fffd}");
    }

    #[test]
    fn missing_program_is_command_not_found() {
        let hal = SystemHal::new();
        let err = hal
            .command_output("supctl-definitely-missing", &[], None)
            .unwrap_err();
        assert!(matches!(err, HalError::CommandNotFound(ref p) if p == "supctl-definitely-missing"));
    }

    #[test]
    fn status_fails_on_nonzero_exit() {
        let hal = SystemHal::new();
        let err = hal
            .command_status("sh", &["-c", "echo 'ERROR (no such process)'; exit 1"], None)
            .unwrap_err();
        match err {
            HalError::CommandFailed { code, stderr, .. } => {
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "ERROR (no such process)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn timeout_kills_slow_command() {
        let hal = SystemHal::new();
        let err = hal
            .command_output("sleep", &["5"], Some(Duration::from_millis(100)))
            .unwrap_err();
        assert!(matches!(err, HalError::CommandTimeout { .. }));
    }

    #[test]
    fn detached_launch_returns_without_waiting() {
        let hal = SystemHal::new();
        let started = std::time::Instant::now();
        hal.spawn_detached("sleep", &["2"]).unwrap();
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn detached_launch_reports_missing_program() {
        let hal = SystemHal::new();
        let err = hal
            .spawn_detached("supctl-definitely-missing", &[])
            .unwrap_err();
        assert!(matches!(err, HalError::CommandNotFound(_)));
    }
}
