//! External program execution with captured output and a time limit.
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;

use wait_timeout::ChildExt as _;

use crate::error::ExecError;

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecResult {
    /// Captured standard output (lossily decoded).
    pub stdout: String,
    /// Captured standard error (lossily decoded).
    pub stderr: String,
    /// Whether the process exited with status zero.
    pub success: bool,
    /// Exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ExecResult {
    /// Build a successful result with empty output.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        }
    }

    /// Build a failed result with the given exit code and stderr.
    #[must_use]
    pub fn failed(code: i32, stderr: &str) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.to_string(),
            success: false,
            code: Some(code),
        }
    }
}

/// Abstraction over running external programs.
///
/// Production code uses [`SystemExecutor`]; tests substitute fakes so no real
/// process is ever spawned.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run `program` with `args`, waiting at most `timeout`.
    ///
    /// A non-zero exit is reported through [`ExecResult::success`], not as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError::Spawn`] if the program cannot be started,
    /// [`ExecError::Timeout`] if it is still running when `timeout` elapses
    /// (the child is killed), or [`ExecError::Wait`] if its status or output
    /// cannot be collected.
    fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<ExecResult, ExecError>;

    /// Return `true` if `program` can be found on `PATH`.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<ExecResult, ExecError> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ExecError::Spawn {
                program: program.to_string(),
                source,
            })?;

        tracing::debug!("spawned {program} {}", args.join(" "));
        wait_with_output(&mut child, program, timeout)
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Drain stdout/stderr on background threads while waiting for `child`, so a
/// chatty process cannot deadlock on a full pipe.
fn wait_with_output(
    child: &mut Child,
    program: &str,
    timeout: Duration,
) -> Result<ExecResult, ExecError> {
    let wait_err = |source| ExecError::Wait {
        program: program.to_string(),
        source,
    };

    let stdout = child.stdout.take().map(spawn_reader);
    let stderr = child.stderr.take().map(spawn_reader);

    let Some(status) = child.wait_timeout(timeout).map_err(wait_err)? else {
        tracing::warn!("{program} timed out after {}s, killing", timeout.as_secs());
        child.kill().map_err(wait_err)?;
        child.wait().map_err(wait_err)?;
        return Err(ExecError::Timeout {
            program: program.to_string(),
            timeout,
        });
    };

    Ok(ExecResult {
        stdout: join_reader(stdout).map_err(wait_err)?,
        stderr: join_reader(stderr).map_err(wait_err)?,
        success: status.success(),
        code: status.code(),
    })
}

fn spawn_reader<R: Read + Send + 'static>(mut reader: R) -> thread::JoinHandle<std::io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn join_reader(
    handle: Option<thread::JoinHandle<std::io::Result<Vec<u8>>>>,
) -> std::io::Result<String> {
    let Some(handle) = handle else {
        return Ok(String::new());
    };
    let bytes = handle
        .join()
        .map_err(|_| std::io::Error::other("output reader thread panicked"))??;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
