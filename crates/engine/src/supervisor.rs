// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Child process supervision.
//!
//! Spawns one script-runner invocation with wired standard streams and
//! returns a handle whose `abort` tears down the entire process subtree. On
//! unix every child is placed in its own process group so the teardown can
//! signal the whole tree; elsewhere it falls back to killing the direct
//! child.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::{Child, ChildStderr, ChildStdout, Command};

use crate::runner::RunnerCommand;

/// How long an aborted subtree gets to exit after SIGTERM before SIGKILL.
const KILL_GRACE: Duration = Duration::from_secs(2);

/// A running script invocation.
pub struct SpawnedChild {
    child: Child,
    pid: Option<u32>,
    aborted: bool,
}

/// Spawn one invocation of the script runner for `script`.
pub fn spawn(
    runner: &RunnerCommand,
    script: &str,
    extra_args: &[String],
    env: &[(String, String)],
    stdin: Stdio,
    stdout: Stdio,
    stderr: Stdio,
) -> std::io::Result<SpawnedChild> {
    let mut cmd = Command::new(runner.program());
    cmd.args(runner.args_for(script, extra_args))
        .stdin(stdin)
        .stdout(stdout)
        .stderr(stderr);
    for (key, value) in env {
        cmd.env(key, value);
    }
    #[cfg(unix)]
    cmd.process_group(0);
    // Last-resort cleanup if an attempt future is dropped mid-flight.
    cmd.kill_on_drop(true);

    let child = cmd.spawn()?;
    let pid = child.id();
    tracing::debug!(script, ?pid, "spawned script runner");
    Ok(SpawnedChild {
        child,
        pid,
        aborted: false,
    })
}

impl SpawnedChild {
    pub fn stdout_take(&mut self) -> Option<ChildStdout> {
        self.child.stdout.take()
    }

    pub fn stderr_take(&mut self) -> Option<ChildStderr> {
        self.child.stderr.take()
    }

    /// Wait for the child to exit.
    pub async fn wait(&mut self) -> std::io::Result<ExitStatus> {
        self.child.wait().await
    }

    /// Terminate the process subtree. Idempotent; the eventual exit status is
    /// still observed via [`wait`](Self::wait).
    ///
    /// SIGTERM to the process group first, then SIGKILL after a grace period
    /// for children that ignore it.
    pub async fn abort(&mut self) {
        if self.aborted {
            return;
        }
        self.aborted = true;
        tracing::debug!(pid = ?self.pid, "aborting process subtree");

        self.signal_group(term_signal());
        if tokio::time::timeout(KILL_GRACE, self.child.wait())
            .await
            .is_err()
        {
            self.signal_group(kill_signal());
            let _ = self.child.start_kill();
            let _ = self.child.wait().await;
        }
    }

    #[cfg(unix)]
    fn signal_group(&mut self, signal: i32) {
        if let Some(pid) = self.pid {
            // The child was spawned into its own process group, so its pid is
            // the group id.
            unsafe {
                libc::killpg(pid as i32, signal);
            }
        } else {
            let _ = self.child.start_kill();
        }
    }

    #[cfg(not(unix))]
    fn signal_group(&mut self, _signal: i32) {
        let _ = self.child.start_kill();
    }
}

#[cfg(unix)]
fn term_signal() -> i32 {
    libc::SIGTERM
}

#[cfg(unix)]
fn kill_signal() -> i32 {
    libc::SIGKILL
}

#[cfg(not(unix))]
fn term_signal() -> i32 {
    0
}

#[cfg(not(unix))]
fn kill_signal() -> i32 {
    0
}

/// Numeric exit code for a finished attempt: the natural code when the child
/// exited, or `128 + signo` when a signal the engine did not send killed it.
pub fn exit_code(status: ExitStatus) -> i32 {
    match status.code() {
        Some(code) => code,
        None => signal_exit_code(status),
    }
}

#[cfg(unix)]
fn signal_exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(|s| 128 + s).unwrap_or(1)
}

#[cfg(not(unix))]
fn signal_exit_code(_status: ExitStatus) -> i32 {
    1
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
