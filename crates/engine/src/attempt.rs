// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-task retry loop.
//!
//! Runs one task's attempts serially with zero-delay retries until success,
//! retry exhaustion, or abort. An aborted attempt reports the killed code
//! and never counts toward exhaustion.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;

use chorus_core::{GroupPolicy, Task, TaskResult, KILLED_EXIT_CODE};

use crate::abort::AbortSignal;
use crate::output::{self, TaskIo};
use crate::runner::RunnerCommand;
use crate::supervisor;

/// Everything one task's attempts need; owned so the parallel executor can
/// move it into a spawned future.
pub(crate) struct TaskContext {
    pub runner: RunnerCommand,
    pub env: Arc<Vec<(String, String)>>,
    pub abort: Arc<AbortSignal>,
    pub policy: GroupPolicy,
    pub io: TaskIo,
}

/// How a task ended, for group-level policy decisions.
pub(crate) enum OutcomeKind {
    Success,
    Failed(i32),
    Killed,
}

pub(crate) struct AttemptOutcome {
    pub result: TaskResult,
    pub kind: OutcomeKind,
}

enum AttemptExit {
    Code(i32),
    Aborted,
}

/// Run one task to completion under the retry policy.
pub(crate) async fn run_task(task: Task, ctx: TaskContext) -> AttemptOutcome {
    if ctx.abort.is_aborted() {
        return AttemptOutcome {
            result: TaskResult::unstarted(&task.display_name),
            kind: OutcomeKind::Killed,
        };
    }
    let started = Instant::now();
    if ctx.policy.print_name && !ctx.policy.silent {
        ctx.io.out.write_line(&format!("> {}", task.display_name));
    }

    let mut attempt = 0usize;
    loop {
        match run_attempt(&task, &ctx).await {
            AttemptExit::Aborted => {
                return finish(&task, KILLED_EXIT_CODE, attempt, started, OutcomeKind::Killed)
            }
            AttemptExit::Code(0) => {
                return finish(&task, 0, attempt, started, OutcomeKind::Success)
            }
            AttemptExit::Code(code) => {
                if attempt == ctx.policy.retry_limit {
                    return finish(&task, code, attempt, started, OutcomeKind::Failed(code));
                }
                if ctx.abort.is_aborted() {
                    // Abort observed between retries: report killed without
                    // spawning another child.
                    return finish(&task, KILLED_EXIT_CODE, attempt, started, OutcomeKind::Killed);
                }
                tracing::debug!(task = %task.display_name, attempt, code, "retrying");
                attempt += 1;
            }
        }
    }
}

fn finish(
    task: &Task,
    code: i32,
    attempt: usize,
    started: Instant,
    kind: OutcomeKind,
) -> AttemptOutcome {
    AttemptOutcome {
        result: TaskResult {
            name: task.display_name.clone(),
            code: Some(code),
            retries: attempt,
            duration_ms: started.elapsed().as_millis() as u64,
        },
        kind,
    }
}

/// One child-process execution: spawn, pump output, wait or abort.
async fn run_attempt(task: &Task, ctx: &TaskContext) -> AttemptExit {
    let stdin = if ctx.io.is_piped() {
        Stdio::null()
    } else {
        Stdio::inherit()
    };
    let spawned = supervisor::spawn(
        &ctx.runner,
        &task.script_name,
        &task.extra_args,
        &ctx.env,
        stdin,
        ctx.io.out.stdio(),
        ctx.io.err.stdio(),
    );
    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            tracing::error!(script = %task.script_name, error = %e, "failed to spawn script runner");
            return AttemptExit::Code(127);
        }
    };

    let mut pumps = Vec::new();
    if let Some(stdout) = child.stdout_take() {
        if let Some(writer) = ctx.io.out.writer() {
            pumps.push(tokio::spawn(output::pump(stdout, writer)));
        }
    }
    if let Some(stderr) = child.stderr_take() {
        if let Some(writer) = ctx.io.err.writer() {
            pumps.push(tokio::spawn(output::pump(stderr, writer)));
        }
    }

    let exit = tokio::select! {
        status = child.wait() => match status {
            Ok(status) => AttemptExit::Code(supervisor::exit_code(status)),
            Err(e) => {
                tracing::error!(script = %task.script_name, error = %e, "wait on script runner failed");
                AttemptExit::Code(1)
            }
        },
        _ = ctx.abort.cancelled() => {
            child.abort().await;
            AttemptExit::Aborted
        }
    };

    // Drain remaining output before the result is finalized.
    for pump in pumps {
        let _ = pump.await;
    }
    exit
}
