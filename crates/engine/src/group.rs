// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Group execution: sequential chains and bounded parallel pools.
//!
//! Results are recorded into a slot array indexed by task position, so the
//! final list is always in input order regardless of completion order.
//! Attempts observe the group's shared [`AbortSignal`]; the group never
//! hands itself to an attempt.

use std::sync::Arc;

use chorus_core::{Group, GroupPolicy, Task, TaskResult, KILLED_EXIT_CODE};
use tokio::task::JoinSet;

use crate::abort::AbortSignal;
use crate::attempt::{self, AttemptOutcome, OutcomeKind, TaskContext};
use crate::output::{OutputSettings, TaskIo};
use crate::runner::RunnerCommand;

pub(crate) struct GroupContext {
    pub runner: RunnerCommand,
    pub env: Arc<Vec<(String, String)>>,
    pub abort: Arc<AbortSignal>,
    pub policy: GroupPolicy,
    pub output: OutputSettings,
    /// Index of this group's first task within the whole run; label colors
    /// key off the run-wide task index.
    pub index_offset: usize,
}

/// First definitive task failure in a group.
pub(crate) struct FirstFailure {
    pub name: String,
    pub code: i32,
}

pub(crate) struct GroupOutput {
    pub results: Vec<TaskResult>,
    pub failed: Option<FirstFailure>,
}

pub(crate) async fn run_group(group: &Group, ctx: &GroupContext) -> GroupOutput {
    if group.parallel {
        run_parallel(&group.tasks, ctx).await
    } else {
        run_sequential(&group.tasks, ctx).await
    }
}

async fn run_sequential(tasks: &[Task], ctx: &GroupContext) -> GroupOutput {
    let mut results = unstarted_results(tasks);
    let mut failed: Option<FirstFailure> = None;

    for (index, task) in tasks.iter().enumerate() {
        if ctx.abort.is_aborted() {
            break;
        }
        if failed.is_some() && !ctx.policy.continue_on_error {
            break;
        }
        let (task_ctx, _io) = task_context(ctx, index, task, false);
        let outcome = attempt::run_task(task.clone(), task_ctx).await;
        if let OutcomeKind::Failed(code) = outcome.kind {
            note_failure(&mut failed, &task.display_name, code);
        }
        results[index] = outcome.result;
    }

    GroupOutput { results, failed }
}

async fn run_parallel(tasks: &[Task], ctx: &GroupContext) -> GroupOutput {
    let total = tasks.len();
    let mut results = unstarted_results(tasks);
    let mut failed: Option<FirstFailure> = None;
    if total == 0 {
        return GroupOutput { results, failed };
    }

    let cap = ctx.policy.max_parallel.unwrap_or(total).max(1).min(total);
    let aggregate = ctx.policy.aggregate_output;
    tracing::debug!(total, cap, race = ctx.policy.race, "starting parallel group");

    let mut ios: Vec<Option<TaskIo>> = (0..total).map(|_| None).collect();
    let mut join: JoinSet<(usize, AttemptOutcome)> = JoinSet::new();
    let mut next = 0usize;

    while next < cap {
        spawn_task(&mut join, &mut ios, ctx, tasks, next, aggregate);
        next += 1;
    }

    while let Some(joined) = join.join_next().await {
        let (index, mut outcome) = match joined {
            Ok(pair) => pair,
            Err(e) => {
                tracing::error!(error = %e, "task future aborted unexpectedly");
                continue;
            }
        };
        if let Some(io) = &ios[index] {
            io.flush_aggregate();
        }

        let was_aborting = ctx.abort.is_aborted();
        if was_aborting {
            // The group is already tearing down: ignore the outcome beyond
            // recording the result. A success that slips in after a race is
            // decided did not win.
            if ctx.policy.race && matches!(outcome.kind, OutcomeKind::Success) {
                outcome.result.code = Some(KILLED_EXIT_CODE);
            }
        } else {
            match outcome.kind {
                OutcomeKind::Success => {
                    if ctx.policy.race {
                        tracing::debug!(task = %tasks[index].display_name, "race winner");
                        ctx.abort.trigger();
                    }
                }
                OutcomeKind::Failed(code) => {
                    note_failure(&mut failed, &tasks[index].display_name, code);
                    if !ctx.policy.continue_on_error {
                        ctx.abort.trigger();
                    }
                }
                OutcomeKind::Killed => {}
            }
        }
        results[index] = outcome.result;

        if !ctx.abort.is_aborted() && next < total {
            spawn_task(&mut join, &mut ios, ctx, tasks, next, aggregate);
            next += 1;
        }
    }

    GroupOutput { results, failed }
}

fn spawn_task(
    join: &mut JoinSet<(usize, AttemptOutcome)>,
    ios: &mut [Option<TaskIo>],
    ctx: &GroupContext,
    tasks: &[Task],
    index: usize,
    aggregate: bool,
) {
    let task = tasks[index].clone();
    let (task_ctx, io) = task_context(ctx, index, &task, aggregate);
    ios[index] = Some(io);
    join.spawn(async move { (index, attempt::run_task(task, task_ctx).await) });
}

fn task_context(
    ctx: &GroupContext,
    index: usize,
    task: &Task,
    aggregate: bool,
) -> (TaskContext, TaskIo) {
    let io = TaskIo::build(
        &ctx.output,
        ctx.index_offset + index,
        &task.display_name,
        aggregate,
    );
    (
        TaskContext {
            runner: ctx.runner.clone(),
            env: ctx.env.clone(),
            abort: ctx.abort.clone(),
            policy: ctx.policy.clone(),
            io: io.clone(),
        },
        io,
    )
}

fn unstarted_results(tasks: &[Task]) -> Vec<TaskResult> {
    tasks
        .iter()
        .map(|t| TaskResult::unstarted(&t.display_name))
        .collect()
}

fn note_failure(failed: &mut Option<FirstFailure>, name: &str, code: i32) {
    if failed.is_none() {
        *failed = Some(FirstFailure {
            name: name.to_string(),
            code,
        });
    }
}
