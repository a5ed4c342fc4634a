// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline driver: runs groups in declaration order.
//!
//! Short-circuits after a failed group unless continue-on-error is set; the
//! tasks of skipped groups still appear in the final snapshot as unstarted
//! so every scheduled task has exactly one result.

use std::sync::Arc;

use chorus_core::{Group, GroupPolicy, TaskResult};

use crate::abort::AbortSignal;
use crate::env::{self, PackageConfig};
use crate::error::RunError;
use crate::group::{self, FirstFailure, GroupContext};
use crate::output::{stderr_sink, stdout_sink, LabelDecorator, OutputSettings, SharedSink};
use crate::runner::RunnerCommand;

/// Library-facing options for one invocation.
pub struct RunOptions {
    pub policy: GroupPolicy,
    pub runner: RunnerCommand,
    /// Manifest package name; scopes config-variable overwrites.
    pub package_name: Option<String>,
    /// Run-time config (`--KEY=VALUE`), exported as `npm_config_KEY`.
    pub config: Vec<(String, String)>,
    /// Package-scoped config overwrites (flags and ambient environment).
    pub package_config: Vec<PackageConfig>,
    pub stdout: SharedSink,
    pub stderr: SharedSink,
    /// Cosmetic label styling (per-task color), applied after padding.
    pub label_decorator: Option<LabelDecorator>,
    /// Run-wide cancellation (external signals). Each group owns its own
    /// abort flag; this signal is forwarded into it, never shared.
    pub abort: Arc<AbortSignal>,
}

impl RunOptions {
    pub fn new(runner: RunnerCommand) -> Self {
        Self {
            policy: GroupPolicy::default(),
            runner,
            package_name: None,
            config: Vec::new(),
            package_config: Vec::new(),
            stdout: stdout_sink(),
            stderr: stderr_sink(),
            label_decorator: None,
            abort: Arc::new(AbortSignal::new()),
        }
    }
}

/// Run every group in order and return the concatenated results.
///
/// Rejects with [`RunError::TaskFailure`] carrying the full snapshot when
/// any task failed definitively. Externally aborted runs resolve `Ok` with
/// killed-code entries; deciding the process exit code for that case is the
/// caller's concern.
pub async fn run(groups: &[Group], options: &RunOptions) -> Result<Vec<TaskResult>, RunError> {
    validate(groups, &options.policy)?;

    let label_width = groups
        .iter()
        .flat_map(|g| g.tasks.iter())
        .map(|t| t.display_name.chars().count())
        .max()
        .unwrap_or(0);
    let settings = OutputSettings {
        stdout: options.stdout.clone(),
        stderr: options.stderr.clone(),
        label_width,
        print_label: options.policy.print_label,
        aggregate: options.policy.aggregate_output,
        decorate: options.label_decorator.clone(),
    };
    let env = Arc::new(env::child_env(
        &options.config,
        options.package_name.as_deref(),
        &options.package_config,
    ));

    let mut all: Vec<TaskResult> = Vec::new();
    let mut failure: Option<FirstFailure> = None;
    let mut offset = 0usize;

    for (index, group) in groups.iter().enumerate() {
        if failure.is_some() && !options.policy.continue_on_error {
            all.extend(
                group
                    .tasks
                    .iter()
                    .map(|t| TaskResult::unstarted(&t.display_name)),
            );
        } else {
            tracing::debug!(
                group = index,
                parallel = group.parallel,
                tasks = group.tasks.len(),
                "running group"
            );
            // Each group owns a fresh abort flag, so a race win or failure
            // teardown in one group never bleeds into the next. Only the
            // run-wide external signal is forwarded in.
            let group_abort = Arc::new(AbortSignal::new());
            if options.abort.is_aborted() {
                group_abort.trigger();
            }
            let forward = {
                let external = options.abort.clone();
                let group_abort = group_abort.clone();
                tokio::spawn(async move {
                    external.cancelled().await;
                    group_abort.trigger();
                })
            };
            let ctx = GroupContext {
                runner: options.runner.clone(),
                env: env.clone(),
                abort: group_abort,
                policy: options.policy.clone(),
                output: settings.clone(),
                index_offset: offset,
            };
            let out = group::run_group(group, &ctx).await;
            forward.abort();
            all.extend(out.results);
            if let Some(f) = out.failed {
                if failure.is_none() {
                    failure = Some(f);
                }
            }
        }
        offset += group.tasks.len();
    }

    match failure {
        Some(f) => Err(RunError::TaskFailure {
            name: f.name,
            code: f.code,
            results: all,
        }),
        None => Ok(all),
    }
}

/// Parallel-only options require at least one parallel group.
fn validate(groups: &[Group], policy: &GroupPolicy) -> Result<(), RunError> {
    let any_parallel = groups.iter().any(|g| g.parallel);
    if !any_parallel {
        if policy.race {
            return Err(RunError::InvalidOptions("race"));
        }
        if policy.aggregate_output {
            return Err(RunError::InvalidOptions("aggregate_output"));
        }
        if policy.max_parallel.is_some() {
            return Err(RunError::InvalidOptions("max_parallel"));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
