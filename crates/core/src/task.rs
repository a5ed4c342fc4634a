// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task, group, and result types shared across the runner.

use serde::{Deserialize, Serialize};

/// Conventional exit code reported for attempts the engine aborted.
pub const KILLED_EXIT_CODE: i32 = 130;

/// One scheduled invocation of a manifest script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Name shown in labels and the summary; keeps inline arguments as typed.
    pub display_name: String,
    /// Manifest script the runner is asked to invoke.
    pub script_name: String,
    /// Tokens appended after the script name.
    pub extra_args: Vec<String>,
}

impl Task {
    pub fn new(
        display_name: impl Into<String>,
        script_name: impl Into<String>,
        extra_args: Vec<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            script_name: script_name.into(),
            extra_args,
        }
    }
}

/// A contiguous set of tasks executed under one sequential-or-parallel policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub parallel: bool,
    pub tasks: Vec<Task>,
}

impl Group {
    pub fn sequential(tasks: Vec<Task>) -> Self {
        Self {
            parallel: false,
            tasks,
        }
    }

    pub fn parallel(tasks: Vec<Task>) -> Self {
        Self {
            parallel: true,
            tasks,
        }
    }
}

/// Effective settings applied to every group of a run.
///
/// `race`, `aggregate_output`, and `max_parallel` only take effect inside
/// parallel groups; requesting them for a run without any parallel group is
/// rejected up front by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupPolicy {
    /// Concurrency cap for parallel groups; `None` means unlimited.
    pub max_parallel: Option<usize>,
    /// First task to exit 0 wins; its siblings are aborted.
    pub race: bool,
    /// Keep running remaining tasks after a failure.
    pub continue_on_error: bool,
    /// Buffer each task's output and flush it as one block when it completes.
    pub aggregate_output: bool,
    /// Prefix each output line with the right-padded task name.
    pub print_label: bool,
    /// Print a `> name` header line before each task.
    pub print_name: bool,
    /// Suppress the runner's own log writes (child output still flows).
    pub silent: bool,
    /// `retry_limit = N` allows up to `N + 1` attempts per task.
    pub retry_limit: usize,
}

impl Default for GroupPolicy {
    fn default() -> Self {
        Self {
            max_parallel: None,
            race: false,
            continue_on_error: false,
            aggregate_output: false,
            print_label: false,
            print_name: false,
            silent: false,
            retry_limit: 0,
        }
    }
}

/// Final accounting for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    pub name: String,
    /// Exit code of the last attempt; `None` when the task never started.
    pub code: Option<i32>,
    /// 0-based index of the attempt whose result is reported.
    pub retries: usize,
    /// Wall-clock time from the start of the first attempt to the end of the
    /// last one.
    pub duration_ms: u64,
}

impl TaskResult {
    /// Placeholder for a task that never started.
    pub fn unstarted(name: &str) -> Self {
        Self {
            name: name.to_string(),
            code: None,
            retries: 0,
            duration_ms: 0,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.code == Some(0)
    }

    pub fn killed(&self) -> bool {
        self.code == Some(KILLED_EXIT_CODE)
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
