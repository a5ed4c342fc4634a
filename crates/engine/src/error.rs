// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the execution engine.

use chorus_core::TaskResult;
use thiserror::Error;

/// Errors surfaced by [`run`](crate::run).
#[derive(Debug, Error)]
pub enum RunError {
    /// A parallel-only option was requested for a run with no parallel group.
    #[error("Invalid options.{0}")]
    InvalidOptions(&'static str),
    /// One or more tasks failed; carries the full result snapshot in input
    /// order so callers can report partial progress.
    #[error("\"{name}\" exited with {code}")]
    TaskFailure {
        /// Display name of the first failing task.
        name: String,
        /// Final exit code of that task.
        code: i32,
        /// Every scheduled task's result, in input order.
        results: Vec<TaskResult>,
    },
}

impl RunError {
    /// The result snapshot attached to a task failure, if any.
    pub fn results(&self) -> Option<&[TaskResult]> {
        match self {
            RunError::TaskFailure { results, .. } => Some(results),
            RunError::InvalidOptions(_) => None,
        }
    }
}
