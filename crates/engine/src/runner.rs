// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution of the underlying script runner.
//!
//! The runner is npm-shaped: it is invoked as `<runner> run <script>
//! [-- extra args...]`. The path comes from the `--npm-path` flag, the
//! `npm_execpath` environment variable, or plain `npm`, in that order; a
//! JavaScript path is invoked through `node`.

use std::path::{Path, PathBuf};

/// The program and leading arguments used to invoke the script runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerCommand {
    program: PathBuf,
    leading_args: Vec<String>,
}

impl RunnerCommand {
    /// Resolve the runner, preferring an explicit override over the
    /// `npm_execpath` environment variable over plain `npm`.
    pub fn resolve(npm_path: Option<&str>) -> Self {
        let path = npm_path
            .map(str::to_string)
            .or_else(|| std::env::var("npm_execpath").ok())
            .unwrap_or_else(|| "npm".to_string());
        Self::from_path(path)
    }

    /// Build a runner from a concrete path. Paths ending in `.js`, `.mjs`,
    /// or `.cjs` are run through `node`; anything else is executed directly.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_script = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| matches!(e, "js" | "mjs" | "cjs"))
            .unwrap_or(false);
        if is_script {
            Self {
                program: PathBuf::from("node"),
                leading_args: vec![path.display().to_string()],
            }
        } else {
            Self {
                program: path,
                leading_args: Vec::new(),
            }
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Argument vector for one script invocation.
    pub fn args_for(&self, script: &str, extra_args: &[String]) -> Vec<String> {
        let mut args = self.leading_args.clone();
        args.push("run".to_string());
        args.push(script.to_string());
        if !extra_args.is_empty() {
            args.push("--".to_string());
            args.extend(extra_args.iter().cloned());
        }
        args
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
