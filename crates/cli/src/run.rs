// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Binary entry glue: parse arguments, load the manifest, expand patterns,
//! drive the engine, and map the outcome to a process exit code.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use chorus_core::{expand_patterns, Group, GroupPolicy, Placeholders};
use chorus_engine::{
    env as engine_env, run, AbortSignal, RunOptions, RunnerCommand, TaskResult,
};
use chorus_manifest::Manifest;

use crate::args::{self, EntryMode, Parsed, ParsedArgs};
use crate::{color, help, summary};

/// Entry point shared by the three binaries; returns the process exit code.
pub async fn main_for(mode: EntryMode) -> i32 {
    init_tracing();
    let argv: Vec<String> = std::env::args().skip(1).collect();
    run_cli(mode, &argv).await
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run_cli(mode: EntryMode, argv: &[String]) -> i32 {
    let parsed = match args::parse(mode, argv) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return 1;
        }
    };
    match parsed {
        Parsed::Help => {
            print!("{}", help::help_text(mode));
            0
        }
        Parsed::Version => {
            println!("{}", help::version_text(mode));
            0
        }
        Parsed::Run(parsed) => {
            if parsed.groups.iter().all(|g| g.patterns.is_empty()) {
                // No patterns at all: show usage, succeed.
                print!("{}", help::help_text(mode));
                return 0;
            }
            run_patterns(parsed).await
        }
    }
}

struct Prepared {
    groups: Vec<Group>,
    options: RunOptions,
    signal_seen: Arc<AtomicBool>,
}

async fn run_patterns(parsed: ParsedArgs) -> i32 {
    let silent = parsed.silent || engine_env::silent_from_env();
    let print_summary = parsed.print_summary;

    let Prepared {
        groups,
        options,
        signal_seen,
    } = match prepare(parsed, silent) {
        Ok(prepared) => prepared,
        Err(e) => {
            if !silent {
                eprintln!("ERROR: {e}");
            }
            return 1;
        }
    };

    let outcome = run(&groups, &options).await;

    let results: Option<&[TaskResult]> = match &outcome {
        Ok(results) => Some(results),
        Err(e) => e.results(),
    };
    if print_summary {
        if let Some(results) = results {
            let mut stdout = std::io::stdout();
            summary::render(results, &mut stdout);
        }
    }

    match outcome {
        Ok(_) => {
            // Killed entries alone don't fail a run, but a run torn down by
            // an external signal is not a full success.
            if signal_seen.load(Ordering::SeqCst) {
                1
            } else {
                0
            }
        }
        Err(e) => {
            if !silent {
                eprintln!("ERROR: {e}");
            }
            1
        }
    }
}

/// Validate options, expand patterns, and assemble engine options. Errors
/// here short-circuit before any child is spawned.
fn prepare(parsed: ParsedArgs, silent: bool) -> Result<Prepared> {
    let cwd = std::env::current_dir()?;
    let manifest = Manifest::load(&cwd)?;
    let script_names = manifest.script_names();

    let groups = {
        let mut placeholders = Placeholders::new(&parsed.rest);
        let mut groups = Vec::new();
        for spec in &parsed.groups {
            if spec.patterns.is_empty() {
                continue;
            }
            let substituted = spec
                .patterns
                .iter()
                .map(|p| placeholders.apply(p))
                .collect::<Result<Vec<_>, _>>()?;
            let tasks = expand_patterns(&script_names, &substituted)?;
            groups.push(Group {
                parallel: spec.parallel,
                tasks,
            });
        }
        groups
    };

    let mut options = RunOptions::new(RunnerCommand::resolve(parsed.npm_path.as_deref()));
    options.policy = GroupPolicy {
        max_parallel: parsed.max_parallel,
        race: parsed.race,
        continue_on_error: parsed.continue_on_error,
        aggregate_output: parsed.aggregate_output,
        print_label: parsed.print_label,
        print_name: parsed.print_name,
        silent,
        retry_limit: parsed.retry_limit.unwrap_or(0),
    };
    options.package_name = manifest.name.clone();
    let mut package_config = manifest
        .name
        .as_deref()
        .map(engine_env::ambient_package_config)
        .unwrap_or_default();
    package_config.extend(parsed.package_config);
    options.config = parsed.config;
    options.package_config = package_config;
    options.label_decorator = color::label_decorator();

    let signal_seen = Arc::new(AtomicBool::new(false));
    install_signal_handler(options.abort.clone(), signal_seen.clone());

    Ok(Prepared {
        groups,
        options,
        signal_seen,
    })
}

/// Forward SIGINT/SIGTERM to the run's abort signal.
#[cfg(unix)]
fn install_signal_handler(abort: Arc<AbortSignal>, seen: Arc<AtomicBool>) {
    use tokio::signal::unix::{signal, SignalKind};
    tokio::spawn(async move {
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "SIGINT handler unavailable");
                return;
            }
        };
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                return;
            }
        };
        tokio::select! {
            _ = sigint.recv() => {}
            _ = sigterm.recv() => {}
        }
        tracing::debug!("termination signal received, aborting run");
        seen.store(true, Ordering::SeqCst);
        abort.trigger();
    });
}

#[cfg(not(unix))]
fn install_signal_handler(abort: Arc<AbortSignal>, seen: Arc<AtomicBool>) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            seen.store(true, Ordering::SeqCst);
            abort.trigger();
        }
    });
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
