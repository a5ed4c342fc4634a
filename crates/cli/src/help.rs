// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hand-printed help and version text for the three binaries.

use crate::args::EntryMode;

pub fn binary_name(mode: EntryMode) -> &'static str {
    match mode {
        EntryMode::RunAll => "chorus",
        EntryMode::Parallel => "chorus-p",
        EntryMode::Sequential => "chorus-s",
    }
}

pub fn version_text(mode: EntryMode) -> String {
    format!("{} {}", binary_name(mode), env!("CARGO_PKG_VERSION"))
}

pub fn help_text(mode: EntryMode) -> String {
    let name = binary_name(mode);
    let mut out = String::new();

    match mode {
        EntryMode::RunAll => {
            out.push_str("chorus - run package.json scripts sequentially or in parallel\n\n");
            out.push_str(
                "Usage: chorus [options] <pattern>... [-s <pattern>...] [-p <pattern>...] [-- <args>...]\n",
            );
        }
        EntryMode::Parallel => {
            out.push_str("chorus-p - run package.json scripts in parallel\n\n");
            out.push_str("Usage: chorus-p [options] <pattern>... [-- <args>...]\n");
        }
        EntryMode::Sequential => {
            out.push_str("chorus-s - run package.json scripts sequentially\n\n");
            out.push_str("Usage: chorus-s [options] <pattern>... [-- <args>...]\n");
        }
    }

    out.push_str(
        "\nPatterns:\n\
         \x20 Script names from the package.json scripts map. `*` matches within\n\
         \x20 a colon-delimited segment, `**` across segments, and a leading `!`\n\
         \x20 excludes. A pattern may carry inline arguments (\"lint --fix\") and\n\
         \x20 placeholders {1}..{N}, {@}, {*}, {n:-default}, {n:=default} that take\n\
         \x20 values from the arguments after --.\n",
    );

    if matches!(mode, EntryMode::RunAll) {
        out.push_str(
            "\nGroups:\n\
             \x20 -s, --sequential, --serial  Start a new sequential group\n\
             \x20 -p, --parallel              Start a new parallel group\n",
        );
    }

    out.push_str(
        "\nOptions:\n\
         \x20 -c, --continue-on-error     Keep running tasks after a failure\n\
         \x20 -l, --print-label           Prefix each output line with the task name\n\
         \x20 -n, --print-name            Print a header line before each task\n",
    );
    if !matches!(mode, EntryMode::Sequential) {
        out.push_str(
            "\x20 -r, --race                  First task to succeed wins; others are killed\n\
             \x20     --max-parallel <n>      Cap concurrent tasks in parallel groups\n\
             \x20     --aggregate-output      Buffer each task's output; flush on completion\n",
        );
    }
    out.push_str(
        "\x20     --silent                Suppress the runner's own log writes\n\
         \x20     --retry <n>             Retry failing tasks up to <n> times\n\
         \x20     --print-summary         Print a result table when the run ends\n\
         \x20     --npm-path <path>       Script runner to invoke (default: npm)\n\
         \x20     --<key>=<value>         Set a run-time config variable\n\
         \x20     --<pkg>:<var>=<value>   Overwrite a package config variable\n\
         \x20 -h, --help                  Print help\n\
         \x20 -v, --version               Print version\n",
    );

    out.push_str(&format!(
        "\nExit status is 0 when every task succeeds and 1 otherwise.\n\
         See `{name} --version` for the release in use.\n"
    ));
    out
}

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
