// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument lexer for the three runner binaries.
//!
//! The grammar is order-sensitive: positional patterns accumulate into the
//! current group, and `-s`/`-p` markers begin a new group (general runner
//! only). Long flags with arbitrary keys (`--KEY=VALUE`, `--PKG:VAR=VALUE`)
//! coexist with the fixed option set, and clustered shorts like `-cp` expand
//! to `-c -p`, so the lexer is hand-rolled rather than declarative.

use chorus_engine::PackageConfig;
use thiserror::Error;

/// Which binary is parsing; decides the initial group policy and which
/// section markers are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// `chorus`: initial group sequential, `-s`/`-p` begin new groups.
    RunAll,
    /// `chorus-p`: one parallel group, no section markers.
    Parallel,
    /// `chorus-s`: one sequential group, no section markers.
    Sequential,
}

#[derive(Debug, Error)]
pub enum ArgsError {
    #[error("Invalid Option: {0}")]
    InvalidOption(String),
}

/// One `-s`/`-p` section of patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    pub parallel: bool,
    pub patterns: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ParsedArgs {
    pub groups: Vec<GroupSpec>,
    pub continue_on_error: bool,
    pub print_label: bool,
    pub print_name: bool,
    pub race: bool,
    pub max_parallel: Option<usize>,
    pub aggregate_output: bool,
    pub silent: bool,
    /// `None` is the zero-retry default; explicit `--retry 0` is rejected.
    pub retry_limit: Option<usize>,
    pub print_summary: bool,
    pub npm_path: Option<String>,
    /// `--KEY=VALUE` run-time config.
    pub config: Vec<(String, String)>,
    /// `--PKG:VAR=VALUE` package-scoped overwrites.
    pub package_config: Vec<PackageConfig>,
    /// Everything after `--`, consumed by pattern placeholders.
    pub rest: Vec<String>,
}

#[derive(Debug)]
pub enum Parsed {
    Help,
    Version,
    Run(ParsedArgs),
}

enum FlagOutcome {
    Continue,
    Help,
    Version,
}

pub fn parse(mode: EntryMode, args: &[String]) -> Result<Parsed, ArgsError> {
    let mut parsed = ParsedArgs {
        groups: vec![GroupSpec {
            parallel: matches!(mode, EntryMode::Parallel),
            patterns: Vec::new(),
        }],
        ..ParsedArgs::default()
    };

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--" => {
                parsed.rest = args[i + 1..].to_vec();
                break;
            }
            "--max-parallel" => {
                if matches!(mode, EntryMode::Sequential) {
                    return Err(ArgsError::InvalidOption(arg.to_string()));
                }
                i += 1;
                let cap = args
                    .get(i)
                    .and_then(|v| v.parse::<usize>().ok())
                    .filter(|&n| n >= 1)
                    .ok_or_else(|| ArgsError::InvalidOption("--max-parallel".to_string()))?;
                parsed.max_parallel = Some(cap);
            }
            "--retry" => {
                i += 1;
                let limit = args
                    .get(i)
                    .and_then(|v| v.parse::<usize>().ok())
                    .filter(|&n| n >= 1)
                    .ok_or_else(|| ArgsError::InvalidOption("--retry".to_string()))?;
                parsed.retry_limit = Some(limit);
            }
            "--npm-path" => {
                i += 1;
                let path = args
                    .get(i)
                    .ok_or_else(|| ArgsError::InvalidOption("--npm-path".to_string()))?;
                parsed.npm_path = Some(path.clone());
            }
            _ if is_long_flag(arg) => match apply_flag(mode, arg, &mut parsed)? {
                FlagOutcome::Help => return Ok(Parsed::Help),
                FlagOutcome::Version => return Ok(Parsed::Version),
                FlagOutcome::Continue => {}
            },
            _ if arg.starts_with("--") => {
                i += parse_dynamic_flag(arg, args.get(i + 1), &mut parsed)?;
            }
            _ if arg.starts_with('-') && arg.len() > 1 => {
                // Clustered shorts: -cp expands to -c -p.
                for c in arg[1..].chars() {
                    match apply_flag(mode, &format!("-{c}"), &mut parsed)? {
                        FlagOutcome::Help => return Ok(Parsed::Help),
                        FlagOutcome::Version => return Ok(Parsed::Version),
                        FlagOutcome::Continue => {}
                    }
                }
            }
            _ => {
                // A positional pattern for the current group. The lexer
                // starts with one group and never removes any.
                if let Some(current) = parsed.groups.last_mut() {
                    current.patterns.push(arg.to_string());
                }
            }
        }
        i += 1;
    }

    Ok(Parsed::Run(parsed))
}

/// Long flags from the fixed option set (no value, no dynamic key).
fn is_long_flag(arg: &str) -> bool {
    matches!(
        arg,
        "--help"
            | "--version"
            | "--continue-on-error"
            | "--print-label"
            | "--print-name"
            | "--race"
            | "--sequential"
            | "--serial"
            | "--parallel"
            | "--aggregate-output"
            | "--silent"
            | "--print-summary"
            | "--summary"
    )
}

fn apply_flag(
    mode: EntryMode,
    flag: &str,
    parsed: &mut ParsedArgs,
) -> Result<FlagOutcome, ArgsError> {
    match flag {
        "-h" | "--help" => return Ok(FlagOutcome::Help),
        "-v" | "--version" => return Ok(FlagOutcome::Version),
        "-c" | "--continue-on-error" => parsed.continue_on_error = true,
        "-l" | "--print-label" => parsed.print_label = true,
        "-n" | "--print-name" => parsed.print_name = true,
        "-r" | "--race" => {
            if matches!(mode, EntryMode::Sequential) {
                return Err(ArgsError::InvalidOption(flag.to_string()));
            }
            parsed.race = true;
        }
        "-s" | "--sequential" | "--serial" => {
            if !matches!(mode, EntryMode::RunAll) {
                return Err(ArgsError::InvalidOption(flag.to_string()));
            }
            parsed.groups.push(GroupSpec {
                parallel: false,
                patterns: Vec::new(),
            });
        }
        "-p" | "--parallel" => {
            if !matches!(mode, EntryMode::RunAll) {
                return Err(ArgsError::InvalidOption(flag.to_string()));
            }
            parsed.groups.push(GroupSpec {
                parallel: true,
                patterns: Vec::new(),
            });
        }
        "--aggregate-output" => {
            if matches!(mode, EntryMode::Sequential) {
                return Err(ArgsError::InvalidOption(flag.to_string()));
            }
            parsed.aggregate_output = true;
        }
        "--silent" => parsed.silent = true,
        "--print-summary" | "--summary" => parsed.print_summary = true,
        other => return Err(ArgsError::InvalidOption(other.to_string())),
    }
    Ok(FlagOutcome::Continue)
}

/// `--KEY=VALUE` and `--PKG:VAR[=]VALUE` flags with caller-chosen keys.
///
/// Returns how many extra arguments were consumed (1 when the package value
/// came as a separate token).
fn parse_dynamic_flag(
    arg: &str,
    next: Option<&String>,
    parsed: &mut ParsedArgs,
) -> Result<usize, ArgsError> {
    let body = &arg[2..];
    let colon = body.find(':');
    let eq = body.find('=');

    match (colon, eq) {
        // --PKG:VAR=VALUE / --PKG:VAR VALUE (colon precedes any '=')
        (Some(colon), eq) if eq.map_or(true, |eq| colon < eq) => {
            let package = &body[..colon];
            let tail = &body[colon + 1..];
            let (variable, value, consumed) = match tail.find('=') {
                Some(eq) => (&tail[..eq], tail[eq + 1..].to_string(), 0),
                None => {
                    let value = next
                        .ok_or_else(|| ArgsError::InvalidOption(arg.to_string()))?
                        .clone();
                    (tail, value, 1)
                }
            };
            if package.is_empty() || variable.is_empty() {
                return Err(ArgsError::InvalidOption(arg.to_string()));
            }
            parsed.package_config.push(PackageConfig {
                package: package.to_string(),
                variable: variable.to_string(),
                value,
            });
            Ok(consumed)
        }
        // --KEY=VALUE
        (_, Some(eq)) => {
            let key = &body[..eq];
            if key.is_empty() {
                return Err(ArgsError::InvalidOption(arg.to_string()));
            }
            parsed
                .config
                .push((key.to_string(), body[eq + 1..].to_string()));
            Ok(0)
        }
        _ => Err(ArgsError::InvalidOption(arg.to_string())),
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
