// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Glob expansion of user patterns against the manifest script map.
//!
//! A pattern is either a literal script name, a glob (`*` and `?` match
//! within one `:`-delimited segment, `**` matches across segments), or an
//! exclusion when prefixed with `!`. Expansion preserves manifest order
//! inside each pattern's match set and user order across patterns.

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;

use crate::task::Task;

#[derive(Debug, Error)]
pub enum PatternError {
    /// Expansion produced zero tasks.
    #[error("Script not found: {0}")]
    NoMatch(String),
    #[error("invalid pattern: {0}")]
    BadGlob(#[from] regex::Error),
}

/// One positive pattern, split into its glob token and inline arguments.
struct Positive<'a> {
    /// The pattern string as typed (after placeholder substitution).
    literal: &'a str,
    /// First whitespace token, matched against script names.
    glob: String,
    /// Remaining tokens, appended to every match.
    args: Vec<String>,
    /// Compiled matcher; `None` for literals without glob meta.
    matcher: Option<Regex>,
}

/// Expand user patterns against the manifest's ordered script names.
///
/// Duplicates arising from two *different* positive patterns are dropped
/// (first occurrence wins); listing the same pattern literal twice schedules
/// the task twice. An empty expansion is an error.
pub fn expand_patterns(
    script_names: &[String],
    patterns: &[String],
) -> Result<Vec<Task>, PatternError> {
    let mut negatives = Vec::new();
    let mut positives = Vec::new();

    for pattern in patterns {
        if let Some(stripped) = pattern.strip_prefix('!') {
            let glob = first_token(stripped);
            negatives.push(glob_to_regex(&glob)?);
        } else {
            let mut tokens = shell_split(pattern);
            if tokens.is_empty() {
                continue;
            }
            let glob = tokens.remove(0);
            let matcher = if has_glob_meta(&glob) {
                Some(glob_to_regex(&glob)?)
            } else {
                None
            };
            positives.push(Positive {
                literal: pattern.as_str(),
                glob,
                args: tokens,
                matcher,
            });
        }
    }

    // display name -> the pattern literal that first produced it
    let mut seen: HashMap<String, &str> = HashMap::new();
    let mut out = Vec::new();

    for positive in &positives {
        let excluded = |name: &str| negatives.iter().any(|neg| neg.is_match(name));

        let matches: Vec<(String, String)> = match &positive.matcher {
            Some(matcher) => script_names
                .iter()
                .filter(|name| matcher.is_match(name) && !excluded(name))
                .map(|name| (display_name(name, &positive.args), name.clone()))
                .collect(),
            None => {
                if script_names.iter().any(|name| *name == positive.glob)
                    && !excluded(&positive.glob)
                {
                    vec![(
                        positive.literal.trim().to_string(),
                        positive.glob.clone(),
                    )]
                } else {
                    Vec::new()
                }
            }
        };

        for (display, script) in matches {
            if let Some(origin) = seen.get(display.as_str()) {
                if *origin != positive.literal {
                    continue;
                }
            } else {
                seen.insert(display.clone(), positive.literal);
            }
            out.push(Task::new(display, script, positive.args.clone()));
        }
    }

    if out.is_empty() {
        let listed = patterns
            .iter()
            .map(|p| format!("\"{p}\""))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(PatternError::NoMatch(listed));
    }
    Ok(out)
}

fn display_name(script: &str, args: &[String]) -> String {
    if args.is_empty() {
        script.to_string()
    } else {
        format!("{script} {}", args.join(" "))
    }
}

fn first_token(s: &str) -> String {
    shell_split(s).into_iter().next().unwrap_or_default()
}

fn has_glob_meta(s: &str) -> bool {
    s.contains('*') || s.contains('?')
}

/// Compile a script glob into an anchored regex. `*` and `?` stop at segment
/// boundaries (`:`); `**` crosses them.
fn glob_to_regex(glob: &str) -> Result<Regex, regex::Error> {
    let mut re = String::from("^");
    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    re.push_str(".*");
                } else {
                    re.push_str("[^:]*");
                }
            }
            '?' => re.push_str("[^:]"),
            _ => re.push_str(&regex::escape(&c.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re)
}

/// Split a pattern into whitespace tokens, honoring quotes so placeholder
/// expansion can hand through arguments that contain spaces.
pub fn shell_split(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut in_single = false;
    let mut in_double = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' if !in_double => {
                in_single = !in_single;
                in_token = true;
            }
            '"' if !in_single => {
                in_double = !in_double;
                in_token = true;
            }
            '\\' if !in_single => {
                if let Some(next) = chars.next() {
                    current.push(next);
                    in_token = true;
                }
            }
            c if c.is_whitespace() && !in_single && !in_double => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                current.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
