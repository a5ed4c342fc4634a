// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument placeholder rewriting for pattern strings.
//!
//! Patterns may reference the arguments given after `--` on the command
//! line: `{1}`..`{N}` positionally, `{@}` for all of them individually
//! quoted, `{*}` for all of them as one quoted string, `{n:-default}` for a
//! fallback, and `{n:=default}` for a fallback that is remembered for later
//! bare `{n}` references. Substitution is a pure string rewrite; the result
//! feeds the pattern matcher.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("Invalid Placeholder: {{{token}}}")]
pub struct PlaceholderError {
    token: String,
}

impl PlaceholderError {
    fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Placeholder substitution state for one run.
///
/// Defaults remembered via `{n:=default}` persist across patterns, so the
/// same instance is applied to every pattern of an invocation in order.
pub struct Placeholders<'a> {
    args: &'a [String],
    defaults: HashMap<usize, String>,
}

impl<'a> Placeholders<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self {
            args,
            defaults: HashMap::new(),
        }
    }

    /// Rewrite every `{...}` occurrence in `pattern`.
    pub fn apply(&mut self, pattern: &str) -> Result<String, PlaceholderError> {
        if !pattern.contains('{') {
            return Ok(pattern.to_string());
        }
        let mut out = String::with_capacity(pattern.len());
        let mut rest = pattern;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| PlaceholderError::new(after))?;
            out.push_str(&self.expand(&after[..close])?);
            rest = &after[close + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }

    fn expand(&mut self, token: &str) -> Result<String, PlaceholderError> {
        match token {
            "@" => Ok(self
                .args
                .iter()
                .map(|a| sh_quote(a))
                .collect::<Vec<_>>()
                .join(" ")),
            "*" => Ok(sh_quote(&self.args.join(" "))),
            _ => self.expand_positional(token),
        }
    }

    fn expand_positional(&mut self, token: &str) -> Result<String, PlaceholderError> {
        let (number, default) = match token.find(':') {
            Some(colon) => {
                let tail = &token[colon + 1..];
                match tail.chars().next() {
                    Some('-') => (&token[..colon], Some((false, &tail[1..]))),
                    Some('=') => (&token[..colon], Some((true, &tail[1..]))),
                    _ => return Err(PlaceholderError::new(token)),
                }
            }
            None => (token, None),
        };

        let n: usize = number
            .parse()
            .map_err(|_| PlaceholderError::new(token))?;
        if n == 0 {
            return Err(PlaceholderError::new(token));
        }

        if let Some(value) = self.args.get(n - 1) {
            return Ok(value.clone());
        }
        match default {
            Some((remember, fallback)) => {
                if remember {
                    self.defaults.insert(n, fallback.to_string());
                }
                Ok(fallback.to_string())
            }
            None => Ok(self.defaults.get(&n).cloned().unwrap_or_default()),
        }
    }
}

/// Quote a value with POSIX single quotes when it needs quoting.
fn sh_quote(s: &str) -> String {
    if s.is_empty() {
        return "''".to_string();
    }
    let safe = s.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(c, '_' | '-' | '.' | '/' | ':' | '@' | '%' | '+' | ',' | '=')
    });
    if safe {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', "'\\''"))
    }
}

#[cfg(test)]
#[path = "placeholder_tests.rs"]
mod tests;
