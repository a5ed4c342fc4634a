// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::IsTerminal;
use std::sync::Arc;

use chorus_engine::LabelDecorator;

pub mod codes {
    /// Table headers: pastel cyan / steel blue
    pub const HEADER: u8 = 74;
    /// Muted / secondary text (killed and never-started rows): darker grey
    pub const MUTED: u8 = 240;

    /// Per-task label palette, cycled by run-wide task index.
    pub const LABELS: [u8; 6] = [74, 114, 176, 178, 140, 110];
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `FORCE_COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if no_color() {
        return false;
    }
    if force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn no_color() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

fn force_color() -> bool {
    matches!(
        std::env::var("FORCE_COLOR").as_deref(),
        Ok("1") | Ok("true")
    )
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

const RESET: &str = "\x1b[0m";

/// Per-task label coloring for the prefix transform; `None` when color is
/// disabled.
pub fn label_decorator() -> Option<LabelDecorator> {
    if !should_colorize() {
        return None;
    }
    Some(Arc::new(|index, label: &str| {
        let code = codes::LABELS[index % codes::LABELS.len()];
        format!("{}{label}{RESET}", fg256(code))
    }))
}

/// Apply header color unconditionally (caller decides whether to use this).
pub(crate) fn apply_header(text: &str) -> String {
    format!("{}{}{}", fg256(codes::HEADER), text, RESET)
}

/// Apply muted color unconditionally (caller decides whether to use this).
pub(crate) fn apply_muted(text: &str) -> String {
    format!("{}{}{}", fg256(codes::MUTED), text, RESET)
}

/// Apply red (ANSI 31) unconditionally (caller decides whether to use this).
pub(crate) fn apply_failed(text: &str) -> String {
    format!("\x1b[31m{text}{RESET}")
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
