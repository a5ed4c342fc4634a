// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
fn header_and_muted_wrap_with_reset() {
    assert_eq!(apply_header("X"), "\x1b[38;5;74mX\x1b[0m");
    assert_eq!(apply_muted("X"), "\x1b[38;5;240mX\x1b[0m");
    assert_eq!(apply_failed("X"), "\x1b[31mX\x1b[0m");
}

#[test]
#[serial]
fn no_color_disables_colorization() {
    std::env::set_var("NO_COLOR", "1");
    assert!(!should_colorize());
    assert!(label_decorator().is_none());
    std::env::remove_var("NO_COLOR");
}

#[test]
#[serial]
fn force_color_wins_over_non_tty() {
    std::env::remove_var("NO_COLOR");
    std::env::set_var("FORCE_COLOR", "1");
    assert!(should_colorize());
    let decorate = label_decorator().expect("decorator under FORCE_COLOR");
    let first = decorate(0, "[a]");
    assert!(first.starts_with("\x1b[38;5;"), "got: {first:?}");
    assert!(first.ends_with("\x1b[0m"), "got: {first:?}");
    std::env::remove_var("FORCE_COLOR");
}

#[test]
#[serial]
fn label_palette_cycles_per_task_index() {
    std::env::set_var("FORCE_COLOR", "1");
    let decorate = label_decorator().unwrap();
    let n = codes::LABELS.len();
    assert_ne!(decorate(0, "[a]"), decorate(1, "[a]"));
    assert_eq!(decorate(0, "[a]"), decorate(n, "[a]"));
    std::env::remove_var("FORCE_COLOR");
}
