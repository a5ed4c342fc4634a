// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

use crate::args::EntryMode;

fn argv(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn help_exits_zero() {
    assert_eq!(run_cli(EntryMode::RunAll, &argv(&["--help"])).await, 0);
    assert_eq!(run_cli(EntryMode::Sequential, &argv(&["-h"])).await, 0);
}

#[tokio::test]
async fn version_exits_zero() {
    assert_eq!(run_cli(EntryMode::Parallel, &argv(&["--version"])).await, 0);
}

#[tokio::test]
async fn no_patterns_shows_usage_and_exits_zero() {
    assert_eq!(run_cli(EntryMode::RunAll, &argv(&["-c"])).await, 0);
}

#[tokio::test]
async fn invalid_option_exits_one() {
    assert_eq!(
        run_cli(EntryMode::RunAll, &argv(&["--retry", "0", "a"])).await,
        1
    );
    assert_eq!(
        run_cli(EntryMode::Sequential, &argv(&["--race", "a"])).await,
        1
    );
}

#[tokio::test]
#[serial]
async fn missing_manifest_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let code = run_cli(EntryMode::RunAll, &argv(&["--silent", "build"])).await;
    std::env::set_current_dir(previous).unwrap();
    assert_eq!(code, 1);
}

#[tokio::test]
#[serial]
async fn unmatched_pattern_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("package.json"),
        r#"{"name": "t", "scripts": {"build": "true"}}"#,
    )
    .unwrap();
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let code = run_cli(EntryMode::RunAll, &argv(&["--silent", "nope:*"])).await;
    std::env::set_current_dir(previous).unwrap();
    assert_eq!(code, 1);
}
