// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn no_placeholders_is_identity() {
    let rest = args(&["x"]);
    let mut ph = Placeholders::new(&rest);
    assert_eq!(ph.apply("build:js").unwrap(), "build:js");
}

#[test]
fn positional_substitution() {
    let rest = args(&["one", "two"]);
    let mut ph = Placeholders::new(&rest);
    assert_eq!(ph.apply("task {1} {2}").unwrap(), "task one two");
}

#[test]
fn missing_positional_is_empty() {
    let rest = args(&[]);
    let mut ph = Placeholders::new(&rest);
    assert_eq!(ph.apply("task {1}").unwrap(), "task ");
}

#[test]
fn all_args_individually_quoted() {
    let rest = args(&["a", "b c"]);
    let mut ph = Placeholders::new(&rest);
    assert_eq!(ph.apply("task {@}").unwrap(), "task a 'b c'");
}

#[test]
fn all_args_as_one_quoted_string() {
    let rest = args(&["a", "b"]);
    let mut ph = Placeholders::new(&rest);
    assert_eq!(ph.apply("task {*}").unwrap(), "task 'a b'");
}

#[test]
fn default_when_missing() {
    let rest = args(&["given"]);
    let mut ph = Placeholders::new(&rest);
    assert_eq!(ph.apply("t {1:-d1} {2:-d2}").unwrap(), "t given d2");
}

#[test]
fn assigned_default_is_remembered() {
    let rest = args(&[]);
    let mut ph = Placeholders::new(&rest);
    assert_eq!(ph.apply("t {2:=later}").unwrap(), "t later");
    assert_eq!(ph.apply("t {2}").unwrap(), "t later");
}

#[test]
fn plain_default_is_not_remembered() {
    let rest = args(&[]);
    let mut ph = Placeholders::new(&rest);
    assert_eq!(ph.apply("t {2:-once}").unwrap(), "t once");
    assert_eq!(ph.apply("t {2}").unwrap(), "t ");
}

#[test]
fn argument_beats_default() {
    let rest = args(&["real"]);
    let mut ph = Placeholders::new(&rest);
    assert_eq!(ph.apply("t {1:=ignored}").unwrap(), "t real");
}

#[test]
fn unknown_placeholder_errors() {
    let rest = args(&["a"]);
    let mut ph = Placeholders::new(&rest);
    let err = ph.apply("t {nope}").unwrap_err();
    assert!(err.to_string().contains("Invalid Placeholder"), "got: {err}");
}

#[test]
fn zero_index_errors() {
    let rest = args(&["a"]);
    let mut ph = Placeholders::new(&rest);
    assert!(ph.apply("t {0}").is_err());
}

#[test]
fn unclosed_brace_errors() {
    let rest = args(&["a"]);
    let mut ph = Placeholders::new(&rest);
    let err = ph.apply("t {1").unwrap_err();
    assert!(err.to_string().contains("Invalid Placeholder"), "got: {err}");
}

#[test]
fn quoting_escapes_embedded_single_quotes() {
    let rest = args(&["it's"]);
    let mut ph = Placeholders::new(&rest);
    assert_eq!(ph.apply("t {@}").unwrap(), "t 'it'\\''s'");
}
