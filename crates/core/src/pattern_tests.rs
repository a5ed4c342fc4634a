// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

use crate::task::Task;

fn scripts(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn patterns(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn names(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.display_name.as_str()).collect()
}

#[test]
fn literal_matches_exactly_one_script() {
    let tasks = expand_patterns(&scripts(&["build", "test"]), &patterns(&["build"])).unwrap();
    assert_eq!(names(&tasks), vec!["build"]);
    assert_eq!(tasks[0].script_name, "build");
    assert!(tasks[0].extra_args.is_empty());
}

#[test]
fn star_matches_within_one_segment() {
    let tasks = expand_patterns(
        &scripts(&["watch:js", "watch:css", "watch:js:min", "build"]),
        &patterns(&["watch:*"]),
    )
    .unwrap();
    assert_eq!(names(&tasks), vec!["watch:js", "watch:css"]);
}

#[test]
fn double_star_matches_across_segments() {
    let tasks = expand_patterns(
        &scripts(&["watch:js", "watch:js:min", "build"]),
        &patterns(&["watch:**"]),
    )
    .unwrap();
    assert_eq!(names(&tasks), vec!["watch:js", "watch:js:min"]);
}

#[test]
fn question_mark_matches_one_char_within_segment() {
    let tasks = expand_patterns(
        &scripts(&["t1", "t2", "t10", "t:a"]),
        &patterns(&["t?"]),
    )
    .unwrap();
    assert_eq!(names(&tasks), vec!["t1", "t2"]);
}

#[test]
fn manifest_order_preserved_within_a_pattern() {
    let tasks = expand_patterns(
        &scripts(&["z:one", "a:one", "m:one"]),
        &patterns(&["*:one"]),
    )
    .unwrap();
    assert_eq!(names(&tasks), vec!["z:one", "a:one", "m:one"]);
}

#[test]
fn user_order_preserved_across_patterns() {
    let tasks = expand_patterns(
        &scripts(&["a", "b", "c"]),
        &patterns(&["c", "a"]),
    )
    .unwrap();
    assert_eq!(names(&tasks), vec!["c", "a"]);
}

#[test]
fn negation_excludes_matches() {
    let tasks = expand_patterns(
        &scripts(&["watch:js", "watch:css", "watch:html"]),
        &patterns(&["watch:*", "!watch:css"]),
    )
    .unwrap();
    assert_eq!(names(&tasks), vec!["watch:js", "watch:html"]);
}

#[test]
fn cross_pattern_duplicate_kept_once() {
    let tasks = expand_patterns(
        &scripts(&["y:x", "z:x"]),
        &patterns(&["*:x", "y:x"]),
    )
    .unwrap();
    assert_eq!(names(&tasks), vec!["y:x", "z:x"]);
}

#[test]
fn same_literal_twice_runs_twice() {
    let tasks = expand_patterns(&scripts(&["a", "b"]), &patterns(&["a", "a"])).unwrap();
    assert_eq!(names(&tasks), vec!["a", "a"]);
}

#[test]
fn empty_expansion_errors_with_not_found() {
    let err = expand_patterns(&scripts(&["a"]), &patterns(&["nope:*"])).unwrap_err();
    assert!(err.to_string().contains("not found"), "got: {err}");
    assert!(err.to_string().contains("nope:*"), "got: {err}");
}

#[test]
fn unmatched_literal_alone_is_not_fatal_when_others_match() {
    let tasks = expand_patterns(&scripts(&["a"]), &patterns(&["missing", "a"])).unwrap();
    assert_eq!(names(&tasks), vec!["a"]);
}

#[test]
fn negative_only_pattern_list_errors() {
    let err = expand_patterns(&scripts(&["a"]), &patterns(&["!a"])).unwrap_err();
    assert!(err.to_string().contains("not found"), "got: {err}");
}

#[test]
fn inline_args_preserved_in_display_name() {
    let tasks = expand_patterns(
        &scripts(&["append"]),
        &patterns(&["append a"]),
    )
    .unwrap();
    assert_eq!(tasks[0].display_name, "append a");
    assert_eq!(tasks[0].script_name, "append");
    assert_eq!(tasks[0].extra_args, vec!["a"]);
}

#[test]
fn glob_match_display_name_uses_matched_script_plus_args() {
    let tasks = expand_patterns(
        &scripts(&["lint:js", "lint:css"]),
        &patterns(&["lint:* --fix"]),
    )
    .unwrap();
    assert_eq!(names(&tasks), vec!["lint:js --fix", "lint:css --fix"]);
    assert_eq!(tasks[0].extra_args, vec!["--fix"]);
}

#[test]
fn shell_split_honors_quotes() {
    assert_eq!(
        shell_split("run 'a b' \"c d\" e"),
        vec!["run", "a b", "c d", "e"]
    );
    assert_eq!(shell_split("a\\ b c"), vec!["a b", "c"]);
    assert_eq!(shell_split("  spaced   out  "), vec!["spaced", "out"]);
    assert_eq!(shell_split("''"), vec![""]);
}
