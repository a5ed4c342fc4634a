// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn starts_clear_and_trigger_is_sticky() {
    let signal = AbortSignal::new();
    assert!(!signal.is_aborted());
    signal.trigger();
    assert!(signal.is_aborted());
    // Repeated aborts are no-ops.
    signal.trigger();
    assert!(signal.is_aborted());
}

#[tokio::test]
async fn cancelled_resolves_immediately_when_already_triggered() {
    let signal = AbortSignal::new();
    signal.trigger();
    tokio::time::timeout(Duration::from_secs(1), signal.cancelled())
        .await
        .expect("cancelled should resolve at once");
}

#[tokio::test]
async fn cancelled_wakes_waiters_on_trigger() {
    let signal = Arc::new(AbortSignal::new());
    let waiter = {
        let signal = signal.clone();
        tokio::spawn(async move { signal.cancelled().await })
    };
    tokio::task::yield_now().await;
    signal.trigger();
    tokio::time::timeout(Duration::from_secs(2), waiter)
        .await
        .expect("waiter should wake")
        .unwrap();
}

#[tokio::test]
async fn trigger_before_registration_is_not_lost() {
    let signal = Arc::new(AbortSignal::new());
    signal.trigger();
    let signal2 = signal.clone();
    let waiter = tokio::spawn(async move { signal2.cancelled().await });
    tokio::time::timeout(Duration::from_secs(2), waiter)
        .await
        .expect("waiter should wake")
        .unwrap();
}
