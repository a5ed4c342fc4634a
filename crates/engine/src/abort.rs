// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-way abort flag shared between a group and its in-flight attempts.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// Cancellation signal.
///
/// Each group owns its own instance; the driver keeps one extra run-wide
/// instance for external cancellation and forwards it into every group's
/// flag. The transition to aborted is one-way and idempotent. Attempts
/// observe the flag between retries and `select!` on
/// [`AbortSignal::cancelled`] while a child is running; they never reference
/// the group that owns the signal.
#[derive(Debug, Default)]
pub struct AbortSignal {
    aborted: AtomicBool,
    notify: Notify,
}

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the flag and wake every waiting attempt. Repeated calls are
    /// no-ops.
    pub fn trigger(&self) {
        if !self.aborted.swap(true, Ordering::SeqCst) {
            tracing::debug!("abort triggered");
            self.notify.notify_waiters();
        }
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::SeqCst)
    }

    /// Resolve once the signal has been triggered.
    pub async fn cancelled(&self) {
        if self.is_aborted() {
            return;
        }
        // Register before re-checking so a trigger between the check and the
        // await cannot be missed.
        let notified = self.notify.notified();
        if self.is_aborted() {
            return;
        }
        notified.await;
    }
}

#[cfg(test)]
#[path = "abort_tests.rs"]
mod tests;
