// SPDX-FileCopyrightText: 2026 Sunlead Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cancellable typing-indicator timer.
//!
//! A bot reply becomes visible only after a short simulated typing delay.
//! The delay is presentation-only: it is scheduled as a background task
//! that can be cancelled if the view goes away first, so a pending reply
//! is never delivered into a torn-down session.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Schedules one delayed delivery. Dropping the timer cancels it.
pub struct TypingTimer {
    handle: Option<JoinHandle<()>>,
}

impl TypingTimer {
    /// Runs `deliver` after `delay` unless the timer is cancelled or
    /// dropped first.
    pub fn schedule<F>(delay: Duration, deliver: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            deliver();
        });
        Self {
            handle: Some(handle),
        }
    }

    /// Cancels the pending delivery if it has not fired yet.
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Waits until the delivery has run. Returns `false` if the task was
    /// cancelled before it could fire.
    pub async fn finished(mut self) -> bool {
        match self.handle.take() {
            Some(handle) => handle.await.is_ok(),
            None => false,
        }
    }
}

impl Drop for TypingTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
