//! Debounced scheduling for refetch orchestration.
//!
//! Rapid filter changes each call [`Debouncer::schedule`]; only the last
//! scheduled action within the delay window actually runs.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Coalesces rapid triggers into a single delayed action. One timer is
/// outstanding at a time: scheduling again restarts the window and cancels
/// the pending action, and dropping the debouncer cancels it too.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Run `action` after the delay window elapses without another call.
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let Ok(mut guard) = self.pending.lock() else {
            return;
        };
        if let Some(previous) = guard.take() {
            previous.abort();
        }
        *guard = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }

    /// Cancel any pending action without running it.
    pub fn cancel(&self) {
        if let Ok(mut guard) = self.pending.lock() {
            if let Some(pending) = guard.take() {
                pending.abort();
            }
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
