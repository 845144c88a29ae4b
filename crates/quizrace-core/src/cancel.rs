//! One-way cancellation signal handed to the runner's input read.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::Notify;

/// A cloneable token that can be fired once and awaited by any clone.
///
/// Work run through [`CancelToken::unless_cancelled`] is serialized with
/// [`CancelToken::cancel`]: once `cancel` returns, no such section is running
/// and none will start.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: Mutex<bool>,
    notify: Notify,
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, bool> {
        self.cancelled
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire the token. Idempotent.
    ///
    /// Waits for an in-flight [`unless_cancelled`](Self::unless_cancelled)
    /// section to finish.
    pub fn cancel(&self) {
        *self.inner.state() = true;
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.state()
    }

    /// Run `f` only if the token has not fired, holding off `cancel` until
    /// it returns. Returns `None` without running `f` once cancelled.
    pub fn unless_cancelled<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let state = self.inner.state();
        if *state {
            return None;
        }
        let result = f();
        drop(state);
        Some(result)
    }

    /// Resolves once the token has been fired.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking the flag so a concurrent `cancel`
            // cannot slip between the check and the wait.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}
