use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// A single delayed callback slot with restart-on-retrigger semantics:
/// scheduling again aborts whatever was pending.
#[derive(Default)]
pub struct DelayedTask {
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DelayedTask {
    pub fn new() -> Self {
        Self::default()
    }

    fn pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancel any pending callback and run `f` after `delay`.
    ///
    /// Returns `false` when no tokio runtime is available; nothing is
    /// scheduled in that case.
    pub fn restart<F>(&self, delay: Duration, f: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let mut pending = self.pending();
        if let Some(prev) = pending.take() {
            prev.abort();
        }
        let Ok(runtime) = Handle::try_current() else {
            log::warn!("No async runtime available; delayed task not scheduled");
            return false;
        };
        *pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        }));
        true
    }

    pub fn cancel(&self) {
        if let Some(prev) = self.pending().take() {
            prev.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending().as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
