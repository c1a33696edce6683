//! One-shot cancellation tokens for suggestion cycles
//!
//! A token starts out pending and can be canceled exactly once. Work that
//! suspends (remote calls, pagination loops) either polls
//! [`CancellationToken::is_canceled`], registers a callback with
//! [`CancellationToken::on_cancel`], or races itself against
//! [`CancellationToken::canceled`].

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Notify;

type Callback = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct Inner {
    canceled: AtomicBool,
    callbacks: Mutex<Vec<Callback>>,
    notify: Notify,
}

/// Shared, cloneable cancellation flag
///
/// Clones observe the same state: canceling any clone cancels all of them.
#[derive(Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    /// Create a new pending token
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transition the token to canceled
    ///
    /// Registered callbacks run once, on the calling thread. Canceling an
    /// already canceled token does nothing.
    pub fn cancel(&self) {
        if self.inner.canceled.swap(true, Ordering::SeqCst) {
            return;
        }

        let callbacks = std::mem::take(
            &mut *self
                .inner
                .callbacks
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        for callback in callbacks {
            callback();
        }

        self.inner.notify.notify_waiters();
    }

    /// Whether the token has been canceled
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.inner.canceled.load(Ordering::SeqCst)
    }

    /// Run `callback` when the token is canceled
    ///
    /// If the token is already canceled the callback runs immediately.
    pub fn on_cancel(&self, callback: impl FnOnce() + Send + 'static) {
        let mut callbacks = self
            .inner
            .callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if self.is_canceled() {
            drop(callbacks);
            callback();
        } else {
            callbacks.push(Box::new(callback));
        }
    }

    /// Create a token that is canceled whenever `self` is
    ///
    /// The child can also be canceled on its own without affecting the parent.
    #[must_use]
    pub fn child(&self) -> Self {
        let child = Self::new();
        let linked = child.clone();
        self.on_cancel(move || linked.cancel());
        child
    }

    /// Resolve once the token is canceled
    pub async fn canceled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.is_canceled() {
                return;
            }
            notified.await;
        }
    }

    /// Drive `future` to completion unless the token is canceled first
    ///
    /// Returns `None` when cancellation wins. The future is dropped in that
    /// case, which aborts whatever it was doing.
    pub async fn run_until_canceled<F: Future>(&self, future: F) -> Option<F::Output> {
        if self.is_canceled() {
            return None;
        }

        tokio::select! {
            biased;
            () = self.canceled() => None,
            output = future => Some(output),
        }
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationToken")
            .field("canceled", &self.is_canceled())
            .finish()
    }
}
