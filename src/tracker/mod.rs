//! State tracking for a single asynchronous operation.
//!
//! A [`PromiseTracker`] watches one operation at a time and publishes a
//! [`StateSnapshot`] describing it: pending, resolved or rejected, the last
//! resolved value, the captured rejection reason, and whether the configured
//! pending delay has elapsed. Replacing the operation supersedes the previous
//! one: its eventual settlement is discarded rather than applied out of order.

mod delay;
mod snapshot;

pub use delay::{PendingDelay, DEFAULT_PENDING_DELAY_MS};
pub use snapshot::StateSnapshot;

use crate::error::TrackedError;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

/// Operations are numbered as they are assigned. A settlement or timer
/// callback may only touch the snapshot while its number is still the live
/// one.
type Generation = u64;

struct Shared<T> {
    state: watch::Sender<StateSnapshot<T>>,
    live: AtomicU64,
}

/// Tracks the lifecycle of one asynchronous operation at a time.
///
/// The tracked operation is any future yielding `Result<T, anyhow::Error>`.
/// Assigning a new operation with [`track`](Self::track) supersedes the
/// previous one; clearing with [`clear`](Self::clear) stops tracking
/// altogether. Consumers observe the state through
/// [`subscribe`](Self::subscribe) or [`snapshot`](Self::snapshot).
///
/// The tracker itself never fails: rejection reasons are captured into the
/// snapshot as data, and settlements of superseded operations are silently
/// discarded.
pub struct PromiseTracker<T> {
    shared: Arc<Shared<T>>,
    delay: PendingDelay,
    timer: Option<JoinHandle<()>>,
}

impl<T: Send + Sync + 'static> PromiseTracker<T> {
    /// Creates an idle tracker with the default pending delay
    /// ([`DEFAULT_PENDING_DELAY_MS`]).
    pub fn new() -> Self {
        Self::with_delay(PendingDelay::default())
    }

    /// Creates an idle tracker with the given pending delay.
    pub fn with_delay(delay: impl Into<PendingDelay>) -> Self {
        let (state, _) = watch::channel(StateSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                state,
                live: AtomicU64::new(0),
            }),
            delay: delay.into(),
            timer: None,
        }
    }

    /// Starts tracking a new operation, superseding any previous one.
    ///
    /// Synchronously resets the settled flags and the captured error, and
    /// arms the pending-delay timer (or marks the delay elapsed immediately
    /// for a zero delay). The previous operation is not aborted; it runs to
    /// completion and its settlement is discarded. Previously resolved data
    /// is retained until this operation resolves.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn track<F>(&mut self, operation: F)
    where
        F: Future<Output = Result<T, anyhow::Error>> + Send + 'static,
    {
        let generation = self.begin();
        let delay = self.delay.effective();

        self.shared.state.send_modify(|state| {
            state.is_rejected = false;
            state.is_resolved = false;
            state.error = None;
            state.is_delay_elapsed = delay.is_none();
        });

        self.cancel_timer();
        if let Some(duration) = delay {
            self.timer = Some(tokio::spawn(mark_delay_elapsed(
                Arc::clone(&self.shared),
                generation,
                duration,
            )));
        }

        trace!(generation, ?delay, "tracking new operation");
        tokio::spawn(settle(Arc::clone(&self.shared), generation, operation));
    }

    /// Stops tracking: resets the settled flags and error, drops the retained
    /// data and cancels any pending delay timer.
    ///
    /// `is_delay_elapsed` keeps its last value; with no operation tracked the
    /// snapshot reports pending with no delay guarantee.
    pub fn clear(&mut self) {
        self.begin();
        self.shared.state.send_modify(|state| {
            state.is_rejected = false;
            state.is_resolved = false;
            state.error = None;
            state.data = None;
        });
        self.cancel_timer();
        trace!("cleared tracked operation");
    }

    /// Sets the pending delay for subsequent [`track`](Self::track) calls.
    /// The delay is sampled once per assignment, so the current operation's
    /// timer is unaffected.
    pub fn set_delay(&mut self, delay: impl Into<PendingDelay>) {
        self.delay = delay.into();
    }

    pub fn delay(&self) -> PendingDelay {
        self.delay
    }

    /// Subscribes to snapshot updates. Every assignment, clear, applied
    /// settlement and delay elapse publishes one change.
    pub fn subscribe(&self) -> watch::Receiver<StateSnapshot<T>> {
        self.shared.state.subscribe()
    }

    /// Current state by value.
    pub fn snapshot(&self) -> StateSnapshot<T>
    where
        T: Clone,
    {
        self.shared.state.borrow().clone()
    }

    /// Supersedes whatever operation is currently live and returns the new
    /// live generation.
    fn begin(&self) -> Generation {
        self.shared.live.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl<T: Send + Sync + 'static> Default for PromiseTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for PromiseTracker<T> {
    fn drop(&mut self) {
        // In-flight settlement tasks hold the shared state; superseding them
        // keeps a late settlement from mutating a snapshot nobody reads.
        self.shared.live.fetch_add(1, Ordering::AcqRel);
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

async fn mark_delay_elapsed<T>(shared: Arc<Shared<T>>, generation: Generation, duration: Duration) {
    tokio::time::sleep(duration).await;
    shared.state.send_if_modified(|state| {
        if shared.live.load(Ordering::Acquire) != generation {
            return false;
        }
        state.is_delay_elapsed = true;
        true
    });
}

async fn settle<T, F>(shared: Arc<Shared<T>>, generation: Generation, operation: F)
where
    F: Future<Output = Result<T, anyhow::Error>>,
{
    let outcome = operation.await;
    let applied = shared.state.send_if_modified(|state| {
        // The guard runs inside the watch lock, so it cannot interleave with
        // a reassignment's synchronous reset.
        if shared.live.load(Ordering::Acquire) != generation {
            return false;
        }
        match outcome {
            Ok(value) => {
                state.data = Some(value);
                state.is_resolved = true;
            }
            Err(err) => {
                state.error = Some(TrackedError::new(err));
                state.is_rejected = true;
            }
        }
        true
    });
    if !applied {
        trace!(generation, "discarded settlement of superseded operation");
    }
}
