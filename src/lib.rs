//! Delay-aware state tracking for a single asynchronous operation.
//!
//! [`PromiseTracker`] watches one operation at a time and keeps an observable
//! [`StateSnapshot`] consistent with the most recently assigned one: pending,
//! resolved or rejected, the last resolved value, the captured rejection
//! reason, and a timer-gated `is_delay_elapsed` flag that keeps fast
//! operations from flickering a loading UI. Superseded operations settle into
//! the void; their results never overwrite newer state.
//!
//! [`ViewBinding`] covers the consuming side: it routes a snapshot to exactly
//! one of four display handlers (rejected, resolved, pending, nothing).
//!
//! ```
//! use promistate::PromiseTracker;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut tracker = PromiseTracker::with_delay(0u64);
//! let mut updates = tracker.subscribe();
//!
//! tracker.track(async { Ok::<_, anyhow::Error>("hello".to_string()) });
//!
//! updates.wait_for(|state| state.is_resolved).await.unwrap();
//! assert_eq!(tracker.snapshot().data.as_deref(), Some("hello"));
//! # }
//! ```

mod error;
pub mod tracker;
pub mod view;

pub use error::TrackedError;
pub use tracker::{PendingDelay, PromiseTracker, StateSnapshot, DEFAULT_PENDING_DELAY_MS};
pub use view::{DisplayMode, ViewBinding};
