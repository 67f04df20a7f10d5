use std::time::Duration;

/// Delay before a pending operation is worth showing, in wall-clock time.
pub const DEFAULT_PENDING_DELAY_MS: u64 = 200;

/// How long the tracker waits before flagging a pending operation as visible.
///
/// Gates `is_delay_elapsed` so fast-settling operations never flicker a
/// pending UI. A zero delay means pending shows immediately. String input is
/// coerced numerically (milliseconds); anything non-numeric, non-finite or
/// non-positive counts as no delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDelay(Duration);

impl PendingDelay {
    /// No delay: pending is visible as soon as an operation is tracked.
    pub const NONE: PendingDelay = PendingDelay(Duration::ZERO);

    pub fn from_millis(ms: u64) -> Self {
        PendingDelay(Duration::from_millis(ms))
    }

    /// Delay to apply to a newly tracked operation, `None` when pending
    /// should show immediately.
    pub(crate) fn effective(self) -> Option<Duration> {
        (!self.0.is_zero()).then_some(self.0)
    }
}

impl Default for PendingDelay {
    fn default() -> Self {
        Self::from_millis(DEFAULT_PENDING_DELAY_MS)
    }
}

impl From<Duration> for PendingDelay {
    fn from(duration: Duration) -> Self {
        PendingDelay(duration)
    }
}

impl From<u64> for PendingDelay {
    fn from(ms: u64) -> Self {
        Self::from_millis(ms)
    }
}

impl From<&str> for PendingDelay {
    fn from(raw: &str) -> Self {
        let ms = raw.trim().parse::<f64>().unwrap_or(0.0);
        if ms.is_finite() && ms > 0.0 {
            PendingDelay(Duration::from_secs_f64(ms / 1000.0))
        } else {
            PendingDelay::NONE
        }
    }
}

impl From<String> for PendingDelay {
    fn from(raw: String) -> Self {
        raw.as_str().into()
    }
}
