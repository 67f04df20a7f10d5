use crate::error::TrackedError;
use serde::Serialize;

/// Observable state of the currently tracked operation.
///
/// Owned and mutated exclusively by a [`PromiseTracker`]; consumers read it
/// through [`PromiseTracker::subscribe`] borrows or [`PromiseTracker::snapshot`]
/// clones, so the fields are effectively read-only outside this crate.
///
/// [`PromiseTracker`]: crate::PromiseTracker
/// [`PromiseTracker::subscribe`]: crate::PromiseTracker::subscribe
/// [`PromiseTracker::snapshot`]: crate::PromiseTracker::snapshot
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot<T> {
    /// True once the current operation has resolved.
    pub is_resolved: bool,
    /// True once the current operation has rejected.
    pub is_rejected: bool,
    /// True once the pending delay has elapsed for the current operation
    /// (immediately, for a zero delay).
    pub is_delay_elapsed: bool,
    /// Last resolved value. Retained while a replacement operation loads;
    /// only a new resolution overwrites it, only clearing removes it.
    pub data: Option<T>,
    /// Rejection reason of the current operation. Reset on every assignment.
    pub error: Option<TrackedError>,
}

impl<T> StateSnapshot<T> {
    /// An operation is pending until it resolves or rejects. Derived, so it
    /// can never disagree with the settled flags.
    pub fn is_pending(&self) -> bool {
        !self.is_resolved && !self.is_rejected
    }
}

impl<T> Default for StateSnapshot<T> {
    fn default() -> Self {
        Self {
            is_resolved: false,
            is_rejected: false,
            is_delay_elapsed: false,
            data: None,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use serde_json::json;

    #[test]
    fn test_pending_is_derived() {
        let mut snapshot = StateSnapshot::<String>::default();
        assert!(snapshot.is_pending());
        snapshot.is_resolved = true;
        assert!(!snapshot.is_pending());
        snapshot.is_resolved = false;
        snapshot.is_rejected = true;
        assert!(!snapshot.is_pending());
    }

    #[test]
    fn test_serializes_for_combined_consumers() {
        let snapshot = StateSnapshot {
            is_resolved: false,
            is_rejected: true,
            is_delay_elapsed: true,
            data: Some("stale".to_string()),
            error: Some(TrackedError::new(anyhow!("boom"))),
        };
        assert_eq!(
            serde_json::to_value(&snapshot).unwrap(),
            json!({
                "is_resolved": false,
                "is_rejected": true,
                "is_delay_elapsed": true,
                "data": "stale",
                "error": "boom",
            })
        );
    }
}
