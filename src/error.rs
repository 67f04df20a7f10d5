use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Rejection reason captured from a tracked operation.
///
/// The tracker never re-raises a rejection; it is surfaced here as data for
/// the presentation layer to display. Cloning is cheap so the reason can live
/// inside every published snapshot.
#[derive(Clone)]
pub struct TrackedError(Arc<anyhow::Error>);

impl TrackedError {
    pub(crate) fn new(err: anyhow::Error) -> Self {
        Self(Arc::new(err))
    }

    /// Top-level message of the rejection reason.
    pub fn message(&self) -> String {
        self.0.to_string()
    }

    /// Borrow the underlying error, e.g. to downcast or walk its chain.
    pub fn inner(&self) -> &anyhow::Error {
        &self.0
    }
}

impl fmt::Display for TrackedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for TrackedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl Serialize for TrackedError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[derive(Debug, thiserror::Error)]
    #[error("fetch failed: {0}")]
    struct FetchError(&'static str);

    #[test]
    fn test_message_and_display() {
        let err = TrackedError::new(anyhow!("hello"));
        assert_eq!(err.message(), "hello");
        assert_eq!(format!("{}", err), "hello");
    }

    #[test]
    fn test_downcast_through_inner() {
        let err = TrackedError::new(anyhow::Error::new(FetchError("timeout")));
        let fetch = err.inner().downcast_ref::<FetchError>();
        assert!(matches!(fetch, Some(FetchError("timeout"))));
    }

    #[test]
    fn test_serializes_as_message() {
        let err = TrackedError::new(anyhow!("boom"));
        assert_eq!(serde_json::to_value(&err).unwrap(), "boom");
    }
}
