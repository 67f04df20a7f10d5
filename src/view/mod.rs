//! Dispatching snapshots to display handlers.
//!
//! The presentation layer has no logic of its own: it reads a
//! [`StateSnapshot`] and picks exactly one display path. [`DisplayMode`]
//! encodes that choice and [`ViewBinding`] routes it to registered handlers.

use crate::error::TrackedError;
use crate::tracker::StateSnapshot;
use tracing::warn;

/// The display path a snapshot calls for. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// The current operation rejected; show its error.
    Rejected,
    /// The current operation settled without rejecting; show the data.
    Resolved,
    /// Still pending and the delay has elapsed; show a loading state.
    Pending,
    /// Pending but within the delay window; show nothing.
    Nothing,
}

impl DisplayMode {
    pub fn of<T>(snapshot: &StateSnapshot<T>) -> Self {
        if snapshot.error.is_some() {
            DisplayMode::Rejected
        } else if !snapshot.is_pending() {
            DisplayMode::Resolved
        } else if snapshot.is_delay_elapsed {
            DisplayMode::Pending
        } else {
            DisplayMode::Nothing
        }
    }
}

type RejectedFn<R> = Box<dyn Fn(&TrackedError) -> R + Send + Sync>;
type DataFn<T, R> = Box<dyn Fn(Option<&T>) -> R + Send + Sync>;
type CombinedFn<T, R> = Box<dyn Fn(&StateSnapshot<T>) -> R + Send + Sync>;

/// Routes snapshots to display handlers.
///
/// Handlers are registered per [`DisplayMode`]; a `combined` handler takes
/// precedence over mode dispatch and receives the whole snapshot. The pending
/// handler receives previously resolved data, so a stale value can stay on
/// screen while its replacement loads.
///
/// A snapshot that routes to a mode with no registered handler renders
/// nothing; in debug builds it additionally logs a warning, since that is a
/// wiring mistake rather than a runtime condition.
pub struct ViewBinding<T, R> {
    rejected: Option<RejectedFn<R>>,
    resolved: Option<DataFn<T, R>>,
    pending: Option<DataFn<T, R>>,
    combined: Option<CombinedFn<T, R>>,
}

impl<T, R> ViewBinding<T, R> {
    pub fn new() -> Self {
        Self {
            rejected: None,
            resolved: None,
            pending: None,
            combined: None,
        }
    }

    pub fn on_rejected(mut self, handler: impl Fn(&TrackedError) -> R + Send + Sync + 'static) -> Self {
        self.rejected = Some(Box::new(handler));
        self
    }

    pub fn on_resolved(mut self, handler: impl Fn(Option<&T>) -> R + Send + Sync + 'static) -> Self {
        self.resolved = Some(Box::new(handler));
        self
    }

    pub fn on_pending(mut self, handler: impl Fn(Option<&T>) -> R + Send + Sync + 'static) -> Self {
        self.pending = Some(Box::new(handler));
        self
    }

    pub fn combined(mut self, handler: impl Fn(&StateSnapshot<T>) -> R + Send + Sync + 'static) -> Self {
        self.combined = Some(Box::new(handler));
        self
    }

    /// Renders the snapshot through the matching handler, `None` when the
    /// mode is [`DisplayMode::Nothing`] or its handler is missing.
    pub fn render(&self, snapshot: &StateSnapshot<T>) -> Option<R> {
        if let Some(combined) = &self.combined {
            return Some(combined(snapshot));
        }

        let mode = DisplayMode::of(snapshot);
        match mode {
            DisplayMode::Nothing => None,
            DisplayMode::Rejected => match (&self.rejected, &snapshot.error) {
                (Some(handler), Some(error)) => Some(handler(error)),
                _ => missing_handler(mode),
            },
            DisplayMode::Resolved => match &self.resolved {
                Some(handler) => Some(handler(snapshot.data.as_ref())),
                None => missing_handler(mode),
            },
            DisplayMode::Pending => match &self.pending {
                Some(handler) => Some(handler(snapshot.data.as_ref())),
                None => missing_handler(mode),
            },
        }
    }
}

impl<T, R> Default for ViewBinding<T, R> {
    fn default() -> Self {
        Self::new()
    }
}

fn missing_handler<R>(mode: DisplayMode) -> Option<R> {
    if cfg!(debug_assertions) {
        warn!(?mode, "no display handler registered for mode, rendering nothing");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackedError;
    use anyhow::anyhow;

    fn rejected_snapshot(message: &str) -> StateSnapshot<&'static str> {
        StateSnapshot {
            is_rejected: true,
            is_delay_elapsed: true,
            error: Some(TrackedError::new(anyhow!(message.to_string()))),
            ..StateSnapshot::default()
        }
    }

    fn binding() -> ViewBinding<&'static str, String> {
        ViewBinding::new()
            .on_rejected(|error| format!("error: {error}"))
            .on_resolved(|data| format!("data: {}", data.unwrap_or(&"<none>")))
            .on_pending(|previous| format!("pending: {}", previous.unwrap_or(&"<none>")))
    }

    #[test]
    fn test_mode_dispatch() {
        let mut snapshot = StateSnapshot::<&str>::default();
        assert_eq!(DisplayMode::of(&snapshot), DisplayMode::Nothing);

        snapshot.is_delay_elapsed = true;
        assert_eq!(DisplayMode::of(&snapshot), DisplayMode::Pending);

        snapshot.is_resolved = true;
        snapshot.data = Some("v");
        assert_eq!(DisplayMode::of(&snapshot), DisplayMode::Resolved);

        assert_eq!(
            DisplayMode::of(&rejected_snapshot("boom")),
            DisplayMode::Rejected
        );
    }

    #[test]
    fn test_renders_each_mode() {
        let binding = binding();

        let mut snapshot = StateSnapshot::<&str>::default();
        assert_eq!(binding.render(&snapshot), None);

        snapshot.is_delay_elapsed = true;
        assert_eq!(binding.render(&snapshot), Some("pending: <none>".into()));

        snapshot.data = Some("old");
        assert_eq!(binding.render(&snapshot), Some("pending: old".into()));

        snapshot.is_resolved = true;
        assert_eq!(binding.render(&snapshot), Some("data: old".into()));

        assert_eq!(
            binding.render(&rejected_snapshot("hello")),
            Some("error: hello".into())
        );
    }

    #[test]
    fn test_missing_handler_renders_nothing() {
        let binding: ViewBinding<&str, String> =
            ViewBinding::new().on_resolved(|data| format!("data: {data:?}"));
        assert_eq!(binding.render(&rejected_snapshot("boom")), None);
    }

    #[test]
    fn test_combined_takes_precedence() {
        let binding: ViewBinding<&str, String> = binding()
            .combined(|snapshot| serde_json::to_string(snapshot).unwrap());

        let rendered = binding.render(&rejected_snapshot("fail")).unwrap();
        assert!(rendered.contains("\"is_rejected\":true"));
        assert!(rendered.contains("\"error\":\"fail\""));
    }
}
