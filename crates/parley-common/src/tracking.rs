//! Generic output tracking for infrastructure wrappers.
//!
//! An [`OutputListener`] is owned by the component that produces observable
//! side effects; it appends every emitted event to an internal ordered log.
//! Tests obtain an [`OutputTracker`] view over that log and assert on its
//! contents after the fact. There is no subscription or callback mechanism:
//! consumption is pull-based.
//!
//! Every tracker created from a listener is backed by the same log, so a
//! tracker observes emissions that happened before it was created as well
//! as those that happen afterwards.

use std::sync::{Arc, Mutex, PoisonError};

/// Append-only log of emitted events.
///
/// `emit` has no failure mode. Appends are atomic, so a listener shared
/// across threads stays consistent; the single-threaded call-per-request
/// pattern needs no further coordination.
#[derive(Debug)]
pub struct OutputListener<T> {
    output: Arc<Mutex<Vec<T>>>,
}

impl<T> OutputListener<T> {
    /// Creates a listener with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Appends `event` to the log.
    pub fn emit(&self, event: T) {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// Returns a read-only view over the full log, past and future.
    #[must_use]
    pub fn create_tracker(&self) -> OutputTracker<T> {
        OutputTracker {
            output: Arc::clone(&self.output),
        }
    }
}

impl<T> Default for OutputListener<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view over an [`OutputListener`]'s log.
///
/// Cloning a tracker yields another view over the same log.
#[derive(Debug, Clone)]
pub struct OutputTracker<T> {
    output: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone> OutputTracker<T> {
    /// Returns an ordered snapshot of everything emitted so far.
    #[must_use]
    pub fn output(&self) -> Vec<T> {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of events emitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been emitted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn tracker_sees_events_in_emission_order() {
        let listener = OutputListener::new();
        let tracker = listener.create_tracker();

        listener.emit("first");
        listener.emit("second");
        listener.emit("third");

        assert_eq!(tracker.output(), vec!["first", "second", "third"]);
    }

    #[test]
    fn tracker_sees_events_emitted_before_its_creation() {
        let listener = OutputListener::new();
        listener.emit("early");

        let tracker = listener.create_tracker();
        listener.emit("late");

        assert_eq!(tracker.output(), vec!["early", "late"]);
    }

    #[test]
    fn multiple_trackers_share_the_same_log() {
        let listener = OutputListener::new();
        let first = listener.create_tracker();
        let second = listener.create_tracker();

        listener.emit(42);

        assert_eq!(first.output(), vec![42]);
        assert_eq!(second.output(), vec![42]);
    }

    #[test]
    fn empty_listener_produces_empty_tracker() {
        let listener: OutputListener<String> = OutputListener::new();
        let tracker = listener.create_tracker();

        assert!(tracker.is_empty());
        assert_eq!(tracker.len(), 0);
        assert_eq!(tracker.output(), Vec::<String>::new());
    }

    #[test]
    fn concurrent_emission_loses_no_events() {
        let listener = Arc::new(OutputListener::new());
        let tracker = listener.create_tracker();

        let handles: Vec<_> = (0..8)
            .map(|worker| {
                let listener = Arc::clone(&listener);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        listener.emit(worker * 100 + i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(tracker.len(), 800);
    }
}
