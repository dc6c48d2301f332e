//! Session phase tracking

use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Empty,
    Loading,
    Ready,
    Error,
}

/// Current phase of a session, observable through a watch channel
#[derive(Debug)]
pub struct PhaseTracker {
    tx: watch::Sender<SessionPhase>,
}

impl PhaseTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionPhase::Empty);
        Self { tx }
    }

    pub fn current(&self) -> SessionPhase {
        *self.tx.borrow()
    }

    pub fn set(&self, phase: SessionPhase) {
        let previous = self.tx.send_replace(phase);
        if previous != phase {
            tracing::debug!(from = ?previous, to = ?phase, "Session phase changed");
        }
    }

    /// Receiver that observes every later transition
    pub fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.tx.subscribe()
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        assert_eq!(PhaseTracker::new().current(), SessionPhase::Empty);
    }

    #[test]
    fn test_subscriber_sees_latest_phase() {
        let tracker = PhaseTracker::new();
        let mut rx = tracker.subscribe();

        tracker.set(SessionPhase::Loading);
        tracker.set(SessionPhase::Ready);

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SessionPhase::Ready);
        assert_eq!(tracker.current(), SessionPhase::Ready);
    }
}
