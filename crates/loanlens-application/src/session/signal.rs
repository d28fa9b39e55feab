//! Invalidation signal published by the session store.

use tokio::sync::watch;

/// Value carried on the invalidation channel.
///
/// Receivers only ever observe the latest value, so any number of bumps
/// issued before a receiver wakes up collapse into a single change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSignal {
    /// Monotonic counter; starts at 0 and is incremented by every publish.
    pub revision: u64,
    /// Whether a session was held when the signal was published.
    pub authenticated: bool,
}

/// Publishing half of the invalidation channel.
#[derive(Debug)]
pub struct SignalChannel {
    sender: watch::Sender<SessionSignal>,
}

impl SignalChannel {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(SessionSignal::default());
        Self { sender }
    }

    pub fn current(&self) -> SessionSignal {
        *self.sender.borrow()
    }

    /// Increments the revision and returns the new value.
    pub fn bump(&self) -> u64 {
        let mut revision = 0;
        self.sender.send_modify(|signal| {
            signal.revision += 1;
            revision = signal.revision;
        });
        revision
    }

    /// Records a session transition and bumps the revision.
    pub fn set_authenticated(&self, authenticated: bool) -> u64 {
        let mut revision = 0;
        self.sender.send_modify(|signal| {
            signal.authenticated = authenticated;
            signal.revision += 1;
            revision = signal.revision;
        });
        revision
    }

    /// New receiver. The current value is marked as already seen.
    pub fn subscribe(&self) -> watch::Receiver<SessionSignal> {
        self.sender.subscribe()
    }
}

impl Default for SignalChannel {
    fn default() -> Self {
        Self::new()
    }
}
