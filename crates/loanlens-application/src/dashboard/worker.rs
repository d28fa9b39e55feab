use super::cache::DashboardCache;
use crate::session::{SessionSignal, SessionStore};
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Background task that turns signal changes into cache refills.
///
/// The worker is the only subscriber of the session signal. Because a watch
/// receiver only sees the latest value, every burst of bumps observed in one
/// wake-up results in exactly one refill for the whole application. A refill
/// rejected with an `Auth` error expires the session.
pub struct RefillWorker {
    handle: JoinHandle<()>,
}

impl RefillWorker {
    /// Spawns the worker on the current tokio runtime.
    ///
    /// The worker keeps only a weak handle on the session; it exits once the
    /// session store is dropped.
    pub fn spawn(cache: Arc<DashboardCache>, session: &Arc<SessionStore>) -> Self {
        let handle = tokio::spawn(run(cache, session.subscribe(), Arc::downgrade(session)));
        Self { handle }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the worker and waits for it to exit.
    pub async fn shutdown(self) {
        self.handle.abort();
        if let Err(err) = self.handle.await {
            if !err.is_cancelled() {
                tracing::warn!("Refill worker ended abnormally: {}", err);
            }
        }
    }
}

async fn run(
    cache: Arc<DashboardCache>,
    mut signal: watch::Receiver<SessionSignal>,
    session: Weak<SessionStore>,
) {
    tracing::debug!("Refill worker started");

    while signal.changed().await.is_ok() {
        let current = *signal.borrow_and_update();

        if !current.authenticated {
            cache.clear();
            continue;
        }

        tracing::debug!(revision = current.revision, "Refilling dashboard");
        // Other failures are logged by the cache and never surface here.
        if let Err(err) = cache.sync_to(current.revision).await {
            if err.is_auth() {
                if let Some(session) = session.upgrade() {
                    session.expire();
                }
            }
        }
    }

    tracing::debug!("Session signal closed, refill worker exiting");
}
