use loanlens_core::Result;
use loanlens_core::dashboard::DashboardSnapshot;
use loanlens_core::gateway::Gateway;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, watch};

/// Value observed by cache subscribers. `None` means nothing fetched yet.
pub type SnapshotView = Option<Arc<DashboardSnapshot>>;

/// Single shared holder of the most recent dashboard snapshot.
///
/// The snapshot is replaced as a whole; readers never observe a partially
/// updated value. Overlapping [`refill`] calls are not ordered: the response
/// that resolves last is the one that stays. Signal-driven refills go
/// through [`sync_to`], which fetches at most once per signal revision.
///
/// [`refill`]: DashboardCache::refill
/// [`sync_to`]: DashboardCache::sync_to
pub struct DashboardCache {
    gateway: Arc<dyn Gateway>,
    snapshot: watch::Sender<SnapshotView>,
    /// Incremented by `clear`; refills started under an older epoch are dropped.
    epoch: AtomicU64,
    /// Signal revision the held snapshot was fetched for.
    synced_revision: AtomicU64,
    sync_gate: Mutex<()>,
}

impl DashboardCache {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        let (snapshot, _) = watch::channel(None);
        Self {
            gateway,
            snapshot,
            epoch: AtomicU64::new(0),
            synced_revision: AtomicU64::new(0),
            sync_gate: Mutex::new(()),
        }
    }

    /// Fetches `GET /dashboard` and replaces the held snapshot.
    ///
    /// On failure the previous snapshot is kept, the error is logged and
    /// returned to the caller. A response that arrives after [`clear`] was
    /// called is returned but not stored.
    ///
    /// [`clear`]: DashboardCache::clear
    pub async fn refill(&self) -> Result<Arc<DashboardSnapshot>> {
        self.fetch(None).await
    }

    /// Snapshot fetched for signal `revision` or a later one.
    ///
    /// Callers are serialized: whoever arrives while another caller (usually
    /// the refill worker) is fetching for the same revision waits for that
    /// response instead of issuing a second request. A failed fetch is not
    /// remembered, so the next caller tries again.
    pub async fn sync_to(&self, revision: u64) -> Result<Arc<DashboardSnapshot>> {
        let _gate = self.sync_gate.lock().await;

        if let Some(snapshot) = self.read() {
            if self.synced_revision.load(Ordering::SeqCst) >= revision {
                return Ok(snapshot);
            }
        }
        self.fetch(Some(revision)).await
    }

    async fn fetch(&self, revision: Option<u64>) -> Result<Arc<DashboardSnapshot>> {
        let epoch = self.epoch.load(Ordering::SeqCst);

        let snapshot = match self.gateway.dashboard().await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(err) => {
                tracing::warn!("Dashboard refill failed, keeping previous snapshot: {}", err);
                return Err(err);
            }
        };

        let stored = self.snapshot.send_if_modified(|current| {
            if self.epoch.load(Ordering::SeqCst) != epoch {
                return false;
            }
            *current = Some(snapshot.clone());
            if let Some(revision) = revision {
                self.synced_revision.fetch_max(revision, Ordering::SeqCst);
            }
            true
        });

        if stored {
            tracing::debug!(
                total_emi = snapshot.total_emi,
                stress_score = snapshot.stress_score,
                "Dashboard snapshot replaced"
            );
        } else {
            tracing::debug!("Dashboard cleared during refill, response dropped");
        }
        Ok(snapshot)
    }

    /// Current snapshot. Never blocks on the network.
    pub fn read(&self) -> SnapshotView {
        self.snapshot.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_none()
    }

    /// Returns the cache to its empty state.
    pub fn clear(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let previous = self.snapshot.send_replace(None);
        if previous.is_some() {
            tracing::debug!("Dashboard snapshot cleared");
        }
    }

    /// Receiver notified on every replacement or clear.
    pub fn subscribe(&self) -> watch::Receiver<SnapshotView> {
        self.snapshot.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DashboardStep, MockGateway, snapshot};
    use loanlens_core::LoanLensError;
    use tokio::sync::oneshot;

    fn cache_with(gateway: Arc<MockGateway>) -> Arc<DashboardCache> {
        Arc::new(DashboardCache::new(gateway))
    }

    #[tokio::test]
    async fn test_empty_until_first_refill() {
        let gateway = Arc::new(MockGateway::new());
        let cache = cache_with(gateway.clone());
        assert!(cache.read().is_none());

        cache.refill().await.unwrap();

        assert_eq!(cache.read().unwrap().monthly_income, 5000.0);
        assert_eq!(gateway.dashboard_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_refill_keeps_previous_snapshot() {
        let gateway = Arc::new(MockGateway::new());
        let cache = cache_with(gateway.clone());
        cache.refill().await.unwrap();
        let before = cache.read().unwrap();

        gateway.script_dashboard(DashboardStep::Ready(Err(LoanLensError::network("offline"))));
        let err = cache.refill().await.unwrap_err();

        assert!(err.is_network());
        let after = cache.read().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(*after, snapshot(5000.0, 2000.0, 0.0));
    }

    #[tokio::test]
    async fn test_failed_first_refill_stays_empty() {
        let gateway = Arc::new(MockGateway::new());
        gateway.script_dashboard(DashboardStep::Ready(Err(LoanLensError::auth("expired"))));
        let cache = cache_with(gateway);

        assert!(cache.refill().await.is_err());
        assert!(cache.is_empty());
    }

    /// Overlapping refills are not ordered: the stale response resolving last
    /// overwrites the newer one. This pins down current behavior.
    #[tokio::test]
    async fn test_last_resolved_refill_wins() {
        let gateway = Arc::new(MockGateway::new());
        let (first_tx, first_rx) = oneshot::channel();
        let (second_tx, second_rx) = oneshot::channel();
        gateway.script_dashboard(DashboardStep::Deferred(first_rx));
        gateway.script_dashboard(DashboardStep::Deferred(second_rx));
        let cache = cache_with(gateway.clone());

        let first = tokio::spawn({
            let cache = cache.clone();
            async move { cache.refill().await }
        });
        gateway.wait_for_dashboard_calls(1).await;
        let second = tokio::spawn({
            let cache = cache.clone();
            async move { cache.refill().await }
        });
        gateway.wait_for_dashboard_calls(2).await;

        second_tx.send(Ok(snapshot(5000.0, 2000.0, 900.0))).unwrap();
        second.await.unwrap().unwrap();
        assert_eq!(cache.read().unwrap().total_emi, 900.0);

        first_tx.send(Ok(snapshot(5000.0, 2000.0, 100.0))).unwrap();
        first.await.unwrap().unwrap();
        assert_eq!(cache.read().unwrap().total_emi, 100.0);
    }

    #[tokio::test]
    async fn test_clear_discards_in_flight_refill() {
        let gateway = Arc::new(MockGateway::new());
        let (tx, rx) = oneshot::channel();
        gateway.script_dashboard(DashboardStep::Deferred(rx));
        let cache = cache_with(gateway.clone());

        let pending = tokio::spawn({
            let cache = cache.clone();
            async move { cache.refill().await }
        });
        gateway.wait_for_dashboard_calls(1).await;

        cache.clear();
        tx.send(Ok(snapshot(1.0, 0.0, 0.0))).unwrap();
        pending.await.unwrap().unwrap();

        assert!(cache.read().is_none());

        cache.refill().await.unwrap();
        assert!(cache.read().is_some());
    }

    #[tokio::test]
    async fn test_subscribers_see_replacements() {
        let cache = cache_with(Arc::new(MockGateway::new()));
        let mut receiver = cache.subscribe();

        cache.refill().await.unwrap();
        assert!(receiver.has_changed().unwrap());
        assert!(receiver.borrow_and_update().is_some());

        cache.clear();
        assert!(receiver.has_changed().unwrap());
        assert!(receiver.borrow_and_update().is_none());
    }

    #[tokio::test]
    async fn test_sync_to_fetches_once_per_revision() {
        let gateway = Arc::new(MockGateway::new());
        let cache = cache_with(gateway.clone());

        cache.sync_to(0).await.unwrap();
        cache.sync_to(0).await.unwrap();
        assert_eq!(gateway.dashboard_calls(), 1);

        cache.sync_to(1).await.unwrap();
        cache.sync_to(1).await.unwrap();
        assert_eq!(gateway.dashboard_calls(), 2);
    }

    #[tokio::test]
    async fn test_sync_to_waits_for_in_flight_fetch() {
        let gateway = Arc::new(MockGateway::new());
        let (tx, rx) = oneshot::channel();
        gateway.script_dashboard(DashboardStep::Deferred(rx));
        let cache = cache_with(gateway.clone());

        let first = tokio::spawn({
            let cache = cache.clone();
            async move { cache.sync_to(3).await }
        });
        gateway.wait_for_dashboard_calls(1).await;
        let second = tokio::spawn({
            let cache = cache.clone();
            async move { cache.sync_to(3).await }
        });
        tokio::task::yield_now().await;

        tx.send(Ok(snapshot(5000.0, 2000.0, 700.0))).unwrap();
        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(gateway.dashboard_calls(), 1);
    }

    #[tokio::test]
    async fn test_sync_to_refetches_after_clear() {
        let gateway = Arc::new(MockGateway::new());
        let cache = cache_with(gateway.clone());

        cache.sync_to(2).await.unwrap();
        cache.clear();
        cache.sync_to(2).await.unwrap();

        assert_eq!(gateway.dashboard_calls(), 2);
        assert!(cache.read().is_some());
    }

    #[tokio::test]
    async fn test_failed_sync_is_retried() {
        let gateway = Arc::new(MockGateway::new());
        gateway.script_dashboard(DashboardStep::Ready(Err(LoanLensError::network("offline"))));
        let cache = cache_with(gateway.clone());

        assert!(cache.sync_to(1).await.is_err());
        cache.sync_to(1).await.unwrap();

        assert_eq!(gateway.dashboard_calls(), 2);
    }
}
