//! Composition root.
//!
//! `LoanLensApp` wires the session store, the dashboard cache, the refill
//! worker and the use-case services around one gateway and one credential
//! store. Front ends hold the app and reach everything through it.

use crate::admin_service::AdminService;
use crate::assistant_service::AssistantService;
use crate::dashboard::{DashboardCache, RefillWorker};
use crate::finance_service::FinanceService;
use crate::loan_service::LoanService;
use crate::session::SessionStore;
use loanlens_core::Result;
use loanlens_core::config::ClientConfig;
use loanlens_core::credential::CredentialStore;
use loanlens_core::dashboard::DashboardSnapshot;
use loanlens_core::gateway::Gateway;
use loanlens_infrastructure::FileCredentialStore;
use loanlens_interaction::HttpGateway;
use std::path::Path;
use std::sync::Arc;

pub struct LoanLensApp {
    session: Arc<SessionStore>,
    dashboard: Arc<DashboardCache>,
    loans: LoanService,
    finance: FinanceService,
    assistant: AssistantService,
    admin: AdminService,
    worker: RefillWorker,
}

impl LoanLensApp {
    /// Builds the stores and services and spawns the refill worker.
    ///
    /// Must be called from within a tokio runtime.
    pub fn create(gateway: Arc<dyn Gateway>, credentials: Arc<dyn CredentialStore>) -> Self {
        let session = Arc::new(SessionStore::new(gateway.clone(), credentials));
        let dashboard = Arc::new(DashboardCache::new(gateway.clone()));
        let worker = RefillWorker::spawn(dashboard.clone(), &session);

        Self {
            loans: LoanService::new(gateway.clone(), session.clone(), dashboard.clone()),
            finance: FinanceService::new(gateway.clone(), session.clone(), dashboard.clone()),
            assistant: AssistantService::new(gateway.clone(), session.clone(), dashboard.clone()),
            admin: AdminService::new(gateway, session.clone()),
            session,
            dashboard,
            worker,
        }
    }

    /// Production wiring: HTTP gateway plus the file credential store.
    ///
    /// `base_path` relocates the credential file (tests and `--home`).
    pub fn from_config(config: &ClientConfig, base_path: Option<&Path>) -> Result<Self> {
        let credentials: Arc<dyn CredentialStore> =
            Arc::new(FileCredentialStore::new(base_path)?);
        let gateway = Arc::new(HttpGateway::from_config(config, credentials.clone())?);

        tracing::debug!(base_url = gateway.base_url(), "Gateway configured");
        Ok(Self::create(gateway, credentials))
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn dashboard(&self) -> &Arc<DashboardCache> {
        &self.dashboard
    }

    pub fn loans(&self) -> &LoanService {
        &self.loans
    }

    pub fn finance(&self) -> &FinanceService {
        &self.finance
    }

    pub fn assistant(&self) -> &AssistantService {
        &self.assistant
    }

    pub fn admin(&self) -> &AdminService {
        &self.admin
    }

    /// Snapshot for the current session revision.
    ///
    /// Joins the refill worker instead of racing it, so one session change
    /// costs one `GET /dashboard` no matter who asks first.
    pub async fn dashboard_snapshot(&self) -> Result<Arc<DashboardSnapshot>> {
        self.dashboard.sync_to(self.session.signal().revision).await
    }

    /// Ends the session and empties the cache before returning.
    pub fn logout(&self) -> Result<()> {
        let result = self.session.logout();
        self.dashboard.clear();
        result
    }

    /// Stops the refill worker.
    pub async fn teardown(self) {
        self.worker.shutdown().await;
        tracing::debug!("LoanLens app torn down");
    }
}
