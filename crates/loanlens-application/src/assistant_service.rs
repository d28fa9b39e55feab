//! Assistant Service
//!
//! Forwards a question together with the dashboard figures of the current
//! session revision to `POST /assistant/chat`. The assistant only echoes server-computed
//! numbers, so it is never asked anything without them.

use crate::dashboard::DashboardCache;
use crate::session::SessionStore;
use loanlens_core::assistant::ChatRequest;
use loanlens_core::gateway::Gateway;
use loanlens_core::{LoanLensError, Result};
use std::sync::Arc;

/// Reply given locally when no income has been recorded yet.
pub const MISSING_INCOME_REPLY: &str =
    "I need your monthly income before I can analyze your finances. \
     Add it with `loanlens financial-info` and ask again.";

pub struct AssistantService {
    gateway: Arc<dyn Gateway>,
    session: Arc<SessionStore>,
    dashboard: Arc<DashboardCache>,
}

impl AssistantService {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        session: Arc<SessionStore>,
        dashboard: Arc<DashboardCache>,
    ) -> Self {
        Self {
            gateway,
            session,
            dashboard,
        }
    }

    /// Asks the assistant and returns the scrubbed reply text.
    pub async fn ask(&self, message: &str) -> Result<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(LoanLensError::validation("message", "Please enter a question"));
        }

        let snapshot = self.dashboard.sync_to(self.session.signal().revision).await?;
        if !snapshot.has_income() {
            tracing::debug!("No income recorded, answering locally");
            return Ok(MISSING_INCOME_REPLY.to_string());
        }

        let request = ChatRequest::from_snapshot(message, &snapshot);
        let reply = self.gateway.chat(&request).await?;
        Ok(reply.sanitized())
    }
}
