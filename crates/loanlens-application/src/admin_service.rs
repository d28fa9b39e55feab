//! Admin Service
//!
//! Read-only views over every user and loan. The backend enforces the role;
//! the client refuses early when the held identity is known not to be admin.

use crate::session::SessionStore;
use loanlens_core::gateway::Gateway;
use loanlens_core::loan::Loan;
use loanlens_core::user::Identity;
use loanlens_core::{LoanLensError, Result};
use std::sync::Arc;

pub struct AdminService {
    gateway: Arc<dyn Gateway>,
    session: Arc<SessionStore>,
}

impl AdminService {
    pub fn new(gateway: Arc<dyn Gateway>, session: Arc<SessionStore>) -> Self {
        Self { gateway, session }
    }

    /// `GET /admin/users`
    pub async fn users(&self) -> Result<Vec<Identity>> {
        self.ensure_admin()?;
        self.gateway.admin_users().await
    }

    /// `GET /admin/loans`
    pub async fn loans(&self) -> Result<Vec<Loan>> {
        self.ensure_admin()?;
        self.gateway.admin_loans().await
    }

    fn ensure_admin(&self) -> Result<()> {
        match self.session.identity() {
            Some(identity) if !identity.is_admin() => {
                Err(LoanLensError::auth("Admin access required"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockGateway, user_json};
    use loanlens_infrastructure::MemoryCredentialStore;
    use serde_json::json;

    fn service(gateway: Arc<MockGateway>) -> (Arc<SessionStore>, AdminService) {
        let session = Arc::new(SessionStore::new(
            gateway.clone(),
            Arc::new(MemoryCredentialStore::new()),
        ));
        (session.clone(), AdminService::new(gateway, session))
    }

    #[tokio::test]
    async fn test_non_admin_is_refused() {
        let gateway = Arc::new(MockGateway::new());
        let (session, admin) = service(gateway);
        session.login("a@b.com", "x").await.unwrap();

        assert!(admin.users().await.unwrap_err().is_auth());
    }

    #[tokio::test]
    async fn test_admin_lists_users() {
        let gateway = Arc::new(MockGateway::new());
        let mut user = user_json();
        user["role"] = json!("admin");
        *gateway.login_response.lock().unwrap() =
            Ok(json!({"success": true, "data": {"token": "T", "user": user}}));
        let (session, admin) = service(gateway);
        session.login("a@b.com", "x").await.unwrap();

        assert_eq!(admin.users().await.unwrap().len(), 1);
        assert!(admin.loans().await.unwrap().is_empty());
    }
}
