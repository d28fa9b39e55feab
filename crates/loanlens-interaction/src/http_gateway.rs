//! HttpGateway - REST implementation of the [`Gateway`] contract.
//!
//! Every request reads the persisted credential and, when one is held,
//! attaches it as `Authorization: Bearer <token>`. Without a credential the
//! request goes out unauthenticated and the server is expected to reject it.

use crate::envelope::{decode_data, decode_data_or_default, error_message, expect_ack};
use async_trait::async_trait;
use loanlens_core::assistant::{ChatReply, ChatRequest};
use loanlens_core::auth::{LoginRequest, RegisterRequest};
use loanlens_core::config::ClientConfig;
use loanlens_core::credential::CredentialStore;
use loanlens_core::dashboard::DashboardSnapshot;
use loanlens_core::finance::{AnalysisReport, AnalysisRequest, FinancialInfo, SuggestionsReport};
use loanlens_core::gateway::Gateway;
use loanlens_core::loan::{Loan, NewLoan, SimulationRequest, SimulationResult};
use loanlens_core::user::Identity;
use loanlens_core::{LoanLensError, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Gateway implementation that talks to the backend over HTTP.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpGateway {
    /// Creates a gateway with transport defaults.
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    /// Creates a gateway honoring the configured base URL and timeout.
    pub fn from_config(config: &ClientConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LoanLensError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));

        match self.credentials.load() {
            Ok(Some(credential)) => builder.header(AUTHORIZATION, credential.bearer()),
            Ok(None) => builder,
            Err(err) => {
                tracing::warn!("Could not read credential, sending unauthenticated: {}", err);
                builder
            }
        }
    }

    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Value>
    where
        B: Serialize + Sync + ?Sized,
    {
        let mut builder = self.request(method.clone(), path);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        tracing::debug!(%method, path, "Sending request");

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            let message = error_message(&text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
            tracing::debug!(%method, path, status = status.as_u16(), "Request rejected");
            return Err(LoanLensError::from_status(status.as_u16(), message));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| LoanLensError::protocol(format!("Response is not valid JSON: {e}")))
    }

    async fn get(&self, path: &str) -> Result<Value> {
        self.send::<()>(Method::GET, path, None).await
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Value> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn put<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Value> {
        self.send(Method::PUT, path, Some(body)).await
    }
}

fn map_transport_error(err: reqwest::Error) -> LoanLensError {
    if err.is_decode() {
        LoanLensError::protocol(format!("Failed to read response: {err}"))
    } else {
        LoanLensError::network(format!("Request failed: {err}"))
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn login(&self, request: &LoginRequest) -> Result<Value> {
        self.post("auth/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Value> {
        self.post("auth/register", request).await
    }

    async fn me(&self) -> Result<Value> {
        self.get("auth/me").await
    }

    async fn dashboard(&self) -> Result<DashboardSnapshot> {
        decode_data(self.get("dashboard").await?)
    }

    async fn update_financial_info(&self, info: &FinancialInfo) -> Result<()> {
        expect_ack(self.put("dashboard/financial-info", info).await?)
    }

    async fn create_loan(&self, loan: &NewLoan) -> Result<Loan> {
        decode_data(self.post("loan", loan).await?)
    }

    async fn list_loans(&self) -> Result<Vec<Loan>> {
        decode_data_or_default(self.get("loan").await?)
    }

    async fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult> {
        decode_data(self.post("loan/simulate", request).await?)
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        decode_data_or_default(self.post("assistant/chat", request).await?)
    }

    async fn analyze_finance(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        decode_data(self.post("finance/analyze", request).await?)
    }

    async fn analyze_stress(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        decode_data(self.post("stress/analyze", request).await?)
    }

    async fn suggestions(&self, request: &AnalysisRequest) -> Result<SuggestionsReport> {
        decode_data_or_default(self.post("suggestions/get", request).await?)
    }

    async fn admin_users(&self) -> Result<Vec<Identity>> {
        decode_data_or_default(self.get("admin/users").await?)
    }

    async fn admin_loans(&self) -> Result<Vec<Loan>> {
        decode_data_or_default(self.get("admin/loans").await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loanlens_core::Result as CoreResult;
    use loanlens_core::user::Credential;

    struct FixedCredential(Option<Credential>);

    impl CredentialStore for FixedCredential {
        fn load(&self) -> CoreResult<Option<Credential>> {
            Ok(self.0.clone())
        }
        fn save(&self, _credential: &Credential) -> CoreResult<()> {
            Ok(())
        }
        fn clear(&self) -> CoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_url_joining() {
        let gateway = HttpGateway::new("http://localhost:5000/api/", Arc::new(FixedCredential(None)));
        assert_eq!(gateway.url("/auth/me"), "http://localhost:5000/api/auth/me");
        assert_eq!(gateway.url("loan"), "http://localhost:5000/api/loan");
    }

    #[test]
    fn test_bearer_header_attached() {
        let gateway = HttpGateway::new(
            "http://localhost:5000/api",
            Arc::new(FixedCredential(Some(Credential::new("T")))),
        );
        let request = gateway.request(Method::GET, "dashboard").build().unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer T"
        );
    }

    #[test]
    fn test_no_credential_no_header() {
        let gateway = HttpGateway::new("http://localhost:5000/api", Arc::new(FixedCredential(None)));
        let request = gateway.request(Method::GET, "dashboard").build().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_from_config_uses_base_url() {
        let config = ClientConfig {
            api_base_url: "https://example.com/api/".to_string(),
            request_timeout_secs: Some(5),
            ..Default::default()
        };
        let gateway = HttpGateway::from_config(&config, Arc::new(FixedCredential(None))).unwrap();
        assert_eq!(gateway.base_url(), "https://example.com/api");
    }
}
