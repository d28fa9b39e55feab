//! Remote data gateway contract.
//!
//! The gateway is the only component that talks to the backend. It attaches
//! the bearer credential, decodes the `{success, data, message}` envelope and
//! normalizes failures into [`LoanLensError`].

use crate::assistant::{ChatReply, ChatRequest};
use crate::auth::{LoginRequest, RegisterRequest};
use crate::dashboard::DashboardSnapshot;
use crate::error::Result;
use crate::finance::{AnalysisReport, AnalysisRequest, FinancialInfo, SuggestionsReport};
use crate::loan::{Loan, NewLoan, SimulationRequest, SimulationResult};
use crate::user::Identity;
use async_trait::async_trait;
use serde_json::Value;

/// Backend operations consumed by the client.
///
/// Authentication endpoints return the raw response body so the session
/// store can apply the pinned schema and hand the payload back to callers.
/// Everything else returns the decoded `data` field.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// `POST /auth/login`
    async fn login(&self, request: &LoginRequest) -> Result<Value>;

    /// `POST /auth/register`
    async fn register(&self, request: &RegisterRequest) -> Result<Value>;

    /// `GET /auth/me`, used to validate a persisted credential.
    async fn me(&self) -> Result<Value>;

    /// `GET /dashboard`
    async fn dashboard(&self) -> Result<DashboardSnapshot>;

    /// `PUT /dashboard/financial-info`
    async fn update_financial_info(&self, info: &FinancialInfo) -> Result<()>;

    /// `POST /loan`
    async fn create_loan(&self, loan: &NewLoan) -> Result<Loan>;

    /// `GET /loan`
    async fn list_loans(&self) -> Result<Vec<Loan>>;

    /// `POST /loan/simulate`
    async fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult>;

    /// `POST /assistant/chat`
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply>;

    /// `POST /finance/analyze`
    async fn analyze_finance(&self, request: &AnalysisRequest) -> Result<AnalysisReport>;

    /// `POST /stress/analyze`
    async fn analyze_stress(&self, request: &AnalysisRequest) -> Result<AnalysisReport>;

    /// `POST /suggestions/get`
    async fn suggestions(&self, request: &AnalysisRequest) -> Result<SuggestionsReport>;

    /// `GET /admin/users`
    async fn admin_users(&self) -> Result<Vec<Identity>>;

    /// `GET /admin/loans`
    async fn admin_loans(&self) -> Result<Vec<Loan>>;
}
