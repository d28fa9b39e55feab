//! Scriptable in-memory gateway shared by the unit tests of this crate.

use async_trait::async_trait;
use loanlens_core::assistant::{ChatReply, ChatRequest};
use loanlens_core::auth::{LoginRequest, RegisterRequest};
use loanlens_core::dashboard::{DashboardSnapshot, LoanSummary};
use loanlens_core::finance::{AnalysisReport, AnalysisRequest, FinancialInfo, SuggestionsReport};
use loanlens_core::gateway::Gateway;
use loanlens_core::loan::{Loan, NewLoan, SimulationRequest, SimulationResult};
use loanlens_core::user::Identity;
use loanlens_core::{LoanLensError, Result};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{oneshot, watch};

/// One scripted answer to `GET /dashboard`.
pub enum DashboardStep {
    Ready(Result<DashboardSnapshot>),
    /// Resolves when the paired sender fires.
    Deferred(oneshot::Receiver<Result<DashboardSnapshot>>),
}

/// Gateway double.
///
/// Dashboard reads consume `dashboard_script` first and otherwise answer
/// with `dashboard`, which `create_loan` and `update_financial_info` keep in
/// sync the way the backend would.
pub struct MockGateway {
    pub login_response: Mutex<Result<Value>>,
    pub register_response: Mutex<Result<Value>>,
    pub me_response: Mutex<Result<Value>>,
    pub dashboard: Mutex<DashboardSnapshot>,
    pub dashboard_script: Mutex<VecDeque<DashboardStep>>,
    pub chat_reply: Mutex<String>,
    pub chat_requests: Mutex<Vec<ChatRequest>>,
    pub simulations: Mutex<Vec<SimulationRequest>>,
    pub loans: Mutex<Vec<Loan>>,
    pub login_calls: AtomicUsize,
    pub me_calls: AtomicUsize,
    pub dashboard_calls: AtomicUsize,
    pub mutation_calls: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            login_response: Mutex::new(Ok(login_payload("T"))),
            register_response: Mutex::new(Ok(json!({"success": true, "message": "Registered"}))),
            me_response: Mutex::new(Ok(json!({"success": true, "data": user_json()}))),
            dashboard: Mutex::new(snapshot(5000.0, 2000.0, 0.0)),
            dashboard_script: Mutex::new(VecDeque::new()),
            chat_reply: Mutex::new("Your stress score is 20.".to_string()),
            chat_requests: Mutex::new(Vec::new()),
            simulations: Mutex::new(Vec::new()),
            loans: Mutex::new(Vec::new()),
            login_calls: AtomicUsize::new(0),
            me_calls: AtomicUsize::new(0),
            dashboard_calls: AtomicUsize::new(0),
            mutation_calls: AtomicUsize::new(0),
        }
    }

    pub fn script_dashboard(&self, step: DashboardStep) {
        self.dashboard_script.lock().unwrap().push_back(step);
    }

    pub fn set_dashboard(&self, snapshot: DashboardSnapshot) {
        *self.dashboard.lock().unwrap() = snapshot;
    }

    pub fn dashboard_calls(&self) -> usize {
        self.dashboard_calls.load(Ordering::SeqCst)
    }

    /// Yields until at least `count` dashboard reads have started.
    pub async fn wait_for_dashboard_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while self.dashboard_calls() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("dashboard reads did not start");
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn login(&self, _request: &LoginRequest) -> Result<Value> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.login_response.lock().unwrap().clone()
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<Value> {
        self.register_response.lock().unwrap().clone()
    }

    async fn me(&self) -> Result<Value> {
        self.me_calls.fetch_add(1, Ordering::SeqCst);
        self.me_response.lock().unwrap().clone()
    }

    async fn dashboard(&self) -> Result<DashboardSnapshot> {
        self.dashboard_calls.fetch_add(1, Ordering::SeqCst);
        let step = self.dashboard_script.lock().unwrap().pop_front();
        match step {
            Some(DashboardStep::Ready(result)) => result,
            Some(DashboardStep::Deferred(receiver)) => receiver
                .await
                .unwrap_or_else(|_| Err(LoanLensError::network("deferred response dropped"))),
            None => Ok(self.dashboard.lock().unwrap().clone()),
        }
    }

    async fn update_financial_info(&self, info: &FinancialInfo) -> Result<()> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        let mut dashboard = self.dashboard.lock().unwrap();
        dashboard.monthly_income = info.monthly_income;
        dashboard.monthly_expenses = info.monthly_expenses;
        Ok(())
    }

    async fn create_loan(&self, loan: &NewLoan) -> Result<Loan> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        let emi = loan.amount / f64::from(loan.duration.max(1));
        let record = Loan {
            id: Some(format!("l{}", self.loans.lock().unwrap().len() + 1)),
            loan_type: loan.loan_type.clone(),
            amount: loan.amount,
            interest_rate: loan.interest_rate,
            duration: Some(loan.duration),
            status: Some("active".to_string()),
            emi: Some(emi),
        };
        self.loans.lock().unwrap().push(record.clone());

        let mut dashboard = self.dashboard.lock().unwrap();
        dashboard.total_emi += emi;
        dashboard.recent_loans.insert(
            0,
            LoanSummary {
                id: record.id.clone(),
                loan_type: record.loan_type.clone(),
                amount: record.amount,
                interest_rate: record.interest_rate,
                status: record.status.clone(),
                emi,
            },
        );
        Ok(record)
    }

    async fn list_loans(&self) -> Result<Vec<Loan>> {
        Ok(self.loans.lock().unwrap().clone())
    }

    async fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult> {
        self.simulations.lock().unwrap().push(request.clone());
        Ok(SimulationResult {
            new_emi: request.loan.amount / f64::from(request.loan.tenure_months.max(1)),
            months: Some(request.loan.tenure_months),
            ..Default::default()
        })
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        self.chat_requests.lock().unwrap().push(request.clone());
        Ok(ChatReply {
            reply: self.chat_reply.lock().unwrap().clone(),
        })
    }

    async fn analyze_finance(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        analysis(json!({"disposableIncome": request.monthly_income - request.monthly_expenses}))
    }

    async fn analyze_stress(&self, request: &AnalysisRequest) -> Result<AnalysisReport> {
        analysis(json!({"loanCount": request.loans.len()}))
    }

    async fn suggestions(&self, _request: &AnalysisRequest) -> Result<SuggestionsReport> {
        Ok(SuggestionsReport::default())
    }

    async fn admin_users(&self) -> Result<Vec<Identity>> {
        Ok(vec![serde_json::from_value(user_json())?])
    }

    async fn admin_loans(&self) -> Result<Vec<Loan>> {
        Ok(self.loans.lock().unwrap().clone())
    }
}

fn analysis(value: Value) -> Result<AnalysisReport> {
    Ok(serde_json::from_value(value)?)
}

pub fn user_json() -> Value {
    json!({"id": "u1", "name": "Asha", "email": "a@b.com", "role": "user"})
}

pub fn login_payload(token: &str) -> Value {
    json!({"success": true, "data": {"token": token, "user": user_json()}})
}

pub fn snapshot(income: f64, expenses: f64, total_emi: f64) -> DashboardSnapshot {
    DashboardSnapshot {
        monthly_income: income,
        monthly_expenses: expenses,
        total_emi,
        ..Default::default()
    }
}

/// Waits for the next published cache value.
pub async fn next_change<T: Clone>(receiver: &mut watch::Receiver<T>) -> T {
    tokio::time::timeout(Duration::from_secs(2), receiver.changed())
        .await
        .expect("no change published")
        .expect("channel closed");
    receiver.borrow_and_update().clone()
}
