//! Client-side input validation.
//!
//! Every form is checked here before a request is built, so validation
//! failures never reach the network layer.

use crate::auth::{LoginRequest, RegisterRequest};
use crate::error::{LoanLensError, Result};
use crate::finance::FinancialInfo;
use crate::loan::{NewLoan, SimulatedLoan, SimulationRequest, WhatIf};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

pub const MIN_PASSWORD_LEN: usize = 6;

const FILL_ALL_FIELDS: &str = "Please fill in all fields";

/// Default loan terms used by the simulation form when a field is blank.
pub const DEFAULT_SIMULATION_AMOUNT: f64 = 150_000.0;
pub const DEFAULT_SIMULATION_RATE: f64 = 3.5;
pub const DEFAULT_SIMULATION_MONTHS: u32 = 240;

/// Trims and lowercases an email address as typed into a form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Password strength on a 0..=5 scale.
///
/// One point each for length >= 6, length >= 10, mixed case, a digit and a
/// symbol.
pub fn password_strength(password: &str) -> u8 {
    let mut strength = 0;
    if password.len() >= 6 {
        strength += 1;
    }
    if password.len() >= 10 {
        strength += 1;
    }
    if password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
    {
        strength += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        strength += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        strength += 1;
    }
    strength
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest> {
        let email = normalize_email(&self.email);
        let password = self.password.trim().to_string();
        if email.is_empty() || password.is_empty() {
            return Err(LoanLensError::validation("form", FILL_ALL_FIELDS));
        }
        Ok(LoginRequest { email, password })
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest> {
        let name = self.name.trim().to_string();
        let email = normalize_email(&self.email);
        let password = self.password.trim().to_string();
        let confirm = self.confirm_password.trim();

        if name.is_empty() || email.is_empty() || password.is_empty() || confirm.is_empty() {
            return Err(LoanLensError::validation("form", FILL_ALL_FIELDS));
        }
        if !is_valid_email(&email) {
            return Err(LoanLensError::validation(
                "email",
                "Please enter a valid email address",
            ));
        }
        if password != confirm {
            return Err(LoanLensError::validation(
                "confirm_password",
                "Passwords do not match",
            ));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(LoanLensError::validation(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters long"),
            ));
        }
        Ok(RegisterRequest {
            name,
            email,
            password,
        })
    }
}

/// Loan entry form; numeric fields arrive as typed text.
#[derive(Debug, Clone, Default)]
pub struct LoanForm {
    pub loan_type: String,
    pub amount: String,
    pub interest_rate: String,
    pub duration: String,
}

impl LoanForm {
    pub fn validate(&self) -> Result<NewLoan> {
        let loan_type = self.loan_type.trim();
        if loan_type.is_empty()
            || self.amount.trim().is_empty()
            || self.interest_rate.trim().is_empty()
            || self.duration.trim().is_empty()
        {
            return Err(LoanLensError::validation("form", FILL_ALL_FIELDS));
        }

        let amount = parse_positive("amount", &self.amount)?;
        let interest_rate = parse_non_negative("interest_rate", &self.interest_rate)?;
        let duration = parse_months("duration", &self.duration)?;

        Ok(NewLoan {
            loan_type: loan_type.to_string(),
            amount,
            interest_rate,
            duration,
        })
    }
}

/// What-if simulation form. Blank fields fall back to defaults.
#[derive(Debug, Clone, Default)]
pub struct SimulationForm {
    pub amount: String,
    pub interest_rate: String,
    pub duration: String,
    pub emi_adjustment: String,
    pub prepayment: String,
}

impl SimulationForm {
    pub fn validate(&self) -> Result<SimulationRequest> {
        let amount = or_default(&self.amount, DEFAULT_SIMULATION_AMOUNT, |v| {
            parse_positive("amount", v)
        })?;
        let interest_rate = or_default(&self.interest_rate, DEFAULT_SIMULATION_RATE, |v| {
            parse_non_negative("interest_rate", v)
        })?;
        let tenure_months = or_default(&self.duration, DEFAULT_SIMULATION_MONTHS, |v| {
            parse_months("duration", v)
        })?;
        let extra_emi = or_default(&self.emi_adjustment, 0.0, |v| {
            parse_non_negative("emi_adjustment", v)
        })?;
        let prepayment = or_default(&self.prepayment, 0.0, |v| {
            parse_non_negative("prepayment", v)
        })?;

        Ok(SimulationRequest {
            loan: SimulatedLoan {
                amount,
                interest_rate,
                tenure_months,
            },
            what_if: WhatIf {
                extra_emi,
                prepayment,
            },
        })
    }
}

/// Monthly income/expenses form.
#[derive(Debug, Clone, Default)]
pub struct FinancialInfoForm {
    pub monthly_income: String,
    pub monthly_expenses: String,
}

impl FinancialInfoForm {
    pub fn validate(&self) -> Result<FinancialInfo> {
        if self.monthly_income.trim().is_empty() || self.monthly_expenses.trim().is_empty() {
            return Err(LoanLensError::validation("form", FILL_ALL_FIELDS));
        }
        Ok(FinancialInfo {
            monthly_income: parse_non_negative("monthly_income", &self.monthly_income)?,
            monthly_expenses: parse_non_negative("monthly_expenses", &self.monthly_expenses)?,
        })
    }
}

fn or_default<T>(raw: &str, default: T, parse: impl FnOnce(&str) -> Result<T>) -> Result<T> {
    if raw.trim().is_empty() {
        Ok(default)
    } else {
        parse(raw)
    }
}

fn parse_number(field: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| LoanLensError::validation(field, format!("{field} must be a number")))
}

fn parse_positive(field: &str, raw: &str) -> Result<f64> {
    let value = parse_number(field, raw)?;
    if value <= 0.0 {
        return Err(LoanLensError::validation(
            field,
            format!("{field} must be greater than zero"),
        ));
    }
    Ok(value)
}

fn parse_non_negative(field: &str, raw: &str) -> Result<f64> {
    let value = parse_number(field, raw)?;
    if value < 0.0 {
        return Err(LoanLensError::validation(
            field,
            format!("{field} cannot be negative"),
        ));
    }
    Ok(value)
}

fn parse_months(field: &str, raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(months) if months > 0 => Ok(months),
        _ => Err(LoanLensError::validation(
            field,
            format!("{field} must be a whole number of months"),
        )),
    }
}
