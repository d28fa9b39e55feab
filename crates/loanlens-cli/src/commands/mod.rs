use crate::{AdminAction, Commands, LoanAction};
use anyhow::{Result, bail};
use loanlens_application::LoanLensApp;
use loanlens_core::config::ClientConfig;
use loanlens_core::user::Identity;
use loanlens_infrastructure::ConfigService;
use serde::Serialize;

pub mod admin;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod insights;
pub mod loans;

/// What every command gets to work with.
pub struct Context<'a> {
    pub app: &'a LoanLensApp,
    pub config: &'a ClientConfig,
    pub config_service: &'a ConfigService,
    pub json: bool,
}

impl Context<'_> {
    /// Restores the persisted session or fails with a hint to log in.
    pub async fn require_session(&self) -> Result<Identity> {
        match self.app.session().restore().await {
            Some(identity) => Ok(identity),
            None => bail!("Not logged in. Run `loanlens login` first."),
        }
    }

    /// Prints `value` as JSON in `--json` mode, otherwise runs `text`.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(&T)) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            text(value);
        }
        Ok(())
    }
}

pub async fn run(ctx: &Context<'_>, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => auth::login(ctx, &email, &password).await,
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            let confirm = confirm_password.unwrap_or_else(|| password.clone());
            auth::register(ctx, &name, &email, &password, &confirm).await
        }
        Commands::Logout => auth::logout(ctx),
        Commands::Whoami => auth::whoami(ctx).await,
        Commands::Dashboard => dashboard::show(ctx).await,
        Commands::FinancialInfo { income, expenses } => {
            dashboard::financial_info(ctx, income, expenses).await
        }
        Commands::Stress => dashboard::stress(ctx).await,
        Commands::Loans { action } => match action {
            LoanAction::List => loans::list(ctx).await,
            LoanAction::Add {
                loan_type,
                amount,
                rate,
                duration,
            } => loans::add(ctx, loan_type, amount, rate, duration).await,
        },
        Commands::Simulate {
            amount,
            rate,
            months,
            extra_emi,
            prepayment,
        } => loans::simulate(ctx, amount, rate, months, extra_emi, prepayment).await,
        Commands::Analyze { stress } => insights::analyze(ctx, stress).await,
        Commands::Suggestions => insights::suggestions(ctx).await,
        Commands::Chat { message } => insights::chat(ctx, &message.join(" ")).await,
        Commands::Admin { action } => match action {
            AdminAction::Users => admin::users(ctx).await,
            AdminAction::Loans => admin::loans(ctx).await,
        },
        Commands::Config { save } => config::show(ctx, save),
    }
}

/// Formats an amount with two decimals and thousands separators.
pub fn money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}
