use anyhow::Result;
use clap::{Parser, Subcommand};
use loanlens_application::LoanLensApp;
use loanlens_core::config::ClientConfig;
use loanlens_infrastructure::ConfigService;
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "loanlens")]
#[command(about = "LoanLens CLI - loans, dashboard and debt stress for the smart loan analyzer", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the API (overrides config.toml and LOANLENS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Keep config, credential and logs under this directory
    #[arg(long, global = true, env = "LOANLENS_HOME")]
    home: Option<PathBuf>,

    /// Tracing filter, e.g. `debug` or `loanlens_application=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Echo log records to stderr as well
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the credential
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LOANLENS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "LOANLENS_PASSWORD", hide_env_values = true)]
        password: String,
        /// Repeat the password (defaults to --password)
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Forget the stored credential
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Show the dashboard snapshot
    Dashboard,
    /// Record monthly income and expenses
    FinancialInfo {
        #[arg(long)]
        income: String,
        #[arg(long)]
        expenses: String,
    },
    /// Manage loans
    Loans {
        #[command(subcommand)]
        action: LoanAction,
    },
    /// Run a what-if simulation
    Simulate {
        #[arg(long, default_value = "")]
        amount: String,
        /// Annual interest rate in percent
        #[arg(long, default_value = "")]
        rate: String,
        /// Tenure in months
        #[arg(long, default_value = "")]
        months: String,
        /// Extra amount paid on top of the EMI every month
        #[arg(long, default_value = "")]
        extra_emi: String,
        /// One-off prepayment
        #[arg(long, default_value = "")]
        prepayment: String,
    },
    /// Show the stress score and per-loan breakdown
    Stress,
    /// Ask the backend for a financial analysis
    Analyze {
        /// Run the stress analysis instead of the finance analysis
        #[arg(long)]
        stress: bool,
    },
    /// Show improvement suggestions
    Suggestions,
    /// Ask the assistant a question
    Chat { message: Vec<String> },
    /// Administrator views
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to config.toml
        #[arg(long)]
        save: bool,
    },
}

#[derive(Subcommand)]
pub enum LoanAction {
    /// List your loans
    List,
    /// Add a loan
    Add {
        /// Loan type, e.g. home, car, personal
        #[arg(long = "type")]
        loan_type: String,
        #[arg(long)]
        amount: String,
        /// Annual interest rate in percent
        #[arg(long)]
        rate: String,
        /// Tenure in months
        #[arg(long)]
        duration: String,
    },
}

#[derive(Subcommand)]
pub enum AdminAction {
    /// List every user
    Users,
    /// List every loan
    Loans,
}

fn load_config(cli: &Cli, service: &ConfigService) -> Result<ClientConfig> {
    let mut config = service.load()?;
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_service = ConfigService::new(cli.home.as_deref())?;
    let config = load_config(&cli, &config_service)?;
    let _log_guard = logging::init(&config, cli.home.as_deref(), cli.verbose)?;

    let app = LoanLensApp::from_config(&config, cli.home.as_deref())?;
    let context = commands::Context {
        app: &app,
        config: &config,
        config_service: &config_service,
        json: cli.json,
    };
    let result = commands::run(&context, cli.command).await;
    app.teardown().await;

    result
}
