use super::{Context, money};
use anyhow::Result;
use loanlens_core::validation::{LoanForm, SimulationForm};

pub async fn list(ctx: &Context<'_>) -> Result<()> {
    ctx.require_session().await?;
    let loans = ctx.app.loans().list().await?;

    ctx.emit(&loans, |loans| {
        if loans.is_empty() {
            println!("No loans yet. Add one with `loanlens loans add`.");
            return;
        }
        for loan in loans {
            let duration = loan
                .duration
                .map(|months| format!("{months} mo"))
                .unwrap_or_else(|| "-".to_string());
            let emi = loan.emi.map(money).unwrap_or_else(|| "-".to_string());
            println!(
                "{:<12} {:>14}  {:>5.2}%  {:>7}  EMI {:>12}  {}",
                loan.loan_type,
                money(loan.amount),
                loan.interest_rate,
                duration,
                emi,
                loan.status.as_deref().unwrap_or("active")
            );
        }
    })
}

pub async fn add(
    ctx: &Context<'_>,
    loan_type: String,
    amount: String,
    interest_rate: String,
    duration: String,
) -> Result<()> {
    ctx.require_session().await?;
    let form = LoanForm {
        loan_type,
        amount,
        interest_rate,
        duration,
    };
    let loan = ctx.app.loans().create(&form).await?;

    ctx.emit(&loan, |loan| {
        println!(
            "Added {} loan of {}.",
            loan.loan_type,
            money(loan.amount)
        );
        if let Some(emi) = loan.emi {
            println!("Monthly EMI: {}", money(emi));
        }
    })
}

pub async fn simulate(
    ctx: &Context<'_>,
    amount: String,
    interest_rate: String,
    duration: String,
    emi_adjustment: String,
    prepayment: String,
) -> Result<()> {
    ctx.require_session().await?;
    // Seed blank fields from the latest loan, as the simulator screen does.
    if let Err(err) = ctx.app.dashboard_snapshot().await {
        tracing::debug!("Simulating without cached loans: {}", err);
    }

    let form = SimulationForm {
        amount,
        interest_rate,
        duration,
        emi_adjustment,
        prepayment,
    };
    let result = ctx.app.loans().simulate(&form).await?;

    ctx.emit(&result, |result| {
        println!("New EMI         {:>14}", money(result.new_emi));
        println!("Interest saved  {:>14}", money(result.interest_saved));
        if let Some(months) = result.months {
            println!("Months          {:>14}", months);
        }
        if let Some(end) = &result.new_end_date {
            println!("Paid off by     {:>14}", end);
        }
        println!("Debt ratio      {:>13.1}%", result.debt_ratio * 100.0);
        println!("Risk score      {:>14.0}", result.risk_score);
        if let Some(level) = &result.stress_level {
            println!("Stress level    {:>14}", level);
        }
    })
}
