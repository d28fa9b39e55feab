use super::{Context, money};
use anyhow::Result;
use loanlens_core::dashboard::StressPoint;
use loanlens_core::stress::StressLevel;
use loanlens_core::validation::FinancialInfoForm;
use serde_json::json;

pub async fn show(ctx: &Context<'_>) -> Result<()> {
    let identity = ctx.require_session().await?;
    let snapshot = ctx.app.dashboard_snapshot().await?;

    ctx.emit(snapshot.as_ref(), |snapshot| {
        println!("Dashboard for {}", identity.display_name());
        if !snapshot.has_income() {
            println!("No financial information yet. Add it with `loanlens financial-info`.");
        }
        println!("  Monthly income    {:>14}", money(snapshot.monthly_income));
        println!("  Monthly expenses  {:>14}", money(snapshot.monthly_expenses));
        println!("  Total EMI         {:>14}", money(snapshot.total_emi));

        let score = snapshot.clamped_stress_score();
        println!("  Stress score      {:>14.0}  ({})", score, StressLevel::from_score(score));

        if snapshot.recent_loans.is_empty() {
            println!("No loans yet.");
        } else {
            println!("Recent loans:");
            for loan in &snapshot.recent_loans {
                println!(
                    "  {:<12} {:>14}  {:>5.2}%  EMI {:>12}  {}",
                    loan.label(),
                    money(loan.amount),
                    loan.interest_rate,
                    money(loan.emi),
                    loan.status_or_default()
                );
            }
        }

        if !snapshot.stress_trend.is_empty() {
            println!("Stress trend:");
            for row in trend_rows(&snapshot.stress_trend) {
                println!("  {row}");
            }
        }
    })
}

/// One line per trend sample with a bar scaled to the 0-100 score range.
fn trend_rows(points: &[StressPoint]) -> Vec<String> {
    const WIDTH: f64 = 20.0;

    points
        .iter()
        .map(|point| {
            let score = if point.stress.is_nan() {
                0.0
            } else {
                point.stress.clamp(0.0, 100.0)
            };
            let filled = (score / 100.0 * WIDTH).round() as usize;
            format!("{:<10} {:>3.0} {}", point.label, score, "#".repeat(filled))
        })
        .collect()
}

pub async fn financial_info(ctx: &Context<'_>, income: String, expenses: String) -> Result<()> {
    ctx.require_session().await?;
    let form = FinancialInfoForm {
        monthly_income: income,
        monthly_expenses: expenses,
    };
    ctx.app.finance().update_financial_info(&form).await?;

    if !ctx.json {
        println!("Financial information updated.");
    }
    Ok(())
}

pub async fn stress(ctx: &Context<'_>) -> Result<()> {
    ctx.require_session().await?;
    let overview = ctx.app.finance().stress_overview().await?;

    let value = json!({
        "score": overview.score,
        "level": overview.level,
        "disposableIncome": overview.disposable_income,
        "loans": overview.contributions,
    });
    ctx.emit(&value, |_| {
        println!("Stress score {:.0}/100 - {}", overview.score, overview.level);
        println!("{}", overview.level.advice());
        println!("Disposable income {}", money(overview.disposable_income));

        if overview.contributions.is_empty() {
            println!("No loans to break down.");
            return;
        }
        println!("Share of disposable income per loan:");
        for loan in &overview.contributions {
            println!(
                "  {:<12} EMI {:>12}  {:>4}%",
                loan.name,
                money(loan.emi),
                loan.stress
            );
        }
    })
}
