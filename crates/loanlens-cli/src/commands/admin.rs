use super::{Context, money};
use anyhow::Result;

pub async fn users(ctx: &Context<'_>) -> Result<()> {
    ctx.require_session().await?;
    let users = ctx.app.admin().users().await?;

    ctx.emit(&users, |users| {
        for user in users {
            println!(
                "{:<26} {:<24} {:<30} {}",
                user.id,
                user.display_name(),
                user.email,
                user.role.as_deref().unwrap_or("user")
            );
        }
        println!("{} users", users.len());
    })
}

pub async fn loans(ctx: &Context<'_>) -> Result<()> {
    ctx.require_session().await?;
    let loans = ctx.app.admin().loans().await?;

    ctx.emit(&loans, |loans| {
        for loan in loans {
            println!(
                "{:<26} {:<12} {:>14}  {:>5.2}%  {}",
                loan.id.as_deref().unwrap_or("-"),
                loan.loan_type,
                money(loan.amount),
                loan.interest_rate,
                loan.status.as_deref().unwrap_or("active")
            );
        }
        println!("{} loans", loans.len());
    })
}
