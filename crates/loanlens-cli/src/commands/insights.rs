use super::Context;
use anyhow::Result;
use loanlens_core::finance::Priority;
use serde_json::Value;

pub async fn analyze(ctx: &Context<'_>, stress: bool) -> Result<()> {
    ctx.require_session().await?;
    let report = if stress {
        ctx.app.finance().stress_analysis().await?
    } else {
        ctx.app.finance().analyze().await?
    };

    ctx.emit(&report, |report| {
        let mut keys: Vec<&String> = report.fields.keys().collect();
        keys.sort();
        for key in keys {
            match &report.fields[key] {
                Value::String(text) => println!("{key}: {text}"),
                Value::Number(number) => println!("{key}: {number}"),
                Value::Bool(flag) => println!("{key}: {flag}"),
                other => println!("{key}: {other}"),
            }
        }
    })
}

pub async fn suggestions(ctx: &Context<'_>) -> Result<()> {
    ctx.require_session().await?;
    let report = ctx.app.finance().suggestions().await?;

    ctx.emit(&report, |report| {
        if let Some(metrics) = &report.stress_metrics {
            println!(
                "Debt ratio {:.1}%, risk score {:.0}",
                metrics.debt_ratio * 100.0,
                metrics.risk_score
            );
        }
        if report.suggestions.is_empty() {
            println!("No suggestions right now.");
            return;
        }
        for suggestion in &report.suggestions {
            let tag = match suggestion.priority {
                Priority::High => "HIGH",
                Priority::Medium => "MED ",
                Priority::Low => "LOW ",
                Priority::Info => "INFO",
            };
            println!("[{tag}] {}", suggestion.title);
            if !suggestion.message.is_empty() {
                println!("       {}", suggestion.message);
            }
        }
    })
}

pub async fn chat(ctx: &Context<'_>, message: &str) -> Result<()> {
    ctx.require_session().await?;
    let reply = ctx.app.assistant().ask(message).await?;

    ctx.emit(&reply, |reply| println!("{reply}"))
}
