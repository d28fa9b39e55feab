use super::Context;
use anyhow::Result;
use loanlens_application::RegisterOutcome;
use loanlens_core::validation::{RegisterForm, password_strength};

pub async fn login(ctx: &Context<'_>, email: &str, password: &str) -> Result<()> {
    let payload = ctx.app.session().login(email, password).await?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }
    if let Some(identity) = ctx.app.session().identity() {
        println!("Welcome back, {}!", identity.display_name());
    }
    Ok(())
}

pub async fn register(
    ctx: &Context<'_>,
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<()> {
    // Confirmation only exists on the form; check it before anything is sent.
    RegisterForm {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        confirm_password: confirm_password.to_string(),
    }
    .validate()?;

    let outcome = ctx.app.session().register(name, email, password).await?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(outcome.payload())?);
        return Ok(());
    }

    println!("Password strength: {}/5", password_strength(password));
    match outcome {
        RegisterOutcome::Authenticated(_) => {
            println!("Account created. You are logged in as {email}.");
        }
        RegisterOutcome::LoginRequired(_) => {
            println!("Account created. Log in with `loanlens login --email {email}`.");
        }
    }
    Ok(())
}

pub fn logout(ctx: &Context<'_>) -> Result<()> {
    ctx.app.logout()?;
    if !ctx.json {
        println!("Logged out.");
    }
    Ok(())
}

pub async fn whoami(ctx: &Context<'_>) -> Result<()> {
    let identity = ctx.require_session().await?;
    ctx.emit(&identity, |identity| {
        println!("{} <{}>", identity.display_name(), identity.email);
        if let Some(role) = &identity.role {
            println!("role: {role}");
        }
    })
}
