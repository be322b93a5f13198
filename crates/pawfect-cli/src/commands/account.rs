//! The `pawfect login`, `signup` and `logout` commands.

use std::path::PathBuf;

use anyhow::Result;

use pawfect_core::forms::{LoginForm, SignupForm};
use pawfect_gateway::{create_identity_provider, load_config_from, GatewayConfig};

use crate::workspace;

pub async fn login(email: String, password: String, config_path: Option<PathBuf>) -> Result<()> {
    let form = LoginForm { email, password };
    form.validate()?;

    let config = load_config_from(config_path.as_deref())?;
    let provider = create_identity_provider(&config.gateway)?;
    let identity = provider.sign_in(form.email.trim(), &form.password).await?;

    workspace::store_identity(&identity)?;
    match &config.gateway {
        GatewayConfig::Local { .. } => println!("Signed in as {} (local account)", identity.label),
        GatewayConfig::Rest { .. } => println!("Welcome back! Signed in as {}", identity.label),
    }
    Ok(())
}

pub async fn signup(
    name: String,
    email: String,
    password: String,
    confirm_password: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let form = SignupForm {
        name,
        email,
        password,
        confirm_password,
    };
    form.validate()?;

    let config = load_config_from(config_path.as_deref())?;
    let provider = create_identity_provider(&config.gateway)?;
    let identity = provider
        .sign_up(form.email.trim(), &form.password, form.name.trim())
        .await?;

    let confirmed =
        identity.access_token.is_some() || matches!(config.gateway, GatewayConfig::Local { .. });
    if confirmed {
        workspace::store_identity(&identity)?;
        println!("Account created! Signed in as {}", identity.label);
    } else {
        println!("Account created! Check your email to confirm, then run `pawfect login`.");
    }
    Ok(())
}

pub async fn logout(config_path: Option<PathBuf>) -> Result<()> {
    let Some(identity) = workspace::clear_identity()? else {
        println!("Not signed in.");
        return Ok(());
    };

    let config = load_config_from(config_path.as_deref())?;
    let provider = create_identity_provider(&config.gateway)?;
    if let Err(e) = provider.sign_out(&identity).await {
        tracing::warn!(error = %e, "remote sign-out failed, local identity cleared anyway");
    }
    println!("Signed out {}", identity.label);
    Ok(())
}
