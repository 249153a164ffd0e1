use anyhow::{Context, Result};
use certdesk_core::user::Credentials;

use crate::bootstrap::App;

pub fn status(app: &App) {
    let session = app.controller.state().snapshot();
    if !session.is_logged_in() {
        println!("Not logged in ({})", app.config.api.base_url);
        return;
    }

    let user = &session.user;
    let name = if user.name.is_empty() {
        "<unnamed>"
    } else {
        user.name.as_str()
    };
    println!("Logged in as {}", name);
    match user.role {
        Some(role) => println!("  role:     {}", role),
        None => println!("  role:     <unknown>"),
    }
    if let Some(modality) = &user.modality {
        println!("  modality: {}", modality);
    }
    if let Some(avatar_url) = &user.avatar_url {
        println!("  avatar:   {}", avatar_url);
    }
    println!("  server:   {}", app.config.api.base_url);
}

pub async fn login(app: &App, email: &str, password: &str) -> Result<()> {
    app.auth
        .sign_in(&Credentials::new(email, password), &app.navigator)
        .await
        .context("Login failed")?;

    let session = app.controller.state().snapshot();
    println!("Welcome, {}", session.user.name);
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.controller
        .logout(&app.navigator)
        .context("Logged out, but the stored session could not be cleared")?;
    println!("Logged out");
    Ok(())
}

pub fn avatar(app: &App, url: Option<&str>) -> Result<()> {
    app.controller
        .update_avatar(url)
        .context("Failed to store avatar")?;

    match app.controller.state().snapshot().user.avatar_url {
        Some(url) => println!("Avatar set to {}", url),
        None => println!("Avatar removed"),
    }
    Ok(())
}
