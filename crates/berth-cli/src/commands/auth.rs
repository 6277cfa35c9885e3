use super::AppContext;
use anyhow::{Result, bail};
use berth_application::AuthController;

pub async fn login(ctx: &AppContext, user: &str, pass: &str) -> Result<()> {
    let auth = AuthController::new(ctx.client.clone(), ctx.store.clone());
    if auth.login(user, pass).await {
        let state = auth.current();
        let user = state.user().expect("authenticated state carries a user");
        println!("Logged in as {} ({})", user.username, user.roles.join(", "));
        Ok(())
    } else {
        let state = auth.current();
        bail!(
            "login failed: {}",
            state.error().unwrap_or("unknown error")
        )
    }
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    let auth = AuthController::new(ctx.client.clone(), ctx.store.clone());
    auth.logout();
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    let auth = AuthController::new(ctx.client.clone(), ctx.store.clone());
    auth.initialize().await;

    let state = auth.current();
    match state.user() {
        Some(user) => {
            println!("{} ({})", user.username, user.id);
            if let Some(email) = &user.email {
                println!("email: {email}");
            }
            if !user.roles.is_empty() {
                println!("roles: {}", user.roles.join(", "));
            }
            Ok(())
        }
        None => match state.error() {
            Some(error) => bail!("not logged in: {error}"),
            None => bail!("not logged in; run `berth login`"),
        },
    }
}
